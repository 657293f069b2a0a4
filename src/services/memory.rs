//! In-memory stand-ins for Postgres and the mind backend, used by tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::chat_message::{ChatMessage, ChatRole};
use crate::models::check_in::{CheckIn, CheckInMetrics};
use crate::models::journal_entry::JournalEntry;
use crate::models::recommendation::{RecommendationBundle, RecommendationCache};
use crate::services::insights::UserInsights;
use crate::services::mind_client::{AiPayload, RecommendationGenerator};
use crate::services::store::{ActivityStore, RecommendationStore};

#[derive(Default)]
pub struct MemoryStore {
    check_ins: Mutex<Vec<CheckIn>>,
    journal_entries: Mutex<Vec<JournalEntry>>,
    chat_messages: Mutex<Vec<ChatMessage>>,
    caches: Mutex<HashMap<Uuid, RecommendationCache>>,
    pub fail_reads: AtomicBool,
    pub fail_upserts: AtomicBool,
    pub upserts: AtomicUsize,
}

fn newest_first<T, K: Ord>(
    rows: &[T],
    user_id: Uuid,
    owner: impl Fn(&T) -> Uuid,
    key: impl Fn(&T) -> K,
    limit: Option<i64>,
) -> Vec<T>
where
    T: Clone,
{
    let mut out: Vec<T> = rows.iter().filter(|r| owner(r) == user_id).cloned().collect();
    out.sort_by(|a, b| key(b).cmp(&key(a)));
    if let Some(limit) = limit {
        out.truncate(limit as usize);
    }
    out
}

impl MemoryStore {
    pub fn add_check_in(&self, user_id: Uuid, mood: &str, date: DateTime<Utc>) -> CheckIn {
        let row = CheckIn {
            id: Uuid::new_v4(),
            user_id,
            date,
            mood: mood.to_string(),
            notes: String::new(),
            metrics: Json(CheckInMetrics::default()),
        };
        self.check_ins.lock().unwrap().push(row.clone());
        row
    }

    pub fn add_journal_entry(&self, user_id: Uuid, mood: &str, date: DateTime<Utc>) -> JournalEntry {
        let row = JournalEntry {
            id: Uuid::new_v4(),
            user_id,
            date,
            mood: mood.to_string(),
            text: "Wrote a little today.".into(),
        };
        self.journal_entries.lock().unwrap().push(row.clone());
        row
    }

    pub fn add_chat_message(
        &self,
        user_id: Uuid,
        role: ChatRole,
        content: &str,
        timestamp: DateTime<Utc>,
    ) -> ChatMessage {
        let row = ChatMessage {
            id: Uuid::new_v4(),
            user_id,
            role,
            content: content.to_string(),
            sentiment: None,
            sources: vec![],
            timestamp,
        };
        self.chat_messages.lock().unwrap().push(row.clone());
        row
    }

    /// Plants a cache row with an arbitrary `updated_at`.
    pub fn seed_cache(
        &self,
        user_id: Uuid,
        bundle: RecommendationBundle,
        updated_at: DateTime<Utc>,
    ) -> RecommendationCache {
        let row = RecommendationCache {
            id: Uuid::new_v4(),
            user_id,
            suggestions: Json(bundle.suggestions),
            action_plan: Json(bundle.action_plan),
            weekly_summary: bundle.weekly_summary,
            resource_summary: bundle.resource_summary,
            created_at: updated_at,
            updated_at,
        };
        self.caches.lock().unwrap().insert(user_id, row.clone());
        row
    }

    pub fn cached(&self, user_id: Uuid) -> Option<RecommendationCache> {
        self.caches.lock().unwrap().get(&user_id).cloned()
    }

    /// Every row the user owns, newest first, without the loader's caps.
    pub fn snapshot(&self, user_id: Uuid) -> UserInsights {
        UserInsights {
            check_ins: newest_first(
                &self.check_ins.lock().unwrap(),
                user_id,
                |r| r.user_id,
                |r| r.date,
                None,
            ),
            journal_entries: newest_first(
                &self.journal_entries.lock().unwrap(),
                user_id,
                |r| r.user_id,
                |r| r.date,
                None,
            ),
            chat_messages: newest_first(
                &self.chat_messages.lock().unwrap(),
                user_id,
                |r| r.user_id,
                |r| r.timestamp,
                None,
            ),
        }
    }

    fn check_reads(&self) -> anyhow::Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            anyhow::bail!("store unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl ActivityStore for MemoryStore {
    async fn check_ins(&self, user_id: Uuid, limit: Option<i64>) -> anyhow::Result<Vec<CheckIn>> {
        self.check_reads()?;
        let rows = self.check_ins.lock().unwrap();
        Ok(newest_first(&rows, user_id, |r| r.user_id, |r| r.date, limit))
    }

    async fn journal_entries(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> anyhow::Result<Vec<JournalEntry>> {
        self.check_reads()?;
        let rows = self.journal_entries.lock().unwrap();
        Ok(newest_first(&rows, user_id, |r| r.user_id, |r| r.date, limit))
    }

    async fn chat_messages(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> anyhow::Result<Vec<ChatMessage>> {
        self.check_reads()?;
        let rows = self.chat_messages.lock().unwrap();
        Ok(newest_first(&rows, user_id, |r| r.user_id, |r| r.timestamp, limit))
    }
}

#[async_trait]
impl RecommendationStore for MemoryStore {
    async fn find(&self, user_id: Uuid) -> anyhow::Result<Option<RecommendationCache>> {
        self.check_reads()?;
        Ok(self.cached(user_id))
    }

    async fn upsert(
        &self,
        user_id: Uuid,
        bundle: &RecommendationBundle,
    ) -> anyhow::Result<RecommendationCache> {
        if self.fail_upserts.load(Ordering::SeqCst) {
            anyhow::bail!("write rejected");
        }
        self.upserts.fetch_add(1, Ordering::SeqCst);

        let now = Utc::now();
        let mut caches = self.caches.lock().unwrap();
        let row = caches.entry(user_id).or_insert_with(|| RecommendationCache {
            id: Uuid::new_v4(),
            user_id,
            suggestions: Json(Default::default()),
            action_plan: Json(vec![]),
            weekly_summary: String::new(),
            resource_summary: String::new(),
            created_at: now,
            updated_at: now,
        });
        row.suggestions = Json(bundle.suggestions.clone());
        row.action_plan = Json(bundle.action_plan.clone());
        row.weekly_summary = bundle.weekly_summary.clone();
        row.resource_summary = bundle.resource_summary.clone();
        row.updated_at = now;
        Ok(row.clone())
    }
}

pub enum StubReply {
    Respond(Value),
    Null,
    Fail,
}

/// Scripted recommendation generator that counts its calls.
pub struct StubGenerator {
    reply: StubReply,
    pub calls: AtomicUsize,
    pub last_payload: Mutex<Option<AiPayload>>,
}

impl StubGenerator {
    pub fn new(reply: StubReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_payload: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecommendationGenerator for StubGenerator {
    async fn generate(&self, payload: &AiPayload) -> anyhow::Result<Option<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_payload.lock().unwrap() = Some(payload.clone());
        match &self.reply {
            StubReply::Respond(v) => Ok(Some(v.clone())),
            StubReply::Null => Ok(None),
            StubReply::Fail => anyhow::bail!("mind backend timed out"),
        }
    }
}
