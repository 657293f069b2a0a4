//! Read/write seams over persistence, implemented by `db::store::PgStore`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::chat_message::ChatMessage;
use crate::models::check_in::CheckIn;
use crate::models::journal_entry::JournalEntry;
use crate::models::recommendation::{RecommendationBundle, RecommendationCache};

/// Recency-ordered reads over a user's check-ins, journal and chat history.
///
/// `limit = None` returns every row. Check-ins and journal entries come back
/// newest `date` first; chat messages newest `timestamp` first.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn check_ins(&self, user_id: Uuid, limit: Option<i64>) -> anyhow::Result<Vec<CheckIn>>;

    async fn journal_entries(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> anyhow::Result<Vec<JournalEntry>>;

    async fn chat_messages(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> anyhow::Result<Vec<ChatMessage>>;
}

#[async_trait]
pub trait RecommendationStore: Send + Sync {
    async fn find(&self, user_id: Uuid) -> anyhow::Result<Option<RecommendationCache>>;

    /// Insert-or-replace keyed by `user_id`; stamps `updated_at` with now.
    async fn upsert(
        &self,
        user_id: Uuid,
        bundle: &RecommendationBundle,
    ) -> anyhow::Result<RecommendationCache>;
}
