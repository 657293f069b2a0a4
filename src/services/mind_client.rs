//! Client for the mind backend's recommendation endpoint.
//!
//! Any transport error, timeout or non-2xx status is reported as `Ok(None)`
//! so callers only ever see "a recommendation" or "nothing".

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::models::chat_message::{ChatRole, SentimentLevel};
use crate::services::insights::UserInsights;

const CHAT_TURNS: usize = 10;
const JOURNAL_ENTRIES: usize = 5;
const CHECK_INS: usize = 7;

#[async_trait]
pub trait RecommendationGenerator: Send + Sync {
    /// Raw response body, or `None` when the service had nothing usable.
    async fn generate(&self, payload: &AiPayload) -> anyhow::Result<Option<Value>>;
}

/// Compact view of recent activity sent to the mind backend.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AiPayload {
    pub chat_history: Vec<ChatTurn>,
    pub journal_entries: Vec<JournalDigest>,
    pub check_ins: Vec<CheckInDigest>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
    pub sentiment: Option<SentimentLevel>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct JournalDigest {
    pub mood: String,
    pub text: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckInDigest {
    pub mood: String,
    pub notes: String,
    pub date: DateTime<Utc>,
}

impl AiPayload {
    pub fn from_insights(insights: &UserInsights) -> Self {
        Self {
            chat_history: insights
                .chat_messages
                .iter()
                .take(CHAT_TURNS)
                .map(|m| ChatTurn {
                    role: m.role,
                    content: m.content.clone(),
                    sentiment: m.sentiment.as_ref().and_then(|s| s.sentiment),
                    timestamp: m.timestamp,
                })
                .collect(),
            journal_entries: insights
                .journal_entries
                .iter()
                .take(JOURNAL_ENTRIES)
                .map(|j| JournalDigest {
                    mood: j.mood.clone(),
                    text: j.text.clone(),
                    date: j.date,
                })
                .collect(),
            check_ins: insights
                .check_ins
                .iter()
                .take(CHECK_INS)
                .map(|c| CheckInDigest {
                    mood: c.mood.clone(),
                    notes: c.notes.clone(),
                    date: c.date,
                })
                .collect(),
        }
    }
}

pub struct MindClient {
    client: reqwest::Client,
    endpoint: String,
}

impl MindClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/api/recommendations", base_url.trim_end_matches('/')),
        })
    }

    async fn request(&self, payload: &AiPayload) -> anyhow::Result<Option<Value>> {
        let response = self.client.post(&self.endpoint).json(payload).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body, "Mind backend rejected recommendation request");
            return Ok(None);
        }

        let body: Value = response.json().await?;
        Ok(if body.is_null() { None } else { Some(body) })
    }
}

#[async_trait]
impl RecommendationGenerator for MindClient {
    async fn generate(&self, payload: &AiPayload) -> anyhow::Result<Option<Value>> {
        match self.request(payload).await {
            Ok(body) => Ok(body),
            Err(e) => {
                tracing::warn!(error = %e, "Mind backend recommendation error");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::memory::MemoryStore;
    use chrono::Duration as ChronoDuration;
    use serde_json::json;
    use uuid::Uuid;

    fn empty_payload() -> AiPayload {
        AiPayload::from_insights(&UserInsights::default())
    }

    #[tokio::test]
    async fn returns_body_on_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/recommendations")
            .match_body(mockito::Matcher::PartialJson(json!({ "chat_history": [] })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"weekly_summary":"Nice week","suggestions":{}}"#)
            .create_async()
            .await;

        let client = MindClient::new(&server.url(), Duration::from_secs(5)).unwrap();
        let body = client.generate(&empty_payload()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(body.unwrap()["weekly_summary"], "Nice week");
    }

    #[tokio::test]
    async fn non_2xx_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/recommendations")
            .with_status(503)
            .with_body("overloaded")
            .create_async()
            .await;

        let client = MindClient::new(&server.url(), Duration::from_secs(5)).unwrap();
        assert!(client.generate(&empty_payload()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unreachable_service_is_none() {
        // Port 9 (discard) is not listening in test environments.
        let client = MindClient::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        assert!(client.generate(&empty_payload()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn null_body_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/recommendations")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("null")
            .create_async()
            .await;

        let client = MindClient::new(&format!("{}/", server.url()), Duration::from_secs(5)).unwrap();
        assert!(client.generate(&empty_payload()).await.unwrap().is_none());
    }

    #[test]
    fn payload_takes_most_recent_slices() {
        let store = MemoryStore::default();
        let user = Uuid::new_v4();
        let now = Utc::now();
        for i in 0..12 {
            let at = now - ChronoDuration::hours(i);
            store.add_check_in(user, "Neutral", at);
            store.add_journal_entry(user, "Sad", at);
            store.add_chat_message(user, ChatRole::User, &format!("msg {i}"), at);
        }

        let payload = AiPayload::from_insights(&store.snapshot(user));

        assert_eq!(payload.chat_history.len(), 10);
        assert_eq!(payload.journal_entries.len(), 5);
        assert_eq!(payload.check_ins.len(), 7);
        assert_eq!(payload.chat_history[0].content, "msg 0");

        let wire = serde_json::to_value(&payload).unwrap();
        assert_eq!(wire["chat_history"][0]["role"], "user");
        assert!(wire["chat_history"][0]["sentiment"].is_null());
    }
}
