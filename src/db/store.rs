use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::chat_message::ChatMessage;
use crate::models::check_in::CheckIn;
use crate::models::journal_entry::JournalEntry;
use crate::models::recommendation::{RecommendationBundle, RecommendationCache};
use crate::services::store::{ActivityStore, RecommendationStore};

/// Postgres-backed stores. `LIMIT NULL` means no limit.
#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ActivityStore for PgStore {
    async fn check_ins(&self, user_id: Uuid, limit: Option<i64>) -> anyhow::Result<Vec<CheckIn>> {
        let rows = sqlx::query_as::<_, CheckIn>(
            "SELECT * FROM check_ins WHERE user_id = $1 ORDER BY date DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn journal_entries(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> anyhow::Result<Vec<JournalEntry>> {
        let rows = sqlx::query_as::<_, JournalEntry>(
            "SELECT * FROM journal_entries WHERE user_id = $1 ORDER BY date DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn chat_messages(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> anyhow::Result<Vec<ChatMessage>> {
        let rows = sqlx::query_as::<_, ChatMessage>(
            "SELECT * FROM chat_messages WHERE user_id = $1 ORDER BY timestamp DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl RecommendationStore for PgStore {
    async fn find(&self, user_id: Uuid) -> anyhow::Result<Option<RecommendationCache>> {
        let row = sqlx::query_as::<_, RecommendationCache>(
            "SELECT * FROM recommendation_caches WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn upsert(
        &self,
        user_id: Uuid,
        bundle: &RecommendationBundle,
    ) -> anyhow::Result<RecommendationCache> {
        let row = sqlx::query_as::<_, RecommendationCache>(
            r#"
            INSERT INTO recommendation_caches
                (id, user_id, suggestions, action_plan, weekly_summary, resource_summary)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO UPDATE SET
                suggestions = EXCLUDED.suggestions,
                action_plan = EXCLUDED.action_plan,
                weekly_summary = EXCLUDED.weekly_summary,
                resource_summary = EXCLUDED.resource_summary,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(Json(&bundle.suggestions))
        .bind(Json(&bundle.action_plan))
        .bind(&bundle.weekly_summary)
        .bind(&bundle.resource_summary)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }
}
