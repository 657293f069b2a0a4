use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::mood::Mood;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: DateTime<Utc>,
    pub mood: String,
    pub text: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateJournalEntryRequest {
    pub mood: Mood,
    #[validate(length(min = 1, max = 20000, message = "Text must be 1-20000 characters"))]
    pub text: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateJournalEntryRequest {
    pub mood: Option<Mood>,
    #[validate(length(min = 1, max = 20000, message = "Text must be 1-20000 characters"))]
    pub text: Option<String>,
}
