use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::mood::Mood;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: DateTime<Utc>,
    pub mood: String,
    pub notes: String,
    pub metrics: Json<CheckInMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckInMetrics {
    #[serde(alias = "sleep", skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 24.0, message = "Sleep hours must be between 0 and 24"))]
    pub sleep_hours: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 10, message = "Energy must be between 1 and 10"))]
    pub energy: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 10, message = "Anxiety must be between 1 and 10"))]
    pub anxiety: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCheckInRequest {
    pub mood: Mood,
    #[validate(length(max = 5000, message = "Notes must be under 5000 characters"))]
    pub notes: Option<String>,
    #[validate]
    pub metrics: Option<CheckInMetrics>,
}

/// PUT /api/check-ins/:id, partial update
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCheckInRequest {
    pub mood: Option<Mood>,
    #[validate(length(max = 5000, message = "Notes must be under 5000 characters"))]
    pub notes: Option<String>,
    #[validate]
    pub metrics: Option<CheckInMetrics>,
}
