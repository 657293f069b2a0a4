use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_WEEKLY_SUMMARY: &str =
    "Keep leaning into the small habits that help you reset throughout the day.";

/// One row per user (unique `user_id`), refreshed in place by upsert.
#[derive(Debug, Clone, FromRow)]
pub struct RecommendationCache {
    pub id: Uuid,
    pub user_id: Uuid,
    pub suggestions: Json<SuggestionBundle>,
    pub action_plan: Json<Vec<ActionStep>>,
    pub weekly_summary: String,
    pub resource_summary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecommendationCache {
    pub fn bundle(&self) -> RecommendationBundle {
        RecommendationBundle {
            suggestions: self.suggestions.0.clone(),
            action_plan: self.action_plan.0.clone(),
            weekly_summary: self.weekly_summary.clone(),
            resource_summary: self.resource_summary.clone(),
        }
    }
}

/// The persisted part of a recommendation: what the mind backend produced
/// (after normalization) or the built-in fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationBundle {
    pub suggestions: SuggestionBundle,
    pub action_plan: Vec<ActionStep>,
    pub weekly_summary: String,
    pub resource_summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestionBundle {
    pub exercises: Vec<SuggestionItem>,
    pub breathing: Vec<SuggestionItem>,
    pub mood_tips: Vec<SuggestionItem>,
    pub stress_relief: Vec<SuggestionItem>,
    pub resources: Vec<SuggestionItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestionItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub tags: Vec<String>,
    pub mood_match: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionStep {
    pub title: String,
    pub detail: String,
    pub time_of_day: String,
}

/// How a bundle was obtained for a given response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationSource {
    Cache,
    Fresh,
    StaleCache,
    Fallback,
}

impl std::fmt::Display for RecommendationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RecommendationSource::Cache => "cache",
            RecommendationSource::Fresh => "fresh",
            RecommendationSource::StaleCache => "stale-cache",
            RecommendationSource::Fallback => "fallback",
        })
    }
}

#[derive(Debug, Clone)]
pub struct RecommendationOutcome {
    pub bundle: RecommendationBundle,
    pub source: RecommendationSource,
}
