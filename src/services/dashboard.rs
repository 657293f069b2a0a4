use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::models::recommendation::{
    ActionStep, SuggestionBundle, SuggestionItem, DEFAULT_WEEKLY_SUMMARY,
};
use crate::services::insights::load_user_insights;
use crate::services::mood::{MoodAggregator, MoodSummary};
use crate::services::recommendations::RecommendationCacheManager;
use crate::services::store::ActivityStore;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardUser {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub user: DashboardUser,
    pub mood_summary: MoodSummary,
    pub weekly_summary: String,
    pub action_plan: Vec<ActionStep>,
    pub suggestions: SuggestionBundle,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceRecommendations {
    pub resources: Vec<SuggestionItem>,
    pub summary: String,
}

/// Builds the dashboard payloads from activity, mood aggregation and the
/// recommendation cache.
pub struct DashboardComposer {
    activity: Arc<dyn ActivityStore>,
    mood: MoodAggregator,
    recommendations: RecommendationCacheManager,
}

impl DashboardComposer {
    pub fn new(
        activity: Arc<dyn ActivityStore>,
        mood: MoodAggregator,
        recommendations: RecommendationCacheManager,
    ) -> Self {
        Self {
            activity,
            mood,
            recommendations,
        }
    }

    pub async fn overview(&self, user_id: Uuid, name: &str) -> anyhow::Result<DashboardOverview> {
        let insights = load_user_insights(self.activity.as_ref(), user_id).await?;
        let mood_summary = self.mood.summarize(&insights.check_ins);
        let outcome = self.recommendations.get_for_user(user_id, &insights).await?;

        tracing::debug!(user_id = %user_id, source = %outcome.source, "Dashboard recommendations resolved");

        let bundle = outcome.bundle;
        let weekly_summary = if bundle.weekly_summary.is_empty() {
            DEFAULT_WEEKLY_SUMMARY.to_string()
        } else {
            bundle.weekly_summary
        };

        Ok(DashboardOverview {
            user: DashboardUser {
                name: name.to_string(),
            },
            mood_summary,
            weekly_summary,
            action_plan: bundle.action_plan,
            suggestions: bundle.suggestions,
        })
    }

    pub async fn resources(&self, user_id: Uuid) -> anyhow::Result<ResourceRecommendations> {
        let insights = load_user_insights(self.activity.as_ref(), user_id).await?;
        let outcome = self.recommendations.get_for_user(user_id, &insights).await?;

        tracing::debug!(user_id = %user_id, source = %outcome.source, "Resource recommendations resolved");

        let bundle = outcome.bundle;
        let summary = if !bundle.resource_summary.is_empty() {
            bundle.resource_summary
        } else {
            bundle.weekly_summary
        };

        Ok(ResourceRecommendations {
            resources: bundle.suggestions.resources,
            summary,
        })
    }
}
