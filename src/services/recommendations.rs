//! Per-user recommendation cache with graceful degradation.
//!
//! A cached bundle is served while it is younger than the TTL and no newer
//! than the user's latest activity. Otherwise the mind backend is asked for
//! a fresh one. If that fails the previous bundle is served as-is, and with
//! no previous bundle a built-in default is persisted and served.
//!
//! There is no per-user lock. Two concurrent refreshes for the same user
//! both call the backend and both upsert; the upsert is keyed by `user_id`,
//! so the later write wins.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::recommendation::{
    ActionStep, RecommendationBundle, RecommendationCache, RecommendationOutcome,
    RecommendationSource, SuggestionBundle, SuggestionItem, DEFAULT_WEEKLY_SUMMARY,
};
use crate::services::insights::UserInsights;
use crate::services::mind_client::{AiPayload, RecommendationGenerator};
use crate::services::normalize::normalize_recommendation;
use crate::services::store::RecommendationStore;

pub struct RecommendationCacheManager {
    store: Arc<dyn RecommendationStore>,
    generator: Arc<dyn RecommendationGenerator>,
    ttl: Duration,
}

impl RecommendationCacheManager {
    pub fn new(
        store: Arc<dyn RecommendationStore>,
        generator: Arc<dyn RecommendationGenerator>,
        ttl: Duration,
    ) -> Self {
        Self {
            store,
            generator,
            ttl,
        }
    }

    pub fn is_fresh(
        &self,
        cache: &RecommendationCache,
        latest_activity: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> bool {
        let within_ttl = now - cache.updated_at <= self.ttl;
        let covers_activity = latest_activity.map_or(true, |ts| cache.updated_at >= ts);
        within_ttl && covers_activity
    }

    /// Only a failing cache lookup is an error; generation failures are
    /// absorbed by the stale-cache and fallback paths.
    pub async fn get_for_user(
        &self,
        user_id: Uuid,
        insights: &UserInsights,
    ) -> anyhow::Result<RecommendationOutcome> {
        let cache = self.store.find(user_id).await?;

        if let Some(cache) = &cache {
            if self.is_fresh(cache, insights.latest_activity(), Utc::now()) {
                return Ok(RecommendationOutcome {
                    bundle: cache.bundle(),
                    source: RecommendationSource::Cache,
                });
            }
        }

        if let Some(bundle) = self.refresh(user_id, insights).await {
            return Ok(RecommendationOutcome {
                bundle,
                source: RecommendationSource::Fresh,
            });
        }

        if let Some(cache) = cache {
            tracing::warn!(user_id = %user_id, "Serving stale recommendations after refresh failure");
            return Ok(RecommendationOutcome {
                bundle: cache.bundle(),
                source: RecommendationSource::StaleCache,
            });
        }

        tracing::warn!(user_id = %user_id, "Serving fallback recommendations");
        let bundle = fallback_bundle();
        if let Err(e) = self.store.upsert(user_id, &bundle).await {
            tracing::warn!(user_id = %user_id, error = %e, "Failed to cache fallback recommendations");
        }
        Ok(RecommendationOutcome {
            bundle,
            source: RecommendationSource::Fallback,
        })
    }

    async fn refresh(&self, user_id: Uuid, insights: &UserInsights) -> Option<RecommendationBundle> {
        let payload = AiPayload::from_insights(insights);

        let raw = match self.generator.generate(&payload).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "AI recommendation generation failed");
                return None;
            }
        };

        let bundle = normalize_recommendation(&raw);
        match self.store.upsert(user_id, &bundle).await {
            Ok(saved) => Some(saved.bundle()),
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Failed to persist fresh recommendations");
                None
            }
        }
    }
}

fn item(id: &str, title: &str, description: &str, duration: &str) -> SuggestionItem {
    SuggestionItem {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        duration: duration.into(),
        ..Default::default()
    }
}

fn step(title: &str, detail: &str, time_of_day: &str) -> ActionStep {
    ActionStep {
        title: title.into(),
        detail: detail.into(),
        time_of_day: time_of_day.into(),
    }
}

/// Served when the mind backend is unavailable and nothing is cached yet.
pub fn fallback_bundle() -> RecommendationBundle {
    RecommendationBundle {
        suggestions: SuggestionBundle {
            exercises: vec![item(
                "ex-1",
                "Gentle stretching",
                "Take 5 minutes to stretch your body",
                "5 min",
            )],
            breathing: vec![item(
                "br-1",
                "Deep breathing",
                "Practice 4-4-4-4 box breathing",
                "3 min",
            )],
            mood_tips: vec![item(
                "mt-1",
                "Daily gratitude",
                "Write down three things you're grateful for today",
                "",
            )],
            stress_relief: vec![item(
                "sr-1",
                "Take a break",
                "Step away from your screen for 10 minutes",
                "10 min",
            )],
            resources: vec![SuggestionItem {
                kind: "article".into(),
                tags: vec!["mindfulness".into()],
                ..item("rs-1", "Mindfulness basics", "Learn about mindfulness practice", "")
            }],
        },
        action_plan: vec![
            step("Morning check-in", "Take a moment to note how you're feeling", "morning"),
            step("Midday reset", "Practice deep breathing for 3 minutes", "afternoon"),
            step("Evening reflection", "Journal about your day", "evening"),
        ],
        weekly_summary: DEFAULT_WEEKLY_SUMMARY.into(),
        resource_summary: "Start with small wellness habits and build from there.".into(),
    }
}
