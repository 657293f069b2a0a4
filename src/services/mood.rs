//! Mood percentages, chart timeline and recent entries for the dashboard.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::check_in::CheckIn;
use crate::models::mood::Mood;

const TIMELINE_LEN: usize = 10;
const RECENT_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodBucket {
    Positive,
    Neutral,
    Challenging,
}

/// Which moods count as positive or neutral; anything else is challenging.
#[derive(Debug, Clone)]
pub struct MoodBuckets {
    pub positive: Vec<Mood>,
    pub neutral: Vec<Mood>,
}

impl Default for MoodBuckets {
    fn default() -> Self {
        Self {
            positive: vec![Mood::VeryHappy, Mood::Happy],
            neutral: vec![Mood::Neutral],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MoodPercentages {
    pub positive: u32,
    pub neutral: u32,
    pub challenging: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    pub date_label: String,
    pub mood: String,
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentMood {
    pub id: Uuid,
    pub mood: String,
    pub notes: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodSummary {
    pub percentages: MoodPercentages,
    pub timeline: Vec<TimelinePoint>,
    pub recent_moods: Vec<RecentMood>,
}

#[derive(Debug, Clone, Default)]
pub struct MoodAggregator {
    buckets: MoodBuckets,
}

impl MoodAggregator {
    pub fn new(buckets: MoodBuckets) -> Self {
        Self { buckets }
    }

    pub fn bucket(&self, label: &str) -> MoodBucket {
        match Mood::from_label(label) {
            Some(m) if self.buckets.positive.contains(&m) => MoodBucket::Positive,
            Some(m) if self.buckets.neutral.contains(&m) => MoodBucket::Neutral,
            _ => MoodBucket::Challenging,
        }
    }

    /// All zeros for an empty slice.
    pub fn segment(&self, check_ins: &[CheckIn]) -> MoodPercentages {
        if check_ins.is_empty() {
            return MoodPercentages::default();
        }

        let (mut positive, mut neutral, mut challenging) = (0usize, 0usize, 0usize);
        for c in check_ins {
            match self.bucket(&c.mood) {
                MoodBucket::Positive => positive += 1,
                MoodBucket::Neutral => neutral += 1,
                MoodBucket::Challenging => challenging += 1,
            }
        }

        let total = check_ins.len() as f64;
        let pct = |n: usize| ((n as f64 / total) * 100.0).round() as u32;
        MoodPercentages {
            positive: pct(positive),
            neutral: pct(neutral),
            challenging: pct(challenging),
        }
    }

    /// Oldest-to-newest, at most the last ten check-ins.
    pub fn timeline(&self, check_ins: &[CheckIn]) -> Vec<TimelinePoint> {
        let mut sorted: Vec<&CheckIn> = check_ins.iter().collect();
        sorted.sort_by_key(|c| c.date);
        let skip = sorted.len().saturating_sub(TIMELINE_LEN);

        sorted
            .into_iter()
            .skip(skip)
            .map(|c| TimelinePoint {
                date_label: c.date.with_timezone(&Local).format("%b %-d").to_string(),
                mood: c.mood.clone(),
                value: self.chart_value(&c.mood),
            })
            .collect()
    }

    /// First five as given; callers pass check-ins newest first.
    pub fn recent_moods(&self, check_ins: &[CheckIn]) -> Vec<RecentMood> {
        check_ins
            .iter()
            .take(RECENT_LEN)
            .map(|c| RecentMood {
                id: c.id,
                mood: c.mood.clone(),
                notes: c.notes.clone(),
                date: c.date,
            })
            .collect()
    }

    pub fn summarize(&self, check_ins: &[CheckIn]) -> MoodSummary {
        MoodSummary {
            percentages: self.segment(check_ins),
            timeline: self.timeline(check_ins),
            recent_moods: self.recent_moods(check_ins),
        }
    }

    // Unrecognized labels chart at the neutral height rather than challenging.
    fn chart_value(&self, label: &str) -> u8 {
        if Mood::from_label(label).is_none() {
            return 3;
        }
        match self.bucket(label) {
            MoodBucket::Positive => 4,
            MoodBucket::Neutral => 3,
            MoodBucket::Challenging => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::memory::MemoryStore;
    use chrono::Duration;

    fn check_ins(moods: &[&str]) -> Vec<CheckIn> {
        let store = MemoryStore::default();
        let user = Uuid::new_v4();
        let now = Utc::now();
        for (i, mood) in moods.iter().enumerate() {
            store.add_check_in(user, mood, now - Duration::hours(i as i64));
        }
        store.snapshot(user).check_ins
    }

    #[test]
    fn empty_segments_are_zero() {
        let agg = MoodAggregator::default();
        assert_eq!(agg.segment(&[]), MoodPercentages::default());
    }

    #[test]
    fn four_check_in_split() {
        let agg = MoodAggregator::default();
        let pct = agg.segment(&check_ins(&["Very Happy", "Happy", "Neutral", "Sad"]));
        assert_eq!(
            pct,
            MoodPercentages {
                positive: 50,
                neutral: 25,
                challenging: 25
            }
        );
    }

    #[test]
    fn percentages_sum_to_about_100() {
        let agg = MoodAggregator::default();
        let moods = ["Very Happy", "Happy", "Neutral", "Sad", "Depressed", "Neutral", "Happy"];
        for n in 1..=moods.len() {
            let pct = agg.segment(&check_ins(&moods[..n]));
            let sum = pct.positive + pct.neutral + pct.challenging;
            assert!((99..=101).contains(&sum), "n={n} sum={sum}");
        }
    }

    #[test]
    fn unknown_mood_is_challenging_but_charts_neutral() {
        let agg = MoodAggregator::default();
        let rows = check_ins(&["Ecstatic"]);
        assert_eq!(agg.segment(&rows).challenging, 100);
        assert_eq!(agg.timeline(&rows)[0].value, 3);
    }

    #[test]
    fn timeline_is_capped_and_ascending() {
        let agg = MoodAggregator::default();
        let rows = check_ins(&["Happy"; 14]);
        let timeline = agg.timeline(&rows);
        assert_eq!(timeline.len(), 10);

        // The ten newest, oldest first: rows[9] .. rows[0].
        let mut expected: Vec<_> = rows[..10].iter().map(|c| c.date).collect();
        expected.reverse();
        let labels: Vec<_> = expected
            .iter()
            .map(|d| d.with_timezone(&Local).format("%b %-d").to_string())
            .collect();
        let got: Vec<_> = timeline.iter().map(|t| t.date_label.clone()).collect();
        assert_eq!(got, labels);
    }

    #[test]
    fn timeline_values_follow_buckets() {
        let agg = MoodAggregator::default();
        let timeline = agg.timeline(&check_ins(&["Depressed", "Neutral", "Very Happy"]));
        let values: Vec<u8> = timeline.iter().map(|t| t.value).collect();
        // Ascending by date: the last listed was created earliest.
        assert_eq!(values, vec![4, 3, 2]);
    }

    #[test]
    fn recent_moods_keep_input_order() {
        let agg = MoodAggregator::default();
        let rows = check_ins(&["Sad", "Happy", "Neutral", "Sad", "Happy", "Depressed"]);
        let recent = agg.recent_moods(&rows);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].id, rows[0].id);
        assert_eq!(recent[4].mood, "Happy");
    }

    #[test]
    fn custom_buckets_change_classification() {
        let agg = MoodAggregator::new(MoodBuckets {
            positive: vec![Mood::VeryHappy],
            neutral: vec![Mood::Happy, Mood::Neutral],
        });
        let pct = agg.segment(&check_ins(&["Happy", "Very Happy"]));
        assert_eq!(pct.positive, 50);
        assert_eq!(pct.neutral, 50);
    }
}
