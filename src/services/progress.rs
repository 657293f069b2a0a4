//! Weekly/monthly mood series, journaling streak and achievement badges.
//!
//! Days are server-local calendar days: a timestamp belongs to the day its
//! `chrono::Local` conversion falls on, and "N days ago" means local midnight
//! N days before today.

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use serde::Serialize;

use crate::models::check_in::CheckIn;
use crate::models::journal_entry::JournalEntry;
use crate::models::mood::Mood;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyMoodPoint {
    pub day: String,
    pub mood: Option<i32>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyMoodPoint {
    pub date: String,
    pub mood: Option<i32>,
    pub full_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    pub journaling_streak: u32,
    pub entries_this_week: usize,
    pub total_check_ins: usize,
    pub total_journal_entries: usize,
    pub average_mood: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub weekly_mood_data: Vec<WeeklyMoodPoint>,
    pub monthly_mood_data: Vec<MonthlyMoodPoint>,
    pub stats: ProgressStats,
    pub achievements: Vec<String>,
}

pub fn local_day(ts: DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&Local).date_naive()
}

fn daily_average(check_ins: &[CheckIn], day: NaiveDate) -> Option<i32> {
    let values: Vec<i32> = check_ins
        .iter()
        .filter(|c| local_day(c.date) == day)
        .map(|c| Mood::chart_value(&c.mood))
        .collect();
    if values.is_empty() {
        return None;
    }
    let mean = values.iter().sum::<i32>() as f64 / values.len() as f64;
    Some(mean.round() as i32)
}

/// Last `days` calendar days ending today, oldest first.
fn window(today: NaiveDate, days: i64) -> impl Iterator<Item = NaiveDate> {
    (0..days).rev().map(move |offset| today - Duration::days(offset))
}

pub fn weekly_series(check_ins: &[CheckIn], today: NaiveDate) -> Vec<WeeklyMoodPoint> {
    window(today, 7)
        .map(|day| WeeklyMoodPoint {
            day: day.format("%a").to_string(),
            mood: daily_average(check_ins, day),
            date: day,
        })
        .collect()
}

pub fn monthly_series(check_ins: &[CheckIn], today: NaiveDate) -> Vec<MonthlyMoodPoint> {
    window(today, 30)
        .map(|day| MonthlyMoodPoint {
            date: day.format("%b %-d").to_string(),
            mood: daily_average(check_ins, day),
            full_date: day,
        })
        .collect()
}

/// Consecutive days with at least one entry, counting back from today.
/// Missing today means a streak of zero.
pub fn journaling_streak(entries: &[JournalEntry], today: NaiveDate) -> u32 {
    let mut days: Vec<NaiveDate> = entries.iter().map(|e| local_day(e.date)).collect();
    days.sort_unstable_by(|a, b| b.cmp(a));

    let mut streak = 0u32;
    for day in days {
        let offset = (today - day).num_days();
        if offset == i64::from(streak) {
            streak += 1;
        } else if offset > i64::from(streak) {
            break;
        }
    }
    streak
}

pub fn achievements(streak: u32, entries_this_week: usize, total_check_ins: usize) -> Vec<String> {
    let rules: [(bool, &str); 5] = [
        (streak >= 7, "🌟 1 week journaling streak!"),
        (streak >= 14, "🔥 2 week journaling streak!"),
        (streak >= 30, "💎 1 month journaling streak!"),
        (entries_this_week >= 7, "📝 Daily journaling this week!"),
        (total_check_ins >= 30, "🎯 30 check-ins milestone!"),
    ];

    let earned: Vec<String> = rules
        .iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, badge)| badge.to_string())
        .collect();

    if earned.is_empty() {
        vec!["Keep going! 💪".to_string()]
    } else {
        earned
    }
}

/// `check_ins` and `journal_entries` are the user's full history.
pub fn build_report(
    check_ins: &[CheckIn],
    journal_entries: &[JournalEntry],
    today: NaiveDate,
) -> ProgressReport {
    let month_start = today - Duration::days(30);
    let week_start = today - Duration::days(7);

    let recent: Vec<CheckIn> = check_ins
        .iter()
        .filter(|c| local_day(c.date) >= month_start)
        .cloned()
        .collect();

    let entries_this_week = journal_entries
        .iter()
        .filter(|e| local_day(e.date) >= week_start)
        .count();

    let week_values: Vec<i32> = recent
        .iter()
        .filter(|c| local_day(c.date) >= week_start)
        .map(|c| Mood::chart_value(&c.mood))
        .collect();
    let average_mood = (!week_values.is_empty()).then(|| {
        let mean = week_values.iter().sum::<i32>() as f64 / week_values.len() as f64;
        (mean * 10.0).round() / 10.0
    });

    let streak = journaling_streak(journal_entries, today);

    ProgressReport {
        weekly_mood_data: weekly_series(&recent, today),
        monthly_mood_data: monthly_series(&recent, today),
        stats: ProgressStats {
            journaling_streak: streak,
            entries_this_week,
            total_check_ins: check_ins.len(),
            total_journal_entries: journal_entries.len(),
            average_mood,
        },
        achievements: achievements(streak, entries_this_week, check_ins.len()),
    }
}
