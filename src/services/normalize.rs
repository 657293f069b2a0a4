//! Turns a raw mind-backend response into a typed `RecommendationBundle`.
//!
//! Every field has a defined default; the backend may use camelCase or
//! snake_case keys, and empty strings count as missing.

use serde_json::{Map, Value};

use crate::models::recommendation::{
    ActionStep, RecommendationBundle, SuggestionBundle, SuggestionItem, DEFAULT_WEEKLY_SUMMARY,
};

pub fn normalize_recommendation(raw: &Value) -> RecommendationBundle {
    let weekly = first_text(raw, &["weekly_summary", "weeklySummary"]);
    let resource = first_text(raw, &["resource_summary", "resourceSummary"]);

    RecommendationBundle {
        suggestions: normalize_suggestions(raw.get("suggestions").unwrap_or(&Value::Null)),
        action_plan: normalize_action_plan(first_present(raw, &["action_plan", "actionPlan"])),
        resource_summary: resource.or_else(|| weekly.clone()).unwrap_or_default(),
        weekly_summary: weekly.unwrap_or_else(|| DEFAULT_WEEKLY_SUMMARY.to_string()),
    }
}

pub fn normalize_suggestions(raw: &Value) -> SuggestionBundle {
    SuggestionBundle {
        exercises: normalize_items(first_list(raw, &["exercises"])),
        breathing: normalize_items(first_list(raw, &["breathing"])),
        mood_tips: normalize_items(first_list(raw, &["moodTips", "mood_tips"])),
        stress_relief: normalize_items(first_list(raw, &["stressRelief", "stress_relief"])),
        resources: normalize_items(first_list(raw, &["resources"])),
    }
}

fn normalize_items(list: &[Value]) -> Vec<SuggestionItem> {
    let empty = Map::new();
    list.iter()
        .filter(|v| is_truthy(v))
        .enumerate()
        .map(|(idx, v)| {
            let item = v.as_object().unwrap_or(&empty);
            let title = text(item, &["title"]);
            SuggestionItem {
                id: identifier(item.get("id")).unwrap_or_else(|| {
                    format!("{}-{}", title.as_deref().unwrap_or("item"), idx)
                }),
                title: title
                    .or_else(|| text(item, &["name"]))
                    .unwrap_or_else(|| "Suggestion".to_string()),
                description: text(item, &["description", "detail"]).unwrap_or_default(),
                duration: text(item, &["duration"]).unwrap_or_default(),
                kind: text(item, &["type", "category"]).unwrap_or_default(),
                url: text(item, &["url"]).unwrap_or_default(),
                tags: tags(item.get("tags")),
                mood_match: text(item, &["moodMatch", "mood_match"]).unwrap_or_default(),
            }
        })
        .collect()
}

fn normalize_action_plan(raw: Option<&Value>) -> Vec<ActionStep> {
    let empty = Map::new();
    raw.and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .filter(|v| is_truthy(v))
        .map(|v| {
            let step = v.as_object().unwrap_or(&empty);
            ActionStep {
                title: text(step, &["title"]).unwrap_or_default(),
                detail: text(step, &["detail", "description"]).unwrap_or_default(),
                time_of_day: text(step, &["timeOfDay", "time_of_day"]).unwrap_or_default(),
            }
        })
        .collect()
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn first_present<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|k| raw.get(*k)).find(|v| !v.is_null())
}

fn first_list<'a>(raw: &'a Value, keys: &[&str]) -> &'a [Value] {
    keys.iter()
        .filter_map(|k| raw.get(*k).and_then(Value::as_array))
        .map(Vec::as_slice)
        .next()
        .unwrap_or_default()
}

fn first_text(raw: &Value, keys: &[&str]) -> Option<String> {
    raw.as_object().and_then(|obj| text(obj, keys))
}

fn text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn identifier(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn tags(v: Option<&Value>) -> Vec<String> {
    match v {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
        _ => vec![],
    }
}
