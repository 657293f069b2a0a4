use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: ChatRole,
    pub content: String,
    pub sentiment: Option<Json<MessageSentiment>>,
    pub sources: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq)]
#[sqlx(type_name = "chat_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageSentiment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentLevel>,
    #[serde(default)]
    pub emotions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLevel {
    #[serde(rename = "very negative")]
    VeryNegative,
    Negative,
    Neutral,
    Positive,
    #[serde(rename = "very positive")]
    VeryPositive,
}

#[derive(Debug, Deserialize)]
pub struct UserMessageRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessageRequest {
    pub content: String,
    pub sentiment: Option<MessageSentiment>,
    #[serde(default)]
    pub sources: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_uses_spaced_labels() {
        let s: MessageSentiment =
            serde_json::from_str(r#"{"sentiment":"very negative","emotions":["sad"]}"#).unwrap();
        assert_eq!(s.sentiment, Some(SentimentLevel::VeryNegative));
        assert_eq!(s.emotions, vec!["sad".to_string()]);
    }
}
