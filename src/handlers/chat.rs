use axum::{extract::State, Extension, Json};
use axum_extra::extract::WithRejection;
use sqlx::types::Json as SqlJson;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::dto::{ApiResponse, Cleared, Created};
use crate::error::{AppError, AppResult};
use crate::models::chat_message::{
    AssistantMessageRequest, ChatMessage, ChatRole, MessageSentiment, UserMessageRequest,
};
use crate::AppState;

/// Full history, oldest first.
pub async fn list_messages(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<ApiResponse<Vec<ChatMessage>>>> {
    let mut rows = state.activity.chat_messages(auth_user.id, None).await?;
    rows.reverse();
    Ok(ApiResponse::ok(rows))
}

async fn insert_message(
    state: &AppState,
    user_id: Uuid,
    role: ChatRole,
    content: &str,
    sentiment: Option<MessageSentiment>,
    sources: Vec<String>,
) -> AppResult<ChatMessage> {
    if content.trim().is_empty() {
        return Err(AppError::Validation("Message content is required".into()));
    }

    let message = sqlx::query_as::<_, ChatMessage>(
        r#"
        INSERT INTO chat_messages (id, user_id, role, content, sentiment, sources, timestamp)
        VALUES ($1, $2, $3, $4, $5, $6, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(role)
    .bind(content)
    .bind(sentiment.map(SqlJson))
    .bind(sources)
    .fetch_one(&state.db)
    .await?;

    Ok(message)
}

pub async fn post_user_message(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    WithRejection(Json(body), _): WithRejection<Json<UserMessageRequest>, AppError>,
) -> AppResult<Created<ChatMessage>> {
    let message =
        insert_message(&state, auth_user.id, ChatRole::User, &body.content, None, vec![]).await?;
    Ok(ApiResponse::created(message))
}

pub async fn post_assistant_message(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    WithRejection(Json(body), _): WithRejection<Json<AssistantMessageRequest>, AppError>,
) -> AppResult<Created<ChatMessage>> {
    let message = insert_message(
        &state,
        auth_user.id,
        ChatRole::Assistant,
        &body.content,
        body.sentiment,
        body.sources,
    )
    .await?;
    Ok(ApiResponse::created(message))
}

pub async fn clear_history(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<ApiResponse<Cleared>>> {
    let result = sqlx::query("DELETE FROM chat_messages WHERE user_id = $1")
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;

    tracing::info!(user_id = %auth_user.id, deleted = result.rows_affected(), "Chat history cleared");
    Ok(ApiResponse::ok(Cleared {
        deleted_count: result.rows_affected(),
    }))
}
