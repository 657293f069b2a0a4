use axum::{
    extract::{Path, State},
    Extension, Json,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::dto::{ApiResponse, Created, Deleted, ListResponse};
use crate::error::{AppError, AppResult};
use crate::models::journal_entry::{
    CreateJournalEntryRequest, JournalEntry, UpdateJournalEntryRequest,
};
use crate::AppState;

fn require_text(text: &str) -> AppResult<()> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("Journal text is required".into()));
    }
    Ok(())
}

pub async fn list_entries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<ListResponse<JournalEntry>>> {
    let rows = state.activity.journal_entries(auth_user.id, None).await?;
    Ok(ListResponse::ok(rows))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    WithRejection(Json(body), _): WithRejection<Json<CreateJournalEntryRequest>, AppError>,
) -> AppResult<Created<JournalEntry>> {
    require_text(&body.text)?;
    body.validate()?;

    let entry = sqlx::query_as::<_, JournalEntry>(
        r#"
        INSERT INTO journal_entries (id, user_id, date, mood, text)
        VALUES ($1, $2, NOW(), $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(body.mood.label())
    .bind(&body.text)
    .fetch_one(&state.db)
    .await?;

    Ok(ApiResponse::created(entry))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateJournalEntryRequest>, AppError>,
) -> AppResult<Json<ApiResponse<JournalEntry>>> {
    if let Some(text) = &body.text {
        require_text(text)?;
    }
    body.validate()?;

    let entry = sqlx::query_as::<_, JournalEntry>(
        r#"
        UPDATE journal_entries SET
            mood = COALESCE($3, mood),
            text = COALESCE($4, text)
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(auth_user.id)
    .bind(body.mood.map(|m| m.label()))
    .bind(body.text)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Journal entry not found".into()))?;

    Ok(ApiResponse::ok(entry))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let result = sqlx::query("DELETE FROM journal_entries WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Journal entry not found".into()));
    }

    Ok(ApiResponse::ok(Deleted { deleted: true, id }))
}
