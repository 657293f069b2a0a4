use axum::{
    extract::{Path, State},
    Extension, Json,
};
use axum_extra::extract::WithRejection;
use sqlx::types::Json as SqlJson;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::dto::{ApiResponse, Created, Deleted};
use crate::error::{AppError, AppResult};
use crate::models::check_in::{CheckIn, CreateCheckInRequest, UpdateCheckInRequest};
use crate::AppState;

pub async fn list_check_ins(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<ApiResponse<Vec<CheckIn>>>> {
    let rows = state.activity.check_ins(auth_user.id, None).await?;
    Ok(ApiResponse::ok(rows))
}

pub async fn get_check_in(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CheckIn>>> {
    let row = sqlx::query_as::<_, CheckIn>(
        "SELECT * FROM check_ins WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(auth_user.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Check-in not found".into()))?;

    Ok(ApiResponse::ok(row))
}

pub async fn create_check_in(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    WithRejection(Json(body), _): WithRejection<Json<CreateCheckInRequest>, AppError>,
) -> AppResult<Created<CheckIn>> {
    body.validate()?;

    let row = sqlx::query_as::<_, CheckIn>(
        r#"
        INSERT INTO check_ins (id, user_id, date, mood, notes, metrics)
        VALUES ($1, $2, NOW(), $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(body.mood.label())
    .bind(body.notes.as_deref().unwrap_or_default())
    .bind(SqlJson(body.metrics.unwrap_or_default()))
    .fetch_one(&state.db)
    .await?;

    tracing::debug!(user_id = %auth_user.id, check_in_id = %row.id, "Check-in created");
    Ok(ApiResponse::created(row))
}

pub async fn update_check_in(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateCheckInRequest>, AppError>,
) -> AppResult<Json<ApiResponse<CheckIn>>> {
    body.validate()?;

    let row = sqlx::query_as::<_, CheckIn>(
        r#"
        UPDATE check_ins SET
            mood = COALESCE($3, mood),
            notes = COALESCE($4, notes),
            metrics = COALESCE($5, metrics)
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(auth_user.id)
    .bind(body.mood.map(|m| m.label()))
    .bind(body.notes)
    .bind(body.metrics.map(SqlJson))
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Check-in not found".into()))?;

    Ok(ApiResponse::ok(row))
}

pub async fn delete_check_in(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let result = sqlx::query("DELETE FROM check_ins WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Check-in not found".into()));
    }

    Ok(ApiResponse::ok(Deleted { deleted: true, id }))
}
