use axum::{extract::State, Extension, Json};
use chrono::Local;

use crate::auth::middleware::AuthUser;
use crate::dto::ApiResponse;
use crate::error::{AppError, AppResult};
use crate::services::progress::{build_report, ProgressReport};
use crate::AppState;

pub async fn get_progress(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<ApiResponse<ProgressReport>>> {
    let (check_ins, journal_entries) = tokio::try_join!(
        state.activity.check_ins(auth_user.id, None),
        state.activity.journal_entries(auth_user.id, None),
    )
    .map_err(|e| AppError::unavailable("Unable to load progress data", e))?;

    let report = build_report(&check_ins, &journal_entries, Local::now().date_naive());
    Ok(ApiResponse::ok(report))
}
