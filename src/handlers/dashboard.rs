use axum::{extract::State, Extension, Json};

use crate::auth::middleware::AuthUser;
use crate::dto::ApiResponse;
use crate::error::{AppError, AppResult};
use crate::services::dashboard::{DashboardOverview, ResourceRecommendations};
use crate::AppState;

pub async fn get_overview(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<ApiResponse<DashboardOverview>>> {
    let overview = state
        .dashboard
        .overview(auth_user.id, &auth_user.name)
        .await
        .map_err(|e| AppError::unavailable("Unable to load dashboard data", e))?;

    Ok(ApiResponse::ok(overview))
}

pub async fn get_resources(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<ApiResponse<ResourceRecommendations>>> {
    let resources = state
        .dashboard
        .resources(auth_user.id)
        .await
        .map_err(|e| AppError::unavailable("Unable to load resources", e))?;

    Ok(ApiResponse::ok(resources))
}
