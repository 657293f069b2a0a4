use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::jwt::verify_token;
use crate::error::AppError;
use crate::AppState;

const DEFAULT_NAME: &str = "Friend";

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
}

/// `Authorization: Bearer <jwt>` first, then `x-auth-token: <jwt>`.
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(bearer) = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        return Some(bearer.trim());
    }
    headers
        .get("x-auth-token")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(req.headers()).ok_or(AppError::Unauthorized)?;
    let token_data = verify_token(token, &state.config)?;

    let auth_user = AuthUser {
        id: token_data.claims.sub,
        name: token_data
            .claims
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NAME.to_string()),
    };

    req.extensions_mut().insert(auth_user);
    Ok(next.run(req).await)
}
