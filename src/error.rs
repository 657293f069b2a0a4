use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not authorized to access this route")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    /// An aggregate read failed; `message` is what the client sees.
    #[error("{message}: {source}")]
    Unavailable {
        message: &'static str,
        source: anyhow::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn unavailable(message: &'static str, source: impl Into<anyhow::Error>) -> Self {
        AppError::Unavailable {
            message,
            source: source.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, code) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string(), "unauthorized"),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), "not_found"),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone(), "validation_failed"),
            AppError::Unavailable { message, source } => {
                tracing::error!(error = %source, "{}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    (*message).to_string(),
                    "internal_error",
                )
            }
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".into(),
                    "internal_error",
                )
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".into(),
                    "internal_error",
                )
            }
        };

        let body = json!({
            "success": false,
            "message": message,
            "error": code,
        });

        (status, Json(body)).into_response()
    }
}

/// Body extraction failures share the error envelope. Serde's detail is
/// logged, not returned.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        let message = match rejection {
            JsonRejection::MissingJsonContentType(_) => "Expected a JSON request body",
            JsonRejection::JsonSyntaxError(_) => "Malformed JSON in request body",
            _ => "Invalid request body",
        };
        AppError::Validation(message.into())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
