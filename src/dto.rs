//! Response envelopes shared by every handler.
//!
//! Success bodies are `{success: true, data}`; list endpoints that report a
//! count use `{success: true, count, data}`. Errors are rendered by
//! `AppError` as `{success: false, message, error}`.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }

    pub fn created(data: T) -> (StatusCode, Json<Self>) {
        (StatusCode::CREATED, Self::ok(data))
    }
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T: Serialize> ListResponse<T> {
    pub fn ok(data: Vec<T>) -> Json<Self> {
        Json(Self {
            success: true,
            count: data.len(),
            data,
        })
    }
}

/// Body of a successful delete.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub deleted: bool,
    pub id: Uuid,
}

/// Body of a bulk delete.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cleared {
    pub deleted_count: u64,
}

pub type Created<T> = (StatusCode, Json<ApiResponse<T>>);
