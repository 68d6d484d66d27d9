//! Standard response envelope: `{status, message, data}`.

use crate::error::AppError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: Status,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(action: &str, data: T) -> Self {
        ApiResponse {
            status: Status::Ok,
            message: format!("success {}", action),
            data,
        }
    }
}

impl ApiResponse<serde_json::Value> {
    pub fn error(action: &str, err: &AppError) -> Self {
        ApiResponse {
            status: Status::Error,
            message: format!("failed {}", action),
            data: err.detail(),
        }
    }
}

pub fn success<T: Serialize>(status: StatusCode, action: &str, data: T) -> Response {
    (status, Json(ApiResponse::ok(action, data))).into_response()
}

pub fn failure(action: &str, err: AppError) -> Response {
    match &err {
        AppError::Bind(reason) => tracing::error!(action, %reason, "request binding failed"),
        AppError::Validation(messages) => tracing::debug!(action, ?messages, "validation failed"),
        other => tracing::warn!(action, error = %other, "request failed"),
    }
    (err.status_code(), Json(ApiResponse::error(action, &err))).into_response()
}

/// Wrap a use-case outcome: `status` on success, the error's own status otherwise.
pub fn respond<T: Serialize>(action: &str, status: StatusCode, result: Result<T, AppError>) -> Response {
    match result {
        Ok(data) => success(status, action, data),
        Err(err) => failure(action, err),
    }
}
