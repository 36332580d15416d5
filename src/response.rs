use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

pub type ApiResult<T> = Result<JsonApiResponse<T>, AppError>;

/// The `{status, message, data}` body every endpoint answers with.
#[derive(Debug, Serialize)]
pub struct JsonApiResponse<T: Serialize> {
    pub status: u16,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> JsonApiResponse<T> {
    fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            data,
        }
    }

    pub fn ok(data: T) -> ApiResult<T> {
        Ok(Self::new(StatusCode::OK, "ok", data))
    }

    pub fn created(data: T) -> ApiResult<T> {
        Ok(Self::new(StatusCode::CREATED, "created", data))
    }
}

impl JsonApiResponse<serde_json::Value> {
    /// Error envelope with `data: null`. `status` overrides the error's own
    /// status so rewritten framework responses keep their original code.
    pub(crate) fn error(err: &AppError, status: StatusCode) -> Self {
        Self::new(status, err.message(), serde_json::Value::Null)
    }
}

impl<T: Serialize> IntoResponse for JsonApiResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log_app_error(&self, status);
        }
        JsonApiResponse::error(&self, status).into_response()
    }
}

pub(crate) fn log_app_error(err: &AppError, status: StatusCode) {
    tracing::error!(status = status.as_u16(), error = %err, "request failed");
}
