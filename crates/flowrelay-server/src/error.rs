//! API error type with HTTP status code mapping.
//!
//! Every failure leaves the server as `{"detail": "<message>"}`. Flow engine
//! failures of any kind become a 500; the caller only sees the message.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use flowrelay_core::FlowError;

/// JSON error body.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorDetail {
    pub detail: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The flow engine call failed (500).
    #[error("LangFlow execution error: {0}")]
    Flow(#[from] FlowError),

    /// The request body could not be decoded (status chosen by axum).
    #[error("{}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Flow(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidBody(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ApiErrorDetail {
            detail: self.to_string(),
        };
        (status, axum::Json(body)).into_response()
    }
}
