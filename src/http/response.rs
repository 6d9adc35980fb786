//! JSON responses produced by route handlers.
//!
//! # Responsibilities
//! - Carry a status code and a JSON body out of a handler
//! - Convert into an axum response at the transport boundary
//!
//! # Design Decisions
//! - Handlers never touch axum types; they return `ApiResponse`
//! - Status defaults to 200

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

/// Status code plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    status: StatusCode,
    body: Value,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self::with_status(StatusCode::OK, body)
    }

    pub fn not_found(body: Value) -> Self {
        Self::with_status(StatusCode::NOT_FOUND, body)
    }

    pub fn with_status(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    /// Response for a request body over the configured limit.
    pub fn payload_too_large() -> Self {
        Self::with_status(
            StatusCode::PAYLOAD_TOO_LARGE,
            json!({ "error": "Payload too large" }),
        )
    }

    /// Response for a request body that could not be read.
    pub fn invalid_body() -> Self {
        Self::with_status(
            StatusCode::BAD_REQUEST,
            json!({ "error": "Invalid request body" }),
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &Value {
        &self.body
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
