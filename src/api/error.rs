//! Mapping of booking failures onto HTTP responses.
//!
//! Each failure kind gets its own status code so clients can tell a bad
//! request from a closed window from a taken room.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tokio::task::JoinError;

use crate::booking::{BookingError, ValidationErrors};

/// Error type returned by every handler.
#[derive(Debug)]
pub enum ApiError {
    Booking(BookingError),
    /// The blocking task running the store work panicked or was cancelled.
    Task(JoinError),
}

impl From<BookingError> for ApiError {
    fn from(e: BookingError) -> Self {
        Self::Booking(e)
    }
}

impl From<JoinError> for ApiError {
    fn from(e: JoinError) -> Self {
        Self::Task(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Booking(ValidationErrors::single("body", rejection.body_text()).into())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Booking(ValidationErrors::single("query", rejection.body_text()).into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let e = match self {
            Self::Booking(e) => e,
            Self::Task(e) => {
                tracing::error!("Handler task failed: {}", e);
                return internal_error();
            }
        };
        match e {
            BookingError::Validation(errors) => {
                tracing::warn!("Validation error: {}", errors);
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": errors.to_string(), "errors": errors })),
                )
                    .into_response()
            }
            e @ BookingError::OutsideWindow { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, error_body(&e)).into_response()
            }
            e @ BookingError::Conflict { .. } => {
                (StatusCode::CONFLICT, error_body(&e)).into_response()
            }
            BookingError::TransientStore(e) => {
                tracing::error!("Store unavailable: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({ "error": "Service temporarily unavailable, please retry." })),
                )
                    .into_response()
            }
            BookingError::Store(e) => {
                tracing::error!("Internal error: {}", e);
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}

fn error_body(e: &BookingError) -> Json<serde_json::Value> {
    Json(json!({ "error": e.to_string() }))
}
