//! JSON error bodies shared by the API handlers.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use socdesk_core::TicketError;

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

/// Map a store error to its HTTP status.
pub fn store_error(e: TicketError) -> ApiError {
    let status = match e {
        TicketError::DuplicateKey(_) => StatusCode::CONFLICT,
        TicketError::InvalidRecord(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TicketError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    api_error(status, e.to_string())
}
