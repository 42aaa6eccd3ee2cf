//! HTTP handlers for the server.

pub mod pix;
pub mod settings;

use axum::{Json, http::StatusCode};
use serde_json::{Value, json};

use crate::error::BrCodeError;

/// Error half of every handler result.
pub type ApiError = (StatusCode, Json<Value>);

/// Build a `{"success": false, "error": ...}` response.
pub fn error_response(status: StatusCode, message: impl std::fmt::Display) -> ApiError {
    (
        status,
        Json(json!({"success": false, "error": message.to_string()})),
    )
}

/// Map a crate error to a response. Bad input is a 400, anything else a 500.
pub fn api_error(e: BrCodeError) -> ApiError {
    match e {
        BrCodeError::InvalidParameter(_) | BrCodeError::Decode(_) => {
            log::warn!("Rejected request: {}", e);
            error_response(StatusCode::BAD_REQUEST, e)
        }
        _ => {
            log::error!("Request failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e)
        }
    }
}
