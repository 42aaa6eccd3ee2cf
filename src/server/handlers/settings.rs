//! Settings API handlers.

use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use crate::settings::PixSettings;

use super::super::state::AppState;
use super::{ApiError, error_response};

/// GET /api/settings - the configured beneficiary.
pub async fn get(State(state): State<Arc<AppState>>) -> Result<Json<PixSettings>, ApiError> {
    state
        .settings()
        .cloned()
        .map(Json)
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, "No PIX settings configured"))
}
