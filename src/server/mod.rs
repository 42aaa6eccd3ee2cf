//! # HTTP Server for PIX Payloads
//!
//! Serves payload strings and QR code images to the receipt/PDF pipeline.
//!
//! ## Usage
//!
//! ```bash
//! brcode serve --listen 0.0.0.0:8080 --settings pix.json
//! ```
//!
//! ## Routes
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | GET | `/api/pix/payload` | `{"payload", "crc"}` |
//! | GET | `/api/pix/qr` | `image/png`, or `{"data_url"}` with `format=data-url` |
//! | POST | `/api/pix/verify` | decoded fields, 422 when invalid |
//! | GET | `/api/settings` | configured beneficiary, 404 when none |
//!
//! Payload endpoints take `key`, `name`, `city`, `amount` and `txid` query
//! parameters; missing beneficiary fields come from the settings file.

mod handlers;
mod state;

pub use state::{AppState, ServerConfig};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::error::BrCodeError;

/// Build the application router.
pub fn router(config: ServerConfig) -> Router {
    let app_state = Arc::new(AppState::new(config));

    Router::new()
        .route("/api/pix/payload", get(handlers::pix::payload))
        .route("/api/pix/qr", get(handlers::pix::qr))
        .route("/api/pix/verify", post(handlers::pix::verify))
        .route("/api/settings", get(handlers::settings::get))
        .with_state(app_state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use brcode::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), brcode::error::BrCodeError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     settings: None,
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), BrCodeError> {
    let app = router(config.clone());

    log::info!("brcode HTTP server starting...");
    log::info!("Listening on: {}", config.listen_addr);
    match &config.settings {
        Some(settings) => log::info!(
            "Default beneficiary: {} ({})",
            settings.beneficiary_name,
            settings
                .key_type
                .map(|t| t.label())
                .unwrap_or("key type not set")
        ),
        None => log::info!("No settings loaded; requests must supply key, name and city"),
    }

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            BrCodeError::Transport(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| BrCodeError::Transport(format!("Server error: {}", e)))?;

    Ok(())
}
