//! Server state and configuration.

use crate::settings::PixSettings;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Default beneficiary used when a request omits key, name or city
    pub settings: Option<PixSettings>,
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Configured beneficiary settings, if any.
    pub fn settings(&self) -> Option<&PixSettings> {
        self.config.settings.as_ref()
    }
}
