//! # Error Types
//!
//! This module defines error types used around the payload encoder.
//!
//! The encoder itself is total and has no error type: every combination of
//! key, name, city, amount and transaction id produces a payload. Errors only
//! arise at the edges (rendering images, parsing user input, loading
//! settings, decoding payloads handed back to us, serving HTTP).

use thiserror::Error;

/// Main error type for brcode operations
#[derive(Debug, Error)]
pub enum BrCodeError {
    /// QR code generation or image encoding failed
    #[error("Image error: {0}")]
    Image(String),

    /// Invalid user-supplied parameter (amount, error level, size, ...)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Settings file could not be parsed
    #[error("Settings error: {0}")]
    Settings(String),

    /// Payload could not be decoded or failed checksum verification
    #[error("Decode error: {0}")]
    Decode(#[from] crate::payload::DecodeError),

    /// Server-level errors (bind, serve)
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
