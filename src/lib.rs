//! # brcode - PIX Payment Payloads for Printed Receipts
//!
//! brcode builds the Brazilian PIX "BR Code" payload (an EMV-QR
//! merchant-presented TLV string with a CRC16 trailer) and renders it as a
//! QR code for invoices and receipts. It provides:
//!
//! - **Payload encoding**: field normalization, TLV assembly, CRC16-CCITT
//! - **Verification**: decode a payload back into fields and check its CRC
//! - **Rendering**: QR code PNGs and data URLs
//! - **Serving**: an HTTP API for the document pipeline
//!
//! ## Quick Start
//!
//! ```
//! use brcode::{encode_pix_payload, Amount, PayloadParameters};
//! use brcode::render::qr::{self, QrOptions};
//!
//! let params = PayloadParameters::new("12345678000190", "JC Contabilidade", "São Paulo")
//!     .amount(Amount::from_cents(150_000))
//!     .transaction_id("REC-2024-001");
//!
//! let payload = encode_pix_payload(&params);
//! assert!(payload.ends_with("6304F598"));
//!
//! let png = qr::to_png(&payload, &QrOptions::default())?;
//! assert!(!png.is_empty());
//!
//! # Ok::<(), brcode::BrCodeError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | TLV records, CRC16, text normalization |
//! | [`payload`] | Payload assembly and decoding |
//! | [`render`] | QR code images |
//! | [`settings`] | Stored beneficiary configuration |
//! | [`server`] | HTTP API |
//! | [`error`] | Error types |

pub mod error;
pub mod payload;
pub mod protocol;
pub mod render;
pub mod server;
pub mod settings;

// Re-exports for convenience
pub use error::BrCodeError;
pub use payload::{Amount, PayloadParameters, encode_pix_payload};
pub use settings::PixSettings;
