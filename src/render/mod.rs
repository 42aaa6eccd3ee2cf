//! # Rendering Module
//!
//! Produces images from encoded payloads.
//!
//! ## Modules
//!
//! - [`qr`]: QR code rasterization, PNG and data URL output
//!
//! ## Usage Example
//!
//! ```
//! use brcode::payload::{encode_pix_payload, PayloadParameters};
//! use brcode::render::qr::{self, QrOptions};
//!
//! let payload = encode_pix_payload(&PayloadParameters::new(
//!     "12345678000190",
//!     "JC Contabilidade",
//!     "Sao Paulo",
//! ));
//!
//! let png = qr::to_png(&payload, &QrOptions::default().width(300))?;
//! assert!(!png.is_empty());
//! # Ok::<(), brcode::BrCodeError>(())
//! ```

pub mod qr;
