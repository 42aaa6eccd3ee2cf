//! # BR Code Protocol Building Blocks
//!
//! Low-level pieces of the EMV-QR merchant-presented format as profiled by
//! the PIX arrangement.
//!
//! ## Module Structure
//!
//! - [`tlv`]: Tag-Length-Value record formatting and parsing
//! - [`crc`]: CRC16-CCITT trailer checksum
//! - [`text`]: Name/city normalization to the allowed character set
//! - [`fields`]: Field ids and fixed values
//!
//! ## Usage Example
//!
//! ```
//! use brcode::protocol::{crc, fields, text, tlv};
//!
//! let mut payload = String::new();
//! tlv::push_field(&mut payload, fields::COUNTRY_CODE, fields::COUNTRY_BR);
//! tlv::push_field(
//!     &mut payload,
//!     fields::MERCHANT_CITY,
//!     &text::normalize("São Paulo", text::MAX_CITY_LEN),
//! );
//! payload.push_str(fields::CRC16_HEADER);
//! payload.push_str(&crc::checksum(&payload));
//!
//! assert!(payload.starts_with("5802BR6009SAO PAULO6304"));
//! ```
//!
//! ## Protocol Reference
//!
//! Based on the EMVCo "QR Code Specification for Payment Systems:
//! Merchant-Presented Mode" and the Banco Central do Brasil BR Code manual.

pub mod crc;
pub mod fields;
pub mod text;
pub mod tlv;
