//! # BR Code Field Identifiers
//!
//! Top-level and nested field ids used by static PIX payloads, in the order
//! they are emitted.
//!
//! | ID | Name | Value |
//! |----|------|-------|
//! | 00 | Payload Format Indicator | `01` |
//! | 01 | Point of Initiation Method | `12` (amount-bearing only) |
//! | 26 | Merchant Account Information | template |
//! | 52 | Merchant Category Code | `0000` |
//! | 53 | Transaction Currency | `986` (BRL) |
//! | 54 | Transaction Amount | `0.00` (amount-bearing only) |
//! | 58 | Country Code | `BR` |
//! | 59 | Merchant Name | up to 25 chars |
//! | 60 | Merchant City | up to 15 chars |
//! | 62 | Additional Data Field Template | template |
//! | 63 | CRC16 | 4 hex digits |

pub const PAYLOAD_FORMAT_INDICATOR: &str = "00";
pub const POINT_OF_INITIATION_METHOD: &str = "01";
pub const MERCHANT_ACCOUNT_INFORMATION: &str = "26";
pub const MERCHANT_CATEGORY_CODE: &str = "52";
pub const TRANSACTION_CURRENCY: &str = "53";
pub const TRANSACTION_AMOUNT: &str = "54";
pub const COUNTRY_CODE: &str = "58";
pub const MERCHANT_NAME: &str = "59";
pub const MERCHANT_CITY: &str = "60";
pub const ADDITIONAL_DATA_FIELD_TEMPLATE: &str = "62";
pub const CRC16: &str = "63";

/// Nested ids inside the merchant account information template (`26`).
pub mod merchant_account {
    /// Globally unique identifier of the arrangement
    pub const GUI: &str = "00";
    /// PIX key
    pub const KEY: &str = "01";
}

/// Nested ids inside the additional data field template (`62`).
pub mod additional_data {
    /// Reference label (transaction id)
    pub const REFERENCE_LABEL: &str = "05";
}

/// Fixed values.
pub const FORMAT_INDICATOR_VALUE: &str = "01";
pub const SINGLE_USE_INITIATION: &str = "12";
pub const PIX_GUI: &str = "BR.GOV.BCB.PIX";
pub const CATEGORY_CODE_UNSPECIFIED: &str = "0000";
pub const CURRENCY_BRL: &str = "986";
pub const COUNTRY_BR: &str = "BR";
pub const REFERENCE_PLACEHOLDER: &str = "***";

/// Id and length header of the CRC record; covered by the checksum.
pub const CRC16_HEADER: &str = "6304";
