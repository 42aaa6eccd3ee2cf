//! Decoding and verification of BR Code payloads.
//!
//! Used to check a payload before it is printed, and by the `verify`
//! command to explain what a scanned code contains.

use serde::Serialize;
use thiserror::Error;

use crate::protocol::{crc, fields, tlv};

/// An owned field id/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub id: String,
    pub value: String,
}

impl From<tlv::Record<'_>> for Field {
    fn from(record: tlv::Record<'_>) -> Self {
        Self {
            id: record.id.to_string(),
            value: record.value.to_string(),
        }
    }
}

/// Why a payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("malformed record: {0}")]
    Malformed(#[from] tlv::TlvError),
    #[error("payload does not start with the format indicator (00)")]
    MissingFormatIndicator,
    #[error("payload does not end with a 4-digit CRC record (63)")]
    MissingChecksum,
    #[error("CRC record (63) appears before the end of the payload")]
    MisplacedChecksum,
    #[error("malformed {template} template: {source}")]
    MalformedTemplate {
        template: &'static str,
        source: tlv::TlvError,
    },
    #[error("checksum mismatch: payload says {found}, computed {expected}")]
    ChecksumMismatch { expected: String, found: String },
}

/// A payload split into its fields, with the checksum already verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedPayload {
    /// Top-level fields in payload order, including the CRC record
    pub fields: Vec<Field>,
    /// Nested fields of the merchant account information template (26)
    pub merchant_account: Vec<Field>,
    /// Nested fields of the additional data template (62)
    pub additional_data: Vec<Field>,
}

impl DecodedPayload {
    /// Value of a top-level field.
    pub fn field(&self, id: &str) -> Option<&str> {
        find(&self.fields, id)
    }

    /// Globally unique identifier of the account arrangement.
    pub fn gui(&self) -> Option<&str> {
        find(&self.merchant_account, fields::merchant_account::GUI)
    }

    /// The PIX key.
    pub fn pix_key(&self) -> Option<&str> {
        find(&self.merchant_account, fields::merchant_account::KEY)
    }

    pub fn merchant_name(&self) -> Option<&str> {
        self.field(fields::MERCHANT_NAME)
    }

    pub fn merchant_city(&self) -> Option<&str> {
        self.field(fields::MERCHANT_CITY)
    }

    /// Raw amount text from field `54`.
    pub fn amount(&self) -> Option<&str> {
        self.field(fields::TRANSACTION_AMOUNT)
    }

    pub fn reference_label(&self) -> Option<&str> {
        find(&self.additional_data, fields::additional_data::REFERENCE_LABEL)
    }

    /// Whether the payload is marked single-use (field `01` = `12`).
    pub fn is_single_use(&self) -> bool {
        self.field(fields::POINT_OF_INITIATION_METHOD) == Some(fields::SINGLE_USE_INITIATION)
    }

    pub fn checksum(&self) -> Option<&str> {
        self.field(fields::CRC16)
    }
}

fn find<'a>(list: &'a [Field], id: &str) -> Option<&'a str> {
    list.iter()
        .find(|f| f.id == id)
        .map(|f| f.value.as_str())
}

/// Decode a payload and verify its trailing checksum.
pub fn decode(payload: &str) -> Result<DecodedPayload, DecodeError> {
    let records = tlv::parse(payload)?;

    if records.first().map(|r| r.id) != Some(fields::PAYLOAD_FORMAT_INDICATOR) {
        return Err(DecodeError::MissingFormatIndicator);
    }

    let crc_record = match records.last() {
        Some(r) if r.id == fields::CRC16 && r.value.len() == 4 => r,
        _ => return Err(DecodeError::MissingChecksum),
    };
    if records[..records.len() - 1]
        .iter()
        .any(|r| r.id == fields::CRC16)
    {
        return Err(DecodeError::MisplacedChecksum);
    }

    // The CRC record is always the final 8 chars: "6304" + digits.
    let covered = &payload[..payload.len() - crc_record.value.len()];
    let expected = crc::checksum(covered);
    if !expected.eq_ignore_ascii_case(crc_record.value) {
        return Err(DecodeError::ChecksumMismatch {
            expected,
            found: crc_record.value.to_string(),
        });
    }

    let merchant_account = nested(
        &records,
        fields::MERCHANT_ACCOUNT_INFORMATION,
        "merchant account",
    )?;
    let additional_data = nested(
        &records,
        fields::ADDITIONAL_DATA_FIELD_TEMPLATE,
        "additional data",
    )?;

    Ok(DecodedPayload {
        fields: records.into_iter().map(Field::from).collect(),
        merchant_account,
        additional_data,
    })
}

fn nested(
    records: &[tlv::Record<'_>],
    id: &str,
    template: &'static str,
) -> Result<Vec<Field>, DecodeError> {
    match records.iter().find(|r| r.id == id) {
        Some(record) => record
            .nested()
            .map(|inner| inner.into_iter().map(Field::from).collect())
            .map_err(|source| DecodeError::MalformedTemplate { template, source }),
        None => Ok(Vec::new()),
    }
}

/// Whether `payload` decodes cleanly and carries a matching checksum.
pub fn verify(payload: &str) -> bool {
    decode(payload).is_ok()
}
