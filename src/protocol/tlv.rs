//! # EMV Tag-Length-Value Records
//!
//! Every BR Code field is a text record:
//!
//! ```text
//! ┌──────┬────────┬──────────────────┐
//! │ ID   │ LENGTH │ VALUE            │
//! │ 2 ch │ 2 ch   │ LENGTH units     │
//! └──────┴────────┴──────────────────┘
//! ```
//!
//! LENGTH counts UTF-16 code units, the same units the CRC walks. For the
//! ASCII text the normalizer produces this is the character count.
//!
//! Templates (merchant account information, additional data) nest further
//! records inside VALUE using the same layout.
//!
//! ```
//! use brcode::protocol::tlv;
//!
//! assert_eq!(tlv::field("58", "BR"), "5802BR");
//! assert_eq!(tlv::field("05", ""), "0500");
//!
//! let records = tlv::parse("5802BR6009SAO PAULO").unwrap();
//! assert_eq!(records[1].value, "SAO PAULO");
//! ```

use std::fmt;

use thiserror::Error;

/// Format a single record: id, two-digit length, value.
///
/// The caller guarantees `value` is at most 99 code units. Longer values are
/// still written (with a wider length) rather than truncated.
pub fn field(id: &str, value: &str) -> String {
    format!("{}{:02}{}", id, value.encode_utf16().count(), value)
}

/// Append a record to an existing buffer.
pub fn push_field(buf: &mut String, id: &str, value: &str) {
    buf.push_str(&field(id, value));
}

/// A decoded record borrowing from the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    /// Two-digit field id
    pub id: &'a str,
    /// Raw value (may itself be a nested template)
    pub value: &'a str,
}

impl Record<'_> {
    /// Parse this record's value as a nested template.
    pub fn nested(&self) -> Result<Vec<Record<'_>>, TlvError> {
        parse(self.value)
    }
}

impl fmt::Display for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", field(self.id, self.value))
    }
}

/// Structural problems found while parsing records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TlvError {
    /// Fewer than 4 units left for an id + length header
    #[error("truncated record header at offset {offset}")]
    TruncatedHeader { offset: usize },
    /// Length digits are not numeric
    #[error("invalid length '{length}' at offset {offset}")]
    InvalidLength { offset: usize, length: String },
    /// Declared length runs past the end of the input
    #[error("record at offset {offset} declares {declared} units but only {available} remain")]
    TruncatedValue {
        offset: usize,
        declared: usize,
        available: usize,
    },
    /// A record boundary falls inside a surrogate pair
    #[error("record boundary at offset {offset} splits a character")]
    SplitCharacter { offset: usize },
}

/// Parse a flat sequence of records.
///
/// Offsets in errors count UTF-16 code units, matching how lengths are
/// declared.
pub fn parse(input: &str) -> Result<Vec<Record<'_>>, TlvError> {
    // Byte index at every code unit offset; `None` inside a surrogate pair.
    let mut bounds: Vec<Option<usize>> = Vec::with_capacity(input.len() + 1);
    for (i, c) in input.char_indices() {
        bounds.push(Some(i));
        if c.len_utf16() == 2 {
            bounds.push(None);
        }
    }
    bounds.push(Some(input.len()));
    let total = bounds.len() - 1;

    let byte_at = |offset: usize| bounds[offset].ok_or(TlvError::SplitCharacter { offset });

    let mut records = Vec::new();
    let mut pos = 0;

    while pos < total {
        if total - pos < 4 {
            return Err(TlvError::TruncatedHeader { offset: pos });
        }

        let id = &input[byte_at(pos)?..byte_at(pos + 2)?];
        let length = &input[byte_at(pos + 2)?..byte_at(pos + 4)?];
        let declared: usize = match length.parse() {
            Ok(n) if length.bytes().all(|b| b.is_ascii_digit()) => n,
            _ => {
                return Err(TlvError::InvalidLength {
                    offset: pos,
                    length: length.to_string(),
                });
            }
        };

        let start = pos + 4;
        let available = total - start;
        if declared > available {
            return Err(TlvError::TruncatedValue {
                offset: pos,
                declared,
                available,
            });
        }

        records.push(Record {
            id,
            value: &input[byte_at(start)?..byte_at(start + declared)?],
        });
        pos = start + declared;
    }

    Ok(records)
}
