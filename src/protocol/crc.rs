//! # CRC16-CCITT Checksum
//!
//! The BR Code trailer (field `63`) carries a CRC16 in the "CCITT-FALSE" /
//! XModem-with-`0xFFFF` flavour:
//!
//! | Parameter | Value |
//! |-----------|-------|
//! | Polynomial | `0x1021` |
//! | Initial register | `0xFFFF` |
//! | Reflected | no |
//! | Final XOR | none |
//!
//! The register is fed one UTF-16 code unit at a time. For the ASCII payloads
//! the encoder produces this is the same as feeding bytes.
//!
//! ```
//! use brcode::protocol::crc;
//!
//! assert_eq!(crc::crc16("123456789"), 0x29B1);
//! assert_eq!(crc::checksum("123456789"), "29B1");
//! ```

/// Generator polynomial (x^16 + x^12 + x^5 + 1).
pub const POLYNOMIAL: u16 = 0x1021;

/// Initial register value.
pub const INITIAL: u16 = 0xFFFF;

/// Compute the CRC16 register over `data`.
pub fn crc16(data: &str) -> u16 {
    let mut crc = INITIAL;

    for unit in data.encode_utf16() {
        // Only the low byte survives the shift in 16-bit arithmetic.
        crc ^= unit << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ POLYNOMIAL;
            } else {
                crc <<= 1;
            }
        }
    }

    crc
}

/// Compute the checksum of `data` as 4 uppercase hex digits.
pub fn checksum(data: &str) -> String {
    format!("{:04X}", crc16(data))
}
