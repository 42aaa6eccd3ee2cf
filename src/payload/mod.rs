//! # PIX Payload Encoder
//!
//! Builds the BR Code text embedded in a printed QR code.
//!
//! ## Field Layout
//!
//! ```text
//! 000201                          payload format indicator
//! 010212                          point of initiation (amount only)
//! 26..0014BR.GOV.BCB.PIX01..<key> merchant account information
//! 52040000                        merchant category code
//! 5303986                         currency (BRL)
//! 54..<amount>                    transaction amount (amount only)
//! 5802BR                          country
//! 59..<NAME>                      merchant name, max 25
//! 60..<CITY>                      merchant city, max 15
//! 62..05..<reference>             additional data
//! 6304<CRC>                       checksum over everything before it + "6304"
//! ```
//!
//! Scanners read fields sequentially, so the order above is fixed.
//!
//! ## Example
//!
//! ```
//! use brcode::payload::{encode_pix_payload, Amount, PayloadParameters};
//!
//! let params = PayloadParameters::new("12345678000190", "JC Contabilidade", "São Paulo")
//!     .amount(Amount::from_cents(150_000))
//!     .transaction_id("REC-2024-001");
//!
//! let payload = encode_pix_payload(&params);
//! assert!(payload.starts_with("000201010212"));
//! assert!(payload.contains("54071500.00"));
//! assert!(brcode::payload::verify(&payload));
//! ```

mod amount;
mod decode;

pub use amount::{Amount, ParseAmountError};
pub use decode::{DecodeError, DecodedPayload, Field, decode, verify};

use serde::{Deserialize, Serialize};

use crate::protocol::{crc, fields, text, tlv};

/// Inputs for one payload. Immutable per call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadParameters {
    /// Registered PIX key, passed through verbatim
    pub pix_key: String,
    /// Beneficiary display name (normalized, max 25)
    pub beneficiary_name: String,
    /// Beneficiary city (normalized, max 15)
    pub city: String,
    /// Fixed amount; only a positive amount is encoded
    #[serde(default)]
    pub amount: Option<Amount>,
    /// Reference label; only used together with a positive amount
    #[serde(default)]
    pub transaction_id: Option<String>,
}

impl PayloadParameters {
    /// Parameters for a reusable, amount-less payload.
    pub fn new(
        pix_key: impl Into<String>,
        beneficiary_name: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            pix_key: pix_key.into(),
            beneficiary_name: beneficiary_name.into(),
            city: city.into(),
            amount: None,
            transaction_id: None,
        }
    }

    /// Fix the payment amount.
    pub fn amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the transaction reference label.
    pub fn transaction_id(mut self, id: impl Into<String>) -> Self {
        self.transaction_id = Some(id.into());
        self
    }

    /// The amount, if it activates the amount-bearing fields.
    fn active_amount(&self) -> Option<Amount> {
        self.amount.filter(Amount::is_positive)
    }

    /// Reference label for field `62`/`05`.
    ///
    /// A non-empty id that sanitizes to nothing is written as an empty
    /// label, not as the placeholder.
    fn reference_label(&self) -> String {
        self.active_amount()
            .and(self.transaction_id.as_deref())
            .filter(|id| !id.is_empty())
            .map(|id| text::alphanumeric(id, text::MAX_REFERENCE_LEN))
            .unwrap_or_else(|| fields::REFERENCE_PLACEHOLDER.to_string())
    }
}

/// Encode a PIX payload.
///
/// Total over its input: empty names, empty keys and non-positive amounts
/// all yield a structurally valid payload.
pub fn encode_pix_payload(params: &PayloadParameters) -> String {
    let amount = params.active_amount();
    let mut payload = String::with_capacity(128);

    tlv::push_field(
        &mut payload,
        fields::PAYLOAD_FORMAT_INDICATOR,
        fields::FORMAT_INDICATOR_VALUE,
    );

    if amount.is_some() {
        tlv::push_field(
            &mut payload,
            fields::POINT_OF_INITIATION_METHOD,
            fields::SINGLE_USE_INITIATION,
        );
    }

    let account = tlv::field(fields::merchant_account::GUI, fields::PIX_GUI)
        + &tlv::field(fields::merchant_account::KEY, &params.pix_key);
    tlv::push_field(&mut payload, fields::MERCHANT_ACCOUNT_INFORMATION, &account);

    tlv::push_field(
        &mut payload,
        fields::MERCHANT_CATEGORY_CODE,
        fields::CATEGORY_CODE_UNSPECIFIED,
    );
    tlv::push_field(&mut payload, fields::TRANSACTION_CURRENCY, fields::CURRENCY_BRL);

    if let Some(amount) = amount {
        tlv::push_field(&mut payload, fields::TRANSACTION_AMOUNT, &amount.to_string());
    }

    tlv::push_field(&mut payload, fields::COUNTRY_CODE, fields::COUNTRY_BR);
    tlv::push_field(
        &mut payload,
        fields::MERCHANT_NAME,
        &text::normalize(&params.beneficiary_name, text::MAX_NAME_LEN),
    );
    tlv::push_field(
        &mut payload,
        fields::MERCHANT_CITY,
        &text::normalize(&params.city, text::MAX_CITY_LEN),
    );

    let additional = tlv::field(
        fields::additional_data::REFERENCE_LABEL,
        &params.reference_label(),
    );
    tlv::push_field(&mut payload, fields::ADDITIONAL_DATA_FIELD_TEMPLATE, &additional);

    payload.push_str(fields::CRC16_HEADER);
    let checksum = crc::checksum(&payload);
    payload.push_str(&checksum);

    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn office() -> PayloadParameters {
        PayloadParameters::new("12345678000190", "JC Contabilidade", "Sao Paulo")
    }

    fn ids(payload: &str) -> Vec<String> {
        tlv::parse(payload)
            .unwrap()
            .iter()
            .map(|r| r.id.to_string())
            .collect()
    }

    #[test]
    fn test_static_payload() {
        assert_eq!(
            encode_pix_payload(&office()),
            "00020126360014BR.GOV.BCB.PIX0114123456780001905204000053039865802BR\
             5916JC CONTABILIDADE6009SAO PAULO62070503***63047D09"
        );
    }

    #[test]
    fn test_amount_payload() {
        let params = office()
            .amount(Amount::from_cents(150_000))
            .transaction_id("REC-2024-001");
        assert_eq!(
            encode_pix_payload(&params),
            "00020101021226360014BR.GOV.BCB.PIX0114123456780001905204000053039865407\
             1500.005802BR5916JC CONTABILIDADE6009SAO PAULO62140510REC20240016304F598"
        );
    }

    #[test]
    fn test_deterministic() {
        let params = office().amount(Amount::from_cents(999));
        assert_eq!(encode_pix_payload(&params), encode_pix_payload(&params));
    }

    #[test]
    fn test_field_order_static() {
        assert_eq!(
            ids(&encode_pix_payload(&office())),
            vec!["00", "26", "52", "53", "58", "59", "60", "62", "63"]
        );
    }

    #[test]
    fn test_field_order_with_amount() {
        let params = office().amount(Amount::from_cents(1));
        assert_eq!(
            ids(&encode_pix_payload(&params)),
            vec!["00", "01", "26", "52", "53", "54", "58", "59", "60", "62", "63"]
        );
    }

    #[test]
    fn test_non_positive_amount_is_static() {
        let static_payload = encode_pix_payload(&office());
        assert_eq!(
            encode_pix_payload(&office().amount(Amount::ZERO)),
            static_payload
        );
        assert_eq!(
            encode_pix_payload(&office().amount(Amount::from_cents(-500))),
            static_payload
        );
    }

    #[test]
    fn test_transaction_id_ignored_without_amount() {
        let params = office().transaction_id("REC001");
        let payload = encode_pix_payload(&params);
        assert!(payload.contains("62070503***"));
        assert!(!payload.contains("REC001"));
    }

    #[test]
    fn test_transaction_id_sanitized_and_truncated() {
        let params = office()
            .amount(Amount::from_cents(100))
            .transaction_id("abc-def/ghi.jkl mno_pqr stu vwx yz0 123");
        let decoded = decode(&encode_pix_payload(&params)).unwrap();
        assert_eq!(
            decoded.reference_label(),
            Some("abcdefghijklmnopqrstuvwxy")
        );
    }

    #[test]
    fn test_symbol_only_transaction_id_is_empty_label() {
        let params = office()
            .amount(Amount::from_cents(100))
            .transaction_id("---");
        let payload = encode_pix_payload(&params);
        assert!(payload.contains("620405006304"));
        assert!(!payload.contains("***"));

        let decoded = decode(&payload).unwrap();
        assert_eq!(decoded.reference_label(), Some(""));
    }

    #[test]
    fn test_empty_transaction_id_uses_placeholder() {
        let params = office().amount(Amount::from_cents(100)).transaction_id("");
        assert!(encode_pix_payload(&params).contains("62070503***"));
    }

    #[test]
    fn test_degenerate_inputs() {
        let payload = encode_pix_payload(&PayloadParameters::default());
        assert_eq!(
            payload,
            "00020126220014BR.GOV.BCB.PIX01005204000053039865802BR5900600062070503***63049626"
        );
        assert!(verify(&payload));
    }

    #[test]
    fn test_key_is_not_normalized() {
        let params = PayloadParameters::new("contato@jccontabilidade.com.br", "JC", "SP");
        assert!(encode_pix_payload(&params).contains("0130contato@jccontabilidade.com.br"));
    }

    #[test]
    fn test_parameters_deserialize_amount_forms() {
        let from_number: PayloadParameters = serde_json::from_str(
            r#"{"pix_key":"k","beneficiary_name":"n","city":"c","amount":99.9}"#,
        )
        .unwrap();
        let from_text: PayloadParameters = serde_json::from_str(
            r#"{"pix_key":"k","beneficiary_name":"n","city":"c","amount":"99,90"}"#,
        )
        .unwrap();
        assert_eq!(from_number.amount, Some(Amount::from_cents(9990)));
        assert_eq!(from_text.amount, from_number.amount);
        assert_eq!(from_text.transaction_id, None);
    }

    #[test]
    fn test_amount_serializes_as_decimal_string() {
        let params = office().amount(Amount::from_cents(12345));
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["amount"], "123.45");
    }
}
