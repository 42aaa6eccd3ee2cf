//! # Golden Payload Tests
//!
//! These tests pin exact payload strings so that any change to field order,
//! normalization or the CRC is caught before a printed code stops scanning.
//!
//! ## Test Coverage
//!
//! - **Known answers**: complete payloads whose checksums were verified
//!   against the BR Code manual's reference example.
//! - **Properties**: ordering, length bounds, amount gating and checksum
//!   self-consistency across a spread of realistic and degenerate inputs.

use brcode::payload::{self, Amount, PayloadParameters, encode_pix_payload};
use brcode::protocol::{crc, text, tlv};
use pretty_assertions::assert_eq;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn office() -> PayloadParameters {
    PayloadParameters::new("12345678000190", "JC Contabilidade", "Sao Paulo")
}

/// A spread of inputs covering static, dynamic and degenerate payloads.
fn corpus() -> Vec<PayloadParameters> {
    vec![
        office(),
        office().amount(Amount::from_cents(150_000)),
        office()
            .amount(Amount::from_cents(1))
            .transaction_id("REC-2024-001"),
        office().amount(Amount::ZERO).transaction_id("ignored"),
        office().amount(Amount::from_cents(-100)),
        PayloadParameters::new(
            "contato@jccontabilidade.com.br",
            "José da Silva & Cia.",
            "Florianópolis",
        )
        .amount(Amount::from_cents(9990)),
        PayloadParameters::new(
            "123e4567-e12b-12d1-a456-426655440000",
            "Associação Brasileira de Contabilidade Moderna",
            "São José dos Campos do Sul",
        ),
        PayloadParameters::new("+5511999998888", "", ""),
        PayloadParameters::default(),
    ]
}

fn top_level_ids(payload: &str) -> Vec<String> {
    tlv::parse(payload)
        .expect("payload should parse")
        .iter()
        .map(|r| r.id.to_string())
        .collect()
}

// ============================================================================
// KNOWN ANSWERS
// ============================================================================

#[test]
fn crc_known_answer_vector() {
    assert_eq!(crc::crc16("123456789"), 0x29B1);
}

#[test]
fn central_bank_reference_payload_verifies() {
    let reference = "00020126580014br.gov.bcb.pix0136123e4567-e12b-12d1-a456-426655440000\
                     5204000053039865802BR5913Fulano de Tal6008BRASILIA62070503***63041D3D";
    assert!(payload::verify(reference));
}

#[test]
fn static_office_payload() {
    let payload = encode_pix_payload(&office());

    assert_eq!(
        payload,
        "00020126360014BR.GOV.BCB.PIX0114123456780001905204000053039865802BR\
         5916JC CONTABILIDADE6009SAO PAULO62070503***63047D09"
    );
    assert!(payload.contains("26360014BR.GOV.BCB.PIX011412345678000190"));
    assert!(payload.contains("5916JC CONTABILIDADE"));
    assert!(payload.contains("6009SAO PAULO"));
    assert!(payload.contains("62070503***"));

    let ids = top_level_ids(&payload);
    assert!(!ids.contains(&"01".to_string()));
    assert!(!ids.contains(&"54".to_string()));
}

#[test]
fn fixed_amount_payload() {
    let params = PayloadParameters::new("12345678000190", "JC Contabilidade", "São Paulo")
        .amount(Amount::from_cents(150_000))
        .transaction_id("REC-2024-001");

    assert_eq!(
        encode_pix_payload(&params),
        "00020101021226360014BR.GOV.BCB.PIX0114123456780001905204000053039865407\
         1500.005802BR5916JC CONTABILIDADE6009SAO PAULO62140510REC20240016304F598"
    );
}

#[test]
fn email_key_with_accented_beneficiary() {
    let params = PayloadParameters::new(
        "contato@jccontabilidade.com.br",
        "José da Silva & Cia.",
        "Florianópolis",
    )
    .amount("99,90".parse().unwrap());

    assert_eq!(
        encode_pix_payload(&params),
        "00020101021226520014BR.GOV.BCB.PIX0130contato@jccontabilidade.com.br\
         520400005303986540599.905802BR5917JOSE DA SILVA CIA6013FLORIANOPOLIS\
         62070503***6304E111"
    );
}

#[test]
fn normalization_scenario() {
    assert_eq!(
        text::normalize("José da Silva & Cia.", text::MAX_NAME_LEN),
        "JOSE DA SILVA CIA"
    );
}

#[test]
fn forty_char_name_is_truncated_to_25() {
    let name = "Escritorio Contabil Jean Claude e Filhos";
    assert_eq!(name.chars().count(), 40);

    let payload = encode_pix_payload(&PayloadParameters::new("k", name, "Sao Paulo"));
    let decoded = payload::decode(&payload).unwrap();
    assert_eq!(decoded.merchant_name(), Some("ESCRITORIO CONTABIL JEAN "));
    assert_eq!(decoded.merchant_name().unwrap().len(), 25);
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[test]
fn encoding_is_deterministic() {
    for params in corpus() {
        assert_eq!(encode_pix_payload(&params), encode_pix_payload(&params));
    }
}

#[test]
fn checksum_is_self_consistent() {
    for params in corpus() {
        let payload = encode_pix_payload(&params);
        let (body, trailer) = payload.split_at(payload.len() - 4);
        assert!(body.ends_with("6304"), "{}", payload);
        assert_eq!(crc::checksum(body), trailer, "{}", payload);
        assert!(payload::verify(&payload), "{}", payload);
    }
}

#[test]
fn field_order_is_fixed() {
    for params in corpus() {
        let ids = top_level_ids(&encode_pix_payload(&params));
        assert_eq!(ids.first().map(String::as_str), Some("00"));
        assert_eq!(ids.last().map(String::as_str), Some("63"));
        if let Some(pos) = ids.iter().position(|id| id == "01") {
            let account = ids.iter().position(|id| id == "26").unwrap();
            assert!(pos < account);
        }
    }
}

#[test]
fn name_and_city_respect_length_bounds() {
    for params in corpus() {
        let decoded = payload::decode(&encode_pix_payload(&params)).unwrap();
        assert!(decoded.merchant_name().unwrap().chars().count() <= 25);
        assert!(decoded.merchant_city().unwrap().chars().count() <= 15);
    }
}

#[test]
fn amount_fields_present_only_for_positive_amounts() {
    for params in corpus() {
        let positive = params.amount.is_some_and(|a| a.is_positive());
        let ids = top_level_ids(&encode_pix_payload(&params));
        assert_eq!(ids.contains(&"01".to_string()), positive);
        assert_eq!(ids.contains(&"54".to_string()), positive);
    }
}

#[test]
fn decoding_recovers_encoded_fields() {
    let params = PayloadParameters::new("+5511999998888", "Maria Conceição", "Recife")
        .amount(Amount::from_reais(42.5))
        .transaction_id("NF 000123");
    let decoded = payload::decode(&encode_pix_payload(&params)).unwrap();

    assert!(decoded.is_single_use());
    assert_eq!(decoded.pix_key(), Some("+5511999998888"));
    assert_eq!(decoded.merchant_name(), Some("MARIA CONCEICAO"));
    assert_eq!(decoded.merchant_city(), Some("RECIFE"));
    assert_eq!(decoded.amount(), Some("42.50"));
    assert_eq!(decoded.reference_label(), Some("NF000123"));
}
