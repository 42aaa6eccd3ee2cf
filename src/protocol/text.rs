//! # Text Normalization
//!
//! Merchant name and city must be plain uppercase ASCII (`A-Z`, `0-9`,
//! space) so every banking app renders them the same way.
//!
//! ## Pipeline
//!
//! ```text
//! "José da Silva & Cia."
//!   │ NFD decompose        "Jose\u{301} da Silva & Cia."
//!   │ drop combining marks "Jose da Silva & Cia."
//!   │ keep [A-Za-z0-9 ]    "Jose da Silva  Cia"
//!   │ trim + collapse      "Jose da Silva Cia"
//!   │ truncate to N        "Jose da Silva Cia"
//!   ▼ uppercase            "JOSE DA SILVA CIA"
//! ```

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Maximum merchant name length (field `59`).
pub const MAX_NAME_LEN: usize = 25;

/// Maximum merchant city length (field `60`).
pub const MAX_CITY_LEN: usize = 15;

/// Maximum reference label length (field `62`/`05`).
pub const MAX_REFERENCE_LEN: usize = 25;

/// Normalize free-form text to at most `max_len` uppercase ASCII chars.
///
/// Never fails; empty or fully-stripped input yields `""`.
pub fn normalize(input: &str, max_len: usize) -> String {
    let kept: String = input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();

    let collapsed = kept.split_whitespace().collect::<Vec<_>>().join(" ");

    collapsed
        .chars()
        .take(max_len)
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Keep only ASCII letters and digits, truncated to `max_len`.
///
/// Case is preserved.
pub fn alphanumeric(input: &str, max_len: usize) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(max_len)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accents_and_symbols() {
        assert_eq!(
            normalize("José da Silva & Cia.", MAX_NAME_LEN),
            "JOSE DA SILVA CIA"
        );
    }

    #[test]
    fn test_city_names() {
        assert_eq!(normalize("São Paulo", MAX_CITY_LEN), "SAO PAULO");
        assert_eq!(normalize("Florianópolis", MAX_CITY_LEN), "FLORIANOPOLIS");
        assert_eq!(normalize("  Maceió  ", MAX_CITY_LEN), "MACEIO");
    }

    #[test]
    fn test_cedilla_and_tilde() {
        assert_eq!(normalize("Açaí & Pão", 25), "ACAI PAO");
    }

    #[test]
    fn test_truncation() {
        let name = "Associação Brasileira de Contabilidade Moderna";
        let out = normalize(name, MAX_NAME_LEN);
        assert_eq!(out.len(), MAX_NAME_LEN);
        assert_eq!(out, "ASSOCIACAO BRASILEIRA DE ");
    }

    #[test]
    fn test_empty_and_symbol_only() {
        assert_eq!(normalize("", MAX_NAME_LEN), "");
        assert_eq!(normalize("!@#$%", MAX_NAME_LEN), "");
        assert_eq!(normalize("   ", MAX_CITY_LEN), "");
    }

    #[test]
    fn test_non_latin_scripts_are_dropped() {
        assert_eq!(normalize("東京 Tokyo", MAX_CITY_LEN), "TOKYO");
    }

    #[test]
    fn test_literal_space_runs_collapse() {
        assert_eq!(normalize("JC  Contabilidade", MAX_NAME_LEN), "JC CONTABILIDADE");
        assert_eq!(normalize("Sao   Paulo", MAX_CITY_LEN), "SAO PAULO");
        // Collapsing happens before truncation, so more text fits.
        assert_eq!(
            normalize("A    B    C    D    E    F    G", 9),
            "A B C D E"
        );
    }

    #[test]
    fn test_tabs_and_newlines_are_dropped() {
        assert_eq!(normalize("Rio\tde\nJaneiro", MAX_CITY_LEN), "RIODEJANEIRO");
    }

    #[test]
    fn test_alphanumeric() {
        assert_eq!(alphanumeric("REC-2024/001", MAX_REFERENCE_LEN), "REC2024001");
        assert_eq!(alphanumeric("ção-1", MAX_REFERENCE_LEN), "o1");
        assert_eq!(alphanumeric(&"x".repeat(40), MAX_REFERENCE_LEN).len(), 25);
        assert_eq!(alphanumeric("---", MAX_REFERENCE_LEN), "");
    }
}
