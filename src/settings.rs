//! # PIX Settings
//!
//! The office's registered PIX key and beneficiary details, loaded from a
//! JSON file and used as defaults by the CLI and the HTTP server.
//!
//! ```json
//! {
//!   "key_type": "cnpj",
//!   "key": "12345678000190",
//!   "beneficiary_name": "JC Contabilidade",
//!   "city": "São Paulo"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::BrCodeError;
use crate::payload::PayloadParameters;

/// Kind of PIX key registered with the bank.
///
/// Informational only; the encoder passes every key through verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixKeyType {
    /// Individual taxpayer id
    Cpf,
    /// Company taxpayer id
    Cnpj,
    Email,
    Phone,
    /// Bank-issued random key (UUID)
    Random,
}

impl PixKeyType {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cpf => "CPF",
            Self::Cnpj => "CNPJ",
            Self::Email => "E-mail",
            Self::Phone => "Telefone",
            Self::Random => "Chave Aleatoria",
        }
    }
}

/// Stored beneficiary configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixSettings {
    #[serde(default)]
    pub key_type: Option<PixKeyType>,
    pub key: String,
    pub beneficiary_name: String,
    pub city: String,
}

impl PixSettings {
    /// Parse settings from JSON text.
    pub fn from_json(json: &str) -> Result<Self, BrCodeError> {
        serde_json::from_str(json).map_err(|e| BrCodeError::Settings(e.to_string()))
    }

    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BrCodeError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)
            .map_err(|e| BrCodeError::Settings(format!("{}: {}", path.display(), e)))?;
        log::debug!("Loaded PIX settings from {}", path.display());
        Ok(settings)
    }

    /// Amount-less payload parameters for this beneficiary.
    pub fn to_parameters(&self) -> PayloadParameters {
        PayloadParameters::new(&self.key, &self.beneficiary_name, &self.city)
    }
}

/// Per-request beneficiary fields, each falling back to stored settings.
#[derive(Debug, Clone, Default)]
pub struct BeneficiaryOverrides {
    pub key: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
}

impl BeneficiaryOverrides {
    /// Merge with `settings`, failing when a field is set nowhere.
    pub fn resolve(
        self,
        settings: Option<&PixSettings>,
    ) -> Result<PayloadParameters, BrCodeError> {
        let key = pick(self.key, settings.map(|s| &s.key), "key")?;
        let name = pick(self.name, settings.map(|s| &s.beneficiary_name), "name")?;
        let city = pick(self.city, settings.map(|s| &s.city), "city")?;
        Ok(PayloadParameters::new(key, name, city))
    }
}

fn pick(
    explicit: Option<String>,
    fallback: Option<&String>,
    what: &str,
) -> Result<String, BrCodeError> {
    explicit
        .or_else(|| fallback.cloned())
        .ok_or_else(|| {
            BrCodeError::InvalidParameter(format!(
                "missing {} (pass it explicitly or configure settings)",
                what
            ))
        })
}
