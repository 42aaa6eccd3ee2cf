//! PIX payload and QR code handlers.

use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::{
    error::BrCodeError,
    payload::{self, Amount, PayloadParameters, encode_pix_payload},
    render::qr::{self, QrOptions},
    settings::BeneficiaryOverrides,
};

use super::super::state::AppState;
use super::{ApiError, api_error, error_response};

/// Query string shared by the payload and QR endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PixQuery {
    /// PIX key (falls back to settings)
    pub key: Option<String>,
    /// Beneficiary name (falls back to settings)
    pub name: Option<String>,
    /// Beneficiary city (falls back to settings)
    pub city: Option<String>,
    /// Amount in reais, e.g. `1500.00` or `1.500,00`
    pub amount: Option<String>,
    /// Transaction reference label
    pub txid: Option<String>,
    /// QR image side in pixels
    pub size: Option<u32>,
    /// QR quiet zone in modules
    pub margin: Option<u32>,
    /// Error correction level (L, M, Q, H)
    pub ec: Option<String>,
    /// `png` (default) or `data-url`
    pub format: Option<String>,
}

/// Largest image side the server will render.
const MAX_SIZE: u32 = 2000;

impl PixQuery {
    /// Resolve payload parameters against the configured settings.
    fn parameters(&self, state: &AppState) -> Result<PayloadParameters, BrCodeError> {
        let mut params = BeneficiaryOverrides {
            key: self.key.clone(),
            name: self.name.clone(),
            city: self.city.clone(),
        }
        .resolve(state.settings())?;

        if let Some(raw) = self.amount.as_deref().filter(|s| !s.trim().is_empty()) {
            let amount: Amount = raw.parse().map_err(|e| {
                BrCodeError::InvalidParameter(format!("invalid amount '{}': {}", raw, e))
            })?;
            params = params.amount(amount);
        }
        if let Some(txid) = &self.txid {
            params = params.transaction_id(txid.clone());
        }

        Ok(params)
    }

    fn qr_options(&self) -> Result<QrOptions, BrCodeError> {
        let mut options = QrOptions::default();
        if let Some(size) = self.size {
            if size == 0 || size > MAX_SIZE {
                return Err(BrCodeError::InvalidParameter(format!(
                    "size must be between 1 and {}",
                    MAX_SIZE
                )));
            }
            options = options.width(size);
        }
        if let Some(margin) = self.margin {
            options = options.margin(margin.min(16));
        }
        if let Some(ec) = &self.ec {
            options = options.error_level(ec.parse()?);
        }
        Ok(options)
    }
}

/// Handle GET /api/pix/payload - return the encoded payload as JSON.
pub async fn payload(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PixQuery>,
) -> Result<Json<Value>, ApiError> {
    let params = query.parameters(&state).map_err(api_error)?;
    let payload = encode_pix_payload(&params);
    let crc = &payload[payload.len() - 4..];

    Ok(Json(json!({
        "success": true,
        "payload": payload,
        "crc": crc,
    })))
}

/// Handle GET /api/pix/qr - render the payload as a PNG or data URL.
pub async fn qr(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PixQuery>,
) -> Result<Response, ApiError> {
    let params = query.parameters(&state).map_err(api_error)?;
    let options = query.qr_options().map_err(api_error)?;
    let as_data_url = match query.format.as_deref() {
        None | Some("png") => false,
        Some("data-url") | Some("data_url") => true,
        Some(other) => {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                format!("unknown format '{}' (use png or data-url)", other),
            ));
        }
    };

    let payload = encode_pix_payload(&params);
    log::debug!(
        "Rendering QR ({}px, margin {}, EC {}) for {}",
        options.width,
        options.margin,
        options.error_level,
        payload
    );

    // PNG encoding is CPU-bound; keep it off the async workers.
    let rendered = tokio::task::spawn_blocking(move || {
        if as_data_url {
            qr::to_data_url(&payload, &options).map(Rendered::DataUrl)
        } else {
            qr::to_png(&payload, &options).map(Rendered::Png)
        }
    })
    .await
    .map_err(|e| {
        error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("Task error: {}", e))
    })?
    .map_err(api_error)?;

    Ok(match rendered {
        Rendered::Png(png_bytes) => {
            ([(header::CONTENT_TYPE, "image/png")], png_bytes).into_response()
        }
        Rendered::DataUrl(data_url) => {
            Json(json!({"success": true, "data_url": data_url})).into_response()
        }
    })
}

enum Rendered {
    Png(Vec<u8>),
    DataUrl(String),
}

/// Handle POST /api/pix/verify - decode a payload sent as the raw body.
pub async fn verify(body: String) -> Result<Json<Value>, ApiError> {
    match payload::decode(body.trim()) {
        Ok(decoded) => Ok(Json(json!({
            "success": true,
            "valid": true,
            "single_use": decoded.is_single_use(),
            "pix_key": decoded.pix_key(),
            "merchant_name": decoded.merchant_name(),
            "merchant_city": decoded.merchant_city(),
            "amount": decoded.amount(),
            "reference_label": decoded.reference_label(),
            "fields": &decoded.fields,
        }))),
        Err(e) => {
            log::warn!("Payload failed verification: {}", e);
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"success": false, "valid": false, "error": e.to_string()})),
            ))
        }
    }
}
