//! # QR Code Rendering
//!
//! Turns an encoded payload into a scannable image. The QR symbology itself
//! comes from the `qrcode` crate; this module only rasterizes the module
//! matrix and encodes it.
//!
//! ## Geometry
//!
//! ```text
//! ├ margin ┼──── modules ────┼ margin ┤   total = modules + 2 * margin
//! ├──────────────── side ─────────────┤   side  = max(width, total)
//! ```
//!
//! Pixels are mapped to modules by nearest neighbour, so the image is exactly
//! `side` pixels square and modules differ by at most one pixel. Neither
//! `width` nor `total` may exceed [`MAX_SIDE`].

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{GrayImage, Luma};
use qrcode::{Color, EcLevel, QrCode};
use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use crate::error::BrCodeError;

/// Largest image side, in pixels, that [`render`] will allocate.
pub const MAX_SIDE: u32 = 8192;

/// QR error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QrErrorLevel {
    /// ~7% recovery
    L,
    /// ~15% recovery (default)
    #[default]
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    H,
}

impl QrErrorLevel {
    fn ec_level(self) -> EcLevel {
        match self {
            Self::L => EcLevel::L,
            Self::M => EcLevel::M,
            Self::Q => EcLevel::Q,
            Self::H => EcLevel::H,
        }
    }
}

impl FromStr for QrErrorLevel {
    type Err = BrCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "L" | "LOW" => Ok(Self::L),
            "M" | "MEDIUM" => Ok(Self::M),
            "Q" | "QUARTILE" => Ok(Self::Q),
            "H" | "HIGH" => Ok(Self::H),
            other => Err(BrCodeError::InvalidParameter(format!(
                "unknown error correction level '{}' (use L, M, Q or H)",
                other
            ))),
        }
    }
}

impl fmt::Display for QrErrorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        };
        f.write_str(s)
    }
}

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrOptions {
    /// Requested side length in pixels
    pub width: u32,
    /// Quiet zone in modules
    pub margin: u32,
    pub error_level: QrErrorLevel,
    /// Luma of dark modules
    pub dark: u8,
    /// Luma of light modules and margin
    pub light: u8,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            width: 200,
            margin: 1,
            error_level: QrErrorLevel::M,
            dark: 0,
            light: 255,
        }
    }
}

impl QrOptions {
    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    pub fn error_level(mut self, level: QrErrorLevel) -> Self {
        self.error_level = level;
        self
    }
}

/// Rasterize `payload` as a grayscale QR code.
pub fn render(payload: &str, options: &QrOptions) -> Result<GrayImage, BrCodeError> {
    let code =
        QrCode::with_error_correction_level(payload.as_bytes(), options.error_level.ec_level())
            .map_err(|e| BrCodeError::Image(format!("QR encoding failed: {}", e)))?;

    let modules = code.width() as u32;
    let total = options
        .margin
        .checked_mul(2)
        .and_then(|m| m.checked_add(modules))
        .filter(|total| *total <= MAX_SIDE)
        .ok_or_else(|| {
            BrCodeError::InvalidParameter(format!(
                "margin {} does not fit in a {}px image",
                options.margin, MAX_SIDE
            ))
        })?;
    if options.width > MAX_SIDE {
        return Err(BrCodeError::InvalidParameter(format!(
            "width {} exceeds the {}px limit",
            options.width, MAX_SIDE
        )));
    }
    let side = options.width.max(total);

    let dark = Luma([options.dark]);
    let light = Luma([options.light]);

    let img = GrayImage::from_fn(side, side, |px, py| {
        let mx = px * total / side;
        let my = py * total / side;
        let inside = (options.margin..options.margin + modules).contains(&mx)
            && (options.margin..options.margin + modules).contains(&my);
        if inside {
            let x = (mx - options.margin) as usize;
            let y = (my - options.margin) as usize;
            if code[(x, y)] == Color::Dark {
                return dark;
            }
        }
        light
    });

    Ok(img)
}

/// Render `payload` and encode it as PNG.
pub fn to_png(payload: &str, options: &QrOptions) -> Result<Vec<u8>, BrCodeError> {
    let img = render(payload, options)?;

    let mut png_bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut png_bytes), image::ImageFormat::Png)
        .map_err(|e| BrCodeError::Image(format!("PNG encoding failed: {}", e)))?;

    Ok(png_bytes)
}

/// Render `payload` as a `data:image/png;base64,...` URL.
pub fn to_data_url(payload: &str, options: &QrOptions) -> Result<String, BrCodeError> {
    let png_bytes = to_png(payload, options)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(png_bytes)))
}
