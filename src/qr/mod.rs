//! QR code encoding
//!
//! Payloads are handed to the `qrcode` crate, which picks the smallest symbol
//! version that fits. The chosen version is kept on [`RenderedQr`] so callers
//! can tell when a payload pushed the symbol past the expected size.

mod encoder;

pub use encoder::{MAX_IMAGE_SIDE, MAX_SYMBOL_WIDTH, QrEncoder};

use image::RgbImage;
use qrcode::{EcLevel, Version};

/// A QR code painted onto an RGB raster
#[derive(Debug, Clone)]
pub struct RenderedQr {
    /// Rendered pixels, quiet zone included
    pub image: RgbImage,
    /// Symbol version selected by the encoder
    pub version: Version,
    /// Symbol width in modules, quiet zone excluded
    pub width: usize,
    /// Error correction level used
    pub ec_level: EcLevel,
    base_version: i16,
}

impl RenderedQr {
    /// Numeric symbol version (1..=40 for normal QR codes)
    pub fn version_number(&self) -> i16 {
        match self.version {
            Version::Normal(v) | Version::Micro(v) => v,
        }
    }

    /// True when the payload needed a larger symbol than the configured base version
    pub fn exceeds_base_version(&self) -> bool {
        self.version_number() > self.base_version
    }
}

/// Parse a single-letter error correction level (`L`, `M`, `Q`, `H`).
pub fn parse_ec_level(value: &str) -> Option<EcLevel> {
    match value.trim().to_ascii_uppercase().as_str() {
        "L" => Some(EcLevel::L),
        "M" => Some(EcLevel::M),
        "Q" => Some(EcLevel::Q),
        "H" => Some(EcLevel::H),
        _ => None,
    }
}
