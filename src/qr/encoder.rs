//! QR code encoder

use crate::error::{Error, Result};
use crate::palette::{self, ColorScheme};
use crate::qr::RenderedQr;
use image::{ImageBuffer, RgbImage};
use qrcode::{Color, EcLevel, QrCode};

/// Pixel size of one module unless configured otherwise
pub const DEFAULT_MODULE_SIZE: u32 = 10;
/// Quiet zone width in modules unless configured otherwise
pub const DEFAULT_BORDER: u32 = 4;
/// Largest rendered side in pixels
pub const MAX_IMAGE_SIDE: u32 = 16_384;
/// Module width of a version 40 symbol, the largest the encoder can pick
pub const MAX_SYMBOL_WIDTH: usize = 177;

/// QR code encoder
#[derive(Debug, Clone)]
pub struct QrEncoder {
    /// Error correction level
    ecc_level: EcLevel,
    module_size: u32,
    border: u32,
    base_version: i16,
}

impl QrEncoder {
    /// Create a new QR encoder with default settings (Low ECC, 10 px modules, 4 module border)
    pub fn new() -> Self {
        Self {
            ecc_level: EcLevel::L,
            module_size: DEFAULT_MODULE_SIZE,
            border: DEFAULT_BORDER,
            base_version: 1,
        }
    }

    /// Create a new QR encoder with a specific error correction level
    pub fn with_ecc_level(ecc_level: EcLevel) -> Self {
        Self {
            ecc_level,
            ..Self::new()
        }
    }

    /// Override module size (pixels) and border (modules)
    pub fn with_geometry(mut self, module_size: u32, border: u32) -> Self {
        self.module_size = module_size.max(1);
        self.border = border;
        self
    }

    /// Version a payload is expected to fit in; larger symbols are flagged
    pub fn with_base_version(mut self, base_version: i16) -> Self {
        self.base_version = base_version.clamp(1, 40);
        self
    }

    /// Side length in pixels of an image holding a symbol `width` modules wide.
    ///
    /// `None` when the side would overflow or exceed [`MAX_IMAGE_SIDE`].
    pub fn image_side(&self, width: usize) -> Option<u32> {
        u32::try_from(width)
            .ok()?
            .checked_add(self.border.checked_mul(2)?)?
            .checked_mul(self.module_size)
            .filter(|side| *side <= MAX_IMAGE_SIDE)
    }

    /// Encode a string into a QR code painted with the given colours
    pub fn encode(&self, payload: &str, colors: ColorScheme) -> Result<RenderedQr> {
        if payload.is_empty() {
            return Err(Error::EmptyPayload);
        }

        let code = QrCode::with_error_correction_level(payload.as_bytes(), self.ecc_level)
            .map_err(|e| {
                Error::QrEncode(format!(
                    "Failed to create QR code for {}-byte payload: {e}",
                    payload.len()
                ))
            })?;

        let width = code.width();
        let side = self.image_side(width).ok_or_else(|| {
            Error::Image(format!(
                "{width}-module symbol with border {} and module size {} exceeds {MAX_IMAGE_SIDE} px",
                self.border, self.module_size
            ))
        })?;
        let image = self.paint(&code.to_colors(), width, side, colors);

        let rendered = RenderedQr {
            image,
            version: code.version(),
            width,
            ec_level: self.ecc_level,
            base_version: self.base_version,
        };

        tracing::debug!(
            "Encoded QR: version={:?}, ecc_level={:?}, width={}, fill={}, background={}",
            rendered.version,
            rendered.ec_level,
            width,
            palette::hex(colors.fill),
            palette::hex(colors.background)
        );

        if rendered.exceeds_base_version() {
            tracing::warn!(
                payload,
                version = rendered.version_number(),
                base_version = self.base_version,
                "Payload does not fit the base QR version; symbol was enlarged"
            );
        }

        Ok(rendered)
    }

    fn paint(&self, modules: &[Color], width: usize, side: u32, colors: ColorScheme) -> RgbImage {
        let mut img: RgbImage = ImageBuffer::from_pixel(side, side, colors.background);

        for (index, module) in modules.iter().enumerate() {
            if *module != Color::Dark {
                continue;
            }
            let x0 = (index % width) as u32 + self.border;
            let y0 = (index / width) as u32 + self.border;
            for dy in 0..self.module_size {
                for dx in 0..self.module_size {
                    img.put_pixel(
                        x0 * self.module_size + dx,
                        y0 * self.module_size + dy,
                        colors.fill,
                    );
                }
            }
        }

        img
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}
