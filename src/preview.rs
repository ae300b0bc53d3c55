//! PNG data URIs for inline previews

use crate::error::Result;
use base64::{Engine as _, engine::general_purpose};
use image::{ImageFormat, RgbImage};
use std::io::Cursor;

/// Prefix of every preview string
pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Serialise an image to PNG bytes.
pub fn png_bytes(image: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes: Vec<u8> = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Encode an image as a `data:image/png;base64,...` URI, usable as an `img` source.
pub fn data_uri(image: &RgbImage) -> Result<String> {
    let encoded = general_purpose::STANDARD.encode(png_bytes(image)?);
    Ok(format!("{DATA_URI_PREFIX}{encoded}"))
}

/// Shorten a data URI for console display: the first `max_chars` characters followed by `...`.
pub fn truncate(uri: &str, max_chars: usize) -> String {
    let head: String = uri.chars().take(max_chars).collect();
    format!("{head}...")
}
