//! Error types for MedChain QR generation

use thiserror::Error;

/// Result type alias using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for QR fixture generation
#[derive(Error, Debug)]
pub enum Error {
    /// Empty strings are refused before reaching the encoder
    #[error("Refusing to encode an empty QR payload")]
    EmptyPayload,

    /// QR code encoding failed (payload too long for any version, etc.)
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Batch record input could not be read or parsed
    #[error("Invalid batch records: {0}")]
    Records(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}
