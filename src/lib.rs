//! MedChain QR - colour-coded QR fixtures for drug batch verification demos
//!
//! Each batch number is encoded into a QR code whose colours signal status:
//! red for counterfeit batches, green for genuine ones. Every batch yields a
//! base64 PNG data URI for inline previews and a PNG file on disk.
//!
//! # Example
//!
//! ```no_run
//! use medchain_qr::{Generator, GeneratorConfig, sample_records};
//!
//! fn main() -> anyhow::Result<()> {
//!     let generator = Generator::new(&GeneratorConfig::default())?;
//!     let generated = generator.run(&sample_records(), &mut std::io::stdout())?;
//!
//!     println!("Wrote {} files", generated.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod output;
pub mod palette;
pub mod preview;
pub mod qr;
pub mod record;
pub mod writer;

// Re-exports for convenience
pub use error::{Error, Result};

pub use config::{GeneratorConfig, LogRotation, LoggingOptions, OutputOptions, RenderOptions};
pub use generator::{GeneratedBatch, Generator};
pub use palette::{ColorScheme, Theme, colors_for};
pub use qr::{QrEncoder, RenderedQr};
pub use record::{BatchRecord, load_records, sample_records};
