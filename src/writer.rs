//! Saving rendered QR codes to disk

use crate::error::Result;
use crate::preview::png_bytes;
use image::RgbImage;
use std::fs;
use std::path::{Path, PathBuf};

/// File name for a batch: `qr_` + batch with every `-` replaced by `_` + `.png`.
pub fn output_file_name(batch_number: &str) -> String {
    format!("qr_{}.png", batch_number.replace('-', "_"))
}

/// Write `image` as PNG into `dir`, replacing any file of the same name.
pub fn write_png(image: &RgbImage, dir: &Path, batch_number: &str) -> Result<PathBuf> {
    let path = dir.join(output_file_name(batch_number));
    fs::write(&path, png_bytes(image)?)?;
    tracing::info!(path = %path.display(), "Saved QR code");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn file_name_replaces_dashes() {
        assert_eq!(output_file_name("INS-2024-026"), "qr_INS_2024_026.png");
        assert_eq!(output_file_name("PLAIN"), "qr_PLAIN.png");
        assert_eq!(output_file_name("A--B"), "qr_A__B.png");
        assert_eq!(output_file_name("ATR-2024-015"), "qr_ATR_2024_015.png");
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let first = RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]));
        let second = RgbImage::from_pixel(3, 3, Rgb([255, 255, 255]));

        let path = write_png(&first, dir.path(), "EPI-2024-001").unwrap();
        let again = write_png(&second, dir.path(), "EPI-2024-001").unwrap();
        assert_eq!(path, again);
        assert_eq!(path.file_name().unwrap(), "qr_EPI_2024_001.png");

        let saved = image::open(&path).unwrap().to_rgb8();
        assert_eq!(saved, second);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let image = RgbImage::from_pixel(1, 1, Rgb([0, 0, 0]));
        let err = write_png(&image, &dir.path().join("absent"), "X").unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
