//! Batch driver: preview, save and report every record in order

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::output;
use crate::palette::{Theme, colors_for};
use crate::preview;
use crate::qr::QrEncoder;
use crate::record::BatchRecord;
use crate::writer;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Everything produced for one batch record
#[derive(Debug, Clone)]
pub struct GeneratedBatch {
    /// The record that was rendered
    pub record: BatchRecord,
    /// Full `data:image/png;base64,...` preview
    pub preview_uri: String,
    /// Location of the saved PNG
    pub saved_path: PathBuf,
    /// QR symbol version chosen for the payload
    pub version: i16,
}

/// Renders batch records into previews and PNG files
#[derive(Debug, Clone)]
pub struct Generator {
    encoder: QrEncoder,
    preview_theme: Theme,
    file_theme: Theme,
    output_dir: PathBuf,
    preview_chars: usize,
}

impl Generator {
    /// Build a generator from resolved configuration.
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        Ok(Self {
            encoder: config.encoder()?,
            preview_theme: config.render.preview_theme,
            file_theme: config.render.file_theme,
            output_dir: config.output.directory.clone(),
            preview_chars: config.output.preview_chars,
        })
    }

    /// Directory PNG files are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Data URI preview of a batch, rendered with the preview theme.
    pub fn preview(&self, record: &BatchRecord) -> Result<String> {
        let colors = colors_for(record.is_counterfeit, self.preview_theme);
        let qr = self.encoder.encode(&record.batch_number, colors)?;
        preview::data_uri(&qr.image)
    }

    /// Render a batch with the file theme and save it, returning the path and symbol version.
    pub fn save(&self, record: &BatchRecord) -> Result<(PathBuf, i16)> {
        let colors = colors_for(record.is_counterfeit, self.file_theme);
        let qr = self.encoder.encode(&record.batch_number, colors)?;
        let path = writer::write_png(&qr.image, &self.output_dir, &record.batch_number)?;
        Ok((path, qr.version_number()))
    }

    /// Produce the preview and the saved file for one record.
    pub fn process(&self, record: &BatchRecord) -> Result<GeneratedBatch> {
        let preview_uri = self.preview(record)?;
        let (saved_path, version) = self.save(record)?;

        Ok(GeneratedBatch {
            record: record.clone(),
            preview_uri,
            saved_path,
            version,
        })
    }

    /// Process records in order, writing the progress report to `out`.
    ///
    /// Each record's header is written before it is encoded. Stops at the
    /// first failure; later records are not attempted.
    pub fn run<W: Write>(
        &self,
        records: &[BatchRecord],
        out: &mut W,
    ) -> Result<Vec<GeneratedBatch>> {
        for line in output::banner() {
            writeln!(out, "{line}")?;
        }

        let mut generated = Vec::with_capacity(records.len());
        for record in records {
            let span = tracing::debug_span!("batch", batch = %record.batch_number);
            let _enter = span.enter();

            for line in output::header_lines(record) {
                writeln!(out, "{line}")?;
            }

            let preview_uri = self.preview(record)?;
            for line in output::preview_lines(record, &preview_uri, self.preview_chars) {
                writeln!(out, "{line}")?;
            }

            let (saved_path, version) = self.save(record)?;
            writeln!(out, "{}", output::saved_line(&saved_path))?;

            generated.push(GeneratedBatch {
                record: record.clone(),
                preview_uri,
                saved_path,
                version,
            });
        }

        tracing::info!(
            count = generated.len(),
            dir = %self.output_dir.display(),
            "Generation complete"
        );
        Ok(generated)
    }
}
