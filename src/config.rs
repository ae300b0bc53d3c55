//! Runtime configuration handling

use crate::error::{Error, Result};
use crate::palette::Theme;
use crate::qr::{self, MAX_IMAGE_SIDE, MAX_SYMBOL_WIDTH, QrEncoder};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// File names searched for, in order, when no config path is given
pub const CONFIG_FILE_NAMES: [&str; 3] =
    ["medchain-qr.toml", "medchain-qr.yaml", "medchain-qr.yml"];

/// Source of `MEDCHAIN_QR_*` override values, normally the process environment
pub type EnvLookup = dyn Fn(&str) -> Option<String>;

/// Top-level configuration structure persisted to disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// QR rendering parameters
    pub render: RenderOptions,
    /// Where and how results are written
    pub output: OutputOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
    /// Optional record file replacing the built-in samples
    pub records: Option<PathBuf>,
}

impl GeneratorConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        Self::resolve(explicit_path, &cwd, &|key: &str| env::var(key).ok())
    }

    /// Load from `explicit_path`, else from a file discovered in `search_dir`,
    /// else defaults; then apply overrides looked up through `vars`.
    pub fn resolve(
        explicit_path: Option<&Path>,
        search_dir: &Path,
        vars: &EnvLookup,
    ) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file(search_dir) {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No medchain-qr.toml / medchain-qr.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides(vars);
        Ok(config)
    }

    /// Locate the first `medchain-qr.{toml,yaml,yml}` in `dir`.
    pub fn discover_file(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply environment variable overrides after file/default loading.
    fn apply_env_overrides(&mut self, vars: &EnvLookup) {
        self.render.apply_env_overrides(vars);
        self.output.apply_env_overrides(vars);
        self.logging.apply_env_overrides(vars);
        if let Some(records) = vars("MEDCHAIN_QR_RECORDS") {
            if records.trim().is_empty() {
                self.records = None;
            } else {
                self.records = Some(PathBuf::from(records));
            }
        }
    }

    /// Build the encoder described by the render options.
    pub fn encoder(&self) -> Result<QrEncoder> {
        self.render.to_encoder()
    }
}

/// QR rendering parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Error correction level (`L`, `M`, `Q` or `H`)
    pub error_correction: String,
    /// Pixel size of one module
    pub module_size: u32,
    /// Quiet zone width in modules
    pub border: u32,
    /// Version short payloads are expected to fit in
    pub base_version: i16,
    /// Colour theme of the inline preview
    pub preview_theme: Theme,
    /// Colour theme of the saved PNG
    pub file_theme: Theme,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            error_correction: "L".to_string(),
            module_size: 10,
            border: 4,
            base_version: 1,
            preview_theme: Theme::Soft,
            file_theme: Theme::Print,
        }
    }
}

impl RenderOptions {
    pub(crate) fn apply_env_overrides(&mut self, vars: &EnvLookup) {
        if let Some(level) = vars("MEDCHAIN_QR_ERROR_CORRECTION") {
            self.error_correction = level;
        }
        if let Some(size) = vars("MEDCHAIN_QR_MODULE_SIZE") {
            if let Ok(parsed) = size.parse::<u32>() {
                self.module_size = parsed.max(1);
            }
        }
        if let Some(border) = vars("MEDCHAIN_QR_BORDER") {
            if let Ok(parsed) = border.parse::<u32>() {
                self.border = parsed;
            }
        }
        if let Some(theme) = vars("MEDCHAIN_QR_PREVIEW_THEME") {
            if let Some(parsed) = Theme::parse(&theme) {
                self.preview_theme = parsed;
            }
        }
        if let Some(theme) = vars("MEDCHAIN_QR_FILE_THEME") {
            if let Some(parsed) = Theme::parse(&theme) {
                self.file_theme = parsed;
            }
        }
    }

    /// Validate the options and build an encoder from them.
    pub fn to_encoder(&self) -> Result<QrEncoder> {
        let ec_level = qr::parse_ec_level(&self.error_correction).ok_or_else(|| {
            Error::Config(format!(
                "Unknown error correction level '{}'. Use L, M, Q, or H",
                self.error_correction
            ))
        })?;

        if !(1..=40).contains(&self.base_version) {
            return Err(Error::Config(format!(
                "base_version must be between 1 and 40, got {}",
                self.base_version
            )));
        }

        let encoder = QrEncoder::with_ecc_level(ec_level)
            .with_geometry(self.module_size, self.border)
            .with_base_version(self.base_version);

        if encoder.image_side(MAX_SYMBOL_WIDTH).is_none() {
            return Err(Error::Config(format!(
                "module_size {} with border {} cannot render a version 40 symbol within {MAX_IMAGE_SIDE} px",
                self.module_size, self.border
            )));
        }

        Ok(encoder)
    }
}

/// Output location and console formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Directory receiving the PNG files
    pub directory: PathBuf,
    /// Characters of the data URI shown in the console report
    pub preview_chars: usize,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            preview_chars: 50,
        }
    }
}

impl OutputOptions {
    pub(crate) fn apply_env_overrides(&mut self, vars: &EnvLookup) {
        if let Some(dir) = vars("MEDCHAIN_QR_OUTPUT_DIR") {
            if !dir.trim().is_empty() {
                self.directory = PathBuf::from(dir);
            }
        }
        if let Some(chars) = vars("MEDCHAIN_QR_PREVIEW_CHARS") {
            if let Ok(parsed) = chars.parse::<usize>() {
                self.preview_chars = parsed;
            }
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `MEDCHAIN_QR_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stderr logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self, vars: &EnvLookup) {
        if let Some(level) = vars("MEDCHAIN_QR_LOG_LEVEL") {
            self.level = level;
        }
        if let Some(file) = vars("MEDCHAIN_QR_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Some(color) = vars("MEDCHAIN_QR_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
        if let Some(rotation) = vars("MEDCHAIN_QR_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::from_str(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_match_fixture_layout() {
        let config = GeneratorConfig::default();
        assert_eq!(config.render.error_correction, "L");
        assert_eq!(config.render.module_size, 10);
        assert_eq!(config.render.border, 4);
        assert_eq!(config.render.preview_theme, Theme::Soft);
        assert_eq!(config.render.file_theme, Theme::Print);
        assert_eq!(config.output.directory, PathBuf::from("."));
        assert_eq!(config.output.preview_chars, 50);
        assert!(config.records.is_none());
        assert!(config.encoder().is_ok());
    }

    #[test]
    fn parses_partial_toml() {
        let file = write_temp(
            ".toml",
            r#"
records = "batches.json"

[render]
error_correction = "H"
file_theme = "soft"

[output]
directory = "fixtures"
"#,
        );
        let config = GeneratorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.render.error_correction, "H");
        assert_eq!(config.render.file_theme, Theme::Soft);
        assert_eq!(config.render.preview_theme, Theme::Soft);
        assert_eq!(config.render.module_size, 10);
        assert_eq!(config.output.directory, PathBuf::from("fixtures"));
        assert_eq!(config.records, Some(PathBuf::from("batches.json")));
    }

    #[test]
    fn parses_yaml() {
        let file = write_temp(
            ".yaml",
            "logging:\n  level: debug\n  rotation: daily\noutput:\n  preview_chars: 80\n",
        );
        let config = GeneratorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.rotation, Some(LogRotation::Daily));
        assert_eq!(config.output.preview_chars, 80);
    }

    #[test]
    fn rejects_unknown_format() {
        let file = write_temp(".ini", "level=debug");
        assert!(matches!(
            GeneratorConfig::from_file(file.path()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn rejects_bad_render_options() {
        let mut render = RenderOptions::default();
        render.error_correction = "Z".to_string();
        assert!(matches!(render.to_encoder(), Err(Error::Config(_))));

        let mut render = RenderOptions::default();
        render.base_version = 41;
        assert!(matches!(render.to_encoder(), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_unbounded_geometry() {
        let mut render = RenderOptions::default();
        render.border = u32::MAX / 2 + 1;
        assert!(matches!(render.to_encoder(), Err(Error::Config(_))));

        let mut render = RenderOptions::default();
        render.module_size = 1_000_000;
        assert!(matches!(render.to_encoder(), Err(Error::Config(_))));

        // Version 40 plus the default border at 88 px per module still fits.
        let mut render = RenderOptions::default();
        render.module_size = 88;
        assert!(render.to_encoder().is_ok());
    }

    #[test]
    fn env_overrides_apply_on_top_of_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let lookup = vars(&[
            ("MEDCHAIN_QR_ERROR_CORRECTION", "Q"),
            ("MEDCHAIN_QR_MODULE_SIZE", "0"),
            ("MEDCHAIN_QR_BORDER", "2"),
            ("MEDCHAIN_QR_PREVIEW_THEME", "PRINT"),
            ("MEDCHAIN_QR_FILE_THEME", "neon"),
            ("MEDCHAIN_QR_OUTPUT_DIR", "fixtures"),
            ("MEDCHAIN_QR_PREVIEW_CHARS", "12"),
            ("MEDCHAIN_QR_LOG_LEVEL", "debug"),
            ("MEDCHAIN_QR_LOG_FILE", "logs/qr.log"),
            ("MEDCHAIN_QR_LOG_COLOR", "off"),
            ("MEDCHAIN_QR_LOG_ROTATION", "Hourly"),
            ("MEDCHAIN_QR_RECORDS", "batches.yaml"),
        ]);

        let config = GeneratorConfig::resolve(None, dir.path(), &lookup).unwrap();
        assert_eq!(config.render.error_correction, "Q");
        assert_eq!(config.render.module_size, 1);
        assert_eq!(config.render.border, 2);
        assert_eq!(config.render.preview_theme, Theme::Print);
        // Unknown theme names leave the default in place.
        assert_eq!(config.render.file_theme, Theme::Print);
        assert_eq!(config.output.directory, PathBuf::from("fixtures"));
        assert_eq!(config.output.preview_chars, 12);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("logs/qr.log")));
        assert!(!config.logging.color);
        assert_eq!(config.logging.rotation, Some(LogRotation::Hourly));
        assert_eq!(config.records, Some(PathBuf::from("batches.yaml")));
    }

    #[test]
    fn unparsable_env_values_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let lookup = vars(&[
            ("MEDCHAIN_QR_MODULE_SIZE", "big"),
            ("MEDCHAIN_QR_PREVIEW_CHARS", "-3"),
            ("MEDCHAIN_QR_LOG_COLOR", "maybe"),
            ("MEDCHAIN_QR_OUTPUT_DIR", "  "),
        ]);

        let config = GeneratorConfig::resolve(None, dir.path(), &lookup).unwrap();
        assert_eq!(config.render.module_size, 10);
        assert_eq!(config.output.preview_chars, 50);
        assert!(config.logging.color);
        assert_eq!(config.output.directory, PathBuf::from("."));
    }

    #[test]
    fn empty_records_variable_clears_file_setting() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("medchain-qr.toml"),
            "records = \"batches.json\"\n",
        )
        .unwrap();

        let kept = GeneratorConfig::resolve(None, dir.path(), &vars(&[])).unwrap();
        assert_eq!(kept.records, Some(PathBuf::from("batches.json")));

        let cleared =
            GeneratorConfig::resolve(None, dir.path(), &vars(&[("MEDCHAIN_QR_RECORDS", " ")]))
                .unwrap();
        assert_eq!(cleared.records, None);
    }

    #[test]
    fn discovers_config_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(GeneratorConfig::discover_file(dir.path()), None);

        fs::write(dir.path().join("medchain-qr.yml"), "output:\n  preview_chars: 7\n").unwrap();
        assert_eq!(
            GeneratorConfig::discover_file(dir.path()),
            Some(dir.path().join("medchain-qr.yml"))
        );
        let config = GeneratorConfig::resolve(None, dir.path(), &vars(&[])).unwrap();
        assert_eq!(config.output.preview_chars, 7);

        fs::write(dir.path().join("medchain-qr.toml"), "[output]\npreview_chars = 9\n").unwrap();
        assert_eq!(
            GeneratorConfig::discover_file(dir.path()),
            Some(dir.path().join("medchain-qr.toml"))
        );
        let config = GeneratorConfig::resolve(None, dir.path(), &vars(&[])).unwrap();
        assert_eq!(config.output.preview_chars, 9);
    }

    #[test]
    fn explicit_path_wins_over_discovery() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("medchain-qr.toml"), "[output]\npreview_chars = 9\n").unwrap();
        let explicit = write_temp(".yaml", "output:\n  preview_chars: 21\n");

        let config =
            GeneratorConfig::resolve(Some(explicit.path()), dir.path(), &vars(&[])).unwrap();
        assert_eq!(config.output.preview_chars, 21);
    }

    #[test]
    fn missing_explicit_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            GeneratorConfig::resolve(Some(&missing), dir.path(), &vars(&[])),
            Err(Error::Config(_))
        ));
    }
}
