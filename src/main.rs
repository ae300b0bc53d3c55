//! MedChain QR fixture generator entrypoint

use anyhow::Context;
use clap::Parser;
use medchain_qr::{Generator, GeneratorConfig, load_records, logging, sample_records};
use std::io;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "medchain-qr",
    version,
    about = "Generate colour-coded QR fixtures for drug batch verification"
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to medchain-qr.{toml,yaml} in cwd.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Read batch records from a JSON/TOML/YAML file instead of the built-in samples
    #[arg(long, value_name = "PATH")]
    records: Option<PathBuf>,

    /// Directory receiving the PNG files (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = GeneratorConfig::load(cli.config.as_deref())?;

    if let Some(records) = cli.records {
        config.records = Some(records);
    }

    if let Some(dir) = cli.output_dir {
        config.output.directory = dir;
    }

    logging::init(&config.logging)?;

    let records = match config.records.as_deref() {
        Some(path) => load_records(path)
            .with_context(|| format!("loading batch records from {}", path.display()))?,
        None => sample_records(),
    };

    let generator = Generator::new(&config)?;
    info!(
        records = records.len(),
        output_dir = %generator.output_dir().display(),
        "Starting QR generation"
    );

    let stdout = io::stdout();
    generator.run(&records, &mut stdout.lock())?;

    Ok(())
}
