use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use umbrella_brand::config::load_brand_config;
use umbrella_brand::fonts::{download_fonts, HttpFontFetcher};
use umbrella_brand::logging;

/// Fetch the Inter font binaries into the local fonts directory.
#[derive(Parser)]
#[command(name = "download-fonts", version)]
struct Cli {
    /// Destination fonts directory
    #[arg(long)]
    fonts: Option<PathBuf>,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let fonts_dir = cli.fonts.unwrap_or_else(|| load_brand_config().paths.fonts_dir);

    let fetcher = HttpFontFetcher::new().context("failed to build http client")?;
    let report = download_fonts(&fetcher, &fonts_dir)
        .with_context(|| format!("failed to download fonts into {}", fonts_dir.display()))?;

    println!(
        "Fonts ready in {}: {} downloaded, {} already present",
        fonts_dir.display(),
        report.downloaded.len(),
        report.skipped.len()
    );
    Ok(())
}
