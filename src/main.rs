use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use umbrella_brand::config::load_brand_config;
use umbrella_brand::logging;

/// Regenerate CSS variables, fonts.css, the Tailwind preset and tokens.js.
#[derive(Parser)]
#[command(name = "umbrella-brand", version)]
struct Cli {
    /// Token document to read
    #[arg(long)]
    tokens: Option<PathBuf>,
    /// Output directory
    #[arg(long)]
    dist: Option<PathBuf>,
    /// Directory holding downloaded font binaries
    #[arg(long)]
    fonts: Option<PathBuf>,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let mut paths = load_brand_config().paths;
    if let Some(tokens) = cli.tokens {
        paths.tokens_path = tokens;
    }
    if let Some(dist) = cli.dist {
        paths.dist_dir = dist;
    }
    if let Some(fonts) = cli.fonts {
        paths.fonts_dir = fonts;
    }

    let output = umbrella_brand::run(&paths).context("design token generation failed")?;

    println!("Generated files:");
    for artifact in &output.artifacts {
        println!("  - {}", artifact.display());
    }
    if output.fonts.source_missing {
        println!("  - (fonts not staged; run download-fonts first)");
    } else {
        println!("  - {} font files copied", output.fonts.copied_files.len());
    }
    Ok(())
}
