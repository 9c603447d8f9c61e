pub mod color;
pub mod config;
pub mod emit;
pub mod error;
pub mod fonts;
pub mod logging;
pub mod mail;
pub mod pipeline;
pub mod tokens;
pub use error::{AppError, AppResult};

use config::PathsConfig;
use pipeline::BuildOutput;

/// Entrypoint used by the generator binary.
pub fn run(paths: &PathsConfig) -> AppResult<BuildOutput> {
    logging::init();
    tracing::info!(tokens = %paths.tokens_path.display(), "generating design system files");

    let output = pipeline::generate(paths)?;

    tracing::info!(
        dist = %paths.dist_dir.display(),
        files = output.artifacts.len(),
        "generation complete"
    );
    Ok(output)
}
