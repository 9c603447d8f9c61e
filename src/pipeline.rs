use std::path::{Path, PathBuf};

use crate::config::PathsConfig;
use crate::emit::{self, EmitResult};
use crate::error::AppResult;
use crate::fonts::{self, StageReport};
use crate::tokens::TokenDocument;

/// Summary of one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    pub artifacts: Vec<PathBuf>,
    pub fonts: StageReport,
}

/// Load the token document and regenerate every output under `dist_dir`.
pub fn generate(paths: &PathsConfig) -> AppResult<BuildOutput> {
    let tokens = TokenDocument::load(&paths.tokens_path)?;
    generate_from(&tokens, &paths.fonts_dir, &paths.dist_dir)
}

pub fn generate_from(
    tokens: &TokenDocument,
    fonts_dir: &Path,
    dist_dir: &Path,
) -> AppResult<BuildOutput> {
    emit::ensure_dir(dist_dir)?;
    let artifacts = emit::render_all(tokens)?
        .iter()
        .map(|artifact| emit::write_artifact(dist_dir, artifact))
        .collect::<EmitResult<Vec<_>>>()?;

    let fonts = fonts::stage_fonts(fonts_dir, &dist_dir.join(fonts::DEFAULT_FONTS_DIR))?;

    tracing::info!(
        artifacts = artifacts.len(),
        fonts = fonts.copied_files.len(),
        "all design system files generated"
    );
    Ok(BuildOutput { artifacts, fonts })
}
