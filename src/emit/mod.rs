use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::tokens::{TokenDocument, TokenError};

pub mod fonts_css;
pub mod js_module;
pub mod preset;
pub mod tokens_css;

pub use preset::PresetFormat;

/// First line of every generated script module.
pub(crate) const GENERATED_BANNER: &str = "// Generated from design-tokens.json - DO NOT EDIT";

pub type EmitResult<T> = std::result::Result<T, EmitError>;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("failed to serialize {file_name}")]
    Serialize {
        file_name: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to create output directory: {path}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to write artifact: {path}")]
    Write { path: PathBuf, source: io::Error },
}

/// One generated output file, fully rendered in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: &'static str,
    pub contents: String,
}

impl Artifact {
    pub fn new(file_name: &'static str, contents: String) -> Self {
        Self {
            file_name,
            contents,
        }
    }
}

/// Render every text artifact in output order.
pub fn render_all(tokens: &TokenDocument) -> EmitResult<Vec<Artifact>> {
    let mut artifacts = vec![fonts_css::fonts_css(), tokens_css::tokens_css(tokens)?];

    let preset = preset::preset_tree(tokens)?;
    for format in PresetFormat::ALL {
        artifacts.push(preset::render_preset(&preset, format)?);
    }

    artifacts.push(js_module::js_module(tokens)?);
    Ok(artifacts)
}

pub fn ensure_dir(path: &Path) -> EmitResult<()> {
    fs::create_dir_all(path).map_err(|source| EmitError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Overwrite `dist_dir/<file_name>` unconditionally.
pub fn write_artifact(dist_dir: &Path, artifact: &Artifact) -> EmitResult<PathBuf> {
    ensure_dir(dist_dir)?;
    let path = dist_dir.join(artifact.file_name);
    fs::write(&path, &artifact.contents).map_err(|source| EmitError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!(
        file = artifact.file_name,
        bytes = artifact.contents.len(),
        "generated artifact"
    );
    Ok(path)
}
