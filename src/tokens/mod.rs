use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::color::{self, ColorError, Hsl};

pub const DEFAULT_TOKENS_PATH: &str = "tokens/design-tokens.json";

/// Top-level groups every token document must carry, in export order.
pub const TOP_LEVEL_KEYS: [&str; 7] = [
    "colors",
    "typography",
    "spacing",
    "borderRadius",
    "boxShadow",
    "transitionDuration",
    "zIndex",
];

pub type TokenResult<T> = std::result::Result<T, TokenError>;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to read token document: {path}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse token document")]
    Parse(#[from] serde_json::Error),
    #[error("token document root must be an object")]
    NotAnObject,
    #[error("missing token: {path}")]
    MissingPath { path: String },
    #[error("token {path} is not a {expected}")]
    WrongType { path: String, expected: &'static str },
    #[error("token {path} holds an invalid color")]
    Color {
        path: String,
        #[source]
        source: ColorError,
    },
}

/// The design-token JSON tree, with key order preserved as authored.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenDocument {
    root: Value,
}

impl TokenDocument {
    pub fn from_value(root: Value) -> TokenResult<Self> {
        if !root.is_object() {
            return Err(TokenError::NotAnObject);
        }
        Ok(Self { root })
    }

    pub fn parse(serialized: &str) -> TokenResult<Self> {
        Self::from_value(serde_json::from_str(serialized)?)
    }

    pub fn load(path: &Path) -> TokenResult<Self> {
        let serialized = fs::read_to_string(path).map_err(|source| TokenError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::parse(&serialized)?;
        tracing::debug!(path = %path.display(), "loaded token document");
        Ok(document)
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Resolve a dotted path such as `colors.brand.purple.DEFAULT`.
    pub fn lookup(&self, path: &str) -> TokenResult<&Value> {
        path.split('.')
            .try_fold(&self.root, |node, segment| node.get(segment))
            .ok_or_else(|| TokenError::MissingPath {
                path: path.to_string(),
            })
    }

    pub fn str_at(&self, path: &str) -> TokenResult<&str> {
        self.lookup(path)?
            .as_str()
            .ok_or_else(|| TokenError::WrongType {
                path: path.to_string(),
                expected: "string",
            })
    }

    pub fn object_at(&self, path: &str) -> TokenResult<&Map<String, Value>> {
        self.lookup(path)?
            .as_object()
            .ok_or_else(|| TokenError::WrongType {
                path: path.to_string(),
                expected: "object",
            })
    }

    /// Read a hex color and convert it to HSL.
    pub fn hsl_at(&self, path: &str) -> TokenResult<Hsl> {
        let hex = self.str_at(path)?;
        color::hex_to_hsl(hex).map_err(|source| TokenError::Color {
            path: path.to_string(),
            source,
        })
    }
}
