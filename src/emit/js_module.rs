use super::{Artifact, EmitError, EmitResult, GENERATED_BANNER};
use crate::tokens::{TokenDocument, TOP_LEVEL_KEYS};

pub const FILE_NAME: &str = "tokens.js";

/// The whole token document as an ES module with per-group named exports.
pub fn js_module(tokens: &TokenDocument) -> EmitResult<Artifact> {
    for key in TOP_LEVEL_KEYS {
        tokens.lookup(key)?;
    }

    let body = serde_json::to_string_pretty(tokens.root()).map_err(|source| {
        EmitError::Serialize {
            file_name: FILE_NAME,
            source,
        }
    })?;

    let mut module = format!(
        "{GENERATED_BANNER}\nexport const tokens = {body};\n\n// Convenience exports\n"
    );
    for key in TOP_LEVEL_KEYS {
        module.push_str(&format!("export const {key} = tokens.{key};\n"));
    }
    module.push_str("\nexport default tokens;\n");

    Ok(Artifact::new(FILE_NAME, module))
}
