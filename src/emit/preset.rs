use serde_json::{json, Map, Value};

use super::{Artifact, EmitError, EmitResult, GENERATED_BANNER};
use crate::tokens::{TokenDocument, TokenResult};

/// Module syntax used to export the preset object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetFormat {
    /// `module.exports = …;` for `require()` consumers.
    CommonJs,
    /// `export default …;` for ESM consumers.
    EsModule,
}

impl PresetFormat {
    pub const ALL: [PresetFormat; 2] = [PresetFormat::CommonJs, PresetFormat::EsModule];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::CommonJs => "tailwind.preset.cjs",
            Self::EsModule => "tailwind.preset.js",
        }
    }

    fn export_prefix(self) -> &'static str {
        match self {
            Self::CommonJs => "module.exports =",
            Self::EsModule => "export default",
        }
    }
}

/// Semantic colors that carry a `DEFAULT`/`foreground` pair.
const PAIRED_COLORS: [&str; 7] = [
    "primary",
    "secondary",
    "destructive",
    "muted",
    "accent",
    "popover",
    "card",
];

const FLAT_COLORS: [&str; 5] = ["border", "input", "ring", "background", "foreground"];

const TOKEN_RADII: [&str; 4] = ["xl", "2xl", "3xl", "4xl"];

const SHADOWS: [&str; 5] = ["sm", "md", "lg", "xl", "purple"];

fn css_var(name: &str) -> Value {
    Value::String(format!("hsl(var(--{name}))"))
}

fn semantic_colors(tokens: &TokenDocument) -> TokenResult<Map<String, Value>> {
    let mut colors = Map::new();
    for name in FLAT_COLORS {
        colors.insert(name.to_string(), css_var(name));
    }
    for name in PAIRED_COLORS {
        colors.insert(
            name.to_string(),
            json!({
                "DEFAULT": css_var(name),
                "foreground": css_var(&format!("{name}-foreground")),
            }),
        );
    }
    colors.insert(
        "purple".to_string(),
        tokens.lookup("colors.brand.purple")?.clone(),
    );
    Ok(colors)
}

fn border_radius(tokens: &TokenDocument) -> TokenResult<Map<String, Value>> {
    let mut radius = Map::new();
    radius.insert("lg".to_string(), json!("var(--radius)"));
    radius.insert("md".to_string(), json!("calc(var(--radius) - 2px)"));
    radius.insert("sm".to_string(), json!("calc(var(--radius) - 4px)"));
    for key in TOKEN_RADII {
        let value = tokens.lookup(&format!("borderRadius.{key}"))?;
        radius.insert(key.to_string(), value.clone());
    }
    Ok(radius)
}

fn font_stack(tokens: &TokenDocument, path: &str) -> TokenResult<Value> {
    let stack = tokens
        .str_at(path)?
        .split(',')
        .map(|family| Value::String(family.trim().to_string()))
        .collect();
    Ok(Value::Array(stack))
}

/// `[size, { lineHeight?, letterSpacing, fontWeight }]` per font size.
/// Both metadata maps must exist; entries in them are optional per size.
fn font_sizes(tokens: &TokenDocument) -> TokenResult<Map<String, Value>> {
    let line_heights = tokens.object_at("typography.lineHeight")?;
    let letter_spacings = tokens.object_at("typography.letterSpacing")?;

    let mut sizes = Map::new();
    for (key, size) in tokens.object_at("typography.fontSize")? {
        let mut meta = Map::new();
        if let Some(line_height) = line_heights.get(key) {
            meta.insert("lineHeight".to_string(), line_height.clone());
        }
        let letter_spacing = letter_spacings
            .get(&format!("heading-{key}"))
            .cloned()
            .unwrap_or_else(|| json!("0"));
        meta.insert("letterSpacing".to_string(), letter_spacing);
        meta.insert("fontWeight".to_string(), json!("600"));
        sizes.insert(key.clone(), json!([size, meta]));
    }
    Ok(sizes)
}

fn box_shadow(tokens: &TokenDocument) -> TokenResult<Map<String, Value>> {
    let mut shadows = Map::new();
    for key in SHADOWS {
        let value = tokens.lookup(&format!("boxShadow.{key}"))?.clone();
        shadows.insert(key.to_string(), value);
        if key == "sm" {
            let default = tokens.lookup("boxShadow.md")?.clone();
            shadows.insert("DEFAULT".to_string(), default);
        }
    }
    Ok(shadows)
}

fn accordion_motion() -> (Value, Value) {
    let keyframes = json!({
        "accordion-down": {
            "from": { "height": "0" },
            "to": { "height": "var(--radix-accordion-content-height)" },
        },
        "accordion-up": {
            "from": { "height": "var(--radix-accordion-content-height)" },
            "to": { "height": "0" },
        },
    });
    let animation = json!({
        "accordion-down": "accordion-down 0.2s ease-out",
        "accordion-up": "accordion-up 0.2s ease-out",
    });
    (keyframes, animation)
}

/// Build the Tailwind preset tree from the token document.
pub fn preset_tree(tokens: &TokenDocument) -> TokenResult<Value> {
    let (keyframes, animation) = accordion_motion();

    let mut font_family = Map::new();
    font_family.insert(
        "sans".to_string(),
        font_stack(tokens, "typography.fontFamily.sans")?,
    );
    font_family.insert(
        "mono".to_string(),
        font_stack(tokens, "typography.fontFamily.mono")?,
    );

    let mut extend = Map::new();
    extend.insert("colors".to_string(), Value::Object(semantic_colors(tokens)?));
    extend.insert("borderRadius".to_string(), Value::Object(border_radius(tokens)?));
    extend.insert("fontFamily".to_string(), Value::Object(font_family));
    extend.insert("fontSize".to_string(), Value::Object(font_sizes(tokens)?));
    extend.insert(
        "fontWeight".to_string(),
        tokens.lookup("typography.fontWeight")?.clone(),
    );
    extend.insert("spacing".to_string(), tokens.lookup("spacing")?.clone());
    extend.insert("boxShadow".to_string(), Value::Object(box_shadow(tokens)?));
    extend.insert("keyframes".to_string(), keyframes);
    extend.insert("animation".to_string(), animation);

    Ok(json!({
        "darkMode": ["class"],
        "content": [],
        "theme": {
            "container": {
                "center": true,
                "padding": "2rem",
                "screens": { "2xl": "1400px" },
            },
            "extend": extend,
        },
    }))
}

/// Serialize a preset tree in the requested module format.
pub fn render_preset(preset: &Value, format: PresetFormat) -> EmitResult<Artifact> {
    let body = serde_json::to_string_pretty(preset).map_err(|source| EmitError::Serialize {
        file_name: format.file_name(),
        source,
    })?;
    let contents = format!(
        "{GENERATED_BANNER}\n{prefix} {body};\n",
        prefix = format.export_prefix()
    );
    Ok(Artifact::new(format.file_name(), contents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::test_support::fixture_tokens;
    use crate::tokens::TokenError;

    fn tree() -> Value {
        preset_tree(&fixture_tokens()).unwrap()
    }

    fn keys(value: &Value) -> Vec<&str> {
        value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect()
    }

    #[test]
    fn semantic_colors_reference_custom_properties() {
        let tree = tree();
        let colors = &tree["theme"]["extend"]["colors"];
        assert_eq!(colors["border"], "hsl(var(--border))");
        assert_eq!(colors["primary"]["DEFAULT"], "hsl(var(--primary))");
        assert_eq!(
            colors["muted"]["foreground"],
            "hsl(var(--muted-foreground))"
        );
        assert_eq!(colors["purple"]["neon"], "#7A3FFF");
    }

    #[test]
    fn purple_ramp_keeps_document_order() {
        let tree = tree();
        assert_eq!(
            keys(&tree["theme"]["extend"]["colors"]["purple"]),
            [
                "50", "100", "200", "300", "400", "500", "600", "700", "800", "900", "royal",
                "neon", "DEFAULT",
            ]
        );
    }

    #[test]
    fn font_sizes_carry_optional_line_height() {
        let tree = tree();
        let sizes = &tree["theme"]["extend"]["fontSize"];
        assert_eq!(
            sizes["12"],
            json!(["12px", { "letterSpacing": "0", "fontWeight": "600" }])
        );
        assert_eq!(
            sizes["88"],
            json!([
                "88px",
                { "lineHeight": "88px", "letterSpacing": "-4.0px", "fontWeight": "600" }
            ])
        );
    }

    #[test]
    fn font_stacks_are_split_and_trimmed() {
        let tree = tree();
        let sans = tree["theme"]["extend"]["fontFamily"]["sans"]
            .as_array()
            .unwrap();
        assert_eq!(sans[0], "'Inter'");
        assert_eq!(sans[sans.len() - 1], "sans-serif");
        assert!(sans.iter().all(|f| !f.as_str().unwrap().starts_with(' ')));
    }

    #[test]
    fn shadows_and_radii_follow_tokens() {
        let tree = tree();
        let extend = &tree["theme"]["extend"];
        assert_eq!(keys(&extend["boxShadow"]), ["sm", "DEFAULT", "md", "lg", "xl", "purple"]);
        assert_eq!(extend["boxShadow"]["DEFAULT"], extend["boxShadow"]["md"]);
        assert_eq!(keys(&extend["borderRadius"]), ["lg", "md", "sm", "xl", "2xl", "3xl", "4xl"]);
        assert_eq!(extend["borderRadius"]["2xl"], "16px");
    }

    #[test]
    fn formats_differ_only_in_export_syntax() {
        let tree = tree();
        let cjs = render_preset(&tree, PresetFormat::CommonJs).unwrap();
        let esm = render_preset(&tree, PresetFormat::EsModule).unwrap();

        assert_eq!(cjs.file_name, "tailwind.preset.cjs");
        assert_eq!(esm.file_name, "tailwind.preset.js");
        assert!(cjs.contents.starts_with(
            "// Generated from design-tokens.json - DO NOT EDIT\nmodule.exports = {\n  \"darkMode\": [\n    \"class\"\n  ],\n  \"content\": [],"
        ));
        assert!(esm.contents.contains("\nexport default {\n"));
        assert_eq!(
            cjs.contents.replacen("module.exports =", "export default", 1),
            esm.contents
        );
        assert!(cjs.contents.ends_with("};\n"));
    }

    #[test]
    fn missing_font_metadata_maps_fail() {
        for container in ["lineHeight", "letterSpacing"] {
            let mut value = fixture_tokens().root().clone();
            value["typography"]
                .as_object_mut()
                .unwrap()
                .remove(container);
            let tokens = TokenDocument::from_value(value).unwrap();
            let err = preset_tree(&tokens).unwrap_err();
            let expected = format!("typography.{container}");
            assert!(matches!(err, TokenError::MissingPath { ref path } if *path == expected));
        }
    }

    #[test]
    fn dotted_font_size_keys_keep_their_metadata() {
        let mut value = fixture_tokens().root().clone();
        value["typography"]["fontSize"]["1.5"] = json!("1.5rem");
        value["typography"]["lineHeight"]["1.5"] = json!("2rem");
        value["typography"]["letterSpacing"]["heading-1.5"] = json!("-0.1px");
        let tokens = TokenDocument::from_value(value).unwrap();

        let tree = preset_tree(&tokens).unwrap();
        assert_eq!(
            tree["theme"]["extend"]["fontSize"]["1.5"],
            json!([
                "1.5rem",
                { "lineHeight": "2rem", "letterSpacing": "-0.1px", "fontWeight": "600" }
            ])
        );
    }

    #[test]
    fn missing_radius_token_fails() {
        let mut value = fixture_tokens().root().clone();
        value["borderRadius"]
            .as_object_mut()
            .unwrap()
            .remove("3xl");
        let tokens = TokenDocument::from_value(value).unwrap();
        let err = preset_tree(&tokens).unwrap_err();
        assert!(matches!(err, TokenError::MissingPath { ref path } if path == "borderRadius.3xl"));
    }
}
