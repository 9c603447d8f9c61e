use super::{Artifact, EmitResult};
use crate::tokens::{TokenDocument, TokenError};

pub const FILE_NAME: &str = "tokens.css";

const FONT_FAMILY_PATH: &str = "typography.fontFamily.sans";

/// A themed custom property and the token paths feeding each mode.
#[derive(Debug, Clone, Copy)]
pub struct SemanticVar {
    pub name: &'static str,
    pub light: &'static str,
    pub dark: &'static str,
}

#[derive(Debug, Clone, Copy)]
struct VarGroup {
    comment: &'static str,
    vars: &'static [SemanticVar],
}

const fn var(name: &'static str, light: &'static str, dark: &'static str) -> SemanticVar {
    SemanticVar { name, light, dark }
}

const LIGHT_TEXT: &str = "colors.light.text.primary";
const DARK_TEXT: &str = "colors.dark.text.primary";

const SEMANTIC_GROUPS: &[VarGroup] = &[
    VarGroup {
        comment: "Brand - Umbrella Purple #9370DB (HSL for opacity)",
        vars: &[
            var("primary", "colors.brand.purple.DEFAULT", "colors.brand.purple.neon"),
            var("primary-foreground", LIGHT_TEXT, DARK_TEXT),
        ],
    },
    VarGroup {
        comment: "Backgrounds - Light Mode (Default)",
        vars: &[
            var("background", "colors.light.background.primary", "colors.dark.background.primary"),
            var("foreground", LIGHT_TEXT, DARK_TEXT),
        ],
    },
    VarGroup {
        comment: "Cards",
        vars: &[
            var("card", "colors.light.background.primary", "colors.dark.background.secondary"),
            var("card-foreground", LIGHT_TEXT, DARK_TEXT),
        ],
    },
    VarGroup {
        comment: "Popovers",
        vars: &[
            var("popover", "colors.light.background.primary", "colors.dark.background.tertiary"),
            var("popover-foreground", LIGHT_TEXT, DARK_TEXT),
        ],
    },
    VarGroup {
        comment: "Secondary",
        vars: &[
            var(
                "secondary",
                "colors.light.background.secondary",
                "colors.dark.background.secondary",
            ),
            var("secondary-foreground", LIGHT_TEXT, DARK_TEXT),
        ],
    },
    VarGroup {
        comment: "Muted",
        vars: &[
            var("muted", "colors.light.background.tertiary", "colors.dark.background.tertiary"),
            var("muted-foreground", "colors.light.text.secondary", "colors.dark.text.secondary"),
        ],
    },
    VarGroup {
        comment: "Accent - Purple variant",
        vars: &[
            var("accent", "colors.brand.purple.400", "colors.brand.purple.600"),
            var("accent-foreground", LIGHT_TEXT, DARK_TEXT),
        ],
    },
    VarGroup {
        comment: "Destructive",
        vars: &[
            var("destructive", "colors.semantic.error.DEFAULT", "colors.semantic.error.DEFAULT"),
            var("destructive-foreground", LIGHT_TEXT, DARK_TEXT),
        ],
    },
    VarGroup {
        comment: "Borders",
        vars: &[
            var("border", "colors.light.border.primary", "colors.dark.border.primary"),
            var("input", "colors.light.border.primary", "colors.dark.border.primary"),
            var("ring", "colors.brand.purple.DEFAULT", "colors.brand.purple.neon"),
        ],
    },
];

/// Every themed property, in declaration order.
pub fn semantic_vars() -> impl Iterator<Item = &'static SemanticVar> {
    SEMANTIC_GROUPS.iter().flat_map(|group| group.vars.iter())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRole {
    Heading,
    Copy,
    Button,
}

impl TypeRole {
    fn class_prefix(self) -> &'static str {
        match self {
            Self::Heading => "text-heading",
            Self::Copy => "text-copy",
            Self::Button => "text-button",
        }
    }

    fn font_weight(self) -> u16 {
        match self {
            Self::Heading | Self::Button => 600,
            Self::Copy => 400,
        }
    }

    fn comment(self) -> &'static str {
        match self {
            Self::Heading => "Headings",
            Self::Copy => "Copy (Body Text)",
            Self::Button => "Buttons",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeStep {
    pub size: u16,
    pub line_height: u16,
    pub letter_spacing: Option<&'static str>,
}

const fn step(size: u16, line_height: u16, letter_spacing: Option<&'static str>) -> TypeStep {
    TypeStep {
        size,
        line_height,
        letter_spacing,
    }
}

pub const HEADING_SCALE: [TypeStep; 9] = [
    step(88, 88, Some("-4.0px")),
    step(72, 72, Some("-3.6px")),
    step(56, 60, Some("-2.8px")),
    step(48, 56, Some("-2.0px")),
    step(40, 48, Some("-1.6px")),
    step(32, 40, Some("-1.0px")),
    step(24, 32, Some("-0.5px")),
    step(20, 28, Some("-0.5px")),
    step(16, 24, Some("0")),
];

pub const COPY_SCALE: [TypeStep; 6] = [
    step(24, 36, None),
    step(20, 30, None),
    step(18, 28, None),
    step(16, 24, None),
    step(14, 20, None),
    step(13, 20, None),
];

pub const BUTTON_SCALE: [TypeStep; 3] =
    [step(16, 20, None), step(14, 18, None), step(12, 16, None)];

pub fn tokens_css(tokens: &TokenDocument) -> EmitResult<Artifact> {
    let mut css = String::from(
        "/**
 * Umbrella Design System - CSS Custom Properties
 * Generated from design-tokens.json
 * HSL format for Tailwind opacity modifiers
 * Light mode is default
 */

@layer base {
  :root {
",
    );

    for group in SEMANTIC_GROUPS {
        css.push_str(&format!("    /* {} */\n", group.comment));
        for var in group.vars {
            css.push_str(&format!("    --{}: {};\n", var.name, tokens.hsl_at(var.light)?));
        }
        css.push('\n');
    }

    css.push_str("    /* Purple Palette (hex) */\n");
    for (key, value) in tokens.object_at("colors.brand.purple")? {
        let hex = value.as_str().ok_or_else(|| TokenError::WrongType {
            path: format!("colors.brand.purple.{key}"),
            expected: "string",
        })?;
        css.push_str(&format!("    --purple-{key}: {hex};\n"));
    }
    css.push('\n');

    css.push_str(&format!(
        "    /* Border Radius */
    --radius: {radius};

  }}

  .dark {{
    /* Dark Mode Colors */
",
        radius = tokens.str_at("borderRadius.lg")?,
    ));
    for var in semantic_vars() {
        css.push_str(&format!("    --{}: {};\n", var.name, tokens.hsl_at(var.dark)?));
    }

    css.push_str(
        "  }
}

@layer base {
  * {
    @apply border-border;
  }
  body {
    @apply bg-background text-foreground;
    font-feature-settings: \"rlig\" 1, \"calt\" 1;
  }
}

/* ============================================
   UMBRELLA TYPOGRAPHY UTILITIES
   Inter font with precise sizing
   ============================================ */

",
    );

    let family = tokens.str_at(FONT_FAMILY_PATH)?;
    for (role, scale) in [
        (TypeRole::Heading, &HEADING_SCALE[..]),
        (TypeRole::Copy, &COPY_SCALE[..]),
        (TypeRole::Button, &BUTTON_SCALE[..]),
    ] {
        css.push_str(&format!("/* {} */\n", role.comment()));
        for step in scale {
            push_type_class(&mut css, role, step, family);
        }
    }

    Ok(Artifact::new(FILE_NAME, css))
}

fn push_type_class(css: &mut String, role: TypeRole, step: &TypeStep, family: &str) {
    css.push_str(&format!(
        ".{prefix}-{size} {{
  font-family: {family};
  font-size: {size}px;
  font-weight: {weight};
  line-height: {line_height}px;
",
        prefix = role.class_prefix(),
        size = step.size,
        weight = role.font_weight(),
        line_height = step.line_height,
    ));
    if let Some(spacing) = step.letter_spacing {
        css.push_str(&format!("  letter-spacing: {spacing};\n"));
    }
    css.push_str("}\n\n");
}
