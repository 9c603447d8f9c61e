use super::Artifact;
use crate::fonts::{FONT_FAMILY, INTER_FONTS};

pub const FILE_NAME: &str = "fonts.css";

pub fn fonts_css() -> Artifact {
    let mut css = String::from(
        "/**
 * Inter Font Family
 * License: SIL Open Font License 1.1
 * Generated from umbrella-brand
 */
",
    );

    for font in &INTER_FONTS {
        css.push_str(&format!(
            "
@font-face {{
  font-family: '{family}';
  src: url('./fonts/{path}') format('woff2');
  font-weight: {weight};
  font-style: normal;
  font-display: swap;
}}
",
            family = FONT_FAMILY,
            path = font.relative_path(),
            weight = font.weight,
        ));
    }

    Artifact::new(FILE_NAME, css)
}
