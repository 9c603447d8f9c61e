use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub mod download;
pub mod stage;

pub use download::{download_fonts, DownloadReport, FontFetcher, HttpFontFetcher};
pub use stage::{stage_fonts, StageReport};

pub const DEFAULT_FONTS_DIR: &str = "fonts";
pub const FONT_FAMILY: &str = "Inter";

pub type FontResult<T> = std::result::Result<T, FontError>;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("font io error at {path}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },
}

/// A downloadable font binary and where it lives under the fonts tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontAsset {
    pub file_name: &'static str,
    pub family_dir: &'static str,
    pub weight: u16,
    pub url: &'static str,
}

impl FontAsset {
    /// Path relative to the fonts root, e.g. `inter/Inter-Bold.woff2`.
    pub fn relative_path(&self) -> String {
        format!("{}/{}", self.family_dir, self.file_name)
    }
}

pub const INTER_FONTS: [FontAsset; 4] = [
    FontAsset {
        file_name: "Inter-Regular.woff2",
        family_dir: "inter",
        weight: 400,
        url: "https://fonts.gstatic.com/s/inter/v13/UcCO3FwrK3iLTeHuS_fvQtMwCp50KnMw2boKoduKmMEVuLyfAZ9hiA.woff2",
    },
    FontAsset {
        file_name: "Inter-Medium.woff2",
        family_dir: "inter",
        weight: 500,
        url: "https://fonts.gstatic.com/s/inter/v13/UcCO3FwrK3iLTeHuS_fvQtMwCp50KnMw2boKoduKmMEVuI6fAZ9hiA.woff2",
    },
    FontAsset {
        file_name: "Inter-SemiBold.woff2",
        family_dir: "inter",
        weight: 600,
        url: "https://fonts.gstatic.com/s/inter/v13/UcCO3FwrK3iLTeHuS_fvQtMwCp50KnMw2boKoduKmMEVuGKYAZ9hiA.woff2",
    },
    FontAsset {
        file_name: "Inter-Bold.woff2",
        family_dir: "inter",
        weight: 700,
        url: "https://fonts.gstatic.com/s/inter/v13/UcCO3FwrK3iLTeHuS_fvQtMwCp50KnMw2boKoduKmMEVuFuYAZ9hiA.woff2",
    },
];

pub(crate) fn io_error(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> FontError {
    let path = path.into();
    move |source| FontError::Io { path, source }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_covers_four_ascending_weights() {
        let weights: Vec<u16> = INTER_FONTS.iter().map(|f| f.weight).collect();
        assert_eq!(weights, [400, 500, 600, 700]);
        assert!(INTER_FONTS
            .iter()
            .all(|f| f.url.starts_with("https://fonts.gstatic.com/")));
    }

    #[test]
    fn relative_path_joins_family_dir() {
        assert_eq!(INTER_FONTS[3].relative_path(), "inter/Inter-Bold.woff2");
    }
}
