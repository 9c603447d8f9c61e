use std::fs;
use std::path::Path;
use std::time::Duration;

use super::{io_error, FontAsset, FontError, FontResult, INTER_FONTS};

const LICENSE_FILE: &str = "LICENSE.txt";
const LICENSE_TEXT: &str = "Copyright 2020 The Inter Project Authors (https://github.com/rsms/inter)

This Font Software is licensed under the SIL Open Font License, Version 1.1.

Full license: https://github.com/rsms/inter/blob/master/LICENSE.txt
";

pub trait FontFetcher {
    fn fetch(&self, url: &str) -> FontResult<Vec<u8>>;
}

/// Fetches font binaries over HTTPS with a blocking client.
pub struct HttpFontFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFontFetcher {
    pub fn new() -> FontResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| FontError::Fetch {
                url: String::new(),
                message: err.to_string(),
            })?;
        Ok(Self { client })
    }
}

impl FontFetcher for HttpFontFetcher {
    fn fetch(&self, url: &str) -> FontResult<Vec<u8>> {
        let fetch_error = |message: String| FontError::Fetch {
            url: url.to_string(),
            message,
        };
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| fetch_error(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("unexpected status {status}")));
        }
        let bytes = response.bytes().map_err(|err| fetch_error(err.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    pub downloaded: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
    pub license_written: bool,
}

/// Download the Inter catalogue into `fonts_dir`, skipping files already present.
pub fn download_fonts(fetcher: &dyn FontFetcher, fonts_dir: &Path) -> FontResult<DownloadReport> {
    download_assets(fetcher, fonts_dir, &INTER_FONTS)
}

pub fn download_assets(
    fetcher: &dyn FontFetcher,
    fonts_dir: &Path,
    assets: &[FontAsset],
) -> FontResult<DownloadReport> {
    let mut report = DownloadReport::default();

    for asset in assets {
        let dir = fonts_dir.join(asset.family_dir);
        fs::create_dir_all(&dir).map_err(io_error(&dir))?;

        let dest = dir.join(asset.file_name);
        if dest.exists() {
            tracing::info!(font = asset.file_name, "already exists");
            report.skipped.push(asset.file_name);
            continue;
        }

        tracing::info!(font = asset.file_name, "downloading");
        let bytes = fetcher.fetch(asset.url)?;
        if let Err(source) = fs::write(&dest, &bytes) {
            let _ = fs::remove_file(&dest);
            return Err(FontError::Io { path: dest, source });
        }
        tracing::info!(font = asset.file_name, bytes = bytes.len(), "downloaded");
        report.downloaded.push(asset.file_name);
    }

    let license = fonts_dir.join(LICENSE_FILE);
    if !license.exists() {
        fs::write(&license, LICENSE_TEXT).map_err(io_error(&license))?;
        report.license_written = true;
    }

    tracing::info!("all fonts ready");
    Ok(report)
}
