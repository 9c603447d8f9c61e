use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::fonts::DEFAULT_FONTS_DIR;
use crate::mail::Campaign;
use crate::tokens::DEFAULT_TOKENS_PATH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "umbrella-brand";
const APP_CONFIG_FILE: &str = "config.json";
pub const DEFAULT_DIST_DIR: &str = "dist";

/// Build paths, all relative to the working directory unless absolute.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub tokens_path: PathBuf,
    pub dist_dir: PathBuf,
    pub fonts_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            tokens_path: PathBuf::from(DEFAULT_TOKENS_PATH),
            dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
            fonts_dir: PathBuf::from(DEFAULT_FONTS_DIR),
        }
    }
}

/// Mail overrides; anything unset keeps the campaign defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MailConfig {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub app_url: Option<String>,
    #[serde(default)]
    pub test_recipient: Option<String>,
    #[serde(default)]
    pub send_delay_ms: Option<u64>,
}

impl MailConfig {
    pub fn apply_to(&self, mut campaign: Campaign) -> Campaign {
        if let Some(ref from) = self.from {
            campaign.from = from.clone();
        }
        if let Some(ref subject) = self.subject {
            campaign.subject = subject.clone();
        }
        if let Some(ref app_url) = self.app_url {
            campaign.app_url = app_url.clone();
        }
        if let Some(delay_ms) = self.send_delay_ms {
            campaign.delay = Duration::from_millis(delay_ms);
        }
        campaign
    }
}

/// Settings from `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BrandConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub mail: MailConfig,
}

pub fn load_brand_config() -> BrandConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_brand_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_brand_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> BrandConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return BrandConfig::default(),
    };
    if !path.exists() {
        return BrandConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            BrandConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            BrandConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::test_support::capture_logs;
    use std::fs;

    fn fixture_root() -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let pid = std::process::id();
        path.push(format!("umbrella-config-{pid}-{nanos}"));
        path
    }

    fn with_temp_root<F: FnOnce(&Path)>(f: F) {
        let root = fixture_root();
        fs::create_dir_all(&root).unwrap();
        f(&root);
        let _ = fs::remove_dir_all(&root);
    }

    fn write_config(root: &Path, contents: &str) {
        let dir = root.join(APP_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(APP_CONFIG_FILE), contents).unwrap();
    }

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            "umbrella-brand",
            "config.json",
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(
            path,
            PathBuf::from("/tmp/config-root/umbrella-brand/config.json")
        );
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path(
            "umbrella-brand",
            "config.json",
            None,
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/home/.config/umbrella-brand/config.json"));
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path("umbrella-brand", "config.json", None, None).unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }

    #[test]
    fn missing_config_uses_defaults() {
        with_temp_root(|root| {
            let config = load_brand_config_with(Some(root), None);
            assert_eq!(config, BrandConfig::default());
            assert_eq!(config.paths.tokens_path, PathBuf::from("tokens/design-tokens.json"));
            assert_eq!(config.paths.dist_dir, PathBuf::from("dist"));
        });
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        with_temp_root(|root| {
            write_config(
                root,
                r#"{"paths": {"dist_dir": "out"}, "mail": {"send_delay_ms": 10}}"#,
            );
            let config = load_brand_config_with(Some(root), None);
            assert_eq!(config.paths.dist_dir, PathBuf::from("out"));
            assert_eq!(config.paths.fonts_dir, PathBuf::from("fonts"));

            let campaign = config.mail.apply_to(Campaign::default());
            assert_eq!(campaign.delay, Duration::from_millis(10));
            assert_eq!(campaign.from, Campaign::default().from);
        });
    }

    #[test]
    fn unparsable_config_falls_back_to_defaults() {
        with_temp_root(|root| {
            write_config(root, "{ not json");
            let (config, logs) = capture_logs(|| load_brand_config_with(Some(root), None));
            assert_eq!(config, BrandConfig::default());
            assert!(logs.contains("WARN"));
            assert!(logs.contains("failed to parse config.json; using defaults"));
        });
    }
}
