use std::fs;
use std::path::{Path, PathBuf};

use super::{io_error, FontResult};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub copied_files: Vec<PathBuf>,
    pub source_missing: bool,
}

/// Mirror `source` into `dest`, keeping subdirectories.
///
/// A missing `source` is a soft failure: fonts are fetched by a separate
/// step, so this only warns and returns an empty report.
pub fn stage_fonts(source: &Path, dest: &Path) -> FontResult<StageReport> {
    let mut report = StageReport::default();
    if !source.is_dir() {
        tracing::warn!(
            source = %source.display(),
            "fonts directory not found; run download-fonts first"
        );
        report.source_missing = true;
        return Ok(report);
    }

    tracing::info!(from = %source.display(), to = %dest.display(), "copying fonts");
    copy_tree(source, dest, &mut report)?;
    tracing::info!(files = report.copied_files.len(), "staged fonts");
    Ok(report)
}

fn copy_tree(source: &Path, dest: &Path, report: &mut StageReport) -> FontResult<()> {
    fs::create_dir_all(dest).map_err(io_error(dest))?;

    let mut entries = fs::read_dir(source)
        .map_err(io_error(source))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_error(source))?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let from = entry.path();
        let to = dest.join(entry.file_name());
        let file_type = entry.file_type().map_err(io_error(&from))?;
        if file_type.is_dir() {
            copy_tree(&from, &to, report)?;
        } else {
            fs::copy(&from, &to).map_err(io_error(&from))?;
            tracing::debug!(file = %to.display(), "copied font file");
            report.copied_files.push(to);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::test_support::capture_logs;

    fn fixture_root() -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let pid = std::process::id();
        path.push(format!("umbrella-stage-{pid}-{nanos}"));
        path
    }

    fn with_temp_root<F: FnOnce(&Path)>(f: F) {
        let root = fixture_root();
        fs::create_dir_all(&root).unwrap();
        f(&root);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn missing_source_is_a_soft_failure() {
        with_temp_root(|root| {
            let (result, logs) =
                capture_logs(|| stage_fonts(&root.join("fonts"), &root.join("dist/fonts")));
            let report = result.unwrap();
            assert!(report.source_missing);
            assert!(logs.contains("WARN"));
            assert!(logs.contains("fonts directory not found; run download-fonts first"));
            assert!(report.copied_files.is_empty());
            assert!(!root.join("dist/fonts").exists());
        });
    }

    #[test]
    fn copies_nested_tree() {
        with_temp_root(|root| {
            let source = root.join("fonts");
            fs::create_dir_all(source.join("inter")).unwrap();
            fs::write(source.join("LICENSE.txt"), "OFL").unwrap();
            fs::write(source.join("inter/Inter-Bold.woff2"), [0u8, 1, 2]).unwrap();

            let dest = root.join("dist/fonts");
            let report = stage_fonts(&source, &dest).unwrap();

            assert!(!report.source_missing);
            assert_eq!(report.copied_files.len(), 2);
            assert_eq!(fs::read(dest.join("inter/Inter-Bold.woff2")).unwrap(), [0u8, 1, 2]);
            assert_eq!(fs::read_to_string(dest.join("LICENSE.txt")).unwrap(), "OFL");
        });
    }

    #[test]
    fn restaging_overwrites_existing_files() {
        with_temp_root(|root| {
            let source = root.join("fonts");
            fs::create_dir_all(&source).unwrap();
            let dest = root.join("dist/fonts");
            fs::create_dir_all(&dest).unwrap();
            fs::write(dest.join("a.woff2"), "stale").unwrap();
            fs::write(source.join("a.woff2"), "fresh").unwrap();

            stage_fonts(&source, &dest).unwrap();
            assert_eq!(fs::read_to_string(dest.join("a.woff2")).unwrap(), "fresh");
        });
    }
}
