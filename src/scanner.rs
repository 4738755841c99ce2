// SPDX-License-Identifier: PMPL-1.0-or-later
//! Directory scanner: walks a tree, gathers analyzable files, and hands
//! them to the engine as one batch.

use crate::category::{classify, FileCategory};
use crate::engine::Engine;
use crate::error::{Result, ScanError};
use crate::model::{AnalysisRequest, BatchResult};
use std::path::Path;
use tracing::info;
use walkdir::WalkDir;

/// Directories that never contain project source worth scanning.
const SKIP_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "target",
    "dist",
    "build",
    "_build",
    "vendor",
    ".next",
    ".nuxt",
    "coverage",
];

/// Scans a directory tree and analyzes every supported file.
///
/// Files are gathered in traversal order (which is what the batch result
/// reports them in) and analyzed on the engine's parallel batch path.
/// Unreadable files are skipped, not fatal.
pub fn scan_directory(dir: &Path, engine: &Engine) -> Result<BatchResult> {
    let mut requests = Vec::new();

    info!(dir = %dir.display(), "scanning directory");

    for entry in WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_str().unwrap_or("");
            if e.file_type().is_dir() {
                return !SKIP_DIRS.contains(&name) && !name.starts_with('.');
            }
            true
        })
    {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                info!(%err, "skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if classify(path) == FileCategory::Unsupported {
            continue;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => {
                requests.push(AnalysisRequest::new(path.display().to_string(), content));
            }
            Err(err) => {
                info!(path = %path.display(), %err, "skipping unreadable file");
            }
        }
    }

    info!(files = requests.len(), "collected files for analysis");
    Ok(engine.analyze_batch(&requests))
}

/// Analyzes a single file from disk.
pub fn scan_file(path: &Path, engine: &Engine) -> Result<BatchResult> {
    let content = std::fs::read_to_string(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let requests = vec![AnalysisRequest::new(path.display().to_string(), content)];
    Ok(engine.analyze_batch(&requests))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_a_tree_and_skips_excluded_dirs() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("page.html"), r#"<img src="x.png">"#).unwrap();
        std::fs::write(dir.path().join("style.css"), ".a:focus { outline: none; }").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not scanned").unwrap();

        let skipped = dir.path().join("node_modules");
        std::fs::create_dir(&skipped).unwrap();
        std::fs::write(skipped.join("dep.html"), r#"<img src="y.png">"#).unwrap();

        let batch = scan_directory(dir.path(), &Engine::new()).expect("scan");
        assert_eq!(batch.files.len(), 2);
        assert!(batch.summary.total_violations >= 2);
        assert!(batch.files.iter().all(|f| !f.path.contains("node_modules")));
    }

    #[test]
    fn scanning_missing_directory_is_empty_not_fatal() {
        let batch = scan_directory(Path::new("/nonexistent/a11ylint-test"), &Engine::new())
            .expect("scan should not fail");
        assert!(batch.files.is_empty());
    }

    #[test]
    fn scan_file_reads_and_analyzes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("page.html");
        std::fs::write(&file, r#"<img src="x.png">"#).unwrap();

        let batch = scan_file(&file, &Engine::new()).expect("scan");
        assert_eq!(batch.files.len(), 1);
        assert_eq!(batch.summary.errors, 1);
    }

    #[test]
    fn scan_file_missing_is_an_error() {
        let result = scan_file(Path::new("/nonexistent/x.html"), &Engine::new());
        assert!(matches!(result, Err(ScanError::Io { .. })));
    }
}
