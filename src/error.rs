// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for the scanning layer.
//!
//! Analysis itself is infallible (detector failures become synthetic
//! violations), so errors only arise while discovering and reading files.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from file discovery and reading.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A file or directory could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Convenience alias for scan results.
pub type Result<T> = std::result::Result<T, ScanError>;
