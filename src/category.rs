// SPDX-License-Identifier: PMPL-1.0-or-later
//! File-path to processing-category classification.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Processing category a file belongs to, keyed purely on extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// HTML documents and fragments (`.html`, `.htm`).
    Markup,
    /// CSS and SCSS stylesheets (`.css`, `.scss`).
    Stylesheet,
    /// JavaScript/TypeScript source, including JSX/TSX components.
    Script,
    /// Anything else; analysis short-circuits to an empty result.
    Unsupported,
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileCategory::Markup => write!(f, "markup"),
            FileCategory::Stylesheet => write!(f, "stylesheet"),
            FileCategory::Script => write!(f, "script"),
            FileCategory::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// Classifies a file path into a processing category.
#[must_use]
pub fn classify(path: &Path) -> FileCategory {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "html" | "htm" => FileCategory::Markup,
        "css" | "scss" => FileCategory::Stylesheet,
        "js" | "jsx" | "ts" | "tsx" => FileCategory::Script,
        _ => FileCategory::Unsupported,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_markup() {
        assert_eq!(classify(Path::new("index.html")), FileCategory::Markup);
        assert_eq!(classify(Path::new("page.HTM")), FileCategory::Markup);
    }

    #[test]
    fn classifies_stylesheet() {
        assert_eq!(classify(Path::new("app.css")), FileCategory::Stylesheet);
        assert_eq!(classify(Path::new("theme.scss")), FileCategory::Stylesheet);
    }

    #[test]
    fn classifies_script() {
        assert_eq!(classify(Path::new("main.js")), FileCategory::Script);
        assert_eq!(classify(Path::new("App.jsx")), FileCategory::Script);
        assert_eq!(classify(Path::new("util.ts")), FileCategory::Script);
        assert_eq!(classify(Path::new("View.tsx")), FileCategory::Script);
    }

    #[test]
    fn everything_else_is_unsupported() {
        assert_eq!(classify(Path::new("README.md")), FileCategory::Unsupported);
        assert_eq!(classify(Path::new("photo.png")), FileCategory::Unsupported);
        assert_eq!(classify(Path::new("Makefile")), FileCategory::Unsupported);
        assert_eq!(classify(Path::new("noext")), FileCategory::Unsupported);
    }
}
