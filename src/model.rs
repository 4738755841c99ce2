// SPDX-License-Identifier: PMPL-1.0-or-later
//! Core data model: violations, severities, and analysis results.
//!
//! A [`Violation`] is constructed once by exactly one detector invocation and
//! never mutated afterwards (the deduplicator either keeps or drops it). The
//! whole model serializes to plain JSON so any transport built on top of the
//! engine can map fields 1:1.

use serde::{Deserialize, Serialize};

/// Severity levels for violations.
///
/// Ordered `Info < Warning < Error` so threshold comparisons read naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, does not block.
    Info,
    /// Should be addressed.
    Warning,
    /// Must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// One reported instance of a detected rule failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Stable key into the rule catalog (e.g. "img-missing-alt").
    pub rule_id: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// WCAG success-criterion identifiers (e.g. "1.1.1"). Empty only for
    /// synthetic parse-error violations.
    pub wcag_criteria: Vec<String>,
    /// Short human-readable title.
    pub title: String,
    /// Specific description, may embed matched text.
    pub description: String,
    /// One-line remediation hint.
    pub help: String,
    /// Line number (1-indexed, best-effort for formats without source maps).
    pub line: usize,
    /// Column number (1-indexed, best-effort).
    pub column: usize,
    /// Verbatim matched text, may be empty.
    pub code_snippet: String,
    /// Ordered remediation steps.
    pub fix_suggestions: Vec<String>,
    /// Free-form categorical labels (e.g. "images", "keyboard").
    pub tags: Vec<String>,
}

impl Violation {
    /// Replaces the description with a more specific one.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the source location.
    #[must_use]
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = line.max(1);
        self.column = column.max(1);
        self
    }

    /// Attaches the matched source text.
    #[must_use]
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.code_snippet = snippet.into();
        self
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {} [{}] {}",
            self.line, self.column, self.severity, self.rule_id, self.description
        )
    }
}

/// Violation counts broken down by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Total number of violations.
    pub total_violations: usize,
    /// Number of error-severity violations.
    pub errors: usize,
    /// Number of warning-severity violations.
    pub warnings: usize,
    /// Number of info-severity violations.
    pub info: usize,
}

impl Summary {
    /// Tallies a violation list.
    #[must_use]
    pub fn of(violations: &[Violation]) -> Self {
        let mut summary = Self::default();
        for v in violations {
            summary.total_violations += 1;
            match v.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Info => summary.info += 1,
            }
        }
        summary
    }

    /// Merges another summary into this one.
    pub fn merge(&mut self, other: Summary) {
        self.total_violations += other.total_violations;
        self.errors += other.errors;
        self.warnings += other.warnings;
        self.info += other.info;
    }
}

/// A single file to analyze.
///
/// `file_path` is used only for category inference and is echoed back in
/// batch output; content is the full file text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Path of the file (extension drives category classification).
    pub file_path: String,
    /// Full UTF-8 file content, any line-ending style.
    pub content: String,
}

impl AnalysisRequest {
    /// Creates a request from a path and content.
    pub fn new(file_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            content: content.into(),
        }
    }
}

/// Result of analyzing a single file.
///
/// Violations are ordered by line ascending, then rule id, for determinism.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Deduplicated, sorted violations.
    pub violations: Vec<Violation>,
    /// Counts by severity.
    pub summary: Summary,
}

impl AnalysisResult {
    /// Builds a result from a final violation list.
    #[must_use]
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        let summary = Summary::of(&violations);
        Self {
            violations,
            summary,
        }
    }

    /// Returns true if any violation is error severity.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.summary.errors > 0
    }
}

/// Per-file entry in a batch result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    /// Path echoed from the request.
    pub path: String,
    /// Deduplicated, sorted violations for this file.
    pub violations: Vec<Violation>,
    /// Counts by severity for this file.
    pub summary: Summary,
}

/// Result of analyzing a batch of files.
///
/// Files appear in original input order regardless of parallel execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    /// Per-file reports in input order.
    pub files: Vec<FileReport>,
    /// Aggregate counts across the batch.
    pub summary: Summary,
}

impl BatchResult {
    /// Builds a batch result, aggregating per-file summaries.
    #[must_use]
    pub fn from_files(files: Vec<FileReport>) -> Self {
        let mut summary = Summary::default();
        for file in &files {
            summary.merge(file.summary);
        }
        Self { files, summary }
    }

    /// Returns true if any file has an error-severity violation.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.summary.errors > 0
    }

    /// Total violations across the batch.
    #[must_use]
    pub fn total_violations(&self) -> usize {
        self.summary.total_violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(severity: Severity) -> Violation {
        Violation {
            rule_id: "img-missing-alt".to_string(),
            severity,
            wcag_criteria: vec!["1.1.1".to_string()],
            title: "Image missing alt text".to_string(),
            description: "test".to_string(),
            help: "Add an alt attribute".to_string(),
            line: 3,
            column: 1,
            code_snippet: String::new(),
            fix_suggestions: vec![],
            tags: vec!["images".to_string()],
        }
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }

    #[test]
    fn severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Error).unwrap();
        assert_eq!(json, "\"error\"");
    }

    #[test]
    fn severity_parses_from_str() {
        assert_eq!("error".parse::<Severity>().unwrap(), Severity::Error);
        assert_eq!("WARN".parse::<Severity>().unwrap(), Severity::Warning);
        assert!("fatal".parse::<Severity>().is_err());
    }

    #[test]
    fn violation_serializes_camel_case() {
        let v = make_violation(Severity::Error);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["ruleId"], "img-missing-alt");
        assert_eq!(json["wcagCriteria"][0], "1.1.1");
        assert_eq!(json["codeSnippet"], "");
        assert!(json["fixSuggestions"].is_array());
    }

    #[test]
    fn violation_at_clamps_to_one() {
        let v = make_violation(Severity::Error).at(0, 0);
        assert_eq!(v.line, 1);
        assert_eq!(v.column, 1);
    }

    #[test]
    fn summary_counts_by_severity() {
        let violations = vec![
            make_violation(Severity::Error),
            make_violation(Severity::Error),
            make_violation(Severity::Warning),
            make_violation(Severity::Info),
        ];
        let summary = Summary::of(&violations);
        assert_eq!(summary.total_violations, 4);
        assert_eq!(summary.errors, 2);
        assert_eq!(summary.warnings, 1);
        assert_eq!(summary.info, 1);
    }

    #[test]
    fn batch_result_aggregates() {
        let files = vec![
            FileReport {
                path: "a.html".to_string(),
                violations: vec![make_violation(Severity::Error)],
                summary: Summary::of(&[make_violation(Severity::Error)]),
            },
            FileReport {
                path: "b.css".to_string(),
                violations: vec![],
                summary: Summary::default(),
            },
        ];
        let batch = BatchResult::from_files(files);
        assert_eq!(batch.summary.total_violations, 1);
        assert_eq!(batch.summary.errors, 1);
        assert!(batch.has_errors());
    }
}
