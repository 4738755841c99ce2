// SPDX-License-Identifier: PMPL-1.0-or-later
//! The analysis engine: classification, detector dispatch, merging, and
//! filtering.
//!
//! Dispatch for one file walks a fixed sequence: classify, pattern pass,
//! structural pass (only when the complexity classifier demands it),
//! contrast pass (stylesheets only), merge, dedupe. Every step is pure and
//! synchronous over the in-memory content, so the terminal state is always
//! reached. A detector failure is caught at the dispatcher boundary,
//! recorded as one synthetic parse-error violation, and never aborts the
//! rest of the file or the batch.

use crate::category::{classify, FileCategory};
use crate::catalog;
use crate::complexity::needs_structural_pass;
use crate::contrast;
use crate::dedup::{dedupe, DEFAULT_PROXIMITY_WINDOW};
use crate::detectors::{pattern_detectors, structural_detectors};
use crate::model::{
    AnalysisRequest, AnalysisResult, BatchResult, FileReport, Severity, Violation,
};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use tracing::{debug, info, warn};

/// Which rules run and at which severity.
///
/// The predicate and overrides are applied post-detection: disabled rules
/// are dropped from the merged list, and overridden severities replace the
/// catalog default on each surviving violation. Loading this from any kind
/// of config file is the caller's business, not the engine's.
#[derive(Default)]
pub struct RuleFilter {
    disabled: HashSet<String>,
    predicate: Option<Box<dyn Fn(&str) -> bool + Send + Sync>>,
    overrides: HashMap<String, Severity>,
}

impl RuleFilter {
    /// A filter with every rule enabled at catalog severity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables a single rule by id.
    #[must_use]
    pub fn disable(mut self, rule_id: impl Into<String>) -> Self {
        self.disabled.insert(rule_id.into());
        self
    }

    /// Disables several rules by id.
    #[must_use]
    pub fn disable_all<I, S>(mut self, rule_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disabled.extend(rule_ids.into_iter().map(Into::into));
        self
    }

    /// Installs an arbitrary enabled-predicate. Combined with the disable
    /// set: a rule runs only if the predicate accepts it AND it is not in
    /// the disable set.
    #[must_use]
    pub fn with_predicate(mut self, predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Overrides the severity of a rule's violations.
    #[must_use]
    pub fn override_severity(mut self, rule_id: impl Into<String>, severity: Severity) -> Self {
        self.overrides.insert(rule_id.into(), severity);
        self
    }

    /// Whether violations of this rule may appear in output.
    #[must_use]
    pub fn is_enabled(&self, rule_id: &str) -> bool {
        if self.disabled.contains(rule_id) {
            return false;
        }
        self.predicate.as_ref().map_or(true, |p| p(rule_id))
    }

    /// The overridden severity for a rule, if any.
    #[must_use]
    pub fn severity_override(&self, rule_id: &str) -> Option<Severity> {
        self.overrides.get(rule_id).copied()
    }
}

/// Tunable engine options.
pub struct EngineOptions {
    /// Rule filter applied to every analysis.
    pub filter: RuleFilter,
    /// Line-proximity window for duplicate collapsing.
    pub dedup_window: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            filter: RuleFilter::new(),
            dedup_window: DEFAULT_PROXIMITY_WINDOW,
        }
    }
}

/// The violation-detection engine.
///
/// Stateless apart from its options: detectors are pure functions over
/// in-memory strings and the compiled pattern tables are read-only after
/// initialization, so one engine can serve concurrent batch analysis
/// without locks.
#[derive(Default)]
pub struct Engine {
    options: EngineOptions,
}

impl Engine {
    /// An engine with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine with explicit options.
    #[must_use]
    pub fn with_options(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Analyzes a single file.
    #[must_use]
    pub fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult {
        let category = classify(Path::new(&request.file_path));
        debug!(file = %request.file_path, %category, "classified");

        if category == FileCategory::Unsupported {
            return AnalysisResult::default();
        }

        let content = request.content.as_str();
        let mut collected: Vec<Violation> = Vec::new();

        // pattern pass: always runs for the category
        for detector in pattern_detectors(category) {
            collected.extend(run_isolated(detector.name(), category, || {
                detector.check(content)
            }));
        }

        // structural pass: markup/script only, gated on content complexity
        let structural = structural_detectors(category);
        if !structural.is_empty() && needs_structural_pass(content) {
            debug!(file = %request.file_path, "running structural pass");
            for detector in structural {
                collected.extend(run_isolated(detector.name(), category, || {
                    detector.check(content)
                }));
            }
        }

        // contrast pass: stylesheets only
        if category == FileCategory::Stylesheet {
            collected.extend(run_isolated("contrast", category, || {
                contrast::evaluate(content)
            }));
        }

        // merge: filter, override, dedupe, sort
        let filter = &self.options.filter;
        collected.retain(|v| filter.is_enabled(&v.rule_id));
        for violation in &mut collected {
            if let Some(severity) = filter.severity_override(&violation.rule_id) {
                violation.severity = severity;
            }
        }

        let deduped = dedupe(collected, self.options.dedup_window);
        AnalysisResult::from_violations(deduped)
    }

    /// Analyzes a batch of files in parallel.
    ///
    /// Files are analyzed on rayon's worker pool but reported in original
    /// input order, with per-file and aggregate summaries.
    #[must_use]
    pub fn analyze_batch(&self, requests: &[AnalysisRequest]) -> BatchResult {
        info!(files = requests.len(), "starting batch analysis");

        let files: Vec<FileReport> = requests
            .par_iter()
            .map(|request| {
                let result = self.analyze(request);
                FileReport {
                    path: request.file_path.clone(),
                    violations: result.violations,
                    summary: result.summary,
                }
            })
            .collect();

        let batch = BatchResult::from_files(files);
        info!(
            violations = batch.summary.total_violations,
            errors = batch.summary.errors,
            "batch analysis complete"
        );
        batch
    }
}

/// Runs one detector with panic isolation.
///
/// A panicking detector yields a single synthetic `<category>-parse-error`
/// violation carrying the panic message; the remaining detectors for the
/// file still run.
fn run_isolated<F>(name: &str, category: FileCategory, check: F) -> Vec<Violation>
where
    F: FnOnce() -> Vec<Violation>,
{
    match catch_unwind(AssertUnwindSafe(check)) {
        Ok(violations) => violations,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "detector panicked".to_string());
            warn!(detector = name, %message, "detector failed; recording parse error");
            catalog::parse_error_rule(category)
                .map(|rule| vec![rule.violation(format!("{name} detector failed: {message}"))])
                .unwrap_or_default()
        }
    }
}
