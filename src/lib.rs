// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11ylint - static WCAG 2.2 AA violation detection
//!
//! Scans markup, stylesheets, and script source for accessibility
//! violations and reports them with file locations, severities, WCAG
//! criterion mappings, and remediation guidance. Detection is entirely
//! static: the engine reads text, never a rendered DOM, and never mutates
//! source.
//!
//! ## Architecture
//!
//! - **Pattern detectors** run unconditionally per file category over raw
//!   text or a tolerant HTML tree
//! - **Structural detectors** reason about attribute relationships on one
//!   element and run only when the complexity classifier flags the content
//! - **Contrast evaluator** computes WCAG luminance ratios for color pairs
//!   in stylesheet rule blocks
//! - The **engine** dispatches the passes, isolates detector failures, and
//!   merges everything into one deduplicated, ordered violation list
//!
//! ## Example
//!
//! ```
//! use a11ylint::engine::Engine;
//! use a11ylint::model::AnalysisRequest;
//!
//! let engine = Engine::new();
//! let result = engine.analyze(&AnalysisRequest::new(
//!     "page.html",
//!     r#"<img src="logo.png" />"#,
//! ));
//! assert_eq!(result.violations[0].rule_id, "img-missing-alt");
//! ```

pub mod catalog;
pub mod category;
pub mod complexity;
pub mod contrast;
pub mod dedup;
pub mod detectors;
pub mod engine;
pub mod error;
pub mod location;
pub mod model;
pub mod report;
pub mod scanner;

pub use engine::{Engine, EngineOptions, RuleFilter};
pub use model::{AnalysisRequest, AnalysisResult, BatchResult, Severity, Summary, Violation};
