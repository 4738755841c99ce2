// SPDX-License-Identifier: PMPL-1.0-or-later
//! Detector trait and per-category registries.
//!
//! Detectors are stateless unit structs; the registries are static slices
//! built at compile time, so nothing is mutated after startup and the same
//! detector set can be shared across worker threads.

pub mod markup;
pub mod script;
pub mod structural;
pub mod stylesheet;

use crate::category::FileCategory;
use crate::model::Violation;

/// A stateless check over raw file content.
///
/// Detectors must tolerate empty input (empty result) and must never assume
/// well-formed syntax; a detector that cannot make sense of its input
/// returns an empty result rather than failing the pass. A panicking
/// detector is caught at the dispatcher boundary and converted into a
/// synthetic parse-error violation.
pub trait Detector: Send + Sync {
    /// Short detector name, used in logs.
    fn name(&self) -> &'static str;

    /// Runs the check and returns any violations found.
    fn check(&self, content: &str) -> Vec<Violation>;
}

static MARKUP_PATTERN: &[&dyn Detector] = &[
    &markup::AltTextDetector,
    &markup::ClickHandlerDetector,
    &markup::EmptyInteractiveDetector,
    &markup::FormLabelDetector,
    &markup::LinkTextDetector,
    &markup::DocumentStructureDetector,
];

static STYLESHEET_PATTERN: &[&dyn Detector] = &[
    &stylesheet::FocusStyleDetector,
    &stylesheet::TypographyDetector,
    &stylesheet::InteractiveSizingDetector,
    &stylesheet::VisibilityDetector,
];

static SCRIPT_PATTERN: &[&dyn Detector] = &[
    &script::ConstructedDomDetector,
    &script::FocusSuppressionDetector,
    &script::TabIndexDetector,
    &script::AutoplayDetector,
];

static MARKUP_STRUCTURAL: &[&dyn Detector] = &[
    &structural::RoleVocabularyDetector,
    &structural::AriaConflictDetector,
    &structural::KeyboardPairingDetector,
];

static SCRIPT_STRUCTURAL: &[&dyn Detector] = &[
    &structural::RoleVocabularyDetector,
    &structural::AriaConflictDetector,
    &structural::KeyboardPairingDetector,
    &structural::LiveRegionDetector,
];

/// Pattern detectors for a category; these always run.
#[must_use]
pub fn pattern_detectors(category: FileCategory) -> &'static [&'static dyn Detector] {
    match category {
        FileCategory::Markup => MARKUP_PATTERN,
        FileCategory::Stylesheet => STYLESHEET_PATTERN,
        FileCategory::Script => SCRIPT_PATTERN,
        FileCategory::Unsupported => &[],
    }
}

/// Structural detectors for a category; gated by the complexity classifier.
/// Stylesheets have no structural pass.
#[must_use]
pub fn structural_detectors(category: FileCategory) -> &'static [&'static dyn Detector] {
    match category {
        FileCategory::Markup => MARKUP_STRUCTURAL,
        FileCategory::Script => SCRIPT_STRUCTURAL,
        FileCategory::Stylesheet | FileCategory::Unsupported => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn every_category_has_pattern_detectors() {
        assert!(!pattern_detectors(FileCategory::Markup).is_empty());
        assert!(!pattern_detectors(FileCategory::Stylesheet).is_empty());
        assert!(!pattern_detectors(FileCategory::Script).is_empty());
        assert!(pattern_detectors(FileCategory::Unsupported).is_empty());
    }

    #[test]
    fn stylesheets_have_no_structural_pass() {
        assert!(structural_detectors(FileCategory::Stylesheet).is_empty());
        assert!(!structural_detectors(FileCategory::Markup).is_empty());
        assert!(!structural_detectors(FileCategory::Script).is_empty());
    }

    #[test]
    fn all_detectors_tolerate_empty_input() {
        for category in [
            FileCategory::Markup,
            FileCategory::Stylesheet,
            FileCategory::Script,
        ] {
            for det in pattern_detectors(category)
                .iter()
                .chain(structural_detectors(category))
            {
                assert!(
                    det.check("").is_empty(),
                    "{} produced violations on empty input",
                    det.name()
                );
            }
        }
    }

    #[test]
    fn emitted_rule_ids_exist_in_catalog() {
        // exercise every detector with content that trips it, then verify
        // each produced id resolves in the catalog
        let samples = [
            (FileCategory::Markup, r#"<img src="x.png">"#),
            (
                FileCategory::Markup,
                "<html><head></head><body><div onclick=\"x()\"></div><input type=\"text\">\
                 <a href=\"/x\">more</a><h3>skip</h3><iframe src=\"y\"></iframe>\
                 <p id=\"d\">1</p><p id=\"d\">2</p></body></html>",
            ),
            (
                FileCategory::Markup,
                r#"<div role="fancy" aria-hidden="true" aria-label="x" onclick="y()"></div>"#,
            ),
            (
                FileCategory::Stylesheet,
                ".btn { outline: none; font-size: 8px; width: 10px; pointer-events: none; \
                 color: transparent; display: none; }",
            ),
            (
                FileCategory::Script,
                "const d = document.createElement('div'); d.onclick = f; d.tabIndex = 3; \
                 d.style.outline = 'none'; v.autoplay = true; \
                 document.querySelectorAll('*');",
            ),
        ];

        for (category, content) in samples {
            for det in pattern_detectors(category)
                .iter()
                .chain(structural_detectors(category))
            {
                for violation in det.check(content) {
                    assert!(
                        catalog::rule(&violation.rule_id).is_some(),
                        "detector {} emitted uncataloged rule id {}",
                        det.name(),
                        violation.rule_id
                    );
                }
            }
        }
    }
}
