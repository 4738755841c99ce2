// SPDX-License-Identifier: PMPL-1.0-or-later
//! Near-duplicate suppression for merged violation lists.
//!
//! The pattern and structural passes can flag the same underlying defect
//! through different heuristics, usually within a few lines of each other.
//! Two violations are considered duplicates when they share a rule id and
//! their lines differ by less than the proximity window. The window is a
//! calibration knob, not a contract; the default lives in
//! [`DEFAULT_PROXIMITY_WINDOW`].

use crate::model::Violation;

/// Default line-proximity window for duplicate collapsing.
pub const DEFAULT_PROXIMITY_WINDOW: usize = 5;

/// Collapses near-duplicates and sorts the result.
///
/// First-seen wins: the input arrives in pass order (pattern before
/// structural, earlier detector before later), so the earlier finding is
/// retained and later echoes are dropped. The surviving list is sorted by
/// line ascending with rule id as the tie-breaker, which makes output
/// deterministic for any input order within a pass.
#[must_use]
pub fn dedupe(violations: Vec<Violation>, window: usize) -> Vec<Violation> {
    let mut kept: Vec<Violation> = Vec::with_capacity(violations.len());

    for candidate in violations {
        let duplicate = kept.iter().any(|existing| {
            existing.rule_id == candidate.rule_id
                && existing.line.abs_diff(candidate.line) < window
        });
        if !duplicate {
            kept.push(candidate);
        }
    }

    kept.sort_by(|a, b| a.line.cmp(&b.line).then_with(|| a.rule_id.cmp(&b.rule_id)));
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn violation(rule_id: &str, line: usize) -> Violation {
        catalog::rule(rule_id)
            .expect("known rule")
            .violation("test")
            .at(line, 1)
    }

    #[test]
    fn nearby_same_rule_collapses_to_first_seen() {
        let input = vec![
            violation("div-as-button", 10).with_description("from pattern pass"),
            violation("div-as-button", 12).with_description("from structural pass"),
        ];
        let result = dedupe(input, DEFAULT_PROXIMITY_WINDOW);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].description, "from pattern pass");
    }

    #[test]
    fn distant_same_rule_survives() {
        let input = vec![violation("div-as-button", 10), violation("div-as-button", 40)];
        let result = dedupe(input, DEFAULT_PROXIMITY_WINDOW);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn different_rules_on_same_line_both_survive() {
        let input = vec![
            violation("div-as-button", 10),
            violation("interactive-role-no-keyboard", 10),
        ];
        let result = dedupe(input, DEFAULT_PROXIMITY_WINDOW);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn window_boundary_is_exclusive() {
        // lines differing by exactly the window are NOT duplicates
        let input = vec![violation("div-as-button", 10), violation("div-as-button", 15)];
        assert_eq!(dedupe(input, 5).len(), 2);

        let input = vec![violation("div-as-button", 10), violation("div-as-button", 14)];
        assert_eq!(dedupe(input, 5).len(), 1);
    }

    #[test]
    fn zero_window_disables_collapsing() {
        let input = vec![violation("div-as-button", 10), violation("div-as-button", 10)];
        assert_eq!(dedupe(input, 0).len(), 2);
    }

    #[test]
    fn output_sorted_by_line_then_rule_id() {
        let input = vec![
            violation("missing-focus-style", 30),
            violation("img-missing-alt", 5),
            violation("div-as-button", 5),
        ];
        let result = dedupe(input, DEFAULT_PROXIMITY_WINDOW);
        let order: Vec<(usize, &str)> =
            result.iter().map(|v| (v.line, v.rule_id.as_str())).collect();
        assert_eq!(
            order,
            vec![
                (5, "div-as-button"),
                (5, "img-missing-alt"),
                (30, "missing-focus-style"),
            ]
        );
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(dedupe(Vec::new(), DEFAULT_PROXIMITY_WINDOW).is_empty());
    }
}
