// SPDX-License-Identifier: PMPL-1.0-or-later
//! Script pattern detectors.
//!
//! JS/TS/JSX source is scanned with regex tables rather than a parser; the
//! checks mirror the markup rules as they appear in constructed-DOM code
//! (createElement plus handler assignment instead of inline attributes).

use crate::catalog;
use crate::detectors::Detector;
use crate::location::LocationResolver;
use crate::model::Violation;
use regex::Regex;
use std::sync::LazyLock;

static CREATE_DIV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)createElement\(\s*['"](?:div|span)['"]\s*\)"#).unwrap());
static CLICK_HANDLER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\.onclick\s*=|addEventListener\(\s*['"]click['"]"#).unwrap()
});
static KEYBOARD_HANDLER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\.onkey(?:down|up|press)\s*=|addEventListener\(\s*['"]key(?:down|up|press)['"]"#)
        .unwrap()
});
static ROLE_ASSIGN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)setAttribute\(\s*['"]role['"]|\.role\s*="#).unwrap()
});
static TABINDEX_ASSIGN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\.tabIndex\s*=|setAttribute\(\s*['"]tabindex['"]"#).unwrap()
});

/// `createElement('div')` wired up as a click target.
pub struct ConstructedDomDetector;

impl Detector for ConstructedDomDetector {
    fn name(&self) -> &'static str {
        "constructed-dom"
    }

    fn check(&self, content: &str) -> Vec<Violation> {
        let Some(create) = CREATE_DIV_RE.find(content) else {
            return Vec::new();
        };
        let Some(click) = CLICK_HANDLER_RE.find_at(content, create.end()) else {
            return Vec::new();
        };

        // the markup escape hatch, expressed in DOM calls: a div that also
        // gets a role, a tabindex, and a keyboard handler is left to the
        // structural keyboard-pairing check
        if KEYBOARD_HANDLER_RE.is_match(content)
            && ROLE_ASSIGN_RE.is_match(content)
            && TABINDEX_ASSIGN_RE.is_match(content)
        {
            return Vec::new();
        }

        let resolver = LocationResolver::new(content);
        let (line, column) = resolver.location(click.start());
        vec![catalog::SCRIPT_DIV_AS_BUTTON
            .violation(
                "A dynamically created div/span receives a click handler without button \
                 semantics; assistive technology will not expose it as interactive.",
            )
            .at(line, column)
            .with_snippet(click.as_str().trim())]
    }
}

static OUTLINE_REMOVAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\.style\.outline(?:Width)?\s*=\s*['"](?:none|0)['"]|setProperty\(\s*['"]outline['"]\s*,\s*['"](?:none|0)"#,
    )
    .unwrap()
});
static QUERY_ALL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"querySelectorAll\(\s*['"]\*['"]\s*\)"#).unwrap());

/// Focus outlines removed via style assignment, including the global
/// `querySelectorAll('*')` variant.
pub struct FocusSuppressionDetector;

impl Detector for FocusSuppressionDetector {
    fn name(&self) -> &'static str {
        "focus-suppression"
    }

    fn check(&self, content: &str) -> Vec<Violation> {
        let resolver = LocationResolver::new(content);
        let mut violations = Vec::new();

        let removals: Vec<_> = OUTLINE_REMOVAL_RE.find_iter(content).collect();
        for m in &removals {
            let (line, column) = resolver.location(m.start());
            violations.push(
                catalog::SCRIPT_OUTLINE_REMOVAL
                    .violation("Style assignment removes the element's focus outline.")
                    .at(line, column)
                    .with_snippet(m.as_str().trim()),
            );
        }

        if !removals.is_empty() {
            if let Some(m) = QUERY_ALL_RE.find(content) {
                let (line, column) = resolver.location(m.start());
                violations.push(
                    catalog::GLOBAL_FOCUS_SUPPRESSION
                        .violation(
                            "querySelectorAll('*') combined with outline removal strips the \
                             focus indicator from every element on the page.",
                        )
                        .at(line, column)
                        .with_snippet(m.as_str()),
                );
            }
        }

        violations
    }
}

static TABINDEX_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\btabIndex\s*=\s*[{"']?\s*(-?\d+)"#).unwrap());
static TABINDEX_SETATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)setAttribute\(\s*['"]tabindex['"]\s*,\s*['"]?\s*(-?\d+)"#).unwrap()
});

/// Positive tabIndex assignments, which override the natural focus order.
pub struct TabIndexDetector;

impl Detector for TabIndexDetector {
    fn name(&self) -> &'static str {
        "tab-index"
    }

    fn check(&self, content: &str) -> Vec<Violation> {
        let resolver = LocationResolver::new(content);
        let mut violations = Vec::new();

        for re in [&*TABINDEX_VALUE_RE, &*TABINDEX_SETATTR_RE] {
            for caps in re.captures_iter(content) {
                let Ok(value) = caps[1].parse::<i32>() else {
                    continue;
                };
                if value <= 0 {
                    continue;
                }
                let m = caps.get(0).expect("whole match");
                let (line, column) = resolver.location(m.start());
                violations.push(
                    catalog::POSITIVE_TABINDEX
                        .violation(format!(
                            "tabIndex is set to {value}; positive values hijack the tab order."
                        ))
                        .at(line, column)
                        .with_snippet(m.as_str().trim()),
                );
            }
        }

        violations
    }
}

static AUTOPLAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\.autoplay\s*=\s*true|\bautoplay\b|setAttribute\(\s*['"]autoplay['"]"#)
        .unwrap()
});
static MUTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\.muted\s*=\s*true|\bmuted\b"#).unwrap());

/// Media configured to autoplay without being muted.
pub struct AutoplayDetector;

impl Detector for AutoplayDetector {
    fn name(&self) -> &'static str {
        "autoplay"
    }

    fn check(&self, content: &str) -> Vec<Violation> {
        let Some(m) = AUTOPLAY_RE.find(content) else {
            return Vec::new();
        };
        if MUTED_RE.is_match(content) {
            return Vec::new();
        }

        let resolver = LocationResolver::new(content);
        let (line, column) = resolver.location(m.start());
        vec![catalog::AUTOPLAY_UNMUTED
            .violation(
                "Media autoplays without being muted; unexpected audio drowns out screen \
                 reader output.",
            )
            .at(line, column)
            .with_snippet(m.as_str().trim())]
    }
}
