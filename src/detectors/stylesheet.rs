// SPDX-License-Identifier: PMPL-1.0-or-later
//! Stylesheet pattern detectors.
//!
//! All checks here operate on raw CSS text split into rule blocks with a
//! tolerant regex; an unterminated block simply drops out of the match set,
//! so malformed input degrades to partial results instead of failing.

use crate::catalog;
use crate::detectors::Detector;
use crate::location::LocationResolver;
use crate::model::Violation;
use regex::Regex;
use std::sync::LazyLock;

static BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)([^{}]+)\{([^{}]*)\}").unwrap());

/// One `selector { body }` rule block, with byte offsets into the
/// original content.
pub(crate) struct RuleBlock<'a> {
    pub selector: &'a str,
    pub body: &'a str,
    pub selector_offset: usize,
    pub body_offset: usize,
}

/// Splits stylesheet content into rule blocks. Nested at-rule headers
/// (`@media { ... }`) are skipped over; the inner rules still match.
pub(crate) fn rule_blocks(content: &str) -> Vec<RuleBlock<'_>> {
    BLOCK_RE
        .captures_iter(content)
        .filter_map(|caps| {
            let raw_selector = caps.get(1)?;
            let body = caps.get(2)?;
            let trimmed = raw_selector.as_str().trim();
            if trimmed.is_empty() {
                return None;
            }
            let lead = raw_selector.as_str().len() - raw_selector.as_str().trim_start().len();
            Some(RuleBlock {
                selector: trimmed,
                body: body.as_str(),
                selector_offset: raw_selector.start() + lead,
                body_offset: body.start(),
            })
        })
        .collect()
}

/// True when the selector names something interactive: a button, link,
/// input, or click-target class, or a bare `a` element token.
pub(crate) fn selector_is_interactive(selector: &str) -> bool {
    let lower = selector.to_ascii_lowercase();
    if ["button", "btn", "link", "input", "click"]
        .iter()
        .any(|kw| lower.contains(kw))
    {
        return true;
    }
    // bare `a` element tokens: "a", "a:hover", "a.nav", "a[href]"
    lower
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | '>' | '+' | '~'))
        .filter(|t| !t.is_empty())
        .any(|t| t == "a" || t.starts_with("a:") || t.starts_with("a.") || t.starts_with("a["))
}

/// True for selectors that read like navigation chrome.
fn selector_is_navigation(selector: &str) -> bool {
    let lower = selector.to_ascii_lowercase();
    lower.contains("nav") || lower.contains("menu")
}

/// Missing `:focus` styles and `outline: none` without a replacement
/// indicator in the same rule block.
pub struct FocusStyleDetector;

static OUTLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\boutline(?:-width)?\s*:\s*([^;{}]+)").unwrap());
static BORDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bborder(?:-[a-z]+)?\s*:").unwrap());

fn is_suppressed_outline(value: &str) -> bool {
    let v = value.trim().to_ascii_lowercase();
    v == "none" || v == "0" || v == "0px"
}

impl Detector for FocusStyleDetector {
    fn name(&self) -> &'static str {
        "focus-style"
    }

    fn check(&self, content: &str) -> Vec<Violation> {
        if content.trim().is_empty() {
            return Vec::new();
        }

        let resolver = LocationResolver::new(content);
        let mut violations = Vec::new();

        if !content.to_ascii_lowercase().contains(":focus") {
            violations.push(catalog::MISSING_FOCUS_STYLE.violation(
                "Stylesheet contains no :focus rule; keyboard focus is left unstyled.",
            ));
        }

        for block in rule_blocks(content) {
            let outlines: Vec<_> = OUTLINE_RE.captures_iter(block.body).collect();
            for caps in &outlines {
                let value = caps.get(1).map_or("", |m| m.as_str());
                if !is_suppressed_outline(value) {
                    continue;
                }

                let has_alternative = block.body.to_ascii_lowercase().contains("box-shadow")
                    || BORDER_RE.is_match(block.body)
                    || outlines.iter().any(|other| {
                        other.get(1).map_or(false, |m| !is_suppressed_outline(m.as_str()))
                    });

                if !has_alternative {
                    let whole = caps.get(0).map_or("", |m| m.as_str());
                    let offset = block.body_offset + caps.get(0).map_or(0, |m| m.start());
                    let (line, column) = resolver.location(offset);
                    violations.push(
                        catalog::OUTLINE_NONE_NO_ALTERNATIVE
                            .violation(format!(
                                "\"{}\" removes the focus outline with no alternative indicator \
                                 (no box-shadow, border, or visible outline in the same block).",
                                block.selector
                            ))
                            .at(line, column)
                            .with_snippet(whole.trim()),
                    );
                }
            }
        }

        violations
    }
}

/// Font sizes too small to read.
pub struct TypographyDetector;

static FONT_SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bfont-size\s*:\s*([\d.]+)px").unwrap());

impl Detector for TypographyDetector {
    fn name(&self) -> &'static str {
        "typography"
    }

    fn check(&self, content: &str) -> Vec<Violation> {
        let resolver = LocationResolver::new(content);
        let mut violations = Vec::new();

        for caps in FONT_SIZE_RE.captures_iter(content) {
            let Ok(px) = caps[1].parse::<f64>() else {
                continue;
            };
            let whole = caps.get(0).map_or("", |m| m.as_str());
            let offset = caps.get(0).map_or(0, |m| m.start());
            let (line, column) = resolver.location(offset);

            if px < 10.0 {
                violations.push(
                    catalog::FONT_SIZE_UNREADABLE
                        .violation(format!("Font size {px}px is below the 10px legibility floor."))
                        .at(line, column)
                        .with_snippet(whole),
                );
            } else if px < 12.0 {
                violations.push(
                    catalog::FONT_SIZE_SMALL
                        .violation(format!("Font size {px}px is below the recommended 12px minimum."))
                        .at(line, column)
                        .with_snippet(whole),
                );
            }
        }

        violations
    }
}

/// Undersized interactive targets.
pub struct InteractiveSizingDetector;

static DIMENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|[;{\s])(width|height)\s*:\s*([\d.]+)px").unwrap());

impl Detector for InteractiveSizingDetector {
    fn name(&self) -> &'static str {
        "interactive-sizing"
    }

    fn check(&self, content: &str) -> Vec<Violation> {
        let resolver = LocationResolver::new(content);
        let mut violations = Vec::new();

        for block in rule_blocks(content) {
            if !selector_is_interactive(block.selector) {
                continue;
            }
            for caps in DIMENSION_RE.captures_iter(block.body) {
                let Ok(px) = caps[2].parse::<f64>() else {
                    continue;
                };
                if px >= 44.0 {
                    continue;
                }
                let property = &caps[1];
                let offset = block.body_offset + caps.get(1).map_or(0, |m| m.start());
                let (line, column) = resolver.location(offset);
                violations.push(
                    catalog::TOUCH_TARGET_TOO_SMALL
                        .violation(format!(
                            "\"{}\" fixes {} at {px}px, below the 44px touch-target minimum.",
                            block.selector,
                            property.to_ascii_lowercase()
                        ))
                        .at(line, column)
                        .with_snippet(caps.get(0).map_or("", |m| m.as_str()).trim()),
                );
            }
        }

        violations
    }
}

/// Visibility and interaction suppression: `display: none` on interactive
/// selectors, transparent text, and `pointer-events: none`.
pub struct VisibilityDetector;

static DISPLAY_NONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdisplay\s*:\s*none\b").unwrap());
static COLOR_TRANSPARENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|[;{\s])color\s*:\s*transparent\b").unwrap());
static POINTER_EVENTS_NONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bpointer-events\s*:\s*none\b").unwrap());

impl Detector for VisibilityDetector {
    fn name(&self) -> &'static str {
        "visibility"
    }

    fn check(&self, content: &str) -> Vec<Violation> {
        let resolver = LocationResolver::new(content);
        let mut violations = Vec::new();

        for caps in COLOR_TRANSPARENT_RE.captures_iter(content) {
            let offset = caps.get(0).map_or(0, |m| m.start());
            let (line, column) = resolver.location(offset);
            violations.push(
                catalog::COLOR_TRANSPARENT
                    .violation("Text color is transparent; the content is invisible but still present.")
                    .at(line, column)
                    .with_snippet(caps.get(0).map_or("", |m| m.as_str()).trim()),
            );
        }

        for block in rule_blocks(content) {
            let interactive = selector_is_interactive(block.selector);

            if (interactive || selector_is_navigation(block.selector))
                && DISPLAY_NONE_RE.is_match(block.body)
            {
                let m = DISPLAY_NONE_RE.find(block.body).map_or(0, |m| m.start());
                let (line, column) = resolver.location(block.body_offset + m);
                violations.push(
                    catalog::DISPLAY_NONE_INTERACTIVE
                        .violation(format!(
                            "\"{}\" hides an interactive or navigation element with display: none.",
                            block.selector
                        ))
                        .at(line, column)
                        .with_snippet("display: none"),
                );
            }

            if interactive {
                if let Some(m) = POINTER_EVENTS_NONE_RE.find(block.body) {
                    let (line, column) = resolver.location(block.body_offset + m.start());
                    violations.push(
                        catalog::POINTER_EVENTS_NONE_INTERACTIVE
                            .violation(format!(
                                "\"{}\" disables pointer interaction on an interactive element.",
                                block.selector
                            ))
                            .at(line, column)
                            .with_snippet(m.as_str()),
                    );
                }
            }
        }

        violations
    }
}
