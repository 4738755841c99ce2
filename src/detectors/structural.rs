// SPDX-License-Identifier: PMPL-1.0-or-later
//! Structural detectors: checks that reason about relationships between
//! attributes and handlers on the same element.
//!
//! These are regex heuristics over individual tags, not a real parser.
//! They see one element at a time with all of its attributes, which is
//! exactly the context the pattern pass lacks; they are best-effort and
//! documented as such, never a conformance guarantee. They run only when
//! the complexity classifier flags the content.

use crate::catalog;
use crate::detectors::Detector;
use crate::location::LocationResolver;
use crate::model::Violation;
use regex::Regex;
use std::sync::LazyLock;

/// The WAI-ARIA role vocabulary.
const VALID_ROLES: &[&str] = &[
    "alert",
    "alertdialog",
    "application",
    "article",
    "banner",
    "blockquote",
    "button",
    "caption",
    "cell",
    "checkbox",
    "code",
    "columnheader",
    "combobox",
    "complementary",
    "contentinfo",
    "definition",
    "deletion",
    "dialog",
    "directory",
    "document",
    "emphasis",
    "feed",
    "figure",
    "form",
    "generic",
    "grid",
    "gridcell",
    "group",
    "heading",
    "img",
    "insertion",
    "link",
    "list",
    "listbox",
    "listitem",
    "log",
    "main",
    "marquee",
    "math",
    "menu",
    "menubar",
    "menuitem",
    "menuitemcheckbox",
    "menuitemradio",
    "meter",
    "navigation",
    "none",
    "note",
    "option",
    "paragraph",
    "presentation",
    "progressbar",
    "radio",
    "radiogroup",
    "region",
    "row",
    "rowgroup",
    "rowheader",
    "scrollbar",
    "search",
    "searchbox",
    "separator",
    "slider",
    "spinbutton",
    "status",
    "strong",
    "subscript",
    "superscript",
    "switch",
    "tab",
    "table",
    "tablist",
    "tabpanel",
    "term",
    "textbox",
    "time",
    "timer",
    "toolbar",
    "tooltip",
    "tree",
    "treegrid",
    "treeitem",
];

/// Roles that imply click interaction and therefore keyboard support.
const INTERACTIVE_ROLES: &[&str] = &["button", "link", "menuitem", "tab"];

/// Native elements that already provide keyboard interaction.
const NATIVE_INTERACTIVE_TAGS: &[&str] =
    &["button", "a", "input", "select", "textarea", "summary", "option"];

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([A-Za-z][A-Za-z0-9-]*)((?:"[^"]*"|'[^']*'|[^<>"'])*)>"#).unwrap()
});
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z][A-Za-z0-9_:-]*)(?:\s*=\s*("[^"]*"|'[^']*'|\{[^{}]*\}|[^\s>]+))?"#)
        .unwrap()
});

/// One scanned element: lowercased tag name, lowercased attribute names,
/// and the tag's byte offset.
struct ScannedTag {
    name: String,
    /// Attribute name -> literal value. `None` marks a dynamic (JSX brace)
    /// expression whose value is unknowable statically.
    attrs: Vec<(String, Option<String>)>,
    offset: usize,
}

impl ScannedTag {
    fn attr(&self, name: &str) -> Option<&Option<String>> {
        self.attrs.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    fn literal(&self, name: &str) -> Option<&str> {
        self.attr(name).and_then(|v| v.as_deref())
    }
}

fn unquote(raw: &str) -> Option<String> {
    if (raw.starts_with('"') && raw.ends_with('"') && raw.len() >= 2)
        || (raw.starts_with('\'') && raw.ends_with('\'') && raw.len() >= 2)
    {
        Some(raw[1..raw.len() - 1].to_string())
    } else if raw.starts_with('{') {
        // JSX expression: the value cannot be judged statically
        None
    } else {
        Some(raw.to_string())
    }
}

/// Scans the content for tags, closing tags excluded.
fn scan_tags(content: &str) -> Vec<ScannedTag> {
    TAG_RE
        .captures_iter(content)
        .filter_map(|caps| {
            let name_match = caps.get(1)?;
            let attr_text = caps.get(2).map_or("", |m| m.as_str());
            let attrs = ATTR_RE
                .captures_iter(attr_text)
                .filter_map(|a| {
                    let name = a.get(1)?.as_str().to_ascii_lowercase();
                    // a valueless (boolean) attribute is an empty literal;
                    // a JSX brace expression unquotes to None (dynamic)
                    let value = match a.get(2) {
                        Some(raw) => unquote(raw.as_str()),
                        None => Some(String::new()),
                    };
                    Some((name, value))
                })
                .collect();
            Some(ScannedTag {
                name: name_match.as_str().to_ascii_lowercase(),
                attrs,
                offset: caps.get(0)?.start(),
            })
        })
        .collect()
}

/// `role` values outside the ARIA vocabulary.
pub struct RoleVocabularyDetector;

impl Detector for RoleVocabularyDetector {
    fn name(&self) -> &'static str {
        "role-vocabulary"
    }

    fn check(&self, content: &str) -> Vec<Violation> {
        let resolver = LocationResolver::new(content);
        let mut violations = Vec::new();

        for tag in scan_tags(content) {
            let Some(value) = tag.literal("role") else {
                continue;
            };
            for token in value.split_whitespace() {
                if VALID_ROLES.contains(&token.to_ascii_lowercase().as_str()) {
                    continue;
                }
                let (line, column) = resolver.location(tag.offset);
                violations.push(
                    catalog::ARIA_ROLE_INVALID
                        .violation(format!(
                            "role=\"{token}\" is not in the ARIA role vocabulary; assistive \
                             technology will ignore it."
                        ))
                        .at(line, column)
                        .with_snippet(format!("<{} role=\"{value}\">", tag.name)),
                );
            }
        }

        violations
    }
}

/// Contradictory ARIA attribute combinations on one element.
pub struct AriaConflictDetector;

impl Detector for AriaConflictDetector {
    fn name(&self) -> &'static str {
        "aria-conflict"
    }

    fn check(&self, content: &str) -> Vec<Violation> {
        let resolver = LocationResolver::new(content);
        let mut violations = Vec::new();

        for tag in scan_tags(content) {
            let hidden = tag
                .literal("aria-hidden")
                .map_or(false, |v| v.eq_ignore_ascii_case("true"));
            let presentational = tag.literal("role").map_or(false, |r| {
                r.eq_ignore_ascii_case("presentation") || r.eq_ignore_ascii_case("none")
            });
            let labelled = tag.has_attr("aria-label") || tag.has_attr("aria-labelledby");

            let conflict = if hidden && labelled {
                Some("aria-hidden=\"true\" hides the element while aria-label names it")
            } else if presentational && labelled {
                Some("a presentational role strips semantics while aria-label names the element")
            } else {
                None
            };

            if let Some(reason) = conflict {
                let (line, column) = resolver.location(tag.offset);
                violations.push(
                    catalog::ARIA_ATTR_CONFLICT
                        .violation(format!("Conflicting ARIA attributes on <{}>: {reason}.", tag.name))
                        .at(line, column)
                        .with_snippet(format!("<{}>", tag.name)),
                );
            }
        }

        violations
    }
}

/// Custom interactive roles wired for click but not for keyboard.
pub struct KeyboardPairingDetector;

impl Detector for KeyboardPairingDetector {
    fn name(&self) -> &'static str {
        "keyboard-pairing"
    }

    fn check(&self, content: &str) -> Vec<Violation> {
        let resolver = LocationResolver::new(content);
        let mut violations = Vec::new();

        for tag in scan_tags(content) {
            if NATIVE_INTERACTIVE_TAGS.contains(&tag.name.as_str()) {
                continue;
            }
            let role_is_interactive = tag.literal("role").map_or(false, |r| {
                INTERACTIVE_ROLES.contains(&r.to_ascii_lowercase().as_str())
            });
            if !role_is_interactive || !tag.has_attr("onclick") {
                continue;
            }

            let has_keyboard = tag.has_attr("onkeydown")
                || tag.has_attr("onkeyup")
                || tag.has_attr("onkeypress");
            let has_tabindex = tag.has_attr("tabindex");

            if has_keyboard && has_tabindex {
                continue;
            }

            let missing = if !has_keyboard && !has_tabindex {
                "keyboard handler and tabindex"
            } else if !has_keyboard {
                "keyboard handler"
            } else {
                "tabindex"
            };

            let (line, column) = resolver.location(tag.offset);
            violations.push(
                catalog::INTERACTIVE_ROLE_NO_KEYBOARD
                    .violation(format!(
                        "<{} role=\"{}\"> handles click but is missing a {missing}; keyboard \
                         users cannot operate it.",
                        tag.name,
                        tag.literal("role").unwrap_or_default()
                    ))
                    .at(line, column)
                    .with_snippet(format!("<{}>", tag.name)),
            );
        }

        violations
    }
}

static MUTATION_SITE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"setState\(|\.innerHTML\s*=|\.textContent\s*=|appendChild\(|removeChild\(|insertAdjacentHTML\(|replaceChildren\(",
    )
    .unwrap()
});

/// How many mutation call sites a file may have before the absence of any
/// live region becomes suspicious.
const LIVE_REGION_THRESHOLD: usize = 4;

/// High-churn DOM mutation with no live-region announcement anywhere.
/// Heuristic: frequent mutation without aria-live may still be fine
/// (e.g. purely visual updates), so this is a warning, not an error.
pub struct LiveRegionDetector;

impl Detector for LiveRegionDetector {
    fn name(&self) -> &'static str {
        "live-region"
    }

    fn check(&self, content: &str) -> Vec<Violation> {
        let sites = MUTATION_SITE_RE.find_iter(content).count();
        if sites < LIVE_REGION_THRESHOLD {
            return Vec::new();
        }

        let lower = content.to_ascii_lowercase();
        let has_live_region = lower.contains("aria-live")
            || lower.contains("aria-atomic")
            || lower.contains("aria-busy");
        if has_live_region {
            return Vec::new();
        }

        vec![catalog::LIVE_REGION_MISSING.violation(format!(
            "{sites} DOM mutation call sites and no aria-live/aria-atomic/aria-busy anywhere; \
             screen reader users will not hear these updates."
        ))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Severity;

    fn rule_ids(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.rule_id.as_str()).collect()
    }

    // --- role vocabulary ---

    #[test]
    fn valid_roles_pass() {
        let html = r#"<div role="button" tabindex="0">x</div><nav role="navigation">y</nav>"#;
        assert!(RoleVocabularyDetector.check(html).is_empty());
    }

    #[test]
    fn invented_role_is_an_error() {
        let html = r#"<div role="clickable">x</div>"#;
        let violations = RoleVocabularyDetector.check(html);
        assert_eq!(rule_ids(&violations), vec!["aria-role-invalid"]);
        assert_eq!(violations[0].severity, Severity::Error);
    }

    #[test]
    fn fallback_role_lists_are_checked_per_token() {
        let html = r#"<div role="switch checkbox">x</div>"#;
        assert!(RoleVocabularyDetector.check(html).is_empty());
        let bad = r#"<div role="switch togglewidget">x</div>"#;
        assert_eq!(RoleVocabularyDetector.check(bad).len(), 1);
    }

    #[test]
    fn dynamic_jsx_role_is_skipped() {
        let jsx = r#"<div role={computedRole}>x</div>"#;
        assert!(RoleVocabularyDetector.check(jsx).is_empty());
    }

    // --- aria conflicts ---

    #[test]
    fn hidden_plus_label_conflicts() {
        let html = r#"<span aria-hidden="true" aria-label="Close">×</span>"#;
        let violations = AriaConflictDetector.check(html);
        assert_eq!(rule_ids(&violations), vec!["aria-attr-conflict"]);
    }

    #[test]
    fn hidden_without_label_is_fine() {
        let html = r#"<span aria-hidden="true">×</span>"#;
        assert!(AriaConflictDetector.check(html).is_empty());
    }

    #[test]
    fn label_without_hidden_is_fine() {
        let html = r#"<button aria-label="Close">×</button>"#;
        assert!(AriaConflictDetector.check(html).is_empty());
    }

    #[test]
    fn presentational_role_with_label_conflicts() {
        let html = r#"<img role="presentation" aria-label="Logo">"#;
        let violations = AriaConflictDetector.check(html);
        assert_eq!(rule_ids(&violations), vec!["aria-attr-conflict"]);
    }

    // --- keyboard pairing ---

    #[test]
    fn complete_custom_button_passes() {
        let html = r#"<div role="button" tabindex="0" onclick="go()" onkeydown="go()">Go</div>"#;
        assert!(KeyboardPairingDetector.check(html).is_empty());
    }

    #[test]
    fn missing_keyboard_handler_is_flagged() {
        let html = r#"<div role="button" tabindex="0" onclick="go()">Go</div>"#;
        let violations = KeyboardPairingDetector.check(html);
        assert_eq!(rule_ids(&violations), vec!["interactive-role-no-keyboard"]);
        assert!(violations[0].description.contains("keyboard handler"));
    }

    #[test]
    fn missing_tabindex_is_flagged() {
        let html = r#"<div role="menuitem" onclick="go()" onkeydown="go()">Go</div>"#;
        let violations = KeyboardPairingDetector.check(html);
        assert_eq!(rule_ids(&violations), vec!["interactive-role-no-keyboard"]);
        assert!(violations[0].description.contains("tabindex"));
    }

    #[test]
    fn native_button_is_exempt() {
        let html = r#"<button role="button" onclick="go()">Go</button>"#;
        assert!(KeyboardPairingDetector.check(html).is_empty());
    }

    #[test]
    fn non_interactive_role_is_ignored() {
        let html = r#"<div role="region" onclick="track()">stats</div>"#;
        assert!(KeyboardPairingDetector.check(html).is_empty());
    }

    // --- live regions ---

    #[test]
    fn heavy_mutation_without_live_region_warns() {
        let js = "\
list.appendChild(a);
list.removeChild(b);
status.textContent = 'saving';
panel.innerHTML = render();";
        let violations = LiveRegionDetector.check(js);
        assert_eq!(rule_ids(&violations), vec!["live-region-missing"]);
        assert_eq!(violations[0].severity, Severity::Warning);
    }

    #[test]
    fn mutation_with_live_region_passes() {
        let js = "\
// <div aria-live=\"polite\" id=\"status\"></div>
list.appendChild(a);
list.removeChild(b);
status.textContent = 'saving';
panel.innerHTML = render();";
        assert!(LiveRegionDetector.check(js).is_empty());
    }

    #[test]
    fn light_mutation_is_fine() {
        let js = "status.textContent = 'done';";
        assert!(LiveRegionDetector.check(js).is_empty());
    }
}
