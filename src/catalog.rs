// SPDX-License-Identifier: PMPL-1.0-or-later
//! Static rule catalog.
//!
//! Rules are pure data, built once and read-only thereafter. Detector
//! functions are associated by id string, by convention, so the catalog can
//! be validated on its own without touching detector code.

use crate::category::FileCategory;
use crate::model::{Severity, Violation};
use std::collections::HashMap;
use std::sync::LazyLock;

/// A catalog entry describing one accessibility check.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Stable rule id (kebab-case).
    pub id: &'static str,
    /// Categories this rule can fire for.
    pub applies_to: &'static [FileCategory],
    /// Severity when no override is configured.
    pub default_severity: Severity,
    /// WCAG success criteria. Empty only for synthetic parse-error rules.
    pub wcag_criteria: &'static [&'static str],
    /// Short title.
    pub title: &'static str,
    /// One-line remediation hint.
    pub help: &'static str,
    /// Static remediation steps.
    pub fix_suggestions: &'static [&'static str],
    /// Categorical labels.
    pub tags: &'static [&'static str],
}

impl Rule {
    /// Creates a violation from this catalog entry with the default severity
    /// and the static title/help/fix-suggestion text filled in. Detectors
    /// refine the description, location, and snippet via the builder methods
    /// on [`Violation`].
    #[must_use]
    pub fn violation(&self, description: impl Into<String>) -> Violation {
        Violation {
            rule_id: self.id.to_string(),
            severity: self.default_severity,
            wcag_criteria: self.wcag_criteria.iter().map(|c| (*c).to_string()).collect(),
            title: self.title.to_string(),
            description: description.into(),
            help: self.help.to_string(),
            line: 1,
            column: 1,
            code_snippet: String::new(),
            fix_suggestions: self
                .fix_suggestions
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            tags: self.tags.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

const MARKUP: &[FileCategory] = &[FileCategory::Markup];
const STYLESHEET: &[FileCategory] = &[FileCategory::Stylesheet];
const SCRIPT: &[FileCategory] = &[FileCategory::Script];
const MARKUP_AND_SCRIPT: &[FileCategory] = &[FileCategory::Markup, FileCategory::Script];

// --- markup pattern rules ---

pub const IMG_MISSING_ALT: Rule = Rule {
    id: "img-missing-alt",
    applies_to: MARKUP,
    default_severity: Severity::Error,
    wcag_criteria: &["1.1.1"],
    title: "Image missing alt attribute",
    help: "Every image needs an alt attribute; use alt=\"\" for decorative images",
    fix_suggestions: &[
        "Add alt=\"description\" describing the image content",
        "Use alt=\"\" if the image is purely decorative",
    ],
    tags: &["images"],
};

pub const IMG_REDUNDANT_ALT: Rule = Rule {
    id: "img-redundant-alt",
    applies_to: MARKUP,
    default_severity: Severity::Warning,
    wcag_criteria: &["1.1.1"],
    title: "Redundant phrasing in alt text",
    help: "Screen readers already announce images; drop \"image of\"/\"picture of\"",
    fix_suggestions: &["Remove the redundant phrase and describe only the content"],
    tags: &["images"],
};

pub const DIV_AS_BUTTON: Rule = Rule {
    id: "div-as-button",
    applies_to: MARKUP,
    default_severity: Severity::Error,
    wcag_criteria: &["1.3.1", "4.1.2"],
    title: "Container element used as a button",
    help: "Use a native <button> instead of a click handler on a div/span",
    fix_suggestions: &[
        "Replace the element with a native <button>",
        "Or add role=\"button\", tabindex=\"0\", and a keyboard handler",
    ],
    tags: &["semantics", "keyboard"],
};

pub const EMPTY_INTERACTIVE_ELEMENT: Rule = Rule {
    id: "empty-interactive-element",
    applies_to: MARKUP,
    default_severity: Severity::Error,
    wcag_criteria: &["4.1.2"],
    title: "Interactive element has no accessible name",
    help: "Buttons, links, and headings need text or an aria-label",
    fix_suggestions: &[
        "Add visible text content",
        "Or add aria-label/aria-labelledby naming the element",
    ],
    tags: &["semantics"],
};

pub const INPUT_MISSING_LABEL: Rule = Rule {
    id: "input-missing-label",
    applies_to: MARKUP,
    default_severity: Severity::Error,
    wcag_criteria: &["3.3.2", "1.3.1"],
    title: "Form input without a label",
    help: "Associate a <label for=...> or add aria-label/aria-labelledby",
    fix_suggestions: &[
        "Add a <label for=\"input-id\"> element",
        "Or add an aria-label attribute to the input",
    ],
    tags: &["forms"],
};

pub const INPUT_PLACEHOLDER_LABEL: Rule = Rule {
    id: "input-placeholder-label",
    applies_to: MARKUP,
    default_severity: Severity::Error,
    wcag_criteria: &["3.3.2"],
    title: "Placeholder used as the only label",
    help: "Placeholders disappear while typing and are not labels",
    fix_suggestions: &[
        "Add a real <label> and keep the placeholder as a hint only",
    ],
    tags: &["forms"],
};

pub const LINK_TEXT_NON_DESCRIPTIVE: Rule = Rule {
    id: "link-text-non-descriptive",
    applies_to: MARKUP,
    default_severity: Severity::Warning,
    wcag_criteria: &["2.4.4"],
    title: "Non-descriptive link text",
    help: "Link text should make sense out of context",
    fix_suggestions: &[
        "Rewrite the link text to describe its destination",
        "Or add an aria-label with the full destination description",
    ],
    tags: &["links"],
};

pub const DOC_MISSING_LANG: Rule = Rule {
    id: "doc-missing-lang",
    applies_to: MARKUP,
    default_severity: Severity::Error,
    wcag_criteria: &["3.1.1"],
    title: "Document root missing lang attribute",
    help: "Screen readers need the page language to pick a voice",
    fix_suggestions: &["Add lang=\"en\" (or the page language) to the <html> element"],
    tags: &["document"],
};

pub const DOC_MISSING_TITLE: Rule = Rule {
    id: "doc-missing-title",
    applies_to: MARKUP,
    default_severity: Severity::Warning,
    wcag_criteria: &["2.4.2"],
    title: "Document missing <title>",
    help: "Every page needs a descriptive title",
    fix_suggestions: &["Add a <title> element inside <head>"],
    tags: &["document"],
};

pub const IFRAME_MISSING_TITLE: Rule = Rule {
    id: "iframe-missing-title",
    applies_to: MARKUP,
    default_severity: Severity::Error,
    wcag_criteria: &["4.1.2"],
    title: "Frame missing title attribute",
    help: "Frames need a title describing their embedded content",
    fix_suggestions: &["Add title=\"description of embedded content\" to the <iframe>"],
    tags: &["document"],
};

pub const DUPLICATE_ID: Rule = Rule {
    id: "duplicate-id",
    applies_to: MARKUP,
    default_severity: Severity::Error,
    wcag_criteria: &["4.1.1"],
    title: "Duplicate id attribute",
    help: "Ids must be unique; duplicates break label and ARIA references",
    fix_suggestions: &["Rename one of the duplicated ids"],
    tags: &["document"],
};

pub const ARIA_LABELLEDBY_DANGLING: Rule = Rule {
    id: "aria-labelledby-dangling",
    applies_to: MARKUP,
    default_severity: Severity::Error,
    wcag_criteria: &["1.3.1"],
    title: "aria-labelledby references a missing id",
    help: "The referenced element does not exist in this document",
    fix_suggestions: &[
        "Point aria-labelledby at an existing element id",
        "Or add the missing element with that id",
    ],
    tags: &["aria"],
};

pub const HEADING_SKIPPED_LEVEL: Rule = Rule {
    id: "heading-skipped-level",
    applies_to: MARKUP,
    default_severity: Severity::Warning,
    wcag_criteria: &["1.3.1"],
    title: "Skipped heading level",
    help: "Heading levels should descend one step at a time",
    fix_suggestions: &["Use the next heading level down instead of skipping"],
    tags: &["document", "headings"],
};

pub const MISSING_TOP_LEVEL_HEADING: Rule = Rule {
    id: "missing-top-level-heading",
    applies_to: MARKUP,
    default_severity: Severity::Warning,
    wcag_criteria: &["1.3.1"],
    title: "Missing top-level heading",
    help: "Pages should start their outline with an <h1>",
    fix_suggestions: &["Add an <h1> as the page's top-level heading"],
    tags: &["document", "headings"],
};

// --- stylesheet pattern rules ---

pub const MISSING_FOCUS_STYLE: Rule = Rule {
    id: "missing-focus-style",
    applies_to: STYLESHEET,
    default_severity: Severity::Warning,
    wcag_criteria: &["2.4.7"],
    title: "No :focus styles in stylesheet",
    help: "Keyboard users need a visible focus indicator",
    fix_suggestions: &["Add a :focus (or :focus-visible) rule with a visible indicator"],
    tags: &["keyboard", "focus"],
};

pub const OUTLINE_NONE_NO_ALTERNATIVE: Rule = Rule {
    id: "outline-none-no-alternative",
    applies_to: STYLESHEET,
    default_severity: Severity::Error,
    wcag_criteria: &["2.4.7"],
    title: "Focus outline removed without replacement",
    help: "outline: none leaves keyboard users with no focus indicator",
    fix_suggestions: &[
        "Provide an alternative indicator (box-shadow or border) in the same rule",
        "Or restore a visible outline, e.g. outline: 2px solid",
    ],
    tags: &["keyboard", "focus"],
};

pub const FONT_SIZE_UNREADABLE: Rule = Rule {
    id: "font-size-unreadable",
    applies_to: STYLESHEET,
    default_severity: Severity::Error,
    wcag_criteria: &["1.4.4"],
    title: "Font size below 10px",
    help: "Text this small is unreadable for many users",
    fix_suggestions: &["Raise the font size to at least 12px, preferably in rem units"],
    tags: &["typography"],
};

pub const FONT_SIZE_SMALL: Rule = Rule {
    id: "font-size-small",
    applies_to: STYLESHEET,
    default_severity: Severity::Warning,
    wcag_criteria: &["1.4.4"],
    title: "Font size below 12px",
    help: "Small text is hard to read for low-vision users",
    fix_suggestions: &["Raise the font size to at least 12px, preferably in rem units"],
    tags: &["typography"],
};

pub const TOUCH_TARGET_TOO_SMALL: Rule = Rule {
    id: "touch-target-too-small",
    applies_to: STYLESHEET,
    default_severity: Severity::Error,
    wcag_criteria: &["2.5.8"],
    title: "Interactive element sized below 44px",
    help: "Touch targets should be at least 44x44 CSS pixels",
    fix_suggestions: &["Increase the element's width/height to 44px or more"],
    tags: &["touch", "sizing"],
};

pub const DISPLAY_NONE_INTERACTIVE: Rule = Rule {
    id: "display-none-interactive",
    applies_to: STYLESHEET,
    default_severity: Severity::Warning,
    wcag_criteria: &["2.4.7"],
    title: "Interactive element hidden with display: none",
    help: "Hidden interactive elements are unreachable for everyone",
    fix_suggestions: &[
        "Verify the element is intentionally removed from all interaction",
        "Use the visually-hidden pattern if it should stay screen-reader accessible",
    ],
    tags: &["visibility"],
};

pub const COLOR_TRANSPARENT: Rule = Rule {
    id: "color-transparent",
    applies_to: STYLESHEET,
    default_severity: Severity::Error,
    wcag_criteria: &["1.4.3"],
    title: "Text color set to transparent",
    help: "Transparent text is invisible while remaining in the page",
    fix_suggestions: &["Give the text a visible color or remove it from the document"],
    tags: &["color"],
};

pub const POINTER_EVENTS_NONE_INTERACTIVE: Rule = Rule {
    id: "pointer-events-none-interactive",
    applies_to: STYLESHEET,
    default_severity: Severity::Error,
    wcag_criteria: &["2.1.1"],
    title: "Interactive element disabled with pointer-events: none",
    help: "pointer-events: none silently disables mouse interaction",
    fix_suggestions: &["Use the disabled attribute or remove the declaration"],
    tags: &["interaction"],
};

pub const COLOR_CONTRAST_INSUFFICIENT: Rule = Rule {
    id: "color-contrast-insufficient",
    applies_to: STYLESHEET,
    default_severity: Severity::Error,
    wcag_criteria: &["1.4.3"],
    title: "Insufficient color contrast",
    help: "Text needs a 4.5:1 contrast ratio against its background (3:1 for large text)",
    fix_suggestions: &[
        "Darken the text color or lighten the background",
        "Check the pair with a contrast checker before committing",
    ],
    tags: &["color", "contrast"],
};

// --- script pattern rules ---

pub const SCRIPT_DIV_AS_BUTTON: Rule = Rule {
    id: "script-div-as-button",
    applies_to: SCRIPT,
    default_severity: Severity::Error,
    wcag_criteria: &["1.3.1", "4.1.2"],
    title: "Constructed div used as a button",
    help: "createElement('div') with a click handler builds an inaccessible control",
    fix_suggestions: &[
        "Create a <button> element instead",
        "Or set role, tabIndex, and a keydown handler on the div",
    ],
    tags: &["semantics", "keyboard"],
};

pub const SCRIPT_OUTLINE_REMOVAL: Rule = Rule {
    id: "script-outline-removal",
    applies_to: SCRIPT,
    default_severity: Severity::Error,
    wcag_criteria: &["2.4.7"],
    title: "Focus outline removed from script",
    help: "Assigning outline: none via style removes the focus indicator",
    fix_suggestions: &["Remove the assignment or provide an alternative focus style"],
    tags: &["keyboard", "focus"],
};

pub const POSITIVE_TABINDEX: Rule = Rule {
    id: "positive-tabindex",
    applies_to: SCRIPT,
    default_severity: Severity::Error,
    wcag_criteria: &["2.4.3"],
    title: "Positive tabIndex assignment",
    help: "Positive tab indexes override the natural focus order",
    fix_suggestions: &["Use tabIndex = 0 and let document order drive focus"],
    tags: &["keyboard"],
};

pub const AUTOPLAY_UNMUTED: Rule = Rule {
    id: "autoplay-unmuted",
    applies_to: SCRIPT,
    default_severity: Severity::Error,
    wcag_criteria: &["1.4.2"],
    title: "Unmuted media autoplay",
    help: "Auto-playing audio interferes with screen reader output",
    fix_suggestions: &[
        "Mute auto-playing media by default",
        "Or require a user gesture before playback",
    ],
    tags: &["media"],
};

pub const GLOBAL_FOCUS_SUPPRESSION: Rule = Rule {
    id: "global-focus-suppression",
    applies_to: SCRIPT,
    default_severity: Severity::Error,
    wcag_criteria: &["2.4.7"],
    title: "Focus outlines stripped from all elements",
    help: "Removing outlines via querySelectorAll('*') blinds keyboard navigation",
    fix_suggestions: &["Delete the global outline removal and style :focus-visible instead"],
    tags: &["keyboard", "focus"],
};

// --- structural rules (markup and script) ---

pub const ARIA_ROLE_INVALID: Rule = Rule {
    id: "aria-role-invalid",
    applies_to: MARKUP_AND_SCRIPT,
    default_severity: Severity::Error,
    wcag_criteria: &["4.1.2"],
    title: "Unknown ARIA role",
    help: "The role value is not in the ARIA role vocabulary",
    fix_suggestions: &["Use a valid ARIA role, or remove the attribute"],
    tags: &["aria"],
};

pub const ARIA_ATTR_CONFLICT: Rule = Rule {
    id: "aria-attr-conflict",
    applies_to: MARKUP_AND_SCRIPT,
    default_severity: Severity::Error,
    wcag_criteria: &["4.1.2"],
    title: "Conflicting ARIA attributes",
    help: "These ARIA attributes contradict each other on one element",
    fix_suggestions: &["Remove one of the conflicting attributes"],
    tags: &["aria"],
};

pub const INTERACTIVE_ROLE_NO_KEYBOARD: Rule = Rule {
    id: "interactive-role-no-keyboard",
    applies_to: MARKUP_AND_SCRIPT,
    default_severity: Severity::Error,
    wcag_criteria: &["2.1.1", "4.1.2"],
    title: "Interactive role without keyboard support",
    help: "Custom interactive roles need a keyboard handler and tabindex",
    fix_suggestions: &[
        "Add a keydown handler mirroring the click behavior",
        "Add tabindex=\"0\" so the element is focusable",
    ],
    tags: &["aria", "keyboard"],
};

pub const LIVE_REGION_MISSING: Rule = Rule {
    id: "live-region-missing",
    applies_to: SCRIPT,
    default_severity: Severity::Warning,
    wcag_criteria: &["4.1.3"],
    title: "Dynamic content without live-region announcement",
    help: "Frequent DOM mutations with no aria-live region go unannounced",
    fix_suggestions: &[
        "Wrap status output in an element with aria-live=\"polite\"",
        "Use aria-busy during long-running updates",
    ],
    tags: &["aria", "dynamic-content"],
};

// --- synthetic rules for recovered detector failures ---

pub const MARKUP_PARSE_ERROR: Rule = Rule {
    id: "markup-parse-error",
    applies_to: MARKUP,
    default_severity: Severity::Error,
    wcag_criteria: &[],
    title: "Markup analysis failed",
    help: "A markup detector failed on this file; results may be incomplete",
    fix_suggestions: &["Check the file for severely malformed markup"],
    tags: &["internal"],
};

pub const STYLESHEET_PARSE_ERROR: Rule = Rule {
    id: "stylesheet-parse-error",
    applies_to: STYLESHEET,
    default_severity: Severity::Error,
    wcag_criteria: &[],
    title: "Stylesheet analysis failed",
    help: "A stylesheet detector failed on this file; results may be incomplete",
    fix_suggestions: &["Check the file for severely malformed CSS"],
    tags: &["internal"],
};

pub const SCRIPT_PARSE_ERROR: Rule = Rule {
    id: "script-parse-error",
    applies_to: SCRIPT,
    default_severity: Severity::Error,
    wcag_criteria: &[],
    title: "Script analysis failed",
    help: "A script detector failed on this file; results may be incomplete",
    fix_suggestions: &["Check the file for severely malformed source"],
    tags: &["internal"],
};

/// Every rule in the catalog.
pub static RULES: &[Rule] = &[
    IMG_MISSING_ALT,
    IMG_REDUNDANT_ALT,
    DIV_AS_BUTTON,
    EMPTY_INTERACTIVE_ELEMENT,
    INPUT_MISSING_LABEL,
    INPUT_PLACEHOLDER_LABEL,
    LINK_TEXT_NON_DESCRIPTIVE,
    DOC_MISSING_LANG,
    DOC_MISSING_TITLE,
    IFRAME_MISSING_TITLE,
    DUPLICATE_ID,
    ARIA_LABELLEDBY_DANGLING,
    HEADING_SKIPPED_LEVEL,
    MISSING_TOP_LEVEL_HEADING,
    MISSING_FOCUS_STYLE,
    OUTLINE_NONE_NO_ALTERNATIVE,
    FONT_SIZE_UNREADABLE,
    FONT_SIZE_SMALL,
    TOUCH_TARGET_TOO_SMALL,
    DISPLAY_NONE_INTERACTIVE,
    COLOR_TRANSPARENT,
    POINTER_EVENTS_NONE_INTERACTIVE,
    COLOR_CONTRAST_INSUFFICIENT,
    SCRIPT_DIV_AS_BUTTON,
    SCRIPT_OUTLINE_REMOVAL,
    POSITIVE_TABINDEX,
    AUTOPLAY_UNMUTED,
    GLOBAL_FOCUS_SUPPRESSION,
    ARIA_ROLE_INVALID,
    ARIA_ATTR_CONFLICT,
    INTERACTIVE_ROLE_NO_KEYBOARD,
    LIVE_REGION_MISSING,
    MARKUP_PARSE_ERROR,
    STYLESHEET_PARSE_ERROR,
    SCRIPT_PARSE_ERROR,
];

static INDEX: LazyLock<HashMap<&'static str, &'static Rule>> =
    LazyLock::new(|| RULES.iter().map(|r| (r.id, r)).collect());

/// Looks up a rule by id.
#[must_use]
pub fn rule(id: &str) -> Option<&'static Rule> {
    INDEX.get(id).copied()
}

/// The synthetic parse-error rule for a category.
///
/// Returns `None` for the unsupported category, which never reaches a
/// detector in the first place.
#[must_use]
pub fn parse_error_rule(category: FileCategory) -> Option<&'static Rule> {
    match category {
        FileCategory::Markup => Some(&MARKUP_PARSE_ERROR),
        FileCategory::Stylesheet => Some(&STYLESHEET_PARSE_ERROR),
        FileCategory::Script => Some(&SCRIPT_PARSE_ERROR),
        FileCategory::Unsupported => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rule_ids_are_unique() {
        let mut seen = HashSet::new();
        for rule in RULES {
            assert!(seen.insert(rule.id), "duplicate rule id: {}", rule.id);
        }
    }

    #[test]
    fn error_rules_carry_wcag_criteria() {
        for rule in RULES {
            if rule.default_severity == Severity::Error && !rule.id.ends_with("-parse-error") {
                assert!(
                    !rule.wcag_criteria.is_empty(),
                    "error rule {} has no WCAG criteria",
                    rule.id
                );
            }
        }
    }

    #[test]
    fn parse_error_rules_have_empty_criteria() {
        for category in [
            FileCategory::Markup,
            FileCategory::Stylesheet,
            FileCategory::Script,
        ] {
            let rule = parse_error_rule(category).unwrap();
            assert!(rule.wcag_criteria.is_empty());
            assert_eq!(rule.default_severity, Severity::Error);
        }
        assert!(parse_error_rule(FileCategory::Unsupported).is_none());
    }

    #[test]
    fn lookup_finds_known_rules() {
        assert!(rule("img-missing-alt").is_some());
        assert!(rule("color-contrast-insufficient").is_some());
        assert!(rule("no-such-rule").is_none());
    }

    #[test]
    fn no_rule_applies_to_unsupported() {
        for rule in RULES {
            assert!(!rule.applies_to.contains(&FileCategory::Unsupported));
            assert!(!rule.applies_to.is_empty());
        }
    }

    #[test]
    fn violation_inherits_catalog_defaults() {
        let v = IMG_MISSING_ALT.violation("missing alt on <img src=\"x.png\">");
        assert_eq!(v.rule_id, "img-missing-alt");
        assert_eq!(v.severity, Severity::Error);
        assert_eq!(v.wcag_criteria, vec!["1.1.1"]);
        assert!(!v.fix_suggestions.is_empty());
        assert_eq!(v.line, 1);
    }
}
