// SPDX-License-Identifier: PMPL-1.0-or-later
//! Complexity classification: decides whether the structural detector pass
//! is worth running for a piece of markup or script content.
//!
//! This is a cheap substring scan and intentionally conservative:
//! over-triggering is fine because the structural pass is idempotent with
//! the pattern pass, while under-triggering would silently skip checks.

/// Content markers that indicate attribute relationships or dynamic
/// behavior the pattern pass cannot reason about. Matched case-insensitively.
const STRUCTURAL_MARKERS: &[&str] = &[
    // component state/lifecycle idioms
    "usestate",
    "useeffect",
    "usereducer",
    "usecallback",
    "setstate",
    "componentdidmount",
    "componentdidupdate",
    "connectedcallback",
    // ARIA usage
    "aria-",
    "role=",
    // CSS-in-JS markers
    "styled.",
    "styled(",
    "css`",
    "createglobalstyle",
    // keyboard and focus handling
    "tabindex",
    "onkeydown",
    "onkeyup",
    "onkeypress",
    ".focus(",
    ".blur(",
    // dynamic element construction
    "createelement",
    "innerhtml",
    "appendchild",
    "insertadjacenthtml",
    "addeventlistener",
];

/// Returns true when `content` needs the structural (relationship-aware)
/// detector pass in addition to the pattern pass.
#[must_use]
pub fn needs_structural_pass(content: &str) -> bool {
    let lower = content.to_ascii_lowercase();
    STRUCTURAL_MARKERS.iter().any(|m| lower.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_markup_stays_on_pattern_path() {
        assert!(!needs_structural_pass("<img src=\"logo.png\" />"));
        assert!(!needs_structural_pass("<p>Hello</p>"));
        assert!(!needs_structural_pass(""));
    }

    #[test]
    fn aria_attributes_trigger() {
        assert!(needs_structural_pass("<div aria-label=\"menu\"></div>"));
        assert!(needs_structural_pass("<span role=\"button\">go</span>"));
    }

    #[test]
    fn component_lifecycle_triggers() {
        assert!(needs_structural_pass("const [open, setOpen] = useState(false);"));
        assert!(needs_structural_pass("componentDidMount() { this.load(); }"));
    }

    #[test]
    fn keyboard_and_focus_calls_trigger() {
        assert!(needs_structural_pass("el.addEventListener('keydown', onKey);"));
        assert!(needs_structural_pass("input.focus();"));
        assert!(needs_structural_pass("<div tabIndex={0}>x</div>"));
    }

    #[test]
    fn dynamic_construction_triggers() {
        assert!(needs_structural_pass("document.createElement('div')"));
        assert!(needs_structural_pass("node.innerHTML = markup;"));
    }

    #[test]
    fn css_in_js_triggers() {
        assert!(needs_structural_pass("const Button = styled.button`padding: 4px;`;"));
    }
}
