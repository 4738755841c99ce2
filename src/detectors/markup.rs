// SPDX-License-Identifier: PMPL-1.0-or-later
//! Markup pattern detectors.
//!
//! These checks run over a tolerant HTML tree (html5ever via scraper), so
//! they never fail on malformed input; the tree builder recovers and the
//! checks see whatever structure survived. Line numbers come from substring
//! search through [`LocationResolver`], since the tree keeps no positions.

use crate::catalog;
use crate::detectors::Detector;
use crate::location::{all_offsets, tag_offsets, LocationResolver};
use crate::model::Violation;
use scraper::{Html, Selector};

/// Phrases that repeat what a screen reader already announces.
const REDUNDANT_ALT_PHRASES: &[&str] = &["image of", "picture of", "photo of"];

/// Link texts that carry no destination information.
const NON_DESCRIPTIVE_LINK_TEXT: &[&str] = &[
    "click here",
    "read more",
    "more",
    "link",
    "here",
    "learn more",
    "see more",
];

/// Input types that need no visible label.
const EXEMPT_INPUT_TYPES: &[&str] = &["hidden", "submit", "button"];

fn has_attr(el: &scraper::node::Element, name: &str) -> bool {
    el.attr(name).is_some()
}

fn has_accessible_name(el: &scraper::node::Element) -> bool {
    el.attr("aria-label").map_or(false, |v| !v.trim().is_empty())
        || el.attr("aria-labelledby").map_or(false, |v| !v.trim().is_empty())
}

/// Images without alt attributes, and alt text that restates "image of".
pub struct AltTextDetector;

impl Detector for AltTextDetector {
    fn name(&self) -> &'static str {
        "alt-text"
    }

    fn check(&self, content: &str) -> Vec<Violation> {
        if content.trim().is_empty() {
            return Vec::new();
        }

        let document = Html::parse_document(content);
        let selector = Selector::parse("img").expect("valid selector");
        let lower = content.to_ascii_lowercase();
        let resolver = LocationResolver::new(content);
        let offsets = tag_offsets(&lower, "img");
        let mut violations = Vec::new();

        for (idx, element) in document.select(&selector).enumerate() {
            let offset = offsets.get(idx).copied().unwrap_or(0);
            let (line, column) = resolver.location(offset);
            let src = element.value().attr("src").unwrap_or("");

            match element.value().attr("alt") {
                None => {
                    violations.push(
                        catalog::IMG_MISSING_ALT
                            .violation(format!(
                                "<img src=\"{src}\"> has no alt attribute; screen readers will \
                                 announce the raw filename or nothing at all."
                            ))
                            .at(line, column)
                            .with_snippet(format!("<img src=\"{src}\">")),
                    );
                }
                Some(alt) if !alt.trim().is_empty() => {
                    let alt_lower = alt.to_ascii_lowercase();
                    if REDUNDANT_ALT_PHRASES.iter().any(|p| alt_lower.contains(p)) {
                        violations.push(
                            catalog::IMG_REDUNDANT_ALT
                                .violation(format!(
                                    "Alt text \"{alt}\" repeats that this is an image; screen \
                                     readers already announce that."
                                ))
                                .at(line, column)
                                .with_snippet(format!("alt=\"{alt}\"")),
                        );
                    }
                }
                // alt="" marks a decorative image, which is correct usage
                Some(_) => {}
            }
        }

        violations
    }
}

/// Click handlers on non-semantic containers.
///
/// A div/span with onclick is an error unless it carries role="button",
/// a tabindex, AND a keyboard handler together; that combination is
/// instead evaluated by the structural keyboard-pairing check.
pub struct ClickHandlerDetector;

impl Detector for ClickHandlerDetector {
    fn name(&self) -> &'static str {
        "click-handler"
    }

    fn check(&self, content: &str) -> Vec<Violation> {
        if content.trim().is_empty() {
            return Vec::new();
        }

        let document = Html::parse_document(content);
        let selector = Selector::parse("div[onclick], span[onclick]").expect("valid selector");
        let lower = content.to_ascii_lowercase();
        let resolver = LocationResolver::new(content);
        let click_offsets = all_offsets(&lower, "onclick");
        let mut violations = Vec::new();

        for (idx, element) in document.select(&selector).enumerate() {
            let el = element.value();
            let is_button_role = el.attr("role").map_or(false, |r| r.eq_ignore_ascii_case("button"));
            let has_keyboard = has_attr(el, "onkeydown")
                || has_attr(el, "onkeyup")
                || has_attr(el, "onkeypress");

            if is_button_role && has_attr(el, "tabindex") && has_keyboard {
                continue;
            }

            let offset = click_offsets.get(idx).copied().unwrap_or(0);
            let (line, column) = resolver.location(offset);
            let tag = el.name();
            violations.push(
                catalog::DIV_AS_BUTTON
                    .violation(format!(
                        "<{tag}> carries a click handler without button semantics; assistive \
                         technology will not expose it as interactive."
                    ))
                    .at(line, column)
                    .with_snippet(format!("<{tag} onclick=...>")),
            );
        }

        violations
    }
}

/// Buttons, links, and headings with no accessible name.
pub struct EmptyInteractiveDetector;

impl Detector for EmptyInteractiveDetector {
    fn name(&self) -> &'static str {
        "empty-interactive"
    }

    fn check(&self, content: &str) -> Vec<Violation> {
        if content.trim().is_empty() {
            return Vec::new();
        }

        let document = Html::parse_document(content);
        let lower = content.to_ascii_lowercase();
        let resolver = LocationResolver::new(content);
        let mut violations = Vec::new();

        for tag in ["button", "a", "h1", "h2", "h3", "h4", "h5", "h6"] {
            let selector = Selector::parse(tag).expect("valid selector");
            let offsets = tag_offsets(&lower, tag);

            for (idx, element) in document.select(&selector).enumerate() {
                // anchors without href are not links
                if tag == "a" && !has_attr(element.value(), "href") {
                    continue;
                }

                let text: String = element.text().collect();
                if !text.trim().is_empty() || has_accessible_name(element.value()) {
                    continue;
                }

                let offset = offsets.get(idx).copied().unwrap_or(0);
                let (line, column) = resolver.location(offset);
                violations.push(
                    catalog::EMPTY_INTERACTIVE_ELEMENT
                        .violation(format!(
                            "<{tag}> has no text content and no aria-label/aria-labelledby; \
                             it is announced as unnamed."
                        ))
                        .at(line, column)
                        .with_snippet(format!("<{tag}>")),
                );
            }
        }

        violations
    }
}

/// Form inputs without an associated label, and placeholder-only labeling.
pub struct FormLabelDetector;

impl Detector for FormLabelDetector {
    fn name(&self) -> &'static str {
        "form-label"
    }

    fn check(&self, content: &str) -> Vec<Violation> {
        if content.trim().is_empty() {
            return Vec::new();
        }

        let document = Html::parse_document(content);
        let input_sel = Selector::parse("input").expect("valid selector");
        let label_sel = Selector::parse("label").expect("valid selector");
        let lower = content.to_ascii_lowercase();
        let resolver = LocationResolver::new(content);
        let offsets = tag_offsets(&lower, "input");
        let mut violations = Vec::new();

        let label_fors: Vec<&str> = document
            .select(&label_sel)
            .filter_map(|l| l.value().attr("for"))
            .collect();

        for (idx, input) in document.select(&input_sel).enumerate() {
            let el = input.value();
            let input_type = el.attr("type").unwrap_or("text").to_ascii_lowercase();
            if EXEMPT_INPUT_TYPES.contains(&input_type.as_str()) {
                continue;
            }

            let referenced = el
                .attr("id")
                .map_or(false, |id| label_fors.iter().any(|f| *f == id));
            if referenced || has_accessible_name(el) {
                continue;
            }

            let offset = offsets.get(idx).copied().unwrap_or(0);
            let (line, column) = resolver.location(offset);

            if el.attr("placeholder").is_some() {
                violations.push(
                    catalog::INPUT_PLACEHOLDER_LABEL
                        .violation(format!(
                            "<input type=\"{input_type}\"> relies on its placeholder as the only \
                             label; placeholders vanish once the user types."
                        ))
                        .at(line, column)
                        .with_snippet(format!("<input type=\"{input_type}\" placeholder=...>")),
                );
            } else {
                violations.push(
                    catalog::INPUT_MISSING_LABEL
                        .violation(format!(
                            "<input type=\"{input_type}\"> has no <label for=...>, aria-label, \
                             or aria-labelledby."
                        ))
                        .at(line, column)
                        .with_snippet(format!("<input type=\"{input_type}\">")),
                );
            }
        }

        violations
    }
}

/// Link text that says nothing about the destination.
pub struct LinkTextDetector;

impl Detector for LinkTextDetector {
    fn name(&self) -> &'static str {
        "link-text"
    }

    fn check(&self, content: &str) -> Vec<Violation> {
        if content.trim().is_empty() {
            return Vec::new();
        }

        let document = Html::parse_document(content);
        let selector = Selector::parse("a").expect("valid selector");
        let lower = content.to_ascii_lowercase();
        let resolver = LocationResolver::new(content);
        let offsets = tag_offsets(&lower, "a");
        let mut violations = Vec::new();

        for (idx, element) in document.select(&selector).enumerate() {
            let text: String = element.text().collect();
            let text = text.trim().to_ascii_lowercase();

            if !NON_DESCRIPTIVE_LINK_TEXT.contains(&text.as_str())
                || has_accessible_name(element.value())
            {
                continue;
            }

            let offset = offsets.get(idx).copied().unwrap_or(0);
            let (line, column) = resolver.location(offset);
            violations.push(
                catalog::LINK_TEXT_NON_DESCRIPTIVE
                    .violation(format!(
                        "Link text \"{text}\" does not describe its destination; screen reader \
                         users navigating by links hear it with no context."
                    ))
                    .at(line, column)
                    .with_snippet(format!("<a>{text}</a>")),
            );
        }

        violations
    }
}

/// Document-level structure checks. These only apply to full documents;
/// fragments (no `<html>` in the source) are skipped entirely.
pub struct DocumentStructureDetector;

impl Detector for DocumentStructureDetector {
    fn name(&self) -> &'static str {
        "document-structure"
    }

    fn check(&self, content: &str) -> Vec<Violation> {
        let lower = content.to_ascii_lowercase();
        if !lower.contains("<html") {
            return Vec::new();
        }

        let document = Html::parse_document(content);
        let resolver = LocationResolver::new(content);
        let mut violations = Vec::new();

        self.check_root_lang(&document, &lower, &resolver, &mut violations);
        self.check_title(&document, &mut violations);
        self.check_iframes(&document, &lower, &resolver, &mut violations);
        self.check_ids(&document, content, &lower, &resolver, &mut violations);
        self.check_headings(&document, &lower, &resolver, &mut violations);

        violations
    }
}

impl DocumentStructureDetector {
    fn check_root_lang(
        &self,
        document: &Html,
        lower: &str,
        resolver: &LocationResolver,
        violations: &mut Vec<Violation>,
    ) {
        let root = document.root_element();
        let lang_missing = root
            .value()
            .attr("lang")
            .map_or(true, |l| l.trim().is_empty());
        if lang_missing {
            let offset = tag_offsets(lower, "html").first().copied().unwrap_or(0);
            let (line, column) = resolver.location(offset);
            violations.push(
                catalog::DOC_MISSING_LANG
                    .violation(
                        "The <html> element has no lang attribute; screen readers cannot pick \
                         the right voice.",
                    )
                    .at(line, column)
                    .with_snippet("<html>"),
            );
        }
    }

    fn check_title(&self, document: &Html, violations: &mut Vec<Violation>) {
        let title_sel = Selector::parse("title").expect("valid selector");
        let has_title = document
            .select(&title_sel)
            .any(|t| !t.text().collect::<String>().trim().is_empty());
        if !has_title {
            violations.push(
                catalog::DOC_MISSING_TITLE
                    .violation("Document has no <title>; tabs and history entries stay unnamed."),
            );
        }
    }

    fn check_iframes(
        &self,
        document: &Html,
        lower: &str,
        resolver: &LocationResolver,
        violations: &mut Vec<Violation>,
    ) {
        let iframe_sel = Selector::parse("iframe").expect("valid selector");
        let offsets = tag_offsets(lower, "iframe");
        for (idx, iframe) in document.select(&iframe_sel).enumerate() {
            let titled = iframe
                .value()
                .attr("title")
                .map_or(false, |t| !t.trim().is_empty());
            if titled {
                continue;
            }
            let offset = offsets.get(idx).copied().unwrap_or(0);
            let (line, column) = resolver.location(offset);
            violations.push(
                catalog::IFRAME_MISSING_TITLE
                    .violation("<iframe> has no title; its embedded content cannot be identified.")
                    .at(line, column)
                    .with_snippet("<iframe>"),
            );
        }
    }

    fn check_ids(
        &self,
        document: &Html,
        content: &str,
        lower: &str,
        resolver: &LocationResolver,
        violations: &mut Vec<Violation>,
    ) {
        let all_sel = Selector::parse("*").expect("valid selector");
        let mut ids: Vec<&str> = Vec::new();
        let mut duplicated: Vec<&str> = Vec::new();

        for element in document.select(&all_sel) {
            if let Some(id) = element.value().attr("id") {
                if ids.contains(&id) {
                    if !duplicated.contains(&id) {
                        duplicated.push(id);
                    }
                } else {
                    ids.push(id);
                }
            }
        }

        for id in &duplicated {
            // locate the second textual occurrence of the id attribute
            let mut occurrences = all_offsets(content, &format!("id=\"{id}\""));
            occurrences.extend(all_offsets(content, &format!("id='{id}'")));
            occurrences.sort_unstable();
            let offset = occurrences.get(1).copied().unwrap_or(0);
            let (line, column) = resolver.location(offset);
            violations.push(
                catalog::DUPLICATE_ID
                    .violation(format!(
                        "id \"{id}\" appears more than once; label and ARIA references to it \
                         are ambiguous."
                    ))
                    .at(line, column)
                    .with_snippet(format!("id=\"{id}\"")),
            );
        }

        // dangling aria-labelledby references
        let labelledby_offsets = all_offsets(lower, "aria-labelledby");
        let mut labelledby_idx = 0;
        for element in document.select(&all_sel) {
            let Some(refs) = element.value().attr("aria-labelledby") else {
                continue;
            };
            let idx = labelledby_idx;
            labelledby_idx += 1;

            let missing: Vec<&str> = refs
                .split_whitespace()
                .filter(|token| !ids.contains(token))
                .collect();
            if missing.is_empty() {
                continue;
            }

            let offset = labelledby_offsets.get(idx).copied().unwrap_or(0);
            let (line, column) = resolver.location(offset);
            violations.push(
                catalog::ARIA_LABELLEDBY_DANGLING
                    .violation(format!(
                        "aria-labelledby references \"{}\" but no element has that id.",
                        missing.join("\", \"")
                    ))
                    .at(line, column)
                    .with_snippet(format!("aria-labelledby=\"{refs}\"")),
            );
        }
    }

    fn check_headings(
        &self,
        document: &Html,
        lower: &str,
        resolver: &LocationResolver,
        violations: &mut Vec<Violation>,
    ) {
        let heading_sel = Selector::parse("h1, h2, h3, h4, h5, h6").expect("valid selector");
        let levels: Vec<u8> = document
            .select(&heading_sel)
            .filter_map(|el| el.value().name().strip_prefix('h')?.parse().ok())
            .collect();

        if !levels.contains(&1) {
            violations.push(catalog::MISSING_TOP_LEVEL_HEADING.violation(
                "Document has no <h1>; the page outline has no top-level entry.",
            ));
        }

        for (i, window) in levels.windows(2).enumerate() {
            let (prev, curr) = (window[0], window[1]);
            if curr <= prev + 1 {
                continue;
            }
            // the violating heading is the (i+1)-th overall; find which
            // occurrence of its own level that is
            let occurrence = levels[..=i + 1].iter().filter(|l| **l == curr).count() - 1;
            let offsets = tag_offsets(lower, &format!("h{curr}"));
            let offset = offsets.get(occurrence).copied().unwrap_or(0);
            let (line, column) = resolver.location(offset);
            violations.push(
                catalog::HEADING_SKIPPED_LEVEL
                    .violation(format!(
                        "Heading level jumps from <h{prev}> to <h{curr}>; intermediate levels \
                         are skipped."
                    ))
                    .at(line, column)
                    .with_snippet(format!("<h{curr}>")),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Severity;

    fn rule_ids(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.rule_id.as_str()).collect()
    }

    // --- alt text ---

    #[test]
    fn img_without_alt_is_exactly_one_error() {
        let violations = AltTextDetector.check(r#"<img src="logo.png" />"#);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_id, "img-missing-alt");
        assert_eq!(violations[0].severity, Severity::Error);
        assert_eq!(violations[0].wcag_criteria, vec!["1.1.1"]);
        assert_eq!(violations[0].line, 1);
    }

    #[test]
    fn described_and_decorative_images_pass() {
        let html = r#"<img src="a.png" alt="Quarterly revenue chart"><img src="b.png" alt="">"#;
        assert!(AltTextDetector.check(html).is_empty());
    }

    #[test]
    fn redundant_alt_phrasing_warns() {
        let html = r#"<img src="a.png" alt="image of a cat">"#;
        let violations = AltTextDetector.check(html);
        assert_eq!(rule_ids(&violations), vec!["img-redundant-alt"]);
        assert_eq!(violations[0].severity, Severity::Warning);
    }

    #[test]
    fn alt_lines_follow_source_position() {
        let html = "<p>intro</p>\n<img src=\"one.png\">\n<img src=\"two.png\">";
        let violations = AltTextDetector.check(html);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].line, 2);
        assert_eq!(violations[1].line, 3);
    }

    // --- click handlers ---

    #[test]
    fn div_with_onclick_is_an_error() {
        let html = r#"<div onclick="save()">Save</div>"#;
        let violations = ClickHandlerDetector.check(html);
        assert_eq!(rule_ids(&violations), vec!["div-as-button"]);
    }

    #[test]
    fn fully_equipped_div_escapes_to_structural_check() {
        let html = r#"<div onclick="save()" role="button" tabindex="0" onkeydown="save()">Save</div>"#;
        assert!(ClickHandlerDetector.check(html).is_empty());
    }

    #[test]
    fn role_without_keyboard_handler_still_flagged() {
        let html = r#"<span onclick="go()" role="button" tabindex="0">Go</span>"#;
        let violations = ClickHandlerDetector.check(html);
        assert_eq!(rule_ids(&violations), vec!["div-as-button"]);
    }

    // --- empty interactive elements ---

    #[test]
    fn labelled_button_with_text_passes() {
        let html = r#"<button aria-label="Close">×</button>"#;
        assert!(EmptyInteractiveDetector.check(html).is_empty());
    }

    #[test]
    fn icon_button_without_name_errors() {
        let html = r#"<button><i class="icon-close"></i></button>"#;
        let violations = EmptyInteractiveDetector.check(html);
        assert_eq!(rule_ids(&violations), vec!["empty-interactive-element"]);
    }

    #[test]
    fn aria_labelled_icon_button_passes() {
        let html = r#"<button aria-label="Close dialog"><i class="icon-x"></i></button>"#;
        assert!(EmptyInteractiveDetector.check(html).is_empty());
    }

    #[test]
    fn empty_link_with_href_errors_but_named_anchor_passes() {
        let empty = r#"<a href="/next"></a>"#;
        assert_eq!(
            rule_ids(&EmptyInteractiveDetector.check(empty)),
            vec!["empty-interactive-element"]
        );
        let anchor = r#"<a id="top"></a>"#;
        assert!(EmptyInteractiveDetector.check(anchor).is_empty());
    }

    // --- form labels ---

    #[test]
    fn input_with_label_for_passes() {
        let html = r#"<label for="name">Name</label><input type="text" id="name">"#;
        assert!(FormLabelDetector.check(html).is_empty());
    }

    #[test]
    fn unlabelled_input_errors() {
        let html = r#"<input type="text">"#;
        let violations = FormLabelDetector.check(html);
        assert_eq!(rule_ids(&violations), vec!["input-missing-label"]);
        assert_eq!(violations[0].severity, Severity::Error);
    }

    #[test]
    fn placeholder_only_is_its_own_violation() {
        let html = r#"<input type="text" placeholder="Your name">"#;
        let violations = FormLabelDetector.check(html);
        assert_eq!(rule_ids(&violations), vec!["input-placeholder-label"]);
        assert_eq!(violations[0].severity, Severity::Error);
    }

    #[test]
    fn hidden_submit_and_button_inputs_are_exempt() {
        let html = r#"<input type="hidden" name="csrf"><input type="submit" value="Go"><input type="button" value="Press">"#;
        assert!(FormLabelDetector.check(html).is_empty());
    }

    #[test]
    fn aria_label_counts_as_a_label() {
        let html = r#"<input type="search" aria-label="Search the site">"#;
        assert!(FormLabelDetector.check(html).is_empty());
    }

    // --- link text ---

    #[test]
    fn denylisted_link_text_warns() {
        let html = r#"<a href="/post/42">click here</a>"#;
        let violations = LinkTextDetector.check(html);
        assert_eq!(rule_ids(&violations), vec!["link-text-non-descriptive"]);
        assert_eq!(violations[0].severity, Severity::Warning);
    }

    #[test]
    fn denylist_is_exact_match_only() {
        let html = r#"<a href="/post/42">click here for the full statistics</a>"#;
        assert!(LinkTextDetector.check(html).is_empty());
    }

    #[test]
    fn aria_label_excuses_generic_link_text() {
        let html = r#"<a href="/post/42" aria-label="Read the launch announcement">read more</a>"#;
        assert!(LinkTextDetector.check(html).is_empty());
    }

    // --- document structure ---

    fn full_doc(body: &str) -> String {
        format!(
            "<html lang=\"en\"><head><title>T</title></head><body><h1>Top</h1>{body}</body></html>"
        )
    }

    #[test]
    fn fragments_skip_document_checks() {
        assert!(DocumentStructureDetector.check(r#"<img src="x.png">"#).is_empty());
        assert!(DocumentStructureDetector.check("<p>hello</p>").is_empty());
    }

    #[test]
    fn clean_document_passes() {
        assert!(DocumentStructureDetector.check(&full_doc("<p>ok</p>")).is_empty());
    }

    #[test]
    fn missing_lang_is_an_error() {
        let html = "<html><head><title>T</title></head><body><h1>x</h1></body></html>";
        let violations = DocumentStructureDetector.check(html);
        assert_eq!(rule_ids(&violations), vec!["doc-missing-lang"]);
    }

    #[test]
    fn missing_title_warns() {
        let html = "<html lang=\"en\"><head></head><body><h1>x</h1></body></html>";
        let violations = DocumentStructureDetector.check(html);
        assert_eq!(rule_ids(&violations), vec!["doc-missing-title"]);
    }

    #[test]
    fn untitled_iframe_is_an_error() {
        let violations =
            DocumentStructureDetector.check(&full_doc(r#"<iframe src="embed.html"></iframe>"#));
        assert_eq!(rule_ids(&violations), vec!["iframe-missing-title"]);
    }

    #[test]
    fn duplicate_ids_flagged_once_per_value() {
        let violations = DocumentStructureDetector.check(&full_doc(
            r#"<p id="note">a</p><p id="note">b</p><p id="note">c</p>"#,
        ));
        assert_eq!(rule_ids(&violations), vec!["duplicate-id"]);
    }

    #[test]
    fn dangling_labelledby_is_an_error() {
        let violations = DocumentStructureDetector
            .check(&full_doc(r#"<div aria-labelledby="missing-caption">x</div>"#));
        assert_eq!(rule_ids(&violations), vec!["aria-labelledby-dangling"]);
    }

    #[test]
    fn resolved_labelledby_passes() {
        let violations = DocumentStructureDetector.check(&full_doc(
            r#"<span id="cap">Caption</span><div aria-labelledby="cap">x</div>"#,
        ));
        assert!(violations.is_empty());
    }

    #[test]
    fn skipped_heading_level_warns() {
        let violations = DocumentStructureDetector.check(&full_doc("<h3>Deep dive</h3>"));
        assert_eq!(rule_ids(&violations), vec!["heading-skipped-level"]);
    }

    #[test]
    fn document_without_h1_warns() {
        let html =
            "<html lang=\"en\"><head><title>T</title></head><body><h2>Sub</h2></body></html>";
        let violations = DocumentStructureDetector.check(html);
        assert!(rule_ids(&violations).contains(&"missing-top-level-heading"));
    }
}
