// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color contrast evaluation over stylesheet rule blocks.
//!
//! Extracts `color` / `background-color` pairs per rule block, computes the
//! WCAG relative-luminance contrast ratio, and flags pairs below 4.5:1
//! (3:1 when the block styles large text). Blocks missing either
//! declaration are skipped: an incomputable pair is not assumed to fail.

use crate::catalog;
use crate::detectors::stylesheet::rule_blocks;
use crate::location::LocationResolver;
use crate::model::Violation;
use regex::Regex;
use std::sync::LazyLock;

static FG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|[;{\s])color\s*:\s*([^;{}]+)").unwrap());
static BG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bbackground(?:-color)?\s*:\s*([^;{}]+)").unwrap());
static RGB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)").unwrap());
static FONT_SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bfont-size\s*:\s*([\d.]+)\s*(px|pt|rem|em)").unwrap());
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bfont-weight\s*:\s*(bold|[7-9]00)").unwrap());

/// Parses a 3- or 6-digit hex color into RGB components.
#[must_use]
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some((r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Parses an `rgb()` / `rgba()` color into RGB components.
#[must_use]
pub fn parse_rgb_color(value: &str) -> Option<(u8, u8, u8)> {
    let caps = RGB_RE.captures(value)?;
    let r: u8 = caps[1].parse().ok()?;
    let g: u8 = caps[2].parse().ok()?;
    let b: u8 = caps[3].parse().ok()?;
    Some((r, g, b))
}

/// Parses a named CSS color from the basic color table.
#[must_use]
pub fn parse_named_color(name: &str) -> Option<(u8, u8, u8)> {
    match name {
        "white" => Some((255, 255, 255)),
        "black" => Some((0, 0, 0)),
        "red" => Some((255, 0, 0)),
        "green" => Some((0, 128, 0)),
        "blue" => Some((0, 0, 255)),
        "yellow" => Some((255, 255, 0)),
        "gray" | "grey" => Some((128, 128, 128)),
        "silver" => Some((192, 192, 192)),
        "maroon" => Some((128, 0, 0)),
        "olive" => Some((128, 128, 0)),
        "lime" => Some((0, 255, 0)),
        "aqua" | "cyan" => Some((0, 255, 255)),
        "teal" => Some((0, 128, 128)),
        "navy" => Some((0, 0, 128)),
        "fuchsia" | "magenta" => Some((255, 0, 255)),
        "purple" => Some((128, 0, 128)),
        "orange" => Some((255, 165, 0)),
        _ => None,
    }
}

/// Parses any supported CSS color value.
#[must_use]
pub fn parse_color(value: &str) -> Option<(u8, u8, u8)> {
    let trimmed = value.trim().to_ascii_lowercase();
    if trimmed.starts_with('#') {
        parse_hex_color(&trimmed)
    } else if trimmed.starts_with("rgb") {
        parse_rgb_color(&trimmed)
    } else {
        parse_named_color(&trimmed)
    }
}

/// Relative luminance per the WCAG formula:
/// `L = 0.2126 R' + 0.7152 G' + 0.0722 B'` with
/// `c' = c/12.92` for `c <= 0.03928`, else `((c + 0.055) / 1.055)^2.4`.
#[must_use]
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    let channel = |c: u8| {
        let v = f64::from(c) / 255.0;
        if v <= 0.03928 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
}

/// Contrast ratio between two colors: `(Lmax + 0.05) / (Lmin + 0.05)`,
/// always >= 1.0.
#[must_use]
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Whether a rule block styles large text, which gets the relaxed 3:1
/// threshold: font-size >= 24px, or >= 18.5px together with a bold weight.
fn is_large_text(body: &str) -> bool {
    let Some(caps) = FONT_SIZE_RE.captures(body) else {
        return false;
    };
    let Ok(size) = caps[1].parse::<f64>() else {
        return false;
    };
    let px = match caps[2].to_ascii_lowercase().as_str() {
        "pt" => size * 4.0 / 3.0,
        "rem" | "em" => size * 16.0,
        _ => size,
    };
    px >= 24.0 || (px >= 18.5 && BOLD_RE.is_match(body))
}

/// Evaluates contrast for every computable color pair in the stylesheet.
#[must_use]
pub fn evaluate(content: &str) -> Vec<Violation> {
    let resolver = LocationResolver::new(content);
    let mut violations = Vec::new();

    for block in rule_blocks(content) {
        let fg_caps = FG_RE.captures(block.body);
        let bg_caps = BG_RE.captures(block.body);
        let (Some(fg_caps), Some(bg_caps)) = (fg_caps, bg_caps) else {
            continue;
        };

        let fg = parse_color(fg_caps.get(1).map_or("", |m| m.as_str()));
        let bg = parse_color(bg_caps.get(1).map_or("", |m| m.as_str()));
        let (Some(fg), Some(bg)) = (fg, bg) else {
            continue;
        };

        let ratio = contrast_ratio(fg, bg);
        let threshold = if is_large_text(block.body) { 3.0 } else { 4.5 };
        if ratio >= threshold {
            continue;
        }

        let offset = block.body_offset + fg_caps.get(1).map_or(0, |m| m.start());
        let (line, column) = resolver.location(offset);
        violations.push(
            catalog::COLOR_CONTRAST_INSUFFICIENT
                .violation(format!(
                    "\"{}\" has a contrast ratio of {ratio:.2}:1, below the required {threshold}:1.",
                    block.selector
                ))
                .at(line, column)
                .with_snippet(format!(
                    "color: {}; background-color: {}",
                    fg_caps.get(1).map_or("", |m| m.as_str()).trim(),
                    bg_caps.get(1).map_or("", |m| m.as_str()).trim()
                )),
        );
    }

    violations
}
