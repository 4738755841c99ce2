// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for analysis results.
//!
//! Three formats:
//! - Text: human-readable, grouped by severity, with WCAG references
//! - JSON: the batch result serialized 1:1
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI surfaces

use crate::model::{BatchResult, Severity, Violation};
use serde::Serialize;

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Structured JSON.
    Json,
    /// SARIF 2.1.0.
    Sarif,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Renders a batch result in the requested format.
#[must_use]
pub fn generate_report(batch: &BatchResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(batch),
        OutputFormat::Json => generate_json_report(batch),
        OutputFormat::Sarif => generate_sarif_report(batch),
    }
}

fn generate_text_report(batch: &BatchResult) -> String {
    use std::fmt::Write;

    let mut output = String::new();
    output.push_str("=== a11ylint WCAG 2.2 AA analysis ===\n\n");

    if batch.summary.total_violations == 0 {
        let _ = writeln!(
            output,
            "No accessibility violations found in {} file(s).",
            batch.files.len()
        );
        return output;
    }

    let _ = writeln!(
        output,
        "Found {} violation(s): {} error(s), {} warning(s), {} info in {} file(s)\n",
        batch.summary.total_violations,
        batch.summary.errors,
        batch.summary.warnings,
        batch.summary.info,
        batch.files.len()
    );

    for severity in [Severity::Error, Severity::Warning, Severity::Info] {
        let group: Vec<(&str, &Violation)> = batch
            .files
            .iter()
            .flat_map(|f| {
                f.violations
                    .iter()
                    .filter(|v| v.severity == severity)
                    .map(move |v| (f.path.as_str(), v))
            })
            .collect();
        if group.is_empty() {
            continue;
        }

        let _ = writeln!(output, "--- {severity} ({}) ---", group.len());
        for (path, violation) in group {
            let _ = writeln!(output, "[{}] {}", violation.rule_id, violation.title);
            let _ = writeln!(
                output,
                "  Location: {path}:{}:{}",
                violation.line, violation.column
            );
            let _ = writeln!(output, "  {}", violation.description);
            if !violation.wcag_criteria.is_empty() {
                let _ = writeln!(output, "  WCAG: {}", violation.wcag_criteria.join(", "));
            }
            if !violation.help.is_empty() {
                let _ = writeln!(output, "  Help: {}", violation.help);
            }
            for suggestion in &violation.fix_suggestions {
                let _ = writeln!(output, "  Fix: {suggestion}");
            }
            output.push('\n');
        }
    }

    if batch.summary.errors > 0 {
        output.push_str("RESULT: FAIL (errors found)\n");
    } else if batch.summary.warnings > 0 {
        output.push_str("RESULT: PASS WITH WARNINGS\n");
    } else {
        output.push_str("RESULT: PASS\n");
    }

    output
}

fn generate_json_report(batch: &BatchResult) -> String {
    serde_json::to_string_pretty(batch)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize results: {e}\"}}"))
}

// --- SARIF (simplified 2.1.0 subset) ---

#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
    #[serde(rename = "informationUri")]
    information_uri: String,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
    region: SarifRegion,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Debug, Serialize)]
struct SarifRegion {
    #[serde(rename = "startLine")]
    start_line: usize,
    #[serde(rename = "startColumn")]
    start_column: usize,
}

fn sarif_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "note",
    }
}

fn generate_sarif_report(batch: &BatchResult) -> String {
    let results: Vec<SarifResult> = batch
        .files
        .iter()
        .flat_map(|file| {
            file.violations.iter().map(|v| SarifResult {
                rule_id: v.rule_id.clone(),
                level: sarif_level(v.severity).to_string(),
                message: SarifMessage {
                    text: v.description.clone(),
                },
                locations: vec![SarifLocation {
                    physical_location: SarifPhysicalLocation {
                        artifact_location: SarifArtifactLocation {
                            uri: file.path.clone(),
                        },
                        region: SarifRegion {
                            start_line: v.line,
                            start_column: v.column,
                        },
                    },
                }],
            })
        })
        .collect();

    let report = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "a11ylint".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    information_uri: "https://github.com/hyperpolymath/a11ylint".to_string(),
                },
            },
            results,
        }],
    };

    serde_json::to_string_pretty(&report)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize SARIF report: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::model::AnalysisRequest;

    fn sample_batch() -> BatchResult {
        Engine::new().analyze_batch(&[
            AnalysisRequest::new("index.html", r#"<img src="logo.png">"#),
            AnalysisRequest::new("clean.js", ""),
        ])
    }

    #[test]
    fn text_report_empty_batch() {
        let batch = BatchResult::default();
        let report = generate_report(&batch, OutputFormat::Text);
        assert!(report.contains("No accessibility violations found"));
    }

    #[test]
    fn text_report_lists_violations_and_verdict() {
        let report = generate_report(&sample_batch(), OutputFormat::Text);
        assert!(report.contains("img-missing-alt"));
        assert!(report.contains("index.html:1:1"));
        assert!(report.contains("WCAG: 1.1.1"));
        assert!(report.contains("RESULT: FAIL"));
    }

    #[test]
    fn json_report_round_trips() {
        let report = generate_report(&sample_batch(), OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&report).expect("valid JSON");
        assert_eq!(parsed["files"][0]["path"], "index.html");
        assert_eq!(parsed["files"][0]["violations"][0]["ruleId"], "img-missing-alt");
        assert_eq!(parsed["summary"]["errors"], 1);
    }

    #[test]
    fn sarif_report_shape() {
        let report = generate_report(&sample_batch(), OutputFormat::Sarif);
        let parsed: serde_json::Value = serde_json::from_str(&report).expect("valid JSON");
        assert_eq!(parsed["version"], "2.1.0");
        assert_eq!(parsed["runs"][0]["tool"]["driver"]["name"], "a11ylint");
        let result = &parsed["runs"][0]["results"][0];
        assert_eq!(result["ruleId"], "img-missing-alt");
        assert_eq!(result["level"], "error");
        assert_eq!(
            result["locations"][0]["physicalLocation"]["region"]["startLine"],
            1
        );
    }

    #[test]
    fn format_parses_from_str() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("sarif".parse::<OutputFormat>().unwrap(), OutputFormat::Sarif);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
