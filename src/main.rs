// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11ylint CLI - static WCAG 2.2 AA accessibility linter.

use a11ylint::dedup::DEFAULT_PROXIMITY_WINDOW;
use a11ylint::engine::{Engine, EngineOptions, RuleFilter};
use a11ylint::model::Severity;
use a11ylint::report::{generate_report, OutputFormat};
use a11ylint::{catalog, scanner};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Static WCAG 2.2 AA accessibility linter for markup, stylesheets, and scripts
#[derive(Parser)]
#[command(name = "a11ylint")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Disable rules (comma-separated rule ids)
    #[arg(long, global = true, value_delimiter = ',')]
    disable: Vec<String>,

    /// Override a rule's severity, e.g. --severity img-missing-alt=warning
    #[arg(long, global = true)]
    severity: Vec<String>,

    /// Line-proximity window for duplicate collapsing
    #[arg(long, global = true, default_value_t = DEFAULT_PROXIMITY_WINDOW)]
    dedup_window: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a directory tree for accessibility violations
    Check {
        /// Directory to scan
        dir: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Analyze a single file
    Analyze {
        /// File to analyze
        file: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,
    },

    /// Generate a SARIF report for a directory
    Report {
        /// Directory to scan
        dir: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List every rule in the catalog
    ListRules,
}

/// Output format CLI argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("a11ylint=debug")
    } else {
        EnvFilter::new("a11ylint=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Builds the engine's rule filter from `--disable` and `--severity` flags.
fn build_filter(disable: &[String], severity: &[String]) -> Result<RuleFilter> {
    let mut filter = RuleFilter::new();

    for id in disable {
        if catalog::rule(id).is_none() {
            bail!("unknown rule id in --disable: {id}");
        }
        filter = filter.disable(id.clone());
    }

    for spec in severity {
        let Some((id, level)) = spec.split_once('=') else {
            bail!("--severity expects rule-id=level, got: {spec}");
        };
        if catalog::rule(id).is_none() {
            bail!("unknown rule id in --severity: {id}");
        }
        let level: Severity = level
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
            .with_context(|| format!("bad severity in: {spec}"))?;
        filter = filter.override_severity(id, level);
    }

    Ok(filter)
}

fn write_output(content: &str, path: Option<&std::path::Path>) -> Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)
                .with_context(|| format!("writing report to {}", p.display()))?;
            eprintln!("Report written to {}", p.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let engine = Engine::with_options(EngineOptions {
        filter: build_filter(&cli.disable, &cli.severity)?,
        dedup_window: cli.dedup_window,
    });

    match cli.command {
        Commands::Check { dir, format, output } => {
            let batch = scanner::scan_directory(&dir, &engine)?;
            let report = generate_report(&batch, format.into());
            write_output(&report, output.as_deref())?;

            if batch.total_violations() > 0 {
                std::process::exit(1);
            }
        }

        Commands::Analyze { file, format } => {
            let batch = scanner::scan_file(&file, &engine)?;
            let report = generate_report(&batch, format.into());
            println!("{report}");

            if batch.total_violations() > 0 {
                std::process::exit(1);
            }
        }

        Commands::Report { dir, output } => {
            let batch = scanner::scan_directory(&dir, &engine)?;
            let report = generate_report(&batch, OutputFormat::Sarif);
            write_output(&report, output.as_deref())?;
        }

        Commands::ListRules => {
            for rule in catalog::RULES {
                let categories: Vec<String> =
                    rule.applies_to.iter().map(|c| c.to_string()).collect();
                let criteria = if rule.wcag_criteria.is_empty() {
                    "-".to_string()
                } else {
                    rule.wcag_criteria.join(", ")
                };
                println!(
                    "{:<36} {:<9} [{}] WCAG {}",
                    rule.id,
                    rule.default_severity.to_string().to_ascii_lowercase(),
                    categories.join(", "),
                    criteria
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_builds_from_flags() {
        let filter = build_filter(
            &["img-missing-alt".to_string()],
            &["duplicate-id=warning".to_string()],
        )
        .expect("valid flags");
        assert!(!filter.is_enabled("img-missing-alt"));
        assert!(filter.is_enabled("duplicate-id"));
        assert_eq!(
            filter.severity_override("duplicate-id"),
            Some(Severity::Warning)
        );
    }

    #[test]
    fn unknown_rule_ids_are_rejected() {
        assert!(build_filter(&["no-such-rule".to_string()], &[]).is_err());
        assert!(build_filter(&[], &["no-such-rule=info".to_string()]).is_err());
        assert!(build_filter(&[], &["img-missing-alt=loud".to_string()]).is_err());
        assert!(build_filter(&[], &["missing-equals".to_string()]).is_err());
    }
}
