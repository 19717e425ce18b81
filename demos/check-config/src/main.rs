//! Check Config Demo
//!
//! Loads a reporting configuration, resolves `$NAME` references from the
//! process environment and prints the resulting severity filters together
//! with any reference that could not be resolved.
//!
//! # Usage
//!
//! ```bash
//! GITHUB_USER=alice cargo run --package check-config -- reporting-config.yaml
//! cargo run --package check-config -- reporting-config.yaml --json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{Level, info, warn};
use vigil::logging::LoggingBuilder;
use vigil::{ReportingConfig, Severity, load_reporting_options};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(version, about = "Validate a reporting configuration file")]
struct Args {
    /// Reporting configuration file (YAML).
    config: PathBuf,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,

    /// Log level.
    #[arg(long, default_value = "info")]
    log_level: Level,
}

fn main() -> Result<()> {
    let args = Args::parse();

    LoggingBuilder::new().with_level(args.log_level).init();

    let config = load_reporting_options(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;

    if args.json {
        print_json(&config)?;
    } else {
        print_summary(&config);
    }

    if !config.report.is_complete() {
        warn!(
            count = config.report.unresolved.len(),
            "Some environment references were left unresolved"
        );
    }

    Ok(())
}

fn print_summary(config: &ReportingConfig) {
    info!(path_count = config.report.resolved.len(), "Resolved references");

    println!("allow-list: [{}]", config.filters.allow);
    println!("deny-list:  [{}]", config.filters.deny);
    println!();
    for severity in Severity::ALL {
        let verdict = if config.filters.permits(severity) {
            "report"
        } else {
            "skip"
        };
        println!("  {:<8} {verdict}", severity.as_str());
    }

    if !config.report.unresolved.is_empty() {
        println!();
        println!("unresolved references:");
        for token in &config.report.unresolved {
            println!("  {} -> ${}", token.path, token.name);
        }
    }
}

fn print_json(config: &ReportingConfig) -> Result<()> {
    let unresolved: Vec<serde_json::Value> = config
        .report
        .unresolved
        .iter()
        .map(|t| serde_json::json!({ "path": t.path, "name": t.name }))
        .collect();

    let output = serde_json::json!({
        "filters": config.filters,
        "resolved": config.report.resolved,
        "unresolved": unresolved,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
