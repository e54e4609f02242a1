//! `dsgvo-scanner` — flag basic DSGVO/GDPR compliance gaps of a single website.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]); a missing URL prints usage and exits `2`.
//! 2. Load config ([`config::load_config`]) and install logging ([`logging`]).
//! 3. Normalize the URL ([`target`]) and run the checks in order
//!    ([`scanner::ComplianceScanner`], [`checks`]).
//! 4. Render the report to stdout and write the JSON (and optional HTML) file ([`report`]).
//! 5. Exit `0`, or `1` when `--fail-on` is reached or a report file cannot be written.
//!
//! The result is a keyword heuristic, not a legal assessment.

mod checks;
mod cli;
mod config;
mod error;
mod logging;
mod models;
mod report;
mod scanner;
mod target;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use cli::{Cli, ReportFormat};
use config::load_config;
use models::RiskLevel;
use report::{html, json, terminal};
use scanner::{ComplianceScanner, ScanEvent};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.quiet);

    let working_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut config = load_config(&working_dir, cli.config.as_deref())?;
    if let Some(secs) = cli.timeout {
        config.scan.timeout_secs = secs;
    }

    let scanner = ComplianceScanner::new(&cli.url, config.scan);

    // Progress goes to stderr and only accompanies the terminal report.
    let show_progress = !cli.quiet && cli.report == ReportFormat::Terminal;
    if show_progress {
        eprintln!(
            "\n {} v{}",
            "dsgvo-scanner".bold(),
            env!("CARGO_PKG_VERSION")
        );
        eprintln!(" Scanning: {}\n", scanner.target().as_str());
    }

    let spinner_style = ProgressStyle::default_spinner().template("  {spinner:.green} {msg}")?;
    let mut spinner: Option<ProgressBar> = None;

    let report = if show_progress {
        scanner
            .scan_with(|event| match event {
                ScanEvent::Started(check) => {
                    let pb = ProgressBar::new_spinner();
                    pb.set_style(spinner_style.clone());
                    pb.set_message(format!("Running: {}", check));
                    pb.enable_steady_tick(Duration::from_millis(100));
                    spinner = Some(pb);
                }
                ScanEvent::Finished(check, result) => {
                    if let Some(pb) = spinner.take() {
                        pb.finish_and_clear();
                    }
                    eprintln!("{}", terminal::check_line(&check.to_string(), result.status));
                }
            })
            .await
    } else {
        scanner.scan().await
    };

    match cli.report {
        ReportFormat::Terminal => terminal::render(&report, cli.verbose, cli.quiet),
        ReportFormat::Json => println!("{}", json::to_json(&report)?),
        ReportFormat::Html => print!("{}", html::to_html(&report)),
    }

    json::write(&report, &cli.output)?;
    note_saved(&cli, "Report saved to", &cli.output);

    if let Some(path) = &cli.html {
        let path = path
            .clone()
            .unwrap_or_else(|| PathBuf::from(html::default_file_name()));
        html::write(&report, &path)?;
        note_saved(&cli, "HTML report saved to", &path);
    }

    if let Some(threshold) = cli.fail_on {
        if report.risk_level >= RiskLevel::from(threshold) {
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Report a written file on stdout for the terminal report, on stderr otherwise
/// so machine-readable stdout stays clean.
fn note_saved(cli: &Cli, what: &str, path: &std::path::Path) {
    if cli.quiet {
        return;
    }
    let line = format!(" {} {}: {}", "→".cyan(), what, path.display());
    if cli.report == ReportFormat::Terminal {
        println!("{}", line);
    } else {
        eprintln!("{}", line);
    }
}
