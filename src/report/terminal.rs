use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{title_case, CheckStatus, RiskLevel, ScanReport};

pub const DISCLAIMER: &str = "This tool provides automated analysis. For legally binding \
assessments, consult a certified data protection officer.";

/// Render a colored terminal report.
pub fn render(report: &ScanReport, verbose: bool, quiet: bool) {
    if quiet {
        println!(
            "{}  Risk: {} ({}/100)  Recommendations: {}",
            report.url,
            colored_level(report.risk_level),
            report.risk_score,
            report.recommendations.len(),
        );
        return;
    }

    println!("\n {}", "SCAN RESULTS SUMMARY".bold());
    render_table(report, verbose);

    println!();
    println!(" Risk Score: {}/100", report.risk_score);
    println!(" Risk Level: {}", colored_level(report.risk_level));

    if !report.recommendations.is_empty() {
        println!("\n {}", "RECOMMENDATIONS:".bold());
        for (i, rec) in report.recommendations.iter().enumerate() {
            println!(" {}. {}", i + 1, rec);
        }
    }

    println!("\n {}\n", DISCLAIMER.dimmed());
}

fn render_table(report: &ScanReport, verbose: bool) {
    let mut header = vec![
        Cell::new("Check").add_attribute(Attribute::Bold),
        Cell::new("Status").add_attribute(Attribute::Bold),
    ];
    if verbose {
        header.push(Cell::new("Details").add_attribute(Attribute::Bold));
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);

    for (name, result) in &report.compliance_checks {
        let (status_str, status_color) = match result.status {
            CheckStatus::Pass => ("✓ PASS", Color::Green),
            CheckStatus::Warning => ("⚠ WARNING", Color::Yellow),
            CheckStatus::Fail => ("✗ FAIL", Color::Red),
        };

        let mut row = vec![
            Cell::new(title_case(name)),
            Cell::new(status_str)
                .fg(status_color)
                .set_alignment(CellAlignment::Center),
        ];
        if verbose {
            row.push(Cell::new(&result.details));
        }
        table.add_row(row);
    }

    println!("{}", table);
}

/// One-line progress entry printed after a check finishes.
pub fn check_line(label: &str, status: CheckStatus) -> String {
    let marker = match status {
        CheckStatus::Pass => "✓ PASS".green(),
        CheckStatus::Warning => "⚠ WARNING".yellow(),
        CheckStatus::Fail => "✗ FAIL".red(),
    };
    format!("  {} {}: {}", "→".cyan(), label, marker)
}

fn colored_level(level: RiskLevel) -> ColoredString {
    match level {
        RiskLevel::Low => level.to_string().green().bold(),
        RiskLevel::Medium => level.to_string().yellow().bold(),
        RiskLevel::High => level.to_string().red().bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_line_mentions_label_and_status() {
        colored::control::set_override(false);
        assert_eq!(
            check_line("Cookie Banner", CheckStatus::Warning),
            "  → Cookie Banner: ⚠ WARNING"
        );
        assert_eq!(check_line("HTTPS Check", CheckStatus::Pass), "  → HTTPS Check: ✓ PASS");
    }
}
