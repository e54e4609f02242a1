//! Minimal standalone HTML report.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use crate::models::ScanReport;
use crate::report::terminal::DISCLAIMER;

/// Timestamped file name used when `--html` is given without a value.
pub fn default_file_name() -> String {
    format!("dsgvo_report_{}.html", Local::now().format("%Y%m%d_%H%M%S"))
}

pub fn to_html(report: &ScanReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<title>DSGVO Compliance Report</title>\n");
    html.push_str("</head>\n<body>\n");
    html.push_str("<h1>DSGVO Compliance Report</h1>\n");
    html.push_str(&format!(
        "<p>Generated: {}</p>\n",
        report.scan_date.format("%Y-%m-%d %H:%M:%S")
    ));
    html.push_str(&format!("<h2>Website: {}</h2>\n", escape_html(&report.url)));
    html.push_str(&format!(
        "<h3>Risk Level: {} ({}/100)</h3>\n",
        report.risk_level, report.risk_score
    ));

    html.push_str("<h3>Compliance Checks:</h3>\n<ul>\n");
    for (name, result) in &report.compliance_checks {
        html.push_str(&format!(
            "<li>{}: {} - {}</li>\n",
            escape_html(name),
            result.status,
            escape_html(&result.details)
        ));
    }
    html.push_str("</ul>\n");

    html.push_str("<h3>Recommendations:</h3>\n<ol>\n");
    for rec in &report.recommendations {
        html.push_str(&format!("<li>{}</li>\n", escape_html(rec)));
    }
    html.push_str("</ol>\n");

    html.push_str(&format!(
        "<footer><p><strong>Disclaimer:</strong> {}</p></footer>\n",
        DISCLAIMER
    ));
    html.push_str("</body>\n</html>\n");

    html
}

pub fn write(report: &ScanReport, path: &Path) -> Result<()> {
    std::fs::write(path, to_html(report))
        .with_context(|| format!("failed to write HTML report to {}", path.display()))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
