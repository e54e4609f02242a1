use std::path::Path;

use anyhow::{Context, Result};

use crate::models::ScanReport;

/// Default file the CLI writes the JSON report to.
pub const DEFAULT_REPORT_FILE: &str = "dsgvo_report.json";

/// Pretty-printed JSON. Non-ASCII text (umlauts in details) is kept as UTF-8.
pub fn to_json(report: &ScanReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn write(report: &ScanReport, path: &Path) -> Result<()> {
    let json = to_json(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CheckResult, CheckStatus, RiskLevel};

    fn sample() -> ScanReport {
        let mut report = ScanReport::new("https://bäckerei-müller.de");
        report.compliance_checks.insert(
            "ssl_certificate".into(),
            CheckResult::new(CheckStatus::Pass, "SSL certificate valid for 10 days")
                .with_extra("expires", "2026-10-27T12:00:00Z"),
        );
        report.compliance_checks.insert(
            "https".into(),
            CheckResult::new(CheckStatus::Pass, "HTTPS is required for data protection"),
        );
        report.risk_score = 25;
        report.risk_level = RiskLevel::Low;
        report.recommendations.push("Renew SSL certificate".into());
        report
    }

    #[test]
    fn test_field_names() {
        let value: serde_json::Value = serde_json::from_str(&to_json(&sample()).unwrap()).unwrap();
        for field in [
            "scan_date",
            "url",
            "compliance_checks",
            "risk_score",
            "risk_level",
            "recommendations",
        ] {
            assert!(value.get(field).is_some(), "missing {}", field);
        }
        assert_eq!(value["risk_level"], "LOW");
        assert_eq!(
            value["compliance_checks"]["ssl_certificate"]["expires"],
            "2026-10-27T12:00:00Z"
        );
    }

    #[test]
    fn test_utf8_not_escaped_and_indented() {
        let json = to_json(&sample()).unwrap();
        assert!(json.contains("bäckerei-müller.de"));
        assert!(json.contains("\n  \"url\""));
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_REPORT_FILE);
        let report = sample();

        write(&report, &path).unwrap();
        let parsed: ScanReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(parsed, report);
        let keys: Vec<&str> = parsed.compliance_checks.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["ssl_certificate", "https"]);
    }

    #[test]
    fn test_write_to_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.json");
        assert!(write(&sample(), &path).is_err());
    }
}
