use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The four heuristics, in the order a scan runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Https,
    PrivacyPolicy,
    CookieBanner,
    SslCertificate,
}

impl Check {
    /// Fixed execution order of a scan.
    pub const ALL: [Check; 4] = [
        Check::Https,
        Check::PrivacyPolicy,
        Check::CookieBanner,
        Check::SslCertificate,
    ];

    /// Key under which the result is stored in `compliance_checks`.
    pub fn key(&self) -> &'static str {
        match self {
            Check::Https => "https",
            Check::PrivacyPolicy => "privacy_policy",
            Check::CookieBanner => "cookie_banner",
            Check::SslCertificate => "ssl_certificate",
        }
    }

    /// Risk points added when the check does not pass.
    pub fn penalty(&self) -> u32 {
        match self {
            Check::Https => 30,
            Check::PrivacyPolicy => 40,
            Check::CookieBanner => 20,
            Check::SslCertificate => 25,
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Check::Https => "Implement HTTPS encryption",
            Check::PrivacyPolicy => "Add privacy policy page",
            Check::CookieBanner => "Implement cookie consent banner",
            Check::SslCertificate => "Renew SSL certificate",
        }
    }
}

impl std::fmt::Display for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Check::Https => write!(f, "HTTPS Check"),
            Check::PrivacyPolicy => write!(f, "Privacy Policy"),
            Check::CookieBanner => write!(f, "Cookie Banner"),
            Check::SslCertificate => write!(f, "SSL Certificate"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Pass,
    Fail,
    Warning,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "PASS"),
            CheckStatus::Fail => write!(f, "FAIL"),
            CheckStatus::Warning => write!(f, "WARNING"),
        }
    }
}

/// Outcome of a single check as it appears in the report.
///
/// `extra` entries are flattened into the check object, so the SSL check's
/// `expires` sits next to `status` and `details` in the JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub status: CheckStatus,
    pub details: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl CheckResult {
    pub fn new(status: CheckStatus, details: impl Into<String>) -> Self {
        Self {
            status,
            details: details.into(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// `>= 70` is HIGH, `40..70` is MEDIUM, anything below is LOW.
    pub fn from_score(score: u32) -> Self {
        if score >= 70 {
            RiskLevel::High
        } else if score >= 40 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub scan_date: DateTime<Local>,
    pub url: String,
    /// Keyed by [`Check::key`], in execution order.
    pub compliance_checks: IndexMap<String, CheckResult>,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
}

impl ScanReport {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            scan_date: Local::now(),
            url: url.into(),
            compliance_checks: IndexMap::new(),
            risk_score: 0,
            risk_level: RiskLevel::from_score(0),
            recommendations: Vec::new(),
        }
    }

    pub fn check(&self, check: Check) -> Option<&CheckResult> {
        self.compliance_checks.get(check.key())
    }
}

/// Turn a report key such as `privacy_policy` into `Privacy Policy`.
pub fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
