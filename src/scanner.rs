use chrono::{SecondsFormat, Utc};
use tracing::debug;

use crate::checks::content::{self, COOKIE_KEYWORDS, PRIVACY_KEYWORDS};
use crate::checks::{https, ssl};
use crate::config::ScanSettings;
use crate::error::CheckError;
use crate::models::{Check, CheckResult, CheckStatus, RiskLevel, ScanReport};
use crate::target::ScanTarget;

/// Progress notifications emitted by [`ComplianceScanner::scan_with`].
#[derive(Debug)]
pub enum ScanEvent<'a> {
    Started(Check),
    Finished(Check, &'a CheckResult),
}

/// Runs the compliance checks against one website and accumulates the report.
///
/// Checks run one after another; a failing check is recorded and the scan moves
/// on. [`scan`](Self::scan) consumes the scanner, so the returned report cannot
/// change afterwards.
pub struct ComplianceScanner {
    target: ScanTarget,
    settings: ScanSettings,
    report: ScanReport,
}

impl ComplianceScanner {
    pub fn new(raw_url: &str, settings: ScanSettings) -> Self {
        let target = ScanTarget::new(raw_url);
        let report = ScanReport::new(target.as_str());
        Self {
            target,
            settings,
            report,
        }
    }

    pub fn target(&self) -> &ScanTarget {
        &self.target
    }

    /// Run every check in order and classify the accumulated score.
    pub async fn scan(self) -> ScanReport {
        self.scan_with(|_| {}).await
    }

    /// Like [`scan`](Self::scan), reporting each check before and after it runs.
    pub async fn scan_with<F>(mut self, mut on_event: F) -> ScanReport
    where
        F: FnMut(ScanEvent<'_>),
    {
        for check in Check::ALL {
            on_event(ScanEvent::Started(check));
            self.run(check).await;
            if let Some(result) = self.report.check(check) {
                on_event(ScanEvent::Finished(check, result));
            }
        }

        self.report.risk_level = RiskLevel::from_score(self.report.risk_score);
        debug!(
            score = self.report.risk_score,
            level = %self.report.risk_level,
            "scan complete"
        );
        self.report
    }

    async fn run(&mut self, check: Check) -> bool {
        match check {
            Check::Https => self.check_https(),
            Check::PrivacyPolicy => self.check_privacy_policy().await,
            Check::CookieBanner => self.check_cookie_banner().await,
            Check::SslCertificate => self.check_ssl_certificate().await,
        }
    }

    /// PASS iff the normalized URL uses `https`.
    pub fn check_https(&mut self) -> bool {
        let passed = https::uses_https(&self.target);
        self.record_https(passed)
    }

    /// PASS iff the page mentions a privacy policy. Fetch errors are FAIL.
    pub async fn check_privacy_policy(&mut self) -> bool {
        let page = content::fetch_page(self.target.as_str(), &self.settings).await;
        self.record_privacy_policy(page)
    }

    /// PASS or WARNING, never FAIL. Fetch errors are WARNING.
    pub async fn check_cookie_banner(&mut self) -> bool {
        let page = content::fetch_page(self.target.as_str(), &self.settings).await;
        self.record_cookie_banner(page)
    }

    /// PASS iff the certificate has not expired.
    pub async fn check_ssl_certificate(&mut self) -> bool {
        let outcome = match self.target.host() {
            Ok(host) => ssl::fetch_certificate_expiry(&host, &self.settings)
                .await
                .map(|expires| ssl::assess(expires, Utc::now())),
            Err(e) => Err(e),
        };
        self.record_ssl_certificate(outcome)
    }

    fn record_https(&mut self, passed: bool) -> bool {
        let details = "HTTPS is required for data protection";
        let status = if passed { CheckStatus::Pass } else { CheckStatus::Fail };
        self.record(Check::Https, CheckResult::new(status, details), !passed);
        passed
    }

    fn record_privacy_policy(&mut self, page: Result<String, CheckError>) -> bool {
        let (passed, details) = keyword_outcome(
            Check::PrivacyPolicy,
            "Privacy policy must be easily accessible",
            page,
            PRIVACY_KEYWORDS,
        );
        let status = if passed { CheckStatus::Pass } else { CheckStatus::Fail };
        self.record(Check::PrivacyPolicy, CheckResult::new(status, details), !passed);
        passed
    }

    fn record_cookie_banner(&mut self, page: Result<String, CheckError>) -> bool {
        let (passed, details) = keyword_outcome(
            Check::CookieBanner,
            "Cookie consent banner is required for tracking cookies",
            page,
            COOKIE_KEYWORDS,
        );
        let status = if passed { CheckStatus::Pass } else { CheckStatus::Warning };
        self.record(Check::CookieBanner, CheckResult::new(status, details), !passed);
        passed
    }

    fn record_ssl_certificate(
        &mut self,
        outcome: Result<ssl::CertificateAssessment, CheckError>,
    ) -> bool {
        match outcome {
            Ok(cert) => {
                let valid = cert.is_valid();
                let status = if valid { CheckStatus::Pass } else { CheckStatus::Fail };
                let result = CheckResult::new(
                    status,
                    format!("SSL certificate valid for {} days", cert.days_remaining),
                )
                .with_extra(
                    "expires",
                    cert.expires.to_rfc3339_opts(SecondsFormat::Secs, true),
                );
                // A valid certificate close to expiry keeps PASS but still takes
                // the renewal penalty.
                let renew = cert.needs_renewal(self.settings.expiry_warning_days);
                self.record(Check::SslCertificate, result, renew);
                valid
            }
            Err(e) => {
                log_failure(Check::SslCertificate, &e);
                let result = CheckResult::new(
                    CheckStatus::Fail,
                    format!("SSL certificate could not be verified: {}", e),
                );
                self.record(Check::SslCertificate, result, true);
                false
            }
        }
    }

    /// Store `result` and, when `triggered`, apply the check's penalty and
    /// recommendation.
    fn record(&mut self, check: Check, result: CheckResult, triggered: bool) {
        if triggered {
            self.report.risk_score += check.penalty();
            self.report
                .recommendations
                .push(check.recommendation().to_string());
        }
        self.report
            .compliance_checks
            .insert(check.key().to_string(), result);
    }
}

/// Whether any keyword matched, plus the details line. A fetch error is a
/// non-match and its message is appended to the details.
fn keyword_outcome(
    check: Check,
    details: &str,
    page: Result<String, CheckError>,
    keywords: &[&str],
) -> (bool, String) {
    match page {
        Ok(body) => match content::find_keyword(&body, keywords) {
            Some(keyword) => {
                debug!(check = check.key(), keyword, "keyword found");
                (true, details.to_string())
            }
            None => {
                debug!(check = check.key(), "no keyword found");
                (false, details.to_string())
            }
        },
        Err(e) => {
            log_failure(check, &e);
            (false, format!("{} (page could not be fetched: {})", details, e))
        }
    }
}

fn log_failure(check: Check, err: &CheckError) {
    debug!(check = check.key(), kind = err.kind(), "{} failed: {}", check, err);
}
