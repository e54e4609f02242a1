use chrono::{DateTime, Utc};
use openssl::asn1::Asn1Time;
use openssl::x509::{X509, X509Ref};
use tokio::net::TcpStream;
use tracing::debug;

use crate::config::ScanSettings;
use crate::error::CheckError;

const SECS_PER_DAY: i64 = 86_400;

/// Expiry of a certificate relative to the moment it was inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateAssessment {
    pub expires: DateTime<Utc>,
    /// Whole days left, rounded down. Negative once expired.
    pub days_remaining: i64,
}

impl CertificateAssessment {
    pub fn is_valid(&self) -> bool {
        self.days_remaining > 0
    }

    /// Expired, or valid for fewer than `warning_days` days.
    ///
    /// A certificate can be valid and still need renewal; the report keeps its
    /// PASS status while the risk score takes the penalty.
    pub fn needs_renewal(&self, warning_days: i64) -> bool {
        !self.is_valid() || self.days_remaining < warning_days
    }
}

pub fn assess(expires: DateTime<Utc>, now: DateTime<Utc>) -> CertificateAssessment {
    let secs = (expires - now).num_seconds();
    CertificateAssessment {
        expires,
        days_remaining: secs.div_euclid(SECS_PER_DAY),
    }
}

/// Connect to `host` on the configured TLS port and return the peer
/// certificate's `notAfter`. The whole exchange is bounded by the scan timeout.
pub async fn fetch_certificate_expiry(
    host: &str,
    settings: &ScanSettings,
) -> Result<DateTime<Utc>, CheckError> {
    tokio::time::timeout(settings.timeout(), handshake(host, settings.tls_port))
        .await
        .map_err(|_| CheckError::Timeout(settings.timeout_secs))?
}

async fn handshake(host: &str, port: u16) -> Result<DateTime<Utc>, CheckError> {
    debug!(host, port, "opening TLS connection");

    let tcp = TcpStream::connect((host, port))
        .await
        .map_err(|source| CheckError::Connect {
            host: host.to_string(),
            port,
            source,
        })?;

    let connector = tokio_native_tls::TlsConnector::from(native_tls::TlsConnector::new()?);
    let stream = connector.connect(host, tcp).await?;

    let cert = stream
        .get_ref()
        .peer_certificate()?
        .ok_or(CheckError::NoCertificate)?;
    let x509 = X509::from_der(&cert.to_der()?)?;
    let expires = not_after(&x509)?;

    debug!(host, %expires, "certificate retrieved");
    Ok(expires)
}

/// `notAfter` of `cert` as a UTC timestamp.
pub fn not_after(cert: &X509Ref) -> Result<DateTime<Utc>, CheckError> {
    let epoch = Asn1Time::from_unix(0)?;
    let diff = epoch.diff(cert.not_after())?;
    let secs = i64::from(diff.days) * SECS_PER_DAY + i64::from(diff.secs);
    DateTime::from_timestamp(secs, 0).ok_or(CheckError::ExpiryOutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use openssl::hash::MessageDigest;
    use openssl::pkey::PKey;
    use openssl::rsa::Rsa;
    use openssl::x509::X509NameBuilder;

    fn self_signed(not_after_unix: i64) -> X509 {
        let key = PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap();
        let mut name = X509NameBuilder::new().unwrap();
        name.append_entry_by_text("CN", "dsgvo.test").unwrap();
        let name = name.build();

        let mut builder = X509::builder().unwrap();
        builder.set_version(2).unwrap();
        builder.set_subject_name(&name).unwrap();
        builder.set_issuer_name(&name).unwrap();
        builder.set_pubkey(&key).unwrap();
        builder
            .set_not_before(&Asn1Time::from_unix(1_600_000_000).unwrap())
            .unwrap();
        builder
            .set_not_after(&Asn1Time::from_unix(not_after_unix).unwrap())
            .unwrap();
        builder.sign(&key, MessageDigest::sha256()).unwrap();
        builder.build()
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_not_after_from_certificate() {
        let cert = self_signed(1_800_000_000);
        assert_eq!(not_after(&cert).unwrap(), at(1_800_000_000));
    }

    #[test]
    fn test_assess_long_validity() {
        let now = at(1_700_000_000);
        let a = assess(now + Duration::days(90), now);
        assert_eq!(a.days_remaining, 90);
        assert!(a.is_valid());
        assert!(!a.needs_renewal(30));
    }

    #[test]
    fn test_assess_expiring_soon_is_valid_but_needs_renewal() {
        let now = at(1_700_000_000);
        let a = assess(now + Duration::days(10), now);
        assert_eq!(a.days_remaining, 10);
        assert!(a.is_valid());
        assert!(a.needs_renewal(30));
    }

    #[test]
    fn test_assess_boundary_at_warning_days() {
        let now = at(1_700_000_000);
        assert!(!assess(now + Duration::days(30), now).needs_renewal(30));
        assert!(assess(now + Duration::days(29), now).needs_renewal(30));
    }

    #[test]
    fn test_partial_day_rounds_down() {
        let now = at(1_700_000_000);
        let a = assess(now + Duration::hours(12), now);
        assert_eq!(a.days_remaining, 0);
        assert!(!a.is_valid());
    }

    #[test]
    fn test_expired_certificate() {
        let now = at(1_700_000_000);
        let a = assess(now - Duration::hours(1), now);
        assert_eq!(a.days_remaining, -1);
        assert!(!a.is_valid());
        assert!(a.needs_renewal(30));
    }

    #[tokio::test]
    async fn test_refused_connection_is_an_error() {
        let settings = ScanSettings {
            timeout_secs: 2,
            tls_port: 9,
            ..ScanSettings::default()
        };
        let err = fetch_certificate_expiry("127.0.0.1", &settings)
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::Connect { .. } | CheckError::Timeout(_)));
    }
}
