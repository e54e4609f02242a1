use crate::target::ScanTarget;

/// Whether the normalized URL's scheme is `https`, compared case-insensitively.
///
/// Only the scheme is inspected; a malformed remainder does not affect the result.
pub fn uses_https(target: &ScanTarget) -> bool {
    target
        .scheme()
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_scheme() {
        assert!(uses_https(&ScanTarget::new("https://example.com")));
        assert!(uses_https(&ScanTarget::new("example.com")));
    }

    #[test]
    fn test_http_scheme() {
        assert!(!uses_https(&ScanTarget::new("http://example.com")));
        assert!(!uses_https(&ScanTarget::new("ftp://example.com")));
    }

    #[test]
    fn test_uppercase_scheme() {
        assert!(uses_https(&ScanTarget::new("HTTPS://example.com")));
    }

    #[test]
    fn test_malformed_https_url_still_passes() {
        // Invalid port: the URL does not parse, but the scheme is https.
        let target = ScanTarget::new("example.com:abc");
        assert_eq!(target.as_str(), "https://example.com:abc");
        assert!(target.parse().is_err());
        assert!(uses_https(&target));
        assert!(uses_https(&ScanTarget::new("")));
    }
}
