use url::{Host, Url};

use crate::error::CheckError;

/// The website a scan runs against.
///
/// Construction never fails: the raw input is kept as the normalized string and
/// parsing problems surface later as failing checks.
#[derive(Debug, Clone)]
pub struct ScanTarget {
    url: String,
}

impl ScanTarget {
    /// Normalize user input: surrounding whitespace is dropped and `https://` is
    /// prepended when no scheme is present. Inputs that already carry a scheme
    /// are left untouched.
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        let url = if has_scheme(trimmed) {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed)
        };
        Self { url }
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn parse(&self) -> Result<Url, CheckError> {
        Ok(Url::parse(&self.url)?)
    }

    /// Scheme of the normalized URL, as typed.
    pub fn scheme(&self) -> Option<&str> {
        self.url.split_once("://").map(|(scheme, _)| scheme)
    }

    /// Host suitable for a socket connection; IPv6 literals come without brackets.
    pub fn host(&self) -> Result<String, CheckError> {
        match self.parse()?.host() {
            Some(Host::Domain(domain)) => Ok(domain.to_string()),
            Some(Host::Ipv4(addr)) => Ok(addr.to_string()),
            Some(Host::Ipv6(addr)) => Ok(addr.to_string()),
            None => Err(CheckError::MissingHost),
        }
    }
}

/// `http://` / `https://` in any case, or any other `scheme://` prefix.
fn has_scheme(input: &str) -> bool {
    let lower = input.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return true;
    }
    match input.find("://") {
        Some(idx) if idx > 0 => input[..idx]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
        _ => false,
    }
}
