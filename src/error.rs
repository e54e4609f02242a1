use thiserror::Error;

/// Everything that can go wrong inside a single check.
///
/// These never leave the scanner: each variant is turned into a failing
/// check result and logged.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("URL has no host")]
    MissingHost,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server responded with HTTP {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("connection to {host}:{port} failed: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("timed out after {0} seconds")]
    Timeout(u64),

    #[error("TLS handshake failed: {0}")]
    Tls(#[from] native_tls::Error),

    #[error("server presented no certificate")]
    NoCertificate,

    #[error("malformed certificate: {0}")]
    Certificate(#[from] openssl::error::ErrorStack),

    #[error("certificate expiry is out of range")]
    ExpiryOutOfRange,
}

impl CheckError {
    /// Short category used in logs and failure details.
    pub fn kind(&self) -> &'static str {
        match self {
            CheckError::InvalidUrl(_) | CheckError::MissingHost => "parse",
            CheckError::Request(_) | CheckError::Connect { .. } | CheckError::Timeout(_) => {
                "network"
            }
            CheckError::HttpStatus(_) => "http",
            CheckError::Tls(_) => "protocol",
            CheckError::NoCertificate
            | CheckError::Certificate(_)
            | CheckError::ExpiryOutOfRange => "certificate",
        }
    }
}
