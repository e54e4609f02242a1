use reqwest::Client;
use tracing::debug;

use crate::config::ScanSettings;
use crate::error::CheckError;

/// Indicators of a reachable privacy policy.
pub const PRIVACY_KEYWORDS: &[&str] = &[
    "datenschutz",
    "datenschutzerklärung",
    "privacy policy",
    "datenschutzbestimmungen",
    "privacy",
];

/// Indicators of a cookie consent banner.
pub const COOKIE_KEYWORDS: &[&str] = &[
    "cookie",
    "cookies",
    "einwilligung",
    "consent",
    "datenschutzhinweise",
    "cookie-richtlinie",
];

/// Fetch the page body. Non-2xx responses are errors.
pub async fn fetch_page(url: &str, settings: &ScanSettings) -> Result<String, CheckError> {
    let client = Client::builder()
        .timeout(settings.timeout())
        .user_agent(settings.user_agent.as_str())
        .build()?;

    debug!(url, timeout_secs = settings.timeout_secs, "fetching page");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| request_error(e, settings))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CheckError::HttpStatus(status));
    }

    let body = response
        .text()
        .await
        .map_err(|e| request_error(e, settings))?;
    debug!(url, bytes = body.len(), "page fetched");

    Ok(body)
}

fn request_error(err: reqwest::Error, settings: &ScanSettings) -> CheckError {
    if err.is_timeout() {
        CheckError::Timeout(settings.timeout_secs)
    } else {
        CheckError::Request(err)
    }
}

/// First keyword contained in `body`, compared case-insensitively.
pub fn find_keyword<'k>(body: &str, keywords: &[&'k str]) -> Option<&'k str> {
    let content = body.to_lowercase();
    keywords.iter().copied().find(|kw| content.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(timeout_secs: u64) -> ScanSettings {
        ScanSettings {
            timeout_secs,
            ..ScanSettings::default()
        }
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let body = "<footer><a href=\"/privacy\">PRIVACY POLICY</a></footer>";
        assert_eq!(find_keyword(body, PRIVACY_KEYWORDS), Some("privacy policy"));
        assert_eq!(find_keyword("Privacy Policy", PRIVACY_KEYWORDS), Some("privacy policy"));
    }

    #[test]
    fn test_umlaut_keyword_matches_uppercase() {
        let body = "<a>DATENSCHUTZERKLÄRUNG</a>";
        assert!(find_keyword(body, PRIVACY_KEYWORDS).is_some());
    }

    #[test]
    fn test_no_keyword() {
        assert_eq!(find_keyword("<h1>Willkommen</h1>", PRIVACY_KEYWORDS), None);
        assert_eq!(find_keyword("<h1>Willkommen</h1>", COOKIE_KEYWORDS), None);
    }

    #[test]
    fn test_cookie_keywords() {
        assert_eq!(
            find_keyword("Wir benötigen Ihre Einwilligung", COOKIE_KEYWORDS),
            Some("einwilligung")
        );
        assert_eq!(find_keyword("Accept Cookies", COOKIE_KEYWORDS), Some("cookie"));
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<a>Datenschutz</a>"))
            .mount(&server)
            .await;

        let body = fetch_page(&server.uri(), &settings(5)).await.unwrap();
        assert_eq!(body, "<a>Datenschutz</a>");
    }

    #[tokio::test]
    async fn test_fetch_sends_user_agent() {
        let server = MockServer::start().await;
        let cfg = ScanSettings {
            user_agent: "audit-bot/1.0".to_string(),
            ..settings(5)
        };
        Mock::given(method("GET"))
            .and(header("user-agent", "audit-bot/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        fetch_page(&server.uri(), &cfg).await.unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("privacy"))
            .mount(&server)
            .await;

        let err = fetch_page(&server.uri(), &settings(5)).await.unwrap_err();
        assert!(matches!(err, CheckError::HttpStatus(s) if s.as_u16() == 404));
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("privacy")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let err = fetch_page(&server.uri(), &settings(1)).await.unwrap_err();
        assert!(matches!(err, CheckError::Timeout(1)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_an_error() {
        // Port 9 (discard) on localhost is not expected to accept connections.
        let err = fetch_page("http://127.0.0.1:9/", &settings(2)).await.unwrap_err();
        assert_eq!(err.kind(), "network");
    }
}
