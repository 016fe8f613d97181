//! HTTP plumbing shared by the downstream service clients.

use std::time::Duration;

use super::domain::SyncError;

/// Connection settings common to every downstream service.
#[derive(Debug, Clone, Copy)]
pub struct HttpOptions {
    pub timeout: Duration,
    /// Accept self-signed certificates
    pub accept_invalid_certs: bool,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }
}

/// Build a `reqwest` client for a downstream service.
pub fn build_client(options: HttpOptions) -> Result<reqwest::Client, SyncError> {
    if options.accept_invalid_certs {
        tracing::warn!("TLS certificate verification is disabled");
    }

    reqwest::Client::builder()
        .timeout(options.timeout)
        .danger_accept_invalid_certs(options.accept_invalid_certs)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .map_err(|e| SyncError::Client(e.to_string()))
}

/// Strip trailing slashes so paths can be appended with `/`.
pub fn normalize_host(host: &str) -> String {
    host.trim().trim_end_matches('/').to_string()
}

/// Turn a non-success response body into an API error, keeping it short.
pub fn api_error(status: reqwest::StatusCode, body: &str) -> SyncError {
    SyncError::Api {
        status: status.as_u16(),
        message: truncate(body, 300),
    }
}

/// Keep at most `max` characters of `text`.
pub fn truncate(text: &str, max: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_host() {
        assert_eq!(normalize_host("http://radarr:7878/"), "http://radarr:7878");
        assert_eq!(normalize_host(" http://radarr:7878 "), "http://radarr:7878");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("éééé", 2), "éé...");
    }

    #[test]
    fn test_api_error_keeps_status() {
        let err = api_error(reqwest::StatusCode::UNAUTHORIZED, "Unauthorized");
        assert!(matches!(err, SyncError::Api { status: 401, .. }));
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(HttpOptions::default()).is_ok());
    }
}
