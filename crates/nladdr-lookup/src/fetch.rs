//! Low-level HTTP helpers shared by all provider adapters.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode, Url};

use crate::error::{ProviderError, ProviderErrorCause};

/// How an adapter interprets an HTTP 404 from its provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NotFoundPolicy {
    /// The provider answers 404 for "no such address".
    NoMatch,
    /// A 404 means the endpoint itself is wrong; report an error.
    Error,
}

/// Builds the shared outbound HTTP client with a per-request timeout.
///
/// # Errors
///
/// Returns [`reqwest::Error`] if the client cannot be constructed (e.g.,
/// invalid TLS config).
pub fn build_http_client(timeout_secs: u64, user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()
}

/// Parses a configured base URL, ensuring it ends with exactly one slash so
/// that path segments are appended rather than replacing the last segment.
pub(crate) fn parse_base_url(provider: &str, base_url: &str) -> Result<Url, ProviderError> {
    let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| {
        ProviderError::new(
            provider,
            ProviderErrorCause::NotConfigured(format!("invalid base URL '{base_url}': {e}")),
        )
    })
}

/// Appends path segments to `base`, percent-encoding each one.
pub(crate) fn join_segments(
    provider: &str,
    base: &Url,
    segments: &[&str],
) -> Result<Url, ProviderError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| {
            ProviderError::new(
                provider,
                ProviderErrorCause::NotConfigured(format!("base URL '{base}' cannot have a path")),
            )
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Sends `request` and parses the body as JSON.
///
/// Returns `Ok(None)` for an empty or `null` body, and for a 404 when the
/// adapter's policy says 404 means "no match".
pub(crate) async fn send_json(
    provider: &str,
    request: RequestBuilder,
    not_found: NotFoundPolicy,
) -> Result<Option<serde_json::Value>, ProviderError> {
    let response = request
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| ProviderError::new(provider, ProviderErrorCause::from_reqwest(&e)))?;
    let status = response.status();

    if status == StatusCode::NOT_FOUND && not_found == NotFoundPolicy::NoMatch {
        tracing::debug!(provider, "provider returned 404; treating as no match");
        return Ok(None);
    }

    if !status.is_success() {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok());
        return Err(ProviderError::new(
            provider,
            ProviderErrorCause::from_status(status, retry_after_secs),
        ));
    }

    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::new(provider, ProviderErrorCause::from_reqwest(&e)))?;
    if body.trim().is_empty() {
        return Ok(None);
    }

    let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
        ProviderError::new(provider, ProviderErrorCause::MalformedResponse(e.to_string()))
    })?;

    Ok((!value.is_null()).then_some(value))
}

/// `true` for payloads that carry no result: `{}`, `[]`, or `null`.
pub(crate) fn is_empty_payload(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_base_url_normalises_trailing_slash() {
        let url = parse_base_url("test", "https://example.com/api///").unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/");
    }

    #[test]
    fn parse_base_url_rejects_garbage() {
        let err = parse_base_url("test", "not a url").unwrap_err();
        assert!(matches!(err.cause, ProviderErrorCause::NotConfigured(_)));
    }

    #[test]
    fn join_segments_encodes_each_segment() {
        let base = parse_base_url("test", "https://example.com/root").unwrap();
        let url = join_segments("test", &base, &["api", "9711AC", "10 bis"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/root/api/9711AC/10%20bis");
    }

    #[test]
    fn empty_payload_detection() {
        assert!(is_empty_payload(&serde_json::json!(null)));
        assert!(is_empty_payload(&serde_json::json!({})));
        assert!(is_empty_payload(&serde_json::json!([])));
        assert!(!is_empty_payload(&serde_json::json!({"straat": "Vismarkt"})));
        assert!(!is_empty_payload(&serde_json::json!([{}])));
    }
}
