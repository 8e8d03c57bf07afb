use thiserror::Error;

use nladdr_core::ValidationError;

/// Outcome of a single provider call: `Ok(Some)` resolved, `Ok(None)` the
/// provider understood the request but found nothing, `Err` the call failed.
pub type ProviderResult<T> = Result<Option<T>, ProviderError>;

/// Why a provider call failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderErrorCause {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    /// HTTP 401/403: the configured credential was rejected.
    #[error("credentials rejected (HTTP {status})")]
    Auth { status: u16 },

    /// HTTP 404 for providers whose 404 is not a "no match" answer.
    #[error("endpoint returned HTTP 404")]
    NotFound,

    #[error("rate limited (retry after {}s)", .retry_after_secs.map_or_else(|| "?".to_string(), |s| s.to_string()))]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("upstream failure (HTTP {status})")]
    Upstream { status: u16 },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The adapter is missing configuration and made no request.
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl ProviderErrorCause {
    /// Classifies a transport-level `reqwest` failure.
    #[must_use]
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }

    /// Classifies a non-2xx HTTP status.
    #[must_use]
    pub fn from_status(status: reqwest::StatusCode, retry_after_secs: Option<u64>) -> Self {
        match status.as_u16() {
            401 | 403 => Self::Auth {
                status: status.as_u16(),
            },
            404 => Self::NotFound,
            429 => Self::RateLimited { retry_after_secs },
            other => Self::Upstream { status: other },
        }
    }

    /// Failures that point at operator configuration rather than at the
    /// provider being down.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::NotConfigured(_) | Self::Auth { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("provider {provider} failed: {cause}")]
pub struct ProviderError {
    pub provider: String,
    pub cause: ProviderErrorCause,
}

impl ProviderError {
    #[must_use]
    pub fn new(provider: impl Into<String>, cause: ProviderErrorCause) -> Self {
        Self {
            provider: provider.into(),
            cause,
        }
    }
}

/// What one provider answered during a cascade run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    NoMatch,
    Failed(ProviderErrorCause),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderAttempt {
    pub provider: String,
    pub outcome: AttemptOutcome,
}

/// User-facing reason attached to [`LookupError::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// At least one provider answered and none knew the address.
    NoSuchAddress,
    /// Providers were reachable but none could answer.
    ServiceUnavailable,
}

impl std::fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotFoundReason::NoSuchAddress => {
                write!(f, "no address found for this postcode and house number")
            }
            NotFoundReason::ServiceUnavailable => {
                write!(f, "address lookup service is temporarily unavailable")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("{reason}")]
    NotFound {
        reason: NotFoundReason,
        attempts: Vec<ProviderAttempt>,
    },

    #[error("no address provider is usable; check provider configuration")]
    AllProvidersFailed { attempts: Vec<ProviderAttempt> },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("query must be at least {min_chars} characters")]
    QueryTooShort { min_chars: usize },
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to load pending geocode records: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        use reqwest::StatusCode;
        assert_eq!(
            ProviderErrorCause::from_status(StatusCode::UNAUTHORIZED, None),
            ProviderErrorCause::Auth { status: 401 }
        );
        assert_eq!(
            ProviderErrorCause::from_status(StatusCode::NOT_FOUND, None),
            ProviderErrorCause::NotFound
        );
        assert_eq!(
            ProviderErrorCause::from_status(StatusCode::TOO_MANY_REQUESTS, Some(30)),
            ProviderErrorCause::RateLimited {
                retry_after_secs: Some(30)
            }
        );
        assert_eq!(
            ProviderErrorCause::from_status(StatusCode::BAD_GATEWAY, None),
            ProviderErrorCause::Upstream { status: 502 }
        );
    }

    #[test]
    fn configuration_causes() {
        assert!(ProviderErrorCause::NotConfigured("no key".into()).is_configuration());
        assert!(ProviderErrorCause::Auth { status: 401 }.is_configuration());
        assert!(!ProviderErrorCause::Timeout.is_configuration());
        assert!(!ProviderErrorCause::Upstream { status: 500 }.is_configuration());
    }

    #[test]
    fn rate_limited_message_includes_retry_after() {
        let cause = ProviderErrorCause::RateLimited {
            retry_after_secs: Some(12),
        };
        assert_eq!(cause.to_string(), "rate limited (retry after 12s)");
        let cause = ProviderErrorCause::RateLimited {
            retry_after_secs: None,
        };
        assert_eq!(cause.to_string(), "rate limited (retry after ?s)");
    }

    #[test]
    fn not_found_messages_distinguish_reasons() {
        let missing = LookupError::NotFound {
            reason: NotFoundReason::NoSuchAddress,
            attempts: vec![],
        };
        let down = LookupError::NotFound {
            reason: NotFoundReason::ServiceUnavailable,
            attempts: vec![],
        };
        assert_ne!(missing.to_string(), down.to_string());
        assert!(down.to_string().contains("unavailable"));
    }
}
