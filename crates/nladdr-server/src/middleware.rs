use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::ApiError;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Shared secret guarding the job trigger routes.
#[derive(Clone)]
pub struct JobAuth {
    secret: Option<Arc<str>>,
}

impl JobAuth {
    #[must_use]
    pub fn new(secret: Option<&str>) -> Self {
        let secret = secret.map(str::trim).filter(|s| !s.is_empty()).map(Arc::from);
        if secret.is_none() {
            tracing::warn!("NLADDR_JOB_SECRET not set; job trigger routes will answer 503");
        }
        Self { secret }
    }

    fn allows(secret: &str, token: &str) -> bool {
        secret.as_bytes().ct_eq(token.as_bytes()).into()
    }
}

impl std::fmt::Debug for JobAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobAuth")
            .field("configured", &self.secret.is_some())
            .finish()
    }
}

#[derive(Debug, Clone)]
struct RateLimitWindow {
    started_at: Instant,
    count: usize,
}

/// Sliding fixed-window limiter for simple API protection.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    state: Arc<Mutex<RateLimitWindow>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            state: Arc::new(Mutex::new(RateLimitWindow {
                started_at: Instant::now(),
                count: 0,
            })),
        }
    }
}

/// Error response in the same envelope as handler errors, carrying the
/// request ID assigned by [`request_id`].
fn middleware_error(req: &Request, code: &str, message: &str) -> Response {
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map_or_else(|| Uuid::new_v4().to_string(), |id| id.0.clone());
    ApiError::new(request_id, code, message).into_response()
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware guarding job triggers with the configured shared secret.
///
/// A missing secret is reported as `config_missing` (503) before the token
/// is even looked at; a missing or wrong token is `unauthorized` (401).
/// Either way the request never reaches the handler.
pub async fn require_job_secret(
    State(auth): State<JobAuth>,
    req: Request,
    next: Next,
) -> Response {
    let Some(secret) = auth.secret.as_deref() else {
        return middleware_error(&req, "config_missing", "job secret is not configured");
    };

    match extract_bearer_token(req.headers().get(AUTHORIZATION)) {
        Some(token) if JobAuth::allows(secret, token) => next.run(req).await,
        _ => middleware_error(&req, "unauthorized", "missing or invalid bearer token"),
    }
}

/// Middleware enforcing a fixed request-per-window limit.
pub async fn enforce_rate_limit(
    State(rate_limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    let mut window = rate_limit.state.lock().await;
    let elapsed = window.started_at.elapsed();

    if elapsed >= rate_limit.window {
        window.started_at = Instant::now();
        window.count = 0;
    }

    if window.count >= rate_limit.max_requests {
        return middleware_error(&req, "rate_limited", "rate limit exceeded");
    }

    window.count += 1;
    drop(window);

    next.run(req).await
}

fn extract_bearer_token(value: Option<&HeaderValue>) -> Option<&str> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_bearer_token_accepts_valid_header() {
        let header = HeaderValue::from_static("Bearer test-token");
        assert_eq!(extract_bearer_token(Some(&header)), Some("test-token"));
    }

    #[test]
    fn extract_bearer_token_rejects_non_bearer_header() {
        let header = HeaderValue::from_static("Basic abc123");
        assert_eq!(extract_bearer_token(Some(&header)), None);
    }

    #[test]
    fn secret_comparison_requires_exact_match() {
        assert!(JobAuth::allows("s3cret", "s3cret"));
        assert!(!JobAuth::allows("s3cret", "s3cre"));
        assert!(!JobAuth::allows("s3cret", "S3CRET"));
        assert!(!JobAuth::allows("s3cret", ""));
    }

    #[test]
    fn blank_secret_counts_as_unconfigured() {
        assert!(JobAuth::new(Some("   ")).secret.is_none());
        assert!(JobAuth::new(None).secret.is_none());
        assert!(JobAuth::new(Some("x")).secret.is_some());
    }

    #[test]
    fn debug_does_not_print_secret() {
        let debug = format!("{:?}", JobAuth::new(Some("s3cret")));
        assert!(!debug.contains("s3cret"));
    }
}
