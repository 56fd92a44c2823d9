//! Type definitions for the proxy module

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use nutype::nutype;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Fixed upstream call timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Host-plus-path segment naming the upstream destination, taken verbatim
/// from the request path after the `/proxy/` prefix
#[nutype(
    derive(Clone, Debug, Display, Deserialize, Serialize, TryFrom, AsRef),
    validate(predicate = |s: &str| !s.is_empty()),
)]
pub struct ProxyTarget(String);

/// Scheme prefixed onto the target host. Fixed to `https` in production;
/// tests substitute `http` to reach local mock upstreams.
#[nutype(
    derive(Clone, Debug, Display, PartialEq, Eq, Deserialize, Serialize, TryFrom, AsRef),
    validate(predicate = |s: &str| s == "http" || s == "https"),
)]
pub struct UpstreamScheme(String);

impl UpstreamScheme {
    pub fn https() -> Self {
        Self::try_new("https".to_string()).expect("https is a valid scheme")
    }

    pub fn http() -> Self {
        Self::try_new("http".to_string()).expect("http is a valid scheme")
    }
}

/// Request ID correlating proxy log lines for one forwarded call
#[derive(Clone, Copy, Debug, serde::Deserialize, serde::Serialize)]
pub struct RequestId(Uuid);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for RequestId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl AsRef<Uuid> for RequestId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl RequestId {
    pub fn new() -> Self {
        Self::from(Uuid::now_v7())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

/// Proxy configuration
#[derive(Clone, Debug)]
pub struct ProxyConfig {
    /// Scheme prefixed onto the caller-supplied target
    pub upstream_scheme: UpstreamScheme,
    /// Timeout applied to each upstream call
    pub request_timeout: Duration,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            upstream_scheme: UpstreamScheme::https(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Errors that can occur in the proxy
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("upstream request timed out after {0:?}")]
    UpstreamTimeout(Duration),

    #[error("upstream request failed: {0}")]
    Upstream(String),

    #[error("invalid proxy target: {0}")]
    InvalidTarget(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::InvalidTarget(_) => StatusCode::BAD_REQUEST,
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Proxy failures are the only errors visible to proxy callers; each maps
/// to a status plus a small JSON error body.
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Result type for proxy operations
pub type ProxyResult<T> = Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_target_validation() {
        assert!(ProxyTarget::try_new("example.com/status".to_string()).is_ok());
        assert!(ProxyTarget::try_new(String::new()).is_err());
    }

    #[test]
    fn test_upstream_scheme_validation() {
        assert!(UpstreamScheme::try_new("https".to_string()).is_ok());
        assert!(UpstreamScheme::try_new("http".to_string()).is_ok());
        assert!(UpstreamScheme::try_new("ftp".to_string()).is_err());
    }

    #[test]
    fn test_default_config_is_https_with_30s_timeout() {
        let config = ProxyConfig::default();
        assert_eq!(config.upstream_scheme, UpstreamScheme::https());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            ProxyError::UpstreamTimeout(Duration::from_secs(30)).status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            ProxyError::Upstream("connection refused".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ProxyError::InvalidTarget("empty".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_timeout_error_mentions_timeout() {
        let err = ProxyError::UpstreamTimeout(Duration::from_secs(30));
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_request_id_is_v7() {
        let id = RequestId::new();
        let uuid: &Uuid = id.as_ref();
        assert_eq!(uuid.get_version_num(), 7);
    }
}
