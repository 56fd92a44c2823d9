//! Hop-by-hop header filtering for the passthrough proxy
//!
//! Connection-specific request headers must not be forwarded upstream, and
//! framing headers from the upstream response must not be relayed back: the
//! relaying transport recomputes framing itself.

/// Request headers stripped before forwarding upstream
pub const EXCLUDED_REQUEST_HEADERS: &[&str] =
    &["host", "connection", "keep-alive", "transfer-encoding"];

/// Response headers stripped before relaying back to the caller
pub const EXCLUDED_RESPONSE_HEADERS: &[&str] = &[
    "content-encoding",
    "content-length",
    "transfer-encoding",
    "connection",
];

/// Whether an inbound request header is dropped rather than forwarded.
pub fn is_excluded_request_header(name: &str) -> bool {
    EXCLUDED_REQUEST_HEADERS
        .iter()
        .any(|excluded| name.eq_ignore_ascii_case(excluded))
}

/// Whether an upstream response header is dropped rather than relayed.
pub fn is_excluded_response_header(name: &str) -> bool {
    EXCLUDED_RESPONSE_HEADERS
        .iter()
        .any(|excluded| name.eq_ignore_ascii_case(excluded))
}
