//! Passthrough request forwarding
//!
//! Forwards one inbound request to the caller-named upstream and relays the
//! response. Each call goes upstream at most once; failures are mapped to
//! gateway statuses, never retried. The forwarder owns its own client and
//! holds no lock belonging to the bridge subsystem.

use crate::proxy::headers::{is_excluded_request_header, is_excluded_response_header};
use crate::proxy::types::{ProxyConfig, ProxyError, ProxyResult, ProxyTarget, RequestId};
use axum::body::Body;
use axum::http::{HeaderMap, Method, Uri};
use axum::response::Response;
use tracing::{debug, warn};

/// Streaming passthrough forwarder over a shared upstream client
pub struct Forwarder {
    config: ProxyConfig,
    client: reqwest::Client,
}

impl Forwarder {
    pub fn new(config: ProxyConfig) -> ProxyResult<Self> {
        // The per-call timeout is applied around send(), not on the client,
        // so a response body may keep streaming past it once headers arrive.
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ProxyError::Internal(format!("failed to build upstream client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Forward a request to `target` and relay the upstream response.
    pub async fn forward(
        &self,
        target: &ProxyTarget,
        request: axum::extract::Request,
    ) -> ProxyResult<Response> {
        let request_id = RequestId::new();
        let (parts, body) = request.into_parts();

        let url = destination_url(
            self.config.upstream_scheme.as_ref(),
            target.as_ref(),
            &parts.uri,
        );
        debug!(%request_id, method = %parts.method, %url, "forwarding upstream");

        let mut builder = self
            .client
            .request(parts.method.clone(), &url)
            .headers(forwardable_headers(&parts.headers));

        if carries_body(&parts.method) {
            // Raw bytes, no re-encoding and no content-type inspection.
            let bytes = axum::body::to_bytes(body, usize::MAX)
                .await
                .map_err(|e| ProxyError::Internal(format!("failed to read request body: {e}")))?;
            builder = builder.body(bytes);
        }

        let timeout = self.config.request_timeout;
        let upstream = tokio::time::timeout(timeout, builder.send())
            .await
            .map_err(|_| {
                warn!(%request_id, %url, "upstream call timed out");
                ProxyError::UpstreamTimeout(timeout)
            })?
            .map_err(|e| {
                if e.is_timeout() {
                    ProxyError::UpstreamTimeout(timeout)
                } else {
                    warn!(%request_id, %url, error = %e, "upstream call failed");
                    ProxyError::Upstream(e.to_string())
                }
            })?;

        let status = upstream.status();
        let upstream_headers = upstream.headers().clone();
        debug!(%request_id, status = %status, "relaying upstream response");

        // Stream the body through; the transport recomputes framing, so the
        // excluded framing headers never reach the caller.
        let mut relayed = Response::new(Body::from_stream(upstream.bytes_stream()));
        *relayed.status_mut() = status;
        let headers = relayed.headers_mut();
        for (name, value) in &upstream_headers {
            if !is_excluded_response_header(name.as_str()) {
                headers.append(name.clone(), value.clone());
            }
        }

        Ok(relayed)
    }
}

/// Compose the destination URL: fixed scheme, the target segment verbatim,
/// and the original query string when present.
fn destination_url(scheme: &str, target: &str, uri: &Uri) -> String {
    match uri.query() {
        Some(query) => format!("{scheme}://{target}?{query}"),
        None => format!("{scheme}://{target}"),
    }
}

/// Copy inbound headers minus the connection-specific excluded set.
fn forwardable_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in inbound {
        if !is_excluded_request_header(name.as_str()) {
            headers.append(name.clone(), value.clone());
        }
    }
    headers
}

/// Methods whose body bytes are forwarded unmodified.
fn carries_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}
