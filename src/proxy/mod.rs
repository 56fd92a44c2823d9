//! Passthrough proxy
//!
//! Forwards arbitrary requests under `/proxy/{host-and-path}` to the named
//! upstream over a fixed secure scheme and relays the response, filtering
//! hop-by-hop headers in both directions. Independent of the bridge
//! subsystem; the two share only the process and transport layer.

pub mod forwarder;
pub mod headers;
pub mod types;

pub use forwarder::Forwarder;
pub use types::{ProxyConfig, ProxyError, ProxyResult};

use axum::extract::{Path, Request, State};
use axum::response::Response;
use axum::routing::any;
use axum::Router;
use std::sync::Arc;
use types::ProxyTarget;

/// Build the proxy router over a shared forwarder.
pub fn router(forwarder: Arc<Forwarder>) -> Router {
    Router::new()
        .route("/proxy/{*target}", any(proxy_handler))
        .with_state(forwarder)
}

/// Axum handler for proxied requests: the wildcard segment names the
/// upstream host-plus-path verbatim.
async fn proxy_handler(
    State(forwarder): State<Arc<Forwarder>>,
    Path(target): Path<String>,
    request: Request,
) -> Result<Response, ProxyError> {
    let target =
        ProxyTarget::try_new(target).map_err(|e| ProxyError::InvalidTarget(e.to_string()))?;
    forwarder.forward(&target, request).await
}
