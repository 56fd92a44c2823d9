//! HTTP surface of the bridge
//!
//! `/api/chunk` always answers 200 with a 1x1 GIF for well-formed requests:
//! the sender is an image tag and cannot act on an error signal, so stored,
//! duplicate, conflicting, and undecodable outcomes all look identical to
//! it. Malformed query parameters are the one exception and are rejected
//! before reaching the inbox.

use crate::bridge::inbox::{ChunkInbox, IngestOutcome};
use crate::bridge::payload;
use crate::bridge::state::StateCell;
use crate::bridge::types::{
    Base64Fragment, ChunkIndex, ChunkTotal, IntegrityTag, MessageId, PIXEL_GIF,
};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

/// Shared state for the bridge handlers: the reassembly buffer and the
/// published-state cell, owned together and injected into the router.
pub struct BridgeState {
    pub inbox: ChunkInbox,
    pub cell: StateCell,
}

impl BridgeState {
    pub fn new() -> Self {
        Self {
            inbox: ChunkInbox::new(),
            cell: StateCell::new(),
        }
    }
}

impl Default for BridgeState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the bridge router over shared state.
pub fn router(state: Arc<BridgeState>) -> Router {
    Router::new()
        .route("/api/chunk", get(receive_chunk))
        .route("/api/state", get(read_state))
        .route("/api/health", get(health_check))
        .with_state(state)
}

/// Raw query parameters of one chunk request. Missing or non-integer
/// fields are rejected by the extractor; value constraints are checked in
/// the handler before the inbox sees anything.
#[derive(Debug, Deserialize)]
struct ChunkParams {
    id: String,
    h: String,
    i: u32,
    n: u32,
    d: String,
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": message.into() })),
    )
        .into_response()
}

fn pixel_response() -> Response {
    ([(header::CONTENT_TYPE, "image/gif")], PIXEL_GIF).into_response()
}

async fn receive_chunk(
    State(bridge): State<Arc<BridgeState>>,
    Query(params): Query<ChunkParams>,
) -> Response {
    let Ok(id) = MessageId::try_new(params.id) else {
        return bad_request("id must be non-empty");
    };
    let Ok(tag) = IntegrityTag::try_new(params.h) else {
        return bad_request("h must be non-empty");
    };
    let Ok(total) = ChunkTotal::try_new(params.n) else {
        return bad_request("n must be >= 1");
    };
    let Ok(fragment) = Base64Fragment::try_new(params.d) else {
        return bad_request("d must be non-empty");
    };
    let index = ChunkIndex::from(params.i);

    match bridge.inbox.ingest(&id, &tag, index, total, fragment) {
        IngestOutcome::Stored => {}
        IngestOutcome::Conflict => {
            debug!(message_id = %id, "dropped in-flight message on conflicting metadata");
        }
        IngestOutcome::Complete(assembled) => match payload::decode_document(&assembled) {
            Ok(document) => {
                debug!(message_id = %id, "publishing reassembled document");
                bridge.cell.publish(document);
            }
            Err(err) => {
                // No retry path exists for the sender; log and move on.
                warn!(message_id = %id, error = %err, "discarding undecodable message");
            }
        },
    }

    pixel_response()
}

async fn read_state(State(bridge): State<Arc<BridgeState>>) -> Json<serde_json::Value> {
    match bridge.cell.snapshot() {
        Some(snapshot) => Json(json!({
            "state": snapshot.document,
            "timestamp": snapshot.unix_timestamp,
            "age_ms": snapshot.age_ms,
        })),
        None => Json(json!({
            "state": null,
            "timestamp": null,
            "age_ms": null,
            "message": "No game data received yet",
        })),
    }
}

async fn health_check(State(bridge): State<Arc<BridgeState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "has_state": bridge.cell.has_state(),
    }))
}
