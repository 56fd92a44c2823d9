//! Chunk-reassembly bridge
//!
//! Receives base64 fragments of one JSON payload as independent image-shaped
//! requests, reassembles them per message id, and publishes the latest
//! decoded document:
//!
//! - [`inbox`]: time-bounded partial-message reassembly buffer
//! - [`payload`]: URL-safe base64 + JSON decoding of assembled messages
//! - [`state`]: single-writer cell holding the latest published document
//! - [`routes`]: the HTTP surface (`/api/chunk`, `/api/state`, `/api/health`)

pub mod inbox;
pub mod payload;
pub mod routes;
pub mod state;
pub mod types;

pub use inbox::{ChunkInbox, IngestOutcome};
pub use routes::BridgeState;
pub use state::StateCell;
