//! Type definitions for the bridge module

use nutype::nutype;
use std::time::Duration;

/// Identifier grouping all chunks of one logical payload
#[nutype(
    derive(Clone, Debug, Display, Hash, PartialEq, Eq, Deserialize, Serialize, TryFrom, AsRef),
    validate(predicate = |s: &str| !s.is_empty()),
)]
pub struct MessageId(String);

/// Opaque tag expected identical across all chunks of one message; a
/// mismatch mid-transmission marks a restarted or conflicting sender
#[nutype(
    derive(Clone, Debug, Display, PartialEq, Eq, Deserialize, Serialize, TryFrom, AsRef),
    validate(predicate = |s: &str| !s.is_empty()),
)]
pub struct IntegrityTag(String);

/// Zero-based chunk index; non-negative by construction
#[nutype(derive(
    Clone, Copy, Debug, Display, Hash, PartialEq, Eq, Deserialize, Serialize, From, AsRef
))]
pub struct ChunkIndex(u32);

/// Declared total number of chunks for a message
#[nutype(
    derive(Clone, Copy, Debug, Display, PartialEq, Eq, Deserialize, Serialize, TryFrom, AsRef),
    validate(predicate = |n: &u32| *n >= 1),
)]
pub struct ChunkTotal(u32);

/// One base64-alphabet fragment of the payload
#[nutype(
    derive(Clone, Debug, Display, Deserialize, Serialize, TryFrom, AsRef),
    validate(predicate = |s: &str| !s.is_empty()),
)]
pub struct Base64Fragment(String);

/// How long an incomplete message may sit untouched before the next ingest
/// sweep reclaims it.
pub const PENDING_MESSAGE_TTL: Duration = Duration::from_secs(20);

/// 1x1 transparent GIF returned for every chunk request, success or not.
/// The sender behaves like an image tag and cannot act on errors.
pub const PIXEL_GIF: &[u8] = &[
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00,
    0x00, 0xff, 0xff, 0xff, 0x21, 0xf9, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2c, 0x00, 0x00,
    0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x44, 0x01, 0x00, 0x3b,
];
