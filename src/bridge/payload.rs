//! Decoding of fully reassembled messages
//!
//! An assembled message is one URL-safe base64 string concatenated from its
//! fragments in index order. Senders are not required to pad, so decoding
//! accepts both padded and unpadded input.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, Engine as _, GeneralPurpose, GeneralPurposeConfig};
use thiserror::Error;

/// URL-safe engine that tolerates present or absent padding.
const B64_URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Errors from decoding an assembled message
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("JSON parse failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode an assembled base64 string into the JSON document it carries.
pub fn decode_document(assembled: &str) -> Result<serde_json::Value, PayloadError> {
    let bytes = B64_URL_SAFE_LENIENT.decode(assembled)?;
    Ok(serde_json::from_slice(&bytes)?)
}
