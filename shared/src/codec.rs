//! JSON codec for status bodies and leaf value coercion
//!
//! Status bodies are decoded whole: a body missing any required top-level
//! member is rejected instead of producing a partial snapshot.
//!
//! ```text
//! status.json       { action, result, status }
//! full_status.json  { action, result, firmware, tc_status, power_status,
//!                     buttons, sensors, webview }
//! ```

use bytes::Bytes;
use thiserror::Error;

use crate::status::{FullStatus, SimpleStatus, StatusKind, StatusSnapshot};

/// Errors that can occur during encoding/decoding
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Invalid {kind} status body: {source}")]
    InvalidBody {
        kind: StatusKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Malformed value for {field}: {value:?}")]
    MalformedValue { field: String, value: String },

    #[error("JSON encode error: {0}")]
    EncodeError(#[from] serde_json::Error),
}

/// Decode a body of the given view
pub fn decode(kind: StatusKind, body: &[u8]) -> Result<StatusSnapshot, CodecError> {
    match kind {
        StatusKind::Simple => decode_simple(body),
        StatusKind::Full => decode_full(body),
    }
}

/// Decode a `status.json` body
pub fn decode_simple(body: &[u8]) -> Result<StatusSnapshot, CodecError> {
    serde_json::from_slice::<SimpleStatus>(body)
        .map(StatusSnapshot::Simple)
        .map_err(|source| CodecError::InvalidBody {
            kind: StatusKind::Simple,
            source,
        })
}

/// Decode a `full_status.json` body
pub fn decode_full(body: &[u8]) -> Result<StatusSnapshot, CodecError> {
    serde_json::from_slice::<FullStatus>(body)
        .map(StatusSnapshot::Full)
        .map_err(|source| CodecError::InvalidBody {
            kind: StatusKind::Full,
            source,
        })
}

/// Encode a snapshot back into the body the module would serve
pub fn encode(snapshot: &StatusSnapshot) -> Result<Bytes, CodecError> {
    let raw = match snapshot {
        StatusSnapshot::Simple(s) => serde_json::to_vec(s)?,
        StatusSnapshot::Full(f) => serde_json::to_vec(f)?,
    };
    Ok(Bytes::from(raw))
}

/// Module booleans: exactly `"0"` is false, anything else is true
pub fn to_bool(value: &str) -> bool {
    value != "0"
}

/// Module integers are decimal strings
pub fn to_int(field: &str, value: &str) -> Result<i64, CodecError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| CodecError::MalformedValue {
            field: field.to_string(),
            value: value.to_string(),
        })
}
