//! Error types for the cleaner client

use thinking_cleaner_shared::{CodecError, StatusKind};
use thiserror::Error;

/// Failures of the HTTP round trip itself
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Could not reach {url}: {message}")]
    Unreachable { url: String, message: String },

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("HTTP client setup failed: {0}")]
    Setup(String),
}

/// Errors reported by the status cache and the command layer
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Body was not valid JSON or lacked a required member
    #[error("Protocol error: {0}")]
    Protocol(#[source] CodecError),

    /// A full-status reading was requested while the simple status is cached
    #[error("{field} is not part of the cached {held} status")]
    DataUnavailable {
        field: &'static str,
        held: StatusKind,
    },

    #[error("Malformed value for {field}: {value:?}")]
    MalformedValue { field: String, value: String },

    #[error("Invalid {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

impl From<CodecError> for Error {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::MalformedValue { field, value } => Error::MalformedValue { field, value },
            other => Error::Protocol(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
