//! Transport trait abstraction for the module's HTTP API

use crate::error::TransportError;
use async_trait::async_trait;
use bytes::Bytes;

/// Issues GET requests against one module
#[async_trait]
pub trait DeviceTransport: Send + Sync {
    /// GET `path` and return the response body
    async fn fetch(&self, path: &str) -> Result<Bytes, TransportError>;

    /// GET `path` with query parameters, succeeding on any 2xx answer.
    /// The body is not read.
    async fn send(&self, path: &str, query: &[(String, String)]) -> Result<(), TransportError>;

    /// Address of the module this transport talks to
    fn host(&self) -> &str;
}
