//! HTTP transport backed by reqwest

use crate::error::TransportError;
use crate::transport::traits::DeviceTransport;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

/// Plain-HTTP transport to one module
pub struct HttpTransport {
    host: String,
    base_url: String,
    client: Client,
}

impl HttpTransport {
    /// Create a transport for `host` with a per-request timeout
    pub fn new(host: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let host = host.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Setup(e.to_string()))?;

        Ok(Self {
            base_url: base_url(&host),
            host,
            client,
        })
    }

    /// Absolute URL of `path` on this module
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<Response, TransportError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl DeviceTransport for HttpTransport {
    async fn fetch(&self, path: &str) -> Result<Bytes, TransportError> {
        let url = self.url(path);
        let response = self.get(&url, &[]).await?;
        let body = response.bytes().await.map_err(|e| classify(&url, e))?;
        debug!("GET {} -> {} bytes", url, body.len());
        Ok(body)
    }

    async fn send(&self, path: &str, query: &[(String, String)]) -> Result<(), TransportError> {
        let url = self.url(path);
        let response = self.get(&url, query).await?;
        debug!("GET {} -> {}", response.url(), response.status());
        Ok(())
    }

    fn host(&self) -> &str {
        &self.host
    }
}

fn base_url(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}

fn classify(url: &str, err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::Timeout {
            url: url.to_string(),
        };
    }
    if let Some(status) = err.status() {
        return TransportError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        };
    }
    TransportError::Unreachable {
        url: url.to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let transport = HttpTransport::new("192.168.1.100", Duration::from_secs(1)).unwrap();
        assert_eq!(transport.host(), "192.168.1.100");
        assert_eq!(
            transport.url("status.json"),
            "http://192.168.1.100/status.json"
        );
        assert_eq!(transport.url("/find_me"), "http://192.168.1.100/find_me");
    }

    #[test]
    fn test_explicit_scheme_and_port_are_kept() {
        assert_eq!(base_url("127.0.0.1:8080"), "http://127.0.0.1:8080");
        assert_eq!(base_url("http://roomba.lan/"), "http://roomba.lan");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Port 9 (discard) is closed on loopback in test environments.
        let transport = HttpTransport::new("127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let result = transport.fetch("status.json").await;
        assert!(matches!(
            result,
            Err(TransportError::Unreachable { .. }) | Err(TransportError::Timeout { .. })
        ));
    }
}
