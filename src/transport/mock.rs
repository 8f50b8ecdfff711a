//! Recording transport for unit tests

use crate::error::TransportError;
use crate::transport::traits::DeviceTransport;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// One request seen by the mock
#[derive(Debug, Clone)]
pub(crate) struct Recorded {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub at: Instant,
}

impl Recorded {
    /// Command name: the `command` parameter, or the path for bare requests
    pub fn command(&self) -> &str {
        self.query
            .iter()
            .find(|(k, _)| k == "command")
            .map(|(_, v)| v.as_str())
            .unwrap_or(self.path.as_str())
    }
}

#[derive(Default)]
pub(crate) struct MockTransport {
    bodies: Mutex<HashMap<String, Bytes>>,
    failing: Mutex<HashSet<String>>,
    latency: Duration,
    journal: Mutex<Vec<Recorded>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    /// Serve `body` for GETs of `path`
    pub fn serve(&self, path: &str, body: impl Into<Bytes>) {
        self.bodies
            .lock()
            .unwrap()
            .insert(path.to_string(), body.into());
    }

    /// Make every request for `command` (name or path) fail
    pub fn fail(&self, command: &str) {
        self.failing.lock().unwrap().insert(command.to_string());
    }

    pub fn heal(&self, command: &str) {
        self.failing.lock().unwrap().remove(command);
    }

    pub fn journal(&self) -> Vec<Recorded> {
        self.journal.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.journal()
            .iter()
            .map(|r| r.command().to_string())
            .collect()
    }

    pub fn count(&self, command: &str) -> usize {
        self.journal()
            .iter()
            .filter(|r| r.command() == command)
            .count()
    }

    async fn record(&self, path: &str, query: &[(String, String)]) -> Result<(), TransportError> {
        let recorded = Recorded {
            path: path.to_string(),
            query: query.to_vec(),
            at: Instant::now(),
        };
        let url = format!("http://mock/{}", recorded.command());
        let failing = self
            .failing
            .lock()
            .unwrap()
            .contains(recorded.command());
        self.journal.lock().unwrap().push(recorded);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if failing {
            return Err(TransportError::Unreachable {
                url,
                message: "connection refused".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DeviceTransport for MockTransport {
    async fn fetch(&self, path: &str) -> Result<Bytes, TransportError> {
        self.record(path, &[]).await?;
        let body = self.bodies.lock().unwrap().get(path).cloned();
        body.ok_or_else(|| TransportError::Status {
            url: format!("http://mock/{}", path),
            status: 404,
        })
    }

    async fn send(&self, path: &str, query: &[(String, String)]) -> Result<(), TransportError> {
        self.record(path, query).await
    }

    fn host(&self) -> &str {
        "mock"
    }
}
