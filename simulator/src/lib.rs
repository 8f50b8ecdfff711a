//! Thinking Cleaner module simulator
//!
//! Serves `status.json`, `full_status.json`, `command.json` and the bare
//! command endpoints over HTTP, backed by a mutable [`Device`]. Every request
//! is journaled so tests can check what a client actually sent and when.

pub mod device;
mod routes;

pub use device::Device;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::net::TcpListener;
use tokio::time::Instant;
use tracing::info;

/// How the simulator answers status and command requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fault {
    #[default]
    None,
    /// Status bodies are truncated JSON
    MalformedBody,
    /// Every request answers HTTP 500
    ServerError,
}

/// One request received by the simulator
#[derive(Debug, Clone)]
pub struct Request {
    /// Path without the leading slash
    pub path: String,
    pub query: Vec<(String, String)>,
    pub at: Instant,
}

impl Request {
    /// Command name for command requests, otherwise the path
    pub fn command(&self) -> &str {
        self.query
            .iter()
            .find(|(k, _)| k == thinking_cleaner_shared::endpoints::COMMAND_PARAM)
            .map(|(_, v)| v.as_str())
            .unwrap_or(self.path.as_str())
    }
}

#[derive(Debug, Default)]
struct Inner {
    device: Device,
    journal: Vec<Request>,
    fault: Fault,
}

/// Shared handle to one simulated module
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    inner: Arc<Mutex<Inner>>,
}

impl Simulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(device: Device) -> Self {
        let sim = Self::default();
        sim.lock().device = device;
        sim
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Router serving this module
    pub fn router(&self) -> axum::Router {
        routes::router(self.clone())
    }

    /// Serve on an ephemeral localhost port in the background
    pub async fn spawn(&self) -> std::io::Result<SocketAddr> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = self.router();

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Simulator stopped: {}", e);
            }
        });

        info!("Simulator listening on {}", addr);
        Ok(addr)
    }

    /// Serve on `listener` until the process ends
    pub async fn serve(&self, listener: TcpListener) -> std::io::Result<()> {
        info!("Simulator listening on {}", listener.local_addr()?);
        axum::serve(listener, self.router()).await
    }

    /// Copy of the device state
    pub fn device(&self) -> Device {
        self.lock().device.clone()
    }

    /// Change the device state, e.g. to press a button or trip a sensor
    pub fn update(&self, f: impl FnOnce(&mut Device)) {
        f(&mut self.lock().device);
    }

    pub fn set_fault(&self, fault: Fault) {
        self.lock().fault = fault;
    }

    pub fn fault(&self) -> Fault {
        self.lock().fault
    }

    pub fn journal(&self) -> Vec<Request> {
        self.lock().journal.clone()
    }

    /// Command names (or paths) in arrival order
    pub fn commands(&self) -> Vec<String> {
        self.lock()
            .journal
            .iter()
            .map(|r| r.command().to_string())
            .collect()
    }

    pub fn clear_journal(&self) {
        self.lock().journal.clear();
    }

    fn record(&self, path: &str, query: Vec<(String, String)>) -> Fault {
        let mut inner = self.lock();
        inner.journal.push(Request {
            path: path.to_string(),
            query,
            at: Instant::now(),
        });
        inner.fault
    }

    /// Apply a command to the device. `false` when the module would reject it.
    fn apply(&self, command: &str, query: &[(String, String)]) -> bool {
        self.lock().device.apply(command, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_command_name() {
        let request = Request {
            path: "command.json".into(),
            query: vec![("command".into(), "dock".into())],
            at: Instant::now(),
        };
        assert_eq!(request.command(), "dock");

        let bare = Request {
            path: "find_me".into(),
            query: Vec::new(),
            at: Instant::now(),
        };
        assert_eq!(bare.command(), "find_me");
    }

    #[test]
    fn test_update_device() {
        let sim = Simulator::new();
        sim.update(|d| d.charge = 42);
        assert_eq!(sim.device().charge, 42);
    }
}
