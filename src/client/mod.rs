//! Client for one Thinking Cleaner module
//!
//! This module handles:
//! - Wiring the transport, pacer, status cache and dispatcher of one module
//! - The start-up probe
//! - The named command vocabulary (see [`actions`])

pub mod actions;

pub use actions::{DriveMode, Vacuum};

use crate::command::{CommandDispatcher, Pacer};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::status::StatusCache;
use crate::transport::{DeviceTransport, HttpTransport};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

/// A Roomba fitted with a Thinking Cleaner module
///
/// All requests of one client share one pacer, so status fetches and commands
/// never overlap on the device. Separate clients share nothing.
pub struct Cleaner {
    config: ClientConfig,
    status: StatusCache,
    dispatcher: CommandDispatcher,
    /// Drive mode last requested through this client
    cautious: AtomicBool,
}

impl Cleaner {
    /// Client talking HTTP to `config.host`
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config.host, config.request_timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Client over any transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn DeviceTransport>) -> Self {
        let pacer = Arc::new(Pacer::new(config.pacing_interval));
        Self {
            status: StatusCache::new(transport.clone(), pacer.clone()),
            dispatcher: CommandDispatcher::new(transport, pacer),
            cautious: AtomicBool::new(true),
            config,
        }
    }

    pub fn host(&self) -> &str {
        &self.config.host
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Status cache and typed readings
    pub fn status(&self) -> &StatusCache {
        &self.status
    }

    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    /// Replace the held snapshot with a fresh simple or full view
    pub async fn refresh(&self, full: bool) -> Result<()> {
        self.status.refresh(full).await
    }

    /// Probe the module once so it is ready for the first command
    pub async fn wake(&self) -> Result<()> {
        info!("[{}] Waking module", self.host());
        self.status.refresh(false).await?;
        let state = self.status.cleaner_state().await?;
        info!("[{}] Module awake: {}", self.host(), state.describe());
        Ok(())
    }
}
