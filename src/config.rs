//! Client configuration

use std::time::Duration;
use thinking_cleaner_shared::limits;

/// Configuration for one cleaner client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Address of the Thinking Cleaner module, `host` or `host:port`.
    /// Prefer the IP address: `.local` names go through mDNS and are slow.
    pub host: String,
    /// Minimum delay between two requests to the module
    pub pacing_interval: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// How long `find_me` waits for the tune to finish
    pub find_me_pause: Duration,
}

impl ClientConfig {
    /// Default configuration for the module at `host`
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "192.168.1.100".into(),
            pacing_interval: Duration::from_millis(limits::PACING_INTERVAL_MS),
            request_timeout: Duration::from_millis(limits::REQUEST_TIMEOUT_MS),
            find_me_pause: Duration::from_millis(limits::FIND_ME_PAUSE_MS),
        }
    }
}
