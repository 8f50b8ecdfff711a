//! Terminal Stop
//!
//! Armed at the start of a timed command. Firing it sends the stop inline;
//! dropping it while still armed spawns the stop onto the current runtime.
//! The guard stays armed until the inline stop has completed, so dropping a
//! fire that is still waiting for the module also falls back to the spawn.

use crate::command::CommandDispatcher;
use crate::error::TransportError;
use tracing::{error, warn};

/// Pending terminal stop for one timed command
pub struct TerminalStop {
    dispatcher: Option<CommandDispatcher>,
}

impl TerminalStop {
    /// Arm a stop that will go out through `dispatcher`
    pub fn arm(dispatcher: CommandDispatcher) -> Self {
        Self {
            dispatcher: Some(dispatcher),
        }
    }

    pub fn is_armed(&self) -> bool {
        self.dispatcher.is_some()
    }

    /// Send the stop now, disarming once the request has completed
    pub async fn fire(&mut self) -> Result<(), TransportError> {
        let Some(dispatcher) = self.dispatcher.clone() else {
            return Ok(());
        };

        let result = dispatcher.send_stop().await;
        self.dispatcher = None;
        result
    }
}

impl Drop for TerminalStop {
    fn drop(&mut self) {
        let Some(dispatcher) = self.dispatcher.take() else {
            return;
        };

        warn!("[SAFETY] Timed command abandoned, sending stop in background");
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = dispatcher.send_stop().await {
                        error!("[SAFETY] Background stop failed: {}", e);
                    }
                });
            }
            Err(_) => {
                error!("[SAFETY] No runtime to send stop from, robot may still be moving");
            }
        }
    }
}
