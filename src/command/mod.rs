//! Command delivery to the module
//!
//! This module handles:
//! - Building command requests for the `command.json` wrapper and bare endpoints
//! - Pacing every request so the module never sees two at once
//! - Repeating drive commands for a duration, closed by a terminal stop

mod dispatcher;
mod pacer;
mod request;

pub use dispatcher::{CommandDispatcher, TimedRun};
pub use pacer::{Pacer, PacerSlot};
pub use request::{CommandRequest, CommandTarget};
