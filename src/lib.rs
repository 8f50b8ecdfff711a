//! Control and telemetry client for a Roomba fitted with a Thinking Cleaner
//! module.
//!
//! The module speaks unauthenticated HTTP GET with JSON bodies and cannot
//! handle overlapping requests. [`Cleaner`] wraps one module: a lazily
//! fetched [`StatusCache`](status::StatusCache) for readings, and a paced
//! [`CommandDispatcher`](command::CommandDispatcher) whose timed commands
//! always end with a stop.

pub mod client;
pub mod command;
pub mod config;
pub mod error;
pub mod safety;
pub mod status;
pub mod transport;

pub use client::{Cleaner, DriveMode, Vacuum};
pub use config::ClientConfig;
pub use error::{Error, Result, TransportError};
pub use thinking_cleaner_shared::{CleanerState, StatusKind, StatusSnapshot};
