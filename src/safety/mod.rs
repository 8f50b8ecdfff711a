//! Safety Module
//!
//! Guarantees that a timed drive never leaves the Roomba moving: every
//! repeated command is closed by a terminal stop, even when the run fails,
//! is cancelled or is dropped.

mod terminal_stop;

pub use terminal_stop::TerminalStop;
