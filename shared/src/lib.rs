//! Thinking Cleaner Shared Protocol Types
//!
//! This crate provides the wire types, JSON codec and state codes of the HTTP
//! API exposed by a Thinking Cleaner module. It is shared by the client and by
//! the device simulator.

pub mod cleaner_state;
pub mod codec;
pub mod status;

pub use cleaner_state::CleanerState;
pub use codec::{decode, decode_full, decode_simple, encode, to_bool, to_int, CodecError};
pub use status::{FullStatus, Section, SimpleStatus, StatusKind, StatusSnapshot};

/// Paths served by the module, relative to `http://{host}/`
pub mod endpoints {
    /// Reduced status view
    pub const SIMPLE_STATUS: &str = "status.json";

    /// Verbose status view
    pub const FULL_STATUS: &str = "full_status.json";

    /// Wrapper endpoint taking `?command={name}[&param=value...]`
    pub const COMMAND: &str = "command.json";

    /// Query parameter carrying the command name on the wrapper endpoint
    pub const COMMAND_PARAM: &str = "command";
}

/// Timing and range limits of the device
pub mod limits {
    /// Minimum delay between two requests to the same module
    pub const PACING_INTERVAL_MS: u64 = 300;

    /// Default per-request timeout
    pub const REQUEST_TIMEOUT_MS: u64 = 5000;

    /// Time the find-me tune takes to play
    pub const FIND_ME_PAUSE_MS: u64 = 3000;

    /// Shortest accepted delay for a delayed clean
    pub const DELAYED_CLEAN_MIN_MINUTES: u32 = 30;

    /// Longest accepted delay for a delayed clean
    pub const DELAYED_CLEAN_MAX_MINUTES: u32 = 240;

    /// Drive speed bound in mm/s, applies in both directions
    pub const MAX_SPEED_MM_S: i32 = 500;

    /// Speed used by the plain `backward` verb
    pub const DEFAULT_REVERSE_SPEED_MM_S: i32 = 250;

    /// Largest drive heading; 0 spins right, 180 is straight, 360 spins left
    pub const MAX_DEGREES: u16 = 360;

    /// Heading for straight driving
    pub const STRAIGHT_DEGREES: u16 = 180;
}

/// Command names understood by the module
pub mod commands {
    pub const DRIVE_STOP: &str = "drivestop";
    pub const DRIVE_ONLY: &str = "drive_only";
    pub const FORWARD: &str = "forward";
    pub const SPIN_LEFT: &str = "spinleft";
    pub const SPIN_RIGHT: &str = "spinright";
    pub const DRIVE_LEFT: &str = "driveleft";
    pub const DRIVE_RIGHT: &str = "driveright";
    pub const DOCK: &str = "dock";
    pub const LEAVE_HOMEBASE: &str = "leavehomebase";
    pub const FIND_ME: &str = "find_me";
    pub const POWER_OFF: &str = "poweroff";
    pub const VACUUM_ON: &str = "VacuumDriveON";
    pub const VACUUM_OFF: &str = "VacuumDriveOFF";
    pub const DRIVE_NORMAL: &str = "DriveNormal";
    pub const DRIVE_ALWAYS: &str = "DriveAlways";
    pub const CLEAN: &str = "clean";
    pub const SPOT: &str = "spot";
    pub const MAX: &str = "max";
    pub const DELAYED_CLEAN_PRESET: &str = "delayedclean";
    pub const DELAYED_CLEAN: &str = "DelayedClean";
}
