//! Cleaner state codes
//!
//! The module reports what the Roomba is doing as an `st_*` code. Codes not
//! listed here are kept verbatim in [`CleanerState::Unknown`].

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// What the Roomba reports it is doing
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CleanerState {
    /// On the homebase, idle
    Base,
    /// On the homebase, reconditioning charge
    BaseRecondition,
    /// On the homebase, full charge
    BaseFullCharge,
    /// On the homebase, trickle charge
    BaseTrickleCharge,
    /// On the homebase, waiting
    BaseWait,
    /// Plugged in, idle
    Plug,
    PlugRecondition,
    PlugFullCharge,
    PlugTrickleCharge,
    PlugWait,
    Stopped,
    Cleaning,
    /// Finishing a cleaning cycle
    CleanStopping,
    SpotCleaning,
    MaxCleaning,
    /// Delayed clean armed
    Delayed,
    /// Searching for the homebase
    Docking,
    PickedUp,
    /// Driven remotely
    Remote,
    Waiting,
    Off,
    Error,
    Locating,
    /// The module itself reported `st_unknown`
    Undetermined,
    /// Any code this table does not know
    Unknown(String),
}

impl CleanerState {
    /// Parse a state code as sent by the module
    pub fn from_code(code: &str) -> Self {
        use CleanerState::*;

        match code {
            "st_base" => Base,
            "st_base_recon" => BaseRecondition,
            "st_base_full" => BaseFullCharge,
            "st_base_trickle" => BaseTrickleCharge,
            "st_base_wait" => BaseWait,
            "st_plug" => Plug,
            "st_plug_recon" => PlugRecondition,
            "st_plug_full" => PlugFullCharge,
            "st_plug_trickle" => PlugTrickleCharge,
            "st_plug_wait" => PlugWait,
            "st_stopped" => Stopped,
            "st_clean" => Cleaning,
            "st_cleanstop" => CleanStopping,
            "st_clean_spot" => SpotCleaning,
            "st_clean_max" => MaxCleaning,
            "st_delayed" => Delayed,
            "st_dock" => Docking,
            "st_pickup" => PickedUp,
            "st_remote" => Remote,
            "st_wait" => Waiting,
            "st_off" => Off,
            "st_error" => Error,
            "st_locate" => Locating,
            "st_unknown" => Undetermined,
            other => Unknown(other.to_string()),
        }
    }

    /// The code the module uses for this state
    pub fn code(&self) -> &str {
        use CleanerState::*;

        match self {
            Base => "st_base",
            BaseRecondition => "st_base_recon",
            BaseFullCharge => "st_base_full",
            BaseTrickleCharge => "st_base_trickle",
            BaseWait => "st_base_wait",
            Plug => "st_plug",
            PlugRecondition => "st_plug_recon",
            PlugFullCharge => "st_plug_full",
            PlugTrickleCharge => "st_plug_trickle",
            PlugWait => "st_plug_wait",
            Stopped => "st_stopped",
            Cleaning => "st_clean",
            CleanStopping => "st_cleanstop",
            SpotCleaning => "st_clean_spot",
            MaxCleaning => "st_clean_max",
            Delayed => "st_delayed",
            Docking => "st_dock",
            PickedUp => "st_pickup",
            Remote => "st_remote",
            Waiting => "st_wait",
            Off => "st_off",
            Error => "st_error",
            Locating => "st_locate",
            Undetermined => "st_unknown",
            Unknown(code) => code,
        }
    }

    /// Human-readable, first-person description
    pub fn describe(&self) -> &'static str {
        use CleanerState::*;

        match self {
            Base => "I'm at the homebase, not doing anything.",
            BaseRecondition => "I'm at the homebase, doing some reconditioning charging.",
            BaseFullCharge => "I'm at the homebase, charging.",
            BaseTrickleCharge => "I'm at the homebase, doing a little charging.",
            BaseWait => "I'm waiting at the homebase, tell me if you want me to do something.",
            Plug => "I'm plugged in, not doing much of anything.",
            PlugRecondition => "I'm plugged in, doing a little reconditioning charging.",
            PlugFullCharge => "I'm plugged in and charging.",
            PlugTrickleCharge => "I'm plugged in and doing a little charging.",
            PlugWait => "I'm plugged in, and ready for you to tell me what to do.",
            Stopped => "I've stopped.",
            Cleaning => "I'm cleaning right now.",
            CleanStopping => "I'm just getting done with some cleaning.",
            SpotCleaning => "I'm cleaning this spot, it's a bit dirty.",
            MaxCleaning => "I'm cleaning as much as I can.",
            Delayed => "I'm about to start cleaning.",
            Docking => {
                "I'm looking for the homebase, could you give me a push in the right direction?"
            }
            PickedUp => "Put me down! I get dizzy when you pick me up.",
            Remote => "I'm being moved remotely and I don't like it.",
            Waiting => "I'm bored, don't you have anything for me to do?",
            Off => "Not so loud. I'm sleeping.",
            Error => "I think there's something wrong, can you check?",
            Locating => "I'm lost, please find me.",
            Undetermined => "I don't really know what's going on.",
            Unknown(_) => "I may or may not be doing something right now.",
        }
    }

    /// Sitting on the homebase
    pub fn is_on_base(&self) -> bool {
        use CleanerState::*;
        matches!(
            self,
            Base | BaseRecondition | BaseFullCharge | BaseTrickleCharge | BaseWait
        )
    }

    /// Connected to the wall charger
    pub fn is_plugged_in(&self) -> bool {
        use CleanerState::*;
        matches!(
            self,
            Plug | PlugRecondition | PlugFullCharge | PlugTrickleCharge | PlugWait
        )
    }

    /// Running any cleaning cycle
    pub fn is_cleaning(&self) -> bool {
        use CleanerState::*;
        matches!(self, Cleaning | SpotCleaning | MaxCleaning)
    }
}

impl FromStr for CleanerState {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_code(s))
    }
}

impl fmt::Display for CleanerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_map_back() {
        for code in ["st_base", "st_plug_wait", "st_clean_max", "st_unknown", "st_locate"] {
            assert_eq!(CleanerState::from_code(code).code(), code);
        }
    }

    #[test]
    fn test_unknown_code_is_preserved() {
        let state: CleanerState = "st_hovering".parse().unwrap();
        assert_eq!(state, CleanerState::Unknown("st_hovering".into()));
        assert_eq!(state.to_string(), "st_hovering");
        assert_eq!(
            state.describe(),
            "I may or may not be doing something right now."
        );
    }

    #[test]
    fn test_st_unknown_is_not_fallback() {
        let state = CleanerState::from_code("st_unknown");
        assert_eq!(state, CleanerState::Undetermined);
        assert_eq!(state.describe(), "I don't really know what's going on.");
    }

    #[test]
    fn test_groups() {
        assert!(CleanerState::BaseTrickleCharge.is_on_base());
        assert!(!CleanerState::BaseTrickleCharge.is_cleaning());
        assert!(CleanerState::PlugFullCharge.is_plugged_in());
        assert!(CleanerState::SpotCleaning.is_cleaning());
        assert!(!CleanerState::Docking.is_on_base());
    }
}
