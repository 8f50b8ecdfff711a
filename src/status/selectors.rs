//! Selectors for readings that come in several positions
//!
//! Each selector parses the short and long names the module's own web UI
//! uses (`"l"`, `"left"`, `"front left"`, ...), case-insensitively.

use crate::error::Error;
use std::str::FromStr;

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Bumper or wheel side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Any,
    Left,
    Right,
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "any" | "all" | "a" => Ok(Side::Any),
            "left" | "l" => Ok(Side::Left),
            "right" | "r" => Ok(Side::Right),
            other => Err(Error::invalid("side", format!("unknown side {:?}", other))),
        }
    }
}

/// One of the four cliff sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliffSensor {
    Any,
    Left,
    FrontLeft,
    FrontRight,
    Right,
}

impl CliffSensor {
    pub const ALL: [CliffSensor; 4] = [
        CliffSensor::Left,
        CliffSensor::FrontLeft,
        CliffSensor::FrontRight,
        CliffSensor::Right,
    ];

    /// Sensor key, `None` for [`CliffSensor::Any`]
    pub fn key(self) -> Option<&'static str> {
        match self {
            CliffSensor::Any => None,
            CliffSensor::Left => Some("cliff_left"),
            CliffSensor::FrontLeft => Some("cliff_front_left"),
            CliffSensor::FrontRight => Some("cliff_front_right"),
            CliffSensor::Right => Some("cliff_right"),
        }
    }
}

impl FromStr for CliffSensor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "any" | "all" | "a" => Ok(CliffSensor::Any),
            "left" | "l" => Ok(CliffSensor::Left),
            "front left" | "fl" => Ok(CliffSensor::FrontLeft),
            "front right" | "fr" => Ok(CliffSensor::FrontRight),
            "right" | "r" => Ok(CliffSensor::Right),
            other => Err(Error::invalid("cliff sensor", format!("unknown sensor {:?}", other))),
        }
    }
}

/// Buttons on top of the Roomba
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Any,
    Clean,
    Spot,
    Dock,
}

impl Button {
    pub const ALL: [Button; 3] = [Button::Clean, Button::Spot, Button::Dock];

    /// Key in the `buttons` block, `None` for [`Button::Any`]
    pub fn key(self) -> Option<&'static str> {
        match self {
            Button::Any => None,
            Button::Clean => Some("clean_button"),
            Button::Spot => Some("spot_button"),
            Button::Dock => Some("dock_button"),
        }
    }
}

impl FromStr for Button {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "any" | "all" | "a" => Ok(Button::Any),
            "clean" | "clean button" | "cln" | "c" => Ok(Button::Clean),
            "spot" | "spot button" | "spt" | "s" => Ok(Button::Spot),
            "dock" | "dock button" | "dck" | "d" => Ok(Button::Dock),
            other => Err(Error::invalid("button", format!("unknown button {:?}", other))),
        }
    }
}

/// Infrared receivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrSensor {
    Omni,
    Left,
    Right,
}

impl IrSensor {
    pub fn key(self) -> &'static str {
        match self {
            IrSensor::Omni => "IR_Omni",
            IrSensor::Left => "IR_Left",
            IrSensor::Right => "IR_Right",
        }
    }
}

impl FromStr for IrSensor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "omni" | "o" => Ok(IrSensor::Omni),
            "left" | "l" => Ok(IrSensor::Left),
            "right" | "r" => Ok(IrSensor::Right),
            other => Err(Error::invalid("IR sensor", format!("unknown sensor {:?}", other))),
        }
    }
}
