//! Typed readings over the status cache

use super::cache::{Block, SharedField, StatusCache};
use super::selectors::{Button, CliffSensor, IrSensor, Side};
use crate::error::Result;
use std::borrow::Cow;
use thinking_cleaner_shared::{CleanerState, CodecError, Section};

fn text(section: &Section, key: &str) -> std::result::Result<String, CodecError> {
    section.text(key).map(Cow::into_owned)
}

/// Readings present in both views
impl StatusCache {
    /// Name given to the module
    pub async fn name(&self) -> Result<String> {
        self.read_shared(SharedField::NAME, text).await
    }

    pub async fn is_cleaning(&self) -> Result<bool> {
        self.read_shared(SharedField::CLEANING, Section::flag).await
    }

    /// Incremented every time the schedule is changed
    pub async fn schedule_serial_number(&self) -> Result<i64> {
        self.read_shared(SharedField::SCHEDULE_SERIAL, Section::int)
            .await
    }

    /// Battery charge in percent
    pub async fn charge(&self) -> Result<i64> {
        self.read_shared(SharedField::CHARGE, Section::int).await
    }

    /// Battery capacity in mAh
    pub async fn capacity(&self) -> Result<i64> {
        self.read_shared(SharedField::CAPACITY, Section::int).await
    }

    pub async fn cleaner_state(&self) -> Result<CleanerState> {
        self.read_shared(SharedField::CLEANER_STATE, |s, k| {
            s.text(k).map(|code| CleanerState::from_code(&code))
        })
        .await
    }

    pub async fn is_near_homebase(&self) -> Result<bool> {
        self.read_shared(SharedField::NEAR_HOMEBASE, Section::flag)
            .await
    }
}

/// Firmware block
impl StatusCache {
    pub async fn firmware_version(&self) -> Result<String> {
        self.read_full(Block::Firmware, "version", text).await
    }

    pub async fn wifi_version(&self) -> Result<String> {
        self.read_full(Block::Firmware, "wifi_version", text).await
    }

    pub async fn uuid(&self) -> Result<String> {
        self.read_full(Block::Firmware, "uuid", text).await
    }

    pub async fn mac_address(&self) -> Result<String> {
        self.read_full(Block::Firmware, "mac_address", text).await
    }

    pub async fn uses_dhcp(&self) -> Result<bool> {
        self.read_full(Block::Firmware, "DHCP", Section::flag).await
    }

    pub async fn has_been_backed_up(&self) -> Result<bool> {
        self.read_full(Block::Firmware, "has_been_backed_up", Section::flag)
            .await
    }

    pub async fn has_auth_token(&self) -> Result<bool> {
        self.read_full(Block::Firmware, "has_auth_token", Section::flag)
            .await
    }

    pub async fn boot_status(&self) -> Result<String> {
        self.read_full(Block::Firmware, "boot_status", text).await
    }

    pub async fn boot_version(&self) -> Result<String> {
        self.read_full(Block::Firmware, "boot_version", text).await
    }

    /// Firmware updates itself. Turning this off freezes the current version.
    pub async fn auto_update(&self) -> Result<bool> {
        self.read_full(Block::Firmware, "auto_update", Section::flag)
            .await
    }

    /// Redirects the Roomba onto its homebase when it stops in front of it
    pub async fn auto_dock(&self) -> Result<bool> {
        self.read_full(Block::Firmware, "auto_dock", Section::flag)
            .await
    }

    /// Max clean restarts once the battery is full again
    pub async fn restart_after_charge(&self) -> Result<bool> {
        self.read_full(Block::Firmware, "restart_AC", Section::flag)
            .await
    }

    /// Charge percentage below which the Roomba heads for its dock
    pub async fn dock_at(&self) -> Result<i64> {
        self.read_full(Block::Firmware, "dock_at", Section::int).await
    }

    /// Charge percentage below which cleaning stops
    pub async fn stop_at(&self) -> Result<i64> {
        self.read_full(Block::Firmware, "stop_at", Section::int).await
    }

    /// Module clock, `HH:MM`
    pub async fn device_time(&self) -> Result<String> {
        self.read_full(Block::Firmware, "time_h_m", text).await
    }
}

/// Module status block
impl StatusCache {
    pub async fn model_number(&self) -> Result<String> {
        self.read_full(Block::TcStatus, "modelnr", text).await
    }

    /// Time cleaned since last picked up
    pub async fn last_cleaning_time(&self) -> Result<String> {
        self.read_full(Block::TcStatus, "cleaning_time", text).await
    }

    pub async fn total_cleaning_time(&self) -> Result<String> {
        self.read_full(Block::TcStatus, "cleaning_time_total", text)
            .await
    }

    pub async fn total_cleaning_distance(&self) -> Result<String> {
        self.read_full(Block::TcStatus, "cleaning_distance", text)
            .await
    }

    /// Number of dirt detections, used for the bin warning
    pub async fn dirt_detections(&self) -> Result<i64> {
        self.read_full(Block::TcStatus, "dirt_detected", Section::int)
            .await
    }

    /// Bin warning: cleaned 90 to 120 minutes without being picked up
    pub async fn needs_emptying(&self) -> Result<bool> {
        self.read_full(Block::TcStatus, "bin_status", Section::flag)
            .await
    }

    pub async fn server_connection(&self) -> Result<bool> {
        self.read_full(Block::TcStatus, "server_connection", Section::flag)
            .await
    }

    /// Vacuum motor runs during remote drive
    pub async fn vacuum_drive(&self) -> Result<bool> {
        self.read_full(Block::TcStatus, "vacuum_drive", Section::flag)
            .await
    }

    /// Minutes until a delayed clean starts
    pub async fn clean_delay(&self) -> Result<i64> {
        self.read_full(Block::TcStatus, "clean_delay", Section::int)
            .await
    }
}

/// Power block
impl StatusCache {
    /// Battery current in mA, negative while discharging
    pub async fn current(&self) -> Result<i64> {
        self.read_full(Block::PowerStatus, "current", Section::int)
            .await
    }

    /// Remaining battery charge in mAh
    pub async fn battery_charge(&self) -> Result<i64> {
        self.read_full(Block::PowerStatus, "battery_charge", Section::int)
            .await
    }

    /// Battery voltage in mV
    pub async fn voltage(&self) -> Result<i64> {
        self.read_full(Block::PowerStatus, "voltage", Section::int)
            .await
    }

    /// Battery temperature in °C
    pub async fn temperature(&self) -> Result<i64> {
        self.read_full(Block::PowerStatus, "temperature", Section::int)
            .await
    }

    /// State code as reported in the power block
    pub async fn battery_condition(&self) -> Result<CleanerState> {
        self.read_full(Block::PowerStatus, "cleaner_state", |s, k| {
            s.text(k).map(|code| CleanerState::from_code(&code))
        })
        .await
    }

    pub async fn is_low_on_power(&self) -> Result<bool> {
        self.read_full(Block::PowerStatus, "low_power", Section::flag)
            .await
    }
}

/// Buttons, sensors and webview blocks
impl StatusCache {
    pub async fn button_pressed(&self, button: Button) -> Result<bool> {
        self.read_full(Block::Buttons, "buttons", |s, _| match button.key() {
            Some(key) => s.flag(key),
            None => any(s, Button::ALL.iter().filter_map(|b| b.key())),
        })
        .await
    }

    pub async fn bumper_pressed(&self, side: Side) -> Result<bool> {
        let key = match side {
            Side::Any => "bumper_state",
            Side::Left => "bumper_left_state",
            Side::Right => "bumper_right_state",
        };
        self.read_full(Block::Sensors, key, Section::flag).await
    }

    pub async fn wheel_dropped(&self, side: Side) -> Result<bool> {
        self.read_full(Block::Sensors, "wheel_drop", |s, _| match side {
            Side::Any => any(s, ["wheel_drop_left", "wheel_drop_right"]),
            Side::Left => s.flag("wheel_drop_left"),
            Side::Right => s.flag("wheel_drop_right"),
        })
        .await
    }

    /// Real wall, or the beam of a virtual wall
    pub async fn detects_wall(&self, virtual_wall: bool) -> Result<bool> {
        let key = if virtual_wall { "virtual_wall" } else { "wall" };
        self.read_full(Block::Sensors, key, Section::flag).await
    }

    pub async fn detects_cliff(&self, sensor: CliffSensor) -> Result<bool> {
        self.read_full(Block::Sensors, "cliff", |s, _| match sensor.key() {
            Some(key) => s.flag(key),
            None => any(s, CliffSensor::ALL.iter().filter_map(|c| c.key())),
        })
        .await
    }

    pub async fn detects_dirt(&self) -> Result<bool> {
        self.read_full(Block::Sensors, "dirt_detect", Section::flag)
            .await
    }

    pub async fn detects_light_bump(&self) -> Result<bool> {
        self.read_full(Block::Sensors, "light_bump", Section::flag)
            .await
    }

    pub async fn has_mainbrush_current(&self) -> Result<bool> {
        self.read_full(Block::Sensors, "mainbrush_current", Section::flag)
            .await
    }

    pub async fn has_sidebrush_current(&self) -> Result<bool> {
        self.read_full(Block::Sensors, "sidebrush_current", Section::flag)
            .await
    }

    pub async fn detects_homebase(&self) -> Result<bool> {
        self.read_full(Block::Sensors, "homebase_detected", Section::flag)
            .await
    }

    pub async fn ir_reading(&self, sensor: IrSensor) -> Result<i64> {
        self.read_full(Block::Sensors, sensor.key(), Section::int)
            .await
    }

    /// Whether the module's web UI shows its advanced settings
    pub async fn webview_advanced(&self) -> Result<String> {
        self.read_full(Block::Webview, "advanced", text).await
    }
}

fn any<'k>(
    section: &Section,
    keys: impl IntoIterator<Item = &'k str>,
) -> std::result::Result<bool, CodecError> {
    for key in keys {
        if section.flag(key)? {
            return Ok(true);
        }
    }
    Ok(false)
}
