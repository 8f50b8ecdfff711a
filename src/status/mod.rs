//! Status cache and the readings derived from it
//!
//! This module handles:
//! - Fetching `status.json` / `full_status.json` through the shared pacer
//! - Holding exactly one snapshot and replacing it wholesale
//! - Typed readings, shared ones from either view and full-only ones

mod cache;
mod readings;
mod selectors;

pub use cache::{Block, SharedField, StatusCache};
pub use selectors::{Button, CliffSensor, IrSensor, Side};

#[cfg(test)]
pub(crate) mod fixtures {
    //! Bodies modelled on a docked, reconditioning Roomba 560

    use thinking_cleaner_shared::{encode, FullStatus, Section, SimpleStatus, StatusSnapshot};

    fn body(snapshot: StatusSnapshot) -> String {
        let bytes = encode(&snapshot).unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    pub fn simple_body() -> String {
        body(StatusSnapshot::Simple(SimpleStatus {
            action: "status".into(),
            result: "success".into(),
            status: Section::new()
                .with("name", "Jim")
                .with("cleaning", 0)
                .with("schedule_serial_number", 4)
                .with("charge", 87)
                .with("capacity", 2696)
                .with("cleaner_state", "st_base_recon")
                .with("near_homebase", 1),
        }))
    }

    pub fn full_body() -> String {
        body(StatusSnapshot::Full(FullStatus {
            action: "full_status".into(),
            result: "success".into(),
            firmware: Section::new()
                .with("version", "4.0.6")
                .with("wifi_version", "2.1.1")
                .with("uuid", "8e9d1a5c-51a1-4b7e-9f0a-3a8c2d1f7b42")
                .with("mac_address", "00:1E:C0:2A:4B:6C")
                .with("DHCP", 1)
                .with("has_been_backed_up", 0)
                .with("has_auth_token", 1)
                .with("boot_status", "ok")
                .with("boot_version", "1.3")
                .with("auto_update", 1)
                .with("auto_dock", 1)
                .with("restart_AC", 0)
                .with("dock_at", 25)
                .with("stop_at", 10)
                .with("time_h_m", "14:05"),
            tc_status: Section::new()
                .with("name", "Jim")
                .with("modelnr", "560")
                .with("schedule_serial_number", 4)
                .with("cleaning_time", 12)
                .with("cleaning_time_total", 4432)
                .with("cleaning_distance", 130)
                .with("dirt_detected", 21)
                .with("bin_status", 0)
                .with("server_connection", 1)
                .with("vacuum_drive", 1)
                .with("clean_delay", 0),
            power_status: Section::new()
                .with("cleaning", 0)
                .with("charge", 87)
                .with("capacity", 2696)
                .with("cleaner_state", "st_base_recon")
                .with("current", -310)
                .with("battery_charge", 2345)
                .with("voltage", 14512)
                .with("temperature", 28)
                .with("low_power", 0),
            buttons: Section::new()
                .with("clean_button", 0)
                .with("spot_button", 1)
                .with("dock_button", 0),
            sensors: Section::new()
                .with("bumper_state", 1)
                .with("bumper_left_state", 1)
                .with("bumper_right_state", 0)
                .with("wheel_drop_left", 0)
                .with("wheel_drop_right", 1)
                .with("wall", 0)
                .with("virtual_wall", 1)
                .with("cliff_left", 0)
                .with("cliff_front_left", 0)
                .with("cliff_front_right", 1)
                .with("cliff_right", 0)
                .with("dirt_detect", 0)
                .with("light_bump", 1)
                .with("mainbrush_current", 1)
                .with("sidebrush_current", 0)
                .with("homebase_detected", 1)
                .with("near_homebase", 1)
                .with("IR_Omni", 161)
                .with("IR_Left", 0)
                .with("IR_Right", 242),
            webview: Section::new().with("advanced", 1),
        }))
    }
}
