//! Device model behind the simulated module

use thinking_cleaner_shared::{commands, CleanerState, FullStatus, Section, SimpleStatus};

/// Delay used by the preset `delayedclean` command
pub const PRESET_DELAY_MINUTES: u32 = 60;

/// Mutable state of the simulated Roomba and its module
#[derive(Debug, Clone)]
pub struct Device {
    pub name: String,
    pub model: String,
    pub firmware_version: String,
    pub state: CleanerState,
    /// Percent
    pub charge: i64,
    /// mAh
    pub capacity: i64,
    pub cleaning: bool,
    pub near_homebase: bool,
    pub vacuum_drive: bool,
    pub cautious: bool,
    /// Minutes until a delayed clean starts, 0 when none is pending
    pub clean_delay: u32,
    pub schedule_serial: i64,
    pub buttons: Section,
    pub sensors: Section,
}

impl Default for Device {
    fn default() -> Self {
        Self {
            name: "Simulated Roomba".into(),
            model: "560".into(),
            firmware_version: "4.0.6".into(),
            state: CleanerState::Base,
            charge: 100,
            capacity: 2696,
            cleaning: false,
            near_homebase: true,
            vacuum_drive: false,
            cautious: true,
            clean_delay: 0,
            schedule_serial: 1,
            buttons: Section::new()
                .with("clean_button", 0)
                .with("spot_button", 0)
                .with("dock_button", 0),
            sensors: Section::new()
                .with("bumper_state", 0)
                .with("bumper_left_state", 0)
                .with("bumper_right_state", 0)
                .with("wheel_drop_left", 0)
                .with("wheel_drop_right", 0)
                .with("wall", 0)
                .with("virtual_wall", 0)
                .with("cliff_left", 0)
                .with("cliff_front_left", 0)
                .with("cliff_front_right", 0)
                .with("cliff_right", 0)
                .with("dirt_detect", 0)
                .with("light_bump", 0)
                .with("mainbrush_current", 0)
                .with("sidebrush_current", 0)
                .with("homebase_detected", 1)
                .with("IR_Omni", 0)
                .with("IR_Left", 0)
                .with("IR_Right", 0),
        }
    }
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

fn param<'a>(query: &'a [(String, String)], key: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

impl Device {
    /// Apply a command. Returns `false` for commands the module does not know
    /// or whose parameters it rejects; the state is then left as it was.
    pub fn apply(&mut self, command: &str, query: &[(String, String)]) -> bool {
        match command {
            commands::DRIVE_ONLY => {
                let speed = param(query, "speed").and_then(|s| s.parse::<i32>().ok());
                let degrees = param(query, "degrees").and_then(|d| d.parse::<u16>().ok());
                if speed.is_none() || degrees.is_none() {
                    return false;
                }
                self.drive();
            }
            commands::FORWARD
            | commands::SPIN_LEFT
            | commands::SPIN_RIGHT
            | commands::DRIVE_LEFT
            | commands::DRIVE_RIGHT => self.drive(),
            commands::DRIVE_STOP => {
                self.cleaning = false;
                self.state = CleanerState::Stopped;
            }
            commands::DOCK => {
                self.cleaning = false;
                self.state = CleanerState::Docking;
            }
            commands::LEAVE_HOMEBASE => self.drive(),
            commands::FIND_ME => self.state = CleanerState::Locating,
            commands::POWER_OFF => {
                self.cleaning = false;
                self.state = CleanerState::Off;
            }
            commands::VACUUM_ON => self.vacuum_drive = true,
            commands::VACUUM_OFF => self.vacuum_drive = false,
            commands::DRIVE_NORMAL => self.cautious = true,
            commands::DRIVE_ALWAYS => self.cautious = false,
            commands::CLEAN => {
                if self.cleaning {
                    self.cleaning = false;
                    self.state = CleanerState::CleanStopping;
                } else {
                    self.start_cleaning(CleanerState::Cleaning);
                }
            }
            commands::SPOT => self.start_cleaning(CleanerState::SpotCleaning),
            commands::MAX => self.start_cleaning(CleanerState::MaxCleaning),
            commands::DELAYED_CLEAN_PRESET => self.delay(PRESET_DELAY_MINUTES),
            commands::DELAYED_CLEAN => {
                match param(query, "minutes").and_then(|m| m.parse::<u32>().ok()) {
                    Some(minutes) => self.delay(minutes),
                    None => return false,
                }
            }
            _ => return false,
        }
        true
    }

    fn drive(&mut self) {
        self.cleaning = false;
        self.near_homebase = false;
        self.state = CleanerState::Remote;
    }

    fn start_cleaning(&mut self, state: CleanerState) {
        self.cleaning = true;
        self.near_homebase = false;
        self.clean_delay = 0;
        self.state = state;
    }

    fn delay(&mut self, minutes: u32) {
        self.clean_delay = minutes;
        self.state = CleanerState::Delayed;
    }

    pub fn simple_status(&self) -> SimpleStatus {
        SimpleStatus {
            action: "status".into(),
            result: "success".into(),
            status: Section::new()
                .with("name", &self.name)
                .with("battery_charge", self.charge)
                .with("capacity", self.capacity)
                .with("charge", self.charge)
                .with("cleaner_state", self.state.code())
                .with("cleaning", flag(self.cleaning))
                .with("schedule_serial_number", self.schedule_serial)
                .with("near_homebase", flag(self.near_homebase)),
        }
    }

    pub fn full_status(&self) -> FullStatus {
        let mut sensors = self.sensors.clone();
        sensors.set("near_homebase", flag(self.near_homebase));

        FullStatus {
            action: "full_status".into(),
            result: "success".into(),
            firmware: Section::new()
                .with("version", &self.firmware_version)
                .with("wifi_version", "2.1.1")
                .with("uuid", "00000000-0000-4000-8000-000000000000")
                .with("mac_address", "00:00:00:00:00:00")
                .with("DHCP", 1)
                .with("has_been_backed_up", 0)
                .with("has_auth_token", 0)
                .with("boot_status", "ok")
                .with("boot_version", "1.3")
                .with("auto_update", 1)
                .with("auto_dock", 1)
                .with("restart_AC", 0)
                .with("dock_at", 25)
                .with("stop_at", 10)
                .with("time_h_m", "12:00"),
            tc_status: Section::new()
                .with("name", &self.name)
                .with("modelnr", &self.model)
                .with("schedule_serial_number", self.schedule_serial)
                .with("cleaning_time", 0)
                .with("cleaning_time_total", 0)
                .with("cleaning_distance", 0)
                .with("dirt_detected", 0)
                .with("bin_status", 0)
                .with("server_connection", 0)
                .with("vacuum_drive", flag(self.vacuum_drive))
                .with("clean_delay", self.clean_delay),
            power_status: Section::new()
                .with("cleaning", flag(self.cleaning))
                .with("charge", self.charge)
                .with("capacity", self.capacity)
                .with("cleaner_state", self.state.code())
                .with("current", if self.state.is_on_base() { 500 } else { -310 })
                .with("battery_charge", self.capacity * self.charge / 100)
                .with("voltage", 14512)
                .with("temperature", 28)
                .with("low_power", flag(self.charge < 10)),
            buttons: self.buttons.clone(),
            sensors,
            webview: Section::new().with("advanced", 0),
        }
    }
}
