//! Command vocabulary
//!
//! Every verb is a [`CommandRequest`] sent through the client's dispatcher.
//! Single verbs make the Roomba act for about one second; the `*_for`
//! variants repeat the drive command for a duration and end with a stop.
//!
//! Drive angles follow the module: `0` spins right, `1..=179` turns right
//! (lower is sharper), `180` is straight, `181..=359` turns left (higher is
//! sharper) and `360` spins left.

use super::Cleaner;
use crate::command::{CommandRequest, TimedRun};
use crate::error::{Error, Result};
use std::str::FromStr;
use std::sync::atomic::Ordering;
use std::time::Duration;
use thinking_cleaner_shared::{commands, limits};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Vacuum and brushes during remote drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vacuum {
    On,
    Off,
    Toggle,
}

impl FromStr for Vacuum {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "on" => Ok(Vacuum::On),
            "off" => Ok(Vacuum::Off),
            "toggle" => Ok(Vacuum::Toggle),
            other => Err(Error::invalid("vacuum mode", format!("unknown mode {:?}", other))),
        }
    }
}

/// Drive safety mode. Reset by the module when docked or charging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveMode {
    /// Stop as soon as continuing would be dangerous (cliffs, picked up)
    Cautious,
    /// Keep driving regardless. It will go down the stairs.
    Hazardous,
    Toggle,
}

impl FromStr for DriveMode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cautious" => Ok(DriveMode::Cautious),
            "hazardous" => Ok(DriveMode::Hazardous),
            "toggle" => Ok(DriveMode::Toggle),
            other => Err(Error::invalid("drive mode", format!("unknown mode {:?}", other))),
        }
    }
}

fn check_speed(speed: i32) -> Result<i32> {
    if (-limits::MAX_SPEED_MM_S..=limits::MAX_SPEED_MM_S).contains(&speed) {
        Ok(speed)
    } else {
        Err(Error::invalid(
            "speed",
            format!(
                "{} mm/s outside -{max}..={max}",
                speed,
                max = limits::MAX_SPEED_MM_S
            ),
        ))
    }
}

fn check_magnitude(speed: i32) -> Result<i32> {
    if (0..=limits::MAX_SPEED_MM_S).contains(&speed) {
        Ok(speed)
    } else {
        Err(Error::invalid(
            "speed",
            format!("{} mm/s outside 0..={}", speed, limits::MAX_SPEED_MM_S),
        ))
    }
}

fn check_degrees(degrees: u16) -> Result<u16> {
    if degrees <= limits::MAX_DEGREES {
        Ok(degrees)
    } else {
        Err(Error::invalid(
            "degrees",
            format!("{} outside 0..={}", degrees, limits::MAX_DEGREES),
        ))
    }
}

fn drive_request(speed: i32, degrees: u16) -> Result<CommandRequest> {
    Ok(CommandRequest::command(commands::DRIVE_ONLY)
        .param("degrees", check_degrees(degrees)?)
        .param("speed", check_speed(speed)?))
}

// Movement
impl Cleaner {
    async fn send(&self, request: CommandRequest) -> Result<()> {
        self.dispatcher.send_once(&request).await?;
        Ok(())
    }

    async fn send_for(
        &self,
        request: CommandRequest,
        duration: Duration,
        cancel: Option<&CancellationToken>,
    ) -> Result<TimedRun> {
        let run = match cancel {
            Some(cancel) => {
                self.dispatcher
                    .send_for_until(&request, duration, cancel)
                    .await?
            }
            None => self.dispatcher.send_for(&request, duration).await?,
        };
        Ok(run)
    }

    /// Drive at `speed` mm/s (`-500..=500`) towards `degrees` (`0..=360`).
    /// Brush and vacuum motors are off.
    pub async fn drive(&self, speed: i32, degrees: u16) -> Result<()> {
        self.send(drive_request(speed, degrees)?).await
    }

    /// Drive forward for about one second
    pub async fn forward(&self) -> Result<()> {
        self.send(CommandRequest::command(commands::FORWARD)).await
    }

    pub async fn forward_at(&self, speed: i32) -> Result<()> {
        self.drive(speed, limits::STRAIGHT_DEGREES).await
    }

    /// Reverse at the default 250 mm/s
    pub async fn backward(&self) -> Result<()> {
        self.drive(-limits::DEFAULT_REVERSE_SPEED_MM_S, limits::STRAIGHT_DEGREES)
            .await
    }

    /// Reverse at `speed` mm/s, given as a positive magnitude
    pub async fn backward_at(&self, speed: i32) -> Result<()> {
        let speed = check_magnitude(speed)?;
        self.drive(-speed, limits::STRAIGHT_DEGREES).await
    }

    /// Spin left by roughly 90 degrees
    pub async fn spin_left(&self) -> Result<()> {
        self.send(CommandRequest::command(commands::SPIN_LEFT)).await
    }

    pub async fn spin_left_at(&self, speed: i32) -> Result<()> {
        self.drive(speed, limits::MAX_DEGREES).await
    }

    /// Spin right by roughly 90 degrees
    pub async fn spin_right(&self) -> Result<()> {
        self.send(CommandRequest::command(commands::SPIN_RIGHT)).await
    }

    pub async fn spin_right_at(&self, speed: i32) -> Result<()> {
        self.drive(speed, 0).await
    }

    /// Drive forward while turning left
    pub async fn drive_left(&self) -> Result<()> {
        self.send(CommandRequest::command(commands::DRIVE_LEFT)).await
    }

    /// Drive forward while turning right
    pub async fn drive_right(&self) -> Result<()> {
        self.send(CommandRequest::command(commands::DRIVE_RIGHT)).await
    }

    /// Two left spins, roughly 180 degrees
    pub async fn turn_around(&self) -> Result<()> {
        self.spin_left().await?;
        self.spin_left().await
    }

    pub async fn stop(&self) -> Result<()> {
        self.send(CommandRequest::stop()).await
    }

    /// Repeat `forward` for `duration`, then stop
    pub async fn forward_for(&self, duration: Duration) -> Result<TimedRun> {
        self.send_for(CommandRequest::command(commands::FORWARD), duration, None)
            .await
    }

    /// Like [`forward_for`](Self::forward_for), ending early on `cancel`
    pub async fn forward_for_until(
        &self,
        duration: Duration,
        cancel: &CancellationToken,
    ) -> Result<TimedRun> {
        self.send_for(
            CommandRequest::command(commands::FORWARD),
            duration,
            Some(cancel),
        )
        .await
    }

    /// Reverse at the default speed for `duration`, then stop
    pub async fn backward_for(&self, duration: Duration) -> Result<TimedRun> {
        let request = drive_request(
            -limits::DEFAULT_REVERSE_SPEED_MM_S,
            limits::STRAIGHT_DEGREES,
        )?;
        self.send_for(request, duration, None).await
    }

    /// Repeat a drive for `duration`, then stop
    pub async fn drive_for(&self, speed: i32, degrees: u16, duration: Duration) -> Result<TimedRun> {
        self.send_for(drive_request(speed, degrees)?, duration, None)
            .await
    }

    pub async fn drive_for_until(
        &self,
        speed: i32,
        degrees: u16,
        duration: Duration,
        cancel: &CancellationToken,
    ) -> Result<TimedRun> {
        self.send_for(drive_request(speed, degrees)?, duration, Some(cancel))
            .await
    }
}

// Module functions
impl Cleaner {
    /// Return to the homebase. Wakes a sleeping Roomba and ends a running clean.
    pub async fn dock(&self) -> Result<()> {
        self.send(CommandRequest::command(commands::DOCK)).await
    }

    /// Back off the homebase and turn around
    pub async fn leave_home(&self) -> Result<()> {
        self.send(CommandRequest::command(commands::LEAVE_HOMEBASE))
            .await
    }

    /// Play the locator tune and wait for it to finish
    pub async fn find_me(&self) -> Result<()> {
        self.send(CommandRequest::bare(commands::FIND_ME)).await?;
        tokio::time::sleep(self.config.find_me_pause).await;
        Ok(())
    }

    pub async fn power_off(&self) -> Result<()> {
        info!("[{}] Powering off", self.host());
        self.send(CommandRequest::command(commands::POWER_OFF)).await
    }

    /// Vacuum and brushes during remote drive.
    ///
    /// `Toggle` reads the current state from a fresh full status first.
    pub async fn vacuum(&self, mode: Vacuum) -> Result<()> {
        let on = match mode {
            Vacuum::On => true,
            Vacuum::Off => false,
            Vacuum::Toggle => {
                self.status.refresh(true).await?;
                !self.status.vacuum_drive().await?
            }
        };
        debug!("[{}] Vacuum drive -> {}", self.host(), if on { "on" } else { "off" });

        let command = if on {
            commands::VACUUM_ON
        } else {
            commands::VACUUM_OFF
        };
        self.send(CommandRequest::command(command)).await
    }

    /// Drive safety mode. `Toggle` flips the mode last set through this client,
    /// starting from cautious.
    pub async fn drive_mode(&self, mode: DriveMode) -> Result<()> {
        let cautious = match mode {
            DriveMode::Cautious => true,
            DriveMode::Hazardous => false,
            DriveMode::Toggle => !self.cautious.load(Ordering::SeqCst),
        };

        let command = if cautious {
            commands::DRIVE_NORMAL
        } else {
            commands::DRIVE_ALWAYS
        };
        self.send(CommandRequest::command(command)).await?;
        self.cautious.store(cautious, Ordering::SeqCst);
        Ok(())
    }

    /// Drive mode last set through this client
    pub fn is_cautious(&self) -> bool {
        self.cautious.load(Ordering::SeqCst)
    }
}

// Cleaning
impl Cleaner {
    /// Start or stop a cleaning cycle
    pub async fn clean(&self) -> Result<()> {
        self.send(CommandRequest::command(commands::CLEAN)).await
    }

    /// Clean the local area
    pub async fn spot_clean(&self) -> Result<()> {
        self.send(CommandRequest::command(commands::SPOT)).await
    }

    /// Clean without giving up in large rooms. Only use where the Roomba
    /// cannot leave the building.
    pub async fn max_clean(&self) -> Result<()> {
        self.send(CommandRequest::command(commands::MAX)).await
    }

    /// Start cleaning after the delay configured on the module
    pub async fn delayed_clean(&self) -> Result<()> {
        self.send(CommandRequest::command(commands::DELAYED_CLEAN_PRESET))
            .await
    }

    /// Start cleaning after `minutes` (`30..=240`)
    pub async fn delayed_clean_in(&self, minutes: u32) -> Result<()> {
        let range = limits::DELAYED_CLEAN_MIN_MINUTES..=limits::DELAYED_CLEAN_MAX_MINUTES;
        if !range.contains(&minutes) {
            return Err(Error::invalid(
                "delay",
                format!(
                    "{} minutes outside {}..={}",
                    minutes,
                    range.start(),
                    range.end()
                ),
            ));
        }
        self.send(CommandRequest::command(commands::DELAYED_CLEAN).param("minutes", minutes))
            .await
    }
}
