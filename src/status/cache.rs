//! Status cache - lazily fetched, wholesale-replaced telemetry snapshot

use crate::command::Pacer;
use crate::error::{Error, Result};
use crate::transport::DeviceTransport;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thinking_cleaner_shared::{codec, CodecError, FullStatus, Section, StatusKind, StatusSnapshot};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Sub-object of `full_status.json`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Firmware,
    TcStatus,
    PowerStatus,
    Buttons,
    Sensors,
    Webview,
}

impl Block {
    pub fn section(self, full: &FullStatus) -> &Section {
        match self {
            Block::Firmware => &full.firmware,
            Block::TcStatus => &full.tc_status,
            Block::PowerStatus => &full.power_status,
            Block::Buttons => &full.buttons,
            Block::Sensors => &full.sensors,
            Block::Webview => &full.webview,
        }
    }
}

/// A reading present in both views, under different keys
#[derive(Debug, Clone, Copy)]
pub struct SharedField {
    /// Key inside `status` of the simple view
    pub simple: &'static str,
    /// Block and key inside the full view
    pub full: (Block, &'static str),
}

impl SharedField {
    pub const CLEANING: Self = Self::new("cleaning", Block::PowerStatus, "cleaning");
    pub const SCHEDULE_SERIAL: Self =
        Self::new("schedule_serial_number", Block::TcStatus, "schedule_serial_number");
    pub const CHARGE: Self = Self::new("charge", Block::PowerStatus, "charge");
    pub const CLEANER_STATE: Self = Self::new("cleaner_state", Block::PowerStatus, "cleaner_state");
    pub const NEAR_HOMEBASE: Self = Self::new("near_homebase", Block::Sensors, "near_homebase");
    pub const NAME: Self = Self::new("name", Block::TcStatus, "name");
    pub const CAPACITY: Self = Self::new("capacity", Block::PowerStatus, "capacity");

    const fn new(simple: &'static str, block: Block, full: &'static str) -> Self {
        Self {
            simple,
            full: (block, full),
        }
    }

    /// Section and key holding this reading in `snapshot`
    fn locate(self, snapshot: &StatusSnapshot) -> (&Section, &'static str) {
        match snapshot {
            StatusSnapshot::Simple(simple) => (&simple.status, self.simple),
            StatusSnapshot::Full(full) => (self.full.0.section(full), self.full.1),
        }
    }
}

/// Most recent status of one module
///
/// Exactly one view is held at a time. Shared readings fetch the view last
/// requested (simple until a full one is asked for) when nothing is held;
/// full-only readings fetch the full view when nothing
/// is held and fail with [`Error::DataUnavailable`] while the simple view is
/// held. A failed fetch leaves the held snapshot untouched.
pub struct StatusCache {
    transport: Arc<dyn DeviceTransport>,
    pacer: Arc<Pacer>,
    snapshot: RwLock<Option<StatusSnapshot>>,
    /// View of the most recent fetch attempt
    last_requested: AtomicBool,
}

impl StatusCache {
    pub fn new(transport: Arc<dyn DeviceTransport>, pacer: Arc<Pacer>) -> Self {
        Self {
            transport,
            pacer,
            snapshot: RwLock::new(None),
            last_requested: AtomicBool::new(false),
        }
    }

    /// Fetch `full_status.json` (or `status.json`) and replace the snapshot
    pub async fn refresh(&self, full: bool) -> Result<()> {
        let kind = if full { StatusKind::Full } else { StatusKind::Simple };
        self.refresh_kind(kind).await
    }

    pub async fn refresh_kind(&self, kind: StatusKind) -> Result<()> {
        let mut held = self.snapshot.write().await;
        let snapshot = self.fetch(kind).await?;

        if let Some(previous) = held.as_ref() {
            if previous.kind() != kind {
                debug!("[{}] Status view {} -> {}", self.transport.host(), previous.kind(), kind);
            }
        }
        *held = Some(snapshot);
        Ok(())
    }

    /// Which view is held, if any
    pub async fn kind(&self) -> Option<StatusKind> {
        self.snapshot.read().await.as_ref().map(StatusSnapshot::kind)
    }

    /// Copy of the held snapshot
    pub async fn snapshot(&self) -> Option<StatusSnapshot> {
        self.snapshot.read().await.clone()
    }

    /// Drop the held snapshot; the next reading fetches again
    pub async fn clear(&self) {
        *self.snapshot.write().await = None;
    }

    /// Read a value present in both views
    pub async fn read_shared<T>(
        &self,
        field: SharedField,
        read: impl FnOnce(&Section, &str) -> std::result::Result<T, CodecError>,
    ) -> Result<T> {
        self.with_snapshot(self.last_requested(), |snapshot| {
            let (section, key) = field.locate(snapshot);
            read(section, key).map_err(Error::from)
        })
        .await
    }

    /// Read a value only the full view carries
    pub async fn read_full<T>(
        &self,
        block: Block,
        key: &'static str,
        read: impl FnOnce(&Section, &str) -> std::result::Result<T, CodecError>,
    ) -> Result<T> {
        self.with_snapshot(StatusKind::Full, |snapshot| match snapshot {
            StatusSnapshot::Full(full) => read(block.section(full), key).map_err(Error::from),
            StatusSnapshot::Simple(_) => Err(Error::DataUnavailable {
                field: key,
                held: StatusKind::Simple,
            }),
        })
        .await
    }

    /// Run `f` on the held snapshot, fetching `default` first if nothing is held
    async fn with_snapshot<T>(
        &self,
        default: StatusKind,
        f: impl FnOnce(&StatusSnapshot) -> Result<T>,
    ) -> Result<T> {
        let mut held = self.snapshot.write().await;
        let snapshot = match held.take() {
            Some(snapshot) => snapshot,
            None => {
                info!("[{}] No status cached, fetching {} view", self.transport.host(), default);
                self.fetch(default).await?
            }
        };
        let result = f(&snapshot);
        *held = Some(snapshot);
        result
    }

    /// View the next lazy shared reading fetches
    pub fn last_requested(&self) -> StatusKind {
        if self.last_requested.load(Ordering::SeqCst) {
            StatusKind::Full
        } else {
            StatusKind::Simple
        }
    }

    async fn fetch(&self, kind: StatusKind) -> Result<StatusSnapshot> {
        self.last_requested
            .store(kind == StatusKind::Full, Ordering::SeqCst);

        let body = {
            let mut slot = self.pacer.acquire().await;
            debug!("[{}] GET {}", self.transport.host(), kind.endpoint());

            slot.begin();
            let result = self.transport.fetch(kind.endpoint()).await;
            slot.complete();
            result?
        };

        codec::decode(kind, &body).map_err(|e| {
            warn!("[{}] Bad {} status body: {}", self.transport.host(), kind, e);
            Error::from(e)
        })
    }
}
