//! Per-module request lock and pacing
//!
//! The module cannot queue overlapping requests. Every request to it, status
//! fetch or command, goes through the [`Pacer`]: one request at a time, and
//! never sooner than `interval` after the previous one.

use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tokio::time::{sleep, sleep_until, Instant};

/// Serialises requests to one module and spaces them out
#[derive(Debug)]
pub struct Pacer {
    interval: Duration,
    /// When the last request completed
    last_request: Mutex<Option<Instant>>,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Take the lock, then wait out whatever is left of the interval
    pub async fn acquire(&self) -> PacerSlot<'_> {
        let last = self.last_request.lock().await;
        if let Some(at) = *last {
            sleep_until(at + self.interval).await;
        }
        PacerSlot {
            last,
            interval: self.interval,
            in_flight: false,
        }
    }

    /// When the last request completed, if any
    pub async fn last_request(&self) -> Option<Instant> {
        *self.last_request.lock().await
    }
}

/// Exclusive right to issue one request
pub struct PacerSlot<'a> {
    last: MutexGuard<'a, Option<Instant>>,
    interval: Duration,
    in_flight: bool,
}

impl PacerSlot<'_> {
    /// A request is about to go out
    pub fn begin(&mut self) {
        self.in_flight = true;
    }

    /// The request completed, successfully or not
    pub fn complete(&mut self) {
        *self.last = Some(Instant::now());
        self.in_flight = false;
    }

    /// Keep the lock for one full interval before releasing it
    pub async fn hold(self) {
        sleep(self.interval).await;
    }
}

impl Drop for PacerSlot<'_> {
    fn drop(&mut self) {
        // Abandoned mid-request: the module may still be busy with it.
        if self.in_flight {
            *self.last = Some(Instant::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_acquire_is_immediate() {
        let pacer = Pacer::new(Duration::from_millis(300));
        let start = Instant::now();
        let _slot = pacer.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_acquire_waits_out_interval() {
        let pacer = Pacer::new(Duration::from_millis(300));
        {
            let mut slot = pacer.acquire().await;
            slot.begin();
            slot.complete();
        }
        let start = Instant::now();
        let _slot = pacer.acquire().await;
        assert_eq!(start.elapsed(), Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hold_consumes_interval() {
        let pacer = Pacer::new(Duration::from_millis(300));
        let start = Instant::now();
        {
            let mut slot = pacer.acquire().await;
            slot.begin();
            slot.complete();
            slot.hold().await;
        }
        let _slot = pacer.acquire().await;
        assert_eq!(start.elapsed(), Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_request_still_counts() {
        let pacer = Pacer::new(Duration::from_millis(300));
        {
            let mut slot = pacer.acquire().await;
            slot.begin();
        }
        assert!(pacer.last_request().await.is_some());
    }
}
