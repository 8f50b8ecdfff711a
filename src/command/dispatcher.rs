//! Command dispatcher - paced single and timed commands

use super::pacer::Pacer;
use super::request::CommandRequest;
use crate::error::TransportError;
use crate::safety::TerminalStop;
use crate::transport::DeviceTransport;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Outcome of a timed command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedRun {
    /// Dispatches of the repeated command that were started
    pub dispatches: usize,
    /// Wall-clock time from the first dispatch through the terminal stop
    pub elapsed: Duration,
    /// The run ended through its cancellation token
    pub cancelled: bool,
    /// The terminal stop could not be delivered; the robot may still be moving
    pub stop_failed: bool,
}

/// Sends commands to one module
///
/// Every dispatch holds the module's [`Pacer`] for the request and one full
/// pacing interval afterwards, so a timed run of duration `D` with interval
/// `P` sends its command `ceil(D / P)` times and takes between `D` and
/// `D + P` (plus request latency) before the terminal stop goes out.
#[derive(Clone)]
pub struct CommandDispatcher {
    transport: Arc<dyn DeviceTransport>,
    pacer: Arc<Pacer>,
}

impl CommandDispatcher {
    pub fn new(transport: Arc<dyn DeviceTransport>, pacer: Arc<Pacer>) -> Self {
        Self { transport, pacer }
    }

    pub fn pacing_interval(&self) -> Duration {
        self.pacer.interval()
    }

    /// Send one command, then hold the module for one pacing interval.
    /// The interval is observed whether or not the request succeeded.
    pub async fn send_once(&self, request: &CommandRequest) -> Result<(), TransportError> {
        let mut slot = self.pacer.acquire().await;
        debug!("[{}] >>> {}", self.transport.host(), request);

        slot.begin();
        let result = self
            .transport
            .send(request.path(), &request.query())
            .await;
        slot.complete();

        if let Err(e) = &result {
            warn!("[{}] {} failed: {}", self.transport.host(), request.name(), e);
        }

        slot.hold().await;
        result
    }

    /// Repeat `request` until `duration` has elapsed, then send the terminal stop
    pub async fn send_for(
        &self,
        request: &CommandRequest,
        duration: Duration,
    ) -> Result<TimedRun, TransportError> {
        self.send_for_until(request, duration, &CancellationToken::new())
            .await
    }

    /// Like [`send_for`](Self::send_for), ending early when `cancel` fires.
    ///
    /// The terminal stop is sent before this returns, whichever way the loop
    /// ended. If the returned future is dropped instead, the stop is spawned
    /// onto the current runtime.
    ///
    /// A failed stop is logged and never replaces the result of the loop: a
    /// dispatch error is still returned, a completed run comes back with
    /// [`TimedRun::stop_failed`] set.
    pub async fn send_for_until(
        &self,
        request: &CommandRequest,
        duration: Duration,
        cancel: &CancellationToken,
    ) -> Result<TimedRun, TransportError> {
        let mut stop = TerminalStop::arm(self.clone());
        let started = Instant::now();
        let mut dispatches = 0;
        let mut cancelled = false;

        info!(
            "[{}] Repeating {} for {:?}",
            self.transport.host(),
            request.name(),
            duration
        );

        let outcome = loop {
            if started.elapsed() >= duration {
                break Ok(());
            }
            if cancel.is_cancelled() {
                cancelled = true;
                break Ok(());
            }

            dispatches += 1;
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    cancelled = true;
                    break Ok(());
                }
                result = self.send_once(request) => {
                    if let Err(e) = result {
                        break Err(e);
                    }
                }
            }
        };

        let stopped = stop.fire().await;
        let run = TimedRun {
            dispatches,
            elapsed: started.elapsed(),
            cancelled,
            stop_failed: stopped.is_err(),
        };

        if cancelled {
            info!(
                "[{}] {} cancelled after {} dispatches",
                self.transport.host(),
                request.name(),
                dispatches
            );
        }

        match (outcome, stopped) {
            (Err(primary), Err(stop_err)) => {
                error!(
                    "[{}] Terminal stop failed after {} failed: {}",
                    self.transport.host(),
                    request.name(),
                    stop_err
                );
                Err(primary)
            }
            (Err(primary), Ok(())) => Err(primary),
            (Ok(()), Err(stop_err)) => {
                error!("[{}] Terminal stop failed: {}", self.transport.host(), stop_err);
                Ok(run)
            }
            (Ok(()), Ok(())) => Ok(run),
        }
    }

    /// Send the terminal stop. Waits out the pacing interval before the
    /// request but does not hold the module afterwards.
    pub(crate) async fn send_stop(&self) -> Result<(), TransportError> {
        let request = CommandRequest::stop();
        let mut slot = self.pacer.acquire().await;

        slot.begin();
        let result = self
            .transport
            .send(request.path(), &request.query())
            .await;
        slot.complete();

        match &result {
            Ok(()) => info!("[{}] Terminal stop sent", self.transport.host()),
            Err(e) => warn!("[{}] Terminal stop failed: {}", self.transport.host(), e),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockTransport;

    const P: Duration = Duration::from_millis(300);

    fn dispatcher(transport: &Arc<MockTransport>) -> CommandDispatcher {
        CommandDispatcher::new(transport.clone(), Arc::new(Pacer::new(P)))
    }

    fn forward() -> CommandRequest {
        CommandRequest::command("drive_only")
            .param("degrees", 180)
            .param("speed", 200)
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_once_holds_pacing_interval() {
        let transport = Arc::new(MockTransport::new());
        let dispatcher = dispatcher(&transport);

        let start = Instant::now();
        dispatcher.send_once(&forward()).await.unwrap();
        assert_eq!(start.elapsed(), P);
        assert_eq!(transport.commands(), vec!["drive_only"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_once_paces_failures_too() {
        let transport = Arc::new(MockTransport::new());
        transport.fail("drive_only");
        let dispatcher = dispatcher(&transport);

        let start = Instant::now();
        let result = dispatcher.send_once(&forward()).await;
        assert!(matches!(result, Err(TransportError::Unreachable { .. })));
        assert_eq!(start.elapsed(), P);
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_for_zero_duration_only_stops() {
        let transport = Arc::new(MockTransport::new());
        let dispatcher = dispatcher(&transport);

        let run = dispatcher.send_for(&forward(), Duration::ZERO).await.unwrap();

        assert!(run.dispatches <= 1);
        assert_eq!(transport.count("drive_only"), run.dispatches);
        assert_eq!(transport.count("drivestop"), 1);
        assert_eq!(transport.commands().last().unwrap(), "drivestop");
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_for_multiple_of_interval() {
        let transport = Arc::new(MockTransport::new());
        let dispatcher = dispatcher(&transport);
        let duration = P * 4;

        let run = dispatcher.send_for(&forward(), duration).await.unwrap();

        assert_eq!(run.dispatches, 4);
        assert!(!run.cancelled);
        assert!(run.elapsed >= duration && run.elapsed < duration + P);

        let journal = transport.journal();
        assert_eq!(journal.len(), 5);
        assert!(journal[..4].iter().all(|r| r.command() == "drive_only"));
        assert_eq!(journal[4].command(), "drivestop");
        for pair in journal.windows(2) {
            assert!(pair[1].at - pair[0].at >= P);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_for_overshoot_is_bounded() {
        let transport = Arc::new(MockTransport::with_latency(Duration::from_millis(40)));
        let dispatcher = dispatcher(&transport);
        let duration = Duration::from_millis(1000);

        let run = dispatcher.send_for(&forward(), duration).await.unwrap();

        // Each dispatch takes P plus 40ms of latency: 3 fit under 1s, none spill over
        assert_eq!(run.dispatches, 3);
        let latency = Duration::from_millis(40);
        assert!(run.elapsed >= duration);
        assert!(run.elapsed < duration + P + latency);
        assert_eq!(transport.count("drivestop"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_still_sends_one_stop() {
        let transport = Arc::new(MockTransport::new());
        let dispatcher = dispatcher(&transport);
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(450)).await;
            trigger.cancel();
        });

        let run = dispatcher
            .send_for_until(&forward(), Duration::from_secs(10), &cancel)
            .await
            .unwrap();

        assert!(run.cancelled);
        assert_eq!(run.dispatches, 2);
        assert_eq!(transport.commands(), vec!["drive_only", "drive_only", "drivestop"]);
        assert!(run.elapsed < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_cancelled_sends_only_stop() {
        let transport = Arc::new(MockTransport::new());
        let dispatcher = dispatcher(&transport);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let run = dispatcher
            .send_for_until(&forward(), Duration::from_secs(5), &cancel)
            .await
            .unwrap();

        assert!(run.cancelled);
        assert_eq!(run.dispatches, 0);
        assert_eq!(transport.commands(), vec!["drivestop"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_dispatch_is_reported_after_stop() {
        let transport = Arc::new(MockTransport::new());
        transport.fail("drive_only");
        let dispatcher = dispatcher(&transport);

        let result = dispatcher.send_for(&forward(), P * 5).await;

        assert!(matches!(result, Err(TransportError::Unreachable { .. })));
        assert_eq!(transport.commands(), vec!["drive_only", "drivestop"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_primary_error_wins_over_stop_error() {
        let transport = Arc::new(MockTransport::new());
        transport.fail("drive_only");
        transport.fail("drivestop");
        let dispatcher = dispatcher(&transport);

        let result = dispatcher.send_for(&forward(), P * 2).await;

        match result {
            Err(TransportError::Unreachable { url, .. }) => {
                assert!(url.ends_with("drive_only"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(transport.count("drivestop"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_error_does_not_mask_successful_run() {
        let transport = Arc::new(MockTransport::new());
        transport.fail("drivestop");
        let dispatcher = dispatcher(&transport);

        let run = dispatcher.send_for(&forward(), P).await.unwrap();

        assert!(run.stop_failed);
        assert_eq!(run.dispatches, 1);
        assert_eq!(transport.commands(), vec!["drive_only", "drivestop"]);

        transport.heal("drivestop");
        let run = dispatcher.send_for(&forward(), P).await.unwrap();
        assert!(!run.stop_failed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_run_still_stops() {
        let transport = Arc::new(MockTransport::new());
        let dispatcher = dispatcher(&transport);

        let request = forward();
        let run = dispatcher.send_for(&request, Duration::from_secs(10));
        let timed_out = tokio::time::timeout(Duration::from_millis(450), run).await;
        assert!(timed_out.is_err());

        // The stop was spawned from the drop guard
        tokio::time::sleep(P).await;
        assert_eq!(transport.count("drivestop"), 1);
        assert_eq!(transport.commands().last().unwrap(), "drivestop");
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_while_stop_waits_for_pacer() {
        let transport = Arc::new(MockTransport::new());
        let dispatcher = dispatcher(&transport);

        // Another caller queues for the module while the run is in flight
        let other = dispatcher.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let _ = other.send_once(&CommandRequest::command("spinleft")).await;
        });

        // The loop ends at 300ms; the stop then waits behind spinleft until 600ms
        let request = forward();
        let run = dispatcher.send_for(&request, P);
        let timed_out = tokio::time::timeout(Duration::from_millis(450), run).await;
        assert!(timed_out.is_err());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(transport.commands(), vec!["drive_only", "spinleft", "drivestop"]);
        assert_eq!(transport.count("drivestop"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_sends_never_overlap() {
        let transport = Arc::new(MockTransport::with_latency(Duration::from_millis(50)));
        let dispatcher = dispatcher(&transport);

        let left = CommandRequest::command("spinleft");
        let right = CommandRequest::command("spinright");
        let (ra, rb) = tokio::join!(dispatcher.send_once(&left), dispatcher.send_once(&right));
        ra.unwrap();
        rb.unwrap();

        let journal = transport.journal();
        assert_eq!(journal.len(), 2);
        // second request starts only after the first completed and was held
        assert!(journal[1].at - journal[0].at >= P + Duration::from_millis(50));
    }
}
