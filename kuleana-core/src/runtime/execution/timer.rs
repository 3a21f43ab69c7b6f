use std::time::Duration;

use tokio::sync::Notify;
use tokio::time;

use kuleana_common::prelude::*;

/// Cooperative cancellation flag shared between the engine and one
/// instance's continuation. Raised at most once, never lowered.
pub struct CancelSignal {
    flag: AtomicBool,
    notify: Notify,
}

impl CancelSignal {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            flag: AtomicBool::new(false),
            notify: Notify::new(),
        })
    }

    pub fn cancel(&self) {
        self.flag.store(true, AtomicOrdering::Release);
        self.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(AtomicOrdering::Acquire)
    }

    /// Resolves once the signal is raised. The notification is enabled
    /// before the flag is re-checked, so a cancel landing between the
    /// check and the await is not lost.
    pub async fn cancelled(&self) {
        loop {
            if self.is_cancelled() {
                return;
            }
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// Suspends a workflow continuation for a logical duration without
/// occupying a worker thread. Durations are divided by the configured
/// compression factor, so deployments can run day-long process delays
/// at demo speed; tests instead run under tokio's paused clock.
#[derive(Clone, Copy, Debug)]
pub struct DurableTimer {
    compression: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerOutcome {
    Elapsed,
    Cancelled,
}

impl DurableTimer {
    pub fn new(compression: u32) -> Self {
        Self {
            compression: compression.max(1),
        }
    }

    fn effective(&self, logical: Duration) -> Duration {
        logical / self.compression
    }

    /// Waits out the logical duration, resuming early only when the
    /// instance is cancelled.
    pub async fn sleep(&self, logical: Duration, cancel: &CancelSignal) -> TimerOutcome {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => TimerOutcome::Cancelled,
            _ = time::sleep(self.effective(logical)) => TimerOutcome::Elapsed,
        }
    }

    /// Uncancellable delay, used for retry backoff between activity
    /// attempts.
    pub async fn delay(&self, logical: Duration) {
        time::sleep(self.effective(logical)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn timer_elapses_without_cancellation() {
        let timer = DurableTimer::new(1);
        let cancel = CancelSignal::new();
        let outcome = timer.sleep(Duration::from_secs(3600), &cancel).await;
        assert_eq!(outcome, TimerOutcome::Elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_wakes_a_pending_sleep() {
        let timer = DurableTimer::new(1);
        let cancel = CancelSignal::new();
        let waiter = {
            let cancel = cancel.clone();
            tokio::spawn(async move { timer.sleep(Duration::from_secs(86400), &cancel).await })
        };
        tokio::time::sleep(Duration::from_secs(60)).await;
        cancel.cancel();
        assert_eq!(waiter.await.unwrap(), TimerOutcome::Cancelled);
    }

    #[test]
    fn compression_divides_durations() {
        let timer = DurableTimer::new(60);
        assert_eq!(
            timer.effective(Duration::from_secs(3600)),
            Duration::from_secs(60)
        );
    }
}
