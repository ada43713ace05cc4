//! Cancellable once-per-period pulse source.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Period of the quiz countdown.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A spawned task that emits a pulse every period.
///
/// The first pulse arrives one full period after spawning. Dropping the
/// ticker aborts the task, after which [`Ticker::tick`] returns `None`.
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
    pulses: mpsc::Receiver<()>,
}

impl Ticker {
    /// Spawn a ticker on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn(period: Duration) -> Self {
        let (tx, pulses) = mpsc::channel(1);
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        Self { handle, pulses }
    }

    /// Wait for the next pulse. `None` once the ticker has been cancelled.
    pub async fn tick(&mut self) -> Option<()> {
        self.pulses.recv().await
    }

    /// Stop the pulse source.
    pub fn cancel(&mut self) {
        self.handle.abort();
        self.pulses.close();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let mut ticker = Ticker::spawn(TICK_PERIOD);
        let start = Instant::now();

        ticker.tick().await.unwrap();
        assert_eq!(start.elapsed(), TICK_PERIOD);
        ticker.tick().await.unwrap();
        assert_eq!(start.elapsed(), TICK_PERIOD * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_ticker_stops() {
        let mut ticker = Ticker::spawn(TICK_PERIOD);
        ticker.tick().await.unwrap();

        ticker.cancel();
        assert_eq!(ticker.tick().await, None);
    }
}
