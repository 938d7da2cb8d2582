use async_trait::async_trait;
use std::time::Duration;
use tokio::{
    sync::mpsc,
    time::{Instant, Interval, MissedTickBehavior},
};

/// Source of poll ticks for a monitor.
#[async_trait]
pub trait TickSource: Send {
    /// Wait for the next tick. Returns `false` once no more ticks will come.
    async fn tick(&mut self) -> bool;
}

#[async_trait]
impl TickSource for Interval {
    async fn tick(&mut self) -> bool {
        Interval::tick(self).await;
        true
    }
}

/// Each message is one tick; the source ends when every sender is dropped.
#[async_trait]
impl TickSource for mpsc::Receiver<()> {
    async fn tick(&mut self) -> bool {
        self.recv().await.is_some()
    }
}

/// Fixed-period ticker whose first tick fires one period from now.
///
/// A cycle that overruns the period delays the following tick instead of
/// producing a burst of catch-up ticks.
pub fn interval_ticker(period: Duration) -> Interval {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_interval_ticker_waits_one_period() {
        let start = Instant::now();
        let mut ticker = interval_ticker(Duration::from_secs(1));

        assert!(TickSource::tick(&mut ticker).await);
        assert!(start.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_channel_ticker_ends_when_closed() {
        let (tx, mut rx) = mpsc::channel(2);
        tx.send(()).await.unwrap();
        drop(tx);

        assert!(TickSource::tick(&mut rx).await);
        assert!(!TickSource::tick(&mut rx).await);
    }
}
