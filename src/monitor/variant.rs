use std::sync::Arc;
use tokio::task::JoinHandle;
use url::Url;

use super::{
    state::{MonitorPhase, VariantMonitorState},
    ticker::TickSource,
};
use crate::{
    Error,
    check::{CheckOutcome, RetryPolicy, SegmentChecker},
    fetch::{Fetcher, fetch_and_parse},
    hls::SegmentEntry,
    logging::{LogRecord, LogSink},
};

/// Result of checking one segment during a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentReport {
    pub media_sequence: u64,
    pub outcome: CheckOutcome,
}

/// What a single refresh cycle did.
#[derive(Debug)]
pub enum CycleReport {
    /// The playlist could not be fetched or parsed; nothing was dispatched.
    RefreshFailed(Error),
    /// New segments that were checked, in dispatch order.
    Checked(Vec<SegmentReport>),
}

impl CycleReport {
    pub fn dispatched(&self) -> Vec<u64> {
        match self {
            Self::RefreshFailed(_) => Vec::new(),
            Self::Checked(reports) => reports.iter().map(|r| r.media_sequence).collect(),
        }
    }
}

/// Polls one variant playlist and checks every segment it has not seen yet.
pub struct VariantMonitor {
    state: VariantMonitorState,
    phase: MonitorPhase,
    fetcher: Arc<dyn Fetcher>,
    sink: Arc<dyn LogSink>,
    checker: SegmentChecker,
}

impl VariantMonitor {
    /// Build a monitor without starting it.
    pub fn new(
        url: Url,
        fetcher: Arc<dyn Fetcher>,
        sink: Arc<dyn LogSink>,
        retry: RetryPolicy,
    ) -> Self {
        let checker = SegmentChecker::new(url.clone(), fetcher.clone(), sink.clone(), retry);
        Self {
            state: VariantMonitorState::new(url),
            phase: MonitorPhase::Polling,
            fetcher,
            sink,
            checker,
        }
    }

    pub fn url(&self) -> &Url {
        self.state.url()
    }

    pub fn state(&self) -> &VariantMonitorState {
        &self.state
    }

    pub fn phase(&self) -> MonitorPhase {
        self.phase
    }

    /// Refresh the playlist once and check the segments that appeared since the
    /// previous cycle.
    pub async fn run_cycle(&mut self) -> CycleReport {
        self.phase = MonitorPhase::Refreshing;
        let playlist = match fetch_and_parse(self.fetcher.as_ref(), self.state.url()).await {
            Ok(playlist) => playlist,
            Err(e) => {
                let message = if e.is_fetch() {
                    "Fetching variant playlist failed"
                } else {
                    "Parsing variant playlist failed"
                };
                self.sink.emit(
                    LogRecord::error(message)
                        .with_field("url", self.state.url())
                        .with_field("error", &e),
                );
                self.phase = MonitorPhase::Polling;
                return CycleReport::RefreshFailed(e);
            }
        };

        self.phase = MonitorPhase::Diffing;
        let fresh: Vec<SegmentEntry> = playlist
            .segments()
            .filter(|segment| self.state.is_new(segment.media_sequence))
            .cloned()
            .collect();

        self.sink.emit(
            LogRecord::debug("Variant playlist refreshed")
                .with_field("url", self.state.url())
                .with_field("segments", playlist.segments().count())
                .with_field("new", fresh.len()),
        );

        self.phase = MonitorPhase::Dispatching;
        let mut reports = Vec::with_capacity(fresh.len());
        for segment in &fresh {
            // A segment whose sequence is no longer ahead of the cursor was
            // covered by an earlier entry of this playlist.
            if !self.state.is_new(segment.media_sequence) {
                continue;
            }

            let outcome = self
                .checker
                .retry_check_segment(segment, self.state.counters_mut())
                .await;
            self.state.mark_seen(segment.media_sequence);

            reports.push(SegmentReport {
                media_sequence: segment.media_sequence,
                outcome,
            });
        }

        self.phase = MonitorPhase::Polling;
        CycleReport::Checked(reports)
    }

    /// Run one cycle per tick until the tick source ends.
    pub async fn run<T: TickSource>(&mut self, mut ticks: T) {
        self.sink
            .emit(LogRecord::info("Starting HLS checker").with_field("url", self.state.url()));

        while ticks.tick().await {
            self.run_cycle().await;
        }

        let counters = self.state.counters();
        self.sink.emit(
            LogRecord::info("HLS checker stopped")
                .with_field("url", self.state.url())
                .with_field("last_sequence", self.state.last_seen_sequence())
                .with_field("client_errors", counters.client_errors)
                .with_field("server_errors", counters.server_errors)
                .with_field("protocol_errors", counters.protocol_errors)
                .with_field("empty_segment_errors", counters.empty_segment_errors),
        );
    }

    /// Move the monitor onto its own task. The handle yields the monitor back
    /// once the tick source ends.
    pub fn spawn<T>(mut self, ticks: T) -> JoinHandle<Self>
    where
        T: TickSource + 'static,
    {
        tokio::spawn(async move {
            self.run(ticks).await;
            self
        })
    }
}
