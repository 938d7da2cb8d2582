use url::Url;

use crate::check::CheckCounters;

/// Step of the polling loop a monitor is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorPhase {
    /// Waiting for the next tick.
    Polling,
    /// Fetching and parsing the variant playlist.
    Refreshing,
    /// Selecting segments newer than the cursor.
    Diffing,
    /// Checking the selected segments.
    Dispatching,
}

/// Mutable state of one rendition, owned by its monitor.
#[derive(Debug, Clone)]
pub struct VariantMonitorState {
    url: Url,
    last_seen_sequence: u64,
    counters: CheckCounters,
}

impl VariantMonitorState {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            last_seen_sequence: 0,
            counters: CheckCounters::default(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Highest media sequence already dispatched for checking.
    pub fn last_seen_sequence(&self) -> u64 {
        self.last_seen_sequence
    }

    pub fn counters(&self) -> &CheckCounters {
        &self.counters
    }

    pub(super) fn counters_mut(&mut self) -> &mut CheckCounters {
        &mut self.counters
    }

    /// Whether `sequence` has not been dispatched yet.
    pub fn is_new(&self, sequence: u64) -> bool {
        sequence > self.last_seen_sequence
    }

    /// Move the cursor forward. Never moves it back.
    pub(super) fn mark_seen(&mut self, sequence: u64) {
        self.last_seen_sequence = self.last_seen_sequence.max(sequence);
    }
}
