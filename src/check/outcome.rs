/// Classification of a single segment fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Ok,
    ClientError,
    ServerError,
    ProtocolError,
    EmptySegmentError,
}

impl CheckOutcome {
    /// Classify an HTTP status that did not already produce a result.
    ///
    /// Both comparisons are strict: 400 falls through to the body checks and
    /// 500 counts as a client error.
    pub fn from_status(status: u16) -> Option<Self> {
        if status > 500 {
            Some(Self::ServerError)
        } else if status > 400 {
            Some(Self::ClientError)
        } else {
            None
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::ClientError => "client_error",
            Self::ServerError => "server_error",
            Self::ProtocolError => "protocol_error",
            Self::EmptySegmentError => "empty_segment",
        }
    }

    /// Log message for a final failure of this kind.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Ok => "Segment fetched",
            Self::ClientError => "Client (4xx) error while fetching segment",
            Self::ServerError => "Server (5xx) error while fetching segment",
            Self::ProtocolError => "HTTP protocol error while fetching segment",
            Self::EmptySegmentError => "Received empty segment",
        }
    }
}

/// Per-rendition failure counters. Only ever incremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckCounters {
    pub client_errors: u64,
    pub server_errors: u64,
    pub protocol_errors: u64,
    pub empty_segment_errors: u64,
}

impl CheckCounters {
    pub fn record(&mut self, outcome: CheckOutcome) {
        match outcome {
            CheckOutcome::Ok => {}
            CheckOutcome::ClientError => self.client_errors += 1,
            CheckOutcome::ServerError => self.server_errors += 1,
            CheckOutcome::ProtocolError => self.protocol_errors += 1,
            CheckOutcome::EmptySegmentError => self.empty_segment_errors += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.client_errors + self.server_errors + self.protocol_errors + self.empty_segment_errors
    }
}
