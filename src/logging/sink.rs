use std::{fmt, sync::Mutex};

use super::record::{LogLevel, LogRecord};

/// Destination for diagnostic events emitted by monitors and checkers.
pub trait LogSink: Send + Sync {
    fn emit(&self, record: LogRecord);
}

/// Fields recorded as structured `tracing` fields. Any other field is appended
/// to the event message.
const STRUCTURED_FIELDS: [&str; 4] = ["rendition", "url", "outcome", "sequence"];

/// Message plus the fields not in [`STRUCTURED_FIELDS`].
struct Remainder<'a>(&'a LogRecord);

impl fmt::Display for Remainder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.message)?;
        for (key, value) in &self.0.fields {
            if !STRUCTURED_FIELDS.contains(key) {
                write!(f, " {}={}", key, value)?;
            }
        }
        Ok(())
    }
}

macro_rules! forward {
    ($level:expr, $record:expr) => {
        tracing::event!(
            $level,
            rendition = $record.field("rendition"),
            url = $record.field("url"),
            outcome = $record.field("outcome"),
            sequence = $record.field("sequence"),
            "{}",
            Remainder(&$record)
        )
    };
}

/// Forwards records to the `tracing` subscriber installed by the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, record: LogRecord) {
        match record.level {
            LogLevel::Debug => forward!(tracing::Level::DEBUG, record),
            LogLevel::Info => forward!(tracing::Level::INFO, record),
            LogLevel::Warn => forward!(tracing::Level::WARN, record),
            LogLevel::Error => forward!(tracing::Level::ERROR, record),
        }
    }
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn at_level(&self, level: LogLevel) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level)
            .collect()
    }
}

impl LogSink for MemorySink {
    fn emit(&self, record: LogRecord) {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(record);
    }
}
