pub mod record;
pub mod sink;
pub mod subscriber;

pub use record::{LogLevel, LogRecord};
pub use sink::{LogSink, MemorySink, TracingSink};
