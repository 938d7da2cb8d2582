pub mod state;
pub mod ticker;
pub mod variant;

pub use state::{MonitorPhase, VariantMonitorState};
pub use ticker::{TickSource, interval_ticker};
pub use variant::{CycleReport, SegmentReport, VariantMonitor};
