pub mod checker;
pub mod outcome;
pub mod retry;

pub use checker::SegmentChecker;
pub use outcome::{CheckCounters, CheckOutcome};
pub use retry::RetryPolicy;
