pub mod ext_inf;
pub mod header;
pub mod media_sequence;
pub mod stream_inf;
pub mod target_duration;

use super::{classifier::LineType, state::ParserState};
use crate::error::LineError;

pub use ext_inf::SegmentInfRule;
pub use header::HeaderRule;
pub use media_sequence::MediaSequenceRule;
pub use stream_inf::StreamInfRule;
pub use target_duration::TargetDurationRule;

/// Trait for tag rules.
pub trait TagRule: Send + Sync {
    /// Check if this rule handles the line.
    fn matches(&self, line_type: &LineType) -> bool;

    /// Apply the tag to the parser state.
    fn apply(&self, line: &str, state: &mut ParserState) -> Result<(), LineError>;
}

/// Create default set of tag rules.
pub fn default_rules() -> Vec<Box<dyn TagRule>> {
    vec![
        Box::new(HeaderRule),
        Box::new(StreamInfRule),
        Box::new(SegmentInfRule),
        Box::new(MediaSequenceRule),
        Box::new(TargetDurationRule),
    ]
}

/// Parse a `#TAG:<unsigned integer>` line.
pub(crate) fn parse_uint_tag(
    line: &str,
    tag: &'static str,
    field: &'static str,
) -> Result<u64, LineError> {
    let value = line
        .trim()
        .strip_prefix('#')
        .and_then(|l| l.strip_prefix(tag))
        .and_then(|l| l.strip_prefix(':'))
        .ok_or(LineError::MalformedTag(tag))?
        .trim();

    value.parse().map_err(|_| LineError::InvalidNumber {
        tag,
        field,
        value: value.to_string(),
    })
}
