use super::{LineType, ParserState, TagRule, parse_uint_tag};
use crate::error::LineError;

/// Rule storing #EXT-X-TARGETDURATION.
pub struct TargetDurationRule;

impl TagRule for TargetDurationRule {
    fn matches(&self, line_type: &LineType) -> bool {
        *line_type == LineType::ExtXTargetDuration
    }

    fn apply(&self, line: &str, state: &mut ParserState) -> Result<(), LineError> {
        state.target_duration = Some(parse_uint_tag(
            line,
            "EXT-X-TARGETDURATION",
            "target duration",
        )?);
        Ok(())
    }
}
