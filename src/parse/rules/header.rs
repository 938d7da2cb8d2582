use super::{LineType, ParserState, TagRule};
use crate::error::LineError;

/// Rule recording the #EXTM3U header.
pub struct HeaderRule;

impl TagRule for HeaderRule {
    fn matches(&self, line_type: &LineType) -> bool {
        *line_type == LineType::ExtM3U
    }

    fn apply(&self, _line: &str, state: &mut ParserState) -> Result<(), LineError> {
        state.is_extended = true;
        Ok(())
    }
}
