use super::{LineType, ParserState, TagRule};
use crate::{error::LineError, hls::SegmentInfo};

/// Rule opening a segment entry from #EXTINF.
pub struct SegmentInfRule;

impl TagRule for SegmentInfRule {
    fn matches(&self, line_type: &LineType) -> bool {
        *line_type == LineType::ExtInf
    }

    fn apply(&self, line: &str, state: &mut ParserState) -> Result<(), LineError> {
        let info = SegmentInfo::parse(line)?;
        state.set_pending_segment(info);
        Ok(())
    }
}
