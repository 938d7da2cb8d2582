use super::{LineType, ParserState, TagRule};
use crate::{error::LineError, hls::StreamInfo};

/// Rule opening a rendition entry from #EXT-X-STREAM-INF.
pub struct StreamInfRule;

impl TagRule for StreamInfRule {
    fn matches(&self, line_type: &LineType) -> bool {
        *line_type == LineType::ExtXStreamInf
    }

    fn apply(&self, line: &str, state: &mut ParserState) -> Result<(), LineError> {
        let info = StreamInfo::parse(line)?;
        state.set_pending_stream(info);
        Ok(())
    }
}
