use super::{LineType, ParserState, TagRule, parse_uint_tag};
use crate::error::LineError;

/// Rule setting the running sequence cursor from #EXT-X-MEDIA-SEQUENCE.
pub struct MediaSequenceRule;

impl TagRule for MediaSequenceRule {
    fn matches(&self, line_type: &LineType) -> bool {
        *line_type == LineType::ExtXMediaSequence
    }

    fn apply(&self, line: &str, state: &mut ParserState) -> Result<(), LineError> {
        let seq = parse_uint_tag(line, "EXT-X-MEDIA-SEQUENCE", "media sequence")?;
        state.update_media_sequence(seq);
        Ok(())
    }
}
