use crate::error::LineError;

const TAG: &str = "EXTINF";

/// Represents parsed segment information from #EXTINF tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentInfo {
    /// Segment duration in seconds.
    pub duration: f64,
    /// Everything after the first comma, kept verbatim.
    pub extra_info: Option<String>,
}

impl SegmentInfo {
    /// Parse from #EXTINF tag line.
    pub fn parse(line: &str) -> Result<Self, LineError> {
        let content = line
            .trim_end()
            .strip_prefix("#EXTINF:")
            .ok_or(LineError::MalformedTag(TAG))?;

        let (duration, extra) = match content.split_once(',') {
            Some((duration, extra)) => (duration, Some(extra)),
            None => (content, None),
        };

        let duration = duration.trim();
        let invalid = || LineError::InvalidNumber {
            tag: TAG,
            field: "duration",
            value: duration.to_string(),
        };
        let seconds: f64 = duration.parse().map_err(|_| invalid())?;
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(invalid());
        }

        Ok(Self {
            duration: seconds,
            extra_info: extra.filter(|e| !e.is_empty()).map(str::to_string),
        })
    }
}
