/// Represents the type of a line in an M3U8 playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    Empty,
    ExtM3U,
    ExtXStreamInf,
    ExtInf,
    ExtXMediaSequence,
    ExtXTargetDuration,
    UnknownExtTag,
    Comment,
    Uri,
}

impl LineType {
    pub fn is_tag(&self) -> bool {
        !matches!(self, Self::Empty | Self::Uri | Self::Comment)
    }

    pub fn is_uri(&self) -> bool {
        matches!(self, Self::Uri)
    }

    /// Lines that carry no information for the parser.
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Empty | Self::Comment | Self::UnknownExtTag)
    }
}

/// Classifier for M3U8 lines.
pub struct LineClassifier;

impl LineClassifier {
    /// Classify a line from an M3U8 playlist.
    ///
    /// Tags are matched on their name alone so that a known tag with a broken
    /// separator still reaches its rule and is reported as malformed.
    pub fn classify(line: &str) -> LineType {
        let line = line.trim();

        if line.is_empty() {
            return LineType::Empty;
        }

        if !line.starts_with('#') {
            return LineType::Uri;
        }

        // EXT-X-MEDIA-SEQUENCE must be tested before any shorter EXT-X-MEDIA prefix.
        if line.starts_with("#EXTM3U") {
            LineType::ExtM3U
        } else if line.starts_with("#EXT-X-MEDIA-SEQUENCE") {
            LineType::ExtXMediaSequence
        } else if line.starts_with("#EXT-X-STREAM-INF") {
            LineType::ExtXStreamInf
        } else if line.starts_with("#EXTINF") {
            LineType::ExtInf
        } else if line.starts_with("#EXT-X-TARGETDURATION") {
            LineType::ExtXTargetDuration
        } else if line.starts_with("#EXT") {
            LineType::UnknownExtTag
        } else {
            LineType::Comment
        }
    }
}
