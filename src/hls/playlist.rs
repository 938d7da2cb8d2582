use url::Url;

use super::{SegmentInfo, StreamInfo};

/// Whether a playlist lists renditions or media segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaylistKind {
    Master,
    #[default]
    Variant,
}

/// A rendition declared by #EXT-X-STREAM-INF in a master playlist.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamEntry {
    pub bandwidth: u64,
    pub codecs: Option<String>,
    pub url: Url,
}

impl StreamEntry {
    pub fn new(info: StreamInfo, url: Url) -> Self {
        Self {
            bandwidth: info.bandwidth,
            codecs: info.codecs,
            url,
        }
    }
}

/// A media segment declared by #EXTINF in a variant playlist.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentEntry {
    pub media_sequence: u64,
    pub duration: f64,
    pub extra_info: Option<String>,
    pub url: Url,
}

impl SegmentEntry {
    pub fn new(info: SegmentInfo, media_sequence: u64, url: Url) -> Self {
        Self {
            media_sequence,
            duration: info.duration,
            extra_info: info.extra_info,
            url,
        }
    }
}

/// A single resource referenced by a playlist.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Stream(StreamEntry),
    Segment(SegmentEntry),
}

impl Entry {
    pub fn url(&self) -> &Url {
        match self {
            Self::Stream(s) => &s.url,
            Self::Segment(s) => &s.url,
        }
    }

    pub fn as_segment(&self) -> Option<&SegmentEntry> {
        match self {
            Self::Segment(s) => Some(s),
            Self::Stream(_) => None,
        }
    }

    pub fn as_stream(&self) -> Option<&StreamEntry> {
        match self {
            Self::Stream(s) => Some(s),
            Self::Segment(_) => None,
        }
    }
}

/// Result of parsing one playlist document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playlist {
    pub kind: PlaylistKind,
    /// Entries in source order.
    pub entries: Vec<Entry>,
    /// Sequence number the next unlabeled segment would receive.
    pub current_media_sequence: u64,
    /// Advisory upper bound on segment duration, in seconds.
    pub target_duration: Option<u64>,
}

impl Playlist {
    pub fn is_master(&self) -> bool {
        self.kind == PlaylistKind::Master
    }

    pub fn segments(&self) -> impl Iterator<Item = &SegmentEntry> {
        self.entries.iter().filter_map(Entry::as_segment)
    }

    pub fn streams(&self) -> impl Iterator<Item = &StreamEntry> {
        self.entries.iter().filter_map(Entry::as_stream)
    }
}
