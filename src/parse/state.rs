use url::Url;

use crate::{
    hls::{Entry, Playlist, PlaylistKind, SegmentEntry, SegmentInfo, StreamEntry, StreamInfo},
};

/// Represents the entry opened by a tag and waiting for its URI line.
#[derive(Debug, Clone)]
pub enum PendingEntry {
    /// Next URI is a variant playlist.
    Stream(StreamInfo),
    /// Next URI is a segment.
    Segment(SegmentInfo),
}

/// State maintained during a single parse pass.
#[derive(Debug, Clone)]
pub struct ParserState {
    /// Running classification, overwritten by every entry tag.
    pub kind: PlaylistKind,

    /// Whether #EXTM3U has been seen anywhere in the document.
    pub is_extended: bool,

    /// Sequence number for the next segment.
    pub media_sequence: u64,

    /// Value of #EXT-X-TARGETDURATION.
    pub target_duration: Option<u64>,

    /// Entry waiting for its URI.
    pub pending: Option<PendingEntry>,

    /// Completed entries in source order.
    pub entries: Vec<Entry>,
}

impl ParserState {
    pub fn new() -> Self {
        Self {
            kind: PlaylistKind::default(),
            is_extended: false,
            media_sequence: 0,
            target_duration: None,
            pending: None,
            entries: Vec::new(),
        }
    }

    pub fn is_master_playlist(&self) -> bool {
        self.kind == PlaylistKind::Master
    }

    pub fn set_pending_stream(&mut self, info: StreamInfo) {
        self.kind = PlaylistKind::Master;
        self.pending = Some(PendingEntry::Stream(info));
    }

    pub fn set_pending_segment(&mut self, info: SegmentInfo) {
        self.kind = PlaylistKind::Variant;
        self.pending = Some(PendingEntry::Segment(info));
    }

    /// Set the cursor for the segments that follow.
    pub fn update_media_sequence(&mut self, seq: u64) {
        self.media_sequence = seq;
    }

    /// Complete the pending entry with its resolved URI.
    ///
    /// A URI with nothing pending is taken as a segment of unknown duration.
    pub fn complete(&mut self, url: Url) {
        let entry = match self.pending.take() {
            Some(PendingEntry::Stream(info)) => Entry::Stream(StreamEntry::new(info, url)),
            Some(PendingEntry::Segment(info)) => Entry::Segment(self.stamp(info, url)),
            None => Entry::Segment(self.stamp(SegmentInfo::default(), url)),
        };
        self.entries.push(entry);
    }

    fn stamp(&mut self, info: SegmentInfo, url: Url) -> SegmentEntry {
        let entry = SegmentEntry::new(info, self.media_sequence, url);
        self.media_sequence += 1;
        entry
    }

    pub fn into_playlist(self) -> Playlist {
        Playlist {
            kind: self.kind,
            entries: self.entries,
            current_media_sequence: self.media_sequence,
            target_duration: self.target_duration,
        }
    }
}

impl Default for ParserState {
    fn default() -> Self {
        Self::new()
    }
}
