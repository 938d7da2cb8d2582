pub mod playlist;
pub mod segment;
pub mod stream_info;

pub use playlist::{Entry, Playlist, PlaylistKind, SegmentEntry, StreamEntry};
pub use segment::SegmentInfo;
pub use stream_info::StreamInfo;
