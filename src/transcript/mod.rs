//! Transcript input for chapterization.
//!
//! Transcripts arrive as plain text plus timed records. Records may be one per
//! word (synthesized from text) or one per caption cue; chapter timestamps are
//! looked up positionally either way.

mod demo;
mod models;
mod source;

pub use demo::DEMO_SECONDS_PER_WORD;
pub use models::{chunk_start, format_timestamp, load_transcript, Transcript, TranscriptRecord};
pub use source::{extract_video_id, timestamp_url};
