//! Data models for transcripts.

use crate::error::{Result, VibeError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// A single timed unit of a transcript: one word or one caption cue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    /// Token or cue text.
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: f64,
}

impl TranscriptRecord {
    /// Create a new transcript record.
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }

    /// End time in seconds.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Plain text plus its timed records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    /// Full transcript text.
    pub text: String,
    /// Ordered records with non-decreasing start times.
    #[serde(default)]
    pub records: Vec<TranscriptRecord>,
}

impl Transcript {
    /// Create a transcript from text and records.
    pub fn new(text: impl Into<String>, records: Vec<TranscriptRecord>) -> Self {
        Self {
            text: text.into(),
            records,
        }
    }

    /// Build a transcript from caption cues, joining their text with spaces.
    pub fn from_records(records: Vec<TranscriptRecord>) -> Self {
        let text = records
            .iter()
            .map(|r| r.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        Self { text, records }
    }

    /// Create one record per whitespace token, spaced `seconds_per_word` apart.
    pub fn synthetic(text: &str, seconds_per_word: f64) -> Self {
        let records = text
            .split_whitespace()
            .enumerate()
            .map(|(i, word)| TranscriptRecord::new(word, i as f64 * seconds_per_word, seconds_per_word))
            .collect();

        Self {
            text: text.trim().to_string(),
            records,
        }
    }

    /// Whether the transcript has no usable text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// End of the last record in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.records.last().map(|r| r.end()).unwrap_or(0.0)
    }

    /// Start of the last record in seconds.
    pub fn last_start(&self) -> f64 {
        self.records.last().map(|r| r.start).unwrap_or(0.0)
    }

    /// Total number of words in the text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// On-disk JSON shapes accepted by [`load_transcript`].
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TranscriptFile {
    Full(Transcript),
    Records(Vec<TranscriptRecord>),
}

/// Load a transcript from a local file.
///
/// `.json` files hold either a `{text, records}` object or a bare array of
/// records; anything else is read as plain text with synthetic word records.
pub fn load_transcript(path: &Path, seconds_per_word: f64) -> Result<Transcript> {
    let content = std::fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let transcript = if is_json {
        match serde_json::from_str::<TranscriptFile>(&content)? {
            TranscriptFile::Full(t) if t.records.is_empty() => {
                Transcript::synthetic(&t.text, seconds_per_word)
            }
            TranscriptFile::Full(t) if t.text.trim().is_empty() => Transcript::from_records(t.records),
            TranscriptFile::Full(t) => t,
            TranscriptFile::Records(records) => Transcript::from_records(records),
        }
    } else {
        Transcript::synthetic(&content, seconds_per_word)
    };

    if transcript.is_empty() {
        return Err(VibeError::Transcript(format!(
            "no transcript text in {}",
            path.display()
        )));
    }

    debug!("Loaded {} records from {}", transcript.records.len(), path.display());
    info!("Transcript loaded: {} words", transcript.word_count());
    Ok(transcript)
}

/// Start of chunk `chunk_index` when chunks hold `max_words` words each.
///
/// Looks up record `chunk_index * max_words`; 0 when that is past the end.
pub fn chunk_start(records: &[TranscriptRecord], chunk_index: usize, max_words: usize) -> f64 {
    records
        .get(chunk_index * max_words)
        .map(|r| r.start)
        .unwrap_or(0.0)
}

/// Format seconds as MM:SS or HH:MM:SS.
pub fn format_timestamp(seconds: f64) -> String {
    let total_seconds = seconds.max(0.0) as u32;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}
