//! Chapter assembly and analytics.
//!
//! Pairs each chunk's title with a start time taken positionally from the
//! transcript records: chunk `i` starts at record `i * max_words`. This works
//! for per-word records and, approximately, for caption cues.

mod format;

pub use format::{format_chapters, ChapterFormat};

use crate::chunking::{split_text, word_count};
use crate::emotion::{ChunkEmotion, Highlight, TimelinePoint};
use crate::error::Result;
use crate::titling::{SummarizationStatus, TitleSummarizer};
use crate::transcript::{chunk_start, Transcript, TranscriptRecord};
use serde::{Deserialize, Serialize};

/// A titled, timestamped chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    /// Zero-based position.
    pub index: usize,
    pub title: String,
    /// Start in seconds.
    pub start_time: f64,
    pub word_count: usize,
}

/// Summary numbers for a chapterized transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterStats {
    pub chapter_count: usize,
    pub total_words: usize,
    /// Whole minutes up to the last record's start.
    pub length_minutes: u64,
    pub average_words: usize,
    pub chapter_words: Vec<usize>,
}

impl ChapterStats {
    pub fn compute(transcript: &Transcript, chapters: &[Chapter]) -> Self {
        let total_words = transcript.word_count();
        let average_words = if chapters.is_empty() {
            0
        } else {
            total_words / chapters.len()
        };

        Self {
            chapter_count: chapters.len(),
            total_words,
            length_minutes: transcript.last_start().max(0.0) as u64 / 60,
            average_words,
            chapter_words: chapters.iter().map(|c| c.word_count).collect(),
        }
    }
}

/// Everything produced by one chapterization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterRun {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    pub max_words: usize,
    pub mode: String,
    pub chapters: Vec<Chapter>,
    pub stats: ChapterStats,
    /// End of the transcript in seconds.
    pub duration_seconds: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emotions: Vec<ChunkEmotion>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<Highlight>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub timeline: Vec<TimelinePoint>,
}

impl ChapterRun {
    pub fn new(
        transcript: &Transcript,
        max_words: usize,
        status: &SummarizationStatus,
        chapters: Vec<Chapter>,
    ) -> Self {
        Self {
            video_id: None,
            max_words,
            mode: status.description.clone(),
            stats: ChapterStats::compute(transcript, &chapters),
            chapters,
            duration_seconds: transcript.duration_seconds(),
            emotions: Vec::new(),
            highlights: Vec::new(),
            timeline: Vec::new(),
        }
    }
}

/// Split, title and timestamp a transcript.
pub async fn assemble_chapters(
    transcript: &Transcript,
    max_words: usize,
    titles: &TitleSummarizer,
) -> Result<Vec<Chapter>> {
    let chunks = split_text(&transcript.text, max_words)?;
    Ok(title_chunks(&chunks, &transcript.records, max_words, titles, |_, _| {}).await)
}

/// Title already-split chunks, reporting each finished chapter with the total.
pub async fn title_chunks<F>(
    chunks: &[String],
    records: &[TranscriptRecord],
    max_words: usize,
    titles: &TitleSummarizer,
    mut on_chapter: F,
) -> Vec<Chapter>
where
    F: FnMut(&Chapter, usize),
{
    let mut chapters = Vec::with_capacity(chunks.len());

    for (index, chunk) in chunks.iter().enumerate() {
        let chapter = Chapter {
            index,
            title: titles.summarize(chunk).await,
            start_time: chunk_start(records, index, max_words),
            word_count: word_count(chunk),
        };
        on_chapter(&chapter, chunks.len());
        chapters.push(chapter);
    }

    chapters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Prompts, Settings};
    use crate::error::VibeError;
    use crate::tiered::SummarizationState;
    use std::sync::Arc;

    fn keyword_titles() -> TitleSummarizer {
        TitleSummarizer::new(
            Arc::new(SummarizationState::unavailable()),
            &Settings::default(),
            &Prompts::default(),
        )
    }

    #[tokio::test]
    async fn test_end_to_end_tutorial() {
        let text = "Welcome to this tutorial. ".repeat(40);
        let n = text.split_whitespace().count();
        assert_eq!(n, 160);

        let transcript = Transcript::synthetic(&text, 0.5);
        let chapters = assemble_chapters(&transcript, 100, &keyword_titles()).await.unwrap();

        assert_eq!(chapters.len(), n.div_ceil(100));
        assert_eq!(chapters[0].title, "🎬 Introduction & Welcome");
        assert_eq!(chapters[0].start_time, 0.0);
        assert_eq!(chapters[1].start_time, 50.0);
        assert_eq!(chapters[1].word_count, 60);
    }

    #[tokio::test]
    async fn test_cue_records_past_end_start_at_zero() {
        let records = vec![
            TranscriptRecord::new("first cue with several words", 1.0, 4.0),
            TranscriptRecord::new("second cue", 4.0, 2.0),
        ];
        let transcript = Transcript::new("one two three four five six", records);

        let chapters = assemble_chapters(&transcript, 2, &keyword_titles()).await.unwrap();
        assert_eq!(chapters.len(), 3);
        assert_eq!(chapters[0].start_time, 1.0);
        assert_eq!(chapters[1].start_time, 0.0);
        assert_eq!(chapters[2].start_time, 0.0);
    }

    #[tokio::test]
    async fn test_empty_and_invalid_input() {
        let empty = Transcript::synthetic("   ", 0.5);
        assert!(assemble_chapters(&empty, 100, &keyword_titles()).await.unwrap().is_empty());

        let transcript = Transcript::synthetic("some words here", 0.5);
        let err = assemble_chapters(&transcript, 0, &keyword_titles()).await.unwrap_err();
        assert!(matches!(err, VibeError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_progress_callback() {
        let chunks = vec!["alpha beta gamma delta".to_string(), "epsilon zeta eta theta".to_string()];
        let mut seen = Vec::new();

        let chapters = title_chunks(&chunks, &[], 4, &keyword_titles(), |chapter, total| {
            seen.push((chapter.index, total));
        })
        .await;

        assert_eq!(chapters.len(), 2);
        assert_eq!(seen, vec![(0, 2), (1, 2)]);
    }

    #[test]
    fn test_stats() {
        let transcript = Transcript::synthetic(&"word ".repeat(250), 1.0);
        let chapters: Vec<Chapter> = [100, 100, 50]
            .iter()
            .enumerate()
            .map(|(index, &word_count)| Chapter {
                index,
                title: format!("Chapter {}", index),
                start_time: index as f64 * 100.0,
                word_count,
            })
            .collect();

        let stats = ChapterStats::compute(&transcript, &chapters);
        assert_eq!(stats.chapter_count, 3);
        assert_eq!(stats.total_words, 250);
        assert_eq!(stats.length_minutes, 4);
        assert_eq!(stats.average_words, 83);
        assert_eq!(stats.chapter_words, vec![100, 100, 50]);

        assert_eq!(ChapterStats::compute(&transcript, &[]).average_words, 0);
    }
}
