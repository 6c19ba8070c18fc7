//! Per-chunk emotion scores, highlights and timeline.
//!
//! Runs through the same tiered controller as titles, sharing its quota
//! latch: a quota error in either pipeline demotes both.

mod generative;
mod lexicon;

pub use generative::{parse_scores, GenerativeEmotionAnalyzer};
pub use lexicon::LexiconEmotionAnalyzer;

use crate::config::{Prompts, Settings};
use crate::tiered::{AdvancedClassifier, SummarizationState, Tier, TieredClassifier};
use crate::transcript::{chunk_start, TranscriptRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Characters of chunk text kept in previews.
const PREVIEW_CHARS: usize = 100;

/// Emotion scores, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionScores {
    pub joy: f64,
    pub excitement: f64,
    pub surprise: f64,
    pub anger: f64,
    pub sadness: f64,
    pub fear: f64,
    pub neutral: f64,
}

impl EmotionScores {
    /// Weighted blend of the positive, high-energy emotions.
    pub fn excitement_score(&self) -> f64 {
        0.4 * self.joy + 0.3 * self.surprise + 0.3 * self.excitement
    }

    /// Strongest emotion and its score. Ties go to the earlier field.
    pub fn dominant(&self) -> (&'static str, f64) {
        self.iter()
            .fold(("joy", f64::NEG_INFINITY), |best, (name, score)| {
                if score > best.1 {
                    (name, score)
                } else {
                    best
                }
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("joy", self.joy),
            ("excitement", self.excitement),
            ("surprise", self.surprise),
            ("anger", self.anger),
            ("sadness", self.sadness),
            ("fear", self.fear),
            ("neutral", self.neutral),
        ]
        .into_iter()
    }

    /// Copy with every score forced into `[0, 1]`.
    pub fn clamped(self) -> Self {
        let c = |v: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        Self {
            joy: c(self.joy),
            excitement: c(self.excitement),
            surprise: c(self.surprise),
            anger: c(self.anger),
            sadness: c(self.sadness),
            fear: c(self.fear),
            neutral: c(self.neutral),
        }
    }
}

/// Emotion analysis of one chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkEmotion {
    pub chunk_index: usize,
    pub timestamp: f64,
    pub emotions: EmotionScores,
    pub excitement_score: f64,
    pub preview: String,
}

/// One of the most exciting moments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Highlight {
    pub chunk_index: usize,
    pub timestamp: f64,
    pub excitement_score: f64,
    pub dominant_emotion: String,
    pub emotion_strength: f64,
    pub preview: String,
}

/// A point on the emotion timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub timestamp: f64,
    pub joy: f64,
    pub excitement: f64,
    pub surprise: f64,
    pub overall_excitement: f64,
}

/// Scores emotions for each chunk.
pub struct EmotionDetector {
    tiered: TieredClassifier<EmotionScores>,
}

impl EmotionDetector {
    pub fn new(state: Arc<SummarizationState>, settings: &Settings, prompts: &Prompts) -> Self {
        let advanced = state
            .client()
            .filter(|_| settings.emotions.generative)
            .map(|client| {
                Arc::new(GenerativeEmotionAnalyzer::new(client, prompts, &settings.generation))
                    as Arc<dyn AdvancedClassifier<EmotionScores>>
            });

        Self::with_strategies(
            state,
            advanced,
            LexiconEmotionAnalyzer::new(),
            Duration::from_secs(settings.generation.timeout_seconds),
        )
    }

    pub fn with_strategies(
        state: Arc<SummarizationState>,
        advanced: Option<Arc<dyn AdvancedClassifier<EmotionScores>>>,
        fallback: LexiconEmotionAnalyzer,
        timeout: Duration,
    ) -> Self {
        Self {
            tiered: TieredClassifier::new("emotion", state, advanced, Arc::new(fallback), timeout),
        }
    }

    pub fn tier(&self) -> Tier {
        self.tiered.tier()
    }

    /// Score every chunk. A chunk's timestamp is the start of record
    /// `index * max_words`, or 0 past the end of `records`.
    pub async fn detect(
        &self,
        chunks: &[String],
        records: &[TranscriptRecord],
        max_words: usize,
    ) -> Vec<ChunkEmotion> {
        let mut results = Vec::with_capacity(chunks.len());

        for (i, chunk) in chunks.iter().enumerate() {
            let emotions = self.tiered.classify(chunk).await;
            let timestamp = chunk_start(records, i, max_words);

            results.push(ChunkEmotion {
                chunk_index: i,
                timestamp,
                emotions,
                excitement_score: emotions.excitement_score(),
                preview: preview(chunk),
            });
        }

        results
    }
}

/// The `top_n` chunks by excitement score, highest first.
pub fn find_highlights(emotions: &[ChunkEmotion], top_n: usize) -> Vec<Highlight> {
    let mut sorted: Vec<&ChunkEmotion> = emotions.iter().collect();
    sorted.sort_by(|a, b| b.excitement_score.total_cmp(&a.excitement_score));

    sorted
        .into_iter()
        .take(top_n)
        .map(|chunk| {
            let (name, strength) = chunk.emotions.dominant();
            Highlight {
                chunk_index: chunk.chunk_index,
                timestamp: chunk.timestamp,
                excitement_score: chunk.excitement_score,
                dominant_emotion: name.to_string(),
                emotion_strength: strength,
                preview: chunk.preview.clone(),
            }
        })
        .collect()
}

pub fn timeline(emotions: &[ChunkEmotion]) -> Vec<TimelinePoint> {
    emotions
        .iter()
        .map(|chunk| TimelinePoint {
            timestamp: chunk.timestamp,
            joy: chunk.emotions.joy,
            excitement: chunk.emotions.excitement,
            surprise: chunk.emotions.surprise,
            overall_excitement: chunk.excitement_score,
        })
        .collect()
}

fn preview(chunk: &str) -> String {
    if chunk.chars().count() > PREVIEW_CHARS {
        format!("{}...", chunk.chars().take(PREVIEW_CHARS).collect::<String>())
    } else {
        chunk.to_string()
    }
}
