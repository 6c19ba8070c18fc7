//! Pipeline orchestrator for VibeChapters.
//!
//! Coordinates chunking, titling, chapter assembly and the optional emotion
//! pass over one transcript.

use crate::chapters::{title_chunks, Chapter, ChapterRun};
use crate::chunking::split_text;
use crate::config::{Prompts, Settings};
use crate::emotion::{find_highlights, timeline, EmotionDetector};
use crate::error::Result;
use crate::tiered::{SummarizationState, Tier};
use crate::titling::{SummarizationStatus, TitleSummarizer};
use crate::transcript::Transcript;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Per-run options.
#[derive(Debug, Clone, Default)]
pub struct ChapterOptions {
    /// Words per chapter; `None` uses the configured default.
    pub max_words: Option<usize>,
    /// Also score emotions and pick highlights.
    pub emotions: bool,
    /// Video the transcript belongs to, for jump links.
    pub video_id: Option<String>,
}

/// The main orchestrator for the chapter pipeline.
pub struct Chapterizer {
    settings: Settings,
    state: Arc<SummarizationState>,
    titles: TitleSummarizer,
    emotions: EmotionDetector,
}

impl Chapterizer {
    /// Create a chapterizer, configuring the provider from the environment.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let state = SummarizationState::init(&settings.generation);
        Ok(Self::with_state(settings, prompts, state))
    }

    /// Create a chapterizer over an existing provider state.
    pub fn with_state(settings: Settings, prompts: Prompts, state: Arc<SummarizationState>) -> Self {
        let titles = TitleSummarizer::new(state.clone(), &settings, &prompts);
        let emotions = EmotionDetector::new(state.clone(), &settings, &prompts);

        Self {
            settings,
            state,
            titles,
            emotions,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &Arc<SummarizationState> {
        &self.state
    }

    /// Current title mode.
    pub fn status(&self) -> SummarizationStatus {
        self.titles.status()
    }

    pub async fn process(&self, transcript: &Transcript, options: &ChapterOptions) -> Result<ChapterRun> {
        self.process_with_progress(transcript, options, |_, _| {}).await
    }

    /// Chapterize a transcript, calling `on_chapter` after each chapter is titled.
    #[instrument(skip_all, fields(words = transcript.word_count()))]
    pub async fn process_with_progress<F>(
        &self,
        transcript: &Transcript,
        options: &ChapterOptions,
        on_chapter: F,
    ) -> Result<ChapterRun>
    where
        F: FnMut(&Chapter, usize),
    {
        let max_words = options.max_words.unwrap_or(self.settings.chunking.max_words);
        if !self.settings.chunking.is_recommended(max_words) {
            warn!(
                "{} words per chapter is outside the recommended {}-{}",
                max_words, self.settings.chunking.min_words, self.settings.chunking.max_words_limit
            );
        }

        let chunks = split_text(&transcript.text, max_words)?;
        info!(
            "Generating {} chapters ({})",
            chunks.len(),
            self.titles.status().description
        );

        let chapters = title_chunks(&chunks, &transcript.records, max_words, &self.titles, on_chapter).await;

        // Reported mode reflects any demotion that happened during the run
        let status = self.titles.status();
        if status.tier == Tier::Free && self.state.quota_exceeded() {
            info!("Provider quota exhausted during run; remaining titles used keywords");
        }

        let mut run = ChapterRun::new(transcript, max_words, &status, chapters);
        run.video_id = options.video_id.clone();

        if options.emotions {
            let emotions = self.emotions.detect(&chunks, &transcript.records, max_words).await;
            run.highlights = find_highlights(&emotions, self.settings.emotions.highlights);
            run.timeline = timeline(&emotions);
            run.emotions = emotions;
        }

        info!("Generated {} chapters", run.chapters.len());
        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use crate::tiered::testing::MockGenerator;

    fn keyword_chapterizer() -> Chapterizer {
        Chapterizer::with_state(
            Settings::default(),
            Prompts::default(),
            Arc::new(SummarizationState::unavailable()),
        )
    }

    #[tokio::test]
    async fn test_process_demo() {
        let chapterizer = keyword_chapterizer();
        let transcript = Transcript::demo();

        let run = chapterizer
            .process(&transcript, &ChapterOptions::default())
            .await
            .unwrap();

        let expected = transcript.word_count().div_ceil(100);
        assert_eq!(run.chapters.len(), expected);
        assert_eq!(run.stats.chapter_count, expected);
        assert_eq!(run.mode, "📝 Smart Keyword Titles");
        assert_eq!(run.max_words, 100);
        assert!(run.emotions.is_empty());
        assert!(run.chapters.iter().all(|c| !c.title.is_empty()));
    }

    #[tokio::test]
    async fn test_process_with_emotions_and_progress() {
        let chapterizer = keyword_chapterizer();
        let transcript = Transcript::synthetic(&"this is an amazing demo ".repeat(30), 0.5);

        let mut progress = 0;
        let options = ChapterOptions {
            max_words: Some(50),
            emotions: true,
            video_id: Some("dQw4w9WgXcQ".to_string()),
        };
        let run = chapterizer
            .process_with_progress(&transcript, &options, |_, _| progress += 1)
            .await
            .unwrap();

        assert_eq!(run.chapters.len(), 3);
        assert_eq!(progress, 3);
        assert_eq!(run.emotions.len(), 3);
        assert_eq!(run.highlights.len(), 3);
        assert_eq!(run.timeline.len(), 3);
        assert_eq!(run.timeline[2].timestamp, 50.0);
        assert_eq!(run.video_id.as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(run.chapters[1].start_time, 25.0);
    }

    #[tokio::test]
    async fn test_mode_reflects_quota_demotion() {
        let generator = Arc::new(MockGenerator::failing(
            GenerationError::provider("You exceeded your current quota"),
        ));
        let chapterizer = Chapterizer::with_state(
            Settings::default(),
            Prompts::default(),
            Arc::new(SummarizationState::with_client(generator.clone())),
        );
        assert_eq!(chapterizer.status().tier, Tier::Premium);

        let options = ChapterOptions {
            max_words: Some(10),
            emotions: true,
            ..ChapterOptions::default()
        };
        let transcript = Transcript::synthetic(&"word ".repeat(40), 0.5);
        let run = chapterizer.process(&transcript, &options).await.unwrap();

        assert_eq!(run.chapters.len(), 4);
        assert_eq!(run.mode, "📝 Smart Keyword Titles");
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_one_provider_call_per_chunk_with_emotions() {
        let generator = Arc::new(MockGenerator::ok("🚀 Premium Title"));
        let chapterizer = Chapterizer::with_state(
            Settings::default(),
            Prompts::default(),
            Arc::new(SummarizationState::with_client(generator.clone())),
        );

        let options = ChapterOptions {
            max_words: Some(10),
            emotions: true,
            ..ChapterOptions::default()
        };
        let transcript = Transcript::synthetic(&"word ".repeat(40), 0.5);
        let run = chapterizer.process(&transcript, &options).await.unwrap();

        assert_eq!(run.chapters.len(), 4);
        assert_eq!(run.emotions.len(), 4);
        assert_eq!(generator.calls(), 4);
    }

    #[tokio::test]
    async fn test_zero_words_rejected() {
        let options = ChapterOptions {
            max_words: Some(0),
            ..ChapterOptions::default()
        };
        let result = keyword_chapterizer()
            .process(&Transcript::demo(), &options)
            .await;
        assert!(result.is_err());
    }
}
