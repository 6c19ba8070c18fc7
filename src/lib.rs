//! VibeChapters - smart chapters for long transcripts
//!
//! Splits a transcript into word-count-bounded chapters and gives each one a
//! short title with a start timestamp.
//!
//! # Overview
//!
//! Titles come from a tiered pipeline:
//! - a generative provider (Gemini or OpenAI) while a credential is configured
//!   and no quota error has been seen;
//! - keyword and pattern rules otherwise, which never fail.
//!
//! A quota or rate-limit error switches the whole process to the rule-based
//! tier for good. Other errors fall back for that one chunk.
//!
//! # Architecture
//!
//! - `config` - Configuration and prompt templates
//! - `transcript` - Transcript loading and video references
//! - `chunking` - Fixed-size word chunking
//! - `sentiment` - Lexicon polarity scoring
//! - `provider` - Generative text providers
//! - `tiered` - Tier state, quota latch and error classification
//! - `titling` - Rule-based and generative chapter titles
//! - `emotion` - Emotion scores and highlights
//! - `chapters` - Chapter assembly, analytics and export
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use vibechapters::config::Settings;
//! use vibechapters::orchestrator::{ChapterOptions, Chapterizer};
//! use vibechapters::transcript::Transcript;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let chapterizer = Chapterizer::new(Settings::load()?)?;
//!     println!("{}", chapterizer.status());
//!
//!     let run = chapterizer
//!         .process(&Transcript::demo(), &ChapterOptions::default())
//!         .await?;
//!     for chapter in &run.chapters {
//!         println!("{:>6.0}s {}", chapter.start_time, chapter.title);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod chapters;
pub mod chunking;
pub mod cli;
pub mod config;
pub mod emotion;
pub mod error;
pub mod orchestrator;
pub mod provider;
pub mod sentiment;
pub mod tiered;
pub mod titling;
pub mod transcript;

pub use error::{Result, VibeError};
