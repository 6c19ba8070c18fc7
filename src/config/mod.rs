//! Configuration module for VibeChapters.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{EmotionPrompts, Prompts, TitlePrompts};
pub use settings::{
    ChunkingSettings, EmotionSettings, GeneralSettings, GenerationSettings, PromptSettings,
    ProviderKind, Settings, TitleSettings, TranscriptSettings,
};
