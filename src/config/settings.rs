//! Configuration settings for VibeChapters.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub chunking: ChunkingSettings,
    pub generation: GenerationSettings,
    pub titles: TitleSettings,
    pub transcript: TranscriptSettings,
    pub emotions: EmotionSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level when no -v flag is given (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Chunk sizing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Words per chapter when the caller does not pass one.
    pub max_words: usize,
    /// Lower end of the recommended range.
    pub min_words: usize,
    /// Upper end of the recommended range.
    pub max_words_limit: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            max_words: 100,
            min_words: 50,
            max_words_limit: 200,
        }
    }
}

impl ChunkingSettings {
    /// Whether a chunk size sits inside the recommended range.
    pub fn is_recommended(&self, max_words: usize) -> bool {
        (self.min_words..=self.max_words_limit).contains(&max_words)
    }
}

/// Generative provider type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Gemini (default).
    #[default]
    Gemini,
    /// OpenAI chat completions.
    OpenAi,
}

impl ProviderKind {
    /// Environment variable holding the credential for this provider.
    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
        }
    }

    /// Model used when none is configured.
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini-1.5-flash",
            ProviderKind::OpenAi => "gpt-4o-mini",
        }
    }

    /// Human-readable provider name.
    pub fn label(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "Gemini",
            ProviderKind::OpenAi => "OpenAI",
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAi),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Gemini => write!(f, "gemini"),
            ProviderKind::OpenAi => write!(f, "openai"),
        }
    }
}

/// Generative provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Provider (gemini, openai).
    pub provider: ProviderKind,
    /// Model name. Empty uses the provider default.
    pub model: String,
    /// Override for the credential environment variable.
    pub api_key_env: Option<String>,
    /// Base URL for OpenAI-compatible servers.
    pub api_base: Option<String>,
    /// Deadline for a single generation call.
    pub timeout_seconds: u64,
    /// Characters of the chunk sent to the provider.
    pub max_prompt_chars: usize,
    /// Sampling temperature.
    pub temperature: f32,
    /// Output token cap for title requests.
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Gemini,
            model: String::new(),
            api_key_env: None,
            api_base: None,
            timeout_seconds: 30,
            max_prompt_chars: 500,
            temperature: 0.7,
            max_output_tokens: 32,
        }
    }
}

impl GenerationSettings {
    /// Configured model, or the provider default.
    pub fn model(&self) -> String {
        if self.model.trim().is_empty() {
            self.provider.default_model().to_string()
        } else {
            self.model.clone()
        }
    }

    /// Name of the environment variable holding the credential.
    pub fn api_key_env(&self) -> String {
        self.api_key_env
            .clone()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.provider.default_api_key_env().to_string())
    }
}

/// Rule-based title settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleSettings {
    /// Prefix keyword titles with their category glyph.
    pub glyphs: bool,
}

impl Default for TitleSettings {
    fn default() -> Self {
        Self { glyphs: true }
    }
}

/// Transcript input settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// Seconds assigned to each word when records are synthesized from plain text.
    pub seconds_per_word: f64,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            seconds_per_word: 0.6,
        }
    }
}

/// Emotion analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionSettings {
    /// Run emotion analysis alongside chapter titles.
    pub enabled: bool,
    /// Number of highlights to report.
    pub highlights: usize,
    /// Score emotions with the generative provider too. Adds a second
    /// provider call per chunk.
    pub generative: bool,
}

impl Default for EmotionSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            highlights: 5,
            generative: false,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::VibeError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vibechapters")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}
