//! Prompt templates for VibeChapters.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub titles: TitlePrompts,
    pub emotions: EmotionPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Prompt for chapter title generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TitlePrompts {
    pub user: String,
}

impl Default for TitlePrompts {
    fn default() -> Self {
        Self {
            user: r#"Generate a concise, engaging chapter title (maximum 6 words) for this video transcript segment.
Make it descriptive and interesting. Add a relevant emoji at the beginning if appropriate.

Rules:
- Maximum 6 words
- Be specific and descriptive
- Use action words when possible
- Add emoji if it enhances understanding
- Make it sound like a YouTube chapter

Transcript: {{transcript}}

Chapter title:"#
                .to_string(),
        }
    }
}

/// Prompt for emotion scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionPrompts {
    pub user: String,
}

impl Default for EmotionPrompts {
    fn default() -> Self {
        Self {
            user: r#"Rate the emotions expressed in this video transcript segment.

Respond with a single JSON object and nothing else. Use these keys, each a number between 0 and 1:
"joy", "excitement", "surprise", "anger", "sadness", "fear", "neutral"

Example:
{"joy": 0.6, "excitement": 0.4, "surprise": 0.1, "anger": 0.0, "sadness": 0.0, "fear": 0.0, "neutral": 0.3}

Transcript: {{transcript}}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let titles_path = custom_path.join("titles.toml");
            if titles_path.exists() {
                let content = std::fs::read_to_string(&titles_path)?;
                prompts.titles = toml::from_str(&content)?;
            }

            let emotions_path = custom_path.join("emotions.toml");
            if emotions_path.exists() {
                let content = std::fs::read_to_string(&emotions_path)?;
                prompts.emotions = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables and are
    /// substituted last, so placeholders inside their values are left alone.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let custom: std::collections::HashMap<String, String> = self
            .variables
            .iter()
            .filter(|(key, _)| !vars.contains_key(*key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        let with_custom = Self::render(template, &custom);
        Self::render(&with_custom, vars)
    }
}
