//! Chapter titles from a generative provider.

use crate::config::{GenerationSettings, Prompts};
use crate::error::GenerationError;
use crate::provider::{GenerationRequest, TextGenerator};
use crate::tiered::AdvancedClassifier;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Longest title kept as-is, in characters.
pub const MAX_TITLE_CHARS: usize = 50;

/// Characters kept before the ellipsis when a title is too long.
const TRUNCATED_TITLE_CHARS: usize = 47;

const DOUBLE_QUOTES: &[char] = &['"', '“', '”', '`'];
const SINGLE_QUOTES: &[char] = &['\'', '‘', '’'];

/// Drop quotation marks anywhere in the line.
///
/// Single quotes between two letters or digits are apostrophes and stay.
fn strip_quotes(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    chars
        .iter()
        .enumerate()
        .filter(|&(i, c)| {
            if DOUBLE_QUOTES.contains(c) {
                return false;
            }
            if SINGLE_QUOTES.contains(c) {
                let before = i > 0 && chars[i - 1].is_alphanumeric();
                let after = chars.get(i + 1).is_some_and(|n| n.is_alphanumeric());
                return before && after;
            }
            true
        })
        .map(|(_, c)| *c)
        .collect()
}

/// Normalize a raw model response into a single-line title.
///
/// Keeps the first non-empty line, removes quotation marks, and cuts
/// anything over [`MAX_TITLE_CHARS`] to 47 characters plus `...`. Returns
/// `None` when nothing is left.
pub fn sanitize_title(raw: &str) -> Option<String> {
    let line = raw.lines().map(str::trim).find(|l| !l.is_empty())?;
    let stripped = strip_quotes(line);
    let title = stripped.trim();
    if title.is_empty() {
        return None;
    }

    if title.chars().count() > MAX_TITLE_CHARS {
        let head: String = title.chars().take(TRUNCATED_TITLE_CHARS).collect();
        Some(format!("{}...", head))
    } else {
        Some(title.to_string())
    }
}

/// Titler backed by a [`TextGenerator`].
pub struct GenerativeTitler {
    generator: Arc<dyn TextGenerator>,
    prompts: Prompts,
    max_prompt_chars: usize,
    max_output_tokens: u32,
    temperature: f32,
}

impl GenerativeTitler {
    pub fn new(generator: Arc<dyn TextGenerator>, prompts: &Prompts, settings: &GenerationSettings) -> Self {
        Self {
            generator,
            prompts: prompts.clone(),
            max_prompt_chars: settings.max_prompt_chars,
            max_output_tokens: settings.max_output_tokens,
            temperature: settings.temperature,
        }
    }

    /// Title prompt for a chunk, truncated to the configured prompt size.
    pub fn build_prompt(&self, chunk: &str) -> String {
        let excerpt: String = chunk.chars().take(self.max_prompt_chars).collect();

        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), excerpt);
        self.prompts.render_with_custom(&self.prompts.titles.user, &vars)
    }

    /// Ask the provider for a title.
    pub async fn generate_title(&self, chunk: &str) -> Result<String, GenerationError> {
        let request = GenerationRequest::new(
            self.build_prompt(chunk),
            self.max_output_tokens,
            self.temperature,
        );

        let raw = self.generator.generate(&request).await?;
        debug!("Raw title response: {:?}", raw);

        sanitize_title(&raw)
            .ok_or_else(|| GenerationError::malformed(format!("{} returned an empty title", self.generator.label())))
    }
}

#[async_trait]
impl AdvancedClassifier<String> for GenerativeTitler {
    async fn classify(&self, input: &str) -> Result<String, GenerationError> {
        self.generate_title(input).await
    }
}
