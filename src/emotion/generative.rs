use super::EmotionScores;
use crate::config::{GenerationSettings, Prompts};
use crate::error::GenerationError;
use crate::provider::{GenerationRequest, TextGenerator};
use crate::tiered::AdvancedClassifier;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Characters of each chunk sent for emotion scoring.
const EMOTION_INPUT_CHARS: usize = 512;

/// A JSON object with seven scores needs more room than a title.
const EMOTION_OUTPUT_TOKENS: u32 = 128;

/// Parse a provider response into clamped emotion scores.
///
/// Accepts prose or code fences around the object; only the outermost
/// `{...}` span is read. Missing keys score 0.
pub fn parse_scores(raw: &str) -> Result<EmotionScores, GenerationError> {
    let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) else {
        return Err(GenerationError::malformed("no JSON object in emotion response"));
    };
    if end < start {
        return Err(GenerationError::malformed("no JSON object in emotion response"));
    }

    let scores: EmotionScores = serde_json::from_str(&raw[start..=end])
        .map_err(|e| GenerationError::malformed(format!("invalid emotion scores: {}", e)))?;
    Ok(scores.clamped())
}

/// Emotion scorer backed by a [`TextGenerator`].
pub struct GenerativeEmotionAnalyzer {
    generator: Arc<dyn TextGenerator>,
    prompts: Prompts,
    temperature: f32,
}

impl GenerativeEmotionAnalyzer {
    pub fn new(generator: Arc<dyn TextGenerator>, prompts: &Prompts, settings: &GenerationSettings) -> Self {
        Self {
            generator,
            prompts: prompts.clone(),
            temperature: settings.temperature,
        }
    }

    fn build_prompt(&self, chunk: &str) -> String {
        let excerpt: String = chunk.chars().take(EMOTION_INPUT_CHARS).collect();
        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), excerpt);
        self.prompts.render_with_custom(&self.prompts.emotions.user, &vars)
    }
}

#[async_trait]
impl AdvancedClassifier<EmotionScores> for GenerativeEmotionAnalyzer {
    async fn classify(&self, input: &str) -> Result<EmotionScores, GenerationError> {
        let request = GenerationRequest::new(self.build_prompt(input), EMOTION_OUTPUT_TOKENS, self.temperature);
        let raw = self.generator.generate(&request).await?;
        parse_scores(&raw)
    }
}
