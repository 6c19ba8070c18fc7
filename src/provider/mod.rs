//! Generative text providers.
//!
//! A provider turns a prompt into text. Failures come back as
//! [`GenerationError`] values carrying the provider's status and error code
//! when available, so callers can tell quota exhaustion from transient faults.

mod gemini;
mod openai;

pub use gemini::GeminiGenerator;
pub use openai::OpenAiGenerator;

use crate::config::{GenerationSettings, ProviderKind};
use crate::error::{GenerationError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// A single generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, max_output_tokens: u32, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            max_output_tokens,
            temperature,
        }
    }
}

/// Trait for remote text generation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for the request.
    async fn generate(&self, request: &GenerationRequest) -> std::result::Result<String, GenerationError>;

    /// Human-readable provider name (e.g. "Gemini").
    fn label(&self) -> &str;
}

/// Whether a credential value looks usable.
///
/// Blank values and unfilled template placeholders (`your_...`) are rejected.
pub fn is_valid_credential(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && !value.starts_with("your_")
}

/// Read the credential from `env_var`, returning it only when valid.
pub fn read_credential(env_var: &str) -> Option<String> {
    std::env::var(env_var)
        .ok()
        .filter(|v| is_valid_credential(v))
        .map(|v| v.trim().to_string())
}

/// Create the configured provider client.
pub fn create_generator(settings: &GenerationSettings, api_key: &str) -> Result<Arc<dyn TextGenerator>> {
    match settings.provider {
        ProviderKind::Gemini => Ok(Arc::new(GeminiGenerator::new(settings, api_key)?)),
        ProviderKind::OpenAi => Ok(Arc::new(OpenAiGenerator::new(settings, api_key)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_validity() {
        assert!(is_valid_credential("AIzaSyD-real-looking-key"));
        assert!(is_valid_credential("  sk-abc  "));
        assert!(!is_valid_credential(""));
        assert!(!is_valid_credential("   "));
        assert!(!is_valid_credential("your_key_here"));
        assert!(!is_valid_credential("your_gemini_api_key"));
    }

    #[test]
    fn test_read_missing_credential() {
        assert_eq!(read_credential("VIBECHAPTERS_TEST_CREDENTIAL_THAT_IS_NEVER_SET"), None);
    }

    #[test]
    fn test_create_generator_labels() {
        let mut settings = GenerationSettings::default();
        let gemini = create_generator(&settings, "key").unwrap();
        assert_eq!(gemini.label(), "Gemini");

        settings.provider = ProviderKind::OpenAi;
        let openai = create_generator(&settings, "key").unwrap();
        assert_eq!(openai.label(), "OpenAI");
    }
}
