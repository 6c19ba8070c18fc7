//! Google Gemini provider.

use super::{GenerationRequest, TextGenerator};
use crate::config::GenerationSettings;
use crate::error::{GenerationError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini `generateContent` client.
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    code: Option<u16>,
    message: Option<String>,
    status: Option<String>,
}

impl GeminiGenerator {
    pub fn new(settings: &GenerationSettings, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: settings.model(),
        })
    }

    /// Turn a non-success response into a structured error.
    fn parse_error(status: u16, body: &str) -> GenerationError {
        match serde_json::from_str::<GeminiErrorBody>(body) {
            Ok(parsed) => {
                let message = parsed
                    .error
                    .message
                    .unwrap_or_else(|| "unknown Gemini error".to_string());
                let err = GenerationError::provider(format!("Gemini API error {}: {}", status, message))
                    .with_status(parsed.error.code.unwrap_or(status));
                match parsed.error.status {
                    Some(code) => err.with_code(code),
                    None => err,
                }
            }
            Err(_) => GenerationError::provider(format!("Gemini API error {}: {}", status, body))
                .with_status(status),
        }
    }

    /// Concatenated text of the first candidate.
    fn extract_text(response: GeminiResponse) -> std::result::Result<String, GenerationError> {
        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .ok_or_else(|| GenerationError::malformed("No candidates in Gemini response"))?;

        if text.trim().is_empty() {
            return Err(GenerationError::malformed("Empty text in Gemini response"));
        }
        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn generate(&self, request: &GenerationRequest) -> std::result::Result<String, GenerationError> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                max_output_tokens: request.max_output_tokens,
                temperature: request.temperature,
            },
        };

        let url = format!("{}/{}:generateContent", GEMINI_BASE_URL, self.model);

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(Self::parse_error(status, &text));
        }

        let parsed: GeminiResponse = response.json().await?;
        Self::extract_text(parsed)
    }

    fn label(&self) -> &str {
        "Gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationErrorKind;

    #[test]
    fn test_parse_quota_error() {
        let body = r#"{"error": {"code": 429, "message": "Resource has been exhausted (e.g. check quota).", "status": "RESOURCE_EXHAUSTED"}}"#;
        let err = GeminiGenerator::parse_error(429, body);

        assert_eq!(err.kind, GenerationErrorKind::Provider);
        assert_eq!(err.status, Some(429));
        assert_eq!(err.code.as_deref(), Some("RESOURCE_EXHAUSTED"));
        assert!(err.reason.contains("exhausted"));
    }

    #[test]
    fn test_parse_unstructured_error() {
        let err = GeminiGenerator::parse_error(503, "Service Unavailable");
        assert_eq!(err.status, Some(503));
        assert_eq!(err.code, None);
        assert!(err.reason.contains("Service Unavailable"));
    }

    #[test]
    fn test_extract_text() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "🚀 Neural "}, {"text": "Networks"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(GeminiGenerator::extract_text(response).unwrap(), "🚀 Neural Networks");
    }

    #[test]
    fn test_extract_text_without_candidates() {
        let response: GeminiResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        let err = GeminiGenerator::extract_text(response).unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::MalformedResponse);

        let response: GeminiResponse = serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert!(GeminiGenerator::extract_text(response).is_err());
    }
}
