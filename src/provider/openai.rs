//! OpenAI chat-completion provider.

use super::{GenerationRequest, TextGenerator};
use crate::config::GenerationSettings;
use crate::error::{GenerationError, Result};
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use std::time::Duration;
use tracing::{debug, instrument};

/// OpenAI-backed text generator.
pub struct OpenAiGenerator {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiGenerator {
    /// Create a client with the configured timeout and an explicit API key.
    ///
    /// Rate-limited responses are not retried by the client; the first 429
    /// is returned to the caller.
    pub fn new(settings: &GenerationSettings, api_key: &str) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(base) = settings.api_base.as_deref().filter(|b| !b.trim().is_empty()) {
            config = config.with_api_base(base.trim_end_matches('/'));
        }

        let backoff = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        Ok(Self {
            client: Client::with_config(config)
                .with_http_client(http_client)
                .with_backoff(backoff),
            model: settings.model(),
        })
    }
}

/// Map an OpenAI client error, keeping the API error code when present.
fn map_openai_error(e: OpenAIError) -> GenerationError {
    match e {
        OpenAIError::ApiError(api) => {
            let err = GenerationError::provider(format!("OpenAI API error: {}", api.message));
            let code = api
                .code
                .as_ref()
                .map(|c| c.to_string())
                .or_else(|| api.r#type.as_ref().map(|t| t.to_string()));
            match code {
                Some(code) => err.with_code(code),
                None => err,
            }
        }
        OpenAIError::Reqwest(e) => GenerationError::from(e),
        OpenAIError::JSONDeserialize(e) => GenerationError::malformed(e.to_string()),
        other => GenerationError::transport(other.to_string()),
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn generate(&self, request: &GenerationRequest) -> std::result::Result<String, GenerationError> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.prompt.clone())
                .build()
                .map_err(map_openai_error)?
                .into(),
        ];

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(request.temperature)
            .max_tokens(request.max_output_tokens)
            .build()
            .map_err(map_openai_error)?;

        debug!("Sending request to OpenAI API");

        let response = self
            .client
            .chat()
            .create(chat_request)
            .await
            .map_err(map_openai_error)?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| GenerationError::malformed("Empty response from OpenAI"))?;

        Ok(content)
    }

    fn label(&self) -> &str {
        "OpenAI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Prompts, Settings};
    use crate::error::GenerationErrorKind;
    use crate::tiered::{classify_error, ErrorClass, SummarizationState, Tier};
    use crate::titling::TitleSummarizer;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    const RATE_LIMIT_BODY: &str = r#"{"error":{"message":"Rate limit reached for requests","type":"requests","param":null,"code":"rate_limit_exceeded"}}"#;

    /// Read one HTTP request, headers and body.
    async fn read_request(socket: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = match socket.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(n) => n,
            };
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    return;
                }
            }
        }
    }

    /// Local endpoint that answers every request with a 429.
    async fn rate_limited_server(hits: Arc<AtomicUsize>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                hits.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(async move {
                    read_request(&mut socket).await;
                    let response = format!(
                        "HTTP/1.1 429 Too Many Requests\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                        RATE_LIMIT_BODY.len(),
                        RATE_LIMIT_BODY
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        format!("http://{}/v1", addr)
    }

    fn rate_limited_settings(api_base: String) -> GenerationSettings {
        GenerationSettings {
            provider: crate::config::ProviderKind::OpenAi,
            api_base: Some(api_base),
            timeout_seconds: 3,
            ..GenerationSettings::default()
        }
    }

    #[tokio::test]
    async fn test_rate_limit_is_returned_without_retrying() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = rate_limited_server(hits.clone()).await;
        let generator = OpenAiGenerator::new(&rate_limited_settings(base), "sk-test").unwrap();

        let err = generator
            .generate(&GenerationRequest::new("Title this", 32, 0.7))
            .await
            .unwrap_err();

        assert_eq!(err.code.as_deref(), Some("rate_limit_exceeded"));
        assert_eq!(classify_error(&err), ErrorClass::QuotaExceeded);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rate_limit_latches_free_tier() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = rate_limited_server(hits.clone()).await;

        let mut settings = Settings::default();
        settings.generation = rate_limited_settings(base);
        let generator = OpenAiGenerator::new(&settings.generation, "sk-test").unwrap();
        let state = Arc::new(SummarizationState::with_client(Arc::new(generator)));
        let titles = TitleSummarizer::new(state.clone(), &settings, &Prompts::default());

        let started = Instant::now();
        for _ in 0..2 {
            let title = titles.summarize("In this tutorial we explain how ownership works").await;
            assert!(!title.is_empty());
        }

        assert!(started.elapsed() < Duration::from_secs(3));
        assert!(state.quota_exceeded());
        assert_eq!(state.tier(), Tier::Free);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_builder_errors_map_to_transport() {
        let err = map_openai_error(OpenAIError::InvalidArgument("missing model".to_string()));
        assert_eq!(err.kind, GenerationErrorKind::Transport);
        assert!(err.reason.contains("missing model"));
    }
}
