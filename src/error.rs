//! Error types for VibeChapters.

use thiserror::Error;

/// Library-level error type for VibeChapters operations.
#[derive(Error, Debug)]
pub enum VibeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Transcript error: {0}")]
    Transcript(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Sentiment scoring failed: {0}")]
    Sentiment(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for VibeChapters operations.
pub type Result<T> = std::result::Result<T, VibeError>;

/// What went wrong while talking to the generative provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorKind {
    /// The request never produced a response (DNS, TLS, connection reset).
    Transport,
    /// The provider answered with an error status.
    Provider,
    /// The provider answered but the payload was unusable.
    MalformedResponse,
    /// The call exceeded the configured deadline.
    Timeout,
}

impl std::fmt::Display for GenerationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationErrorKind::Transport => write!(f, "transport error"),
            GenerationErrorKind::Provider => write!(f, "provider error"),
            GenerationErrorKind::MalformedResponse => write!(f, "malformed response"),
            GenerationErrorKind::Timeout => write!(f, "timeout"),
        }
    }
}

/// Failure of a single generative call.
///
/// `status` and `code` are filled from the provider's response when it carries
/// them; `reason` always holds the human-readable message.
#[derive(Error, Debug, Clone)]
#[error("Generation failed ({kind}): {reason}")]
pub struct GenerationError {
    pub kind: GenerationErrorKind,
    pub reason: String,
    pub status: Option<u16>,
    pub code: Option<String>,
}

impl GenerationError {
    pub fn new(kind: GenerationErrorKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
            status: None,
            code: None,
        }
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::Transport, reason)
    }

    pub fn provider(reason: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::Provider, reason)
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::MalformedResponse, reason)
    }

    pub fn timeout(reason: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::Timeout, reason)
    }

    /// Attach the HTTP status returned by the provider.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach the provider's error code (e.g. `RESOURCE_EXHAUSTED`).
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GenerationError::timeout(e.to_string())
        } else if e.is_decode() {
            GenerationError::malformed(e.to_string())
        } else {
            let err = GenerationError::transport(e.to_string());
            match e.status() {
                Some(status) => err.with_status(status.as_u16()),
                None => err,
            }
        }
    }
}
