//! Tiered classification: try the generative provider, fall back to rules.
//!
//! A [`TieredClassifier`] pairs an advanced (remote, fallible) strategy with a
//! fallback (local, total) strategy over a shared [`SummarizationState`].
//!
//! Transitions:
//! - premium is active only if the provider was configured at startup and the
//!   quota latch is not set;
//! - a quota or rate-limit failure sets the latch, which demotes every
//!   pipeline sharing the state to the free tier for the rest of the process;
//! - any other failure, including a timeout, uses the fallback for that call
//!   only.

mod state;

pub use state::SummarizationState;

use crate::error::{GenerationError, GenerationErrorKind};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Active strategy tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Generative provider.
    Premium,
    /// Rule-based fallback.
    Free,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Premium => write!(f, "premium"),
            Tier::Free => write!(f, "free"),
        }
    }
}

/// How a provider failure affects the tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Fall back for this call only.
    Transient,
    /// Latch the free tier for the rest of the process.
    QuotaExceeded,
}

/// Provider error codes that signal quota or rate limiting.
const QUOTA_CODES: &[&str] = &[
    "resource_exhausted",
    "rate_limit_exceeded",
    "insufficient_quota",
    "rate_limit",
];

/// Substrings of an unstructured reason treated as quota signals.
const QUOTA_MARKERS: &[&str] = &["quota", "429", "limit"];

/// Classify a provider failure.
///
/// Structured signals decide when the provider supplied any (HTTP 429 or a
/// quota error code). Without them the reason text is searched for quota
/// markers; this is a compatibility shim and will also demote on unrelated
/// messages that mention a "limit". Timeouts are always transient.
pub fn classify_error(err: &GenerationError) -> ErrorClass {
    if err.kind == GenerationErrorKind::Timeout {
        return ErrorClass::Transient;
    }

    if err.status.is_some() || err.code.is_some() {
        let quota_status = err.status == Some(429);
        let quota_code = err.code.as_ref().is_some_and(|code| {
            let code = code.to_lowercase();
            QUOTA_CODES.iter().any(|c| code.contains(c))
        });
        return if quota_status || quota_code {
            ErrorClass::QuotaExceeded
        } else {
            ErrorClass::Transient
        };
    }

    let reason = err.reason.to_lowercase();
    if QUOTA_MARKERS.iter().any(|m| reason.contains(m)) {
        ErrorClass::QuotaExceeded
    } else {
        ErrorClass::Transient
    }
}

/// Remote, fallible strategy.
#[async_trait]
pub trait AdvancedClassifier<O: Send + 'static>: Send + Sync {
    async fn classify(&self, input: &str) -> Result<O, GenerationError>;
}

/// Local strategy that always produces an answer.
pub trait FallbackClassifier<O>: Send + Sync {
    fn classify(&self, input: &str) -> O;
}

/// Controller choosing between an advanced and a fallback strategy per call.
pub struct TieredClassifier<O: Send + 'static> {
    name: &'static str,
    state: Arc<SummarizationState>,
    advanced: Option<Arc<dyn AdvancedClassifier<O>>>,
    fallback: Arc<dyn FallbackClassifier<O>>,
    timeout: Duration,
}

impl<O: Send + 'static> TieredClassifier<O> {
    /// Create a controller. `name` labels log lines (e.g. "title").
    pub fn new(
        name: &'static str,
        state: Arc<SummarizationState>,
        advanced: Option<Arc<dyn AdvancedClassifier<O>>>,
        fallback: Arc<dyn FallbackClassifier<O>>,
        timeout: Duration,
    ) -> Self {
        Self {
            name,
            state,
            advanced,
            fallback,
            timeout,
        }
    }

    /// Tier the next call will use. Pure read.
    pub fn tier(&self) -> Tier {
        match self.advanced {
            Some(_) => self.state.tier(),
            None => Tier::Free,
        }
    }

    pub fn state(&self) -> &Arc<SummarizationState> {
        &self.state
    }

    /// Classify `input`; never fails.
    pub async fn classify(&self, input: &str) -> O {
        if let (Tier::Premium, Some(advanced)) = (self.tier(), &self.advanced) {
            match tokio::time::timeout(self.timeout, advanced.classify(input)).await {
                Ok(Ok(output)) => return output,
                Ok(Err(err)) => self.record_failure(&err),
                Err(_) => self.record_failure(&GenerationError::timeout(format!(
                    "no response within {}s",
                    self.timeout.as_secs_f32()
                ))),
            }
        }

        self.fallback.classify(input)
    }

    fn record_failure(&self, err: &GenerationError) {
        let provider = self.state.provider_label().unwrap_or("provider");

        match classify_error(err) {
            ErrorClass::QuotaExceeded => {
                if self.state.latch_quota_exceeded() {
                    warn!("{} quota exceeded, switching to free mode", provider);
                } else {
                    debug!("{} quota already exceeded ({} call)", provider, self.name);
                }
            }
            ErrorClass::Transient => {
                warn!(
                    "{} {} error: {}...",
                    provider,
                    self.name,
                    err.reason.chars().take(100).collect::<String>()
                );
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted provider for exercising tier transitions.

    use crate::error::GenerationError;
    use crate::provider::{GenerationRequest, TextGenerator};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    pub struct MockGenerator {
        response: Result<String, GenerationError>,
        delay: Option<Duration>,
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
    }

    impl MockGenerator {
        pub fn ok(text: &str) -> Self {
            Self::with_response(Ok(text.to_string()))
        }

        pub fn failing(err: GenerationError) -> Self {
            Self::with_response(Err(err))
        }

        fn with_response(response: Result<String, GenerationError>) -> Self {
            Self {
                response,
                delay: None,
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn delayed(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn last_prompt(&self) -> Option<String> {
            self.prompts.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl TextGenerator for MockGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(request.prompt.clone());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.response.clone()
        }

        fn label(&self) -> &str {
            "Mock"
        }
    }
}
