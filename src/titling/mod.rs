//! Chapter title generation.
//!
//! [`TitleSummarizer`] asks the generative provider for a title while the
//! premium tier is active and falls back to [`RuleBasedTitler`] otherwise.

mod generative;
mod rules;

pub use generative::{sanitize_title, GenerativeTitler, MAX_TITLE_CHARS};
pub use rules::{top_keywords, RuleBasedTitler};

use crate::config::{Prompts, Settings};
use crate::tiered::{AdvancedClassifier, SummarizationState, Tier, TieredClassifier};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Human-readable description of the active title mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummarizationStatus {
    pub tier: Tier,
    pub description: String,
}

impl SummarizationStatus {
    pub fn for_state(state: &SummarizationState) -> Self {
        match (state.tier(), state.provider_label()) {
            (Tier::Premium, Some(label)) => Self {
                tier: Tier::Premium,
                description: format!("🤖 AI-Powered Titles ({})", label),
            },
            _ => Self::keyword(),
        }
    }

    fn keyword() -> Self {
        Self {
            tier: Tier::Free,
            description: "📝 Smart Keyword Titles".to_string(),
        }
    }
}

impl std::fmt::Display for SummarizationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description)
    }
}

/// Produces one title per chunk, tiered over the shared state.
pub struct TitleSummarizer {
    tiered: TieredClassifier<String>,
}

impl TitleSummarizer {
    /// Build from settings; the generative strategy is wired only when the
    /// state holds a ready client.
    pub fn new(state: Arc<SummarizationState>, settings: &Settings, prompts: &Prompts) -> Self {
        let advanced = state.client().map(|client| {
            Arc::new(GenerativeTitler::new(client, prompts, &settings.generation))
                as Arc<dyn AdvancedClassifier<String>>
        });
        let fallback = RuleBasedTitler::new().with_glyphs(settings.titles.glyphs);

        Self::with_strategies(
            state,
            advanced,
            fallback,
            Duration::from_secs(settings.generation.timeout_seconds),
        )
    }

    pub fn with_strategies(
        state: Arc<SummarizationState>,
        advanced: Option<Arc<dyn AdvancedClassifier<String>>>,
        fallback: RuleBasedTitler,
        timeout: Duration,
    ) -> Self {
        Self {
            tiered: TieredClassifier::new("title", state, advanced, Arc::new(fallback), timeout),
        }
    }

    /// Title for one chunk. Never fails and never returns an empty string.
    pub async fn summarize(&self, chunk: &str) -> String {
        self.tiered.classify(chunk).await
    }

    pub fn tier(&self) -> Tier {
        self.tiered.tier()
    }

    /// Describe the mode the next call will use.
    pub fn status(&self) -> SummarizationStatus {
        match self.tiered.tier() {
            Tier::Premium => SummarizationStatus::for_state(self.tiered.state()),
            Tier::Free => SummarizationStatus::keyword(),
        }
    }
}
