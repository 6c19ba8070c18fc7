//! Process-wide provider availability and the quota latch.

use super::Tier;
use crate::config::GenerationSettings;
use crate::error::Result;
use crate::provider::{create_generator, read_credential, TextGenerator};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Availability of the generative provider for this process.
///
/// Built once at startup and shared by every tiered pipeline. The provider is
/// either available from construction or never; `quota_exceeded` only ever
/// moves from `false` to `true`.
pub struct SummarizationState {
    provider_available: bool,
    quota_exceeded: AtomicBool,
    client: Option<Arc<dyn TextGenerator>>,
}

impl SummarizationState {
    /// Configure the provider from the environment.
    ///
    /// Reads the credential once. A missing, blank or placeholder credential,
    /// or a client that fails to build, leaves the process on the free tier.
    pub fn init(settings: &GenerationSettings) -> Arc<Self> {
        let env_var = settings.api_key_env();

        let Some(api_key) = read_credential(&env_var) else {
            info!("{} not found or invalid, using keyword titles", env_var);
            return Arc::new(Self::unavailable());
        };

        Arc::new(Self::from_setup(settings, create_generator(settings, &api_key)))
    }

    /// State from the outcome of building the provider client.
    fn from_setup(settings: &GenerationSettings, setup: Result<Arc<dyn TextGenerator>>) -> Self {
        match setup {
            Ok(client) => {
                info!("{} configured and ready ({})", client.label(), settings.model());
                Self::with_client(client)
            }
            Err(e) => {
                warn!("{} setup failed: {}", settings.provider.label(), e);
                Self::unavailable()
            }
        }
    }

    /// State with a ready provider client.
    pub fn with_client(client: Arc<dyn TextGenerator>) -> Self {
        Self {
            provider_available: true,
            quota_exceeded: AtomicBool::new(false),
            client: Some(client),
        }
    }

    /// State with no provider; permanently free tier.
    pub fn unavailable() -> Self {
        Self {
            provider_available: false,
            quota_exceeded: AtomicBool::new(false),
            client: None,
        }
    }

    pub fn provider_available(&self) -> bool {
        self.provider_available
    }

    pub fn quota_exceeded(&self) -> bool {
        self.quota_exceeded.load(Ordering::SeqCst)
    }

    /// Currently active tier.
    pub fn tier(&self) -> Tier {
        if self.provider_available && self.client.is_some() && !self.quota_exceeded() {
            Tier::Premium
        } else {
            Tier::Free
        }
    }

    /// Provider client, only while the premium tier is active.
    pub fn client(&self) -> Option<Arc<dyn TextGenerator>> {
        match self.tier() {
            Tier::Premium => self.client.clone(),
            Tier::Free => None,
        }
    }

    /// Name of the configured provider, if any.
    pub fn provider_label(&self) -> Option<&str> {
        self.client.as_ref().map(|c| c.label())
    }

    /// Set the quota latch. Returns `true` only for the call that flipped it.
    pub fn latch_quota_exceeded(&self) -> bool {
        !self.quota_exceeded.swap(true, Ordering::SeqCst)
    }
}

impl std::fmt::Debug for SummarizationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummarizationState")
            .field("provider_available", &self.provider_available)
            .field("quota_exceeded", &self.quota_exceeded())
            .field("provider", &self.provider_label())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiered::testing::MockGenerator;

    #[test]
    fn test_unavailable_is_free() {
        let state = SummarizationState::unavailable();
        assert_eq!(state.tier(), Tier::Free);
        assert!(state.client().is_none());
        assert!(!state.provider_available());
    }

    #[test]
    fn test_with_client_is_premium() {
        let state = SummarizationState::with_client(Arc::new(MockGenerator::ok("Title")));
        assert_eq!(state.tier(), Tier::Premium);
        assert!(state.client().is_some());
        assert_eq!(state.provider_label(), Some("Mock"));
    }

    #[test]
    fn test_latch_is_one_way() {
        let state = SummarizationState::with_client(Arc::new(MockGenerator::ok("Title")));

        assert!(state.latch_quota_exceeded());
        assert!(!state.latch_quota_exceeded());
        assert!(state.quota_exceeded());
        assert_eq!(state.tier(), Tier::Free);
        assert!(state.client().is_none());
        assert!(state.provider_available());
    }

    #[test]
    fn test_init_without_credential() {
        let settings = GenerationSettings {
            api_key_env: Some("VIBECHAPTERS_TEST_KEY_THAT_IS_NEVER_SET".to_string()),
            ..GenerationSettings::default()
        };
        let state = SummarizationState::init(&settings);
        assert_eq!(state.tier(), Tier::Free);
    }

    #[test]
    fn test_init_rejects_placeholder_and_blank_credentials() {
        let env_var = "VIBECHAPTERS_TEST_PLACEHOLDER_KEY";
        let settings = GenerationSettings {
            api_key_env: Some(env_var.to_string()),
            ..GenerationSettings::default()
        };

        for value in ["your_key", "your_gemini_api_key", "   ", ""] {
            std::env::set_var(env_var, value);
            let state = SummarizationState::init(&settings);
            assert_eq!(state.tier(), Tier::Free, "credential {:?}", value);
            assert!(!state.provider_available());
            assert!(state.provider_label().is_none());
        }

        std::env::remove_var(env_var);
    }

    #[test]
    fn test_failed_client_setup_is_free() {
        let settings = GenerationSettings::default();
        let state = SummarizationState::from_setup(
            &settings,
            Err(crate::error::VibeError::Config("TLS backend unavailable".to_string())),
        );
        assert_eq!(state.tier(), Tier::Free);
        assert!(!state.provider_available());
    }

    #[test]
    fn test_init_with_credential_is_premium() {
        let env_var = "VIBECHAPTERS_TEST_REAL_LOOKING_KEY";
        std::env::set_var(env_var, "  AIzaSyD-test-key  ");
        let settings = GenerationSettings {
            api_key_env: Some(env_var.to_string()),
            ..GenerationSettings::default()
        };

        let state = SummarizationState::init(&settings);
        std::env::remove_var(env_var);

        assert_eq!(state.tier(), Tier::Premium);
        assert_eq!(state.provider_label(), Some("Gemini"));
    }
}
