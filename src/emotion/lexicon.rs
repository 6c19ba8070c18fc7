use super::EmotionScores;
use crate::sentiment::{LexiconSentiment, PolarityScorer, Sentiment};
use crate::tiered::FallbackClassifier;
use std::sync::Arc;
use tracing::debug;

const EXCITEMENT_WORDS: &[&str] = &[
    "amazing", "incredible", "wow", "awesome", "fantastic", "brilliant", "outstanding",
    "remarkable", "extraordinary",
];

const SURPRISE_WORDS: &[&str] = &[
    "surprising", "unexpected", "shocking", "unbelievable", "astonishing", "sudden",
];

const JOY_WORDS: &[&str] = &["happy", "joy", "excited", "thrilled", "delighted", "pleased"];

/// Emotion estimate from sentiment polarity and keyword presence.
#[derive(Clone)]
pub struct LexiconEmotionAnalyzer {
    scorer: Arc<dyn PolarityScorer>,
}

impl LexiconEmotionAnalyzer {
    pub fn new() -> Self {
        Self::with_scorer(Arc::new(LexiconSentiment::new()))
    }

    pub fn with_scorer(scorer: Arc<dyn PolarityScorer>) -> Self {
        Self { scorer }
    }

    pub fn analyze(&self, text: &str) -> EmotionScores {
        let sentiment = self.scorer.score(text).unwrap_or_else(|e| {
            debug!("Sentiment scoring failed, treating as neutral: {}", e);
            Sentiment::default()
        });
        let Sentiment { polarity, subjectivity } = sentiment;

        let text_lower = text.to_lowercase();
        let present = |words: &[&str]| words.iter().filter(|w| text_lower.contains(*w)).count() as f64;

        EmotionScores {
            joy: ((polarity + 1.0) / 2.0 + 0.1 * present(JOY_WORDS)).min(1.0),
            excitement: (0.2 * present(EXCITEMENT_WORDS) + 0.5 * polarity.max(0.0)).min(1.0),
            surprise: (0.3 * present(SURPRISE_WORDS) + 0.2 * subjectivity).min(1.0),
            neutral: (1.0 - polarity.abs()).max(0.0),
            ..EmotionScores::default()
        }
    }
}

impl Default for LexiconEmotionAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl FallbackClassifier<EmotionScores> for LexiconEmotionAnalyzer {
    fn classify(&self, input: &str) -> EmotionScores {
        self.analyze(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, VibeError};

    struct FixedScorer(Sentiment);

    impl PolarityScorer for FixedScorer {
        fn score(&self, _text: &str) -> Result<Sentiment> {
            Ok(self.0)
        }
    }

    struct BrokenScorer;

    impl PolarityScorer for BrokenScorer {
        fn score(&self, _text: &str) -> Result<Sentiment> {
            Err(VibeError::Sentiment("boom".to_string()))
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_keyword_and_polarity_formulas() {
        let analyzer = LexiconEmotionAnalyzer::with_scorer(Arc::new(FixedScorer(Sentiment {
            polarity: 0.5,
            subjectivity: 0.5,
        })));

        let scores = analyzer.analyze("Wow, that was amazing and surprising, I'm thrilled");
        assert!(close(scores.joy, 0.85));
        assert!(close(scores.excitement, 0.65));
        assert!(close(scores.surprise, 0.4));
        assert!(close(scores.neutral, 0.5));
        assert_eq!(scores.anger, 0.0);
        assert_eq!(scores.fear, 0.0);
    }

    #[test]
    fn test_scores_are_capped() {
        let analyzer = LexiconEmotionAnalyzer::with_scorer(Arc::new(FixedScorer(Sentiment {
            polarity: 1.0,
            subjectivity: 1.0,
        })));

        let scores = analyzer.analyze(
            "amazing incredible wow awesome fantastic happy joy surprising unexpected shocking",
        );
        assert_eq!(scores.joy, 1.0);
        assert_eq!(scores.excitement, 1.0);
        assert_eq!(scores.surprise, 1.0);
        assert_eq!(scores.neutral, 0.0);
    }

    #[test]
    fn test_scorer_failure_is_neutral() {
        let analyzer = LexiconEmotionAnalyzer::with_scorer(Arc::new(BrokenScorer));
        let scores = analyzer.analyze("nothing special here");
        assert!(close(scores.joy, 0.5));
        assert_eq!(scores.excitement, 0.0);
        assert_eq!(scores.neutral, 1.0);
    }

    #[test]
    fn test_default_lexicon() {
        let scores = LexiconEmotionAnalyzer::new().analyze("This is an amazing and wonderful result");
        assert!(scores.joy > 0.5);
        assert!(scores.excitement > 0.2);
    }
}
