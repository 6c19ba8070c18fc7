//! Lexicon-based sentiment estimation.
//!
//! Scores text with a small built-in word lexicon. Each matched word carries a
//! polarity in `[-1, 1]` and a subjectivity in `[0, 1]`; a preceding
//! intensifier scales the word and a nearby negator flips and dampens it.
//! The text's score is the mean over matched words, or neutral when nothing
//! matches.

use crate::error::{Result, VibeError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Polarity and subjectivity of a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// -1.0 (negative) to 1.0 (positive).
    pub polarity: f64,
    /// 0.0 (objective) to 1.0 (subjective).
    pub subjectivity: f64,
}

/// Anything that can score the sentiment of text.
pub trait PolarityScorer: Send + Sync {
    fn score(&self, text: &str) -> Result<Sentiment>;
}

/// (word, polarity, subjectivity)
const LEXICON: &[(&str, f64, f64)] = &[
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("excellent", 1.0, 1.0),
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("incredible", 0.9, 0.9),
    ("fantastic", 0.4, 0.9),
    ("brilliant", 0.9, 1.0),
    ("outstanding", 0.5, 0.6),
    ("remarkable", 0.75, 0.75),
    ("wonderful", 1.0, 1.0),
    ("beautiful", 0.85, 1.0),
    ("happy", 0.8, 1.0),
    ("glad", 0.5, 1.0),
    ("love", 0.5, 0.6),
    ("like", 0.2, 0.4),
    ("enjoy", 0.4, 0.5),
    ("nice", 0.6, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("helpful", 0.5, 0.5),
    ("useful", 0.3, 0.1),
    ("powerful", 0.3, 1.0),
    ("interesting", 0.5, 0.5),
    ("exciting", 0.3, 0.8),
    ("excited", 0.4, 0.75),
    ("fascinating", 0.6, 0.8),
    ("valuable", 0.3, 0.4),
    ("perfect", 1.0, 1.0),
    ("easy", 0.43, 0.83),
    ("clear", 0.1, 0.38),
    ("fun", 0.3, 0.2),
    ("success", 0.3, 0.6),
    ("successful", 0.75, 0.95),
    ("thank", 0.2, 0.2),
    ("thanks", 0.2, 0.2),
    ("pleased", 0.5, 1.0),
    ("delighted", 0.7, 0.7),
    ("thrilled", 0.6, 0.8),
    ("bad", -0.7, 0.67),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("worst", -1.0, 1.0),
    ("worse", -0.4, 0.6),
    ("poor", -0.4, 0.6),
    ("wrong", -0.5, 0.9),
    ("hate", -0.8, 0.9),
    ("sad", -0.5, 1.0),
    ("angry", -0.5, 1.0),
    ("annoying", -0.8, 0.9),
    ("boring", -1.0, 1.0),
    ("difficult", -0.5, 1.0),
    ("hard", -0.3, 0.54),
    ("problem", -0.2, 0.4),
    ("broken", -0.4, 0.4),
    ("fail", -0.5, 0.3),
    ("failed", -0.5, 0.3),
    ("failure", -0.3, 0.3),
    ("ugly", -0.7, 1.0),
    ("stupid", -0.8, 1.0),
    ("useless", -0.5, 0.0),
    ("disappointing", -0.6, 0.7),
    ("disappointed", -0.75, 0.75),
    ("frustrating", -0.4, 0.7),
    ("frustrated", -0.7, 0.7),
    ("confusing", -0.3, 0.7),
    ("dangerous", -0.6, 0.9),
    ("scary", -0.5, 1.0),
    ("afraid", -0.6, 0.9),
    ("ok", 0.5, 0.5),
    ("okay", 0.5, 0.5),
    ("fine", 0.4, 0.5),
];

/// (word, multiplier)
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.2),
    ("extremely", 1.5),
    ("incredibly", 1.4),
    ("absolutely", 1.4),
    ("truly", 1.2),
    ("so", 1.2),
    ("too", 1.2),
    ("super", 1.3),
    ("quite", 1.1),
    ("pretty", 1.1),
    ("slightly", 0.6),
    ("somewhat", 0.7),
];

const NEGATORS: &[&str] = &["not", "no", "never", "nothing", "nobody", "hardly", "without"];

/// Negated words are flipped and scaled by this factor.
const NEGATION_FACTOR: f64 = -0.5;

static WORDS: LazyLock<HashMap<&'static str, (f64, f64)>> =
    LazyLock::new(|| LEXICON.iter().map(|(w, p, s)| (*w, (*p, *s))).collect());

static BOOSTS: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| INTENSIFIERS.iter().copied().collect());

/// Sentiment scorer backed by the built-in word lexicon.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconSentiment;

impl LexiconSentiment {
    pub fn new() -> Self {
        Self
    }

    fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .map(|t| t.trim_matches('\''))
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn is_negator(token: &str) -> bool {
        NEGATORS.contains(&token) || token.ends_with("n't")
    }
}

impl PolarityScorer for LexiconSentiment {
    fn score(&self, text: &str) -> Result<Sentiment> {
        let tokens = Self::tokenize(text);
        let mut polarities = Vec::new();
        let mut subjectivities = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            let Some(&(mut polarity, mut subjectivity)) = WORDS.get(token.as_str()) else {
                continue;
            };

            let mut lookback = i;
            if let Some(boost) = i
                .checked_sub(1)
                .and_then(|prev| BOOSTS.get(tokens[prev].as_str()))
            {
                polarity *= boost;
                subjectivity *= boost;
                lookback -= 1;
            }

            // A negator directly before the word (or before its intensifier) flips it
            let negated = lookback
                .checked_sub(1)
                .is_some_and(|prev| Self::is_negator(&tokens[prev]));
            if negated {
                polarity *= NEGATION_FACTOR;
            }

            polarities.push(polarity.clamp(-1.0, 1.0));
            subjectivities.push(subjectivity.clamp(0.0, 1.0));
        }

        if polarities.is_empty() {
            return Ok(Sentiment::default());
        }

        let count = polarities.len() as f64;
        let sentiment = Sentiment {
            polarity: polarities.iter().sum::<f64>() / count,
            subjectivity: subjectivities.iter().sum::<f64>() / count,
        };

        if !sentiment.polarity.is_finite() || !sentiment.subjectivity.is_finite() {
            return Err(VibeError::Sentiment("non-finite sentiment score".to_string()));
        }

        Ok(sentiment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polarity(text: &str) -> f64 {
        LexiconSentiment::new().score(text).unwrap().polarity
    }

    #[test]
    fn test_neutral_without_matches() {
        let sentiment = LexiconSentiment::new().score("the cat sat on the mat").unwrap();
        assert_eq!(sentiment, Sentiment::default());
        assert_eq!(polarity(""), 0.0);
    }

    #[test]
    fn test_positive_and_negative() {
        assert!(polarity("This is a wonderful and excellent result") > 0.3);
        assert!(polarity("That was terrible, an awful experience") < -0.3);
    }

    #[test]
    fn test_negation_flips() {
        assert!(polarity("good") > 0.0);
        assert!(polarity("not good") < 0.0);
        assert!(polarity("it isn't very good") < 0.0);
    }

    #[test]
    fn test_intensifier_scales_and_clamps() {
        assert!(polarity("very nice") > polarity("nice"));
        assert_eq!(polarity("extremely awesome"), 1.0);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let sentiment = LexiconSentiment::new()
            .score("absolutely perfect but extremely terrible, so happy yet really sad")
            .unwrap();
        assert!((-1.0..=1.0).contains(&sentiment.polarity));
        assert!((0.0..=1.0).contains(&sentiment.subjectivity));
    }
}
