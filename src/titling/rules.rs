//! Keyword and pattern based chapter titles.
//!
//! Deterministic and offline. Checks, in order, the first one that applies wins:
//! 1. segments under ten visible characters get a placeholder;
//! 2. marker phrases from a fixed list of categories (introduction, conclusion,
//!    tutorial, problem, excitement, example, Q&A, analysis, future);
//! 3. the most frequent meaningful words;
//! 4. the segment's sentiment.

use crate::sentiment::{LexiconSentiment, PolarityScorer};
use crate::tiered::FallbackClassifier;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Segments with fewer visible characters than this get the placeholder title.
const MIN_VISIBLE_CHARS: usize = 10;

/// Number of keywords kept for templates.
const TOP_KEYWORDS: usize = 3;

/// Polarity beyond which a segment counts as positive or critical.
const POLARITY_THRESHOLD: f64 = 0.3;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did",
    "will", "would", "could", "should", "may", "might", "must", "can", "this", "that", "these",
    "those", "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my",
    "your", "his", "its", "our", "their", "just", "now", "then", "here", "there", "when",
    "where", "why", "how", "what", "who", "which",
];

/// Title produced when a category matches.
#[derive(Debug, Clone, Copy)]
enum Template {
    Fixed(&'static str),
    /// `{prefix}{Topic}{suffix}`, with `default` standing in when there is no keyword.
    Topic {
        prefix: &'static str,
        suffix: &'static str,
        default: &'static str,
    },
}

#[derive(Debug)]
struct Category {
    glyph: &'static str,
    markers: &'static [&'static str],
    template: Template,
}

/// Checked in this order.
const CATEGORIES: &[Category] = &[
    Category {
        glyph: "🎬",
        markers: &["welcome", "hello", "introduction", "start", "begin", "today we", "let me introduce"],
        template: Template::Fixed("Introduction & Welcome"),
    },
    Category {
        glyph: "🎯",
        markers: &[
            "conclusion", "summary", "wrap up", "in summary", "to conclude", "finally", "thank you",
            "that concludes",
        ],
        template: Template::Fixed("Conclusion & Summary"),
    },
    Category {
        glyph: "📚",
        markers: &["learn", "tutorial", "how to", "let me show", "demonstrate", "explain", "teach"],
        template: Template::Topic {
            prefix: "Learning ",
            suffix: "",
            default: "Concepts",
        },
    },
    Category {
        glyph: "⚠️",
        markers: &["problem", "issue", "challenge", "difficult", "error", "trouble", "fix", "solve"],
        template: Template::Fixed("Challenges & Solutions"),
    },
    Category {
        glyph: "🔥",
        markers: &["amazing", "incredible", "fantastic", "awesome", "brilliant", "outstanding", "wow", "great"],
        template: Template::Topic {
            prefix: "",
            suffix: " Spotlight",
            default: "Highlights",
        },
    },
    Category {
        glyph: "💡",
        markers: &["example", "demo", "demonstration", "for instance", "let me show", "practical"],
        template: Template::Fixed("Practical Examples"),
    },
    Category {
        glyph: "❓",
        markers: &["question", "answer", "ask", "discuss", "what about", "how about"],
        template: Template::Fixed("Q&A Discussion"),
    },
    Category {
        glyph: "📊",
        markers: &["analyze", "analysis", "review", "compare", "evaluation", "study", "research"],
        template: Template::Topic {
            prefix: "",
            suffix: " Analysis",
            default: "Content",
        },
    },
    Category {
        glyph: "🚀",
        markers: &["future", "next", "upcoming", "plan", "going forward", "what's next"],
        template: Template::Fixed("Future Directions"),
    },
];

const KEYWORD_GLYPH: &str = "📖";
const SHORT_SEGMENT: (&str, &str) = ("📝", "Short Segment");
const POSITIVE: (&str, &str) = ("😊", "Positive Insights");
const CRITICAL: (&str, &str) = ("🤔", "Critical Discussion");
const KEY_POINTS: (&str, &str) = ("📝", "Key Points");
const DISCUSSION: (&str, &str) = ("📝", "Discussion Segment");

/// Rule-based chapter titler.
#[derive(Clone)]
pub struct RuleBasedTitler {
    scorer: Arc<dyn PolarityScorer>,
    glyphs: bool,
}

impl RuleBasedTitler {
    pub fn new() -> Self {
        Self::with_scorer(Arc::new(LexiconSentiment::new()))
    }

    /// Use a different sentiment scorer for the final fallback.
    pub fn with_scorer(scorer: Arc<dyn PolarityScorer>) -> Self {
        Self { scorer, glyphs: true }
    }

    /// Toggle the decorative category glyph.
    pub fn with_glyphs(mut self, glyphs: bool) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Title for a chunk. Total: always returns a non-empty title.
    pub fn title_for(&self, chunk: &str) -> String {
        let visible = chunk.chars().filter(|c| !c.is_whitespace()).count();
        if visible < MIN_VISIBLE_CHARS {
            return self.decorate(SHORT_SEGMENT.0, SHORT_SEGMENT.1);
        }

        let keywords = top_keywords(chunk, TOP_KEYWORDS);
        let text_lower = chunk.to_lowercase();

        if let Some(category) = CATEGORIES
            .iter()
            .find(|c| c.markers.iter().any(|m| text_lower.contains(m)))
        {
            let text = match category.template {
                Template::Fixed(text) => text.to_string(),
                Template::Topic { prefix, suffix, default } => {
                    let topic = keywords
                        .first()
                        .map(|k| title_case(k))
                        .unwrap_or_else(|| default.to_string());
                    format!("{}{}{}", prefix, topic, suffix)
                }
            };
            return self.decorate(category.glyph, &text);
        }

        match keywords.as_slice() {
            [first, second, ..] => {
                return self.decorate(
                    KEYWORD_GLYPH,
                    &format!("{} & {}", title_case(first), title_case(second)),
                )
            }
            [only] => return self.decorate(KEYWORD_GLYPH, &format!("Focus on {}", title_case(only))),
            [] => {}
        }

        let (glyph, text) = match self.scorer.score(chunk) {
            Ok(s) if s.polarity > POLARITY_THRESHOLD => POSITIVE,
            Ok(s) if s.polarity < -POLARITY_THRESHOLD => CRITICAL,
            Ok(_) => KEY_POINTS,
            Err(e) => {
                debug!("Sentiment scoring failed: {}", e);
                DISCUSSION
            }
        };
        self.decorate(glyph, text)
    }

    fn decorate(&self, glyph: &str, text: &str) -> String {
        if self.glyphs {
            format!("{} {}", glyph, text)
        } else {
            text.to_string()
        }
    }
}

impl Default for RuleBasedTitler {
    fn default() -> Self {
        Self::new()
    }
}

impl FallbackClassifier<String> for RuleBasedTitler {
    fn classify(&self, input: &str) -> String {
        self.title_for(input)
    }
}

/// Most frequent meaningful words, ties broken by first occurrence.
///
/// Text is lowercased, punctuation becomes whitespace, and stop words and
/// words of two characters or fewer are dropped.
pub fn top_keywords(text: &str, limit: usize) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' || c.is_whitespace() { c } else { ' ' })
        .collect();

    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for word in cleaned.split_whitespace() {
        if word.chars().count() <= 2 || STOP_WORDS.contains(&word) {
            continue;
        }
        let count = counts.entry(word).or_insert(0);
        if *count == 0 {
            order.push(word);
        }
        *count += 1;
    }

    // Stable sort keeps first-occurrence order among equal counts
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.into_iter().take(limit).map(str::to_string).collect()
}

/// Uppercase the first letter of each alphabetic run, lowercase the rest.
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev_alpha = false;
    for c in word.chars() {
        if prev_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, VibeError};
    use crate::sentiment::Sentiment;

    struct FixedScorer(f64);

    impl PolarityScorer for FixedScorer {
        fn score(&self, _text: &str) -> Result<Sentiment> {
            Ok(Sentiment {
                polarity: self.0,
                subjectivity: 0.5,
            })
        }
    }

    struct BrokenScorer;

    impl PolarityScorer for BrokenScorer {
        fn score(&self, _text: &str) -> Result<Sentiment> {
            Err(VibeError::Sentiment("model unavailable".to_string()))
        }
    }

    fn title(text: &str) -> String {
        RuleBasedTitler::new().title_for(text)
    }

    #[test]
    fn test_short_segments() {
        assert_eq!(title(""), "📝 Short Segment");
        assert_eq!(title("hi there"), "📝 Short Segment");
        assert_eq!(title("  a b c d e f g h i  "), "📝 Short Segment");
    }

    #[test]
    fn test_introduction_beats_conclusion() {
        assert_eq!(title("Welcome everyone, thank you for joining"), "🎬 Introduction & Welcome");
    }

    #[test]
    fn test_conclusion() {
        assert_eq!(title("In summary, the results were solid."), "🎯 Conclusion & Summary");
    }

    #[test]
    fn test_tutorial_uses_top_keyword() {
        assert_eq!(
            title("Here we learn rust macros; rust macros make rust code shorter"),
            "📚 Learning Rust"
        );
        assert_eq!(title("how to do it, how to do it"), "📚 Learning Concepts");
    }

    #[test]
    fn test_excitement_spotlight() {
        assert_eq!(
            title("The new compiler is awesome and the compiler is fast"),
            "🔥 Compiler Spotlight"
        );
    }

    #[test]
    fn test_keyword_titles() {
        assert_eq!(
            title("Gardening tomatoes requires sunlight; tomatoes need water and sunlight daily"),
            "📖 Tomatoes & Sunlight"
        );
        assert_eq!(title("photosynthesis"), "📖 Focus on Photosynthesis");
    }

    #[test]
    fn test_sentiment_fallbacks() {
        assert_eq!(title("ok ok ok ok ok"), "😊 Positive Insights");
        assert_eq!(title("it is what it is, and so on"), "📝 Key Points");

        let critical = RuleBasedTitler::with_scorer(Arc::new(FixedScorer(-0.8)));
        assert_eq!(critical.title_for("it is what it is, and so on"), "🤔 Critical Discussion");
    }

    #[test]
    fn test_scorer_failure_is_contained() {
        let titler = RuleBasedTitler::with_scorer(Arc::new(BrokenScorer));
        assert_eq!(titler.title_for("it is what it is, and so on"), "📝 Discussion Segment");
    }

    #[test]
    fn test_total_over_odd_input() {
        let inputs = [
            "",
            "x",
            "😀",
            "😀😀😀😀😀😀😀😀😀😀😀😀",
            "!!!!!!!!!!!!!!!!",
            "\n\n\t",
            "ñandú über straße çà 東京 🚀🚀",
            "a\u{0}b\u{0}c\u{0}d\u{0}e\u{0}f",
        ];
        for input in inputs {
            assert!(!title(input).trim().is_empty(), "{:?}", input);
        }
        assert_eq!(title("😀😀😀😀😀😀😀😀😀😀😀😀"), "📝 Key Points");
    }

    #[test]
    fn test_without_glyphs() {
        let titler = RuleBasedTitler::new().with_glyphs(false);
        assert_eq!(titler.title_for("Welcome to the show everyone"), "Introduction & Welcome");
        assert_eq!(titler.title_for("photosynthesis"), "Focus on Photosynthesis");
    }

    #[test]
    fn test_top_keywords_ordering() {
        assert_eq!(
            top_keywords("zebra apple zebra apple mango", 3),
            vec!["zebra", "apple", "mango"]
        );
        assert_eq!(top_keywords("The cat and the dog, it is me", 3), vec!["cat", "dog"]);
        assert!(top_keywords("it is so", 3).is_empty());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("rust"), "Rust");
        assert_eq!(title_case("3d"), "3D");
        assert_eq!(title_case("snake_case"), "Snake_Case");
        assert_eq!(title_case("ÉCOLE"), "École");
    }
}
