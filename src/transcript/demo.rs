//! Built-in demo transcript for trying the pipeline without a video.

use super::Transcript;

/// Seconds per word used for the demo transcript's synthetic records.
pub const DEMO_SECONDS_PER_WORD: f64 = 0.5;

const DEMO_TEXT: &str = "\
Welcome everyone to this comprehensive tutorial on artificial intelligence and machine learning. \
Today we're going to dive deep into how neural networks work and why they're revolutionizing every industry. \
This is incredibly exciting because we're witnessing a transformation that will change everything we know about technology.

First, let's understand what makes artificial intelligence so powerful. The key is in the way these systems can learn patterns from data. \
It's absolutely mind-blowing how a computer can recognize images, understand speech, and even generate creative content.

Now, here's where things get really interesting. Machine learning algorithms can actually improve themselves over time. \
This means they become smarter and more accurate with every piece of data they process. Isn't that amazing?

Let me show you a practical example of how this works in real-world applications. \
This demonstration will help you understand the core concepts we've been discussing throughout this tutorial.

The applications are endless - from healthcare to transportation, from finance to entertainment. \
We're seeing breakthrough innovations that seemed impossible just a few years ago becoming reality today.

Now let's address some common questions that people have about artificial intelligence and machine learning. \
These are important challenges that the field is actively working to solve with innovative approaches.

But wait, there's more! The future holds even more surprising developments in store for us. \
Imagine AI systems that can understand human emotions, create art, and solve complex global challenges.

This is truly a remarkable time to be alive and witness these technological marvels unfold before our eyes. \
The potential is limitless, and the excitement in the research community is absolutely contagious.

Thank you for joining me on this journey through the world of artificial intelligence and machine learning. \
I hope this tutorial has given you valuable insights into this fascinating and rapidly evolving field.";

impl Transcript {
    /// Sample transcript with synthetic half-second word timings.
    pub fn demo() -> Self {
        Transcript::synthetic(DEMO_TEXT, DEMO_SECONDS_PER_WORD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_transcript() {
        let demo = Transcript::demo();
        assert!(demo.text.starts_with("Welcome everyone"));
        assert_eq!(demo.records.len(), demo.word_count());
        assert_eq!(demo.records[2].start, 1.0);
    }
}
