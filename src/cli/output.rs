//! CLI output formatting utilities.

use crate::chapters::{Chapter, ChapterStats};
use crate::emotion::{Highlight, TimelinePoint};
use crate::transcript::{format_timestamp, timestamp_url};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        eprintln!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        eprintln!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print one chapter, with a jump link when the video is known.
    pub fn chapter(chapter: &Chapter, video_id: Option<&str>, preview: Option<&str>) {
        println!(
            "  {} {}",
            style(format!("{:>8}", format_timestamp(chapter.start_time))).cyan(),
            style(&chapter.title).bold()
        );
        if let Some(id) = video_id {
            println!("           {}", style(timestamp_url(id, chapter.start_time)).dim());
        }
        if let Some(text) = preview {
            println!("           {}", style(content_preview(text, 160)).dim());
        }
    }

    /// Print chapter analytics.
    pub fn stats(stats: &ChapterStats) {
        Output::kv("Chapters", &stats.chapter_count.to_string());
        Output::kv("Length", &format!("{} min", stats.length_minutes));
        Output::kv("Words", &stats.total_words.to_string());
        Output::kv("Avg chapter", &format!("{} words", stats.average_words));
    }

    /// Print an emotional highlight.
    pub fn highlight(rank: usize, highlight: &Highlight) {
        println!(
            "  {} {} {} (excitement {:.2}, {} {:.2})",
            style(format!("#{}", rank)).magenta().bold(),
            style(format_timestamp(highlight.timestamp)).cyan(),
            content_preview(&highlight.preview, 80),
            highlight.excitement_score,
            highlight.dominant_emotion,
            highlight.emotion_strength
        );
    }

    /// Print one timeline row as a bar of overall excitement.
    pub fn timeline_point(point: &TimelinePoint) {
        let width = (point.overall_excitement.clamp(0.0, 1.0) * 20.0).round() as usize;
        println!(
            "  {} {:<20} {:.2}",
            style(format!("{:>8}", format_timestamp(point.timestamp))).cyan(),
            style("█".repeat(width)).magenta(),
            point.overall_excitement
        );
    }

    /// Create a progress bar.
    pub fn progress_bar(len: u64, msg: &str) -> ProgressBar {
        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message(msg.to_string());
        pb
    }
}

/// Truncate content with ellipsis.
fn content_preview(content: &str, max_chars: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_chars {
        content
    } else {
        format!("{}...", content.chars().take(max_chars).collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_preview() {
        assert_eq!(content_preview("short\ntext", 20), "short text");
        assert_eq!(content_preview("ååååå", 3), "ååå...");
    }
}
