//! Chapter output formatting (text, JSON, YouTube description, Markdown, WebVTT).

use super::ChapterRun;
use crate::error::Result;
use crate::transcript::{format_timestamp, timestamp_url};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterFormat {
    Text,
    Json,
    Youtube,
    Markdown,
    Vtt,
}

impl std::str::FromStr for ChapterFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ChapterFormat::Text),
            "json" => Ok(ChapterFormat::Json),
            "youtube" | "yt" => Ok(ChapterFormat::Youtube),
            "markdown" | "md" => Ok(ChapterFormat::Markdown),
            "vtt" | "webvtt" => Ok(ChapterFormat::Vtt),
            _ => Err(format!(
                "Unknown format: {}. Use text, json, youtube, markdown, or vtt.",
                s
            )),
        }
    }
}

impl std::fmt::Display for ChapterFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ChapterFormat::Text => "text",
            ChapterFormat::Json => "json",
            ChapterFormat::Youtube => "youtube",
            ChapterFormat::Markdown => "markdown",
            ChapterFormat::Vtt => "vtt",
        };
        write!(f, "{}", name)
    }
}

/// JSON export wrapper.
#[derive(Debug, Serialize)]
struct ChapterExport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    run: &'a ChapterRun,
}

/// Render a run in the requested format.
pub fn format_chapters(run: &ChapterRun, format: ChapterFormat) -> Result<String> {
    match format {
        ChapterFormat::Text => Ok(format_text(run)),
        ChapterFormat::Json => format_json(run),
        ChapterFormat::Youtube => Ok(format_youtube(run)),
        ChapterFormat::Markdown => Ok(format_markdown(run)),
        ChapterFormat::Vtt => Ok(format_vtt(run)),
    }
}

fn format_text(run: &ChapterRun) -> String {
    let mut output = String::new();
    for chapter in &run.chapters {
        output.push_str(&format!(
            "{:>2}. [{}] {}\n",
            chapter.index + 1,
            format_timestamp(chapter.start_time),
            chapter.title
        ));
    }
    output
}

fn format_json(run: &ChapterRun) -> Result<String> {
    let export = ChapterExport {
        generated_at: Utc::now(),
        run,
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

/// YouTube description chapters. The first line must read 00:00.
fn format_youtube(run: &ChapterRun) -> String {
    let mut output = String::new();
    for (i, chapter) in run.chapters.iter().enumerate() {
        let start = if i == 0 { 0.0 } else { chapter.start_time };
        output.push_str(&format!("{} {}\n", format_timestamp(start), chapter.title));
    }
    output
}

fn format_markdown(run: &ChapterRun) -> String {
    let mut output = String::from("# Chapters\n\n");
    output.push_str(&format!("*{}* · {} words per chapter\n\n", run.mode, run.max_words));
    output.push_str("| # | Time | Title |\n|---|------|-------|\n");

    for chapter in &run.chapters {
        let time = format_timestamp(chapter.start_time);
        let time = match &run.video_id {
            Some(id) => format!("[{}]({})", time, timestamp_url(id, chapter.start_time)),
            None => time,
        };
        output.push_str(&format!(
            "| {} | {} | {} |\n",
            chapter.index + 1,
            time,
            chapter.title.replace('|', "\\|")
        ));
    }

    output.push_str(&format!(
        "\n{} chapters · {} words · {} min\n",
        run.stats.chapter_count, run.stats.total_words, run.stats.length_minutes
    ));
    output
}

/// WebVTT chapter track. Each cue runs until the next chapter starts.
fn format_vtt(run: &ChapterRun) -> String {
    let mut output = String::from("WEBVTT\n\n");

    for (i, chapter) in run.chapters.iter().enumerate() {
        let end = run
            .chapters
            .get(i + 1)
            .map(|next| next.start_time)
            .unwrap_or(run.duration_seconds)
            .max(chapter.start_time);

        output.push_str(&format!("Chapter {}\n", i + 1));
        output.push_str(&format!(
            "{} --> {}\n",
            format_vtt_timestamp(chapter.start_time),
            format_vtt_timestamp(end)
        ));
        output.push_str(&chapter.title);
        output.push_str("\n\n");
    }

    output
}

/// Format timestamp for VTT (00:00:00.000).
fn format_vtt_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0) as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let ms = total_ms % 1000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, ms)
}
