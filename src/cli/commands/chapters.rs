//! Chapters command - chapterize a transcript and print or export the result.

use crate::chapters::{format_chapters, ChapterFormat, ChapterRun};
use crate::chunking::split_text;
use crate::cli::{ChaptersArgs, Output};
use crate::config::Settings;
use crate::orchestrator::{ChapterOptions, Chapterizer};
use crate::transcript::{extract_video_id, load_transcript, Transcript};
use anyhow::{anyhow, bail, Context, Result};
use console::style;

/// Run the chapters command.
pub async fn run_chapters(args: &ChaptersArgs, settings: Settings) -> Result<()> {
    let format: ChapterFormat = args.format.parse().map_err(|e: String| anyhow!(e))?;

    let transcript = if args.demo {
        Output::info("Using demo transcript");
        Transcript::demo()
    } else if let Some(input) = &args.input {
        let path = Settings::expand_path(input);
        if !path.exists() {
            if extract_video_id(input).is_some() {
                bail!(
                    "Transcripts are not downloaded. Save the captions to a .json or .txt file, \
                     then run: vibechapters chapters <FILE> --video {}",
                    input
                );
            }
            bail!("Transcript file not found: {}", path.display());
        }
        load_transcript(&path, settings.transcript.seconds_per_word)
            .with_context(|| format!("Failed to load transcript from {}", path.display()))?
    } else {
        bail!("Provide a transcript file or use --demo");
    };

    let video_id = match &args.video {
        Some(video) => Some(
            extract_video_id(video).ok_or_else(|| anyhow!("Could not parse video: {}", video))?,
        ),
        None => None,
    };

    let max_words = args.max_words.unwrap_or(settings.chunking.max_words);
    let emotions = args.emotions || settings.emotions.enabled;

    let chapterizer = Chapterizer::new(settings)?;
    Output::info(&chapterizer.status().description);

    let total = transcript.word_count().div_ceil(max_words.max(1)) as u64;
    let pb = Output::progress_bar(total, "Generating chapters...");

    let options = ChapterOptions {
        max_words: Some(max_words),
        emotions,
        video_id,
    };
    let run = chapterizer
        .process_with_progress(&transcript, &options, |chapter, _| {
            pb.set_message(chapter.title.clone());
            pb.inc(1);
        })
        .await;
    pb.finish_and_clear();
    let run = run?;

    Output::success(&format!(
        "Generated {} chapters using {}",
        run.chapters.len(),
        run.mode
    ));

    match (&args.output, format) {
        (None, ChapterFormat::Text) => {
            let previews = if args.preview {
                split_text(&transcript.text, max_words)?
            } else {
                Vec::new()
            };
            print_run(&run, &previews);
        }
        (None, _) => {
            print!("{}", format_chapters(&run, format)?);
        }
        (Some(path), _) => {
            let path = Settings::expand_path(path);
            std::fs::write(&path, format_chapters(&run, format)?)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            Output::success(&format!("Wrote {} chapters to {}", format, path.display()));
        }
    }

    Ok(())
}

fn print_run(run: &ChapterRun, previews: &[String]) {
    Output::header("Chapters");
    println!();
    for chapter in &run.chapters {
        Output::chapter(
            chapter,
            run.video_id.as_deref(),
            previews.get(chapter.index).map(String::as_str),
        );
    }

    Output::header("Analytics");
    Output::stats(&run.stats);

    if !run.highlights.is_empty() {
        Output::header("Highlights");
        for (i, highlight) in run.highlights.iter().enumerate() {
            Output::highlight(i + 1, highlight);
        }
    }

    if !run.timeline.is_empty() {
        Output::header("Excitement timeline");
        for point in &run.timeline {
            Output::timeline_point(point);
        }
    }

    println!();
    println!("  {}", style(&run.mode).dim());
}
