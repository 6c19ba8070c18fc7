//! CLI module for VibeChapters.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Args, Parser, Subcommand};

/// VibeChapters - smart chapters for long transcripts
///
/// Splits a transcript into fixed-size chapters and titles each one, using a
/// generative provider when configured and keyword rules otherwise.
#[derive(Parser, Debug)]
#[command(name = "vibechapters")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate chapters for a transcript
    Chapters(ChaptersArgs),

    /// Show which title mode is active
    Status,

    /// Check configuration and credentials
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ChaptersArgs {
    /// Transcript file (.json records or plain text)
    pub input: Option<String>,

    /// Use the built-in demo transcript
    #[arg(long, conflicts_with = "input")]
    pub demo: bool,

    /// Words per chapter (recommended 50-200)
    #[arg(short = 'w', long)]
    pub max_words: Option<usize>,

    /// YouTube URL or ID the transcript belongs to, for jump links
    #[arg(long)]
    pub video: Option<String>,

    /// Output format (text, json, youtube, markdown, vtt)
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Also detect emotional highlights (keyword scoring unless
    /// emotions.generative is set in the config)
    #[arg(long)]
    pub emotions: bool,

    /// Show the start of each chapter's text
    #[arg(long)]
    pub preview: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
