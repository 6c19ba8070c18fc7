//! Status command - show the active title mode.

use crate::cli::Output;
use crate::config::Settings;
use crate::tiered::{SummarizationState, Tier};
use crate::titling::SummarizationStatus;
use anyhow::Result;
use console::style;

/// Run the status command.
pub fn run_status(settings: &Settings) -> Result<()> {
    let generation = &settings.generation;
    let state = SummarizationState::init(generation);
    let status = SummarizationStatus::for_state(&state);

    Output::header("VibeChapters Status");
    println!();

    let mode = match status.tier {
        Tier::Premium => style(status.description.as_str()).green().bold(),
        Tier::Free => style(status.description.as_str()).yellow().bold(),
    };
    println!("  {}", mode);
    println!();

    Output::kv("Tier", &status.tier.to_string());
    Output::kv("Provider", generation.provider.label());
    Output::kv("Model", &generation.model());
    Output::kv("Credential", &generation.api_key_env());
    Output::kv("Timeout", &format!("{}s", generation.timeout_seconds));
    Output::kv("Words per chapter", &settings.chunking.max_words.to_string());

    if status.tier == Tier::Free {
        println!();
        Output::info(&format!(
            "Set {} to enable AI-powered titles",
            generation.api_key_env()
        ));
    }

    Ok(())
}
