//! Doctor command - verify configuration and credentials.

use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::provider::is_valid_credential;
use console::style;
use std::path::PathBuf;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
/// Run the doctor command. `config_path` is the file the settings came from.
pub fn run_doctor(settings: &Settings, config_path: &PathBuf) -> anyhow::Result<()> {
    Output::header("VibeChapters Doctor");
    println!();
    println!("Checking configuration and credentials...\n");

    let mut checks = Vec::new();

    println!("{}", style("Provider").bold());
    let env_var = settings.generation.api_key_env();
    let credential = check_credential(&env_var, std::env::var(&env_var).ok().as_deref());
    credential.print();
    checks.push(credential);

    println!();

    println!("{}", style("Configuration").bold());
    let config_checks = vec![
        check_config_file(config_path),
        check_chunking(settings),
        check_timeout(settings.generation.timeout_seconds),
        check_prompts(settings),
    ];
    for check in &config_checks {
        check.print();
    }
    checks.extend(config_checks);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using VibeChapters.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! VibeChapters is ready to use.");
    }

    Ok(())
}

/// Check the provider credential. A missing key only means keyword titles.
fn check_credential(env_var: &str, value: Option<&str>) -> CheckResult {
    let hint = format!("Set with: export {}='...' (or add it to .env)", env_var);
    match value {
        Some(key) if is_valid_credential(key) => {
            CheckResult::ok(env_var, &format!("configured ({})", mask_key(key.trim())))
        }
        Some(key) if key.trim().is_empty() => {
            CheckResult::warning(env_var, "empty, using keyword titles", &hint)
        }
        Some(_) => CheckResult::warning(env_var, "placeholder value, using keyword titles", &hint),
        None => CheckResult::warning(env_var, "not set, using keyword titles", &hint),
    }
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "****".to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Check if config file exists and parses.
fn check_config_file(config_path: &PathBuf) -> CheckResult {
    if !config_path.exists() {
        return CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: vibechapters config edit",
        );
    }

    match Settings::load_from(Some(config_path)) {
        Ok(_) => CheckResult::ok("Config file", &format!("{}", config_path.display())),
        Err(e) => CheckResult::error(
            "Config file",
            &format!("{}", e),
            &format!("Fix or remove {}", config_path.display()),
        ),
    }
}

fn check_chunking(settings: &Settings) -> CheckResult {
    let chunking = &settings.chunking;
    if chunking.max_words == 0 {
        CheckResult::error("Chunk size", "max_words is 0", "Set chunking.max_words to 50-200")
    } else if chunking.is_recommended(chunking.max_words) {
        CheckResult::ok("Chunk size", &format!("{} words per chapter", chunking.max_words))
    } else {
        CheckResult::warning(
            "Chunk size",
            &format!("{} words per chapter", chunking.max_words),
            &format!(
                "Recommended range is {}-{}",
                chunking.min_words, chunking.max_words_limit
            ),
        )
    }
}

fn check_timeout(seconds: u64) -> CheckResult {
    if seconds == 0 {
        CheckResult::error(
            "Timeout",
            "generation.timeout_seconds is 0",
            "Every provider call would time out; use e.g. 30",
        )
    } else {
        CheckResult::ok("Timeout", &format!("{}s per provider call", seconds))
    }
}

fn check_prompts(settings: &Settings) -> CheckResult {
    let Some(dir) = settings.prompts.custom_dir.as_deref() else {
        return CheckResult::ok("Prompts", "built-in");
    };

    if !Settings::expand_path(dir).exists() {
        return CheckResult::warning(
            "Prompts",
            &format!("{} does not exist", dir),
            "Built-in prompts will be used",
        );
    }

    match Prompts::load(Some(dir), None) {
        Ok(_) => CheckResult::ok("Prompts", &format!("custom ({})", dir)),
        Err(e) => CheckResult::error("Prompts", &format!("{}", e), "Check titles.toml and emotions.toml"),
    }
}
