/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML configuration file
[POS]:    CLI initialization layer
[UPDATE]: When AppConfig schema changes
*/

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use std::path::PathBuf;

use quizmaster_app::{AnswerEncoding, AppConfig};

pub fn run_init(output: PathBuf) -> Result<()> {
    println!("{}", style("Welcome to quizmaster init").bold().cyan());
    println!(
        "{}",
        style("This will guide you through creating a client configuration.").dim()
    );

    let theme = ColorfulTheme::default();
    let mut config = AppConfig::default();

    if output.exists() {
        let overwrite = Confirm::with_theme(&theme)
            .with_prompt(format!("{} exists. Overwrite?", output.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            println!("{}", style("Aborted.").yellow());
            return Ok(());
        }
    }

    config.base_url = Input::with_theme(&theme)
        .with_prompt("Backend URL")
        .default(config.base_url.clone())
        .interact_text()?;

    println!("\n{}", style("--- Session ---").bold());
    let cookie: String = Input::with_theme(&theme)
        .with_prompt("Session cookie (leave empty to skip)")
        .allow_empty(true)
        .interact_text()?;
    config.session_cookie = non_empty(cookie);

    let csrf: String = Input::with_theme(&theme)
        .with_prompt("CSRF token (leave empty to skip)")
        .allow_empty(true)
        .interact_text()?;
    config.csrf_token = non_empty(csrf);

    println!("\n{}", style("--- Quiz ---").bold());
    let encodings = ["option index", "raw option text"];
    let selection = Select::with_theme(&theme)
        .with_prompt("Answer encoding sent on submit")
        .items(&encodings)
        .default(0)
        .interact()?;
    config.quiz.answer_encoding = match selection {
        0 => AnswerEncoding::OptionIndex,
        _ => AnswerEncoding::Raw,
    };

    println!("\n{}", style("--- Background jobs ---").bold());
    config.poll.interval_ms = Input::with_theme(&theme)
        .with_prompt("Status poll interval (ms)")
        .default(config.poll.interval_ms)
        .interact_text()?;

    let yaml = config.to_yaml().context("failed to serialize config to YAML")?;

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&output, yaml)
        .with_context(|| format!("failed to write config to {}", output.display()))?;

    println!("\n{}", style("SUCCESS!").bold().green());
    println!(
        "Configuration written to: {}",
        style(output.display()).cyan()
    );

    Ok(())
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
