//! `laer config`: inspect and edit the settings file in effect.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::{Context, Result};
use std::path::Path;

/// Run the config command against the file selected by `--config` (or the default).
pub fn run_config(action: &ConfigAction, settings: Settings, config_path: &Path) -> Result<()> {
    match action {
        ConfigAction::Show => print!("{}", render_show(&settings, config_path)?),
        ConfigAction::Edit => edit(&settings, config_path)?,
        ConfigAction::Path => println!("{}", config_path.display()),
    }

    Ok(())
}

/// Settings as TOML, headed by the file they came from.
fn render_show(settings: &Settings, config_path: &Path) -> Result<String> {
    let source = if config_path.exists() {
        format!("# Loaded from {}", config_path.display())
    } else {
        format!("# Built-in defaults ({} does not exist)", config_path.display())
    };
    let body = toml::to_string_pretty(settings).context("Failed to serialize config")?;
    Ok(format!("{}\n{}", source, body))
}

/// Write `settings` to `config_path` unless a file is already there.
/// Returns whether a file was created.
fn ensure_config_file(settings: &Settings, config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }
    settings.save_to(config_path)?;
    Ok(true)
}

fn edit(settings: &Settings, config_path: &Path) -> Result<()> {
    if ensure_config_file(settings, config_path)? {
        Output::info(&format!("Created config at {}", config_path.display()));
    }

    let editor = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".to_string());
    Output::info(&format!("Opening {} in {}...", config_path.display(), editor));

    let status = std::process::Command::new(&editor)
        .arg(config_path)
        .status()
        .with_context(|| format!("Failed to launch editor '{}'", editor))?;

    if !status.success() {
        Output::warning("Editor exited with non-zero status.");
        return Ok(());
    }

    // Re-read so a broken edit shows up now rather than on the next command.
    match Settings::load_from(Some(&config_path.to_path_buf())) {
        Ok(_) => Output::success(&format!("Saved {}", config_path.display())),
        Err(e) => Output::error(&format!("{} no longer parses: {}", config_path.display(), e)),
    }

    Ok(())
}
