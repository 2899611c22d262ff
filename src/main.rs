//! Laer CLI entry point.

use anyhow::Result;
use clap::Parser;
use laer::cli::{commands, Cli, Commands};
use laer::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = Settings::resolve_path(cli.config.as_deref());
    let settings = Settings::load_from(Some(&config_path))?;

    // Initialize logging; -v flags override the configured level
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| {
            format!("laer={},tower_http={}", log_level, log_level)
        })))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Serve { host, port } => {
            commands::run_serve(host, port, settings).await?;
        }

        Commands::Chat { endpoint, session } => {
            commands::run_chat(endpoint, session, settings).await?;
        }

        Commands::Ask { question, session } => {
            commands::run_ask(&question, &session, settings).await?;
        }

        Commands::Tools => {
            commands::run_tools()?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, &config_path).await?;
        }

        Commands::Config { action } => {
            commands::run_config(&action, settings, &config_path)?;
        }
    }

    Ok(())
}
