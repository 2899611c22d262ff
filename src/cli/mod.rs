//! CLI module for Laer.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Laer - Agentic Tutoring Chat
///
/// A tutoring service where an LLM agent diagnoses gaps, explains concepts
/// in different ways, generates practice, and tracks progress.
/// The name "Laer" comes from the Norwegian word "lære", "to learn."
#[derive(Parser, Debug)]
#[command(name = "laer")]
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
    /// Start the tutoring HTTP API server
    Serve {
        /// Host to bind to (default from config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (default from config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Start an interactive chat session against a running server
    Chat {
        /// Server URL (default from config)
        #[arg(short, long, env = "LAER_ENDPOINT")]
        endpoint: Option<String>,

        /// Session id (a new one is generated if omitted)
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Ask the tutor a single question without running a server
    Ask {
        /// The question to ask
        question: String,

        /// Session id to report to the agent
        #[arg(short, long, default_value = "cli")]
        session: String,
    },

    /// List the tools available to the tutoring agent
    Tools,

    /// Check configuration and connectivity
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
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
