//! Laer - Agentic Tutoring Chat
//!
//! A tutoring service where a tool-calling LLM agent helps students learn
//! instead of just answering questions.
//!
//! The name "Laer" comes from the Norwegian word "lære", "to learn."
//!
//! # Overview
//!
//! Each student message goes through one agent run. The agent can:
//! - Assess a student's understanding and identify knowledge gaps
//! - Generate practice problems
//! - Explain a concept in a different modality (visual, analogy, ...)
//! - Update the student's learning path
//!
//! # Architecture
//!
//! - `config` - Configuration and prompt templates
//! - `models` - Messages, agent actions, sessions, practice problems
//! - `tools` - Tutoring tool implementations and collaborator traits
//! - `agent` - Chat model abstraction, tool dispatch, and the agent loop
//! - `tutor` - The orchestrator: context building and query processing
//! - `server` - HTTP API (`POST /api/chat`)
//! - `client` - Chat client that keeps a session's message log
//!
//! # Example
//!
//! ```rust,no_run
//! use laer::config::Settings;
//! use laer::tutor::Tutor;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let tutor = Tutor::connect(&settings).await?;
//!
//!     let reply = tutor.process_query("s1", "What is a derivative?", &[]).await?;
//!     println!("{}", reply.response);
//!     for action in &reply.agent_actions {
//!         println!("used {}", action.action_type);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod openai;
pub mod server;
pub mod tools;
pub mod tutor;

pub use error::{LaerError, Result};
