//! One-shot ask command, running the tutor in-process.

use crate::cli::output::truncate;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::tutor::Tutor;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(question: &str, session: &str, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Tutor) {
        Output::error(&format!("{}", e));
        Output::info("Run 'laer doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let tutor = Tutor::connect(&settings).await?;

    let spinner = Output::spinner("Tutor thinking...");

    match tutor.process_query(session, question, &[]).await {
        Ok(response) => {
            spinner.finish_and_clear();

            println!("\n{}\n", response.response);

            if !response.agent_actions.is_empty() {
                Output::header(&format!("Agent actions ({})", response.agent_actions.len()));
                for action in &response.agent_actions {
                    Output::list_item(&format!(
                        "{} {}",
                        action.action_type,
                        truncate(&action.input.to_string(), 60)
                    ));
                }
                println!();
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Tutor failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
