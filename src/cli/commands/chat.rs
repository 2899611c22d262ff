//! Interactive chat command against a running tutor server.

use crate::cli::Output;
use crate::client::ChatClient;
use crate::config::Settings;
use console::style;
use std::io::{self, BufRead, Write};
use std::time::Duration;

/// Run the interactive chat command.
pub async fn run_chat(
    endpoint: Option<String>,
    session: Option<String>,
    settings: Settings,
) -> anyhow::Result<()> {
    let endpoint = endpoint.unwrap_or_else(|| settings.client.endpoint.clone());
    let session = session.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let mut client = ChatClient::with_timeout(
        &endpoint,
        &session,
        Duration::from_secs(settings.client.timeout_secs),
    )?;

    println!("\n{}", style("Laer Tutor").bold().cyan());
    println!(
        "{}",
        style(format!("Connected to {} (session {})", endpoint, client.session_id())).dim()
    );
    println!(
        "{}\n",
        style("Ask your tutoring question, or 'exit' to quit. Use 'clear' to reset the conversation.")
            .dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        if input.eq_ignore_ascii_case("clear") {
            client.clear();
            Output::info("Conversation history cleared.");
            continue;
        }

        let spinner = Output::spinner("Thinking...");
        let result = client.send_message(input).await;
        spinner.finish_and_clear();

        match result {
            Ok(appended) => {
                for message in appended {
                    Output::message(message);
                }
            }
            Err(e) => {
                Output::error(&format!("Error: {}", e));
            }
        }
    }

    Ok(())
}
