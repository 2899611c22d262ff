//! HTTP API server command.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::server::{router, AppState};
use crate::tutor::Tutor;
use std::sync::Arc;
use tracing::info;

/// Run the tutoring HTTP API server.
pub async fn run_serve(host: Option<String>, port: Option<u16>, mut settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Tutor) {
        Output::error(&format!("{}", e));
        Output::info("Run 'laer doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    if let Some(host) = host {
        settings.server.host = host;
    }
    if let Some(port) = port {
        settings.server.port = port;
    }

    // Fully construct the tutor before binding so no request sees a half-built one.
    let spinner = Output::spinner(&format!("Connecting to {}...", settings.model.name));
    let tutor = match Tutor::connect(&settings).await {
        Ok(tutor) => {
            spinner.finish_and_clear();
            tutor
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to start tutor: {}", e));
            return Err(e.into());
        }
    };

    let model_name = tutor.model_name().to_string();
    let app = router(Arc::new(AppState::new(tutor)));

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Tutor server bound to {}", addr);

    Output::header("Laer Tutor Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    Output::kv("Model", &model_name);
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Chat", "POST /api/chat");
    Output::kv("Tools", "GET  /api/tools");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Output::info("Server stopped.");
    Ok(())
}
