//! solace HTTP server binary.
//!
//! # Environment Variables
//!
//! - `PORT` — HTTP port (default: 8080)
//! - `SOLACE_PROMPT_FILE` — JSON file replacing the embedded prompt templates
//! - `SOLACE_PRESENTER_CONFIG` — YAML file overriding chart constants
//! - `RUST_LOG` — Tracing filter (default: "info,solace=debug")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! ```

use anyhow::Context;
use solace::config::{PresenterConfig, ServerConfig};
use solace::prompts::PromptLibrary;
use solace::server::{app_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,solace=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let presenter = match &config.presenter_config {
        Some(path) => PresenterConfig::load(path)
            .with_context(|| format!("loading presenter config {}", path))?,
        None => PresenterConfig::default(),
    };
    let prompts = match &config.prompt_file {
        Some(path) => {
            PromptLibrary::load(path).with_context(|| format!("loading prompt file {}", path))?
        }
        None => PromptLibrary::embedded(),
    };

    let app = app_router(AppState::new(presenter, prompts));
    let bind_addr = config.bind_addr();

    tracing::info!("solace server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health           — liveness probe");
    tracing::info!("  POST /analyze          — parse analysis text into charts");
    tracing::info!("  POST /prompts/analysis — render analysis prompt");
    tracing::info!("  POST /prompts/reply    — render reply prompt");
    tracing::info!("  POST /reply/format     — format generated reply");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {}", bind_addr))?;

    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
