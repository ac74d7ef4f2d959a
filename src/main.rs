use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

mod quiz;
mod server;
mod settings;

use crate::quiz::QuestionBank;
use crate::server::AppState;
use crate::settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "quiz_server=info,axum=info".to_owned());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = Settings::parse();

    // Loaded once, before any request can be served.
    let bank = QuestionBank::load(&settings.questions);
    let app = server::router(AppState::new(bank));

    let listener = tokio::net::TcpListener::bind(&settings.address)
        .await
        .with_context(|| format!("Could not bind to {}", settings.address))?;
    info!("Serving quiz on http://{}", settings.address);
    axum::serve(listener, app).await?;

    Ok(())
}
