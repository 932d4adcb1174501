//! HTTP API for campaign messaging.
//!
//! Generates copy with Gemini, sends it over SMS or WhatsApp through Twilio,
//! and serves each user's delivery history.

mod auth;
mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use database::Database;
use gemini_writer::CopyGenerator;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
use twilio_dispatch::Dispatcher;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting campaign web server");

    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let writer = CopyGenerator::from_env()?;
    let dispatcher = Dispatcher::from_env()?;
    let state = AppState::new(db, Arc::new(writer), Arc::new(dispatcher));

    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!(addr = %config.addr, "Campaign web server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
