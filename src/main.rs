//! HTTP server for the attendance rules engine.
//!
//! Reads the rules directory from `ATTENDANCE_CONFIG` (default
//! `./config/attendance`) and listens on `ATTENDANCE_ADDR` (default
//! `0.0.0.0:3000`). Log output is controlled with `RUST_LOG`.

use std::env;
use std::sync::Arc;

use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::ConfigLoader;
use attendance_engine::store::InMemoryStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/attendance";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir = env::var("ATTENDANCE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let addr = env::var("ATTENDANCE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.into());

    let config = ConfigLoader::load(&config_dir)?;
    info!(config_dir = %config_dir, "Attendance rules loaded");

    let state = AppState::new(config, Arc::new(InMemoryStore::new()));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Listening");

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
