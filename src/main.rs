//! BankCore - Concurrent funds-transfer service
//!
//! Entry point. Architecture:
//!
//! ```text
//! ┌──────────┐    ┌───────────┐    ┌────────────┐    ┌────────────┐
//! │ Gateway  │───▶│ Validator │───▶│  Transfer  │───▶│ PostgreSQL │
//! │ (axum)   │    │           │    │  Engine    │    │ (sqlx)     │
//! └──────────┘    └───────────┘    └────────────┘    └────────────┘
//! ```
//!
//! One transfer is one transaction on one pooled connection; the database's
//! row locks and non-negative balance constraint carry the correctness.

use std::sync::Arc;

use anyhow::Result;

use bankcore::config::AppConfig;
use bankcore::gateway::{self, state::AppState};
use bankcore::logging::init_logging;
use bankcore::storage::{Database, schema};
use bankcore::transfer::TransferEngine;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env);
    let _guard = init_logging(&config);

    tracing::info!("Starting bankcore (env: {})", env);

    let db = Database::connect(&config.database_url(), &config.postgres).await?;
    schema::init_schema(db.pool()).await?;

    let engine = TransferEngine::new(db.pool().clone(), config.postgres.lock_timeout_ms);
    let state = Arc::new(AppState::new(Arc::new(db), Arc::new(engine)));

    gateway::serve(&config.gateway, state).await
}
