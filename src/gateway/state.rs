use std::sync::Arc;

use crate::storage::Database;
use crate::transfer::TransferEngine;

/// Shared gateway state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL pool (health checks, read queries)
    pub db: Arc<Database>,
    /// Transactional transfer engine
    pub engine: Arc<TransferEngine>,
}

impl AppState {
    pub fn new(db: Arc<Database>, engine: Arc<TransferEngine>) -> Self {
        Self { db, engine }
    }
}
