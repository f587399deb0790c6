//! BankCore - Concurrent funds-transfer service
//!
//! A funds-transfer API over PostgreSQL, one serializable transaction per
//! transfer, with row-level pessimistic locking and an append-only ledger.
//!
//! # Modules
//!
//! - [`config`] - YAML application configuration
//! - [`logging`] - tracing setup (rolling file + stdout)
//! - [`storage`] - PostgreSQL pool, schema, read queries
//! - [`transfer`] - input validation, transfer engine, error taxonomy
//! - [`gateway`] - axum HTTP surface and response shaping

pub mod config;
pub mod gateway;
pub mod logging;
pub mod storage;
pub mod transfer;

// Convenient re-exports at crate root
pub use storage::Database;
pub use transfer::engine::{TransferEngine, TransferOutcome};
pub use transfer::error::TransferError;
pub use transfer::validation::{AccountId, ValidatedTransfer, ValidationError, validate};
