//! PostgreSQL storage backend: pool management, schema, read queries.

pub mod db;
pub mod queries;
pub mod schema;

pub use db::Database;
pub use queries::{AccountRepository, LedgerEntry};
