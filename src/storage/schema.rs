//! PostgreSQL schema bootstrap
//!
//! The `accounts_balance_non_negative` CHECK constraint is the storage-side
//! authority on the balance invariant: any update that would drive a
//! balance below zero aborts the enclosing transaction.

use sqlx::PgPool;

const CREATE_ACCOUNTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS accounts_tb (
    account_id  BIGINT PRIMARY KEY,
    balance     NUMERIC(20, 2) NOT NULL DEFAULT 0,
    CONSTRAINT accounts_balance_non_negative CHECK (balance >= 0)
)
"#;

const CREATE_LEDGER_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS ledger_tb (
    entry_id    BIGSERIAL PRIMARY KEY,
    account_id  BIGINT NOT NULL REFERENCES accounts_tb (account_id),
    amount      NUMERIC(20, 2) NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_LEDGER_ACCOUNT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS ledger_account_idx ON ledger_tb (account_id)";

/// Create tables and indexes if absent. Idempotent.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_ACCOUNTS_TABLE).execute(pool).await?;
    sqlx::query(CREATE_LEDGER_TABLE).execute(pool).await?;
    sqlx::query(CREATE_LEDGER_ACCOUNT_INDEX).execute(pool).await?;

    tracing::info!("PostgreSQL schema initialized");
    Ok(())
}
