//! Read-side repository for accounts and ledger entries
//!
//! The transfer engine owns all mutating statements; everything here runs
//! outside the transfer transaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

/// One append-only ledger row
#[derive(Debug, Clone, FromRow, serde::Serialize)]
pub struct LedgerEntry {
    pub entry_id: i64,
    pub account_id: i64,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

pub struct AccountRepository;

impl AccountRepository {
    /// Current committed balance, `None` if the account does not exist
    pub async fn get_balance(
        pool: &PgPool,
        account_id: i64,
    ) -> Result<Option<Decimal>, sqlx::Error> {
        sqlx::query_scalar(r#"SELECT balance FROM accounts_tb WHERE account_id = $1"#)
            .bind(account_id)
            .fetch_optional(pool)
            .await
    }

    /// Most recent ledger entries for an account, newest first
    pub async fn ledger_entries(
        pool: &PgPool,
        account_id: i64,
        limit: i64,
    ) -> Result<Vec<LedgerEntry>, sqlx::Error> {
        sqlx::query_as(
            r#"SELECT entry_id, account_id, amount, created_at
               FROM ledger_tb WHERE account_id = $1
               ORDER BY entry_id DESC LIMIT $2"#,
        )
        .bind(account_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Sum of all ledger entries for an account
    ///
    /// For a consistent store this always equals the stored balance; the
    /// ledger endpoint and tests reconcile the two.
    pub async fn ledger_sum(pool: &PgPool, account_id: i64) -> Result<Decimal, sqlx::Error> {
        sqlx::query_scalar(
            r#"SELECT COALESCE(SUM(amount), 0) FROM ledger_tb WHERE account_id = $1"#,
        )
        .bind(account_id)
        .fetch_one(pool)
        .await
    }

    /// Create an account or reset its balance. Seed/test helper.
    pub async fn upsert(pool: &PgPool, account_id: i64, balance: Decimal) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"INSERT INTO accounts_tb (account_id, balance) VALUES ($1, $2)
               ON CONFLICT (account_id) DO UPDATE SET balance = EXCLUDED.balance"#,
        )
        .bind(account_id)
        .bind(balance)
        .execute(pool)
        .await?;

        Ok(())
    }
}
