//! Transactional transfer engine
//!
//! One transfer is one PostgreSQL transaction on one pooled connection:
//! lock both account rows, verify funds, append the two ledger entries,
//! apply both balance updates, read the results back, commit. Any failure
//! rolls back before the error is surfaced; nothing commits partially.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Row, Transaction};

use super::error::TransferError;
use super::validation::ValidatedTransfer;

/// Post-commit result of a successful transfer
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    /// Ledger entry id of the debit row
    pub entry_id: i64,
    pub from_account: i64,
    pub from_balance: Decimal,
    pub to_account: i64,
    pub to_balance: Decimal,
    pub amount: Decimal,
}

pub struct TransferEngine {
    pool: PgPool,
    lock_timeout_ms: u64,
}

impl TransferEngine {
    pub fn new(pool: PgPool, lock_timeout_ms: u64) -> Self {
        Self {
            pool,
            lock_timeout_ms,
        }
    }

    /// Execute a validated transfer to its terminal state.
    ///
    /// Returns the committed outcome, or the classified error after an
    /// explicit rollback. The engine takes no in-process locks; two
    /// transfers touching the same account serialize on the row locks.
    pub async fn execute(&self, req: &ValidatedTransfer) -> Result<TransferOutcome, TransferError> {
        let mut tx = self.pool.begin().await.map_err(TransferError::from)?;

        match self.run_protocol(&mut tx, req).await {
            Ok(outcome) => {
                tx.commit().await?;
                tracing::debug!(
                    entry_id = outcome.entry_id,
                    from = outcome.from_account,
                    to = outcome.to_account,
                    amount = %outcome.amount,
                    "transfer committed"
                );
                Ok(outcome)
            }
            Err(err) => {
                // Every failure path rolls back before the error surfaces.
                // A connection whose rollback failed has indeterminate
                // transactional state; it is closed, not returned to the pool.
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(error = %rollback_err, "rollback failed; discarding connection");
                }
                Err(err)
            }
        }
    }

    async fn run_protocol(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        req: &ValidatedTransfer,
    ) -> Result<TransferOutcome, TransferError> {
        let from = req.from().get();
        let to = req.to().get();
        let amount = req.amount();

        // Bound on row-lock waits. `SET LOCAL` does not accept bind
        // parameters; the value comes from config, never from the request.
        sqlx::query(&format!("SET LOCAL lock_timeout = '{}ms'", self.lock_timeout_ms))
            .execute(&mut **tx)
            .await?;

        // Lock both rows in ascending account_id order, the same global
        // order for every concurrent transfer. Opposite-direction transfers
        // on the same pair queue on the same first lock instead of
        // deadlocking.
        let locked = sqlx::query(
            r#"SELECT account_id, balance FROM accounts_tb
               WHERE account_id IN ($1, $2)
               ORDER BY account_id
               FOR UPDATE"#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&mut **tx)
        .await?;

        if locked.len() != 2 {
            return Err(TransferError::AccountNotFound);
        }

        let mut from_balance = Decimal::ZERO;
        for row in &locked {
            if row.get::<i64, _>("account_id") == from {
                from_balance = row.get("balance");
            }
        }

        if from_balance < amount {
            return Err(TransferError::InsufficientFunds);
        }

        // Debit leg: ledger entry of -amount, then the balance decrement.
        // The accounts_balance_non_negative constraint aborts the
        // transaction if the update would drive the balance below zero.
        let entry_id: i64 = sqlx::query_scalar(
            r#"INSERT INTO ledger_tb (account_id, amount) VALUES ($1, $2) RETURNING entry_id"#,
        )
        .bind(from)
        .bind(-amount)
        .fetch_one(&mut **tx)
        .await?;

        sqlx::query(r#"UPDATE accounts_tb SET balance = balance - $1 WHERE account_id = $2"#)
            .bind(amount)
            .bind(from)
            .execute(&mut **tx)
            .await?;

        // Credit leg
        sqlx::query(r#"INSERT INTO ledger_tb (account_id, amount) VALUES ($1, $2)"#)
            .bind(to)
            .bind(amount)
            .execute(&mut **tx)
            .await?;

        sqlx::query(r#"UPDATE accounts_tb SET balance = balance + $1 WHERE account_id = $2"#)
            .bind(amount)
            .bind(to)
            .execute(&mut **tx)
            .await?;

        // Read both post-transfer balances inside the same transaction so
        // the response is atomically consistent with the mutation.
        let from_balance: Decimal =
            sqlx::query_scalar(r#"SELECT balance FROM accounts_tb WHERE account_id = $1"#)
                .bind(from)
                .fetch_one(&mut **tx)
                .await?;

        let to_balance: Decimal =
            sqlx::query_scalar(r#"SELECT balance FROM accounts_tb WHERE account_id = $1"#)
                .bind(to)
                .fetch_one(&mut **tx)
                .await?;

        Ok(TransferOutcome {
            entry_id,
            from_account: from,
            from_balance,
            to_account: to,
            to_balance,
            amount,
        })
    }
}
