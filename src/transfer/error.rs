//! Transfer error taxonomy
//!
//! Storage outcomes collapse to exactly two business conditions; every
//! other backend failure is infrastructure and stays opaque to callers.

use thiserror::Error;

/// SQLSTATE check_violation: the non-negative balance constraint fired
const SQLSTATE_CHECK_VIOLATION: &str = "23514";
/// SQLSTATE foreign_key_violation: ledger write against a missing account
const SQLSTATE_FK_VIOLATION: &str = "23503";
/// SQLSTATE lock_not_available: lock_timeout expired while waiting on a row
const SQLSTATE_LOCK_NOT_AVAILABLE: &str = "55P03";

/// Terminal failure of one transfer, raised after rollback
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Transaction failed due to insufficient funds")]
    InsufficientFunds,

    #[error("Either one or both of the accounts do not exist")]
    AccountNotFound,

    #[error("Storage backend failure: {0}")]
    Infrastructure(#[source] sqlx::Error),
}

impl TransferError {
    /// Stable error code for logs and API payloads
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::InsufficientFunds => "INSUFFICIENT_FUNDS",
            TransferError::AccountNotFound => "ACCOUNT_NOT_FOUND",
            TransferError::Infrastructure(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            TransferError::InsufficientFunds | TransferError::AccountNotFound => 422,
            TransferError::Infrastructure(_) => 500,
        }
    }

    /// Message safe to expose to the caller.
    ///
    /// Business errors carry their descriptive message; infrastructure
    /// detail goes to the logs only.
    pub fn user_message(&self) -> String {
        match self {
            TransferError::Infrastructure(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Business rejection (logged as warning) vs. infrastructure failure
    /// (logged as error with full detail)
    pub fn is_business(&self) -> bool {
        !matches!(self, TransferError::Infrastructure(_))
    }

    /// True when the failure was a row-lock wait exceeding the bound
    pub fn is_lock_timeout(&self) -> bool {
        match self {
            TransferError::Infrastructure(err) => err
                .as_database_error()
                .and_then(|db| db.code())
                .is_some_and(|code| code == SQLSTATE_LOCK_NOT_AVAILABLE),
            _ => false,
        }
    }
}

impl From<sqlx::Error> for TransferError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db) = err.as_database_error() {
            if let Some(code) = db.code() {
                match code.as_ref() {
                    SQLSTATE_CHECK_VIOLATION => return TransferError::InsufficientFunds,
                    SQLSTATE_FK_VIOLATION => return TransferError::AccountNotFound,
                    _ => {}
                }
            }
        }
        TransferError::Infrastructure(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(TransferError::InsufficientFunds.code(), "INSUFFICIENT_FUNDS");
        assert_eq!(TransferError::AccountNotFound.code(), "ACCOUNT_NOT_FOUND");
        assert_eq!(
            TransferError::Infrastructure(sqlx::Error::PoolTimedOut).code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_http_status() {
        assert_eq!(TransferError::InsufficientFunds.http_status(), 422);
        assert_eq!(TransferError::AccountNotFound.http_status(), 422);
        assert_eq!(
            TransferError::Infrastructure(sqlx::Error::PoolTimedOut).http_status(),
            500
        );
    }

    #[test]
    fn test_user_message_opaque_for_infrastructure() {
        let err = TransferError::Infrastructure(sqlx::Error::PoolTimedOut);
        assert_eq!(err.user_message(), "Internal server error");
        assert!(!err.user_message().contains("pool"));

        assert_eq!(
            TransferError::InsufficientFunds.user_message(),
            "Transaction failed due to insufficient funds"
        );
    }

    #[test]
    fn test_non_database_errors_are_infrastructure() {
        let err: TransferError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, TransferError::Infrastructure(_)));
        assert!(!err.is_business());

        let err: TransferError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, TransferError::Infrastructure(_)));
    }

    #[test]
    fn test_is_business() {
        assert!(TransferError::InsufficientFunds.is_business());
        assert!(TransferError::AccountNotFound.is_business());
    }
}
