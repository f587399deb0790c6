//! API boundary types and the result/error translator
//!
//! Success payloads expose the debit ledger entry id and both post-transfer
//! balances. Failure payloads are `{success: false, error_message}`;
//! infrastructure detail never crosses the boundary.

use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::transfer::engine::TransferOutcome;
use crate::transfer::error::TransferError;
use crate::transfer::validation::ValidationError;

/// Transfer request body
///
/// All three fields are string-encoded numerics to avoid float precision
/// loss in JSON.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransferApiRequest {
    /// Originating account number
    #[schema(example = "1")]
    pub from: String,
    /// Destination account number
    #[schema(example = "2")]
    pub to: String,
    /// Amount to transfer, must be greater than 0
    #[schema(example = "30.00")]
    pub amount: String,
}

/// One account's id and post-transfer balance
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountBalanceData {
    pub id: i64,
    #[schema(example = "70.00")]
    pub balance: String,
}

/// Successful transfer payload
#[derive(Debug, Serialize, ToSchema)]
pub struct TransferApiResponse {
    pub success: bool,
    /// Ledger entry id of the debit row
    pub id: i64,
    pub from: AccountBalanceData,
    pub to: AccountBalanceData,
    pub transferred: String,
}

impl TransferApiResponse {
    pub fn from_outcome(outcome: &TransferOutcome) -> Self {
        Self {
            success: true,
            id: outcome.entry_id,
            from: AccountBalanceData {
                id: outcome.from_account,
                balance: outcome.from_balance.to_string(),
            },
            to: AccountBalanceData {
                id: outcome.to_account,
                balance: outcome.to_balance.to_string(),
            },
            transferred: outcome.amount.to_string(),
        }
    }
}

/// Failure payload for every error path
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_message: String,
}

impl ErrorResponse {
    pub fn new(error_message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: error_message.into(),
        }
    }
}

/// Map a validation rejection to its HTTP shape. No storage was touched.
pub fn translate_validation_error(err: &ValidationError) -> (StatusCode, Json<ErrorResponse>) {
    tracing::warn!(error = %err, "bad transfer request");
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(err.to_string())))
}

/// Map an engine failure to its HTTP shape.
///
/// Business rejections keep their descriptive message and log as warnings;
/// infrastructure failures log full detail and answer with an opaque 500.
pub fn translate_transfer_error(err: &TransferError) -> (StatusCode, Json<ErrorResponse>) {
    if err.is_business() {
        tracing::warn!(code = err.code(), error = %err, "transfer rejected");
    } else {
        tracing::error!(
            code = err.code(),
            lock_timeout = err.is_lock_timeout(),
            error = ?err,
            "transfer failed"
        );
    }

    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.user_message())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn outcome() -> TransferOutcome {
        TransferOutcome {
            entry_id: 41,
            from_account: 1,
            from_balance: Decimal::new(7000, 2),
            to_account: 2,
            to_balance: Decimal::new(8000, 2),
            amount: Decimal::new(3000, 2),
        }
    }

    #[test]
    fn test_success_payload_shape() {
        let payload = serde_json::to_value(TransferApiResponse::from_outcome(&outcome())).unwrap();
        assert_eq!(
            payload,
            json!({
                "success": true,
                "id": 41,
                "from": {"id": 1, "balance": "70.00"},
                "to": {"id": 2, "balance": "80.00"},
                "transferred": "30.00"
            })
        );
    }

    #[test]
    fn test_error_payload_shape() {
        let payload = serde_json::to_value(ErrorResponse::new("nope")).unwrap();
        assert_eq!(
            payload,
            json!({"success": false, "error_message": "nope"})
        );
    }

    #[test]
    fn test_business_errors_keep_their_message() {
        let (status, Json(body)) = translate_transfer_error(&TransferError::InsufficientFunds);
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body.error_message,
            "Transaction failed due to insufficient funds"
        );

        let (status, Json(body)) = translate_transfer_error(&TransferError::AccountNotFound);
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body.error_message,
            "Either one or both of the accounts do not exist"
        );
    }

    #[test]
    fn test_infrastructure_errors_are_opaque() {
        let err = TransferError::Infrastructure(sqlx::Error::PoolTimedOut);
        let (status, Json(body)) = translate_transfer_error(&err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error_message, "Internal server error");
    }

    #[test]
    fn test_validation_errors_are_bad_requests() {
        let (status, Json(body)) = translate_validation_error(&ValidationError::SameAccount);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
    }
}
