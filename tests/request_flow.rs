//! Black-box tests of the request flow up to the storage boundary:
//! validation, error classification, and response shaping through the
//! crate's public API.

use bankcore::gateway::types::{ErrorResponse, TransferApiResponse, translate_transfer_error};
use bankcore::transfer::engine::TransferOutcome;
use bankcore::{TransferError, ValidationError, validate};
use rust_decimal::Decimal;

#[test]
fn validator_rejects_before_any_storage_access() {
    // Every malformed shape the endpoint can receive
    assert!(matches!(
        validate("acct-1", "2", "10").unwrap_err(),
        ValidationError::InvalidAccountId { field: "from", .. }
    ));
    assert!(matches!(
        validate("1", "", "10").unwrap_err(),
        ValidationError::InvalidAccountId { field: "to", .. }
    ));
    assert!(matches!(
        validate("1", "2", "1e3garbage").unwrap_err(),
        ValidationError::InvalidAmountFormat { .. }
    ));
    assert_eq!(
        validate("1", "2", "0.00").unwrap_err(),
        ValidationError::NonPositiveAmount
    );
    assert_eq!(
        validate("3", "3", "5").unwrap_err(),
        ValidationError::SameAccount
    );
}

#[test]
fn validator_accepts_well_formed_requests() {
    let t = validate("10", "20", "0.01").unwrap();
    assert_eq!(t.from().get(), 10);
    assert_eq!(t.to().get(), 20);
    assert_eq!(t.amount(), Decimal::new(1, 2));
}

#[test]
fn business_errors_map_to_user_facing_status() {
    for err in [TransferError::InsufficientFunds, TransferError::AccountNotFound] {
        let (status, body) = translate_transfer_error(&err);
        assert!(status.is_client_error(), "{err} should be a client error");
        assert!(!body.success);
        // Descriptive, storage-free message
        assert!(!body.error_message.is_empty());
        assert!(!body.error_message.to_lowercase().contains("sql"));
    }
}

#[test]
fn infrastructure_errors_stay_opaque() {
    let err = TransferError::Infrastructure(sqlx::Error::PoolTimedOut);
    let (status, body) = translate_transfer_error(&err);
    assert!(status.is_server_error());
    assert_eq!(body.error_message, "Internal server error");
}

#[test]
fn success_payload_carries_entry_id_and_both_balances() {
    let outcome = TransferOutcome {
        entry_id: 7,
        from_account: 1,
        from_balance: Decimal::new(7000, 2),
        to_account: 2,
        to_balance: Decimal::new(8000, 2),
        amount: Decimal::new(3000, 2),
    };
    let resp = TransferApiResponse::from_outcome(&outcome);
    assert!(resp.success);
    assert_eq!(resp.id, 7);
    assert_eq!(resp.from.balance, "70.00");
    assert_eq!(resp.to.balance, "80.00");
    assert_eq!(resp.transferred, "30.00");
}

#[test]
fn error_response_shape_is_stable() {
    let body = serde_json::to_value(ErrorResponse::new("msg")).unwrap();
    assert_eq!(body["success"], serde_json::json!(false));
    assert_eq!(body["error_message"], serde_json::json!("msg"));
}
