//! HTTP handlers

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use utoipa::ToSchema;

use super::state::AppState;
use super::types::{
    AccountBalanceData, ErrorResponse, TransferApiRequest, TransferApiResponse,
    translate_transfer_error, translate_validation_error,
};
use crate::storage::AccountRepository;
use crate::transfer::validate;

/// Upper bound on ledger entries returned per request
const LEDGER_PAGE_LIMIT: i64 = 100;

/// Execute a funds transfer
///
/// POST /transfer
///
/// Validates the request, then runs the transactional protocol: lock both
/// account rows, debit, credit, ledger entries, readback, commit.
#[utoipa::path(
    post,
    path = "/transfer",
    request_body = TransferApiRequest,
    responses(
        (status = 200, description = "Transfer committed", body = TransferApiResponse),
        (status = 400, description = "Malformed input", body = ErrorResponse),
        (status = 422, description = "Insufficient funds or unknown account", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "Transfer"
)]
pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TransferApiRequest>,
) -> Result<(StatusCode, Json<TransferApiResponse>), (StatusCode, Json<ErrorResponse>)> {
    // 1. Validate before any storage access
    let validated = validate(&req.from, &req.to, &req.amount)
        .map_err(|e| translate_validation_error(&e))?;

    // 2. Run the engine, translate the terminal outcome
    match state.engine.execute(&validated).await {
        Ok(outcome) => Ok((
            StatusCode::OK,
            Json(TransferApiResponse::from_outcome(&outcome)),
        )),
        Err(e) => Err(translate_transfer_error(&e)),
    }
}

/// Health check response data
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_u64)]
    pub timestamp_ms: u64,
}

/// Health check endpoint
///
/// Pings the connection pool. No internal detail leaks into the response.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse),
        (status = 503, description = "Storage unreachable", body = HealthResponse)
    ),
    tag = "System"
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let timestamp_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    match state.db.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                timestamp_ms,
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable".to_string(),
                    timestamp_ms,
                }),
            )
        }
    }
}

/// Get an account's current balance
///
/// GET /account/{id}
#[utoipa::path(
    get,
    path = "/account/{id}",
    params(("id" = i64, Path, description = "Account number")),
    responses(
        (status = 200, description = "Current balance", body = AccountBalanceData),
        (status = 404, description = "Unknown account", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "Account"
)]
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<i64>,
) -> Result<Json<AccountBalanceData>, (StatusCode, Json<ErrorResponse>)> {
    match AccountRepository::get_balance(state.db.pool(), account_id).await {
        Ok(Some(balance)) => Ok(Json(AccountBalanceData {
            id: account_id,
            balance: balance.to_string(),
        })),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Account does not exist")),
        )),
        Err(e) => {
            tracing::error!(account_id, error = %e, "balance lookup failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Internal server error")),
            ))
        }
    }
}

/// One ledger row in API form
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct LedgerEntryData {
    pub entry_id: i64,
    #[schema(example = "-30.00")]
    pub amount: String,
    pub created_at: DateTime<Utc>,
}

/// Account ledger payload: recent entries plus the reconciled sum
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct AccountLedgerData {
    pub id: i64,
    /// Stored balance
    pub balance: String,
    /// Sum of all ledger entries; equals `balance` for a consistent store
    pub ledger_sum: String,
    pub entries: Vec<LedgerEntryData>,
}

/// Get an account's recent ledger entries
///
/// GET /account/{id}/ledger
#[utoipa::path(
    get,
    path = "/account/{id}/ledger",
    params(("id" = i64, Path, description = "Account number")),
    responses(
        (status = 200, description = "Recent entries, newest first", body = AccountLedgerData),
        (status = 404, description = "Unknown account", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "Account"
)]
pub async fn get_ledger(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<i64>,
) -> Result<Json<AccountLedgerData>, (StatusCode, Json<ErrorResponse>)> {
    let pool = state.db.pool();

    let internal_error = |e: sqlx::Error| {
        tracing::error!(account_id, error = %e, "ledger lookup failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Internal server error")),
        )
    };

    let balance = AccountRepository::get_balance(pool, account_id)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Account does not exist")),
            )
        })?;

    let ledger_sum = AccountRepository::ledger_sum(pool, account_id)
        .await
        .map_err(internal_error)?;

    let entries = AccountRepository::ledger_entries(pool, account_id, LEDGER_PAGE_LIMIT)
        .await
        .map_err(internal_error)?
        .into_iter()
        .map(|e| LedgerEntryData {
            entry_id: e.entry_id,
            amount: e.amount.to_string(),
            created_at: e.created_at,
        })
        .collect();

    Ok(Json(AccountLedgerData {
        id: account_id,
        balance: balance.to_string(),
        ledger_sum: ledger_sum.to_string(),
        entries,
    }))
}
