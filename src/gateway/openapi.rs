//! OpenAPI / Swagger UI documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

/// Main API documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "BankCore Transfer API",
        version = "1.0.0",
        description = "Concurrent bank funds-transfer API: atomic transfers with row-level locking and an append-only ledger.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::create_transfer,
        crate::gateway::handlers::health_check,
        crate::gateway::handlers::get_account,
        crate::gateway::handlers::get_ledger,
    ),
    tags(
        (name = "Transfer", description = "Funds transfer"),
        (name = "Account", description = "Balance and ledger reads"),
        (name = "System", description = "Health and diagnostics")
    )
)]
pub struct ApiDoc;
