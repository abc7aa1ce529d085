use axum::http::StatusCode;

/// Handler for `GET /healthz` — liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz` — readiness check.
///
/// The API has no readiness gate beyond the database pool, which sea-orm
/// reconnects lazily, so this mirrors liveness.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
