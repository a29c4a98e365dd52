use axum::http::StatusCode;

/// Handler for `GET /healthz`: liveness check.
///
/// Readiness depends on service-specific backends, so each service provides its own `readyz`.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
