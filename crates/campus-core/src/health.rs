use axum::http::StatusCode;

/// Handler for `GET /healthz` — process liveness.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz` — readiness. Services that gate readiness on a
/// dependency wire their own handler instead of this one.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
