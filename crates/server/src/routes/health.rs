use axum::http::StatusCode;

/// Liveness probe at the root path
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Server is up", content_type = "text/plain", body = String)
    ),
    tag = "Health"
)]
pub async fn root() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// Returns "OK" while the server is accepting requests
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is up", content_type = "text/plain", body = String)
    ),
    tag = "Health"
)]
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
