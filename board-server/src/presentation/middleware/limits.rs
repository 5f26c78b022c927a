use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::{BoxError, Router};
use tower::ServiceBuilder;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower_http::limit::RequestBodyLimitLayer;

/// Request timeout, server-wide in-flight cap and body size cap.
pub(crate) fn apply_limits(
    router: Router,
    body_limit_bytes: usize,
    concurrency_limit: usize,
    timeout: Duration,
) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_limit_error))
            .layer(TimeoutLayer::new(timeout))
            .layer(GlobalConcurrencyLimitLayer::new(concurrency_limit))
            .layer(RequestBodyLimitLayer::new(body_limit_bytes)),
    )
}

async fn handle_limit_error(err: BoxError) -> (StatusCode, String) {
    if err.is::<Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "request timed out".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("unhandled internal error: {err}"),
        )
    }
}
