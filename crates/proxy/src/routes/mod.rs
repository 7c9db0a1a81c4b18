//! HTTP routes for the proxy.
//!
//! # Route Structure
//!
//! ```text
//! GET     /health      - Liveness check
//!
//! # Proxy (CORS-gated)
//! OPTIONS /api/proxy   - Preflight, empty 200
//! POST    /api/proxy   - REST product lookup or GraphQL passthrough
//! *       /api/proxy   - 405 Method not allowed
//! ```

pub mod proxy;

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{MethodRouter, get, post},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{cors_middleware, handle_panic, request_id_middleware};
use crate::state::AppState;

/// Create the proxy routes router.
pub fn proxy_routes() -> Router<AppState> {
    Router::new().route(
        proxy::PROXY_PATH,
        cors_gated(
            post(proxy::proxy)
                .options(proxy::preflight)
                .fallback(proxy::method_not_allowed),
        ),
    )
}

/// Wrap a CORS-gated route.
///
/// Panics are caught inside the CORS middleware so that the 500 they turn
/// into still carries the CORS headers.
fn cors_gated(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route
        .layer::<_, std::convert::Infallible>(DefaultBodyLimit::max(proxy::MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(cors_middleware))
}

/// Build the full application: routes, middleware and state.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(proxy_routes())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not call Shopify.
async fn health() -> &'static str {
    "ok"
}
