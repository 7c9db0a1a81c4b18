//! HTTP middleware stack for the proxy.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with method, uri, status, latency)
//! 3. Request ID (add unique ID to each request and the span)
//! 4. Catch panic (turn handler panics into 500 responses)
//!
//! The proxy route adds its own stack underneath: CORS gate, then catch
//! panic, then the body size limit, so every response of the route
//! (including a panic) carries the CORS headers.

pub mod cors;
pub mod panic;
pub mod request_id;

pub use cors::cors_middleware;
pub use panic::handle_panic;
pub use request_id::request_id_middleware;
