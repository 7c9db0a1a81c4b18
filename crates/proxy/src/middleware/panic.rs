//! Converts handler panics into classified 500 responses.

use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::error::AppError;

/// Panic handler for `tower_http::catch_panic::CatchPanicLayer`.
///
/// The panic payload is logged through [`AppError`]; the caller only sees
/// the generic internal-error body.
#[allow(clippy::needless_pass_by_value)] // signature required by CatchPanicLayer
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| (*s).to_string()))
        .unwrap_or_else(|| "unknown panic payload".to_string());

    AppError::Internal(format!("handler panicked: {detail}")).into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{body::to_bytes, http::StatusCode};
    use serde_json::{Value, json};

    use super::*;

    #[tokio::test]
    async fn test_panic_becomes_internal_error() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"error": "Internal server error", "stack": []}));
    }
}
