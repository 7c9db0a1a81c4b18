//! Unified error handling with Sentry integration.
//!
//! Every failure in a handler becomes an [`AppError`]. Converting it into a
//! response is the single place where failures are classified, logged with
//! full detail, captured to Sentry, and reduced to a safe public message.
//!
//! # Response body
//!
//! ```json
//! { "error": "Upstream service unreachable", "stack": [] }
//! ```
//!
//! `stack` is present for malformed-request, upstream and internal errors.
//! It stays empty unless `PROXY_EXPOSE_ERROR_DETAILS` is enabled, in which
//! case it lists the error and each of its sources.

use admin_proxy_core::ClassifyError;
use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::shopify::AdminApiError;

/// Application-level error type for the proxy.
#[derive(Debug, Error)]
pub enum AppError {
    /// Shopify Admin API call failed.
    #[error("Admin API error: {0}")]
    AdminApi(#[from] AdminApiError),

    /// Request body could not be classified.
    #[error("Bad request: {0}")]
    Classify(#[from] ClassifyError),

    /// Request body could not be read (too large, aborted).
    #[error("Bad request: unreadable body: {0}")]
    Body(#[from] BytesRejection),

    /// Request body was not valid JSON.
    #[error("Bad request: invalid JSON body: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Resource not found. The message is returned to the caller as-is.
    #[error("{0}")]
    NotFound(&'static str),

    /// HTTP method not supported on this route.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body returned to callers.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Public, classified message.
    pub error: String,
    /// Error chain (empty unless detail exposure is enabled).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<Vec<String>>,
}

impl AppError {
    /// HTTP status for this error.
    ///
    /// Every failure while talking to Shopify is a 500; the public message
    /// tells the classes apart.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::AdminApi(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Body(rejection) => rejection.status(),
            Self::Classify(_) | Self::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Message safe to return to the browser.
    ///
    /// Upstream and internal failures never echo their details, which may
    /// contain upstream URLs or response fragments.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::AdminApi(err) => match err {
                AdminApiError::Http(_) => "Upstream service unreachable",
                AdminApiError::UpstreamRejected { .. } => "Upstream rejected the request",
                AdminApiError::UpstreamFailed { .. } => "Upstream service error",
                AdminApiError::Parse(_) => "Upstream returned an invalid response",
                AdminApiError::InvalidEndpoint(_) => "Internal server error",
            }
            .to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Classify(err) => err.to_string(),
            Self::Body(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                "Request body too large".to_string()
            }
            Self::Body(_) => "Request body could not be read".to_string(),
            Self::InvalidJson(_) => "Request body must be valid JSON".to_string(),
            Self::NotFound(message) => (*message).to_string(),
            Self::MethodNotAllowed => "Method not allowed".to_string(),
        }
    }

    /// The error followed by each of its sources.
    #[must_use]
    pub fn chain(&self) -> Vec<String> {
        std::iter::successors(Some(self as &dyn std::error::Error), |err| err.source())
            .map(ToString::to_string)
            .collect()
    }

    /// Convert into a response, optionally exposing the error chain.
    #[must_use]
    pub fn into_response_with_details(self, expose_details: bool) -> Response {
        let status = self.status();

        if matches!(self, Self::AdminApi(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                chain = ?self.chain(),
                status = status.as_u16(),
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let stack = match &self {
            Self::NotFound(_) | Self::MethodNotAllowed => None,
            _ if expose_details => Some(self.chain()),
            _ => Some(Vec::new()),
        };

        let body = ErrorBody {
            error: self.public_message(),
            stack,
        };

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_response_with_details(false)
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
