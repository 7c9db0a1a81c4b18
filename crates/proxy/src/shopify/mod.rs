//! Shopify Admin API client used by the proxy.
//!
//! # Architecture
//!
//! - One pooled `reqwest` client, shared by every request through `AppState`
//! - The admin access token lives only inside [`AdminClient`] and is sent as
//!   the `X-Shopify-Access-Token` header
//! - No caching, no retries: each inbound request makes at most one call
//!
//! # APIs
//!
//! ## REST Admin API
//! - `GET /admin/api/{version}/products.json?handle=...`
//!
//! ## GraphQL Admin API
//! - `POST /admin/api/{version}/graphql.json`, response relayed verbatim

mod client;

pub use client::{AdminClient, ProductLookup};

use reqwest::StatusCode;
use thiserror::Error;

/// Maximum number of upstream body characters kept in an error.
const BODY_EXCERPT_CHARS: usize = 200;

/// Errors that can occur when calling the Shopify Admin API.
#[derive(Debug, Error)]
pub enum AdminApiError {
    /// The request never produced a response (DNS, connect, TLS, reset).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Shopify answered with a 4xx status.
    #[error("Upstream rejected request with {status}: {body}")]
    UpstreamRejected {
        /// Status returned by Shopify.
        status: StatusCode,
        /// Leading excerpt of the response body.
        body: String,
    },

    /// Shopify answered with a 5xx (or otherwise unexpected) status.
    #[error("Upstream failed with {status}: {body}")]
    UpstreamFailed {
        /// Status returned by Shopify.
        status: StatusCode,
        /// Leading excerpt of the response body.
        body: String,
    },

    /// The response body was not the JSON we expected.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An endpoint URL could not be built from configuration.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl AdminApiError {
    /// Classify a non-success upstream status.
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        let body = body.chars().take(BODY_EXCERPT_CHARS).collect();
        if status.is_client_error() {
            Self::UpstreamRejected { status, body }
        } else {
            Self::UpstreamFailed { status, body }
        }
    }
}
