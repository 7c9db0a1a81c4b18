//! Classified inbound proxy requests.
//!
//! The proxy accepts two body shapes on a single route. Rather than inferring
//! the GraphQL path from "not a REST lookup", every body is classified into
//! an explicit [`ProxyRequest`] variant, and anything that fits neither shape
//! is rejected before any upstream call is made.

use serde_json::{Map, Value};

use super::handle::{HandleError, ProductHandle};

/// Errors that can occur when classifying an inbound request body.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// The body is valid JSON but not an object.
    #[error("request body must be a JSON object")]
    NotAnObject,
    /// A REST lookup was requested without a string `productHandle`.
    #[error("productHandle is required when rest is true")]
    MissingHandle,
    /// The `productHandle` was present but unusable.
    #[error("invalid productHandle: {0}")]
    InvalidHandle(#[from] HandleError),
    /// Neither a REST lookup nor a GraphQL query was supplied.
    #[error("unrecognized request shape: expected {{rest, productHandle}} or {{query, variables}}")]
    UnrecognizedShape,
    /// `variables` was present but not an object.
    #[error("variables must be a JSON object")]
    InvalidVariables,
}

/// A classified proxy request.
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyRequest {
    /// Look up a single product by handle through the REST Admin API.
    RestLookup {
        /// Handle of the product to fetch.
        handle: ProductHandle,
    },
    /// Forward a GraphQL document to the Admin API.
    GraphQlCall {
        /// The GraphQL document, forwarded as-is.
        query: String,
        /// Operation variables (empty when the client sent none).
        variables: Map<String, Value>,
    },
}

impl ProxyRequest {
    /// Classify a parsed JSON body.
    ///
    /// - `{"rest": true, "productHandle": "..."}` becomes [`ProxyRequest::RestLookup`]
    /// - `{"query": "...", "variables": {...}}` becomes [`ProxyRequest::GraphQlCall`];
    ///   absent or `null` variables default to an empty object
    ///
    /// A body with `rest: true` is always treated as a REST lookup, so a
    /// missing handle is reported as such instead of falling through to the
    /// GraphQL path.
    ///
    /// # Errors
    ///
    /// Returns a [`ClassifyError`] describing why the body matched neither shape.
    pub fn classify(body: Value) -> Result<Self, ClassifyError> {
        let Value::Object(mut fields) = body else {
            return Err(ClassifyError::NotAnObject);
        };

        if fields.get("rest") == Some(&Value::Bool(true)) {
            let handle = match fields.remove("productHandle") {
                Some(Value::String(handle)) => ProductHandle::parse(&handle)?,
                _ => return Err(ClassifyError::MissingHandle),
            };
            return Ok(Self::RestLookup { handle });
        }

        let query = match fields.remove("query") {
            Some(Value::String(query)) if !query.trim().is_empty() => query,
            _ => return Err(ClassifyError::UnrecognizedShape),
        };

        let variables = match fields.remove("variables") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(variables)) => variables,
            Some(_) => return Err(ClassifyError::InvalidVariables),
        };

        Ok(Self::GraphQlCall { query, variables })
    }

    /// Short label for logging and tracing spans.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::RestLookup { .. } => "rest_lookup",
            Self::GraphQlCall { .. } => "graphql",
        }
    }
}
