//! Admin Proxy Core - Request model and payload normalization.
//!
//! This crate holds the pure parts of the admin API proxy used by:
//! - `admin-proxy` - the HTTP server that forwards requests to Shopify
//! - `admin-proxy-integration-tests` - end-to-end tests against a mock upstream
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Everything here can be tested without a network.
//!
//! # Modules
//!
//! - [`types`] - `ProductHandle` and the classified [`ProxyRequest`]
//! - [`normalize`] - variant normalization applied before GraphQL forwarding

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod normalize;
pub mod types;

pub use normalize::normalize_variables;
pub use types::*;
