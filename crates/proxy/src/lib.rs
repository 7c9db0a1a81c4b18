//! Admin Proxy library.
//!
//! This crate provides the proxy server as a library, allowing the router
//! to be driven in-process by tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod shopify;
pub mod state;
