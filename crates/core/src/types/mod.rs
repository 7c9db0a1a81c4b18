//! Core types for the admin proxy.
//!
//! This module provides type-safe wrappers for inbound request shapes.

pub mod handle;
pub mod request;

pub use handle::{HandleError, ProductHandle};
pub use request::{ClassifyError, ProxyRequest};
