//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ProxyConfig;
use crate::shopify::{AdminApiError, AdminClient};

/// Application state shared across all handlers.
///
/// Read-only after construction. Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ProxyConfig,
    admin: AdminClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the Admin API endpoints cannot be built from the
    /// configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, AdminApiError> {
        let admin = AdminClient::new(&config.shopify)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, admin }),
        })
    }

    /// Get a reference to the proxy configuration.
    #[must_use]
    pub fn config(&self) -> &ProxyConfig {
        &self.inner.config
    }

    /// Get a reference to the Shopify Admin API client.
    #[must_use]
    pub fn admin(&self) -> &AdminClient {
        &self.inner.admin
    }
}
