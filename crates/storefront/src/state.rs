//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::middleware::security_headers::content_security_policy;
use crate::services::identity::{self, IdentityError, IdentityProvider};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration, the catalog, and the identity provider.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    identity: Arc<dyn IdentityProvider>,
    content_security_policy: String,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Loaded product catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the identity provider configuration is invalid.
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Result<Self, IdentityError> {
        let identity = identity::from_config(&config)?;
        Ok(Self::with_identity(config, catalog, identity))
    }

    /// Create application state with an explicit identity provider.
    #[must_use]
    pub fn with_identity(
        config: StorefrontConfig,
        catalog: Catalog,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let content_security_policy = content_security_policy(identity.origin().as_deref());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                identity,
                content_security_policy,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the hosted identity provider.
    #[must_use]
    pub fn identity(&self) -> &dyn IdentityProvider {
        self.inner.identity.as_ref()
    }

    /// Content Security Policy sent with every response.
    #[must_use]
    pub fn content_security_policy(&self) -> &str {
        &self.inner.content_security_policy
    }
}
