//! Integration tests for Vitrine.
//!
//! Each test starts the storefront router in-process on an ephemeral port
//! and talks to it over HTTP with a cookie-keeping client, so the session
//! cart survives across requests exactly as it does in a browser.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrine-integration-tests
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use reqwest::{Client, redirect};
use url::Url;
use vitrine_core::{CurrencyCode, Price, Product, ProductId};
use vitrine_storefront::{
    catalog::Catalog,
    config::{IdentityConfig, StorefrontConfig},
    services::identity::{HostedPagesProvider, IdentityProvider},
    state::AppState,
};

/// Publishable key whose frontend API host is `clerk.example.com`.
pub const TEST_PUBLISHABLE_KEY: &str = "pk_test_Y2xlcmsuZXhhbXBsZS5jb20k";

/// Base URL the test storefront believes it is served from.
pub const TEST_BASE_URL: &str = "http://shop.test";

/// A running storefront and a client bound to one visitor session.
pub struct TestContext {
    pub client: Client,
    pub addr: SocketAddr,
}

impl TestContext {
    /// Start a storefront using the embedded widget provider.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn new() -> Self {
        let state = AppState::new(test_config(), test_catalog()).expect("valid identity config");
        Self::start(state).await
    }

    /// Start a storefront that redirects to hosted auth pages.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn with_hosted_pages() -> Self {
        let identity: Arc<dyn IdentityProvider> = Arc::new(HostedPagesProvider::new(
            Url::parse("https://accounts.example.com/sign-in").expect("valid url"),
            Url::parse("https://accounts.example.com/sign-up").expect("valid url"),
            TEST_BASE_URL,
        ));
        let state = AppState::with_identity(test_config(), test_catalog(), identity);
        Self::start(state).await
    }

    async fn start(state: AppState) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("listener has an address");

        let app = vitrine_storefront::app(state);
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("test server failed");
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self { client, addr }
    }

    /// Absolute URL for a storefront path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

/// Storefront configuration for tests.
///
/// # Panics
///
/// Never in practice; the literal address always parses.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().expect("valid address"),
        port: 0,
        base_url: TEST_BASE_URL.to_string(),
        catalog_path: PathBuf::from("unused.json"),
        identity: IdentityConfig::Clerk {
            publishable_key: TEST_PUBLISHABLE_KEY.to_string(),
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Two-product catalog: `tee` at $20.00 and `mug` at $12.50.
///
/// # Panics
///
/// Never in practice; the ids and products are valid.
#[must_use]
pub fn test_catalog() -> Catalog {
    let tee = Product::new(
        ProductId::parse("tee").expect("valid id"),
        "Classic Tee",
        Price::from_cents(2000, CurrencyCode::USD),
        "/static/images/tee.svg",
    )
    .with_description("Soft cotton tee.");
    let mug = Product::new(
        ProductId::parse("mug").expect("valid id"),
        "Ceramic Mug",
        Price::from_cents(1250, CurrencyCode::USD),
        "/static/images/mug.svg",
    );

    Catalog::from_products(vec![tee, mug]).expect("valid catalog")
}
