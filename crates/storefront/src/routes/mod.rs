//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (catalog grid)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Catalog grid
//! GET  /products/{id}          - Product detail
//!
//! # Cart (HTMX fragments, or 303 to /cart for plain form posts)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/update            - Set quantity, 0 removes (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! POST /cart/clear             - Empty the cart (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Auth (hosted identity provider)
//! GET  /sign-in[/{*rest}]      - Sign-in widget or redirect
//! GET  /sign-up[/{*rest}]      - Sign-up widget or redirect
//! ```

pub mod auth;
pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router,
    http::HeaderMap,
    routing::{get, post},
};

use crate::state::AppState;

/// Header HTMX sets on every request it issues.
const HX_REQUEST: &str = "hx-request";

/// Whether the request came from HTMX and expects a fragment.
pub(crate) fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get(HX_REQUEST)
        .is_some_and(|value| value.as_bytes() == b"true")
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the auth routes router.
///
/// Hosted flows append their own path segments (e.g. `/sign-in/factor-one`),
/// so each page also answers on a catch-all.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/sign-in", get(auth::sign_in))
        .route("/sign-in/{*rest}", get(auth::sign_in))
        .route("/sign-up", get(auth::sign_up))
        .route("/sign-up/{*rest}", get(auth::sign_up))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Auth routes
        .merge(auth_routes())
}
