//! Cart route handlers.
//!
//! Cart operations use HTMX for in-place updates. Each visitor's cart lives
//! in their session; see [`SessionCart`]. Plain form posts (no JavaScript)
//! are answered with a redirect to the cart page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Deserializer};
use tower_sessions::Session;
use tracing::instrument;
use vitrine_core::{CartItem, CartState, CurrencyCode, ProductId};

use crate::components::{ClearCartButton, ImageHints, ProductImage};
use crate::components::product_card::product_href;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::routes::is_htmx;
use crate::services::cart::{SessionCart, cart_count};
use crate::state::AppState;

/// HTMX event fired after any cart change so badges refresh.
const CART_UPDATED_TRIGGER: (&str, &str) = ("HX-Trigger", "cart-updated");

/// Cart page route.
const CART_PATH: &str = "/cart";

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: String,
    pub href: String,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: ProductImage,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
    pub clear: ClearCartButton,
}

impl CartView {
    /// Build the view; an empty cart's subtotal is shown in `currency`.
    #[must_use]
    pub fn new(cart: &CartState, currency: CurrencyCode) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: cart.subtotal_in(currency).display(),
            item_count: cart.item_count(),
            clear: ClearCartButton::default(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product.id.to_string(),
            href: product_href(&item.product),
            name: item.product.name.clone(),
            quantity: item.quantity(),
            price: item.product.price.display(),
            line_price: item.line_total().display(),
            image: ProductImage::new(&item.product, ImageHints::default()),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Deserialize an empty form field as `None`.
///
/// Number inputs the visitor has cleared are submitted as `quantity=`.
fn empty_string_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Clamp a submitted quantity into the store's range; negatives become zero.
fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(0)).unwrap_or(u32::MAX)
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    /// Defaults to 1 when absent or empty.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub quantity: Option<i64>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    /// Zero or less removes the line; empty leaves it unchanged.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub quantity: Option<i64>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

fn parse_product_id(raw: &str) -> Result<ProductId> {
    ProductId::parse(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub cart_count: u32,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Respond to a cart mutation: fragment for HTMX, redirect otherwise.
fn mutation_response(
    state: &AppState,
    headers: &HeaderMap,
    cart: &CartState,
    changed: bool,
) -> Response {
    if !is_htmx(headers) {
        return Redirect::to(CART_PATH).into_response();
    }

    let fragment = CartItemsTemplate {
        cart: CartView::new(cart, state.catalog().currency()),
    };
    if changed {
        (AppendHeaders([CART_UPDATED_TRIGGER]), fragment).into_response()
    } else {
        fragment.into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let cart = SessionCart::load(&session).await?;
    let snapshot = cart.store().state();

    Ok(CartShowTemplate {
        cart: CartView::new(snapshot, state.catalog().currency()),
        cart_count: snapshot.item_count(),
    })
}

/// Add item to cart.
///
/// Unknown products are a 404. Returns the updated count badge to HTMX.
#[instrument(skip(state, session, headers))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product_id = parse_product_id(&form.product_id)?;
    let product = state
        .catalog()
        .get(&product_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;
    let quantity = form.quantity.map_or(1, clamp_quantity);

    let mut cart = SessionCart::load(&session).await?;
    let changed = cart.store_mut().add_item(product, quantity);
    if changed {
        add_breadcrumb(
            "cart",
            "Added item to cart",
            Some(&[("product_id", product_id.as_str())]),
        );
    }
    let cart = cart.save().await?;

    if !is_htmx(&headers) {
        return Ok(Redirect::to(CART_PATH).into_response());
    }

    let badge = CartCountTemplate {
        count: cart.item_count(),
    };
    if changed {
        Ok((AppendHeaders([CART_UPDATED_TRIGGER]), badge).into_response())
    } else {
        Ok(badge.into_response())
    }
}

/// Update cart item quantity.
///
/// Zero or less removes the item; absent items and empty quantities are ignored.
#[instrument(skip(state, session, headers))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let product_id = parse_product_id(&form.product_id)?;

    let mut cart = SessionCart::load(&session).await?;
    let changed = form.quantity.is_some_and(|quantity| {
        cart.store_mut()
            .set_quantity(&product_id, clamp_quantity(quantity))
    });
    let cart = cart.save().await?;

    Ok(mutation_response(&state, &headers, &cart, changed))
}

/// Remove item from cart. Removing an absent item is not an error.
#[instrument(skip(state, session, headers))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let product_id = parse_product_id(&form.product_id)?;

    let mut cart = SessionCart::load(&session).await?;
    let changed = cart.store_mut().remove_item(&product_id);
    if changed {
        add_breadcrumb(
            "cart",
            "Removed item from cart",
            Some(&[("product_id", product_id.as_str())]),
        );
    }
    let cart = cart.save().await?;

    Ok(mutation_response(&state, &headers, &cart, changed))
}

/// Empty the cart.
#[instrument(skip(state, session, headers))]
pub async fn clear(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response> {
    let mut cart = SessionCart::load(&session).await?;
    let changed = cart.store_mut().clear_cart();
    if changed {
        add_breadcrumb("cart", "Cleared cart", None);
    }
    let cart = cart.save().await?;

    Ok(mutation_response(&state, &headers, &cart, changed))
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    CartCountTemplate {
        count: cart_count(&session).await,
    }
}
