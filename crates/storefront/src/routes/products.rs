//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tower_sessions::Session;
use tracing::instrument;
use vitrine_core::ProductId;

use crate::components::{AddToCartButton, ImageHints, ProductCard, ProductImage};
use crate::error::{AppError, Result};
use crate::filters;
use crate::routes::home::ABOVE_THE_FOLD;
use crate::services::cart::cart_count;
use crate::state::AppState;

/// Product display data for the detail page.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub description: Option<String>,
    pub image: ProductImage,
    pub add_to_cart: AddToCartButton,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub cards: Vec<ProductCard>,
    pub cart_count: u32,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
    pub cart_count: u32,
}

/// Display product listing page.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    ProductsIndexTemplate {
        cards: ProductCard::grid(state.catalog().products(), ABOVE_THE_FOLD),
        cart_count: cart_count(&session).await,
    }
}

/// Display product detail page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let product = ProductId::parse(&id)
        .ok()
        .and_then(|id| state.catalog().get(&id))
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let view = ProductView {
        id: product.id.to_string(),
        name: product.name.clone(),
        price: product.price.display(),
        description: product.description.clone(),
        image: ProductImage::new(
            product,
            ImageHints {
                fill: false,
                priority: true,
            },
        ),
        add_to_cart: AddToCartButton::new(&product.id).with_quantity_input(),
    };

    Ok(ProductShowTemplate {
        product: view,
        cart_count: cart_count(&session).await,
    })
}
