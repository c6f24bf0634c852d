//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use crate::components::ProductCard;
use crate::filters;
use crate::services::cart::cart_count;
use crate::state::AppState;

/// Cards whose images load eagerly (first row on wide screens).
pub const ABOVE_THE_FOLD: usize = 3;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub cards: Vec<ProductCard>,
    pub cart_count: u32,
}

/// Display the home page with the full catalog grid.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    HomeTemplate {
        cards: ProductCard::grid(state.catalog().products(), ABOVE_THE_FOLD),
        cart_count: cart_count(&session).await,
    }
}
