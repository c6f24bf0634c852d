//! Sign-in and sign-up route handlers.
//!
//! The configured identity provider decides whether these pages embed its
//! widget or redirect to its hosted pages. No credentials pass through the
//! storefront.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::services::cart::cart_count;
use crate::services::identity::{EmbeddedWidget, HostedWidget};
use crate::state::AppState;

/// Page that mounts the provider's widget.
#[derive(Template, WebTemplate)]
#[template(path = "auth/hosted.html")]
pub struct AuthTemplate {
    pub widget: EmbeddedWidget,
    pub cart_count: u32,
}

async fn hand_off(widget: HostedWidget, session: &Session) -> Response {
    match widget {
        HostedWidget::Redirect { url } => Redirect::to(&url).into_response(),
        HostedWidget::Embedded(widget) => AuthTemplate {
            widget,
            cart_count: cart_count(session).await,
        }
        .into_response(),
    }
}

/// Display the sign-in page.
#[instrument(skip(state, session))]
pub async fn sign_in(State(state): State<AppState>, session: Session) -> Response {
    hand_off(state.identity().render_sign_in(), &session).await
}

/// Display the sign-up page.
#[instrument(skip(state, session))]
pub async fn sign_up(State(state): State<AppState>, session: Session) -> Response {
    hand_off(state.identity().render_sign_up(), &session).await
}
