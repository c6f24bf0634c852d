//! Hosted identity providers.
//!
//! Sign-in and sign-up are handled entirely by a third-party service. The
//! storefront only decides how to hand the visitor over: either by embedding
//! the provider's widget on `/sign-in` and `/sign-up`, or by redirecting to
//! the provider's hosted pages.
//!
//! Providers implement [`IdentityProvider`]; the one in use is chosen from
//! configuration by [`from_config`], and the auth pages never name a
//! concrete provider.

mod clerk;
mod hosted;

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

pub use clerk::ClerkProvider;
pub use hosted::HostedPagesProvider;

use crate::config::{IdentityConfig, StorefrontConfig};

/// Local route for the sign-in page.
pub const SIGN_IN_PATH: &str = "/sign-in";

/// Local route for the sign-up page.
pub const SIGN_UP_PATH: &str = "/sign-up";

/// Where visitors land after authenticating.
pub const AFTER_AUTH_PATH: &str = "/";

/// Errors that can occur while building an identity provider.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("invalid publishable key: {0}")]
    InvalidPublishableKey(String),
}

/// Which hosted flow a widget renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetMount {
    SignIn,
    SignUp,
}

impl WidgetMount {
    /// Identifier used by the widget mount script.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SignIn => "sign-in",
            Self::SignUp => "sign-up",
        }
    }

    /// Page title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::SignIn => "Sign in",
            Self::SignUp => "Create an account",
        }
    }

    /// Route of the opposite flow, linked from inside the widget.
    #[must_use]
    pub const fn cross_link(&self) -> &'static str {
        match self {
            Self::SignIn => SIGN_UP_PATH,
            Self::SignUp => SIGN_IN_PATH,
        }
    }
}

/// Widget embedded in a local page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedWidget {
    /// Provider name, read by the mount script.
    pub provider: &'static str,
    /// Provider script loaded on the page.
    pub script_src: String,
    /// Public key identifying the storefront to the provider.
    pub publishable_key: String,
    pub mount: WidgetMount,
    /// Local route of the opposite flow.
    pub cross_link: &'static str,
    pub after_auth_url: &'static str,
}

/// How an auth page hands the visitor to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostedWidget {
    /// Render a local page that mounts the provider's widget.
    Embedded(EmbeddedWidget),
    /// Send the visitor to the provider's hosted page.
    Redirect { url: String },
}

/// A hosted identity provider.
pub trait IdentityProvider: fmt::Debug + Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &'static str;

    /// Origin the provider's scripts, frames and API calls come from.
    ///
    /// Added to the Content Security Policy. `None` when nothing from the
    /// provider runs on storefront pages.
    fn origin(&self) -> Option<String>;

    /// Hand-off for the sign-in page.
    fn render_sign_in(&self) -> HostedWidget;

    /// Hand-off for the sign-up page.
    fn render_sign_up(&self) -> HostedWidget;
}

/// Build the provider selected in configuration.
///
/// # Errors
///
/// Returns `IdentityError` if the provider settings are invalid.
pub fn from_config(config: &StorefrontConfig) -> Result<Arc<dyn IdentityProvider>, IdentityError> {
    let provider: Arc<dyn IdentityProvider> = match &config.identity {
        IdentityConfig::Clerk { publishable_key } => Arc::new(ClerkProvider::new(publishable_key)?),
        IdentityConfig::Hosted {
            sign_in_url,
            sign_up_url,
        } => Arc::new(HostedPagesProvider::new(
            sign_in_url.clone(),
            sign_up_url.clone(),
            &config.base_url,
        )),
    };

    tracing::info!(provider = provider.name(), "identity provider configured");
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_links_point_at_each_other() {
        assert_eq!(WidgetMount::SignIn.cross_link(), "/sign-up");
        assert_eq!(WidgetMount::SignUp.cross_link(), "/sign-in");
    }
}
