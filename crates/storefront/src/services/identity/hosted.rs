//! Redirect-based hosted pages.
//!
//! For providers that only offer hosted sign-in / sign-up pages (an
//! "account portal"), the local auth routes just redirect. The provider is
//! told where to send the visitor afterwards through a `redirect_url`
//! query parameter.

use url::Url;

use super::{AFTER_AUTH_PATH, HostedWidget, IdentityProvider};

/// Redirects to externally hosted sign-in and sign-up pages.
#[derive(Debug, Clone)]
pub struct HostedPagesProvider {
    sign_in_url: Url,
    sign_up_url: Url,
}

impl HostedPagesProvider {
    /// Create a provider for the given hosted pages.
    ///
    /// `base_url` is the storefront's public URL; visitors return to its
    /// landing page after authenticating.
    #[must_use]
    pub fn new(sign_in_url: Url, sign_up_url: Url, base_url: &str) -> Self {
        let return_to = format!("{}{AFTER_AUTH_PATH}", base_url.trim_end_matches('/'));
        Self {
            sign_in_url: with_return_to(sign_in_url, &return_to),
            sign_up_url: with_return_to(sign_up_url, &return_to),
        }
    }
}

fn with_return_to(mut url: Url, return_to: &str) -> Url {
    url.query_pairs_mut().append_pair("redirect_url", return_to);
    url
}

impl IdentityProvider for HostedPagesProvider {
    fn name(&self) -> &'static str {
        "hosted"
    }

    fn origin(&self) -> Option<String> {
        None
    }

    fn render_sign_in(&self) -> HostedWidget {
        HostedWidget::Redirect {
            url: self.sign_in_url.to_string(),
        }
    }

    fn render_sign_up(&self) -> HostedWidget {
        HostedWidget::Redirect {
            url: self.sign_up_url.to_string(),
        }
    }
}
