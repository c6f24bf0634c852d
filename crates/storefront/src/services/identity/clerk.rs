//! Clerk embedded widgets.
//!
//! A Clerk publishable key is `pk_test_` or `pk_live_` followed by the
//! base64-encoded frontend API host terminated with `$`, e.g.
//! `pk_test_Y2xlcmsuZXhhbXBsZS5jb20k` decodes to `clerk.example.com$`. The
//! browser bundle is served from that host.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use super::{
    AFTER_AUTH_PATH, EmbeddedWidget, HostedWidget, IdentityError, IdentityProvider, WidgetMount,
};

const KEY_PREFIXES: [&str; 2] = ["pk_test_", "pk_live_"];

/// Clerk keys are emitted with and without padding.
const KEY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Major version of clerk-js loaded in the browser.
const CLERK_JS_MAJOR: u32 = 5;

/// Embeds Clerk's `<SignIn>` / `<SignUp>` components.
#[derive(Debug, Clone)]
pub struct ClerkProvider {
    publishable_key: String,
    frontend_api: String,
}

impl ClerkProvider {
    /// Create a provider from a publishable key.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::InvalidPublishableKey` if the key is not a
    /// well-formed Clerk publishable key.
    pub fn new(publishable_key: &str) -> Result<Self, IdentityError> {
        let frontend_api = decode_frontend_api(publishable_key)?;
        Ok(Self {
            publishable_key: publishable_key.to_string(),
            frontend_api,
        })
    }

    /// Host of the Clerk frontend API.
    #[must_use]
    pub fn frontend_api(&self) -> &str {
        &self.frontend_api
    }

    fn widget(&self, mount: WidgetMount) -> HostedWidget {
        HostedWidget::Embedded(EmbeddedWidget {
            provider: "clerk",
            script_src: format!(
                "https://{}/npm/@clerk/clerk-js@{CLERK_JS_MAJOR}/dist/clerk.browser.js",
                self.frontend_api
            ),
            publishable_key: self.publishable_key.clone(),
            mount,
            cross_link: mount.cross_link(),
            after_auth_url: AFTER_AUTH_PATH,
        })
    }
}

impl IdentityProvider for ClerkProvider {
    fn name(&self) -> &'static str {
        "clerk"
    }

    fn origin(&self) -> Option<String> {
        Some(format!("https://{}", self.frontend_api))
    }

    fn render_sign_in(&self) -> HostedWidget {
        self.widget(WidgetMount::SignIn)
    }

    fn render_sign_up(&self) -> HostedWidget {
        self.widget(WidgetMount::SignUp)
    }
}

/// Extract the frontend API host from a publishable key.
fn decode_frontend_api(publishable_key: &str) -> Result<String, IdentityError> {
    let invalid = |reason: &str| IdentityError::InvalidPublishableKey(reason.to_string());

    let encoded = KEY_PREFIXES
        .iter()
        .find_map(|prefix| publishable_key.strip_prefix(prefix))
        .ok_or_else(|| invalid("must start with pk_test_ or pk_live_"))?;

    let decoded = KEY_ENGINE
        .decode(encoded)
        .map_err(|_| invalid("key body is not base64"))?;
    let decoded = String::from_utf8(decoded).map_err(|_| invalid("key body is not UTF-8"))?;

    let host = decoded
        .strip_suffix('$')
        .ok_or_else(|| invalid("key body must end with '$'"))?;

    if host.is_empty()
        || !host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'))
    {
        return Err(invalid("key does not encode a hostname"));
    }

    Ok(host.to_string())
}
