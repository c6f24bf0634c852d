//! Security headers middleware for XSS, clickjacking, and isolation protection.
//!
//! Starts locked down. The only relaxation is the identity provider's
//! origin, which must be able to serve scripts, frames, images and API
//! calls for the embedded sign-in / sign-up widget.

use axum::{
    extract::{Request, State},
    http::{
        HeaderName, HeaderValue,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
            X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

use crate::state::AppState;

/// Policy used if the configured one cannot be encoded as a header.
const FALLBACK_POLICY: &str = "default-src 'none'; \
     script-src 'self'; \
     style-src 'self'; \
     img-src 'self'; \
     connect-src 'self'; \
     form-action 'self'; \
     frame-ancestors 'none'";

/// Build the Content Security Policy.
///
/// ```text
/// default-src 'none';
/// script-src 'self' <provider>;
/// style-src 'self' 'unsafe-inline';     ('unsafe-inline' only with a provider)
/// font-src 'self';
/// img-src 'self' https: data:;
/// connect-src 'self' <provider>;
/// frame-src <provider> | 'none';
/// worker-src 'self' blob:;
/// object-src 'none';
/// base-uri 'self';
/// form-action 'self';
/// frame-ancestors 'none'
/// ```
///
/// Product images may come from any HTTPS CDN, hence `img-src https:`.
#[must_use]
pub fn content_security_policy(provider_origin: Option<&str>) -> String {
    let (script, style, connect, frame, worker) = match provider_origin {
        Some(origin) => (
            format!("'self' {origin}"),
            // Provider widgets inject their own styles
            "'self' 'unsafe-inline'".to_string(),
            format!("'self' {origin}"),
            origin.to_string(),
            "'self' blob:",
        ),
        None => (
            "'self'".to_string(),
            "'self'".to_string(),
            "'self'".to_string(),
            "'none'".to_string(),
            "'self'",
        ),
    };

    format!(
        "default-src 'none'; \
         script-src {script}; \
         style-src {style}; \
         font-src 'self'; \
         img-src 'self' https: data:; \
         connect-src {connect}; \
         frame-src {frame}; \
         worker-src {worker}; \
         object-src 'none'; \
         base-uri 'self'; \
         form-action 'self'; \
         frame-ancestors 'none'"
    )
}

/// Add security headers to all responses.
///
/// Headers applied:
/// - `X-Frame-Options: DENY` - Prevent clickjacking
/// - `X-Content-Type-Options: nosniff` - Prevent MIME sniffing
/// - `Referrer-Policy: strict-origin-when-cross-origin` - Hosted auth flows need the origin
/// - `Content-Security-Policy` - See [`content_security_policy`]
/// - `Permissions-Policy` - Deny sensitive features
/// - `Cache-Control: no-store` - Pages carry per-visitor cart state
/// - `Cross-Origin-Opener-Policy: same-origin-allow-popups` - OAuth popups from the widget
pub async fn security_headers_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(
        REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    let policy = HeaderValue::from_str(state.content_security_policy()).unwrap_or_else(|e| {
        tracing::warn!("Invalid Content-Security-Policy, using fallback: {e}");
        HeaderValue::from_static(FALLBACK_POLICY)
    });
    headers.insert(CONTENT_SECURITY_POLICY, policy);

    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static(
            "accelerometer=(), \
             camera=(), \
             display-capture=(), \
             geolocation=(), \
             gyroscope=(), \
             magnetometer=(), \
             microphone=(), \
             payment=(), \
             usb=()",
        ),
    );

    if !headers.contains_key(CACHE_CONTROL) {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store, max-age=0"));
    }

    headers.insert(
        HeaderName::from_static("cross-origin-opener-policy"),
        HeaderValue::from_static("same-origin-allow-popups"),
    );

    response
}
