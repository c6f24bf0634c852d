//! Domain models for storefront.
//!
//! Catalog and cart types live in `vitrine_core`; this module only holds
//! storefront-specific session data.

pub mod session;

pub use session::keys as session_keys;
