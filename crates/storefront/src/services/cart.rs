//! Session-backed cart.
//!
//! Each visitor's cart snapshot lives in their session. A request loads the
//! snapshot into a [`CartStore`], mutates it, and calls [`SessionCart::save`]
//! to write the new snapshot back. Persistence is wired in as a store
//! observer, so only requests that actually changed the cart touch the
//! session.

use std::sync::{Arc, Mutex};

use tower_sessions::Session;
use vitrine_core::{CartState, CartStore};

use crate::models::session_keys;

/// Latest snapshot published by the store, waiting to be written back.
type PendingSnapshot = Arc<Mutex<Option<CartState>>>;

/// A visitor's cart for the duration of one request.
pub struct SessionCart<'a> {
    session: &'a Session,
    store: CartStore,
    pending: PendingSnapshot,
}

impl<'a> SessionCart<'a> {
    /// Load the visitor's cart from the session (empty if none yet).
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn load(session: &'a Session) -> Result<Self, tower_sessions::session::Error> {
        let state = session
            .get::<CartState>(session_keys::CART)
            .await?
            .unwrap_or_default();

        let mut store = CartStore::from_state(state);

        let pending: PendingSnapshot = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&pending);
        store.subscribe(move |state| {
            if let Ok(mut slot) = sink.lock() {
                *slot = Some(state.clone());
            }
        });
        store.subscribe(|state| {
            tracing::debug!(
                lines = state.line_count(),
                items = state.item_count(),
                subtotal = %state.subtotal(),
                "cart updated"
            );
        });

        Ok(Self {
            session,
            store,
            pending,
        })
    }

    /// Read access to the cart.
    #[must_use]
    pub const fn store(&self) -> &CartStore {
        &self.store
    }

    /// Mutable access to the cart.
    pub const fn store_mut(&mut self) -> &mut CartStore {
        &mut self.store
    }

    /// Write any change back to the session and return the final snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub async fn save(self) -> Result<CartState, tower_sessions::session::Error> {
        let changed = self.pending.lock().ok().and_then(|mut slot| slot.take());

        if let Some(state) = &changed {
            self.session.insert(session_keys::CART, state).await?;
        }

        Ok(self.store.into_state())
    }
}

/// Number of units in the visitor's cart, for the header badge.
///
/// Session read failures are logged and reported as an empty cart.
pub async fn cart_count(session: &Session) -> u32 {
    match session.get::<CartState>(session_keys::CART).await {
        Ok(state) => state.map_or(0, |cart| cart.item_count()),
        Err(e) => {
            tracing::warn!("Failed to read cart from session: {e}");
            0
        }
    }
}
