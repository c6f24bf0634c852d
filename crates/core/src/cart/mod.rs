//! Shopping cart state and the observable cart store.
//!
//! [`CartState`] is the plain, serializable snapshot of a cart. [`CartStore`]
//! owns one state and is the only way to mutate it; observers subscribed to
//! the store receive the new snapshot after every change.

mod state;
mod store;

pub use state::{CartItem, CartState};
pub use store::{CartObserver, CartStore, SubscriptionId};
