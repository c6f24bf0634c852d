//! Observable cart store.

use std::fmt;
use std::num::NonZeroU32;

use super::state::{CartItem, CartState};
use crate::types::{Price, Product, ProductId};

/// Callback invoked with the new cart snapshot after each change.
pub type CartObserver = Box<dyn Fn(&CartState) + Send + Sync>;

/// Handle returned by [`CartStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owns a [`CartState`] and exposes its mutations.
///
/// Every mutation returns whether the cart changed. Observers are notified
/// only for changes; a no-op such as removing a product that is not in the
/// cart leaves observers untouched.
///
/// # Example
///
/// ```rust
/// # use vitrine_core::{CartStore, CurrencyCode, Price, Product, ProductId};
/// let mug = Product::new(
///     ProductId::parse("mug").unwrap(),
///     "Mug",
///     Price::from_cents(1200, CurrencyCode::USD),
///     "/static/images/mug.jpg",
/// );
///
/// let mut cart = CartStore::new();
/// cart.add_item(mug.clone(), 2);
/// cart.add_item(mug, 3);
///
/// assert_eq!(cart.items().len(), 1);
/// assert_eq!(cart.item_count(), 5);
/// assert_eq!(cart.subtotal().display(), "$60.00");
/// ```
#[derive(Default)]
pub struct CartStore {
    state: CartState,
    observers: Vec<(SubscriptionId, CartObserver)>,
    next_subscription: u64,
}

impl CartStore {
    /// Create a store holding an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that takes ownership of an existing cart snapshot.
    #[must_use]
    pub fn from_state(state: CartState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    /// Give the cart snapshot back, dropping all observers.
    #[must_use]
    pub fn into_state(self) -> CartState {
        self.state
    }

    /// Current cart snapshot.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        self.state.items()
    }

    /// Total number of units in the cart.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.state.item_count()
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.state.subtotal()
    }

    /// Register an observer.
    ///
    /// The observer is not called with the current state; it only sees
    /// snapshots produced by later mutations.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: Fn(&CartState) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Add `quantity` units of a product.
    ///
    /// If the product is already in the cart its quantity grows (saturating
    /// at `u32::MAX`); otherwise a new line is appended. Adding zero units
    /// does nothing.
    pub fn add_item(&mut self, product: Product, quantity: u32) -> bool {
        let Some(quantity) = NonZeroU32::new(quantity) else {
            return false;
        };

        match self.state.position(&product.id) {
            Some(index) => {
                let Some(item) = self.state.items_mut().get_mut(index) else {
                    return false;
                };
                let updated = item.quantity.saturating_add(quantity.get());
                if updated == item.quantity {
                    return false;
                }
                item.quantity = updated;
            }
            None => self.state.items_mut().push(CartItem { product, quantity }),
        }

        self.notify();
        true
    }

    /// Remove a product's line. Removing an absent product does nothing.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let Some(index) = self.state.position(product_id) else {
            return false;
        };
        self.state.items_mut().remove(index);
        self.notify();
        true
    }

    /// Replace a product's quantity. Zero removes the line.
    ///
    /// Does nothing if the product is not in the cart.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        let Some(quantity) = NonZeroU32::new(quantity) else {
            return self.remove_item(product_id);
        };

        let Some(item) = self
            .state
            .items_mut()
            .iter_mut()
            .find(|item| &item.product.id == product_id)
        else {
            return false;
        };

        if item.quantity == quantity {
            return false;
        }
        item.quantity = quantity;
        self.notify();
        true
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) -> bool {
        if self.state.is_empty() {
            return false;
        }
        self.state.items_mut().clear();
        self.notify();
        true
    }

    fn notify(&self) {
        for (_, observer) in &self.observers {
            observer(&self.state);
        }
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::types::CurrencyCode;

    fn product(id: &str, cents: i64) -> Product {
        Product::new(
            ProductId::parse(id).unwrap(),
            format!("Product {id}"),
            Price::from_cents(cents, CurrencyCode::USD),
            format!("/static/images/{id}.jpg"),
        )
    }

    fn id(value: &str) -> ProductId {
        ProductId::parse(value).unwrap()
    }

    #[test]
    fn test_repeated_adds_merge_into_one_line() {
        let a = product("a", 1000);
        let mut cart = CartStore::new();

        assert!(cart.add_item(a.clone(), 2));
        assert!(cart.add_item(a.clone(), 3));

        assert_eq!(cart.items().len(), 1);
        let line = cart.state().get(&a.id).unwrap();
        assert_eq!(line.quantity(), 5);
        assert_eq!(cart.subtotal(), a.price.times(5));
    }

    #[test]
    fn test_adds_of_many_quantities_sum() {
        let a = product("a", 199);
        let mut cart = CartStore::new();
        for quantity in [1, 4, 2, 7] {
            cart.add_item(a.clone(), quantity);
        }
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 14);
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut cart = CartStore::new();
        assert!(!cart.add_item(product("a", 100), 0));
        assert!(cart.state().is_empty());
    }

    #[test]
    fn test_add_saturates_quantity() {
        let a = product("a", 1);
        let mut cart = CartStore::new();
        cart.add_item(a.clone(), u32::MAX - 1);
        assert!(cart.add_item(a.clone(), 5));
        assert_eq!(cart.item_count(), u32::MAX);
        assert!(!cart.add_item(a, 1));
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let mut cart = CartStore::new();
        cart.add_item(product("b", 100), 1);
        cart.add_item(product("a", 100), 1);
        cart.add_item(product("b", 100), 1);

        let ids: Vec<&str> = cart.items().iter().map(|i| i.product.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_clear_cart_empties() {
        let mut cart = CartStore::new();
        cart.add_item(product("a", 100), 1);
        cart.add_item(product("b", 250), 2);

        assert!(cart.clear_cart());
        assert!(cart.items().is_empty());
        assert_eq!(cart.item_count(), 0);

        // Clearing an empty cart still leaves it empty
        assert!(!cart.clear_cart());
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = CartStore::new();
        cart.add_item(product("a", 100), 1);
        cart.add_item(product("b", 100), 1);

        assert!(cart.remove_item(&id("a")));
        let after_first = cart.state().clone();
        assert!(!cart.remove_item(&id("a")));
        assert_eq!(cart.state(), &after_first);
    }

    #[test]
    fn test_remove_absent_leaves_cart_unchanged() {
        let mut cart = CartStore::new();
        cart.add_item(product("a", 100), 1);
        let before = cart.state().clone();

        assert!(!cart.remove_item(&id("c")));
        assert_eq!(cart.state(), &before);
    }

    #[test]
    fn test_set_quantity_zero_matches_remove() {
        let mut removed = CartStore::new();
        let mut zeroed = CartStore::new();
        for cart in [&mut removed, &mut zeroed] {
            cart.add_item(product("a", 100), 3);
            cart.add_item(product("b", 500), 1);
        }

        removed.remove_item(&id("a"));
        zeroed.set_quantity(&id("a"), 0);

        assert_eq!(removed.state(), zeroed.state());
    }

    #[test]
    fn test_set_quantity_updates_and_ignores_absent() {
        let mut cart = CartStore::new();
        cart.add_item(product("a", 100), 3);

        assert!(cart.set_quantity(&id("a"), 7));
        assert_eq!(cart.item_count(), 7);
        assert!(!cart.set_quantity(&id("a"), 7));
        assert!(!cart.set_quantity(&id("missing"), 2));
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_subtotal_sums_line_totals() {
        let mut cart = CartStore::new();
        cart.add_item(product("a", 1050), 2);
        cart.add_item(product("b", 399), 3);

        assert_eq!(
            cart.subtotal(),
            Price::from_cents(1050 * 2 + 399 * 3, CurrencyCode::USD)
        );
        assert_eq!(cart.subtotal().display(), "$32.97");
    }

    #[test]
    fn test_add_then_remove_restores_subtotal() {
        let mut cart = CartStore::new();
        cart.add_item(product("a", 1000), 1);
        let before = cart.subtotal();

        cart.add_item(product("b", 725), 4);
        cart.remove_item(&id("b"));

        assert_eq!(cart.subtotal(), before);
    }

    #[test]
    fn test_empty_subtotal_is_zero() {
        let cart = CartStore::new();
        assert_eq!(cart.subtotal(), Price::zero(CurrencyCode::USD));
    }

    #[test]
    fn test_empty_subtotal_uses_given_currency() {
        let cart = CartStore::new();
        assert_eq!(
            cart.state().subtotal_in(CurrencyCode::BRL).display(),
            "R$0.00"
        );

        let mut cart = CartStore::new();
        cart.add_item(product("a", 100), 1);
        assert_eq!(
            cart.state().subtotal_in(CurrencyCode::BRL),
            Price::from_cents(100, CurrencyCode::USD)
        );
    }

    #[test]
    fn test_subtotal_saturates_on_huge_lines() {
        let huge = |id: &str| {
            Product::new(
                ProductId::parse(id).unwrap(),
                "Huge",
                Price::new(rust_decimal::Decimal::MAX, CurrencyCode::USD),
                "/static/images/huge.jpg",
            )
        };
        let mut cart = CartStore::new();
        cart.add_item(huge("a"), u32::MAX);
        cart.add_item(huge("b"), u32::MAX);

        assert_eq!(cart.subtotal().amount, rust_decimal::Decimal::MAX);
    }

    #[test]
    fn test_observers_see_each_change() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut cart = CartStore::new();
        let sink = Arc::clone(&seen);
        cart.subscribe(move |state| sink.lock().unwrap().push(state.item_count()));

        cart.add_item(product("a", 100), 2);
        cart.add_item(product("a", 100), 1);
        cart.set_quantity(&id("a"), 1);
        cart.clear_cart();

        assert_eq!(*seen.lock().unwrap(), vec![2, 3, 1, 0]);
    }

    #[test]
    fn test_observers_skip_noops() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut cart = CartStore::new();
        let counter = Arc::clone(&calls);
        cart.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        cart.remove_item(&id("absent"));
        cart.set_quantity(&id("absent"), 3);
        cart.clear_cart();
        cart.add_item(product("a", 100), 0);

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut cart = CartStore::new();
        let counter = Arc::clone(&calls);
        let subscription = cart.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        cart.add_item(product("a", 100), 1);
        assert!(cart.unsubscribe(subscription));
        assert!(!cart.unsubscribe(subscription));
        cart.add_item(product("a", 100), 1);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_from_state_round_trips_snapshot() {
        let mut cart = CartStore::new();
        cart.add_item(product("a", 100), 2);
        let snapshot = cart.into_state();

        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: CartState = serde_json::from_str(&json).unwrap();
        let store = CartStore::from_state(restored);

        assert_eq!(store.state(), &snapshot);
    }

    #[test]
    fn test_zero_quantity_snapshot_is_rejected() {
        let json = r#"{"items":[{"product":{"id":"a","name":"A","price":{"amount":"1.00","currency_code":"USD"},"image":"/a.jpg"},"quantity":0}]}"#;
        assert!(serde_json::from_str::<CartState>(json).is_err());
    }
}
