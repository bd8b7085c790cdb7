//! # Cart State
//!
//! The cart engine: reducer + durable store + notifications.
//!
//! ## Thread Safety
//! The engine itself is synchronous and `&mut self`. [`CartState`] wraps it
//! in a `Mutex` so async commands can share it; every transition runs to
//! completion while the lock is held.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Engine Operations                               │
//! │                                                                         │
//! │  Operation            Reducer Action        Store            Toast     │
//! │  ─────────            ──────────────        ─────            ─────     │
//! │                                                                         │
//! │  (startup) ─────────► LoadFromStore ◄────── get("cart")                │
//! │                                                                         │
//! │  add_item() ────────► AddToCart ──────────► set("cart")      success   │
//! │    unavailable ──────────────────────────────────────────►  destructive│
//! │                                                                         │
//! │  remove_item() ─────► RemoveFromCart ─────► set("cart")      success*  │
//! │                                                                         │
//! │  set_quantity() ────► UpdateQuantity ─────► set("cart")      -         │
//! │                                                                         │
//! │  clear() ───────────► ClearCart ──────────► remove("cart")   -         │
//! │                                                                         │
//! │  * only when an entry was actually removed                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Store failures are logged and never surface to callers; the in-memory
//! cart stays authoritative for the rest of the session.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, error, info};

use bite_core::pricing::{OrderTotals, PricingRules};
use bite_core::{reduce, Cart, CartAction, CartEntry, CatalogItem, Money};
use bite_store::CartRepository;

use crate::notify::Notifier;

// =============================================================================
// Engine
// =============================================================================

/// Owns the cart for one storefront session.
pub struct CartEngine {
    cart: Cart,
    repo: CartRepository,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for CartEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartEngine")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

impl CartEngine {
    /// Rehydrates the cart from the store.
    ///
    /// Persisted entries are loaded as-is, without checking them against the
    /// current menu. Malformed data has already been discarded by the
    /// repository; a failing backend starts the session with an empty cart.
    pub fn open(repo: CartRepository, notifier: Arc<dyn Notifier>) -> Self {
        let entries = repo.load().unwrap_or_else(|e| {
            error!(error = %e, "Failed to read persisted cart");
            Vec::new()
        });

        let cart = reduce(Cart::default(), CartAction::LoadFromStore { entries });
        info!(
            entries = cart.entries().len(),
            total_items = cart.total_items(),
            "Cart engine ready"
        );

        CartEngine {
            cart,
            repo,
            notifier,
        }
    }

    /// Adds `quantity` of `item`.
    ///
    /// ## Behavior
    /// - Unavailable item: nothing changes, a destructive toast is emitted
    /// - `quantity <= 0`: nothing changes
    /// - Item already in cart: its quantity grows (saturating), its
    ///   instructions stay; no toast if it was already at the limit
    /// - Otherwise: a new entry is appended
    pub fn add_item(
        &mut self,
        item: &CatalogItem,
        quantity: i64,
        special_instructions: Option<String>,
    ) -> &Cart {
        if !item.is_available {
            debug!(item_id = %item.id, "Rejected unavailable item");
            self.notifier.destructive(
                "Item Unavailable",
                &format!("{} is currently not available.", item.name),
            );
            return &self.cart;
        }

        if quantity <= 0 {
            debug!(item_id = %item.id, quantity, "Ignored non-positive add");
            return &self.cart;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let special_instructions = special_instructions
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let added = self.dispatch(CartAction::add(item.clone(), quantity, special_instructions));
        if added {
            self.notifier.success(
                "Added to Cart",
                &format!("{} has been added to your cart.", item.name),
            );
        } else {
            debug!(item_id = %item.id, "Quantity already at its limit");
        }

        &self.cart
    }

    /// Removes the entry with this id. Unknown ids are ignored.
    pub fn remove_item(&mut self, entry_id: &str) -> &Cart {
        let removed = self.dispatch(CartAction::RemoveFromCart {
            entry_id: entry_id.to_string(),
        });

        if removed {
            self.notifier
                .success("Removed from Cart", "Item has been removed from your cart.");
        }

        &self.cart
    }

    /// Overwrites an entry's quantity; `quantity <= 0` removes it.
    pub fn set_quantity(&mut self, entry_id: &str, quantity: i64) -> &Cart {
        self.dispatch(CartAction::UpdateQuantity {
            entry_id: entry_id.to_string(),
            quantity,
        });
        &self.cart
    }

    /// Empties the cart and deletes the stored key.
    pub fn clear(&mut self) -> &Cart {
        self.cart = reduce(std::mem::take(&mut self.cart), CartAction::ClearCart);

        if let Err(e) = self.repo.evict() {
            error!(error = %e, "Failed to evict persisted cart");
        }

        debug!("Cart cleared");
        &self.cart
    }

    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.cart.quantity_of(item_id)
    }

    pub fn snapshot(&self) -> &Cart {
        &self.cart
    }

    pub fn entries(&self) -> &[CartEntry] {
        self.cart.entries()
    }

    pub fn total_items(&self) -> u64 {
        self.cart.total_items()
    }

    pub fn total_amount(&self) -> Money {
        self.cart.total_amount()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Runs one reducer step and persists if the cart changed.
    ///
    /// Returns whether anything changed.
    fn dispatch(&mut self, action: CartAction) -> bool {
        let next = reduce(self.cart.clone(), action);
        if next == self.cart {
            return false;
        }

        self.cart = next;
        if let Err(e) = self.repo.save(self.cart.entries()) {
            error!(error = %e, "Failed to persist cart");
        }
        true
    }
}

// =============================================================================
// Shared State
// =============================================================================

/// Application-owned cart container.
#[derive(Debug)]
pub struct CartState {
    engine: Mutex<CartEngine>,
}

impl CartState {
    pub fn new(engine: CartEngine) -> Self {
        CartState {
            engine: Mutex::new(engine),
        }
    }

    /// Executes a function with read access to the engine.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let empty = cart_state.with_engine(|engine| engine.is_empty());
    /// ```
    pub fn with_engine<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartEngine) -> R,
    {
        f(&self.lock())
    }

    /// Executes a function with write access to the engine.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_engine_mut(|engine| engine.clear().is_empty());
    /// ```
    pub fn with_engine_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartEngine) -> R,
    {
        f(&mut self.lock())
    }

    /// Every engine method leaves the cart consistent before it can panic,
    /// so a poisoned lock is still safe to reuse.
    fn lock(&self) -> MutexGuard<'_, CartEngine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Cart contents plus checkout totals, as shown on the cart page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub entries: Vec<CartEntry>,
    pub total_items: u64,
    pub total_amount: Money,
    pub totals: OrderTotals,
}

impl CartResponse {
    pub fn new(cart: &Cart, rules: &PricingRules) -> Self {
        CartResponse {
            entries: cart.entries().to_vec(),
            total_items: cart.total_items(),
            total_amount: cart.total_amount(),
            totals: OrderTotals::from_subtotal(cart.total_amount(), rules),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use bite_core::NotificationKind;
    use bite_store::{DurableStore, MemoryStore, Storage, CART_KEY};

    fn item(id: &str, cents: i64) -> CatalogItem {
        CatalogItem::new(id, format!("Dish {}", id), Money::from_cents(cents))
    }

    struct Harness {
        backend: MemoryStore,
        notifier: RecordingNotifier,
        engine: CartEngine,
    }

    fn harness_with(backend: MemoryStore) -> Harness {
        let notifier = RecordingNotifier::new();
        let storage = Storage::with_store(backend.clone());
        let engine = CartEngine::open(storage.cart(), Arc::new(notifier.clone()));
        Harness {
            backend,
            notifier,
            engine,
        }
    }

    fn harness() -> Harness {
        harness_with(MemoryStore::new())
    }

    fn assert_totals_hold(cart: &Cart) {
        let items: u64 = cart.entries().iter().map(|e| e.quantity as u64).sum();
        let amount: Money = cart.entries().iter().map(|e| e.line_total()).sum();
        assert_eq!(cart.total_items(), items);
        assert_eq!(cart.total_amount(), amount);
        assert!(cart.entries().iter().all(|e| e.quantity > 0));
    }

    #[test]
    fn test_huge_quantity_saturates() {
        let mut h = harness();
        let pizza = item("p1", 999);

        let cart = h.engine.add_item(&pizza, i64::MAX, None);
        assert_eq!(cart.entries()[0].quantity, u32::MAX);
        assert_eq!(cart.total_items(), u32::MAX as u64);
        assert_eq!(cart.total_amount(), Money::from_cents(999 * u32::MAX as i64));
        assert_totals_hold(cart);
        assert_eq!(h.notifier.drain().len(), 1);

        let cart = h.engine.add_item(&pizza, 5, None);
        assert_eq!(cart.entries()[0].quantity, u32::MAX);
        assert!(h.notifier.all().is_empty());
    }

    #[test]
    fn test_open_discards_overflowing_record() {
        let backend = MemoryStore::new();
        let raw = r#"[{"id":"e1","item":{"id":"p1","name":"Gold Pizza","description":"","price":5000000000000000000,"image":"","category":"Pizza","isVegetarian":false,"isAvailable":true,"preparationTime":20},"quantity":2}]"#;
        backend.set(CART_KEY, raw).unwrap();

        let h = harness_with(backend);
        assert!(h.engine.is_empty());
        assert_eq!(h.engine.total_amount(), Money::zero());
        assert!(!h.backend.contains(CART_KEY));
    }

    #[test]
    fn test_add_new_item() {
        let mut h = harness();
        let cart = h.engine.add_item(&item("p1", 999), 1, None);

        assert_eq!(cart.entries().len(), 1);
        assert_eq!(cart.entries()[0].quantity, 1);
        assert_eq!(cart.total_amount(), Money::from_cents(999));

        let toast = h.notifier.last().unwrap();
        assert_eq!(toast.kind, NotificationKind::Success);
        assert_eq!(toast.title, "Added to Cart");
        assert_eq!(toast.message, "Dish p1 has been added to your cart.");
    }

    #[test]
    fn test_add_same_item_merges() {
        let mut h = harness();
        let p1 = item("p1", 999);

        h.engine.add_item(&p1, 1, None);
        let cart = h.engine.add_item(&p1, 2, None);

        assert_eq!(cart.entries().len(), 1);
        assert_eq!(cart.entries()[0].quantity, 3);
        assert_eq!(cart.total_amount(), Money::from_cents(2997));
        assert_eq!(h.engine.quantity_of("p1"), 3);
    }

    #[test]
    fn test_add_unavailable_item_is_rejected() {
        let mut h = harness();
        h.engine.add_item(&item("p1", 999), 1, None);
        let before = h.engine.snapshot().clone();

        let p2 = CatalogItem {
            is_available: false,
            ..item("p2", 500)
        };
        let cart = h.engine.add_item(&p2, 1, None);

        assert_eq!(cart, &before);
        let toast = h.notifier.last().unwrap();
        assert_eq!(toast.kind, NotificationKind::Destructive);
        assert_eq!(toast.title, "Item Unavailable");
        assert_eq!(toast.message, "Dish p2 is currently not available.");
    }

    #[test]
    fn test_add_non_positive_quantity_is_noop() {
        let mut h = harness();
        h.engine.add_item(&item("p1", 999), 0, None);
        h.engine.add_item(&item("p1", 999), -3, None);

        assert!(h.engine.is_empty());
        assert!(h.notifier.all().is_empty());
        assert!(!h.backend.contains(CART_KEY));
    }

    #[test]
    fn test_instructions_only_on_new_entries() {
        let mut h = harness();
        let p1 = item("p1", 999);

        h.engine.add_item(&p1, 1, Some("no onions".to_string()));
        h.engine.add_item(&p1, 1, Some("extra cheese".to_string()));

        assert_eq!(
            h.engine.entries()[0].special_instructions.as_deref(),
            Some("no onions")
        );
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut h = harness();
        h.engine.add_item(&item("p1", 999), 2, None);
        h.engine.add_item(&item("p2", 100), 1, None);
        let entry_id = h.engine.entries()[0].id.clone();
        h.notifier.drain();

        let cart = h.engine.set_quantity(&entry_id, 0);

        assert_eq!(cart.entries().len(), 1);
        assert_eq!(cart.total_items(), 1);
        assert!(h.notifier.all().is_empty());
    }

    #[test]
    fn test_set_quantity_overwrites() {
        let mut h = harness();
        h.engine.add_item(&item("p1", 999), 2, None);
        let entry_id = h.engine.entries()[0].id.clone();

        h.engine.set_quantity(&entry_id, 5);
        assert_eq!(h.engine.total_items(), 5);

        h.engine.set_quantity("missing", 9);
        assert_eq!(h.engine.total_items(), 5);
    }

    #[test]
    fn test_remove_notifies_only_on_change() {
        let mut h = harness();
        h.engine.add_item(&item("p1", 999), 1, None);
        let entry_id = h.engine.entries()[0].id.clone();
        h.notifier.drain();

        h.engine.remove_item("missing");
        assert!(h.notifier.all().is_empty());

        h.engine.remove_item(&entry_id);
        assert!(h.engine.is_empty());
        assert_eq!(h.notifier.drain()[0].title, "Removed from Cart");
    }

    #[test]
    fn test_every_change_is_persisted() {
        let mut h = harness();
        h.engine.add_item(&item("p1", 999), 2, Some("well done".to_string()));
        h.engine.add_item(&item("p2", 450), 1, None);

        let raw = h.backend.get(CART_KEY).unwrap().unwrap();
        let stored: Vec<CartEntry> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, h.engine.entries());
    }

    #[test]
    fn test_reopen_restores_entries() {
        let backend = MemoryStore::new();
        let mut first = harness_with(backend.clone());
        first.engine.add_item(&item("p1", 999), 2, None);
        first.engine.add_item(&item("p2", 450), 1, None);
        let expected = first.engine.snapshot().clone();
        drop(first);

        let second = harness_with(backend);
        assert_eq!(second.engine.snapshot(), &expected);
    }

    #[test]
    fn test_corrupt_store_starts_empty() {
        let backend = MemoryStore::new();
        backend.set(CART_KEY, "{not json").unwrap();

        let h = harness_with(backend);
        assert!(h.engine.is_empty());
        assert!(!h.backend.contains(CART_KEY));
    }

    #[test]
    fn test_clear_removes_key() {
        let mut h = harness();
        h.engine.add_item(&item("p1", 999), 1, None);
        assert!(h.backend.contains(CART_KEY));

        let cart = h.engine.clear();
        assert!(cart.is_empty());
        assert!(!h.backend.contains(CART_KEY));
    }

    #[test]
    fn test_totals_hold_after_every_step() {
        let mut h = harness();
        let dishes = [item("a", 1299), item("b", 349), item("c", 1)];

        for (i, dish) in dishes.iter().cycle().take(9).enumerate() {
            assert_totals_hold(h.engine.add_item(dish, (i % 3) as i64 + 1, None));
        }
        assert_eq!(h.engine.entries().len(), 3);

        let ids: Vec<String> = h.engine.entries().iter().map(|e| e.id.clone()).collect();
        assert_totals_hold(h.engine.set_quantity(&ids[0], 4));
        assert_totals_hold(h.engine.set_quantity(&ids[1], -1));
        assert_totals_hold(h.engine.remove_item(&ids[2]));
        assert_totals_hold(h.engine.clear());
    }

    #[test]
    fn test_cart_state_shares_engine() {
        let h = harness();
        let state = CartState::new(h.engine);

        state.with_engine_mut(|engine| {
            engine.add_item(&item("p1", 999), 1, None);
        });
        assert_eq!(state.with_engine(|engine| engine.total_items()), 1);
    }

    #[test]
    fn test_cart_response_includes_checkout_totals() {
        let mut h = harness();
        h.engine.add_item(&item("p1", 1000), 1, None);

        let response = CartResponse::new(h.engine.snapshot(), &PricingRules::default());
        assert_eq!(response.totals.delivery_fee, Money::from_cents(299));
        assert_eq!(response.totals.tax, Money::from_cents(80));
        assert_eq!(response.totals.total, Money::from_cents(1379));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["totalItems"], 1);
        assert!(json["totals"]["deliveryFee"].is_number());
    }
}
