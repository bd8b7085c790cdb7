//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │ Address  │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                 │              │
//! │                   add_to_cart                       place_order        │
//! │                   update_cart_item                  (checkout.rs)      │
//! │                   remove_from_cart                       │              │
//! │                        │                                 │              │
//! │                        ▼                                 ▼              │
//! │                   clear_cart ─────────────────────► (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::catalog::Catalog;
use crate::error::ApiError;
use crate::state::{CartResponse, CartState, StorefrontConfig};

/// Gets the current cart contents.
///
/// ## Returns
/// Current entries with item count, subtotal and checkout totals
pub fn get_cart(cart: &CartState, config: &StorefrontConfig) -> CartResponse {
    debug!("get_cart command");
    cart.with_engine(|engine| CartResponse::new(engine.snapshot(), &config.pricing))
}

/// Adds a menu item to the cart.
///
/// ## Behavior
/// - Item already in cart: quantity increases
/// - Item not in cart: added as new entry with a copy of the menu item
/// - Item unavailable: cart unchanged, a destructive toast explains why
///
/// ## Arguments
/// * `item_id` - Menu item id
/// * `quantity` - Quantity to add (default: 1)
/// * `special_instructions` - Kept only when a new entry is created
///
/// ## Returns
/// Updated cart with all entries and totals
pub fn add_to_cart(
    catalog: &Catalog,
    cart: &CartState,
    config: &StorefrontConfig,
    item_id: &str,
    quantity: Option<i64>,
    special_instructions: Option<String>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(item_id = %item_id, quantity = %quantity, "add_to_cart command");

    let item = catalog
        .get(item_id)
        .ok_or_else(|| ApiError::not_found("Menu item", item_id))?;

    Ok(cart.with_engine_mut(|engine| {
        let snapshot = engine.add_item(item, quantity, special_instructions);
        CartResponse::new(snapshot, &config.pricing)
    }))
}

/// Sets the quantity of a cart entry.
///
/// ## Behavior
/// - Quantity 0 or less: removes the entry
/// - Unknown entry: nothing changes
pub fn update_cart_item(
    cart: &CartState,
    config: &StorefrontConfig,
    entry_id: &str,
    quantity: i64,
) -> CartResponse {
    debug!(entry_id = %entry_id, quantity = %quantity, "update_cart_item command");

    cart.with_engine_mut(|engine| {
        CartResponse::new(engine.set_quantity(entry_id, quantity), &config.pricing)
    })
}

/// Removes an entry from the cart. Unknown entries are ignored.
pub fn remove_from_cart(cart: &CartState, config: &StorefrontConfig, entry_id: &str) -> CartResponse {
    debug!(entry_id = %entry_id, "remove_from_cart command");

    cart.with_engine_mut(|engine| CartResponse::new(engine.remove_item(entry_id), &config.pricing))
}

/// Clears all entries and the persisted cart.
pub fn clear_cart(cart: &CartState, config: &StorefrontConfig) -> CartResponse {
    debug!("clear_cart command");

    cart.with_engine_mut(|engine| CartResponse::new(engine.clear(), &config.pricing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::state::AppState;
    use bite_core::{Money, NotificationKind};
    use bite_store::{MemoryStore, Storage};
    use std::sync::Arc;

    fn app() -> (AppState, RecordingNotifier) {
        let notifier = RecordingNotifier::new();
        let storage = Storage::with_store(MemoryStore::new());
        let state = AppState::new(
            StorefrontConfig::instant(),
            &storage,
            Arc::new(notifier.clone()),
        );
        (state, notifier)
    }

    #[test]
    fn test_add_update_remove() {
        let (s, _) = app();

        let cart = add_to_cart(&s.catalog, &s.cart, &s.config, "1", Some(2), None).unwrap();
        assert_eq!(cart.total_items, 2);
        assert_eq!(cart.total_amount, Money::from_cents(2598));
        assert_eq!(cart.totals.delivery_fee, Money::zero());

        let entry_id = cart.entries[0].id.clone();
        let cart = update_cart_item(&s.cart, &s.config, &entry_id, 1);
        assert_eq!(cart.total_items, 1);
        assert_eq!(cart.totals.delivery_fee, Money::from_cents(299));

        let cart = remove_from_cart(&s.cart, &s.config, &entry_id);
        assert!(cart.entries.is_empty());
        assert_eq!(get_cart(&s.cart, &s.config).total_items, 0);
    }

    #[test]
    fn test_add_unknown_item() {
        let (s, _) = app();
        let err = add_to_cart(&s.catalog, &s.cart, &s.config, "404", None, None).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::NotFound);
    }

    #[test]
    fn test_add_unavailable_item_reports() {
        let (s, notifier) = app();
        let unavailable = s
            .catalog
            .items()
            .iter()
            .find(|item| !item.is_available)
            .unwrap()
            .id
            .clone();

        let cart = add_to_cart(&s.catalog, &s.cart, &s.config, &unavailable, None, None).unwrap();
        assert!(cart.entries.is_empty());
        assert_eq!(notifier.last().unwrap().kind, NotificationKind::Destructive);
    }

    #[test]
    fn test_clear_cart() {
        let (s, _) = app();
        add_to_cart(&s.catalog, &s.cart, &s.config, "3", None, None).unwrap();
        add_to_cart(&s.catalog, &s.cart, &s.config, "11", Some(3), None).unwrap();

        let cart = clear_cart(&s.cart, &s.config);
        assert!(cart.entries.is_empty());
        assert_eq!(cart.totals.total, Money::from_cents(299));
    }
}
