//! # Cart Reducer
//!
//! The cart is a pure reducer: `reduce(state, action) -> state`.
//!
//! ## Transition Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Action            Effect on entries                                    │
//! │  ────────────────  ──────────────────────────────────────────────────   │
//! │  AddToCart         item present? quantity += n : push new entry         │
//! │  RemoveFromCart    drop entry with matching id (absent → no-op)         │
//! │  UpdateQuantity    n <= 0 → drop entry, else overwrite quantity         │
//! │  ClearCart         entries = []                                         │
//! │  LoadFromStore     entries = persisted entries (verbatim)               │
//! │                                                                         │
//! │  After EVERY action: total_items and total_amount recomputed from       │
//! │  entries. Totals are never patched incrementally.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every transition is total. Unknown entry ids and non-positive quantities
//! degrade to no-ops, so callers never have to handle an error here.
//!
//! Availability checks and notifications belong to the engine that wraps this
//! reducer; the reducer only enforces identity and quantity rules.

use serde::Serialize;
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;
use crate::types::{CartEntry, CatalogItem};

// =============================================================================
// Actions
// =============================================================================

/// Input to [`reduce`].
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Add `quantity` of `item`.
    ///
    /// `entry_id` is only used when a new entry is created. It is generated
    /// up front by [`CartAction::add`] so the reducer stays deterministic.
    AddToCart {
        item: CatalogItem,
        quantity: u32,
        special_instructions: Option<String>,
        entry_id: String,
    },
    RemoveFromCart {
        entry_id: String,
    },
    UpdateQuantity {
        entry_id: String,
        quantity: i64,
    },
    ClearCart,
    LoadFromStore {
        entries: Vec<CartEntry>,
    },
}

impl CartAction {
    /// Builds an `AddToCart` action with a fresh opaque entry id.
    pub fn add(item: CatalogItem, quantity: u32, special_instructions: Option<String>) -> Self {
        CartAction::AddToCart {
            item,
            quantity,
            special_instructions,
            entry_id: new_entry_id(),
        }
    }
}

/// Generates an opaque cart entry id.
pub fn new_entry_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Cart State
// =============================================================================

/// Cart contents plus totals derived from them.
///
/// ## Invariants
/// - At most one entry per catalog item id
/// - Every entry has `quantity >= 1`
/// - `total_items == Σ quantity`, `total_amount == Σ price × quantity`
///
/// Fields are private so the totals can only come from [`Cart::from_entries`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    entries: Vec<CartEntry>,
    #[ts(type = "number")]
    total_items: u64,
    total_amount: Money,
}

impl Default for Cart {
    fn default() -> Self {
        Cart::from_entries(Vec::new())
    }
}

impl Cart {
    /// Builds a cart from entries, deriving both totals.
    pub fn from_entries(entries: Vec<CartEntry>) -> Self {
        let total_items = entries.iter().map(|e| e.quantity as u64).sum();
        let total_amount = entries.iter().map(CartEntry::line_total).sum();

        Cart {
            entries,
            total_items,
            total_amount,
        }
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Sum of price × quantity over all entries.
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Quantity held for a catalog item id, or 0.
    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.entries
            .iter()
            .find(|e| e.item.id == item_id)
            .map_or(0, |e| e.quantity)
    }

    /// Looks up an entry by its opaque id.
    pub fn entry(&self, entry_id: &str) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.id == entry_id)
    }

    /// Consumes the cart, returning its entries.
    pub fn into_entries(self) -> Vec<CartEntry> {
        self.entries
    }
}

// =============================================================================
// Reducer
// =============================================================================

/// Applies one action to the cart and returns the next state.
///
/// ```rust
/// use bite_core::cart::{reduce, Cart, CartAction};
/// use bite_core::money::Money;
/// use bite_core::types::CatalogItem;
///
/// let item = CatalogItem::new("p1", "Margherita", Money::from_cents(999));
/// let cart = reduce(Cart::default(), CartAction::add(item, 1, None));
/// let entry_id = cart.entries()[0].id.clone();
///
/// let cart = reduce(cart, CartAction::UpdateQuantity { entry_id, quantity: 0 });
/// assert!(cart.is_empty());
/// ```
pub fn reduce(state: Cart, action: CartAction) -> Cart {
    let mut entries = state.into_entries();

    match action {
        CartAction::AddToCart {
            item,
            quantity,
            special_instructions,
            entry_id,
        } => {
            if quantity == 0 {
                return Cart::from_entries(entries);
            }

            match entries.iter_mut().find(|e| e.item.id == item.id) {
                // Instructions on an existing entry are left untouched
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(quantity);
                }
                None => entries.push(CartEntry {
                    id: entry_id,
                    item,
                    quantity,
                    special_instructions,
                }),
            }
        }

        CartAction::RemoveFromCart { entry_id } => {
            entries.retain(|e| e.id != entry_id);
        }

        CartAction::UpdateQuantity { entry_id, quantity } => {
            if quantity <= 0 {
                entries.retain(|e| e.id != entry_id);
            } else if let Some(entry) = entries.iter_mut().find(|e| e.id == entry_id) {
                entry.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            }
        }

        CartAction::ClearCart => entries.clear(),

        CartAction::LoadFromStore { entries: loaded } => entries = loaded,
    }

    Cart::from_entries(entries)
}

// =============================================================================
// Unit Tests
// =============================================================================
