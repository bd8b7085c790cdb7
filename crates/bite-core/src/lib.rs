//! # bite-core: Pure Business Logic for Yellow Bite
//!
//! This crate is the **heart** of the Yellow Bite storefront. It contains the
//! cart reducer and every pricing/validation rule as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Yellow Bite Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront (apps/storefront)                    │   │
//! │  │   Menu ──► Cart ──► Address ──► Summary ──► Confirmation        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bite-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  types   │ │   cart   │ │ pricing  │ │ catalog/routing  │  │   │
//! │  │   │ Catalog  │ │ reducer  │ │ fee, tax │ │ filter, guards   │  │   │
//! │  │   │ Item     │ │ Cart     │ │ totals   │ │ validation       │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORE • NO NOTIFICATIONS • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bite-store (Durable Store)                   │   │
//! │  │              memory / JSON file, cart + address keys            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CatalogItem, CartEntry, Order, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart reducer and its derived totals
//! - [`catalog`] - Menu search, category filter and sort
//! - [`pricing`] - Delivery fee, tax and order totals
//! - [`routing`] - Route guards (authentication, empty cart)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use bite_core::cart::{reduce, Cart, CartAction};
//! use bite_core::money::Money;
//! use bite_core::types::CatalogItem;
//!
//! let pizza = CatalogItem::new("p1", "Margherita", Money::from_cents(999));
//!
//! let cart = reduce(Cart::default(), CartAction::add(pizza.clone(), 1, None));
//! let cart = reduce(cart, CartAction::add(pizza, 2, None));
//!
//! assert_eq!(cart.entries().len(), 1);
//! assert_eq!(cart.total_items(), 3);
//! assert_eq!(cart.total_amount().cents(), 2997);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod pricing;
pub mod routing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{reduce, Cart, CartAction};
pub use error::ValidationError;
pub use money::Money;
pub use pricing::{OrderTotals, PricingRules};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default sales tax applied at checkout, in basis points (800 = 8%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 800;

/// Flat delivery fee charged on small orders ($2.99).
pub const DEFAULT_DELIVERY_FEE_CENTS: i64 = 299;

/// Orders with a subtotal strictly above this amount ($25.00) ship free.
pub const FREE_DELIVERY_OVER_CENTS: i64 = 2500;

/// Minutes added on top of the slowest dish's preparation time when
/// estimating delivery.
pub const DELIVERY_TRANSIT_MINUTES: i64 = 30;
