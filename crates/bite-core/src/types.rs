//! # Domain Types
//!
//! Core domain types used throughout Yellow Bite.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogItem    │   │   CartEntry     │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  item (copy)    │◄──│  items          │       │
//! │  │  name, price    │   │  id (UUID v4)   │   │  totals         │       │
//! │  │  is_available   │   │  quantity > 0   │   │  status         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │ DeliveryAddress │   │  OrderStatus    │       │
//! │  │  bps (u32)      │   │  street, city   │   │  Pending ...    │       │
//! │  │  800 = 8%       │   │  zip, phone     │   │  Delivered      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every wire type uses camelCase field names, matching what the web
//! storefront already keeps in local storage (`isAvailable`,
//! `specialInstructions`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::pricing::OrderTotals;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 800 bps = 8%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (configuration input only).
    ///
    /// Returns `None` unless `pct` is a finite value in `0.0..=100.0`.
    pub fn from_percentage(pct: f64) -> Option<Self> {
        if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
            return None;
        }
        Some(TaxRate((pct * 100.0).round() as u32))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// A dish on the menu.
///
/// Owned by the catalog provider. The cart copies the whole item into each
/// entry at add time and never mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Unit price, never negative.
    pub price: Money,
    /// Image reference (URL or asset path).
    pub image: String,
    pub category: String,
    #[serde(default)]
    pub is_vegetarian: bool,
    pub is_available: bool,
    /// Preparation time in minutes.
    pub preparation_time: u32,
}

impl CatalogItem {
    /// Creates an available, uncategorised item with the given price.
    ///
    /// Mostly useful in tests and seeds; the remaining fields can be set with
    /// struct update syntax.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        CatalogItem {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            image: String::new(),
            category: String::new(),
            is_vegetarian: false,
            is_available: true,
            preparation_time: 0,
        }
    }
}

// =============================================================================
// Cart Entry
// =============================================================================

/// One line of the cart: a catalog item, a quantity and optional
/// instructions for the kitchen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartEntry {
    /// Opaque id, unique per add event (UUID v4).
    pub id: String,
    /// Snapshot of the catalog item taken when it was first added.
    pub item: CatalogItem,
    /// Always at least 1 once the entry is in a cart.
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

impl CartEntry {
    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.item.price.multiply_quantity(self.quantity as i64)
    }
}

// =============================================================================
// Delivery Address
// =============================================================================

/// Where an order is delivered. Validated by
/// [`validate_address`](crate::validation::validate_address).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DeliveryAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    pub phone_number: String,
    #[serde(default)]
    pub is_default: bool,
}

// =============================================================================
// Order
// =============================================================================

/// Lifecycle of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

/// A placed order. Lives only in memory; there is no server to keep it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    /// `ORD-<unix millis>-<suffix>`
    pub id: String,
    pub user_id: String,
    pub items: Vec<CartEntry>,
    pub delivery_address: DeliveryAddress,
    pub totals: OrderTotals,
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub estimated_delivery_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

// =============================================================================
// User
// =============================================================================

/// A signed-in customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

// =============================================================================
// Notifications
// =============================================================================

/// Variant of a user-facing toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum NotificationKind {
    Success,
    Destructive,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_percentage() {
        let rate = TaxRate::from_percentage(8.0).unwrap();
        assert_eq!(rate.bps(), 800);
        assert!((rate.percentage() - 8.0).abs() < 0.001);
        assert_eq!(TaxRate::default(), rate);

        assert_eq!(TaxRate::from_percentage(0.0), Some(TaxRate::from_bps(0)));
        assert_eq!(TaxRate::from_percentage(100.0), Some(TaxRate::from_bps(10_000)));
    }

    #[test]
    fn test_tax_rate_rejects_out_of_range_percentage() {
        assert_eq!(TaxRate::from_percentage(-0.5), None);
        assert_eq!(TaxRate::from_percentage(100.01), None);
        assert_eq!(TaxRate::from_percentage(f64::NAN), None);
        assert_eq!(TaxRate::from_percentage(f64::INFINITY), None);
    }

    #[test]
    fn test_line_total() {
        let entry = CartEntry {
            id: "e1".to_string(),
            item: CatalogItem::new("p1", "Margherita", Money::from_cents(999)),
            quantity: 3,
            special_instructions: None,
        };
        assert_eq!(entry.line_total().cents(), 2997);
    }

    #[test]
    fn test_catalog_item_wire_names() {
        let item = CatalogItem {
            is_vegetarian: true,
            preparation_time: 15,
            ..CatalogItem::new("p1", "Margherita", Money::from_cents(999))
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["isAvailable"], true);
        assert_eq!(json["isVegetarian"], true);
        assert_eq!(json["preparationTime"], 15);
        assert_eq!(json["price"], 999);
    }

    #[test]
    fn test_order_status_wire_names() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"out_for_delivery\"");
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_notification_kind_wire_names() {
        let json = serde_json::to_string(&NotificationKind::Destructive).unwrap();
        assert_eq!(json, "\"destructive\"");
    }
}
