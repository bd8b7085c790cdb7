//! # Checkout Pricing
//!
//! Turns a cart subtotal into the totals shown on the cart and summary
//! pages.
//!
//! ```text
//! subtotal ──┬──► delivery fee  (free when subtotal > $25.00, else $2.99)
//!            ├──► tax           (8%, rounded to the cent)
//!            └──► total = subtotal + delivery fee + tax
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CartEntry, TaxRate};
use crate::{DEFAULT_DELIVERY_FEE_CENTS, DELIVERY_TRANSIT_MINUTES, FREE_DELIVERY_OVER_CENTS};

/// Store-wide pricing knobs. Defaults match the live storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRules {
    pub tax_rate: TaxRate,
    pub delivery_fee: Money,
    /// Subtotals strictly above this ship free.
    pub free_delivery_over: Money,
    pub transit_minutes: i64,
}

impl Default for PricingRules {
    fn default() -> Self {
        PricingRules {
            tax_rate: TaxRate::default(),
            delivery_fee: Money::from_cents(DEFAULT_DELIVERY_FEE_CENTS),
            free_delivery_over: Money::from_cents(FREE_DELIVERY_OVER_CENTS),
            transit_minutes: DELIVERY_TRANSIT_MINUTES,
        }
    }
}

impl PricingRules {
    pub fn delivery_fee_for(&self, subtotal: Money) -> Money {
        if subtotal > self.free_delivery_over {
            Money::zero()
        } else {
            self.delivery_fee
        }
    }

    /// Delivery estimate: the slowest dish plus transit time.
    pub fn estimated_delivery(&self, entries: &[CartEntry], from: DateTime<Utc>) -> DateTime<Utc> {
        let prep = entries
            .iter()
            .map(|e| e.item.preparation_time as i64)
            .max()
            .unwrap_or(0);
        from + Duration::minutes(prep + self.transit_minutes)
    }
}

/// Money breakdown of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub tax: Money,
    pub total: Money,
}

impl OrderTotals {
    pub fn from_subtotal(subtotal: Money, rules: &PricingRules) -> Self {
        let delivery_fee = rules.delivery_fee_for(subtotal);
        let tax = subtotal.calculate_tax(rules.tax_rate);

        OrderTotals {
            subtotal,
            delivery_fee,
            tax,
            total: subtotal + delivery_fee + tax,
        }
    }
}
