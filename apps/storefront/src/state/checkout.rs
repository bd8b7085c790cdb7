//! # Checkout State
//!
//! Delivery address and order placement.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Flow                                        │
//! │                                                                         │
//! │  /checkout/address                                                     │
//! │       │  submit_address(form)                                          │
//! │       │    1. validate fields                                          │
//! │       │    2. sleep(address delay)        ◄── stands in for geocoding  │
//! │       │    3. save under "deliveryAddress" (is_default = true)         │
//! │       ▼                                                                 │
//! │  /checkout/summary                                                     │
//! │       │  order_summary(cart)  → entries + subtotal/fee/tax/total       │
//! │       │  place_order(session, cart)                                    │
//! │       │    1. signed in? address saved? cart non-empty?                │
//! │       │    2. sleep(order delay)          ◄── stands in for the API    │
//! │       │    3. snapshot + clear the cart in one engine transition       │
//! │       │    4. build Order (Confirmed, ETA = slowest dish + 30 min)     │
//! │       ▼                                                                 │
//! │  /order-confirmation   last_order()                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Orders are kept in memory only; there is no server to send them to.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};
use uuid::Uuid;

use bite_core::pricing::{OrderTotals, PricingRules};
use bite_core::validation::validate_address;
use bite_core::{Cart, CartEntry, DeliveryAddress, Order, OrderStatus, ValidationError};
use bite_store::{AddressRepository, StoreError};

use crate::notify::Notifier;
use crate::state::cart::CartState;
use crate::state::session::SessionState;

/// Checkout failures.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Please sign in to place an order")]
    NotAuthenticated,

    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Please enter a delivery address first")]
    MissingAddress,

    #[error("Could not save checkout data: {0}")]
    Store(#[from] StoreError),
}

/// What the summary page shows before the order is placed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub entries: Vec<CartEntry>,
    pub totals: OrderTotals,
    pub delivery_address: Option<DeliveryAddress>,
    pub estimated_delivery_minutes: i64,
}

pub struct CheckoutState {
    addresses: AddressRepository,
    pricing: PricingRules,
    address_delay: Duration,
    order_delay: Duration,
    notifier: Arc<dyn Notifier>,
    last_order: Mutex<Option<Order>>,
}

impl std::fmt::Debug for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutState")
            .field("pricing", &self.pricing)
            .field("address_delay", &self.address_delay)
            .field("order_delay", &self.order_delay)
            .finish_non_exhaustive()
    }
}

impl CheckoutState {
    pub fn new(
        addresses: AddressRepository,
        pricing: PricingRules,
        address_delay: Duration,
        order_delay: Duration,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        CheckoutState {
            addresses,
            pricing,
            address_delay,
            order_delay,
            notifier,
            last_order: Mutex::new(None),
        }
    }

    pub fn pricing(&self) -> &PricingRules {
        &self.pricing
    }

    /// Validates and saves the delivery address.
    ///
    /// Fields are trimmed and an empty landmark is dropped. The saved copy is
    /// always marked as the default address.
    pub async fn submit_address(
        &self,
        address: DeliveryAddress,
    ) -> Result<DeliveryAddress, CheckoutError> {
        let address = normalize(address);
        validate_address(&address)?;

        tokio::time::sleep(self.address_delay).await;

        self.addresses.save(&address)?;
        info!(city = %address.city, zip = %address.zip_code, "Delivery address saved");

        self.notifier
            .success("Address Validated", "Your delivery address has been confirmed.");
        Ok(address)
    }

    /// The saved address, if any. Store failures read as "no address".
    pub fn saved_address(&self) -> Option<DeliveryAddress> {
        self.addresses.load().unwrap_or_else(|e| {
            error!(error = %e, "Failed to read saved address");
            None
        })
    }

    /// Totals and delivery estimate for the current cart.
    pub fn order_summary(&self, cart: &Cart) -> Result<OrderSummary, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let now = Utc::now();
        let eta = self.pricing.estimated_delivery(cart.entries(), now);

        Ok(OrderSummary {
            entries: cart.entries().to_vec(),
            totals: OrderTotals::from_subtotal(cart.total_amount(), &self.pricing),
            delivery_address: self.saved_address(),
            estimated_delivery_minutes: (eta - now).num_minutes(),
        })
    }

    /// Places an order for everything in the cart and empties it.
    ///
    /// ## Errors
    /// - [`CheckoutError::NotAuthenticated`] - nobody signed in
    /// - [`CheckoutError::MissingAddress`] - no saved address
    /// - [`CheckoutError::EmptyCart`] - nothing to order (also checked again
    ///   after the delay, in case the cart was emptied meanwhile)
    pub async fn place_order(
        &self,
        session: &SessionState,
        cart: &CartState,
        special_instructions: Option<String>,
    ) -> Result<Order, CheckoutError> {
        let user = session
            .current_user()
            .ok_or(CheckoutError::NotAuthenticated)?;
        let address = self.saved_address().ok_or(CheckoutError::MissingAddress)?;

        if cart.with_engine(|engine| engine.is_empty()) {
            return Err(CheckoutError::EmptyCart);
        }

        debug!(user_id = %user.id, "Placing order");
        tokio::time::sleep(self.order_delay).await;

        let entries = cart
            .with_engine_mut(|engine| {
                if engine.is_empty() {
                    return None;
                }
                let entries = engine.entries().to_vec();
                engine.clear();
                Some(entries)
            })
            .ok_or(CheckoutError::EmptyCart)?;

        let now = Utc::now();
        let subtotal = Cart::from_entries(entries.clone()).total_amount();

        let order = Order {
            id: order_id(now.timestamp_millis()),
            user_id: user.id,
            totals: OrderTotals::from_subtotal(subtotal, &self.pricing),
            estimated_delivery_at: self.pricing.estimated_delivery(&entries, now),
            items: entries,
            delivery_address: address,
            status: OrderStatus::Confirmed,
            created_at: now,
            special_instructions: special_instructions
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        };

        info!(order_id = %order.id, total = %order.totals.total, "Order placed");
        self.notifier.success(
            "Order Placed Successfully!",
            &format!("Your order #{} has been confirmed.", order.id),
        );

        *self.last_order.lock().unwrap_or_else(PoisonError::into_inner) = Some(order.clone());
        Ok(order)
    }

    /// The most recently placed order, for the confirmation page.
    pub fn last_order(&self) -> Option<Order> {
        self.last_order
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// `ORD-<unix millis>-<8 hex chars>`
fn order_id(millis: i64) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("ORD-{}-{}", millis, &suffix[..8])
}

fn normalize(address: DeliveryAddress) -> DeliveryAddress {
    DeliveryAddress {
        street: address.street.trim().to_string(),
        city: address.city.trim().to_string(),
        state: address.state.trim().to_string(),
        zip_code: address.zip_code.trim().to_string(),
        landmark: address
            .landmark
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        phone_number: address.phone_number.trim().to_string(),
        is_default: true,
    }
}
