//! # Checkout Commands
//!
//! Address entry, order summary and order placement.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  address 123 Main Street | Springfield | IL | 62701 | 555 123 4567     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  submit_address ──► validate ──► ~1s ──► saved ──► "Address Validated" │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  summary ──► get_order_summary                                         │
//! │                                                                         │
//! │     Margherita Pizza x 2                       $25.98                   │
//! │     Subtotal                                   $25.98                   │
//! │     Delivery                                    $0.00                   │
//! │     Tax                                         $2.08                   │
//! │     Total                                      $28.06                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  order ──► place_order ──► ~2s ──► cart cleared ──► confirmation       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, warn};

use bite_core::{DeliveryAddress, Order};

use crate::error::ApiError;
use crate::notify::Notifier;
use crate::state::{CartState, CheckoutState, OrderSummary, SessionState};

/// Validates and saves the delivery address.
///
/// ## Returns
/// The address as saved (trimmed, marked default)
pub async fn submit_address(
    checkout: &CheckoutState,
    notifier: &dyn Notifier,
    address: DeliveryAddress,
) -> Result<DeliveryAddress, ApiError> {
    debug!("submit_address command");

    checkout.submit_address(address).await.map_err(|e| {
        let err = ApiError::from(e);
        warn!(error = %err, "Address rejected");
        notifier.destructive("Validation Failed", &err.message);
        err
    })
}

/// Returns the saved address, if any.
pub fn get_saved_address(checkout: &CheckoutState) -> Option<DeliveryAddress> {
    debug!("get_saved_address command");
    checkout.saved_address()
}

/// Totals, entries and saved address for the summary page.
pub fn get_order_summary(cart: &CartState, checkout: &CheckoutState) -> Result<OrderSummary, ApiError> {
    debug!("get_order_summary command");
    cart.with_engine(|engine| checkout.order_summary(engine.snapshot()))
        .map_err(ApiError::from)
}

/// Places the order and empties the cart.
///
/// ## Errors
/// - `UNAUTHORIZED` - not signed in
/// - `MISSING_ADDRESS` - no saved address
/// - `EMPTY_CART` - nothing to order
pub async fn place_order(
    session: &SessionState,
    cart: &CartState,
    checkout: &CheckoutState,
    notifier: &dyn Notifier,
    special_instructions: Option<String>,
) -> Result<Order, ApiError> {
    debug!("place_order command");

    checkout
        .place_order(session, cart, special_instructions)
        .await
        .map_err(|e| {
            let err = ApiError::from(e);
            warn!(error = %err, "Order failed");
            notifier.destructive("Order Failed", &err.message);
            err
        })
}

/// The order shown on the confirmation page.
pub fn get_last_order(checkout: &CheckoutState) -> Option<Order> {
    debug!("get_last_order command");
    checkout.last_order()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::error::ErrorCode;
    use crate::notify::RecordingNotifier;
    use crate::state::{AppState, RegisterForm, StorefrontConfig};
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

    fn address(zip: &str) -> DeliveryAddress {
        DeliveryAddress {
            street: "123 Main Street".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: zip.to_string(),
            landmark: None,
            phone_number: "555 123 4567".to_string(),
            is_default: false,
        }
    }

    #[tokio::test]
    async fn test_invalid_address_notifies() {
        let (s, notifier) = app();

        let err = submit_address(&s.checkout, s.notifier.as_ref(), address("ABCDE"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let toast = notifier.last().unwrap();
        assert_eq!(toast.kind, NotificationKind::Destructive);
        assert_eq!(toast.title, "Validation Failed");
        assert!(get_saved_address(&s.checkout).is_none());
    }

    #[tokio::test]
    async fn test_full_checkout() {
        let (s, notifier) = app();
        s.session
            .register(RegisterForm {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                password: "secret1".to_string(),
                confirm_password: "secret1".to_string(),
            })
            .await
            .unwrap();

        add_to_cart(&s.catalog, &s.cart, &s.config, "1", Some(2), None).unwrap();
        submit_address(&s.checkout, s.notifier.as_ref(), address("62701-1234"))
            .await
            .unwrap();

        let summary = get_order_summary(&s.cart, &s.checkout).unwrap();
        assert_eq!(summary.totals.subtotal, Money::from_cents(2598));
        assert_eq!(summary.totals.tax, Money::from_cents(208));
        assert_eq!(summary.totals.total, Money::from_cents(2806));
        assert!(summary.delivery_address.is_some());

        let order = place_order(&s.session, &s.cart, &s.checkout, s.notifier.as_ref(), None)
            .await
            .unwrap();
        assert_eq!(order.totals, summary.totals);
        assert_eq!(get_last_order(&s.checkout).map(|o| o.id), Some(order.id));
        assert_eq!(notifier.last().unwrap().title, "Order Placed Successfully!");

        let err = get_order_summary(&s.cart, &s.checkout).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyCart);
    }

    #[tokio::test]
    async fn test_order_without_login_notifies() {
        let (s, notifier) = app();
        add_to_cart(&s.catalog, &s.cart, &s.config, "1", None, None).unwrap();

        let err = place_order(&s.session, &s.cart, &s.checkout, s.notifier.as_ref(), None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert_eq!(notifier.last().unwrap().title, "Order Failed");
        assert!(!s.cart.with_engine(|e| e.is_empty()));
    }
}
