//! # State Module
//!
//! Application state for the storefront.
//!
//! ## Why Multiple State Types?
//! Each command takes only the containers it needs, so a cart command never
//! touches the session and the checkout flow borrows the cart explicitly.
//! [`AppState`] is the root composition that owns them all; nothing is a
//! process-wide singleton.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      AppState::open(config, notifier)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │     ┌───────────┬────────────┼─────────────┬──────────────┐            │
//! │     ▼           ▼            ▼             ▼              ▼             │
//! │  ┌────────┐ ┌─────────┐ ┌──────────┐ ┌────────────┐ ┌────────────┐     │
//! │  │Catalog │ │CartState│ │ Session  │ │ Checkout   │ │ Navigation │     │
//! │  │(menu)  │ │ Mutex<  │ │ State    │ │ State      │ │ State      │     │
//! │  │        │ │ Engine> │ │(accounts)│ │ (address)  │ │ (route)    │     │
//! │  └────────┘ └─────────┘ └──────────┘ └────────────┘ └────────────┘     │
//! │                  │                          │                           │
//! │                  └────────── Storage ───────┘                           │
//! │                         ("cart", "deliveryAddress")                     │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartState / SessionState / Navigation: std Mutex, never held        │
//! │    across an await                                                     │
//! │  • Catalog / StorefrontConfig: read-only after startup                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod checkout;
mod config;
mod navigation;
mod session;

use std::sync::Arc;

use bite_store::{Storage, StoreError};

use crate::catalog::Catalog;
use crate::notify::Notifier;

pub use cart::{CartEngine, CartResponse, CartState};
pub use checkout::{CheckoutError, CheckoutState, OrderSummary};
pub use config::{ConfigError, StorefrontConfig, IN_MEMORY_STORE};
pub use navigation::NavigationState;
pub use session::{AuthError, RegisterForm, SessionState};

/// Everything a storefront session needs.
pub struct AppState {
    pub config: StorefrontConfig,
    pub catalog: Catalog,
    pub cart: CartState,
    pub session: SessionState,
    pub checkout: CheckoutState,
    pub navigation: NavigationState,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Wires every container onto one storage handle.
    pub fn new(config: StorefrontConfig, storage: &Storage, notifier: Arc<dyn Notifier>) -> Self {
        let cart = CartState::new(CartEngine::open(storage.cart(), Arc::clone(&notifier)));
        let session = SessionState::new(config.auth_delay());
        let checkout = CheckoutState::new(
            storage.addresses(),
            config.pricing,
            config.address_delay(),
            config.order_delay(),
            Arc::clone(&notifier),
        );

        AppState {
            catalog: Catalog::seeded(),
            cart,
            session,
            checkout,
            navigation: NavigationState::new(),
            notifier,
            config,
        }
    }

    /// Opens the configured store, then builds the state.
    pub fn open(config: StorefrontConfig, notifier: Arc<dyn Notifier>) -> Result<Self, StartupError> {
        let storage = Storage::open(config.store_config()?)?;
        Ok(AppState::new(config, &storage, notifier))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("cart", &self.cart)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

/// Why the storefront could not start.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
