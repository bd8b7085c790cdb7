//! # Navigation Commands
//!
//! Page changes pass through the route guard before they land.
//!
//! ```text
//! navigate("/checkout/summary")
//!     │
//!     ├── not signed in ──► /login   (remembers /checkout/summary)
//!     ├── cart empty ─────► /menu
//!     └── otherwise ──────► /checkout/summary
//!
//! after_sign_in() ──► remembered page, or /menu
//! ```

use serde::Serialize;
use tracing::debug;

use bite_core::routing::{guard, Access, Route};

use crate::state::{CartState, NavigationState, SessionState};

/// Where a navigation request ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationResponse {
    pub requested: Route,
    pub current: Route,
    pub access: Access,
}

/// Moves to `path`, or to wherever the guard redirects.
pub fn navigate(
    navigation: &NavigationState,
    session: &SessionState,
    cart: &CartState,
    path: &str,
) -> NavigationResponse {
    let requested = Route::parse(path);
    let access = guard(
        requested,
        session.is_authenticated(),
        cart.with_engine(|engine| engine.is_empty()),
    );

    let current = match access {
        Access::Allow => {
            navigation.set(requested, None);
            requested
        }
        Access::Redirect { to, from } => {
            debug!(%requested, %to, "Redirected");
            navigation.set(to, from);
            to
        }
    };

    NavigationResponse {
        requested,
        current,
        access,
    }
}

/// Leaves the sign-in page for the remembered target, falling back to the menu.
pub fn after_sign_in(
    navigation: &NavigationState,
    session: &SessionState,
    cart: &CartState,
) -> NavigationResponse {
    let target = navigation.take_return_to().unwrap_or(Route::Menu);
    navigate(navigation, session, cart, target.path())
}

pub fn current_route(navigation: &NavigationState) -> Route {
    navigation.current()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::notify::RecordingNotifier;
    use crate::state::{AppState, RegisterForm, StorefrontConfig};
    use bite_store::{MemoryStore, Storage};
    use std::sync::Arc;

    fn app() -> AppState {
        AppState::new(
            StorefrontConfig::instant(),
            &Storage::with_store(MemoryStore::new()),
            Arc::new(RecordingNotifier::new()),
        )
    }

    async fn sign_in(s: &AppState) {
        s.session
            .register(RegisterForm {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                password: "secret1".to_string(),
                confirm_password: "secret1".to_string(),
            })
            .await
            .unwrap();
    }

    #[test]
    fn test_public_pages_allowed() {
        let s = app();
        let res = navigate(&s.navigation, &s.session, &s.cart, "/register");
        assert_eq!(res.access, Access::Allow);
        assert_eq!(current_route(&s.navigation), Route::Register);
    }

    #[tokio::test]
    async fn test_sign_in_returns_to_target() {
        let s = app();

        let res = navigate(&s.navigation, &s.session, &s.cart, "/cart");
        assert_eq!(res.current, Route::Login);
        assert_eq!(
            res.access,
            Access::Redirect {
                to: Route::Login,
                from: Some(Route::Cart)
            }
        );

        sign_in(&s).await;
        let res = after_sign_in(&s.navigation, &s.session, &s.cart);
        assert_eq!(res.current, Route::Cart);

        // Nothing remembered the second time.
        let res = after_sign_in(&s.navigation, &s.session, &s.cart);
        assert_eq!(res.current, Route::Menu);
    }

    #[tokio::test]
    async fn test_checkout_needs_cart() {
        let s = app();
        sign_in(&s).await;

        let res = navigate(&s.navigation, &s.session, &s.cart, "/checkout/address");
        assert_eq!(res.current, Route::Menu);

        add_to_cart(&s.catalog, &s.cart, &s.config, "1", None, None).unwrap();
        let res = navigate(&s.navigation, &s.session, &s.cart, "/checkout/address");
        assert_eq!(res.current, Route::CheckoutAddress);
        assert_eq!(res.access, Access::Allow);
    }

    #[test]
    fn test_unknown_path() {
        let s = app();
        let res = navigate(&s.navigation, &s.session, &s.cart, "/admin");
        assert_eq!(res.current, Route::NotFound);
    }
}
