//! # Route Guards
//!
//! Decides whether a page may be shown or where to send the customer
//! instead.
//!
//! ```text
//! ┌──────────────────────┬───────────┬──────────────┐
//! │ Route                │ needs auth│ needs cart   │
//! ├──────────────────────┼───────────┼──────────────┤
//! │ /  /login /register  │     -     │      -       │
//! │ /menu /cart          │    yes    │      -       │
//! │ /order-confirmation  │    yes    │      -       │
//! │ /checkout/address    │    yes    │     yes      │
//! │ /checkout/summary    │    yes    │     yes      │
//! └──────────────────────┴───────────┴──────────────┘
//! not signed in  → /login (remembering the target)
//! empty cart     → /menu
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum Route {
    Home,
    Login,
    Register,
    Menu,
    Cart,
    CheckoutAddress,
    CheckoutSummary,
    OrderConfirmation,
    NotFound,
}

impl Route {
    /// Maps a path to a route. Unknown paths map to `NotFound`.
    pub fn parse(path: &str) -> Route {
        let path = path.trim();
        let path = path.strip_suffix('/').filter(|p| !p.is_empty()).unwrap_or(path);

        match path {
            "/" | "" => Route::Home,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/menu" => Route::Menu,
            "/cart" => Route::Cart,
            "/checkout/address" => Route::CheckoutAddress,
            "/checkout/summary" => Route::CheckoutSummary,
            "/order-confirmation" => Route::OrderConfirmation,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Menu => "/menu",
            Route::Cart => "/cart",
            Route::CheckoutAddress => "/checkout/address",
            Route::CheckoutSummary => "/checkout/summary",
            Route::OrderConfirmation => "/order-confirmation",
            Route::NotFound => "/404",
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Menu
                | Route::Cart
                | Route::CheckoutAddress
                | Route::CheckoutSummary
                | Route::OrderConfirmation
        )
    }

    pub fn requires_cart(&self) -> bool {
        matches!(self, Route::CheckoutAddress | Route::CheckoutSummary)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of [`guard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", tag = "kind")]
#[ts(export)]
pub enum Access {
    Allow,
    /// Go to `to`; `from` is the page to return to after signing in.
    Redirect { to: Route, from: Option<Route> },
}

/// Checks a route against the session and cart state.
pub fn guard(route: Route, authenticated: bool, cart_is_empty: bool) -> Access {
    if route.requires_auth() && !authenticated {
        return Access::Redirect {
            to: Route::Login,
            from: Some(route),
        };
    }

    if route.requires_cart() && cart_is_empty {
        return Access::Redirect {
            to: Route::Menu,
            from: None,
        };
    }

    Access::Allow
}
