//! # Navigation State
//!
//! Current page plus the page a sign-in redirect should return to.

use std::sync::{Mutex, MutexGuard, PoisonError};

use bite_core::routing::Route;

#[derive(Debug)]
struct Location {
    current: Route,
    return_to: Option<Route>,
}

#[derive(Debug)]
pub struct NavigationState {
    location: Mutex<Location>,
}

impl NavigationState {
    pub fn new() -> Self {
        NavigationState {
            location: Mutex::new(Location {
                current: Route::Home,
                return_to: None,
            }),
        }
    }

    pub fn current(&self) -> Route {
        self.lock().current
    }

    /// Moves to `route`. A `Some(from)` overwrites the remembered page.
    pub fn set(&self, route: Route, from: Option<Route>) {
        let mut location = self.lock();
        location.current = route;
        if from.is_some() {
            location.return_to = from;
        }
    }

    /// Takes the remembered page, leaving none behind.
    pub fn take_return_to(&self) -> Option<Route> {
        self.lock().return_to.take()
    }

    fn lock(&self) -> MutexGuard<'_, Location> {
        self.location.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_to_is_taken_once() {
        let nav = NavigationState::new();
        assert_eq!(nav.current(), Route::Home);

        nav.set(Route::Login, Some(Route::Cart));
        nav.set(Route::Register, None);
        assert_eq!(nav.current(), Route::Register);

        assert_eq!(nav.take_return_to(), Some(Route::Cart));
        assert_eq!(nav.take_return_to(), None);
    }
}
