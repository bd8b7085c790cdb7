//! # Cart Repository
//!
//! Reads and writes the cart entries array under [`CART_KEY`].
//!
//! ## Load Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Reading the Persisted Cart                           │
//! │                                                                         │
//! │  store.get("cart")                                                     │
//! │       │                                                                 │
//! │       ├── None ─────────────────────────────────► []                   │
//! │       ▼                                                                 │
//! │  serde_json::from_str::<Vec<CartEntry>>                                │
//! │       │                                                                 │
//! │       ├── parse error ──┐                                               │
//! │       ▼                 │                                               │
//! │  validate_cart_entries  │                                               │
//! │       │                 │                                               │
//! │       ├── rule broken ──┴──► warn!, store.remove("cart") ──► []        │
//! │       ▼                                                                 │
//! │  entries                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::{debug, warn};

use bite_core::validation::validate_cart_entries;
use bite_core::CartEntry;

use crate::backend::DurableStore;
use crate::error::{StoreError, StoreResult};
use crate::CART_KEY;

/// Repository for the persisted cart.
///
/// ## Usage
/// ```rust
/// use bite_store::{Storage, StoreConfig};
///
/// let storage = Storage::open(StoreConfig::in_memory())?;
/// let repo = storage.cart();
///
/// repo.save(&[])?;
/// assert!(repo.load()?.is_empty());
/// # Ok::<(), bite_store::StoreError>(())
/// ```
#[derive(Clone)]
pub struct CartRepository {
    store: Arc<dyn DurableStore>,
}

impl CartRepository {
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        CartRepository { store }
    }

    /// Loads the persisted entries.
    ///
    /// A missing key is an empty cart. A value that does not parse, or parses
    /// but breaks cart invariants, is logged, removed from the store, and
    /// treated as an empty cart.
    ///
    /// ## Returns
    /// * `Ok(entries)` - possibly empty
    /// * `Err(StoreError)` - the backend itself failed
    pub fn load(&self) -> StoreResult<Vec<CartEntry>> {
        let Some(raw) = self.store.get(CART_KEY)? else {
            debug!("No persisted cart");
            return Ok(Vec::new());
        };

        match decode_entries(&raw) {
            Ok(entries) => {
                debug!(entries = entries.len(), "Loaded persisted cart");
                Ok(entries)
            }
            Err(e) => {
                warn!(error = %e, "Discarding malformed persisted cart");
                self.store.remove(CART_KEY)?;
                Ok(Vec::new())
            }
        }
    }

    /// Overwrites the persisted entries. An empty slice is written as `[]`.
    pub fn save(&self, entries: &[CartEntry]) -> StoreResult<()> {
        let raw = serde_json::to_string(entries).map_err(|source| StoreError::Encode {
            key: CART_KEY.to_string(),
            source,
        })?;

        self.store.set(CART_KEY, &raw)?;
        debug!(entries = entries.len(), "Persisted cart");
        Ok(())
    }

    /// Removes the key entirely.
    pub fn evict(&self) -> StoreResult<()> {
        self.store.remove(CART_KEY)
    }
}

/// Parses and checks a raw cart value.
///
/// ## Errors
/// [`StoreError::Malformed`] when the text is not an entries array or the
/// entries break cart invariants.
pub fn decode_entries(raw: &str) -> StoreResult<Vec<CartEntry>> {
    let entries: Vec<CartEntry> =
        serde_json::from_str(raw).map_err(|e| StoreError::malformed(CART_KEY, e))?;

    validate_cart_entries(&entries).map_err(|e| StoreError::malformed(CART_KEY, e))?;

    Ok(entries)
}
