//! # Storage Handle
//!
//! Opens a backend and hands out repositories.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Storage Startup                                 │
//! │                                                                         │
//! │  StoreConfig::file(path) / StoreConfig::in_memory()                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Storage::open(config) ← FileStore::open or MemoryStore::new           │
//! │       │                                                                 │
//! │       ├──► storage.cart()      → CartRepository     ("cart")           │
//! │       └──► storage.addresses() → AddressRepository  ("deliveryAddress")│
//! │                                                                         │
//! │  Both repositories share one Arc<dyn DurableStore>.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::backend::{DurableStore, FileStore, MemoryStore};
use crate::error::StoreResult;
use crate::repository::address::AddressRepository;
use crate::repository::cart::CartRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Which backend to open.
///
/// ## Example
/// ```rust
/// use bite_store::StoreConfig;
///
/// let config = StoreConfig::file("./data/store.json");
/// assert!(config.path().is_some());
/// assert!(StoreConfig::in_memory().path().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// Values are lost when the process exits.
    InMemory,
    /// Values live in a JSON file at this path.
    File(PathBuf),
}

impl StoreConfig {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        StoreConfig::File(path.into())
    }

    pub fn in_memory() -> Self {
        StoreConfig::InMemory
    }

    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            StoreConfig::InMemory => None,
            StoreConfig::File(path) => Some(path),
        }
    }
}

// =============================================================================
// Storage
// =============================================================================

/// Shared handle to the durable store.
#[derive(Clone)]
pub struct Storage {
    store: Arc<dyn DurableStore>,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

impl Storage {
    /// Opens the configured backend.
    ///
    /// ## Returns
    /// * `Ok(Storage)` - ready to use
    /// * `Err(StoreError)` - the file could not be read or is corrupt
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        let store: Arc<dyn DurableStore> = match config {
            StoreConfig::InMemory => {
                info!("Using in-memory store");
                Arc::new(MemoryStore::new())
            }
            StoreConfig::File(path) => Arc::new(FileStore::open(path)?),
        };

        Ok(Storage { store })
    }

    /// Wraps an existing backend (tests keep a handle to inspect it).
    pub fn with_store(store: impl DurableStore + 'static) -> Self {
        Storage {
            store: Arc::new(store),
        }
    }

    /// Raw access to the backend.
    pub fn store(&self) -> &Arc<dyn DurableStore> {
        &self.store
    }

    pub fn cart(&self) -> CartRepository {
        CartRepository::new(Arc::clone(&self.store))
    }

    pub fn addresses(&self) -> AddressRepository {
        AddressRepository::new(Arc::clone(&self.store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CART_KEY;

    #[test]
    fn test_repositories_share_backend() {
        let backend = MemoryStore::new();
        let storage = Storage::with_store(backend.clone());

        storage.cart().save(&[]).unwrap();
        assert!(backend.contains(CART_KEY));
        assert_eq!(storage.store().get(CART_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_open_file_backend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let storage = Storage::open(StoreConfig::file(&path)).unwrap();
        storage.cart().save(&[]).unwrap();

        assert!(path.exists());
    }
}
