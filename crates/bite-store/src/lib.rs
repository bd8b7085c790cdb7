//! # bite-store: Durable Store for Yellow Bite
//!
//! This crate persists storefront state across restarts. The contract is a
//! tiny synchronous string key-value store; everything above it is JSON.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Yellow Bite Data Flow                            │
//! │                                                                         │
//! │  CartEngine / Checkout (storefront)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     bite-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Storage     │    │  Repositories  │    │   Backends   │  │   │
//! │  │   │ (storage.rs)  │    │  cart.rs       │    │ MemoryStore  │  │   │
//! │  │   │               │───►│  address.rs    │───►│ FileStore    │  │   │
//! │  │   │ StoreConfig   │    │  schema checks │    │ get/set/rm   │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/yellow-bite/store.json  (or memory only)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use bite_store::{Storage, StoreConfig};
//!
//! let storage = Storage::open(StoreConfig::in_memory())?;
//! assert!(storage.cart().load()?.is_empty());
//! # Ok::<(), bite_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod error;
pub mod repository;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{DurableStore, FileStore, MemoryStore};
pub use error::{StoreError, StoreResult};
pub use storage::{Storage, StoreConfig};

pub use repository::address::AddressRepository;
pub use repository::cart::CartRepository;

// =============================================================================
// Storage Keys
// =============================================================================

/// Key holding the serialized cart entries array.
pub const CART_KEY: &str = "cart";

/// Key holding the saved delivery address. Managed by checkout only.
pub const DELIVERY_ADDRESS_KEY: &str = "deliveryAddress";
