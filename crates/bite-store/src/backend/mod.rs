//! # Store Backends
//!
//! The [`DurableStore`] contract and its implementations.
//!
//! ```text
//! get(key)        -> Option<String>
//! set(key, value) -> ()
//! remove(key)     -> ()            (removing a missing key is fine)
//! ```
//!
//! Calls are synchronous and complete before returning. Methods take `&self`
//! so one store can be shared between the cart engine and checkout.

mod file;
mod memory;

use std::sync::Arc;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StoreResult;

/// A synchronous string key-value store that survives restarts.
pub trait DurableStore: Send + Sync {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<S: DurableStore + ?Sized> DurableStore for Arc<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}
