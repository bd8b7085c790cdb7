//! # Address Repository
//!
//! The saved delivery address under [`DELIVERY_ADDRESS_KEY`]. Written by
//! checkout after the address form passes validation; the cart engine never
//! touches it.

use std::sync::Arc;

use tracing::{debug, warn};

use bite_core::DeliveryAddress;

use crate::backend::DurableStore;
use crate::error::{StoreError, StoreResult};
use crate::DELIVERY_ADDRESS_KEY;

#[derive(Clone)]
pub struct AddressRepository {
    store: Arc<dyn DurableStore>,
}

impl AddressRepository {
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        AddressRepository { store }
    }

    /// Returns the saved address, if any.
    ///
    /// A value that fails to parse is logged and reported as absent. It is
    /// left in place; the next [`save`](Self::save) replaces it.
    pub fn load(&self) -> StoreResult<Option<DeliveryAddress>> {
        let Some(raw) = self.store.get(DELIVERY_ADDRESS_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str::<DeliveryAddress>(&raw) {
            Ok(address) => Ok(Some(address)),
            Err(e) => {
                warn!(error = %e, "Ignoring malformed saved address");
                Ok(None)
            }
        }
    }

    pub fn save(&self, address: &DeliveryAddress) -> StoreResult<()> {
        let raw = serde_json::to_string(address).map_err(|source| StoreError::Encode {
            key: DELIVERY_ADDRESS_KEY.to_string(),
            source,
        })?;

        self.store.set(DELIVERY_ADDRESS_KEY, &raw)?;
        debug!(city = %address.city, "Saved delivery address");
        Ok(())
    }
}
