//! # Repository Module
//!
//! Typed access to the values behind each storage key.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repositories Over One Store                          │
//! │                                                                         │
//! │  CartEngine / Checkout                                                 │
//! │       │                                                                 │
//! │       │  storage.cart().load()                                         │
//! │       ▼                                                                 │
//! │  CartRepository ("cart")          AddressRepository ("deliveryAddress")│
//! │  ├── load()  → Vec<CartEntry>     ├── load() → Option<DeliveryAddress> │
//! │  ├── save(entries)                └── save(address)                    │
//! │  └── evict()                                                           │
//! │       │                                                                 │
//! │       │  JSON text                                                      │
//! │       ▼                                                                 │
//! │  Arc<dyn DurableStore>                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CartRepository`](cart::CartRepository) - persisted cart entries
//! - [`AddressRepository`](address::AddressRepository) - saved delivery address

pub mod address;
pub mod cart;
