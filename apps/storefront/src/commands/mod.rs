//! # Commands Module
//!
//! Every action the storefront exposes, one function per frontend action.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (exports)
//! ├── cart.rs        ◄─── Cart manipulation
//! ├── catalog.rs     ◄─── Menu browsing
//! ├── checkout.rs    ◄─── Address, summary, order placement
//! ├── auth.rs        ◄─── Register, login, logout
//! ├── navigation.rs  ◄─── Route guards
//! └── config.rs      ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Shell line: "add 1 2 no onions"                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::cart::add_to_cart(                                          │
//! │      &state.catalog,   ◄── only the state it needs                     │
//! │      &state.cart,                                                      │
//! │      &state.config,                                                    │
//! │      "1", Some(2), Some("no onions"),                                  │
//! │  ) -> Result<CartResponse, ApiError>                                   │
//! │         │                                                               │
//! │         │ (serde, camelCase)                                            │
//! │         ▼                                                               │
//! │  Shell renders the response; toasts come through the Notifier          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Failures of async flows (address, order, auth) are also reported as
//! destructive notifications here, so the engine layers stay quiet about
//! errors they return.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod navigation;
