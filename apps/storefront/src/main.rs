//! # Yellow Bite Storefront Entry Point
//!
//! ```text
//! $ bite-storefront
//! Welcome to Yellow Bite! Type 'help' for commands.
//! /> register Jane Doe | jane@example.com | secret1 | secret1
//! ✓ Account Created!: Welcome to Yellow Bite! You can now start ordering.
//! -> /menu
//! /menu> add 1 2
//! ✓ Added to Cart: Margherita Pizza has been added to your cart.
//! ```
//!
//! The actual setup is in lib.rs so it can be tested.

#[tokio::main]
async fn main() {
    if let Err(e) = bite_storefront::run().await {
        eprintln!("bite-storefront: {}", e);
        std::process::exit(1);
    }
}
