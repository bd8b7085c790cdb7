//! # Config Commands
//!
//! Commands for retrieving storefront configuration.

use tracing::debug;

use crate::state::StorefrontConfig;

/// Gets the current storefront configuration.
///
/// ## When Used
/// - Shell startup banner
/// - Currency formatting and the pricing footer on the cart page
///
/// ## Returns
/// Complete configuration state (read-only)
pub fn get_config(config: &StorefrontConfig) -> StorefrontConfig {
    debug!("get_config command");
    config.clone()
}
