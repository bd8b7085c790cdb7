//! # Configuration State
//!
//! Storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`BITE_*`)
//! 2. Defaults (this file)
//!
//! ## Environment Variables
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BITE_STORE_NAME` | `Yellow Bite` | Shown in the shell banner |
//! | `BITE_STORE_PATH` | platform data dir | JSON store file, or `:memory:` |
//! | `BITE_TAX_RATE` | `8` | Percent |
//! | `BITE_DELIVERY_FEE_CENTS` | `299` | Flat fee on small orders |
//! | `BITE_FREE_DELIVERY_OVER_CENTS` | `2500` | Subtotals above this ship free |
//! | `BITE_ADDRESS_DELAY_MS` | `1000` | Simulated address validation |
//! | `BITE_ORDER_DELAY_MS` | `2000` | Simulated order placement |
//! | `BITE_AUTH_DELAY_MS` | `1000` | Simulated login / registration |
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use directories::ProjectDirs;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use bite_core::pricing::PricingRules;
use bite_core::types::TaxRate;
use bite_core::Money;
use bite_store::StoreConfig;

/// `BITE_STORE_PATH` value that keeps everything in memory.
pub const IN_MEMORY_STORE: &str = ":memory:";

/// Invalid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}': {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    /// No home directory to put the store file in.
    #[error("Could not determine app data directory; set BITE_STORE_PATH")]
    NoDataDir,
}

/// Storefront configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontConfig {
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    pub pricing: PricingRules,

    /// Explicit store file. `None` means the platform data directory.
    #[serde(skip)]
    pub store_path: Option<PathBuf>,

    #[serde(skip)]
    pub in_memory: bool,

    pub address_delay_ms: u64,
    pub order_delay_ms: u64,
    pub auth_delay_ms: u64,
}

impl Default for StorefrontConfig {
    /// Returns the live storefront's settings.
    ///
    /// ## Default Values
    /// - Store: "Yellow Bite"
    /// - Currency: USD ($)
    /// - Tax: 8%, delivery $2.99, free over $25.00
    /// - Delays: 1s address, 2s order, 1s auth
    fn default() -> Self {
        StorefrontConfig {
            store_name: "Yellow Bite".to_string(),
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
            pricing: PricingRules::default(),
            store_path: None,
            in_memory: false,
            address_delay_ms: 1000,
            order_delay_ms: 2000,
            auth_delay_ms: 1000,
        }
    }
}

impl StorefrontConfig {
    /// Reads `BITE_*` variables on top of the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = StorefrontConfig::default();

        if let Some(name) = lookup("BITE_STORE_NAME").filter(|s| !s.trim().is_empty()) {
            config.store_name = name;
        }

        match lookup("BITE_STORE_PATH").filter(|s| !s.trim().is_empty()) {
            Some(path) if path.trim() == IN_MEMORY_STORE => config.in_memory = true,
            Some(path) => config.store_path = Some(PathBuf::from(path)),
            None => {}
        }

        if let Some(raw) = lookup("BITE_TAX_RATE") {
            let pct: f64 = parse_var("BITE_TAX_RATE", &raw)?;
            config.pricing.tax_rate = TaxRate::from_percentage(pct)
                .ok_or_else(|| invalid("BITE_TAX_RATE", &raw, "must be between 0 and 100"))?;
        }

        if let Some(raw) = lookup("BITE_DELIVERY_FEE_CENTS") {
            config.pricing.delivery_fee = non_negative_cents("BITE_DELIVERY_FEE_CENTS", &raw)?;
        }

        if let Some(raw) = lookup("BITE_FREE_DELIVERY_OVER_CENTS") {
            config.pricing.free_delivery_over =
                non_negative_cents("BITE_FREE_DELIVERY_OVER_CENTS", &raw)?;
        }

        if let Some(raw) = lookup("BITE_ADDRESS_DELAY_MS") {
            config.address_delay_ms = parse_var("BITE_ADDRESS_DELAY_MS", &raw)?;
        }

        if let Some(raw) = lookup("BITE_ORDER_DELAY_MS") {
            config.order_delay_ms = parse_var("BITE_ORDER_DELAY_MS", &raw)?;
        }

        if let Some(raw) = lookup("BITE_AUTH_DELAY_MS") {
            config.auth_delay_ms = parse_var("BITE_AUTH_DELAY_MS", &raw)?;
        }

        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Zero delays and an in-memory store. Used by tests.
    pub fn instant() -> Self {
        StorefrontConfig {
            in_memory: true,
            address_delay_ms: 0,
            order_delay_ms: 0,
            auth_delay_ms: 0,
            ..StorefrontConfig::default()
        }
    }

    /// Where the durable store lives.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.yellowbite.storefront/store.json`
    /// - **Windows**: `%APPDATA%\yellowbite\storefront\data\store.json`
    /// - **Linux**: `~/.local/share/storefront/store.json`
    pub fn store_config(&self) -> Result<StoreConfig, ConfigError> {
        if self.in_memory {
            return Ok(StoreConfig::in_memory());
        }

        if let Some(path) = &self.store_path {
            return Ok(StoreConfig::file(path));
        }

        let dirs = ProjectDirs::from("com", "yellowbite", "storefront").ok_or(ConfigError::NoDataDir)?;
        Ok(StoreConfig::file(dirs.data_dir().join("store.json")))
    }

    pub fn address_delay(&self) -> Duration {
        Duration::from_millis(self.address_delay_ms)
    }

    pub fn order_delay(&self) -> Duration {
        Duration::from_millis(self.order_delay_ms)
    }

    pub fn auth_delay(&self) -> Duration {
        Duration::from_millis(self.auth_delay_ms)
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use bite_storefront::state::StorefrontConfig;
    ///
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        format!(
            "{}{}{}.{:02}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            (cents / 100).abs(),
            (cents % 100).abs()
        )
    }
}

fn invalid(var: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_var<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| invalid(var, raw, e))
}

fn non_negative_cents(var: &'static str, raw: &str) -> Result<Money, ConfigError> {
    let cents: i64 = parse_var(var, raw)?;
    if cents < 0 {
        return Err(invalid(var, raw, "must not be negative"));
    }
    Ok(Money::from_cents(cents))
}
