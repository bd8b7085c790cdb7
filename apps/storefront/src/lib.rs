//! # Yellow Bite Storefront Library
//!
//! Cart engine, checkout flow, mock accounts and the terminal shell that
//! drives them.
//!
//! ## Module Organization
//! ```text
//! bite_storefront/
//! ├── lib.rs          ◄─── You are here (logging setup & run)
//! ├── catalog.rs      ◄─── Built-in menu
//! ├── notify.rs       ◄─── Toast sink
//! ├── shell.rs        ◄─── Line-oriented front end
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState composition
//! │   ├── cart.rs     ◄─── Cart engine (reduce + persist)
//! │   ├── checkout.rs ◄─── Address, summary, order placement
//! │   ├── session.rs  ◄─── Mock authentication
//! │   ├── navigation.rs ◄─ Current page, sign-in return target
//! │   └── config.rs   ◄─── BITE_* configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── catalog.rs  ◄─── Menu browsing
//! │   ├── checkout.rs ◄─── Checkout commands
//! │   ├── auth.rs     ◄─── Register / login / logout
//! │   ├── navigation.rs ◄─ Guarded page changes
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod catalog;
pub mod commands;
pub mod error;
pub mod notify;
pub mod shell;
pub mod state;

use std::sync::Arc;

use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use notify::{RecordingNotifier, TracingNotifier};
use shell::Shell;
use state::{AppState, StorefrontConfig};

/// Runs the storefront shell on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Storefront Startup                                │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: WARN, INFO for bite crates; override with RUST_LOG       │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • BITE_* environment variables over defaults                        │
/// │                                                                         │
/// │  3. Open Store ───────────────────────────────────────────────────────► │
/// │     • JSON file in the platform data directory, or BITE_STORE_PATH      │
/// │     • Persisted cart is rehydrated (corrupt data is dropped)            │
/// │                                                                         │
/// │  4. Run Shell ────────────────────────────────────────────────────────► │
/// │     • One command per line until EOF or `quit`                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = StorefrontConfig::from_env()?;
    info!(store = %config.store_name, "Starting Yellow Bite storefront");

    let toasts = RecordingNotifier::new();
    let state = AppState::open(config, Arc::new((toasts.clone(), TracingNotifier)))?;
    info!(
        items = state.cart.with_engine(|engine| engine.total_items()),
        "State initialized"
    );

    let shell = Shell::new(state, toasts);
    shell
        .run(BufReader::new(tokio::io::stdin()), &mut std::io::stdout())
        .await?;

    info!("Storefront closed");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bite=trace` - Show trace for bite crates only
/// - Default: WARN, INFO for bite crates
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,bite=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
