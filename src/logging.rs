//! Tracing subscriber setup for binaries and test harnesses embedding the
//! ledger layer. The library itself only emits events.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Install a stdout fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter`. Safe to call repeatedly; returns `false` when another
/// subscriber was already installed by someone else.
pub fn init(default_filter: &str) -> bool {
    *INSTALLED.get_or_init(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(true))
            .try_init()
            .is_ok()
    })
}
