//! Tracing bootstrap for hosts embedding the domain layer

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "info";

/// Install a global `tracing` subscriber.
///
/// The filter is read from `RUST_LOG`. Returns `false` when a global
/// subscriber was already installed, in which case nothing changes.
pub fn init_tracing() -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(env_filter)
        .try_init()
        .is_ok()
}
