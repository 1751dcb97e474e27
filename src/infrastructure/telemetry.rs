//! Tracing bootstrap for binaries and tests that embed the engine.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. Safe to call more than once;
/// later calls are no-ops. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
