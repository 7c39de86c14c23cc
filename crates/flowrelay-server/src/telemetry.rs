//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "flowrelay_server=info,flowrelay_core=info,tower_http=info";

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, or `default_filter`.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
