use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "triage=info";

/// Installs a formatted `tracing` subscriber filtered by `RUST_LOG`.
///
/// Meant for the host application and for tests. Calling it more than once is
/// harmless: later calls leave the first subscriber in place.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
