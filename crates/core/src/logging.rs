use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber driven by `RUST_LOG`, defaulting to `info`.
///
/// Safe to call more than once: later calls leave the first subscriber
/// in place.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
