//! Subscriber installation.

use tracing_subscriber::EnvFilter;

/// Install a JSON subscriber. Explicit `directives` win over `RUST_LOG`.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(directives: Option<&str>) {
    let filter = match directives {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    // JSON logs + timestamps; the error fields (`code`, `status`, `kind`) stay structured.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
