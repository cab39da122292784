//! Process-wide tracing setup for services built on `verdict`.
//!
//! The library crates only emit `tracing` events; a binary (or a test) calls
//! [`init`] once to install a subscriber.

/// Initialize tracing with the filter from `RUST_LOG` (default `info`).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(None);
}

/// Initialize tracing with explicit filter directives (e.g. `"verdict_http=debug"`).
pub fn init_with_filter(directives: &str) {
    tracing::init(Some(directives));
}

/// Subscriber configuration (filters, formatting).
pub mod tracing;
