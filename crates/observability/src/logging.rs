//! Subscriber installation.
//!
//! JSON lines on stdout, filtered via `RUST_LOG`. The engine itself only
//! emits `debug`-level events on session state transitions, so the default
//! filter keeps production logs quiet.

use tracing_subscriber::EnvFilter;

/// Install the process-wide subscriber.
///
/// Installation is racy-safe: if a subscriber is already set (tests, or an
/// embedding service with its own setup), this call is a no-op.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_target(true)
        .try_init();
}
