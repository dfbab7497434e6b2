//! Logging bootstrap for processes embedding the decision engine.

/// Initialize process-wide tracing/logging.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    logging::init();
}

/// Subscriber configuration (format, filtering).
pub mod logging;
