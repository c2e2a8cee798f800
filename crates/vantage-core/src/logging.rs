//! Tracing setup for test binaries.

use std::sync::Once;

/// Initialize tracing for a test binary.
///
/// Respects `RUST_LOG`; safe to call from every test, only the first
/// call installs the subscriber.
pub fn init_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_test_logging();
        init_test_logging();
        tracing::debug!("logging initialized");
    }
}
