//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// `default_level` is an `env_logger` filter string (`"info"`,
/// `"site_bridge=debug"`, ...). `RUST_LOG` overrides it when set. Calling this
/// more than once keeps the first logger and returns `false`.
pub fn init(default_level: &str) -> bool {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .try_init()
        .is_ok()
}

/// Initialize logging for unit tests (captured by the test harness)
#[cfg(test)]
pub(crate) fn init_for_tests() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}
