//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with `level` as the default filter.
///
/// `RUST_LOG` takes precedence when set. Calling this more than once is
/// harmless; later calls are ignored.
pub fn init(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    if env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init()
        .is_err()
    {
        log::debug!("Logger already initialized");
    }
}
