//! Logging utilities for Schedulink.
//!
//! Every binary and test harness sets up tracing through this module so the
//! output format is the same everywhere.

use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO level.
///
/// # Examples
///
/// ```
/// use schedulink_common::logging;
///
/// logging::init();
/// // Later calls are harmless: the first subscriber stays installed.
/// logging::init_with_level(tracing::Level::DEBUG);
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` is honoured first; the `schedulink=<level>` directive is added
/// on top so the workspace crates always log at `level` or finer.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("schedulink={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    // try_init: a global subscriber may already be set (tests, embedding)
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}

/// Log a result: the success message at INFO, or the error with context at ERROR.
///
/// Returns the original result so it can be used inline.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_does_not_panic() {
        init();
        init_with_level(Level::DEBUG);
    }

    #[test]
    fn log_result_passes_value_through() {
        let ok: Result<u8, String> = Ok(7);
        assert_eq!(log_result(ok, "done", "failed"), Ok(7));

        let err: Result<u8, String> = Err("nope".into());
        assert_eq!(log_result(err, "done", "failed"), Err("nope".to_string()));
    }
}
