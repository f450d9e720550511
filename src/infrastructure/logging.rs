//! Structured logging setup

use tracing_subscriber::EnvFilter;

use crate::domain::config::DEFAULT_LOG_LEVEL;

/// Environment variable holding a log filter directive
pub const LOG_ENV: &str = "SYSCLIP_LOG";

/// Log filter from `SYSCLIP_LOG`, ignoring blank values
pub fn log_level_from_env() -> Option<String> {
    non_blank(std::env::var(LOG_ENV).ok())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Build a filter from a directive, falling back to the default level
pub fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Install the global fmt subscriber on stderr.
///
/// Calling this more than once leaves the first subscriber in place.
pub fn init_logging(directive: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
