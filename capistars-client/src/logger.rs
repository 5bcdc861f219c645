//! Logging setup

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "capistars_client=info,capistars_admin=info";

/// Install the global `fmt` subscriber.
///
/// `RUST_LOG` wins; otherwise `level` (when given) applies to this crate.
pub fn init_logger(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match level {
        Some(level) => format!("capistars_client={level},capistars_admin={level}").into(),
        None => DEFAULT_FILTER.into(),
    });

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
