//! crates/logging/src/tracing_bridge.rs
//! Bridge between the verbosity flags and the tracing ecosystem.
//!
//! With the `tracing` feature enabled, every event accepted by
//! [`debug_log!`](crate::debug_log) or [`info_log!`](crate::info_log) is also
//! emitted as a tracing event under the `dirindex` target, carrying the flag
//! name and level as fields. [`init_tracing`] installs a stderr subscriber
//! whose filter is derived from the verbosity configuration unless `RUST_LOG`
//! overrides it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! let config = VerbosityConfig::from_verbose_level(2);
//! init_tracing(config);
//! logging::info_log!(Search, 1, "search started");
//! ```

use super::config::VerbosityConfig;
use tracing_subscriber::EnvFilter;

/// Maps the highest configured verbosity level onto a tracing filter level.
const fn level_for(config_level: u8, any_debug: bool) -> &'static str {
    match (config_level, any_debug) {
        (0, _) => "warn",
        (_, false) => "info",
        (1 | 2, true) => "debug",
        _ => "trace",
    }
}

/// Builds the filter used by [`init_tracing`].
///
/// `RUST_LOG` wins when set and valid; otherwise the filter admits the
/// `dirindex` target at the level implied by `config`.
pub fn filter_for(config: &VerbosityConfig) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = level_for(config.max_level(), config.any_debug());
    EnvFilter::new(format!("warn,dirindex={level}"))
}

/// Initialize tracing with the given verbosity configuration.
///
/// Also installs `config` as the calling thread's verbosity configuration.
/// Calling this more than once leaves the first subscriber in place.
pub fn init_tracing(config: VerbosityConfig) {
    let filter = filter_for(&config);
    super::thread_local::init(config);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
