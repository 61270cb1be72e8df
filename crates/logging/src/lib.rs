#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` provides the verbosity system shared by every crate in the
//! dirindex workspace. Diagnostics are grouped into categories
//! ([`InfoFlag`] for user-facing progress, [`DebugFlag`] for internals), each
//! with its own numeric level. The [`debug_log!`] and [`info_log!`] macros
//! check the calling thread's configuration before formatting anything, so
//! disabled diagnostics cost a thread-local read.
//!
//! # Design
//!
//! - [`VerbosityConfig`] holds per-flag levels and parses `--info`/`--debug`
//!   tokens (`walk2`, `ALL`, `NONE`).
//! - Configuration is thread-local. Worker threads begin with the default
//!   (silent) configuration; spawners pass [`current`] into [`init`].
//! - Accepted events are forwarded to `tracing` when the `tracing` feature is
//!   enabled and can be captured for inspection with [`set_capture`] and
//!   [`drain_events`].
//!
//! # Examples
//!
//! ```
//! use logging::{debug_log, drain_events, init, set_capture, VerbosityConfig};
//!
//! let mut config = VerbosityConfig::default();
//! config.apply_debug_flag("walk2").unwrap();
//! init(config);
//! set_capture(true);
//!
//! debug_log!(Walk, 2, "entering {}", "/srv/files");
//! debug_log!(Walk, 3, "suppressed");
//!
//! let events = drain_events();
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].message(), "entering /srv/files");
//! ```

mod config;
mod levels;
mod macros;
mod thread_local;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::VerbosityConfig;
pub use levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};
pub use thread_local::{
    DiagnosticEvent, apply_debug_flag, apply_info_flag, current, debug_gte, drain_events,
    emit_debug, emit_info, info_gte, init, set_capture,
};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{filter_for, init_tracing};
