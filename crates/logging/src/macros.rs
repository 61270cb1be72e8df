//! crates/logging/src/macros.rs
//! Level-gated diagnostic macros.

/// Emit a debug diagnostic when the flag's level is at least `$level`.
///
/// The message is only formatted when the level check passes.
///
/// ```
/// logging::debug_log!(Search, 1, "hand-off blocked for {} ms", 12);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($flag:ident, $level:expr, $($arg:tt)+) => {{
        let level: u8 = $level;
        if $crate::debug_gte($crate::DebugFlag::$flag, level) {
            $crate::emit_debug($crate::DebugFlag::$flag, level, ::std::format!($($arg)+));
        }
    }};
}

/// Emit an info diagnostic when the flag's level is at least `$level`.
///
/// ```
/// logging::info_log!(Archive, 1, "wrote {} files", 3);
/// ```
#[macro_export]
macro_rules! info_log {
    ($flag:ident, $level:expr, $($arg:tt)+) => {{
        let level: u8 = $level;
        if $crate::info_gte($crate::InfoFlag::$flag, level) {
            $crate::emit_info($crate::InfoFlag::$flag, level, ::std::format!($($arg)+));
        }
    }};
}
