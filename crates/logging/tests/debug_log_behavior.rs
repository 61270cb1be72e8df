//! Integration tests for the level-gated logging macros.
//!
//! Each test runs on its own thread under the default harness, so the
//! thread-local configuration installed by one test never leaks into another.

use logging::{
    DebugFlag, DiagnosticEvent, InfoFlag, VerbosityConfig, debug_log, drain_events, info_log,
    init, set_capture,
};

fn capture_with(config: VerbosityConfig) {
    init(config);
    set_capture(true);
    drain_events();
}

#[test]
fn debug_log_emits_when_level_sufficient() {
    let mut config = VerbosityConfig::default();
    config.debug.walk = 2;
    capture_with(config);

    debug_log!(Walk, 1, "test message");

    let events = drain_events();
    assert_eq!(
        events,
        vec![DiagnosticEvent::Debug {
            flag: DebugFlag::Walk,
            level: 1,
            message: "test message".to_string(),
        }]
    );
}

#[test]
fn debug_log_suppresses_when_level_insufficient() {
    let mut config = VerbosityConfig::default();
    config.debug.walk = 1;
    capture_with(config);

    debug_log!(Walk, 2, "should not appear");

    assert!(drain_events().is_empty());
}

#[test]
fn debug_log_flags_are_independent() {
    let mut config = VerbosityConfig::default();
    config.debug.search = 2;
    capture_with(config);

    debug_log!(Search, 1, "search visible");
    debug_log!(Archive, 1, "archive hidden");
    debug_log!(Walk, 1, "walk hidden");

    let events = drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message(), "search visible");
}

#[test]
fn info_log_formats_arguments() {
    let mut config = VerbosityConfig::default();
    config.info.archive = 1;
    capture_with(config);

    let files = 3;
    info_log!(Archive, 1, "wrote {files} files ({} bytes)", 42);

    match drain_events().as_slice() {
        [DiagnosticEvent::Info { flag, message, .. }] => {
            assert_eq!(*flag, InfoFlag::Archive);
            assert_eq!(message, "wrote 3 files (42 bytes)");
        }
        other => panic!("unexpected events: {other:?}"),
    }
}

#[test]
fn disabled_messages_are_not_formatted() {
    struct Explodes;
    impl std::fmt::Display for Explodes {
        fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            panic!("formatted a suppressed diagnostic");
        }
    }

    capture_with(VerbosityConfig::default());
    debug_log!(Index, 1, "{}", Explodes);
    assert!(drain_events().is_empty());
}

#[test]
fn verbose_level_enables_info_for_every_flag() {
    capture_with(VerbosityConfig::from_verbose_level(1));

    info_log!(Serve, 1, "serve");
    info_log!(Listing, 1, "listing");
    debug_log!(Walk, 1, "walk");

    let messages: Vec<_> = drain_events()
        .iter()
        .map(|event| event.message().to_string())
        .collect();
    assert_eq!(messages, vec!["serve", "listing"]);
}

#[cfg(feature = "serde")]
#[test]
fn verbosity_config_serializes_through_json() {
    let config = VerbosityConfig::from_verbose_level(2);
    let json = serde_json::to_string(&config).expect("serialize");
    let back: VerbosityConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, config);
}
