//! Tests for log level functionality.

use grouplog::{Level, Severity};

#[test]
fn level_values_follow_table() {
    assert_eq!(Level::Error.value(), 0);
    assert_eq!(Level::Warning.value(), 1);
    assert_eq!(Level::Notice.value(), 2);
    assert_eq!(Level::Info.value(), 3);

    for (name, value) in Level::LOG_LEVELS {
        let level = Level::from_value(value).unwrap();
        assert_eq!(level.as_str().to_uppercase(), name);
    }
    assert_eq!(Level::from_value(4), None);
}

#[test]
fn info_threshold_passes_every_level() {
    for level in Level::all() {
        assert!(level.passes(Level::Info), "{level} should pass at info");
    }
}

#[test]
fn warning_threshold_passes_error_and_warning_only() {
    assert!(Level::Error.passes(Level::Warning));
    assert!(Level::Warning.passes(Level::Warning));
    assert!(!Level::Notice.passes(Level::Warning));
    assert!(!Level::Info.passes(Level::Warning));
}

#[test]
fn error_always_passes() {
    for threshold in Level::all() {
        assert!(Level::Error.passes(threshold));
    }
}

#[test]
fn level_display() {
    assert_eq!(Level::Error.to_string(), "error");
    assert_eq!(Level::Warning.to_string(), "warning");
    assert_eq!(Level::Notice.to_string(), "notice");
    assert_eq!(Level::Info.to_string(), "info");
    assert_eq!(Severity::Debug.to_string(), "debug");
}

#[test]
fn level_from_str() {
    assert_eq!("ERROR".parse::<Level>().unwrap(), Level::Error);
    assert_eq!("warn".parse::<Level>().unwrap(), Level::Warning);
    assert_eq!("Notice".parse::<Level>().unwrap(), Level::Notice);
    assert_eq!("info".parse::<Level>().unwrap(), Level::Info);
}

#[test]
fn level_from_str_invalid() {
    assert!("debug".parse::<Level>().is_err());
    assert!("invalid".parse::<Level>().is_err());
}

#[test]
fn level_default() {
    assert_eq!(Level::default(), Level::Info);
}

#[test]
fn severity_wraps_level() {
    assert_eq!(Severity::from(Level::Notice).level(), Some(Level::Notice));
    assert_eq!(Severity::Debug.level(), None);
    assert!(Severity::Debug.is_debug());
}
