//! Tests for locked contexts and groups (synchronous helpers and guards).

mod common;

use common::{Call, CaptureOutput};
use grouplog::{Level, Logger, UpdateKind};
use std::panic::{AssertUnwindSafe, catch_unwind};

fn capture_logger() -> (Logger, CaptureOutput) {
    let capture = CaptureOutput::new();
    let logger = Logger::builder()
        .level(Level::Info)
        .output(capture.clone())
        .build();
    (logger, capture)
}

fn labels(logger: &Logger) -> Vec<String> {
    logger.scopes().into_iter().map(|e| e.label).collect()
}

fn count(capture: &CaptureOutput, kind: UpdateKind) -> usize {
    capture.updates().into_iter().filter(|k| *k == kind).count()
}

#[test]
fn with_context_returns_work_result() {
    let (logger, _capture) = capture_logger();
    let value = logger.with_context_sync("ctx", || 42);
    assert_eq!(value, 42);
    assert!(labels(&logger).is_empty());
}

#[test]
fn unclosed_inner_contexts_are_discarded() {
    let (logger, capture) = capture_logger();

    logger.with_context_sync("locked", || {
        logger.start_context("a");
        logger.start_context("b");
        assert_eq!(labels(&logger), ["locked", "a", "b"]);
    });

    assert!(labels(&logger).is_empty());
    assert_eq!(logger.locked_depths(), 0);
    // Only the owning context reports its end
    assert_eq!(count(&capture, UpdateKind::ContextEnd), 1);
}

#[test]
fn end_context_cannot_cross_the_lock() {
    let (logger, _capture) = capture_logger();

    logger.with_context_sync("locked", || {
        logger.start_context("free");
        logger.end_context();
        logger.end_context();
        logger.end_context();
        assert_eq!(labels(&logger), ["locked"]);
    });

    assert!(labels(&logger).is_empty());
}

#[test]
fn outer_contexts_survive_a_locked_block() {
    let (logger, _capture) = capture_logger();

    logger.start_context("outer");
    logger.with_context_sync("locked", || {
        logger.info("inside");
    });

    assert_eq!(labels(&logger), ["outer"]);
    logger.end_context();
    assert!(labels(&logger).is_empty());
}

#[test]
fn nested_locked_contexts_unwind_in_order() {
    let (logger, capture) = capture_logger();

    logger.with_context_sync("one", || {
        logger.with_context_sync("two", || {
            logger.info("deep");
        });
        logger.info("shallow");
    });

    assert_eq!(capture.messages(), ["deep", "shallow"]);
    assert!(labels(&logger).is_empty());
    assert_eq!(count(&capture, UpdateKind::ContextEnd), 2);
}

#[test]
fn errors_propagate_after_cleanup() {
    let (logger, capture) = capture_logger();

    let result: Result<(), String> = logger.with_context_sync("ctx", || {
        logger.start_context("stray");
        Err("failed".to_string())
    });

    assert_eq!(result, Err("failed".to_string()));
    assert!(labels(&logger).is_empty());
    assert_eq!(count(&capture, UpdateKind::ContextEnd), 1);
}

#[test]
fn panics_still_run_cleanup() {
    let (logger, capture) = capture_logger();

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        logger.with_context_sync("ctx", || {
            logger.start_context("stray");
            panic!("work failed");
        })
    }));

    assert!(outcome.is_err());
    assert!(labels(&logger).is_empty());
    assert_eq!(logger.locked_depths(), 0);
    assert_eq!(count(&capture, UpdateKind::ContextEnd), 1);
}

#[test]
fn group_opened_inside_locked_context_is_closed() {
    let (logger, capture) = capture_logger();

    logger.with_context_sync("ctx", || {
        logger.start_group("left open");
    });

    assert!(labels(&logger).is_empty());
    assert_eq!(logger.active_group(), None);
    assert_eq!(count(&capture, UpdateKind::GroupStart), 1);
    assert_eq!(count(&capture, UpdateKind::GroupEnd), 1);
}

#[test]
fn with_group_opens_and_closes_once() {
    let (logger, capture) = capture_logger();

    let value = logger.with_group_sync("g", || {
        assert!(logger.is_group_locked());
        "done"
    });

    assert_eq!(value, "done");
    assert!(!logger.is_group_locked());
    assert_eq!(
        capture.updates(),
        [UpdateKind::GroupStart, UpdateKind::GroupEnd]
    );
}

#[test]
fn nested_with_group_runs_work_without_markers() {
    let (logger, capture) = capture_logger();
    let mut inner_ran = false;

    logger.with_group_sync("outer", || {
        logger.with_group_sync("inner", || {
            inner_ran = true;
            assert_eq!(labels(&logger), ["outer"]);
        });
    });

    assert!(inner_ran);
    assert_eq!(
        capture.updates(),
        [UpdateKind::GroupStart, UpdateKind::GroupEnd]
    );
}

#[test]
fn locked_group_ignores_manual_group_calls() {
    let (logger, capture) = capture_logger();

    logger.with_group_sync("locked", || {
        logger.start_group("other");
        logger.end_group();
        assert_eq!(labels(&logger), ["locked"]);
    });

    assert!(labels(&logger).is_empty());
    assert_eq!(
        capture.updates(),
        [UpdateKind::GroupStart, UpdateKind::GroupEnd]
    );
}

#[test]
fn with_group_cleans_up_after_panic() {
    let (logger, _capture) = capture_logger();

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        logger.with_group_sync("g", || panic!("boom"));
    }));

    assert!(outcome.is_err());
    assert!(!logger.is_group_locked());
    assert!(labels(&logger).is_empty());
}

#[test]
fn guards_close_on_drop() {
    let (logger, _capture) = capture_logger();

    {
        let _group = logger.lock_group("g");
        let _ctx = logger.lock_context("c");
        logger.start_context("stray");
        assert_eq!(labels(&logger), ["g", "c", "stray"]);
    }

    assert!(labels(&logger).is_empty());
    assert!(!logger.is_group_locked());
    assert_eq!(logger.locked_depths(), 0);
}

#[test]
fn nested_group_guard_is_inert() {
    let (logger, _capture) = capture_logger();

    let outer = logger.lock_group("outer");
    let inner = logger.lock_group("inner");
    assert!(outer.is_active());
    assert!(!inner.is_active());

    drop(inner);
    assert!(logger.is_group_locked());
    drop(outer);
    assert!(!logger.is_group_locked());
}

#[test]
fn guards_release_only_their_own_scope() {
    let (logger, capture) = capture_logger();

    let outer = logger.lock_context("a");
    logger.start_context("between");
    let inner = logger.lock_context("b");
    logger.start_context("x");

    drop(outer);
    logger.info("after a dropped");

    assert_eq!(labels(&logger), ["b", "x"]);
    assert_eq!(logger.locked_depths(), 1);
    assert!(matches!(
        capture.calls().last(),
        Some(Call::Message { scopes, .. }) if scopes == &["b".to_string(), "x".to_string()]
    ));

    // The remaining lock still pins "b"
    logger.end_context();
    logger.end_context();
    assert_eq!(labels(&logger), ["b"]);

    drop(inner);
    assert!(labels(&logger).is_empty());
    assert_eq!(logger.locked_depths(), 0);
    assert_eq!(count(&capture, UpdateKind::ContextStart), 4);
    assert_eq!(count(&capture, UpdateKind::ContextEnd), 3);
}

#[test]
fn group_replaced_inside_locked_context_keeps_outer_scopes() {
    let (logger, capture) = capture_logger();

    logger.start_context("outer");
    logger.start_group("G1");
    logger.with_context_sync("c", || logger.start_group("G2"));

    assert_eq!(labels(&logger), ["outer", "G2"]);
    assert_eq!(logger.active_group(), Some(1));
    assert_eq!(logger.locked_depths(), 0);
    assert_eq!(
        capture.updates(),
        [
            UpdateKind::ContextStart,
            UpdateKind::GroupStart,
            UpdateKind::ContextStart,
            UpdateKind::GroupStart,
        ]
    );
}

#[test]
fn discarded_lock_does_not_close_a_context_at_its_old_depth() {
    let (logger, _capture) = capture_logger();

    logger.start_context("outer");
    logger.start_group("G1");
    logger.with_context_sync("c", || {
        logger.start_group("G2");
        logger.start_context("y");
    });

    assert_eq!(labels(&logger), ["outer", "G2", "y"]);
    assert_eq!(logger.locked_depths(), 0);
}

#[test]
fn context_release_clears_the_lock_of_a_group_it_cut_off() {
    let (logger, capture) = capture_logger();
    let logger = &logger;

    let group = logger.with_context_sync("c", move || logger.lock_group("g"));

    assert!(group.is_active());
    assert!(labels(logger).is_empty());
    assert!(!logger.is_group_locked());

    logger.start_group("next");
    assert_eq!(labels(logger), ["next"]);

    drop(group);
    assert_eq!(labels(logger), ["next"]);
    assert_eq!(
        capture.updates(),
        [
            UpdateKind::ContextStart,
            UpdateKind::GroupStart,
            UpdateKind::GroupEnd,
            UpdateKind::ContextEnd,
            UpdateKind::GroupStart,
        ]
    );
}
