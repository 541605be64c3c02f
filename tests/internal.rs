//! The crate's own diagnostic logger: output selection and sink failure reports.
//!
//! The internal logger is per thread, so every test runs on a fresh thread.

mod common;

use common::CaptureOutput;
use grouplog::{Config, Error, Logger, MessageEvent, Output, UpdateEvent, internal};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::Path;
use std::thread;
use tempfile::TempDir;

/// Fails every message write.
struct FailingOutput;

impl Output for FailingOutput {
    fn message(&self, _event: &MessageEvent<'_>) -> Result<(), Error> {
        Err(Error::Io(io::Error::other("disk full")))
    }

    fn update(&self, _event: &UpdateEvent<'_>) -> Result<(), Error> {
        Ok(())
    }
}

fn json_config(path: &Path, level: &str) -> Config {
    Config::parse(&format!(
        "[general]\nlevel = \"{level}\"\n[actions]\nenabled = false\n[json]\nenabled = true\npath = \"{}\"\n",
        path.display()
    ))
    .unwrap()
}

#[test]
fn sink_failures_are_reported_and_other_outputs_still_run() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("internal.jsonl");
    let config = json_config(&path, "warning");

    thread::spawn(move || {
        internal::init_with_config(&config);

        let capture = CaptureOutput::new();
        let logger = Logger::builder()
            .output(FailingOutput)
            .output(capture.clone())
            .build();
        logger.info("still delivered");

        assert_eq!(capture.messages(), ["still delivered"]);
    })
    .join()
    .unwrap();

    let entries: Vec<Value> = fs::read_to_string(&path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["level"], "error");
    assert_eq!(entries[0]["scopes"], serde_json::json!(["OUTPUT"]));
    assert!(entries[0]["msg"].as_str().unwrap().contains("disk full"));
}

#[test]
fn failures_inside_the_internal_logger_do_not_recurse() {
    let tmp_dir = TempDir::new().unwrap();
    let blocker = tmp_dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let path = blocker.join("nested").join("internal.jsonl");
    let config = json_config(&path, "info");

    thread::spawn(move || {
        internal::init_with_config(&config);
        internal::warning("TEST", "cannot be written");
        internal::error("TEST", "cannot be written either");
    })
    .join()
    .unwrap();

    assert!(!path.exists());
}

#[test]
fn disabled_outputs_are_not_built() {
    thread::spawn(|| {
        let config = Config::parse("[terminal]\nenabled = false\n").unwrap();
        internal::init_with_config(&config);
        assert!(internal::is_initialized());
        // Nothing to write to; must be a silent no-op
        internal::error("TEST", "dropped");
    })
    .join()
    .unwrap();
}
