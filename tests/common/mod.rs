//! Shared capture helpers for the integration tests.

#![allow(dead_code)]

use grouplog::{AnnotationProperties, MessageEvent, Output, Severity, UpdateEvent, UpdateKind};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Message {
        scopes: Vec<String>,
        active_group: Option<usize>,
        severity: Severity,
        text: String,
        properties: Option<AnnotationProperties>,
    },
    Update {
        kind: UpdateKind,
        scopes: Vec<String>,
        label: Option<String>,
    },
}

/// Records every event it receives.
#[derive(Clone, Default)]
pub struct CaptureOutput {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CaptureOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    /// Payload text of every message, in order.
    pub fn messages(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Message { text, .. } => Some(text),
                Call::Update { .. } => None,
            })
            .collect()
    }

    pub fn updates(&self) -> Vec<UpdateKind> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Update { kind, .. } => Some(kind),
                Call::Message { .. } => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().expect("calls lock poisoned").clear();
    }
}

fn labels(scopes: &[grouplog::ScopeEntry]) -> Vec<String> {
    scopes.iter().map(|entry| entry.label.clone()).collect()
}

impl Output for CaptureOutput {
    fn message(&self, event: &MessageEvent<'_>) -> Result<(), grouplog::Error> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(Call::Message {
                scopes: labels(event.scopes),
                active_group: event.active_group,
                severity: event.severity,
                text: event.payload.to_string(),
                properties: event.properties.cloned(),
            });
        Ok(())
    }

    fn update(&self, event: &UpdateEvent<'_>) -> Result<(), grouplog::Error> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(Call::Update {
                kind: event.kind,
                scopes: labels(event.scopes),
                label: event.label.map(ToString::to_string),
            });
        Ok(())
    }
}

/// In-memory `Write` target that can be read back after the output consumed it.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.bytes.lock().expect("buffer lock poisoned").clone())
            .expect("utf-8 output")
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(ToString::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .expect("buffer lock poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
