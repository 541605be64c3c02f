//! Scope labels become a `[a] [b] ` prefix in front of each message. Sinks share this
//! so they agree on what a line looks like.

use crate::scope::ScopeEntry;
use std::fmt::{Display, Write};

/// Concatenates `[label] ` for the scopes a message should be prefixed with.
///
/// With `grouping`, only entries after the active group count: the group itself is
/// shown by the sink's own section marker. Without it, every entry counts.
#[must_use]
pub fn prefix(scopes: &[ScopeEntry], active_group: Option<usize>, grouping: bool) -> String {
    let start = match active_group {
        Some(index) if grouping => index + 1,
        _ => 0,
    };

    let mut out = String::new();
    for entry in scopes.iter().skip(start) {
        let _ = write!(out, "[{}] ", entry.label);
    }
    out
}

/// Group-begin title: the contexts opened before the group, then the group's own label.
#[must_use]
pub fn group_title(scopes: &[ScopeEntry], label: &str) -> String {
    let mut out = String::new();
    for entry in scopes.iter().take_while(|entry| !entry.is_group) {
        let _ = write!(out, "[{}] ", entry.label);
    }
    out.push_str(label);
    out.trim_end().to_string()
}

/// Prefix and message text, with trailing whitespace removed.
#[must_use]
pub fn line(prefix: &str, message: impl Display) -> String {
    let mut out = format!("{prefix}{message}");
    out.truncate(out.trim_end().len());
    out
}
