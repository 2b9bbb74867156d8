//! Append-only admin remark log.
//!
//! The log is a plain string with one `"[timestamp] text"` entry per line.
//! Entries are only ever appended; nothing rewrites or truncates history.

use chrono::SecondsFormat;

use crate::types::Timestamp;

/// Format a single log entry.
pub fn format_remark(text: &str, at: Timestamp) -> String {
    format!(
        "[{}] {}",
        at.to_rfc3339_opts(SecondsFormat::Secs, true),
        text.trim()
    )
}

/// Append a timestamped entry to an existing remark log.
pub fn append_remark(existing: &str, text: &str, at: Timestamp) -> String {
    let entry = format_remark(text, at);
    if existing.is_empty() {
        entry
    } else {
        format!("{existing}\n{entry}")
    }
}
