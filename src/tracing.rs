//! Logging setup and compile summaries
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs, including per-phase counts
//! - `RUST_LOG=chordmap::keymap=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/chordmap/logs/chordmap.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use std::collections::BTreeSet;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::keymap::{KeybindingRecord, UNBIND_MARKER};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`) and goes to stderr so
/// records written to stdout stay clean.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "chordmap.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of a record list for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileSummary {
    pub record_count: usize,
    pub keys: BTreeSet<String>,
    pub unbind_count: usize,
}

impl CompileSummary {
    pub fn from_records(records: &[KeybindingRecord]) -> Self {
        Self {
            record_count: records.len(),
            keys: records.iter().map(|r| r.key.clone()).collect(),
            unbind_count: records
                .iter()
                .filter(|r| r.command.starts_with(UNBIND_MARKER))
                .count(),
        }
    }

    /// Generate a diff description between two summaries
    pub fn diff(&self, other: &CompileSummary) -> Option<String> {
        let mut changes = Vec::new();

        if self.record_count != other.record_count {
            changes.push(format!(
                "records: {} → {}",
                self.record_count, other.record_count
            ));
        }

        let added: Vec<&str> = other
            .keys
            .difference(&self.keys)
            .map(String::as_str)
            .collect();
        if !added.is_empty() {
            changes.push(format!("added keys: {}", added.join(", ")));
        }

        let removed: Vec<&str> = self
            .keys
            .difference(&other.keys)
            .map(String::as_str)
            .collect();
        if !removed.is_empty() {
            changes.push(format!("removed keys: {}", removed.join(", ")));
        }

        if self.unbind_count != other.unbind_count {
            changes.push(format!(
                "unbinds: {} → {}",
                self.unbind_count, other.unbind_count
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
