//! Destinations for report lines produced by the grade aggregator.

use std::sync::Mutex;

/// Leveled line sink. Timestamps are the sink's business.
pub trait ReportSink: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

// ── TracingSink ───────────────────────────────────────────────────────────────

/// Forwards every line to the global `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

// ── MemorySink ────────────────────────────────────────────────────────────────

/// Severity recorded by [`MemorySink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// Keeps every line in memory. Used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Only the message texts, in order.
    pub fn messages(&self) -> Vec<String> {
        self.lines().into_iter().map(|(_, msg)| msg).collect()
    }

    fn push(&self, level: Level, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, message.to_string()));
        }
    }
}

impl ReportSink for MemorySink {
    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }
}
