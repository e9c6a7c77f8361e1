//! Logger handle carried by a logging context

use super::{
    error::Result,
    field::Field,
    level_controller::LevelController,
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    writer::WriterChain,
};
use std::fmt;
use std::sync::Arc;

/// Immutable handle on a writer chain.
///
/// Cloning is cheap. `with` never touches `self`; it builds a new chain
/// carrying the extra fields and returns a new handle.
#[derive(Clone)]
pub struct Logger {
    chain: Arc<WriterChain>,
    level: LevelController,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    pub(crate) fn new(
        chain: WriterChain,
        level: LevelController,
        metrics: Arc<LoggerMetrics>,
    ) -> Self {
        Self {
            chain: Arc::new(chain),
            level,
            metrics,
        }
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.level.enabled(level)
    }

    pub fn level(&self) -> LogLevel {
        self.level.level()
    }

    pub fn level_controller(&self) -> &LevelController {
        &self.level
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Fields accumulated through every `with` on this lineage, in order
    pub fn fields(&self) -> &[Field] {
        self.chain.sink().fields()
    }

    pub fn chain(&self) -> &WriterChain {
        &self.chain
    }

    /// New handle whose records also carry `fields`
    #[must_use]
    pub fn with(&self, fields: &[Field]) -> Logger {
        if fields.is_empty() {
            return self.clone();
        }

        Logger {
            chain: Arc::new(self.chain.with(fields)),
            level: self.level.clone(),
            metrics: Arc::clone(&self.metrics),
        }
    }

    /// Write one record if `level` is enabled.
    ///
    /// Backend failures are counted in the metrics and reported on stderr;
    /// they never reach the caller.
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>, fields: &[Field]) {
        if !self.enabled(level) {
            return;
        }

        let entry = LogEntry::new(level, message);
        if let Err(e) = self.chain.write(&entry, fields) {
            eprintln!("[LOGGER ERROR] Failed to write {} record: {}", level, e);
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.chain.flush()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("fields", &self.fields())
            .field("hook_layers", &self.chain.depth())
            .finish()
    }
}
