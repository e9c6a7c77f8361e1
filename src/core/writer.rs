//! Backend writer chain
//!
//! A chain is an explicit ownership list: zero or more `HookCore` layers,
//! each owning the layer beneath it, terminating in a `SinkCore` that owns
//! (a shared handle to) the appender. Deriving a chain with `with` rebuilds
//! every layer; no layer is ever mutated after construction.

use super::{
    appender::Appender,
    error::{LoggerError, Result},
    field::Field,
    hooks::HookCore,
    level_controller::LevelController,
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
};
use parking_lot::Mutex;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Terminal layer: accumulated fields plus the shared appender
pub struct SinkCore {
    appender: Arc<Mutex<Box<dyn Appender>>>,
    level: LevelController,
    fields: Vec<Field>,
    metrics: Arc<LoggerMetrics>,
}

impl SinkCore {
    pub fn new(
        appender: Box<dyn Appender>,
        level: LevelController,
        metrics: Arc<LoggerMetrics>,
    ) -> Self {
        Self {
            appender: Arc::new(Mutex::new(appender)),
            level,
            fields: Vec::new(),
            metrics,
        }
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.level.enabled(level)
    }

    /// Fields persisted by this sink for every record
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn with(&self, fields: &[Field]) -> SinkCore {
        let mut accumulated = Vec::with_capacity(self.fields.len() + fields.len());
        accumulated.extend_from_slice(&self.fields);
        accumulated.extend_from_slice(fields);

        SinkCore {
            appender: Arc::clone(&self.appender),
            level: self.level.clone(),
            fields: accumulated,
            metrics: Arc::clone(&self.metrics),
        }
    }

    /// Persist one record: accumulated fields first, then `fields`
    ///
    /// A panicking appender is contained and reported as an error.
    pub fn write(&self, entry: &LogEntry, fields: &[Field]) -> Result<()> {
        let merged: Vec<Field> = if self.fields.is_empty() {
            fields.to_vec()
        } else {
            self.fields.iter().chain(fields).cloned().collect()
        };

        let mut appender = self.appender.lock();
        let result = catch_unwind(AssertUnwindSafe(|| appender.append(entry, &merged)));

        match result {
            Ok(Ok(())) => {
                self.metrics.record_written();
                Ok(())
            }
            Ok(Err(e)) => {
                self.metrics.record_write_failure();
                Err(e)
            }
            Err(panic_info) => {
                self.metrics.record_write_failure();
                Err(LoggerError::writer(format!(
                    "appender '{}' panicked: {}",
                    appender.name(),
                    panic_message(&*panic_info)
                )))
            }
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.appender.lock().flush()
    }

    pub fn appender_name(&self) -> String {
        self.appender.lock().name().to_string()
    }
}

/// One link of the writer chain
pub enum WriterChain {
    Sink(SinkCore),
    Hooked(HookCore),
}

impl WriterChain {
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.sink().enabled(level)
    }

    pub fn write(&self, entry: &LogEntry, fields: &[Field]) -> Result<()> {
        match self {
            WriterChain::Sink(sink) => sink.write(entry, fields),
            WriterChain::Hooked(hooked) => hooked.write(entry, fields),
        }
    }

    pub fn with(&self, fields: &[Field]) -> WriterChain {
        match self {
            WriterChain::Sink(sink) => WriterChain::Sink(sink.with(fields)),
            WriterChain::Hooked(hooked) => WriterChain::Hooked(hooked.with(fields)),
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.sink().flush()
    }

    /// Terminal layer of the chain
    pub fn sink(&self) -> &SinkCore {
        let mut link = self;
        loop {
            match link {
                WriterChain::Sink(sink) => return sink,
                WriterChain::Hooked(hooked) => link = hooked.inner(),
            }
        }
    }

    /// Number of hook layers above the sink
    pub fn depth(&self) -> usize {
        match self {
            WriterChain::Sink(_) => 0,
            WriterChain::Hooked(hooked) => 1 + hooked.inner().depth(),
        }
    }
}

pub(crate) fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
