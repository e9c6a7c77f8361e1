//! Root context configuration
//!
//! `ContextConfig` is the plain, serializable part of the configuration.
//! `ContextBuilder` adds what cannot be serialized (hooks, a custom sink,
//! initial fields) and builds the root `LoggingContext`.

use super::{
    appender::Appender,
    context::LoggingContext,
    encoder::{
        EncoderConfig, Encoding, TimestampFormat, DEFAULT_ERROR_KEY, DEFAULT_LEVEL_KEY,
        DEFAULT_MESSAGE_KEY, DEFAULT_TIME_KEY,
    },
    error::{LoggerError, Result},
    field::{Field, FieldValue},
    hooks::{Hook, HookCore},
    level_controller::LevelController,
    log_entry::LogEntry,
    log_level::{LogLevel, DEFAULT_LEVEL},
    logger::Logger,
    metrics::LoggerMetrics,
    writer::{SinkCore, WriterChain},
};
use crate::appenders::{ConsoleAppender, FileAppender};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// Where records of the built-in sinks go
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    #[default]
    Stderr,
    Stdout,
    /// Append to a file, created if missing
    File(PathBuf),
}

impl FromStr for Destination {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" => Err(LoggerError::config("Destination", "empty output path")),
            "stderr" => Ok(Destination::Stderr),
            "stdout" => Ok(Destination::Stdout),
            path => Ok(Destination::File(PathBuf::from(path))),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Stderr => write!(f, "stderr"),
            Destination::Stdout => write!(f, "stdout"),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Serializable configuration of a root context
///
/// # Example
///
/// ```
/// use rust_context_logger::{ContextConfig, Encoding, LogLevel};
///
/// let config = ContextConfig::from_json(r#"{"level": "debug", "encoding": "json"}"#).unwrap();
/// assert_eq!(config.level, LogLevel::Debug);
/// assert_eq!(config.encoding, Encoding::Json);
/// assert_eq!(config.message_key, "msg");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    pub level: LogLevel,
    pub encoding: Encoding,
    pub output: Destination,
    pub message_key: String,
    pub level_key: String,
    /// `None` (or an empty key) disables timestamps
    pub time_key: Option<String>,
    pub error_key: String,
    pub timestamp_format: TimestampFormat,
    pub colored_levels: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            encoding: Encoding::default(),
            output: Destination::default(),
            message_key: DEFAULT_MESSAGE_KEY.to_string(),
            level_key: DEFAULT_LEVEL_KEY.to_string(),
            time_key: Some(DEFAULT_TIME_KEY.to_string()),
            error_key: DEFAULT_ERROR_KEY.to_string(),
            timestamp_format: TimestampFormat::default(),
            colored_levels: false,
        }
    }
}

impl ContextConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reject key names the encoders cannot use
    pub fn validate(&self) -> Result<()> {
        for (name, key) in [
            ("message_key", &self.message_key),
            ("level_key", &self.level_key),
            ("error_key", &self.error_key),
        ] {
            if key.trim().is_empty() {
                return Err(LoggerError::config("ContextConfig", format!("{} is empty", name)));
            }
        }
        Ok(())
    }

    pub fn encoder(&self) -> EncoderConfig {
        EncoderConfig {
            encoding: self.encoding,
            message_key: self.message_key.clone(),
            level_key: self.level_key.clone(),
            time_key: self.time_key.clone().filter(|k| !k.is_empty()),
            timestamp_format: self.timestamp_format,
            colored_levels: self.colored_levels,
        }
    }

    fn open_destination(&self) -> Result<Box<dyn Appender>> {
        let encoder = self.encoder();
        let appender: Box<dyn Appender> = match self.output {
            Destination::Stderr => Box::new(ConsoleAppender::stderr(encoder)),
            Destination::Stdout => Box::new(ConsoleAppender::stdout(encoder)),
            Destination::File(ref path) => Box::new(FileAppender::new(path)?.with_encoder(encoder)),
        };
        Ok(appender)
    }
}

/// Builder for a root `LoggingContext`
///
/// # Example
/// ```
/// use rust_context_logger::prelude::*;
/// use std::sync::Arc;
///
/// let ctx = ContextBuilder::new()
///     .level(LogLevel::Debug)
///     .json_encoding()
///     .output_to_stdout()
///     .no_time_key()
///     .hook(Arc::new(|entry: &LogEntry, fields: &[Field]| {
///         let _ = (entry.level, fields.len());
///     }))
///     .build(None);
///
/// assert!(debug_enabled(&ctx));
/// ```
pub struct ContextBuilder {
    config: ContextConfig,
    hooks: Vec<Hook>,
    appender: Option<Box<dyn Appender>>,
    fields: Vec<Field>,
}

impl ContextBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::from_config(ContextConfig::default())
    }

    pub fn from_config(config: ContextConfig) -> Self {
        Self {
            config,
            hooks: Vec::new(),
            appender: None,
            fields: Vec::new(),
        }
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Set the initial threshold (default `Info`)
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn json_encoding(mut self) -> Self {
        self.config.encoding = Encoding::Json;
        self
    }

    /// Human-readable output (the default)
    #[must_use = "builder methods return a new value"]
    pub fn console_encoding(mut self) -> Self {
        self.config.encoding = Encoding::Console;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output_to_stdout(mut self) -> Self {
        self.config.output = Destination::Stdout;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output_to_stderr(mut self) -> Self {
        self.config.output = Destination::Stderr;
        self
    }

    /// Append records to the file at `path`
    #[must_use = "builder methods return a new value"]
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output = Destination::File(path.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn destination(mut self, destination: Destination) -> Self {
        self.config.output = destination;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level_key(mut self, key: impl Into<String>) -> Self {
        self.config.level_key = key.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn message_key(mut self, key: impl Into<String>) -> Self {
        self.config.message_key = key.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_key(mut self, key: impl Into<String>) -> Self {
        self.config.time_key = Some(key.into());
        self
    }

    /// Leave timestamps out of every record
    #[must_use = "builder methods return a new value"]
    pub fn no_time_key(mut self) -> Self {
        self.config.time_key = None;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn error_key(mut self, key: impl Into<String>) -> Self {
        self.config.error_key = key.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.config.timestamp_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn colored_levels(mut self, enabled: bool) -> Self {
        self.config.colored_levels = enabled;
        self
    }

    /// Register a callback observing every emitted record
    ///
    /// Hooks are fixed once the context is built.
    #[must_use = "builder methods return a new value"]
    pub fn hook(mut self, hook: Hook) -> Self {
        self.hooks.push(hook);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn hooks(mut self, hooks: impl IntoIterator<Item = Hook>) -> Self {
        self.hooks.extend(hooks);
        self
    }

    /// Convenience for `hook` with a plain closure
    #[must_use = "builder methods return a new value"]
    pub fn on_record<F>(self, callback: F) -> Self
    where
        F: Fn(&LogEntry, &[Field]) + Send + Sync + 'static,
    {
        self.hook(Arc::new(callback))
    }

    /// Send records to `appender` instead of the configured destination
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appender = Some(Box::new(appender));
        self
    }

    /// Fields carried by every record of the root and its descendants
    #[must_use = "builder methods return a new value"]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.push(Field::new(key, value));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn fields<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.extend(fields.into_iter().map(Field::from));
        self
    }

    /// Build the root context, derived from `parent` or from the background
    pub fn try_build(self, parent: Option<&LoggingContext>) -> Result<LoggingContext> {
        self.config.validate()?;

        let appender = match self.appender {
            Some(appender) => appender,
            None => self.config.open_destination()?,
        };

        let level = LevelController::new(self.config.level);
        let metrics = Arc::new(LoggerMetrics::new());

        let mut chain = WriterChain::Sink(SinkCore::new(
            appender,
            level.clone(),
            Arc::clone(&metrics),
        ));
        if !self.hooks.is_empty() {
            chain = WriterChain::Hooked(HookCore::new(chain, self.hooks, Arc::clone(&metrics)));
        }

        let logger = Logger::new(chain, level.clone(), metrics).with(&self.fields);
        let background = LoggingContext::background();
        let parent = parent.unwrap_or(&background);

        Ok(LoggingContext::with_logging(
            parent,
            logger,
            level,
            self.config.error_key,
        ))
    }

    /// Build the root context.
    ///
    /// # Panics
    ///
    /// Panics if the backend cannot be constructed (for example an output
    /// file that cannot be opened). Use [`try_build`](Self::try_build) to
    /// handle that case.
    pub fn build(self, parent: Option<&LoggingContext>) -> LoggingContext {
        match self.try_build(parent) {
            Ok(ctx) => ctx,
            Err(e) => panic!("failed to build logging context: {}", e),
        }
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggingContext {
    /// Create a builder for a root context
    #[must_use]
    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }
}
