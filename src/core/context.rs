//! Logging context
//!
//! A `LoggingContext` is an immutable value passed down call chains. It
//! carries three independent slots (a `Logger`, the lineage's
//! `LevelController` and the configured error key) plus arbitrary typed
//! values. Every operation returns a new context; none mutates its input.
//!
//! A context that was not produced by `ContextBuilder::build` has empty
//! logging slots, and every logging operation on it is a silent no-op.

use super::{
    encoder::DEFAULT_ERROR_KEY,
    field::{Field, FieldValue},
    level_controller::LevelController,
    log_level::LogLevel,
    logger::Logger,
    metrics::LoggerMetrics,
};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type Values = HashMap<TypeId, Arc<dyn Any + Send + Sync>>;

#[derive(Clone, Default)]
pub struct LoggingContext {
    logger: Option<Logger>,
    level: Option<LevelController>,
    error_key: Option<Arc<str>>,
    values: Option<Arc<Values>>,
}

impl LoggingContext {
    /// Empty context with no logger attached
    pub fn background() -> Self {
        Self::default()
    }

    /// Context derived from `parent` with all three logging slots set
    pub(crate) fn with_logging(
        parent: &LoggingContext,
        logger: Logger,
        level: LevelController,
        error_key: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            logger: Some(logger),
            level: Some(level),
            error_key: Some(error_key.into()),
            values: parent.values.clone(),
        }
    }

    pub fn has_logger(&self) -> bool {
        self.logger.is_some()
    }

    pub fn logger(&self) -> Option<&Logger> {
        self.logger.as_ref()
    }

    /// Threshold of this context's level controller, if it carries one
    pub fn level(&self) -> Option<LogLevel> {
        self.level.as_ref().map(LevelController::level)
    }

    /// Error key configured on the root, if this context carries one
    pub fn configured_error_key(&self) -> Option<&str> {
        self.error_key.as_deref()
    }

    /// Key used for error options, falling back to `DEFAULT_ERROR_KEY`
    pub fn error_key(&self) -> &str {
        self.configured_error_key().unwrap_or(DEFAULT_ERROR_KEY)
    }

    /// Fields accumulated on this context's logger
    pub fn fields(&self) -> &[Field] {
        self.logger.as_ref().map(Logger::fields).unwrap_or(&[])
    }

    pub fn metrics(&self) -> Option<&LoggerMetrics> {
        self.logger.as_ref().map(Logger::metrics)
    }

    /// Derived context whose records also carry `key`
    ///
    /// Returns an identical context if no logger is attached.
    #[must_use]
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        match self.logger {
            Some(_) => self.derive(&[Field::new(key, value)]),
            None => self.clone(),
        }
    }

    /// Derived context whose records also carry every field in `fields`
    ///
    /// Returns an identical context if no logger is attached.
    #[must_use]
    pub fn with_fields<I, K, V>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        if self.logger.is_none() {
            return self.clone();
        }

        let fields: Vec<Field> = fields.into_iter().map(Field::from).collect();
        self.derive(&fields)
    }

    fn derive(&self, fields: &[Field]) -> Self {
        Self {
            logger: self.logger.as_ref().map(|logger| logger.with(fields)),
            ..self.clone()
        }
    }

    /// Attach `source`'s logger to a context derived from `target`.
    ///
    /// Only the logger travels; `target` keeps its own level controller,
    /// error key and values. If `source` has no logger, `target` is
    /// returned unchanged.
    #[must_use]
    pub fn copy_into(target: &LoggingContext, source: &LoggingContext) -> Self {
        match source.logger {
            Some(ref logger) => Self {
                logger: Some(logger.clone()),
                ..target.clone()
            },
            None => target.clone(),
        }
    }

    /// Change the threshold for every context sharing this lineage.
    ///
    /// No-op if this context carries no level controller.
    pub fn set_level(&self, level: LogLevel) {
        if let Some(ref controller) = self.level {
            controller.set_level(level);
        }
    }

    /// Derived context carrying `value`, replacing any value of the same type
    #[must_use]
    pub fn with_value<T: Send + Sync + 'static>(&self, value: T) -> Self {
        let mut values: Values = self.values.as_deref().cloned().unwrap_or_default();
        values.insert(TypeId::of::<T>(), Arc::new(value));

        Self {
            values: Some(Arc::new(values)),
            ..self.clone()
        }
    }

    pub fn value<T: Send + Sync + 'static>(&self) -> Option<&T> {
        let entry = self.values.as_ref()?.get(&TypeId::of::<T>())?;
        let value: &(dyn Any + Send + Sync) = &**entry;
        value.downcast_ref::<T>()
    }

    /// Whether both contexts share one level controller
    pub fn same_lineage(&self, other: &LoggingContext) -> bool {
        match (&self.level, &other.level) {
            (Some(a), Some(b)) => a.same_lineage(b),
            _ => false,
        }
    }
}

/// Attach the logger of `from` to a context derived from `to`.
///
/// See [`LoggingContext::copy_into`].
pub fn copy_context(to: &LoggingContext, from: &LoggingContext) -> LoggingContext {
    LoggingContext::copy_into(to, from)
}

impl fmt::Debug for LoggingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingContext")
            .field("logger", &self.logger)
            .field("level", &self.level())
            .field("error_key", &self.error_key)
            .field("values", &self.values.as_ref().map_or(0, |v| v.len()))
            .finish()
    }
}
