//! Emit functions
//!
//! One function per severity plus the matching `*_enabled` checks. All of
//! them accept any `LoggingContext`; on a context without a logger they do
//! nothing and the checks return `false`.
//!
//! Options are consumed only after the level check passes, so an iterator
//! of options (or a `LogOption::LazyField`) costs nothing for a disabled
//! severity.

use crate::core::{LogLevel, LogOption, LoggingContext, RecordOptions, Result};

/// Whether a record at `level` would be written through `ctx`
#[inline]
pub fn enabled(ctx: &LoggingContext, level: LogLevel) -> bool {
    ctx.logger().is_some_and(|logger| logger.enabled(level))
}

#[inline]
pub fn debug_enabled(ctx: &LoggingContext) -> bool {
    enabled(ctx, LogLevel::Debug)
}

#[inline]
pub fn info_enabled(ctx: &LoggingContext) -> bool {
    enabled(ctx, LogLevel::Info)
}

#[inline]
pub fn warn_enabled(ctx: &LoggingContext) -> bool {
    enabled(ctx, LogLevel::Warn)
}

#[inline]
pub fn error_enabled(ctx: &LoggingContext) -> bool {
    enabled(ctx, LogLevel::Error)
}

#[inline]
pub fn panic_enabled(ctx: &LoggingContext) -> bool {
    enabled(ctx, LogLevel::Panic)
}

/// Emit one record at `level`
///
/// Returns `true` if the record was handed to the backend.
pub fn log<M, I>(ctx: &LoggingContext, level: LogLevel, message: M, options: I) -> bool
where
    M: AsRef<str>,
    I: IntoIterator<Item = LogOption>,
{
    let Some(logger) = ctx.logger() else {
        return false;
    };
    if !logger.enabled(level) {
        return false;
    }

    let fields = RecordOptions::from_options(options).into_fields(ctx.error_key());
    logger.log(level, message, &fields);
    true
}

pub fn debug<M, I>(ctx: &LoggingContext, message: M, options: I)
where
    M: AsRef<str>,
    I: IntoIterator<Item = LogOption>,
{
    log(ctx, LogLevel::Debug, message, options);
}

pub fn info<M, I>(ctx: &LoggingContext, message: M, options: I)
where
    M: AsRef<str>,
    I: IntoIterator<Item = LogOption>,
{
    log(ctx, LogLevel::Info, message, options);
}

pub fn warn<M, I>(ctx: &LoggingContext, message: M, options: I)
where
    M: AsRef<str>,
    I: IntoIterator<Item = LogOption>,
{
    log(ctx, LogLevel::Warn, message, options);
}

pub fn error<M, I>(ctx: &LoggingContext, message: M, options: I)
where
    M: AsRef<str>,
    I: IntoIterator<Item = LogOption>,
{
    log(ctx, LogLevel::Error, message, options);
}

/// Emit at `Panic`, then unwind with `message`.
///
/// # Panics
///
/// Always panics once the record has been written. Returns normally only
/// when the context has no logger or `Panic` is disabled.
pub fn panic<M, I>(ctx: &LoggingContext, message: M, options: I)
where
    M: AsRef<str>,
    I: IntoIterator<Item = LogOption>,
{
    if log(ctx, LogLevel::Panic, &message, options) {
        panic!("{}", message.as_ref());
    }
}

/// Flush the backend of the context's logger; no-op without one
pub fn flush(ctx: &LoggingContext) -> Result<()> {
    match ctx.logger() {
        Some(logger) => logger.flush(),
        None => Ok(()),
    }
}
