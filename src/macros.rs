//! Formatting macros over the emit functions.
//!
//! The message is formatted, and the `{ key => value }` fields built, only
//! when the severity is enabled for the context.
//!
//! # Examples
//!
//! ```
//! use rust_context_logger::prelude::*;
//! use rust_context_logger::appenders::ObserverAppender;
//!
//! let (appender, logs) = ObserverAppender::new();
//! let ctx = ContextBuilder::new().appender(appender).build(None);
//!
//! rust_context_logger::info!(ctx, "listening on port {}", 8080);
//! rust_context_logger::warn!(ctx, { "attempt" => 3, "max" => 5 }, "retrying {}", "upstream");
//!
//! assert_eq!(logs.messages(), vec!["listening on port 8080", "retrying upstream"]);
//! ```

/// Log at an explicit level.
///
/// ```
/// # use rust_context_logger::prelude::*;
/// # let ctx = LoggingContext::background();
/// use rust_context_logger::log;
/// log!(ctx, LogLevel::Info, "simple message");
/// log!(ctx, LogLevel::Error, { "status" => 500 }, "request failed: {}", "timeout");
/// ```
#[macro_export]
macro_rules! log {
    ($ctx:expr, $level:expr, { $($key:expr => $value:expr),* $(,)? }, $($arg:tt)+) => {{
        let ctx: &$crate::LoggingContext = &$ctx;
        let level: $crate::LogLevel = $level;
        if $crate::facade::enabled(ctx, level) {
            let options: ::std::vec::Vec<$crate::LogOption> =
                ::std::vec![$($crate::LogOption::field($key, $value)),*];
            $crate::facade::log(ctx, level, ::std::format!($($arg)+), options);
        }
    }};
    ($ctx:expr, $level:expr, $($arg:tt)+) => {{
        let ctx: &$crate::LoggingContext = &$ctx;
        let level: $crate::LogLevel = $level;
        if $crate::facade::enabled(ctx, level) {
            $crate::facade::log(
                ctx,
                level,
                ::std::format!($($arg)+),
                ::std::vec::Vec::<$crate::LogOption>::new(),
            );
        }
    }};
}

#[macro_export]
macro_rules! debug {
    ($ctx:expr, $($arg:tt)+) => {
        $crate::log!($ctx, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($ctx:expr, $($arg:tt)+) => {
        $crate::log!($ctx, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($ctx:expr, $($arg:tt)+) => {
        $crate::log!($ctx, $crate::LogLevel::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($ctx:expr, $($arg:tt)+) => {
        $crate::log!($ctx, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log at `Panic`, then panic with the formatted message.
///
/// Does nothing if the context has no logger or `Panic` is disabled.
#[macro_export]
macro_rules! log_panic {
    ($ctx:expr, { $($key:expr => $value:expr),* $(,)? }, $($arg:tt)+) => {{
        let ctx: &$crate::LoggingContext = &$ctx;
        if $crate::facade::panic_enabled(ctx) {
            let options: ::std::vec::Vec<$crate::LogOption> =
                ::std::vec![$($crate::LogOption::field($key, $value)),*];
            $crate::facade::panic(ctx, ::std::format!($($arg)+), options);
        }
    }};
    ($ctx:expr, $($arg:tt)+) => {{
        let ctx: &$crate::LoggingContext = &$ctx;
        if $crate::facade::panic_enabled(ctx) {
            $crate::facade::panic(
                ctx,
                ::std::format!($($arg)+),
                ::std::vec::Vec::<$crate::LogOption>::new(),
            );
        }
    }};
}
