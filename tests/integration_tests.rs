//! Integration tests for rust_context_logger
//!
//! These tests verify:
//! - Severity filtering across every threshold
//! - Context immutability and field accumulation
//! - Shared level control across a lineage
//! - Hook field visibility and failure isolation
//! - Context copying
//! - Lazy option evaluation
//! - File destinations and encoded keys

use parking_lot::Mutex;
use rust_context_logger::appenders::{ObservedLogs, ObserverAppender};
use rust_context_logger::prelude::*;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

fn observed_root(level: LogLevel) -> (LoggingContext, ObservedLogs) {
    let (appender, logs) = ObserverAppender::new();
    let ctx = ContextBuilder::new()
        .level(level)
        .appender(appender)
        .build(None);
    (ctx, logs)
}

fn emit_at(ctx: &LoggingContext, level: LogLevel, message: &str) {
    match level {
        LogLevel::Debug => debug(ctx, message, []),
        LogLevel::Info => info(ctx, message, []),
        LogLevel::Warn => warn(ctx, message, []),
        LogLevel::Error => error(ctx, message, []),
        LogLevel::Panic => {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                panic(ctx, message, [])
            }));
            assert!(result.is_err(), "panic severity should unwind when enabled");
        }
    }
}

#[test]
fn test_threshold_matrix() {
    for threshold in LogLevel::ALL {
        for severity in LogLevel::ALL {
            let (ctx, logs) = observed_root(threshold);
            emit_at(&ctx, severity, "probe");

            let expected = severity >= threshold;
            assert_eq!(
                logs.len(),
                usize::from(expected),
                "severity {} at threshold {}",
                severity,
                threshold
            );
            assert_eq!(enabled(&ctx, severity), expected);
        }
    }
}

#[test]
fn test_enabled_checks_follow_threshold() {
    let (ctx, _logs) = observed_root(LogLevel::Warn);

    assert!(!debug_enabled(&ctx));
    assert!(!info_enabled(&ctx));
    assert!(warn_enabled(&ctx));
    assert!(error_enabled(&ctx));
    assert!(panic_enabled(&ctx));
}

#[test]
fn test_derivation_leaves_parent_unchanged() {
    let (root, logs) = observed_root(LogLevel::Info);

    let child = root.with_field("user", "alice");
    info(&root, "from root", []);
    info(&child, "from child", []);

    let records = logs.all();
    assert!(records[0].fields.is_empty());
    assert_eq!(records[1].fields, vec![Field::new("user", "alice")]);
    assert!(root.fields().is_empty());
}

#[test]
fn test_fields_accumulate_in_order() {
    let (root, logs) = observed_root(LogLevel::Info);

    let ctx = root
        .with_field("a", 1)
        .with_fields([("b", 2), ("c", 3)])
        .with_field("d", 4);
    info(&ctx, "m", [LogOption::field("e", 5)]);

    assert_eq!(logs.all()[0].keys(), vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn test_sibling_contexts_are_independent() {
    let (root, logs) = observed_root(LogLevel::Info);
    let base = root.with_field("svc", "api");

    let left = base.with_field("branch", "left");
    let right = base.with_field("branch", "right");
    info(&left, "l", []);
    info(&right, "r", []);

    let records = logs.all();
    assert_eq!(records[0].field("branch"), Some(&FieldValue::from("left")));
    assert_eq!(records[1].field("branch"), Some(&FieldValue::from("right")));
    assert_eq!(records[1].keys(), vec!["svc", "branch"]);
}

#[test]
fn test_set_level_affects_whole_lineage() {
    let (root, logs) = observed_root(LogLevel::Debug);
    let child = root.with_field("k", "v");
    let grandchild = child.with_field("n", 1);

    grandchild.set_level(LogLevel::Error);

    for ctx in [&root, &child, &grandchild] {
        assert_eq!(ctx.level(), Some(LogLevel::Error));
        warn(ctx, "suppressed", []);
    }
    error(&child, "kept", []);

    assert_eq!(logs.messages(), vec!["kept"]);

    root.set_level(LogLevel::Debug);
    assert!(debug_enabled(&grandchild));
}

#[test]
fn test_separate_roots_have_separate_levels() {
    let (first, _) = observed_root(LogLevel::Info);
    let (second, _) = observed_root(LogLevel::Info);

    first.set_level(LogLevel::Error);
    assert!(!info_enabled(&first));
    assert!(info_enabled(&second));
}

#[test]
fn test_hooks_see_complete_field_set() {
    let seen: Arc<Mutex<Vec<(LogLevel, Vec<Field>)>>> = Arc::default();
    let sink = Arc::clone(&seen);

    let (appender, logs) = ObserverAppender::new();
    let root = ContextBuilder::new()
        .appender(appender)
        .field("service", "billing")
        .on_record(move |entry, fields| sink.lock().push((entry.level, fields.to_vec())))
        .build(None);

    let ctx = root.with_field("request_id", "r-9");
    warn(&ctx, "slow", [LogOption::field("elapsed_ms", 812)]);

    let expected = vec![
        Field::new("service", "billing"),
        Field::new("request_id", "r-9"),
        Field::new("elapsed_ms", 812),
    ];
    let seen = seen.lock();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], (LogLevel::Warn, expected.clone()));
    assert_eq!(logs.all()[0].fields, expected);
}

#[test]
fn test_hooks_skipped_for_disabled_levels() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let (appender, _logs) = ObserverAppender::new();
    let ctx = ContextBuilder::new()
        .level(LogLevel::Warn)
        .appender(appender)
        .on_record(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .build(None);

    info(&ctx, "below threshold", []);
    error(&ctx, "above threshold", []);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_failing_hook_still_writes_once() {
    let after = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&after);

    let (appender, logs) = ObserverAppender::new();
    let ctx = ContextBuilder::new()
        .appender(appender)
        .on_record(|_, _| panic!("hook exploded"))
        .on_record(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .build(None);

    info(&ctx.with_field("k", "v"), "survives", []);

    assert_eq!(logs.len(), 1);
    assert_eq!(logs.messages(), vec!["survives"]);
    assert_eq!(after.load(Ordering::SeqCst), 1);

    let metrics = ctx.metrics().expect("root has a logger");
    assert_eq!(metrics.hook_failures(), 1);
    assert_eq!(metrics.records_written(), 1);
}

#[test]
fn test_hook_logging_through_context_does_not_recurse() {
    let (appender, logs) = ObserverAppender::new();
    let slot: Arc<Mutex<Option<LoggingContext>>> = Arc::default();
    let hook_slot = Arc::clone(&slot);

    let ctx = ContextBuilder::new()
        .appender(appender)
        .on_record(move |entry, _| {
            if let Some(ref ctx) = *hook_slot.lock() {
                info(ctx, format!("saw {}", entry.message), []);
            }
        })
        .build(None);
    *slot.lock() = Some(ctx.clone());

    info(&ctx, "outer", []);

    assert_eq!(logs.messages(), vec!["saw outer", "outer"]);
}

#[test]
fn test_hook_forwarding_to_another_root_runs_its_hooks() {
    let audit_seen: Arc<Mutex<Vec<String>>> = Arc::default();
    let recorder = Arc::clone(&audit_seen);

    let (audit_appender, audit_logs) = ObserverAppender::new();
    let audit = ContextBuilder::new()
        .appender(audit_appender)
        .on_record(move |entry, _| recorder.lock().push(entry.message.clone()))
        .build(None);

    let (app_appender, app_logs) = ObserverAppender::new();
    let forward_to = audit.clone();
    let app = ContextBuilder::new()
        .appender(app_appender)
        .on_record(move |entry, _| info(&forward_to, format!("forwarded {}", entry.message), []))
        .build(None);

    info(&app, "req", []);

    assert_eq!(app_logs.messages(), vec!["req"]);
    assert_eq!(audit_logs.messages(), vec!["forwarded req"]);
    assert_eq!(*audit_seen.lock(), vec!["forwarded req".to_string()]);
}

#[test]
fn test_copy_into_transfers_logger() {
    #[derive(Debug, PartialEq)]
    struct TraceId(u64);

    let (source, logs) = observed_root(LogLevel::Info);
    let source = source.with_field("svc", "worker");

    let target = LoggingContext::background().with_value(TraceId(77));
    let copied = copy_context(&target, &source);

    info(&copied, "from copy", []);
    let record = &logs.all()[0];
    assert_eq!(record.field("svc"), Some(&FieldValue::from("worker")));
    assert_eq!(copied.value::<TraceId>(), Some(&TraceId(77)));

    // the level controller stays with the target
    assert_eq!(copied.level(), None);
    copied.set_level(LogLevel::Error);
    assert_eq!(source.level(), Some(LogLevel::Info));
}

#[test]
fn test_copy_into_identity() {
    let (root, logs) = observed_root(LogLevel::Info);
    let ctx = root.with_field("k", "v");

    let copied = LoggingContext::copy_into(&ctx, &ctx);
    assert_eq!(copied.fields(), ctx.fields());
    assert!(copied.same_lineage(&ctx));

    info(&copied, "m", []);
    assert_eq!(logs.all()[0].fields, vec![Field::new("k", "v")]);
}

#[test]
fn test_copy_from_plain_source_leaves_target_alone() {
    let (target, logs) = observed_root(LogLevel::Info);
    let copied = copy_context(&target, &LoggingContext::background());

    assert!(copied.has_logger());
    info(&copied, "still target", []);
    assert_eq!(logs.messages(), vec!["still target"]);
}

#[test]
fn test_lazy_options_not_evaluated_when_disabled() {
    let (ctx, logs) = observed_root(LogLevel::Error);
    let evaluations = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&evaluations);
    info(
        &ctx,
        "skipped",
        [LogOption::lazy_field("expensive", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            "computed"
        })],
    );
    assert_eq!(evaluations.load(Ordering::SeqCst), 0);
    assert!(logs.is_empty());

    let counter = Arc::clone(&evaluations);
    error(
        &ctx,
        "written",
        [LogOption::lazy_field("expensive", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            "computed"
        })],
    );
    assert_eq!(evaluations.load(Ordering::SeqCst), 1);
    assert_eq!(logs.all()[0].field("expensive"), Some(&FieldValue::from("computed")));
}

#[test]
fn test_plain_context_operations_are_noops() {
    let ctx = LoggingContext::background();

    let derived = ctx.with_field("a", 1).with_fields([("b", 2)]);
    derived.set_level(LogLevel::Debug);
    info(&derived, "nowhere", [LogOption::field("c", 3)]);

    assert!(!derived.has_logger());
    assert!(!enabled(&derived, LogLevel::Panic));
    assert!(flush(&derived).is_ok());
}

#[test]
fn test_error_option_and_duplicate_keys() {
    let (appender, logs) = ObserverAppender::new();
    let ctx = ContextBuilder::new()
        .appender(appender)
        .error_key("err")
        .build(None);

    let failure = std::io::Error::other("broken pipe");
    error(
        &ctx,
        "write failed",
        [
            LogOption::field("attempt", 1),
            LogOption::error(&failure),
            LogOption::field("attempt", 2),
        ],
    );

    let record = &logs.all()[0];
    assert_eq!(record.keys(), vec!["attempt", "err"]);
    assert_eq!(record.field("attempt"), Some(&FieldValue::Int(2)));
    assert_eq!(record.field("err"), Some(&FieldValue::from("broken pipe")));
}

#[test]
fn test_file_destination_writes_json_lines() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("context.log");

    let root = ContextBuilder::new()
        .level(LogLevel::Debug)
        .json_encoding()
        .output_path(&log_file)
        .message_key("message")
        .level_key("level")
        .no_time_key()
        .build(None);

    let ctx = root.with_field("request_id", "abc");
    debug(&ctx, "first", []);
    warn(&ctx, "second\ninjected", [LogOption::field("retry", true)]);
    flush(&ctx).expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: serde_json::Value = serde_json::from_str(lines[0]).expect("valid json");
    assert_eq!(first["message"], "first");
    assert_eq!(first["level"], "DEBUG");
    assert_eq!(first["request_id"], "abc");
    assert!(first.get("time").is_none());

    let second: serde_json::Value = serde_json::from_str(lines[1]).expect("valid json");
    assert_eq!(second["message"], "second\ninjected");
    assert_eq!(second["retry"], true);
}

#[test]
fn test_console_encoding_to_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("console.log");

    let ctx = ContextBuilder::new()
        .console_encoding()
        .destination(Destination::File(log_file.clone()))
        .no_time_key()
        .build(None)
        .with_field("user", "bob");

    info(&ctx, "hello", []);
    flush(&ctx).expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content.trim_end(), "INFO\thello\t{\"user\":\"bob\"}");
}

#[test]
fn test_console_lines_cannot_be_forged() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("injection.log");

    let seen: Arc<Mutex<Vec<String>>> = Arc::default();
    let recorder = Arc::clone(&seen);
    let ctx = ContextBuilder::new()
        .output_path(&log_file)
        .no_time_key()
        .on_record(move |entry, _| recorder.lock().push(entry.message.clone()))
        .build(None);

    let malicious = "User login\nERROR Fake error injected\tx";
    info(&ctx, malicious, []);
    flush(&ctx).expect("Failed to flush");

    // hooks see the message as emitted
    assert_eq!(*seen.lock(), vec![malicious.to_string()]);

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines, vec!["INFO\tUser login\\nERROR Fake error injected\\tx"]);
}

#[test]
fn test_unopenable_destination_fails_build() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let bad_path = temp_dir.path().join("missing").join("dir").join("x.log");

    let result = ContextBuilder::new().output_path(bad_path).try_build(None);
    assert!(matches!(result, Err(LoggerError::IoOperation { .. })));
}

#[test]
fn test_config_driven_root() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("configured.log");

    let json = serde_json::json!({
        "level": "warn",
        "encoding": "json",
        "output": { "file": log_file.to_str().expect("utf-8 path") },
        "time_key": "",
        "error_key": "cause",
    })
    .to_string();
    let config = ContextConfig::from_json(&json).expect("valid config");

    let ctx = ContextBuilder::from_config(config).build(None);
    info(&ctx, "dropped", []);
    error(&ctx, "kept", [LogOption::Error("boom".to_string())]);
    flush(&ctx).expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let record: serde_json::Value =
        serde_json::from_str(content.trim_end()).expect("single json line");
    assert_eq!(record["msg"], "kept");
    assert_eq!(record["severity"], "ERROR");
    assert_eq!(record["cause"], "boom");
    assert!(record.get("time").is_none());
}
