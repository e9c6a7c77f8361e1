//! File logging example
//!
//! Demonstrates JSON records written to a file, with a hook mirroring
//! error records to the console.
//!
//! Run with: cargo run --example file_logging

use rust_context_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust Context Logger - File Logging Example ===\n");

    let root = ContextBuilder::new()
        .level(LogLevel::Debug)
        .json_encoding()
        .output_path("application.log")
        .timestamp_format(TimestampFormat::Rfc3339Millis)
        .field("app", "file_logging")
        .on_record(|entry, fields| {
            if entry.level >= LogLevel::Error {
                println!("   [hook] {} ({} fields)", entry.message, fields.len());
            }
        })
        .try_build(None)?;

    println!("1. Logging to application.log:");
    info(&root, "Application started", []);
    debug(&root, "Loading configuration...", []);
    warn(&root, "Using default settings for some options", []);
    error(&root, "Failed to load optional plugin", [LogOption::field("plugin", "metrics")]);

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        let item = root.with_field("item", i);
        info(&item, format!("Processing item {}/5", i), []);
        if i == 3 {
            warn(&item, "Item took longer than expected", [LogOption::field("elapsed_ms", 1520)]);
        }
    }

    info(&root, "Application shutting down", []);
    flush(&root)?;

    if let Some(metrics) = root.metrics() {
        println!("\n3. Records written: {}", metrics.records_written());
    }

    println!("\n=== Example completed! Check application.log ===");

    Ok(())
}
