//! Basic context logger usage example
//!
//! Demonstrates building a root context, severity filtering and field
//! accumulation on derived contexts.
//!
//! Run with: cargo run --example basic_usage

use rust_context_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust Context Logger - Basic Usage Example ===\n");

    // Root context writing human-readable lines to stdout
    let root = ContextBuilder::new()
        .level(LogLevel::Debug)
        .output_to_stdout()
        .colored_levels(true)
        .try_build(None)?;

    println!("1. Logging at different levels:");
    debug(&root, "This is a debug message", []);
    info(&root, "This is an info message", []);
    warn(&root, "This is a warning message", []);
    error(&root, "This is an error message", []);

    println!("\n2. Derived contexts carry their fields:");
    let service = root.with_field("service", "inventory");
    let worker = service.with_fields([("worker", "w-3"), ("queue", "restock")]);
    info(&service, "Service ready", []);
    info(&worker, "Job picked up", [LogOption::field("job_id", 9917)]);

    println!("\n3. Changing the level from any context of the lineage:");
    worker.set_level(LogLevel::Warn);
    info(&root, "Info message (hidden)", []);
    warn(&root, "Warning message (visible)", []);
    println!("   root debug enabled: {}", debug_enabled(&root));

    println!("\n4. Errors go under the configured error key:");
    let failure = std::io::Error::other("disk quota exceeded");
    error(&worker, "Job failed", [LogOption::error(&failure)]);

    println!("\n5. Formatting macros:");
    rust_context_logger::warn!(worker, { "retry_in_s" => 30 }, "Retrying job {}", 9917);

    flush(&root)?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
