//! Request scope example
//!
//! Demonstrates a context flowing through request handling: per-request
//! fields, a detached background task via copy_context, and a hook
//! counting error records.
//!
//! Run with: cargo run --example request_scope

use rust_context_logger::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug)]
struct UserId(u64);

fn handle_request(ctx: &LoggingContext, route: &str, user: u64) -> LoggingContext {
    let ctx = ctx
        .with_value(UserId(user))
        .with_fields([("route", route.to_string()), ("method", "GET".to_string())]);

    info(&ctx, "request received", []);
    if route == "/fail" {
        error(&ctx, "handler failed", [LogOption::Error("upstream timeout".to_string())]);
    }
    ctx
}

fn main() -> Result<()> {
    println!("=== Rust Context Logger - Request Scope Example ===\n");

    let errors = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&errors);

    let root = ContextBuilder::new()
        .json_encoding()
        .output_to_stdout()
        .no_time_key()
        .error_key("cause")
        .on_record(move |entry, _| {
            if entry.level >= LogLevel::Error {
                counter.fetch_add(1, Ordering::Relaxed);
            }
        })
        .try_build(None)?;

    let server = root.with_field("server", "edge-1");

    for (n, route) in ["/users", "/fail", "/orders"].iter().enumerate() {
        let request = server.with_field("request_id", format!("req-{}", n));
        let scoped = handle_request(&request, route, 1000 + n as u64);

        // Detached work keeps the logger but starts from a fresh context
        let detached = copy_context(&LoggingContext::background(), &scoped);
        thread::spawn(move || {
            info(&detached, "audit entry stored", [LogOption::field("async", true)]);
        })
        .join()
        .expect("audit thread panicked");

        if let Some(user) = scoped.value::<UserId>() {
            debug(&scoped, "not shown at the default level", [LogOption::field("user", user.0)]);
        }
    }

    flush(&root)?;
    println!("\nerror records seen by hook: {}", errors.load(Ordering::Relaxed));

    Ok(())
}
