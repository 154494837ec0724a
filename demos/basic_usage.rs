//! Basic logger usage example
//!
//! Demonstrates levels, bound context, hooks and the console writer.
//!
//! Run with: cargo run --example basic_usage

use rz_logger::prelude::*;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== rz_logger - Basic Usage Example ===\n");

    // JSON records on stdout
    let logger = Logger::builder()
        .level(LogLevel::Trace)
        .hook(TimestampHook)
        .build();

    println!("1. Logging at different levels:");
    logger.trace("This is a trace message", |_| {});
    logger.debug("This is a debug message", |_| {});
    logger.info("This is an info message", |_| {});
    logger.warn("This is a warning message", |_| {});
    logger.error("This is an error message", |_| {});
    logger.log("This record has no level", |_| {});

    println!("\n2. Typed fields and bound context:");
    let request = logger
        .child()
        .fields(|e| {
            e.string("request_id", "7f3a").string("route", "/users");
        })
        .build();
    request.info("request served", |e| {
        e.uint("status", 200u16)
            .duration("elapsed", Duration::from_micros(1250))
            .strings("roles", &["admin", "ops"]);
    });

    println!("\n3. Raising the threshold on a derived logger:");
    let quiet = logger.config([options::level(LogLevel::Warn)]);
    quiet.info("Info message (hidden)", |_| {});
    quiet.warn("Warning message (visible)", |_| {});

    #[cfg(feature = "console")]
    {
        println!("\n4. Human-readable console output:");
        let console = Logger::builder()
            .level_writer(ConsoleWriter::new())
            .hook(TimestampHook)
            .build();
        console.info("listening", |e| {
            e.uint("port", 8080u16);
        });
        console.error("upstream unavailable", |e| {
            e.string("host", "db-1").int("retries", 3i64);
        });
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
