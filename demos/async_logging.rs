//! Async dispatch example
//!
//! Sink writes run on a worker thread; callers only pay for the pipeline.
//!
//! Run with: cargo run --example async_logging

use std::thread;
use std::time::{Duration, Instant};
use tiered_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Tiered Logger - Async Logging Example ===\n");

    let mut logger = Logger::builder()
        .identity(Identity::for_user("2123409"))
        .file_sink("combined", "logs/async_combined.log", None)
        .file_sink("error", "logs/async_error.log", Some("error"))
        .async_mode(1024)
        .build()?;

    let start = Instant::now();
    {
        let logger = &logger;
        thread::scope(|scope| {
            for worker in 0..4 {
                scope.spawn(move || {
                    for i in 0..250 {
                        let level = if i % 50 == 0 { "error" } else { "info" };
                        let _ = logger.log(level, format!("worker {} job {}", worker, i));
                    }
                });
            }
        });
    }
    println!("Queued 1000 records in {:?}", start.elapsed());

    let completed = logger.shutdown(Duration::from_secs(5));
    let metrics = logger.metrics();
    println!("Shutdown completed: {}", completed);
    println!("Dispatched: {}", metrics.dispatched());
    println!("Lines written: {}", metrics.lines_written());
    println!("Queue-full fallbacks: {}", metrics.queue_full_events());

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
