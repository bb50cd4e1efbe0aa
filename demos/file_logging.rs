//! File logging example
//!
//! Writes the standard security / error / combined layout under ./logs.
//! Set APP_ENV=production to drop the console sink.
//!
//! Run with: cargo run --example file_logging

use tiered_logger::config::LoggerConfig;
use tiered_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Tiered Logger - File Logging Example ===\n");

    let config = LoggerConfig::standard("logs", "2123409");
    println!("Mode: {:?}", config.mode);
    let logger = config.build()?;

    for sink in logger.sinks() {
        println!(
            "  sink {:<10} threshold {:<8} -> {}",
            sink.name(),
            sink.threshold().unwrap_or("all"),
            sink.describe()
        );
    }

    logger.security("Login from unrecognized device")?;
    logger.error("Failed to charge card")?;
    logger.info("Checkout page rendered")?;
    logger.flush()?;

    println!("\nRecords written: {}", logger.metrics().lines_written());
    println!("=== Example completed successfully! ===");
    Ok(())
}
