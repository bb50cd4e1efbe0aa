//! Basic logger usage example
//!
//! Demonstrates the standard level table with a colored console sink.
//!
//! Run with: cargo run --example basic_usage

use tiered_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Tiered Logger - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .identity(Identity::for_user("2123409"))
        .console_sink(None, true)
        .build()?;

    println!("1. Logging at every standard level:");
    logger.security("CSRF attack detected")?;
    logger.error("processed job ABC123")?;
    logger.warning("Anomaly detected")?;
    logger.info("User does not have authorization")?;
    logger.debug("cache warmed")?;

    println!("\n2. Console limited to warning and above:");
    let logger = Logger::builder()
        .identity(Identity::for_user("2123409"))
        .console_sink(Some("warning"), true)
        .build()?;
    logger.info("Info message (hidden)")?;
    logger.warning("Warning message (visible)")?;

    println!("\n3. Unregistered levels are rejected:");
    if let Err(e) = logger.log("trace", "nope") {
        println!("   {}", e);
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
