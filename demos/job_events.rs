//! Job event logging example
//!
//! Three JSON log files with per-file thresholds, a development console,
//! constant user/host fields on every record, and a private record that
//! never reaches any output.
//!
//! Run with: cargo run --example job_events

use serde_json::json;
use tiered_logger::config::LoggerConfig;
use tiered_logger::prelude::*;

const USER_ID: &str = "2123409";

fn main() -> Result<()> {
    let logger = LoggerConfig::standard("logs", USER_ID).build()?;

    let job = json!({
        "message": "processed job ABC123",
        "jobId": "ABC123",
        "jobEvent": "processed"
    });
    logger.log("error", job)?;

    logger.log(
        "security",
        json!({
            "private": true,
            "message": "CSRF attack detected.  Token and anti-csrf token diff"
        }),
    )?;

    logger.log("warning", "Anomaly detected")?;
    logger.log("info", "User does not have authorization")?;
    logger.security(json!({"message": "This is a security test"}))?;

    logger.flush()
}
