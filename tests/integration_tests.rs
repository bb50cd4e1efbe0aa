//! Integration tests for the tiered logger
//!
//! These tests verify:
//! - Routing to file sinks by threshold
//! - Enrichment with the process identity
//! - Privacy filtering
//! - Console suppression in production mode
//! - Sink failure isolation
//! - Thread safety

use serde_json::json;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tiered_logger::config::{LoggerConfig, Mode, SinkSpec};
use tiered_logger::core::log_level::{DEBUG, ERROR, SECURITY};
use tiered_logger::prelude::*;

const USER_ID: &str = "2123409";
const HOST: &str = "test-host";

/// Standard three-file layout plus an in-memory stand-in for the console
fn standard_logger(dir: &Path, mode: Mode) -> (Logger, MemoryDestination) {
    let console = MemoryDestination::labeled("console");
    let mut sinks = vec![
        Sink::new("security", FileDestination::new(dir.join("security.log")), Formatter::json())
            .with_threshold(SECURITY),
        Sink::new("error", FileDestination::new(dir.join("error.log")), Formatter::json())
            .with_threshold(ERROR),
        Sink::new("combined", FileDestination::new(dir.join("combined.log")), Formatter::json())
            .with_threshold(DEBUG),
    ];
    if !mode.is_production() {
        sinks.push(Sink::new("console", console.clone(), Formatter::human(false)));
    }

    let mut builder = Logger::builder()
        .identity(Identity::new(USER_ID, HOST))
        .mode(mode);
    for sink in sinks {
        builder = builder.sink(sink);
    }
    (builder.build().expect("Failed to build logger"), console)
}

fn read_lines(path: &Path) -> Vec<serde_json::Value> {
    match fs::read_to_string(path) {
        Ok(content) => content
            .lines()
            .map(|line| serde_json::from_str(line).expect("Line is not valid JSON"))
            .collect(),
        Err(_) => Vec::new(),
    }
}

#[test]
fn test_error_record_routing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (logger, console) = standard_logger(temp_dir.path(), Mode::Development);

    logger.log("error", "processed job ABC123").expect("Log failed");
    logger.flush().expect("Failed to flush");

    assert!(read_lines(&temp_dir.path().join("security.log")).is_empty());

    let errors = read_lines(&temp_dir.path().join("error.log"));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["level"], "error");
    assert_eq!(errors[0]["message"], "processed job ABC123");

    assert_eq!(read_lines(&temp_dir.path().join("combined.log")).len(), 1);

    assert_eq!(
        console.lines(),
        vec![format!(
            "error: processed job ABC123, User ID: {}, Hostname: {}",
            USER_ID, HOST
        )]
    );
}

#[test]
fn test_security_record_reaches_every_sink() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (logger, console) = standard_logger(temp_dir.path(), Mode::Development);

    logger
        .security("CSRF attack detected.  Token and anti-csrf token diff")
        .expect("Log failed");

    for file in ["security.log", "error.log", "combined.log"] {
        assert_eq!(read_lines(&temp_dir.path().join(file)).len(), 1, "{}", file);
    }
    assert_eq!(console.lines().len(), 1);
}

#[test]
fn test_debug_record_only_reaches_debug_sinks() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (logger, console) = standard_logger(temp_dir.path(), Mode::Development);

    logger.debug("cache miss").expect("Log failed");

    assert!(read_lines(&temp_dir.path().join("security.log")).is_empty());
    assert!(read_lines(&temp_dir.path().join("error.log")).is_empty());
    assert_eq!(read_lines(&temp_dir.path().join("combined.log")).len(), 1);
    assert_eq!(console.lines().len(), 1);
}

#[test]
fn test_private_record_writes_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (logger, console) = standard_logger(temp_dir.path(), Mode::Development);

    logger
        .log("security", json!({"private": true, "message": "x"}))
        .expect("Private records are not an error");

    for file in ["security.log", "error.log", "combined.log"] {
        assert!(!temp_dir.path().join(file).exists(), "{} was created", file);
    }
    assert!(console.is_empty());
    assert_eq!(logger.metrics().filtered(), 1);
}

#[test]
fn test_unknown_level_writes_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (logger, console) = standard_logger(temp_dir.path(), Mode::Development);

    let err = logger.log("trace", "x").unwrap_err();
    assert!(matches!(err, LoggerError::UnknownLevel { ref name } if name == "trace"));

    for file in ["security.log", "error.log", "combined.log"] {
        assert!(!temp_dir.path().join(file).exists());
    }
    assert!(console.is_empty());
}

#[test]
fn test_every_written_record_is_enriched() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (logger, _console) = standard_logger(temp_dir.path(), Mode::Production);

    logger
        .error(json!({
            "message": "processed job ABC123",
            "jobId": "ABC123",
            "jobEvent": "processed"
        }))
        .expect("Log failed");
    logger.warning("Anomaly detected").expect("Log failed");
    logger.info("User does not have authorization").expect("Log failed");
    logger
        .security(json!({"message": "This is a security test"}))
        .expect("Log failed");

    let combined = read_lines(&temp_dir.path().join("combined.log"));
    assert_eq!(combined.len(), 4);
    for record in &combined {
        assert_eq!(record["userId"], USER_ID);
        assert_eq!(record["hostName"], HOST);
        assert!(record["timestamp"].is_string());
    }
    assert_eq!(combined[0]["jobId"], "ABC123");
    assert_eq!(combined[0]["jobEvent"], "processed");
}

#[test]
fn test_production_config_has_no_console() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let production = LoggerConfig::standard(temp_dir.path(), USER_ID)
        .with_mode(Mode::Production)
        .build()
        .expect("Failed to build logger");
    assert!(!production.has_console_sink());
    assert_eq!(production.sinks().len(), 3);

    let development = LoggerConfig::standard(temp_dir.path(), USER_ID)
        .with_mode(Mode::Development)
        .build()
        .expect("Failed to build logger");
    assert!(development.has_console_sink());
    assert_eq!(development.sinks().len(), 4);
}

#[test]
fn test_config_sink_order_is_insertion_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = LoggerConfig::new(USER_ID)
        .with_sink(SinkSpec::file(temp_dir.path().join("b.log"), None))
        .with_sink(SinkSpec::file(temp_dir.path().join("a.log"), Some(ERROR)))
        .with_sink(SinkSpec::file(temp_dir.path().join("c.log"), None).named("third"))
        .build()
        .expect("Failed to build logger");

    let names: Vec<&str> = logger.sinks().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["b", "a", "third"]);
}

#[test]
fn test_log_injection_prevention() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (logger, _console) = standard_logger(temp_dir.path(), Mode::Production);

    logger
        .info("User login\n{\"level\":\"security\",\"message\":\"forged\"}")
        .expect("Log failed");

    let content = fs::read_to_string(temp_dir.path().join("combined.log"))
        .expect("Failed to read log file");
    assert_eq!(content.lines().count(), 1, "Log should be a single line");
}

#[test]
fn test_unwritable_sink_does_not_block_others() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let blocked = temp_dir.path().join("blocked");
    fs::write(&blocked, "a file, not a directory").expect("Failed to write");

    let good = temp_dir.path().join("good.log");
    let logger = Logger::builder()
        .identity(Identity::new(USER_ID, HOST))
        .sink(Sink::new(
            "broken",
            FileDestination::new(blocked.join("nested.log")),
            Formatter::json(),
        ))
        .sink(Sink::new("good", FileDestination::new(&good), Formatter::json()))
        .on_sink_error(Arc::new(|_: &LoggerError| {}))
        .build()
        .expect("Failed to build logger");

    for i in 0..3 {
        logger.error(format!("attempt {}", i)).expect("Log must not fail");
    }

    assert_eq!(read_lines(&good).len(), 3);
    assert_eq!(logger.metrics().sink_failures(), 3);
    assert_eq!(logger.metrics().lines_written(), 3);
}

#[test]
fn test_concurrent_logging_lines_intact() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (logger, console) = standard_logger(temp_dir.path(), Mode::Development);
    let logger = Arc::new(logger);

    let mut handles = vec![];
    for thread_id in 0..8 {
        let logger_clone = Arc::clone(&logger);
        handles.push(std::thread::spawn(move || {
            for i in 0..50 {
                logger_clone
                    .error(format!("Thread {} - Message {}", thread_id, i))
                    .expect("Log failed");
            }
        }));
    }
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    // Every line must parse on its own, so no two writes interleaved.
    assert_eq!(read_lines(&temp_dir.path().join("error.log")).len(), 400);
    assert_eq!(read_lines(&temp_dir.path().join("combined.log")).len(), 400);
    assert_eq!(console.lines().len(), 400);
}

#[test]
fn test_async_graceful_shutdown() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("async.log");

    {
        let logger = Logger::builder()
            .identity(Identity::new(USER_ID, HOST))
            .sink(Sink::new("async", FileDestination::new(&log_file), Formatter::json()))
            .async_mode(8)
            .build()
            .expect("Failed to build logger");

        for i in 0..50 {
            logger.info(format!("Message {}", i)).expect("Log failed");
        }
        // Logger drops here and drains the queue
    }

    assert_eq!(read_lines(&log_file).len(), 50);
}

#[test]
fn test_shutdown_then_log_reopens() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("reopen.log");

    let mut logger = Logger::builder()
        .sink(Sink::new("file", FileDestination::new(&log_file), Formatter::logfmt()))
        .async_mode(4)
        .build()
        .expect("Failed to build logger");

    logger.info("before").expect("Log failed");
    assert!(logger.shutdown(Duration::from_secs(5)));
    assert!(!logger.is_async());

    logger.info("after").expect("Log failed");
    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("message=\"before\""));
    assert!(lines[1].contains("message=\"after\""));
}

#[test]
fn test_logfmt_sink_keeps_one_record_per_line() {
    let buffer = MemoryDestination::new();
    let logger = Logger::builder()
        .identity(Identity::new(USER_ID, HOST))
        .sink(Sink::new("logfmt", buffer.clone(), Formatter::logfmt()))
        .build()
        .expect("Failed to build logger");

    logger
        .info(json!({"message": "m", "note": "a\nlevel=security forged"}))
        .expect("Log failed");
    logger
        .info(json!({"message": "m", "level": "security"}))
        .expect("Log failed");

    let lines = buffer.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains(r#"note="a\nlevel=security forged""#));
    assert!(!lines[1].contains("security"));
    for line in &lines {
        assert!(line.contains(" level=info "));
        assert!(line.contains(&format!("userId={}", USER_ID)));
    }
}
