//! # Tiered Logger
//!
//! A leveled, multi-sink structured logger.
//!
//! ## Features
//!
//! - **Custom Levels**: Severity tables defined as data, lower rank is more severe
//! - **Enrichment**: Every record carries the caller identity and host name
//! - **Privacy Filter**: Records flagged `private` never reach a sink
//! - **Per-Sink Thresholds**: Files and console each admit their own level range
//! - **Thread Safe**: One lock per sink, optional async dispatch
//!
//! ```
//! use tiered_logger::prelude::*;
//! use serde_json::json;
//!
//! let combined = MemoryDestination::new();
//! let logger = Logger::builder()
//!     .identity(Identity::new("2123409", "web-01"))
//!     .sink(Sink::new("errors", MemoryDestination::new(), Formatter::json()).with_threshold("error"))
//!     .sink(Sink::new("combined", combined.clone(), Formatter::json()))
//!     .build()
//!     .unwrap();
//!
//! logger.error("processed job ABC123").unwrap();
//! logger.security(json!({"private": true, "message": "never written"})).unwrap();
//! assert!(logger.log("trace", "unregistered").is_err());
//!
//! assert_eq!(combined.lines().len(), 1);
//! ```

pub mod config;
pub mod core;
pub mod destinations;
pub mod global;
pub mod macros;

pub mod prelude {
    pub use crate::config::{LoggerConfig, Mode, SinkKind, SinkSpec};
    pub use crate::core::{
        ColorHint, Destination, FieldValue, Fields, Formatter, Identity, Level, LevelLogger,
        LevelRegistry, LogRecord, Logger, LoggerBuilder, LoggerError, LoggerMetrics, Payload,
        RecordPipeline, Result, Sink, Stage, TimestampFormat,
    };
    pub use crate::destinations::{ConsoleDestination, FileDestination, MemoryDestination};
    pub use crate::global::{global, init_global};
}

pub use crate::config::{LoggerConfig, Mode, SinkKind, SinkSpec};
pub use crate::core::{
    ColorHint, Destination, Enrich, FieldValue, Fields, Formatter, Identity, IgnorePrivate, Level,
    LevelLogger, LevelRegistry, LogRecord, Logger, LoggerBuilder, LoggerError, LoggerMetrics,
    Payload, RecordPipeline, Result, Sink, SinkErrorCallback, Stage, TimestampFormat,
    DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use crate::destinations::{ConsoleDestination, FileDestination, MemoryDestination};
pub use crate::global::{global, init_global};
