//! Core logger types and traits

pub mod destination;
pub mod error;
pub mod fields;
pub mod formatter;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod pipeline;
pub mod record;
pub mod sink;
pub mod timestamp;

pub use destination::Destination;
pub use error::{LoggerError, Result};
pub use fields::{FieldValue, Fields};
pub use formatter::Formatter;
pub use log_level::{ColorHint, Level, LevelRegistry, DEBUG, ERROR, INFO, SECURITY, WARNING};
pub use logger::{LevelLogger, Logger, LoggerBuilder, SinkErrorCallback, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LoggerMetrics;
pub use pipeline::{local_host_name, Enrich, Identity, IgnorePrivate, RecordPipeline, Stage};
pub use record::{LogRecord, Payload, HOST_NAME_FIELD, USER_ID_FIELD};
pub use sink::Sink;
pub use timestamp::TimestampFormat;
