//! Logging macros for ergonomic log message formatting.
//!
//! Each macro formats its arguments like `format!` and returns the
//! `Result` of the underlying [`Logger::log`](crate::Logger::log) call.
//!
//! # Examples
//!
//! ```
//! use tiered_logger::prelude::*;
//! use tiered_logger::{info, log};
//!
//! let logger = Logger::builder().build().unwrap();
//!
//! info!(logger, "Server started").unwrap();
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port).unwrap();
//!
//! // Any registered level by name
//! log!(logger, "warning", "Disk {}% full", 91).unwrap();
//! ```

/// Log a formatted message at a named level.
///
/// # Examples
///
/// ```
/// # use tiered_logger::prelude::*;
/// # let logger = Logger::builder().build().unwrap();
/// use tiered_logger::log;
/// log!(logger, "info", "Simple message").unwrap();
/// log!(logger, "error", "Error code: {}", 500).unwrap();
/// assert!(log!(logger, "trace", "unregistered").is_err());
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a security-level message.
///
/// # Examples
///
/// ```
/// # use tiered_logger::prelude::*;
/// # let logger = Logger::builder().build().unwrap();
/// use tiered_logger::security;
/// security!(logger, "CSRF token mismatch from {}", "10.0.0.7").unwrap();
/// ```
#[macro_export]
macro_rules! security {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::log_level::SECURITY, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::log_level::ERROR, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::log_level::WARNING, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::log_level::INFO, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::log_level::DEBUG, $($arg)+)
    };
}
