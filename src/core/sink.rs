//! Sink: a destination with its own threshold and formatter

use super::destination::Destination;
use super::error::{LoggerError, Result};
use super::formatter::Formatter;
use super::log_level::LevelRegistry;
use super::record::LogRecord;
use parking_lot::Mutex;
use std::fmt;

/// Named output target.
///
/// Each sink guards its destination with its own mutex. Formatting happens
/// outside the lock; only the write of the finished line is serialized.
pub struct Sink {
    name: String,
    threshold: Option<String>,
    formatter: Formatter,
    console: bool,
    destination: Mutex<Box<dyn Destination>>,
}

impl Sink {
    /// A sink that admits every level until a threshold is set
    pub fn new<D>(name: impl Into<String>, destination: D, formatter: Formatter) -> Self
    where
        D: Destination + 'static,
    {
        Self::from_boxed(name, Box::new(destination), formatter)
    }

    pub fn from_boxed(
        name: impl Into<String>,
        destination: Box<dyn Destination>,
        formatter: Formatter,
    ) -> Self {
        Self {
            name: name.into(),
            threshold: None,
            formatter,
            console: destination.is_console(),
            destination: Mutex::new(destination),
        }
    }

    /// Least severe level this sink admits
    #[must_use]
    pub fn with_threshold(mut self, level: impl Into<String>) -> Self {
        self.threshold = Some(level.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn threshold(&self) -> Option<&str> {
        self.threshold.as_deref()
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn is_console(&self) -> bool {
        self.console
    }

    pub fn describe(&self) -> String {
        self.destination.lock().describe()
    }

    /// Check the threshold against a registry
    pub fn validate(&self, registry: &LevelRegistry) -> Result<()> {
        if let Some(ref threshold) = self.threshold {
            if !registry.contains(threshold) {
                return Err(LoggerError::config(
                    format!("sink '{}'", self.name),
                    format!("unknown threshold level '{}'", threshold),
                ));
            }
        }
        Ok(())
    }

    /// True iff the record's level is at least as severe as the threshold
    pub fn accepts(&self, record: &LogRecord, registry: &LevelRegistry) -> Result<bool> {
        match self.threshold {
            Some(ref threshold) => registry.satisfies(&record.level, threshold),
            None => registry.rank_of(&record.level).map(|_| true),
        }
    }

    /// Write the record if accepted. Returns whether a line was written.
    pub fn emit(&self, record: &LogRecord, registry: &LevelRegistry) -> Result<bool> {
        if !self.accepts(record, registry)? {
            return Ok(false);
        }

        let color = registry.color_of(&record.level)?;
        let line = self.formatter.format(record, color);

        self.destination
            .lock()
            .write_line(line.as_bytes())
            .map_err(|e| LoggerError::sink_write(&self.name, e))?;
        Ok(true)
    }

    pub fn flush(&self) -> Result<()> {
        self.destination
            .lock()
            .flush()
            .map_err(|e| LoggerError::sink_write(&self.name, e))
    }

    pub fn close(&self) {
        self.destination.lock().close();
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("name", &self.name)
            .field("threshold", &self.threshold)
            .field("formatter", &self.formatter.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_level::{DEBUG, ERROR, INFO, SECURITY, WARNING};
    use crate::destinations::MemoryDestination;
    use std::io;

    fn memory_sink(threshold: &str) -> (Sink, MemoryDestination) {
        let buffer = MemoryDestination::new();
        let sink = Sink::new(threshold, buffer.clone(), Formatter::json()).with_threshold(threshold);
        (sink, buffer)
    }

    #[test]
    fn test_accepts_by_rank() {
        let registry = LevelRegistry::standard();
        let all = [SECURITY, ERROR, WARNING, INFO, DEBUG];

        for threshold in all {
            let (sink, _) = memory_sink(threshold);
            for level in all {
                let expected = registry.rank_of(level).unwrap() <= registry.rank_of(threshold).unwrap();
                let record = LogRecord::new(level, "m");
                assert_eq!(sink.accepts(&record, &registry).unwrap(), expected);
            }
        }
    }

    #[test]
    fn test_emit_below_threshold_is_noop() {
        let registry = LevelRegistry::standard();
        let (sink, buffer) = memory_sink(SECURITY);

        let written = sink.emit(&LogRecord::new(ERROR, "m"), &registry).unwrap();
        assert!(!written);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_emit_writes_one_line() {
        let registry = LevelRegistry::standard();
        let (sink, buffer) = memory_sink(ERROR);

        assert!(sink.emit(&LogRecord::new(SECURITY, "breach"), &registry).unwrap());
        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("\"message\":\"breach\""));
    }

    #[test]
    fn test_no_threshold_accepts_all_known_levels() {
        let registry = LevelRegistry::standard();
        let sink = Sink::new("all", MemoryDestination::new(), Formatter::json());

        assert!(sink.accepts(&LogRecord::new(DEBUG, "m"), &registry).unwrap());
        assert!(sink.accepts(&LogRecord::new("trace", "m"), &registry).is_err());
    }

    #[test]
    fn test_validate_unknown_threshold() {
        let registry = LevelRegistry::standard();
        let (sink, _) = memory_sink("verbose");
        assert!(matches!(
            sink.validate(&registry),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    struct BrokenPipe;

    impl Destination for BrokenPipe {
        fn write_line(&mut self, _line: &[u8]) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    #[test]
    fn test_write_failure_is_sink_write_error() {
        let registry = LevelRegistry::standard();
        let sink = Sink::new("broken", BrokenPipe, Formatter::json());

        let err = sink.emit(&LogRecord::new(INFO, "m"), &registry).unwrap_err();
        assert!(matches!(err, LoggerError::SinkWrite { ref sink, .. } if sink == "broken"));
    }
}
