//! Main logger implementation

use super::{
    error::{LoggerError, Result},
    fields::Fields,
    formatter::Formatter,
    log_level::{ColorHint, Level, LevelRegistry, DEBUG, ERROR, INFO, SECURITY, WARNING},
    metrics::LoggerMetrics,
    pipeline::{Identity, RecordPipeline, Stage},
    record::{LogRecord, Payload},
    sink::Sink,
};
use crate::config::Mode;
use crate::destinations::{ConsoleDestination, FileDestination};
use crossbeam_channel::{bounded, Sender, TrySendError};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// Used when an async logger is dropped without explicit shutdown.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Called with every isolated sink failure
pub type SinkErrorCallback = Arc<dyn Fn(&LoggerError) + Send + Sync>;

/// Hands pipeline output to the sinks. Shared with the async worker.
#[derive(Clone)]
struct Dispatcher {
    registry: Arc<LevelRegistry>,
    sinks: Arc<Vec<Sink>>,
    metrics: Arc<LoggerMetrics>,
    on_sink_error: Option<SinkErrorCallback>,
}

impl Dispatcher {
    /// Deliver to every accepting sink in order.
    ///
    /// Each sink is isolated: an error or panic in one is reported and the
    /// remaining sinks still receive the record.
    fn deliver(&self, record: &LogRecord) {
        self.metrics.record_dispatched();

        for sink in self.sinks.iter() {
            let emit_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                sink.emit(record, &self.registry)
            }));

            match emit_result {
                Ok(Ok(true)) => {
                    self.metrics.record_line_written();
                }
                Ok(Ok(false)) => {
                    // Below this sink's threshold
                }
                Ok(Err(e)) => {
                    self.metrics.record_sink_failure();
                    self.report(&e);
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    self.metrics.record_sink_failure();
                    eprintln!(
                        "[LOGGER CRITICAL] Sink '{}' panicked: {}. \
                         Other sinks continue to function.",
                        sink.name(),
                        panic_msg
                    );
                    self.report(&LoggerError::other(format!(
                        "sink '{}' panicked: {}",
                        sink.name(),
                        panic_msg
                    )));
                }
            }
        }
    }

    fn report(&self, error: &LoggerError) {
        match self.on_sink_error {
            Some(ref callback) => callback(error),
            None => eprintln!("[LOGGER ERROR] {}", error),
        }
    }

    fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for sink in self.sinks.iter() {
            if let Err(e) = sink.flush() {
                eprintln!("[LOGGER ERROR] Flush failed: {}", e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// Leveled multi-sink logger.
///
/// `Logger` is `Send + Sync`; share it by reference or `Arc` and call
/// [`log`](Logger::log) from any thread.
pub struct Logger {
    pipeline: RecordPipeline,
    dispatcher: Dispatcher,
    sender: Option<Sender<LogRecord>>,
    async_handle: Option<thread::JoinHandle<()>>,
}

impl Logger {
    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use tiered_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .identity(Identity::new("2123409", "build-host"))
    ///     .sink(Sink::new("memory", MemoryDestination::new(), Formatter::json()))
    ///     .build()
    ///     .unwrap();
    /// logger.info("ready").unwrap();
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Log a payload at a named level.
    ///
    /// Fails only when `level` is not registered. Records dropped by the
    /// pipeline and sink write failures both return `Ok(())`.
    pub fn log(&self, level: &str, payload: impl Into<Payload>) -> Result<()> {
        if !self.dispatcher.registry.contains(level) {
            return Err(LoggerError::unknown_level(level));
        }

        let record = LogRecord::from_payload(level, payload.into());
        self.submit(record);
        Ok(())
    }

    /// Log a message with extra structured fields
    pub fn log_with_fields(
        &self,
        level: &str,
        message: impl AsRef<str>,
        fields: Fields,
    ) -> Result<()> {
        if !self.dispatcher.registry.contains(level) {
            return Err(LoggerError::unknown_level(level));
        }

        let record = LogRecord::new(level, message).with_fields(fields);
        self.submit(record);
        Ok(())
    }

    fn submit(&self, record: LogRecord) {
        let Some(record) = self.pipeline.run(record) else {
            self.dispatcher.metrics.record_filtered();
            return;
        };

        match self.sender {
            Some(ref sender) => match sender.try_send(record) {
                Ok(()) => {}
                Err(TrySendError::Full(record)) => {
                    // Sinks are individually locked, so the caller can write
                    // directly instead of waiting for the worker.
                    self.dispatcher.metrics.record_queue_full();
                    self.dispatcher.deliver(&record);
                }
                Err(TrySendError::Disconnected(record)) => {
                    self.dispatcher.deliver(&record);
                }
            },
            None => self.dispatcher.deliver(&record),
        }
    }

    /// Bound handle for a registered level
    pub fn level(&self, name: &str) -> Result<LevelLogger<'_>> {
        let level = self
            .dispatcher
            .registry
            .get(name)
            .ok_or_else(|| LoggerError::unknown_level(name))?;
        Ok(LevelLogger {
            logger: self,
            level: &level.name,
        })
    }

    #[inline]
    pub fn security(&self, payload: impl Into<Payload>) -> Result<()> {
        self.log(SECURITY, payload)
    }

    #[inline]
    pub fn error(&self, payload: impl Into<Payload>) -> Result<()> {
        self.log(ERROR, payload)
    }

    #[inline]
    pub fn warning(&self, payload: impl Into<Payload>) -> Result<()> {
        self.log(WARNING, payload)
    }

    #[inline]
    pub fn info(&self, payload: impl Into<Payload>) -> Result<()> {
        self.log(INFO, payload)
    }

    #[inline]
    pub fn debug(&self, payload: impl Into<Payload>) -> Result<()> {
        self.log(DEBUG, payload)
    }

    pub fn registry(&self) -> &LevelRegistry {
        &self.dispatcher.registry
    }

    pub fn sinks(&self) -> &[Sink] {
        &self.dispatcher.sinks
    }

    pub fn sink(&self, name: &str) -> Option<&Sink> {
        self.dispatcher.sinks.iter().find(|s| s.name() == name)
    }

    pub fn has_console_sink(&self) -> bool {
        self.dispatcher.sinks.iter().any(Sink::is_console)
    }

    pub fn is_async(&self) -> bool {
        self.sender.is_some()
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.dispatcher.metrics
    }

    /// Flush every sink; returns the first failure after trying all of them
    pub fn flush(&self) -> Result<()> {
        self.dispatcher.flush()
    }

    /// Drain the async queue, then flush and close every sink.
    ///
    /// Returns `true` if the worker finished within `timeout` and all
    /// sinks flushed. Later `log` calls write synchronously and reopen
    /// destinations as needed.
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        let drained = self.stop_worker(timeout);

        let flushed = match self.flush() {
            Ok(()) => true,
            Err(e) => {
                eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
                false
            }
        };

        for sink in self.dispatcher.sinks.iter() {
            sink.close();
        }

        drained && flushed
    }

    fn stop_worker(&mut self, timeout: Duration) -> bool {
        // Closing the channel lets the worker drain and exit.
        drop(self.sender.take());

        let Some(handle) = self.async_handle.take() else {
            return true;
        };

        let start = std::time::Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(e) = handle.join() {
                    eprintln!(
                        "[LOGGER ERROR] Async worker thread panicked during shutdown: {:?}",
                        e
                    );
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] Async worker thread did not finish within {:?} timeout. \
                     Some logs may be lost.",
                    timeout
                );
                return false;
            }

            thread::sleep(Duration::from_millis(10));
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

        let failures = self.dispatcher.metrics.sink_failures();
        if failures > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} failed sink writes (failure rate: {:.2}%)",
                failures,
                self.dispatcher.metrics.failure_rate()
            );
        }
    }
}

/// A logger bound to one level, for tables beyond the standard five
///
/// # Example
/// ```
/// use tiered_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .level("alert", 0, ColorHint::Red)
///     .level("notice", 1, ColorHint::Cyan)
///     .identity(Identity::new("svc", "host"))
///     .build()
///     .unwrap();
///
/// let notice = logger.level("notice").unwrap();
/// notice.log("cache warmed").unwrap();
/// ```
#[derive(Clone, Copy)]
pub struct LevelLogger<'a> {
    logger: &'a Logger,
    level: &'a str,
}

impl LevelLogger<'_> {
    pub fn name(&self) -> &str {
        self.level
    }

    pub fn log(&self, payload: impl Into<Payload>) -> Result<()> {
        self.logger.log(self.level, payload)
    }
}

/// Builder for constructing Logger with a fluent API
///
/// With no levels given, the standard table is used. Console sinks are
/// left out when the mode is [`Mode::Production`].
pub struct LoggerBuilder {
    levels: Vec<Level>,
    identity: Option<Identity>,
    stages: Vec<Box<dyn Stage>>,
    sinks: Vec<Sink>,
    mode: Mode,
    async_buffer: Option<usize>,
    on_sink_error: Option<SinkErrorCallback>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            levels: Vec::new(),
            identity: None,
            stages: Vec::new(),
            sinks: Vec::new(),
            mode: Mode::Development,
            async_buffer: None,
            on_sink_error: None,
        }
    }

    /// Register a level
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, name: impl Into<String>, rank: u32, color: ColorHint) -> Self {
        self.levels.push(Level::new(name, rank, color));
        self
    }

    /// Register a whole level table
    #[must_use = "builder methods return a new value"]
    pub fn levels<I: IntoIterator<Item = Level>>(mut self, levels: I) -> Self {
        self.levels.extend(levels);
        self
    }

    /// Identity stamped on every record; defaults to user `unknown` on this host
    #[must_use = "builder methods return a new value"]
    pub fn identity(mut self, identity: Identity) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Append a custom stage after enrichment and the privacy filter
    #[must_use = "builder methods return a new value"]
    pub fn stage<S: Stage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Sink) -> Self {
        self.sinks.push(sink);
        self
    }

    /// JSON-lines file sink
    #[must_use = "builder methods return a new value"]
    pub fn file_sink(
        self,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        threshold: Option<&str>,
    ) -> Self {
        let sink = Sink::new(name, FileDestination::new(path), Formatter::json());
        self.sink(match threshold {
            Some(level) => sink.with_threshold(level),
            None => sink,
        })
    }

    /// Human-readable stdout sink
    #[must_use = "builder methods return a new value"]
    pub fn console_sink(self, threshold: Option<&str>, colors: bool) -> Self {
        let sink = Sink::new("console", ConsoleDestination::new(), Formatter::human(colors));
        self.sink(match threshold {
            Some(level) => sink.with_threshold(level),
            None => sink,
        })
    }

    #[must_use = "builder methods return a new value"]
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Move sink writes to a worker thread with a queue of `buffer_size`
    #[must_use = "builder methods return a new value"]
    pub fn async_mode(mut self, buffer_size: usize) -> Self {
        self.async_buffer = Some(buffer_size.max(1));
        self
    }

    /// Receive isolated sink failures instead of printing them to stderr
    #[must_use = "builder methods return a new value"]
    pub fn on_sink_error(mut self, callback: SinkErrorCallback) -> Self {
        self.on_sink_error = Some(callback);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Result<Logger> {
        let registry = if self.levels.is_empty() {
            LevelRegistry::standard()
        } else {
            LevelRegistry::from_levels(self.levels)?
        };

        let sinks: Vec<Sink> = self
            .sinks
            .into_iter()
            .filter(|sink| !(self.mode.is_production() && sink.is_console()))
            .collect();
        for sink in &sinks {
            sink.validate(&registry)?;
        }

        let identity = self
            .identity
            .unwrap_or_else(|| Identity::for_user("unknown"));
        let mut pipeline = RecordPipeline::standard(identity);
        for stage in self.stages {
            pipeline.push(stage);
        }

        let dispatcher = Dispatcher {
            registry: Arc::new(registry),
            sinks: Arc::new(sinks),
            metrics: Arc::new(LoggerMetrics::new()),
            on_sink_error: self.on_sink_error,
        };

        let (sender, async_handle) = match self.async_buffer {
            Some(size) => {
                let (sender, receiver) = bounded::<LogRecord>(size);
                let worker = dispatcher.clone();
                let handle = thread::Builder::new()
                    .name("tiered-logger".to_string())
                    .spawn(move || {
                        for record in receiver.iter() {
                            worker.deliver(&record);
                        }
                    })
                    .map_err(|e| {
                        LoggerError::io_operation("spawning", "async logger worker", e)
                    })?;
                (Some(sender), Some(handle))
            }
            None => (None, None),
        };

        Ok(Logger {
            pipeline,
            dispatcher,
            sender,
            async_handle,
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
