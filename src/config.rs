//! Declarative logger configuration
//!
//! A [`LoggerConfig`] describes the level table, the sinks and the run
//! mode. It can be built in code, loaded from JSON, or taken from
//! [`LoggerConfig::standard`], which lays out the usual three log files
//! plus a development console.
//!
//! ```
//! use tiered_logger::config::{LoggerConfig, Mode};
//!
//! let config = LoggerConfig::from_json_str(r#"{
//!     "user_id": "2123409",
//!     "mode": "production",
//!     "sinks": [
//!         {"kind": "file", "path": "logs/error.log", "min_level": "error"},
//!         {"kind": "console", "human_readable": true}
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(config.mode, Mode::Production);
//! assert_eq!(config.levels.len(), 5);
//! ```

use crate::core::{
    Formatter, Identity, Level, LevelRegistry, Logger, LoggerError, Result, Sink, TimestampFormat,
    DEBUG, ERROR, SECURITY,
};
use crate::destinations::{ConsoleDestination, ConsoleStream, FileDestination};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that selects the run mode
pub const MODE_ENV_VAR: &str = "APP_ENV";

/// Run mode. Production suppresses console sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Development,
    Production,
}

impl Mode {
    /// Read [`MODE_ENV_VAR`] once; unset or anything but `production` is development
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(MODE_ENV_VAR).ok().as_deref())
    }

    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("production") => Mode::Production,
            _ => Mode::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Mode::Production)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    File,
    Console,
}

/// One sink in a configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinkSpec {
    pub kind: SinkKind,

    /// Sink name; defaults to the file name, or `console`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Required for file sinks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Least severe level admitted; all levels when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_level: Option<String>,

    /// Human-readable lines instead of JSON
    #[serde(default)]
    pub human_readable: bool,

    /// Color the level in human-readable output
    #[serde(default = "default_true")]
    pub colors: bool,

    #[serde(default)]
    pub timestamp: TimestampFormat,

    #[serde(default)]
    pub stream: ConsoleStream,
}

fn default_true() -> bool {
    true
}

impl SinkSpec {
    pub fn file(path: impl Into<PathBuf>, min_level: Option<&str>) -> Self {
        Self {
            kind: SinkKind::File,
            name: None,
            path: Some(path.into()),
            min_level: min_level.map(str::to_string),
            human_readable: false,
            colors: true,
            timestamp: TimestampFormat::default(),
            stream: ConsoleStream::default(),
        }
    }

    pub fn console(min_level: Option<&str>) -> Self {
        Self {
            kind: SinkKind::Console,
            name: None,
            path: None,
            min_level: min_level.map(str::to_string),
            human_readable: true,
            colors: true,
            timestamp: TimestampFormat::default(),
            stream: ConsoleStream::default(),
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn formatter(&self) -> Formatter {
        if self.human_readable {
            Formatter::human(self.colors)
        } else {
            Formatter::Json {
                timestamp: self.timestamp.clone(),
            }
        }
    }

    /// Build the sink this entry describes
    pub fn build(&self) -> Result<Sink> {
        let sink = match self.kind {
            SinkKind::File => {
                let path = self
                    .path
                    .as_ref()
                    .ok_or_else(|| LoggerError::config("file sink", "missing 'path'"))?;
                let name = match self.name {
                    Some(ref name) => name.clone(),
                    None => path
                        .file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .ok_or_else(|| {
                            LoggerError::config(
                                "file sink",
                                format!("cannot derive a name from '{}'", path.display()),
                            )
                        })?,
                };
                Sink::new(name, FileDestination::new(path), self.formatter())
            }
            SinkKind::Console => Sink::new(
                self.name.clone().unwrap_or_else(|| "console".to_string()),
                ConsoleDestination::with_stream(self.stream),
                self.formatter(),
            ),
        };

        Ok(match self.min_level {
            Some(ref level) => sink.with_threshold(level.as_str()),
            None => sink,
        })
    }
}

/// Full logger configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggerConfig {
    #[serde(default = "LevelRegistry::standard_table")]
    pub levels: Vec<Level>,

    #[serde(default)]
    pub sinks: Vec<SinkSpec>,

    #[serde(default)]
    pub mode: Mode,

    /// Identity stamped on every record as `userId`
    pub user_id: String,

    /// Host name stamped as `hostName`; the machine's when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,

    /// Queue size for async dispatch; synchronous when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub async_buffer: Option<usize>,
}

impl LoggerConfig {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            levels: LevelRegistry::standard_table(),
            sinks: Vec::new(),
            mode: Mode::default(),
            user_id: user_id.into(),
            host_name: None,
            async_buffer: None,
        }
    }

    /// Standard layout under `log_dir`:
    ///
    /// - `security.log` receives security records only
    /// - `error.log` receives error and security records
    /// - `combined.log` receives everything
    /// - a colored console sink, unless the environment selects production
    pub fn standard(log_dir: impl AsRef<Path>, user_id: impl Into<String>) -> Self {
        let log_dir = log_dir.as_ref();
        let mut config = Self::new(user_id);
        config.mode = Mode::from_env();
        config.sinks = vec![
            SinkSpec::file(log_dir.join("security.log"), Some(SECURITY)),
            SinkSpec::file(log_dir.join("error.log"), Some(ERROR)),
            SinkSpec::file(log_dir.join("combined.log"), Some(DEBUG)),
            SinkSpec::console(None),
        ];
        config
    }

    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_host_name(mut self, host_name: impl Into<String>) -> Self {
        self.host_name = Some(host_name.into());
        self
    }

    #[must_use]
    pub fn with_sink(mut self, sink: SinkSpec) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logger config",
                path.display().to_string(),
                e,
            )
        })?;
        Self::from_json_str(&content)
    }

    pub fn identity(&self) -> Identity {
        match self.host_name {
            Some(ref host) => Identity::new(self.user_id.clone(), host.clone()),
            None => Identity::for_user(self.user_id.clone()),
        }
    }

    pub fn build(&self) -> Result<Logger> {
        let mut builder = Logger::builder()
            .levels(self.levels.iter().cloned())
            .identity(self.identity())
            .mode(self.mode);

        for spec in &self.sinks {
            builder = builder.sink(spec.build()?);
        }
        if let Some(size) = self.async_buffer {
            builder = builder.async_mode(size);
        }

        builder.build()
    }
}
