//! Console destination

use crate::core::Destination;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Which standard stream the console destination writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleStream {
    #[default]
    Stdout,
    Stderr,
}

pub struct ConsoleDestination {
    stream: ConsoleStream,
}

impl ConsoleDestination {
    pub fn new() -> Self {
        Self::with_stream(ConsoleStream::Stdout)
    }

    pub fn stderr() -> Self {
        Self::with_stream(ConsoleStream::Stderr)
    }

    pub fn with_stream(stream: ConsoleStream) -> Self {
        Self { stream }
    }

    pub fn stream(&self) -> ConsoleStream {
        self.stream
    }
}

impl Default for ConsoleDestination {
    fn default() -> Self {
        Self::new()
    }
}

fn write_locked<W: Write>(mut out: W, line: &[u8]) -> io::Result<()> {
    out.write_all(line)?;
    out.write_all(b"\n")?;
    out.flush()
}

impl Destination for ConsoleDestination {
    fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        // Hold the std lock for the whole line so other writers
        // in the process cannot split it.
        match self.stream {
            ConsoleStream::Stdout => write_locked(io::stdout().lock(), line),
            ConsoleStream::Stderr => write_locked(io::stderr().lock(), line),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.stream {
            ConsoleStream::Stdout => io::stdout().flush(),
            ConsoleStream::Stderr => io::stderr().flush(),
        }
    }

    fn is_console(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        match self.stream {
            ConsoleStream::Stdout => "console:stdout".to_string(),
            ConsoleStream::Stderr => "console:stderr".to_string(),
        }
    }
}
