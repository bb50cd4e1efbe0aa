//! Destination trait for sink output targets

use std::io;

/// Where a sink's encoded lines end up.
///
/// Implementations are driven by a [`Sink`](super::sink::Sink), which holds
/// them behind its own lock, so `write_line` never runs concurrently on the
/// same destination.
pub trait Destination: Send {
    /// Append one encoded record followed by a newline
    fn write_line(&mut self, line: &[u8]) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;

    /// Release any open handle. The next write may reopen it.
    fn close(&mut self) {}

    /// Whether this destination is the interactive console
    fn is_console(&self) -> bool {
        false
    }

    fn describe(&self) -> String;
}
