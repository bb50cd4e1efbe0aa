//! In-memory destination
//!
//! Collects lines in a shared buffer. Clones share the same buffer, so a
//! caller can keep one handle and give the other to a sink.

use crate::core::Destination;
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct MemoryDestination {
    buffer: Arc<Mutex<Vec<u8>>>,
    label: Option<String>,
}

impl MemoryDestination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            buffer: Arc::default(),
            label: Some(label.into()),
        }
    }

    /// Everything written so far
    pub fn contents(&self) -> Vec<u8> {
        self.buffer.lock().clone()
    }

    pub fn contents_string(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents_string().lines().map(str::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Destination for MemoryDestination {
    fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        let mut buffer = self.buffer.lock();
        buffer.extend_from_slice(line);
        buffer.push(b'\n');
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn describe(&self) -> String {
        match self.label {
            Some(ref label) => format!("memory:{}", label),
            None => "memory".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let handle = MemoryDestination::labeled("combined");
        let mut writer = handle.clone();

        writer.write_line(b"one").unwrap();
        writer.write_line(b"two").unwrap();

        assert_eq!(handle.lines(), vec!["one", "two"]);
        assert_eq!(handle.describe(), "memory:combined");
    }

    #[test]
    fn test_clear() {
        let handle = MemoryDestination::new();
        handle.clone().write_line(b"x").unwrap();
        assert!(!handle.is_empty());
        handle.clear();
        assert!(handle.is_empty());
    }
}
