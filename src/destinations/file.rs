//! File destination
//!
//! The file is opened in append mode on the first write, not at
//! construction, and parent directories are created as needed. A failed
//! write drops the handle so the next write starts from a fresh open.

use crate::core::Destination;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct FileDestination {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    opened: u64,
}

impl FileDestination {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: None,
            opened: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    /// How many times the file has been opened so far
    pub fn open_count(&self) -> u64 {
        self.opened
    }

    fn writer(&mut self) -> io::Result<&mut BufWriter<File>> {
        if self.writer.is_none() {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            self.opened += 1;
            self.writer = Some(BufWriter::new(file));
        }
        // Populated just above when it was empty.
        self.writer
            .as_mut()
            .ok_or_else(|| io::Error::other("file writer not initialized"))
    }
}

impl Destination for FileDestination {
    fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        let result = self.writer().and_then(|writer| {
            writer.write_all(line)?;
            writer.write_all(b"\n")?;
            writer.flush()
        });

        if result.is_err() {
            self.close();
        }
        result
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn close(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

impl Drop for FileDestination {
    fn drop(&mut self) {
        self.close();
    }
}
