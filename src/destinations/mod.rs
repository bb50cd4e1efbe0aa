//! Destination implementations

pub mod console;
pub mod file;
pub mod memory;

pub use console::{ConsoleDestination, ConsoleStream};
pub use file::FileDestination;
pub use memory::MemoryDestination;

pub use crate::core::Destination;
