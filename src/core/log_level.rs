//! Severity levels and the level registry
//!
//! Levels are data, not an enum: each registry owns its own table of
//! named levels with a numeric rank. Lower rank means more severe, so
//! rank 0 is the most critical level in a table.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display color attached to a level. Presentation only; never consulted
/// for threshold decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorHint {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
    #[default]
    None,
}

impl ColorHint {
    pub fn to_str(&self) -> &'static str {
        match self {
            ColorHint::Black => "black",
            ColorHint::Red => "red",
            ColorHint::Green => "green",
            ColorHint::Yellow => "yellow",
            ColorHint::Blue => "blue",
            ColorHint::Magenta => "magenta",
            ColorHint::Cyan => "cyan",
            ColorHint::White => "white",
            ColorHint::Gray => "gray",
            ColorHint::None => "none",
        }
    }

    /// Terminal color for this hint, `None` when the level is uncolored
    #[cfg(feature = "console")]
    pub fn color_code(&self) -> Option<colored::Color> {
        use colored::Color::*;
        match self {
            ColorHint::Black => Some(Black),
            ColorHint::Red => Some(Red),
            ColorHint::Green => Some(Green),
            ColorHint::Yellow => Some(Yellow),
            ColorHint::Blue => Some(Blue),
            ColorHint::Magenta => Some(Magenta),
            ColorHint::Cyan => Some(Cyan),
            ColorHint::White => Some(White),
            ColorHint::Gray => Some(BrightBlack),
            ColorHint::None => None,
        }
    }
}

impl fmt::Display for ColorHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for ColorHint {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "black" => Ok(ColorHint::Black),
            "red" => Ok(ColorHint::Red),
            "green" => Ok(ColorHint::Green),
            "yellow" => Ok(ColorHint::Yellow),
            "blue" => Ok(ColorHint::Blue),
            "magenta" => Ok(ColorHint::Magenta),
            "cyan" => Ok(ColorHint::Cyan),
            "white" => Ok(ColorHint::White),
            "gray" | "grey" => Ok(ColorHint::Gray),
            "none" | "" => Ok(ColorHint::None),
            _ => Err(format!("Invalid color: '{}'", s)),
        }
    }
}

/// A named severity with its rank and display color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub rank: u32,
    #[serde(default)]
    pub color: ColorHint,
}

impl Level {
    pub fn new(name: impl Into<String>, rank: u32, color: ColorHint) -> Self {
        Self {
            name: name.into(),
            rank,
            color,
        }
    }
}

/// Names of the standard level table
pub const SECURITY: &str = "security";
pub const ERROR: &str = "error";
pub const WARNING: &str = "warning";
pub const INFO: &str = "info";
pub const DEBUG: &str = "debug";

/// Ordered set of levels, kept sorted by rank
#[derive(Debug, Clone, Default)]
pub struct LevelRegistry {
    levels: Vec<Level>,
}

impl LevelRegistry {
    pub fn new() -> Self {
        Self { levels: Vec::new() }
    }

    /// The standard table: security, error, warning, info, debug
    ///
    /// # Example
    ///
    /// ```
    /// use tiered_logger::LevelRegistry;
    ///
    /// let registry = LevelRegistry::standard();
    /// assert_eq!(registry.rank_of("security").unwrap(), 0);
    /// assert!(registry.satisfies("error", "warning").unwrap());
    /// ```
    pub fn standard() -> Self {
        // The table is already in rank order with distinct names and ranks.
        Self {
            levels: Self::standard_table(),
        }
    }

    /// Standard levels, most severe first
    pub fn standard_table() -> Vec<Level> {
        vec![
            Level::new(SECURITY, 0, ColorHint::Magenta),
            Level::new(ERROR, 1, ColorHint::Red),
            Level::new(WARNING, 2, ColorHint::Yellow),
            Level::new(INFO, 3, ColorHint::Green),
            Level::new(DEBUG, 4, ColorHint::Blue),
        ]
    }

    /// Build a registry from a table, rejecting duplicates
    pub fn from_levels<I>(levels: I) -> Result<Self>
    where
        I: IntoIterator<Item = Level>,
    {
        let mut registry = Self::new();
        for level in levels {
            registry.insert(level)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, name: impl Into<String>, rank: u32, color: ColorHint) -> Result<()> {
        self.insert(Level::new(name, rank, color))
    }

    fn insert(&mut self, level: Level) -> Result<()> {
        if self
            .levels
            .iter()
            .any(|l| l.name == level.name || l.rank == level.rank)
        {
            return Err(LoggerError::duplicate_level(level.name, level.rank));
        }
        let pos = self.levels.partition_point(|l| l.rank < level.rank);
        self.levels.insert(pos, level);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Level> {
        self.levels.iter().find(|l| l.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn rank_of(&self, name: &str) -> Result<u32> {
        self.get(name)
            .map(|l| l.rank)
            .ok_or_else(|| LoggerError::unknown_level(name))
    }

    pub fn color_of(&self, name: &str) -> Result<ColorHint> {
        self.get(name)
            .map(|l| l.color)
            .ok_or_else(|| LoggerError::unknown_level(name))
    }

    /// True iff `candidate` is at least as severe as `threshold`
    pub fn satisfies(&self, candidate: &str, threshold: &str) -> Result<bool> {
        Ok(self.rank_of(candidate)? <= self.rank_of(threshold)?)
    }

    /// Level with the highest rank; a sink without an explicit threshold uses it
    pub fn most_verbose(&self) -> Option<&Level> {
        self.levels.last()
    }

    /// Levels in rank order, most severe first
    pub fn levels(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
