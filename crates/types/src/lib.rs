//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental vocabulary used throughout the puzzle.
//! All types are plain data with no behavior beyond parsing and formatting,
//! making them usable from the board simulation, the controller, and the CLI.
//!
//! # Coordinates
//!
//! Cells are addressed by integer `(x, y)` with `x` growing to the right and
//! `y` growing downward. Shapes are expressed as [`Offset`]s relative to an
//! anchor cell; the absolute cell of an offset is `anchor + offset`.
//!
//! # Colors
//!
//! Blocks and dogs share a fixed palette. A block can only rescue dogs of its
//! own color:
//!
//! | Color | Name |
//! |-------|------|
//! | [`Color::Red`] | `red` |
//! | [`Color::Blue`] | `blue` |
//! | [`Color::Green`] | `green` |
//! | [`Color::Yellow`] | `yellow` |
//! | [`Color::Purple`] | `purple` |
//! | [`Color::Orange`] | `orange` |
//!
//! # Examples
//!
//! ```
//! use dog_rescue_types::{Color, Pos, ShapeKind};
//!
//! // Parse from string (case-insensitive)
//! let color = Color::from_str("Red").unwrap();
//! assert_eq!(color, Color::Red);
//! assert_eq!(color.as_str(), "red");
//!
//! let shape = ShapeKind::from_str("l5").unwrap();
//! assert_eq!(shape, ShapeKind::L5);
//! assert_eq!(shape.cell_count(), 5);
//!
//! // Offsets translate positions
//! assert_eq!(Pos::new(2, 3).offset((1, -1)), Pos::new(3, 2));
//! ```

use serde::{Deserialize, Serialize};

/// Maximum number of board snapshots kept by the undo history
pub const DEFAULT_UNDO_LIMIT: usize = 50;

/// Number of distinct quarter turns; no shape has more rotation variants
pub const MAX_ROTATIONS: usize = 4;

/// Offset of a single cell relative to an entity anchor
pub type Offset = (i32, i32);

/// Absolute board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by a shape offset
    ///
    /// Saturates at the `i32` limits; a saturated cell is outside every board.
    pub fn offset(self, (dx, dy): Offset) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl From<(i32, i32)> for Pos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Block and dog colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl Color {
    /// All palette entries in declaration order
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Purple,
        Color::Orange,
    ];

    /// Parse color from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(Color::Red),
            "blue" => Some(Color::Blue),
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            "purple" => Some(Color::Purple),
            "orange" => Some(Color::Orange),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::Orange => "orange",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifiers of the built-in polyomino catalog (2 to 6 cells)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    I2,
    I3,
    L3,
    I,
    L,
    J,
    T,
    O,
    I5,
    L5,
    T5,
    P,
    U,
    I6,
    L6,
    C,
}

impl ShapeKind {
    /// Every catalog entry, smallest shapes first
    pub const ALL: [ShapeKind; 16] = [
        ShapeKind::I2,
        ShapeKind::I3,
        ShapeKind::L3,
        ShapeKind::I,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::T,
        ShapeKind::O,
        ShapeKind::I5,
        ShapeKind::L5,
        ShapeKind::T5,
        ShapeKind::P,
        ShapeKind::U,
        ShapeKind::I6,
        ShapeKind::L6,
        ShapeKind::C,
    ];

    /// Parse shape identifier from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "I2" => Some(ShapeKind::I2),
            "I3" => Some(ShapeKind::I3),
            "L3" => Some(ShapeKind::L3),
            "I" | "I4" => Some(ShapeKind::I),
            "L" | "L4" => Some(ShapeKind::L),
            "J" | "J4" => Some(ShapeKind::J),
            "T" | "T4" => Some(ShapeKind::T),
            "O" => Some(ShapeKind::O),
            "I5" => Some(ShapeKind::I5),
            "L5" => Some(ShapeKind::L5),
            "T5" => Some(ShapeKind::T5),
            "P" => Some(ShapeKind::P),
            "U" => Some(ShapeKind::U),
            "I6" => Some(ShapeKind::I6),
            "L6" => Some(ShapeKind::L6),
            "C" => Some(ShapeKind::C),
            _ => None,
        }
    }

    /// Canonical identifier as used in level data
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I2 => "I2",
            ShapeKind::I3 => "I3",
            ShapeKind::L3 => "L3",
            ShapeKind::I => "I",
            ShapeKind::L => "L",
            ShapeKind::J => "J",
            ShapeKind::T => "T",
            ShapeKind::O => "O",
            ShapeKind::I5 => "I5",
            ShapeKind::L5 => "L5",
            ShapeKind::T5 => "T5",
            ShapeKind::P => "P",
            ShapeKind::U => "U",
            ShapeKind::I6 => "I6",
            ShapeKind::L6 => "L6",
            ShapeKind::C => "C",
        }
    }

    /// Number of cells in the shape
    pub fn cell_count(&self) -> usize {
        match self {
            ShapeKind::I2 => 2,
            ShapeKind::I3 | ShapeKind::L3 => 3,
            ShapeKind::I | ShapeKind::L | ShapeKind::J | ShapeKind::T | ShapeKind::O => 4,
            ShapeKind::I5 | ShapeKind::L5 | ShapeKind::T5 | ShapeKind::P | ShapeKind::U => 5,
            ShapeKind::I6 | ShapeKind::L6 | ShapeKind::C => 6,
        }
    }
}

/// Position of a block in the board's load order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockIndex(pub usize);

/// Position of a dog in the board's load order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DogIndex(pub usize);

/// Stable obstacle identity, assigned from a monotonic counter at load
///
/// Never derived from coordinates, so it survives moves and undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

impl std::fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "obstacle_{}", self.0)
    }
}
