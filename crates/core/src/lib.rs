//! Core puzzle logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the dog-rescue grid puzzle: the polyomino
//! catalog, the board and its entities, movement legality, rescue resolution,
//! snapshots for undo, and the level validator. It has no dependencies on
//! rendering, input, or persistence.
//!
//! # Module Structure
//!
//! - [`shapes`]: Polyomino catalog, rotation tables, and normalization
//! - [`block`]: Colored carrier blocks with a rescue counter
//! - [`dog`]: Rescue targets and the per-board roster
//! - [`obstacle`]: Movable walls and legacy wall grouping
//! - [`level`]: Serde level descriptors and shape resolution
//! - [`board`]: Occupancy rules, moves, and the rescue pass
//! - [`snapshot`]: Plain-data state for undo and reset
//! - [`validator`]: Conservative reachability check for level design
//! - [`error`]: Level, move, and snapshot errors
//!
//! # Rules
//!
//! - A block may move anywhere its cells stay in bounds and free of obstacles
//!   and other blocks; moves are teleports, no path is required
//! - A block may enter a dog's cell only if the dog matches its color
//! - Every matching dog under a block after a move is rescued, until the block
//!   reaches its required count and leaves the board
//! - The level is won once every dog is rescued
//!
//! # Example
//!
//! ```
//! use dog_rescue_core::{Board, LevelDescriptor};
//! use dog_rescue_core::types::{BlockIndex, Pos};
//!
//! let level = LevelDescriptor::from_json(r#"{
//!     "width": 6, "height": 6,
//!     "blocks": [{"id": "r1", "color": "red", "required": 1, "shape": "I", "x": 0, "y": 0}],
//!     "dogs": [{"color": "red", "x": 2, "y": 3}]
//! }"#).unwrap();
//! let mut board = Board::from_level(&level).unwrap();
//!
//! let outcome = board.move_block(BlockIndex(0), Pos::new(1, 3)).unwrap();
//! assert!(outcome.block_disappeared);
//! assert!(board.is_won());
//! ```

pub mod block;
pub mod board;
pub mod dog;
pub mod error;
pub mod level;
pub mod obstacle;
pub mod shapes;
pub mod snapshot;
pub mod validator;

pub use dog_rescue_types as types;

// Re-export commonly used types for convenience
pub use block::{Block, BoundingBox};
pub use board::{Board, MoveOutcome};
pub use dog::{Dog, DogRoster};
pub use error::{LevelError, MoveError, SnapshotError};
pub use level::LevelDescriptor;
pub use obstacle::Obstacle;
pub use shapes::{get_coords, get_rotations, Shape};
pub use snapshot::BoardSnapshot;
pub use validator::{can_block_reach, validate_level, ValidationIssue, ValidationReport};
