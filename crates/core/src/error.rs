//! Error types for level loading, moves, and snapshot restore.
//!
//! Illegal moves are an expected, frequent outcome (a drag that cannot go any
//! further) and are reported as [`MoveError`] with no state mutation.
//! Malformed level data and broken undo snapshots are data errors and fail
//! fast with [`LevelError`] / [`SnapshotError`].

use crate::types::{ObstacleId, Pos};

/// Malformed level descriptor
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("level JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),

    #[error("board dimensions {width}x{height} must both be positive")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("block '{block}' uses unknown shape '{shape}'")]
    UnknownShape { block: String, shape: String },

    #[error("block '{block}' has neither a shape identifier nor coordinates")]
    MissingShape { block: String },

    #[error("block '{0}' has an empty coordinate set")]
    EmptyShape(String),

    #[error("block '{0}' coordinates are not 4-connected")]
    DisconnectedShape(String),

    #[error("block '{0}' coordinates must have minimum x and minimum y of 0")]
    UnnormalizedShape(String),

    #[error("block '{0}' must require at least one rescue")]
    ZeroRequired(String),

    #[error("duplicate block id '{0}'")]
    DuplicateBlockId(String),

    #[error("obstacle at {anchor} has an empty or disconnected coordinate set")]
    InvalidObstacle { anchor: Pos },

    #[error("{entity} cell {cell} lies outside the board")]
    OutOfBounds { entity: String, cell: Pos },
}

/// Illegal move, rotation, or obstacle drag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("no block with index {0}")]
    UnknownBlock(usize),

    #[error("no obstacle {0}")]
    UnknownObstacle(ObstacleId),

    #[error("block '{0}' is complete and has left the board")]
    BlockComplete(String),

    #[error("block '{0}' cannot rotate")]
    NotRotatable(String),

    #[error("cell {0} is out of bounds")]
    OutOfBounds(Pos),

    #[error("cell {0} is a wall")]
    Wall(Pos),

    #[error("cell {cell} is occupied by block '{other}'")]
    BlockCollision { cell: Pos, other: String },

    #[error("cell {cell} is occupied by {other}")]
    ObstacleCollision { cell: Pos, other: ObstacleId },

    #[error("cell {0} holds a dog this piece cannot carry")]
    DogBlocked(Pos),
}

impl MoveError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            MoveError::UnknownBlock(_) | MoveError::UnknownObstacle(_) => "unknown_entity",
            MoveError::BlockComplete(_) => "block_complete",
            MoveError::NotRotatable(_) => "not_rotatable",
            MoveError::OutOfBounds(_) => "out_of_bounds",
            MoveError::Wall(_) => "wall",
            MoveError::BlockCollision { .. } => "block_collision",
            MoveError::ObstacleCollision { .. } => "obstacle_collision",
            MoveError::DogBlocked(_) => "dog_blocked",
        }
    }
}

/// Snapshot does not fit the live entity layout
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot has {found} {entity} entries, board has {expected}")]
    LengthMismatch {
        entity: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("snapshot rotation {rotation} is out of range for block '{block}'")]
    RotationOutOfRange { block: String, rotation: usize },

    #[error("snapshot rescued count {rescued} exceeds required {required} for block '{block}'")]
    RescuedOverflow {
        block: String,
        rescued: u32,
        required: u32,
    },
}
