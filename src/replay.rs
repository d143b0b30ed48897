//! Scripted command replay against a [`Session`].
//!
//! A replay script is a JSON array of commands tagged by `op`:
//!
//! ```json
//! [
//!   {"op": "move_block", "block": "r1", "x": 2, "y": 4},
//!   {"op": "rotate_block", "block": "r1"},
//!   {"op": "drag_block", "block": "b1", "x": 5, "y": 0},
//!   {"op": "move_obstacle", "obstacle": 0, "x": 3, "y": 3},
//!   {"op": "undo"}
//! ]
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{MoveError, MoveOutcome, SnapshotError};
use crate::engine::Session;
use crate::types::{BlockIndex, ObstacleId, Pos};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ReplayCommand {
    MoveBlock { block: String, x: i32, y: i32 },
    DragBlock { block: String, x: i32, y: i32 },
    RotateBlock { block: String },
    MoveObstacle { obstacle: u32, x: i32, y: i32 },
    DragObstacle { obstacle: u32, x: i32, y: i32 },
    Undo,
    Reset,
}

/// What one command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepReport {
    Accepted {
        rescued: usize,
        block_disappeared: bool,
    },
    Rejected {
        code: &'static str,
        reason: String,
    },
    Undone(bool),
    Reset,
}

impl StepReport {
    fn from_move(result: Result<MoveOutcome, MoveError>) -> Self {
        match result {
            Ok(outcome) => StepReport::Accepted {
                rescued: outcome.rescued_dogs.len(),
                block_disappeared: outcome.block_disappeared,
            },
            Err(err) => Self::rejected(&err),
        }
    }

    fn rejected(err: &MoveError) -> Self {
        StepReport::Rejected {
            code: err.code(),
            reason: err.to_string(),
        }
    }
}

impl std::fmt::Display for StepReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepReport::Accepted {
                rescued,
                block_disappeared,
            } => {
                write!(f, "ok, rescued {rescued}")?;
                if *block_disappeared {
                    f.write_str(", block complete")?;
                }
                Ok(())
            }
            StepReport::Rejected { code, reason } => write!(f, "rejected [{code}]: {reason}"),
            StepReport::Undone(true) => f.write_str("undone"),
            StepReport::Undone(false) => f.write_str("nothing to undo"),
            StepReport::Reset => f.write_str("reset"),
        }
    }
}

pub fn parse_script(json: &str) -> serde_json::Result<Vec<ReplayCommand>> {
    serde_json::from_str(json)
}

/// Apply one command; illegal moves are reported, not returned as errors
///
/// Only a snapshot that no longer fits the board fails the replay.
pub fn apply(session: &mut Session, command: &ReplayCommand) -> Result<StepReport, SnapshotError> {
    let report = match command {
        ReplayCommand::MoveBlock { block, x, y } => match lookup(session, block) {
            Ok(index) => StepReport::from_move(session.move_block(index, Pos::new(*x, *y))),
            Err(rejected) => rejected,
        },
        ReplayCommand::DragBlock { block, x, y } => match lookup(session, block) {
            Ok(index) => StepReport::from_move(session.drag_block(index, Pos::new(*x, *y))),
            Err(rejected) => rejected,
        },
        ReplayCommand::RotateBlock { block } => match lookup(session, block) {
            Ok(index) => StepReport::from_move(session.rotate_block(index)),
            Err(rejected) => rejected,
        },
        ReplayCommand::MoveObstacle { obstacle, x, y } => {
            let result = session.move_obstacle(ObstacleId(*obstacle), Pos::new(*x, *y));
            StepReport::from_move(result.map(|()| MoveOutcome::default()))
        }
        ReplayCommand::DragObstacle { obstacle, x, y } => {
            let result = session.drag_obstacle(ObstacleId(*obstacle), Pos::new(*x, *y));
            StepReport::from_move(result.map(|()| MoveOutcome::default()))
        }
        ReplayCommand::Undo => StepReport::Undone(session.undo()?),
        ReplayCommand::Reset => {
            session.reset_level();
            StepReport::Reset
        }
    };
    Ok(report)
}

fn lookup(session: &Session, id: &str) -> Result<BlockIndex, StepReport> {
    session.board().find_block(id).ok_or_else(|| StepReport::Rejected {
        code: "unknown_entity",
        reason: format!("no block with id '{id}'"),
    })
}
