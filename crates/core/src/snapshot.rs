//! Plain-data board snapshots for undo.
//!
//! Only mutable fields are captured. Shape, color, id and required count never
//! change after load, so a snapshot is positional: entry `i` belongs to the
//! entity at load-order index `i`.

use crate::types::Pos;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockState {
    pub anchor: Pos,
    pub rotation: usize,
    pub rescued: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DogState {
    pub rescued: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObstacleState {
    pub anchor: Pos,
}

/// Full mutable state of a board, in load order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BoardSnapshot {
    pub blocks: Vec<BlockState>,
    pub dogs: Vec<DogState>,
    pub obstacles: Vec<ObstacleState>,
}

impl BoardSnapshot {
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.dogs.clear();
        self.obstacles.clear();
    }

    /// Number of dogs still waiting in this snapshot
    pub fn dogs_remaining(&self) -> usize {
        self.dogs.iter().filter(|d| !d.rescued).count()
    }
}
