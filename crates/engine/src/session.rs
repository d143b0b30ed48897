//! Session - one played level with bounded undo history
//!
//! The session owns the board and a stack of pre-move snapshots. A snapshot is
//! recorded only when a command is accepted and actually changes the board, so
//! every undo step reverts something visible.

use std::collections::VecDeque;

use dog_rescue_core::types::{BlockIndex, ObstacleId, Pos};
use dog_rescue_core::{
    validate_level, Board, BoardSnapshot, LevelDescriptor, LevelError, MoveError, MoveOutcome,
    SnapshotError, ValidationReport,
};
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::drag::constrain_drag;

#[derive(Debug, Clone)]
pub struct Session {
    level: LevelDescriptor,
    board: Board,
    history: VecDeque<BoardSnapshot>,
    config: SessionConfig,
}

impl Session {
    pub fn new(level: LevelDescriptor, config: SessionConfig) -> Result<Self, LevelError> {
        let board = Board::from_level(&level)?;
        Ok(Self {
            level,
            board,
            history: VecDeque::with_capacity(config.undo_limit),
            config,
        })
    }

    /// Replace the current level; history is cleared
    pub fn start_level(&mut self, level: LevelDescriptor) -> Result<(), LevelError> {
        self.board = Board::from_level(&level)?;
        self.level = level;
        self.history.clear();
        debug!(level = %self.level.title(), "level started");
        Ok(())
    }

    /// Restart the current level from its load state; history is cleared
    pub fn reset_level(&mut self) {
        self.board.reset();
        self.history.clear();
        debug!(level = %self.level.title(), "level reset");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn level(&self) -> &LevelDescriptor {
        &self.level
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn is_won(&self) -> bool {
        self.board.is_won()
    }

    pub fn dogs_remaining(&self) -> usize {
        self.board.dogs_remaining()
    }

    pub fn validate(&self) -> ValidationReport {
        validate_level(&self.board)
    }

    // ============== Commands ==============

    pub fn move_block(&mut self, index: BlockIndex, anchor: Pos) -> Result<MoveOutcome, MoveError> {
        if let Some(block) = self.board.block(index) {
            if block.anchor() == anchor && !block.is_complete() {
                return Ok(MoveOutcome::default());
            }
        }
        let before = self.board.snapshot();
        let outcome = self.board.move_block(index, anchor)?;
        self.record(before);
        Ok(outcome)
    }

    pub fn rotate_block(&mut self, index: BlockIndex) -> Result<MoveOutcome, MoveError> {
        let before = self.board.snapshot();
        let outcome = self.board.rotate_block(index)?;
        self.record(before);
        Ok(outcome)
    }

    pub fn move_obstacle(&mut self, id: ObstacleId, anchor: Pos) -> Result<(), MoveError> {
        let before = self.board.snapshot();
        self.board.move_obstacle(id, anchor)?;
        self.record(before);
        Ok(())
    }

    /// Drop position for dragging a block toward `target`
    ///
    /// None if the index is unknown. A complete block never moves, so its
    /// anchor is returned unchanged.
    pub fn drag_block_target(&self, index: BlockIndex, target: Pos) -> Option<Pos> {
        let from = self.board.block(index)?.anchor();
        Some(constrain_drag(from, target, |p| {
            self.board.can_block_move_to(index, p)
        }))
    }

    pub fn drag_obstacle_target(&self, id: ObstacleId, target: Pos) -> Option<Pos> {
        let from = self.board.obstacle(id)?.anchor();
        Some(constrain_drag(from, target, |p| {
            self.board.can_obstacle_move_to(id, p)
        }))
    }

    /// Drag a block toward `target` and drop it at the furthest legal anchor
    pub fn drag_block(&mut self, index: BlockIndex, target: Pos) -> Result<MoveOutcome, MoveError> {
        let anchor = self
            .drag_block_target(index, target)
            .ok_or(MoveError::UnknownBlock(index.0))?;
        self.move_block(index, anchor)
    }

    pub fn drag_obstacle(&mut self, id: ObstacleId, target: Pos) -> Result<(), MoveError> {
        let anchor = self
            .drag_obstacle_target(id, target)
            .ok_or(MoveError::UnknownObstacle(id))?;
        self.move_obstacle(id, anchor)
    }

    // ============== Undo ==============

    /// Revert the most recent recorded change; false if history is empty
    pub fn undo(&mut self) -> Result<bool, SnapshotError> {
        let Some(snapshot) = self.history.pop_back() else {
            return Ok(false);
        };
        self.board.restore(&snapshot)?;
        debug!(
            depth = self.history.len(),
            dogs_remaining = self.board.dogs_remaining(),
            "undo"
        );
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Push the pre-command state if the command changed anything
    fn record(&mut self, before: BoardSnapshot) {
        if self.board.snapshot() == before {
            return;
        }
        if self.board.is_won() {
            info!(level = %self.level.title(), "level won");
        }
        if self.config.undo_limit == 0 {
            return;
        }
        if self.history.len() == self.config.undo_limit {
            self.history.pop_front();
        }
        self.history.push_back(before);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn level() -> LevelDescriptor {
        serde_json::from_value(json!({
            "width": 6, "height": 6,
            "blocks": [
                {"id": "r1", "color": "red", "required": 2, "shape": "I2", "x": 0, "y": 0},
                {"id": "b1", "color": "blue", "required": 1, "shape": "O", "x": 4, "y": 0}
            ],
            "dogs": [
                {"color": "red", "x": 0, "y": 5},
                {"color": "red", "x": 1, "y": 5},
                {"color": "blue", "x": 5, "y": 5}
            ],
            "walls": [{"x": 3, "y": 0}, {"x": 3, "y": 1}]
        }))
        .unwrap()
    }

    fn session() -> Session {
        Session::new(level(), SessionConfig::default()).unwrap()
    }

    #[test]
    fn test_move_records_history_and_undo_restores() {
        let mut s = session();
        let start = s.board().snapshot();

        let outcome = s.move_block(BlockIndex(0), Pos::new(0, 2)).unwrap();
        assert!(outcome.rescued_dogs.is_empty());
        assert_eq!(s.undo_depth(), 1);

        assert!(s.undo().unwrap());
        assert_eq!(s.board().snapshot(), start);
        assert!(!s.undo().unwrap());
    }

    #[test]
    fn test_rejected_and_noop_moves_leave_no_history() {
        let mut s = session();
        assert!(s.move_block(BlockIndex(0), Pos::new(2, 0)).is_err());
        assert_eq!(s.move_block(BlockIndex(0), Pos::new(0, 0)), Ok(MoveOutcome::default()));
        assert!(s.rotate_block(BlockIndex(1)).is_ok());
        assert!(!s.can_undo());
    }

    #[test]
    fn test_rescue_then_undo_revives_dogs() {
        let mut s = session();
        let outcome = s.move_block(BlockIndex(0), Pos::new(0, 5)).unwrap();
        assert_eq!(outcome.rescued_dogs.len(), 2);
        assert!(outcome.block_disappeared);
        assert_eq!(s.dogs_remaining(), 1);

        s.undo().unwrap();
        assert_eq!(s.dogs_remaining(), 3);
        assert!(!s.board().blocks()[0].is_complete());
    }

    #[test]
    fn test_win_and_reset() {
        let mut s = session();
        s.move_block(BlockIndex(0), Pos::new(0, 5)).unwrap();
        s.move_block(BlockIndex(1), Pos::new(4, 4)).unwrap();
        assert!(s.is_won());

        s.reset_level();
        assert!(!s.is_won());
        assert!(!s.can_undo());
        assert_eq!(s.dogs_remaining(), 3);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut s = Session::new(level(), SessionConfig::default().with_undo_limit(2)).unwrap();
        for y in 1..=4 {
            s.move_block(BlockIndex(0), Pos::new(0, y)).unwrap();
        }
        assert_eq!(s.undo_depth(), 2);
        s.undo().unwrap();
        s.undo().unwrap();
        assert_eq!(s.board().blocks()[0].anchor(), Pos::new(0, 2));
        assert!(!s.undo().unwrap());
    }

    #[test]
    fn test_drag_stops_at_wall() {
        let mut s = session();
        // The I2 sweeping right along row 0 hits the wall at x=3.
        assert_eq!(
            s.drag_block_target(BlockIndex(0), Pos::new(5, 0)),
            Some(Pos::new(1, 0))
        );
        s.drag_block(BlockIndex(0), Pos::new(5, 0)).unwrap();
        assert_eq!(s.board().blocks()[0].anchor(), Pos::new(1, 0));
        assert_eq!(s.drag_block_target(BlockIndex(9), Pos::new(0, 0)), None);
    }

    #[test]
    fn test_obstacle_move_is_undoable() {
        let mut s = session();
        let wall = s.board().obstacles()[0].id();
        assert_eq!(
            s.drag_obstacle_target(wall, Pos::new(3, 4)),
            Some(Pos::new(3, 4))
        );
        s.move_obstacle(wall, Pos::new(3, 3)).unwrap();
        assert!(!s.board().is_wall(Pos::new(3, 0)));
        s.undo().unwrap();
        assert!(s.board().is_wall(Pos::new(3, 0)));
    }

    #[test]
    fn test_start_level_replaces_board() {
        let mut s = session();
        s.move_block(BlockIndex(0), Pos::new(0, 1)).unwrap();
        let mut next = level();
        next.name = Some("second".to_string());
        next.dogs.truncate(1);
        s.start_level(next).unwrap();
        assert_eq!(s.level().title(), "second");
        assert_eq!(s.dogs_remaining(), 1);
        assert!(!s.can_undo());
    }
}
