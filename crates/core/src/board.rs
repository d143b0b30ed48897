//! Board module - owns every entity of a level and enforces movement rules
//!
//! The board holds blocks, obstacles and dogs in load order. Entities are never
//! removed: a complete block is flagged and stops participating in occupancy,
//! and a rescued dog stays in the roster. Positional order is what snapshots
//! are keyed on.
//!
//! Occupancy rules:
//! - no two non-complete blocks overlap
//! - no two obstacles overlap
//! - obstacles never overlap non-complete blocks or unrescued dogs
//! - a block may enter a dog's cell only if it can rescue that dog
//!
//! Load-time data is trusted for overlaps; the rules are enforced at move time.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::block::Block;
use crate::dog::{Dog, DogRoster};
use crate::error::{LevelError, MoveError, SnapshotError};
use crate::level::LevelDescriptor;
use crate::obstacle::{group_walls, Obstacle, ObstacleIds};
use crate::shapes::is_connected;
use crate::snapshot::BoardSnapshot;
use crate::types::{BlockIndex, Color, DogIndex, ObstacleId, Offset, Pos};

/// Result of an accepted block move or rotation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Dogs rescued by this call, in cell-visitation order
    pub rescued_dogs: Vec<DogIndex>,
    /// The block completed and left the board during this call
    pub block_disappeared: bool,
}

/// The puzzle board for one level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    blocks: Vec<Block>,
    obstacles: Vec<Obstacle>,
    dogs: DogRoster,
    /// State right after load, for reset
    initial: BoardSnapshot,
}

impl Board {
    /// Build a board from a level descriptor
    ///
    /// Fails fast on malformed data: unknown shapes, bad coordinate sets,
    /// duplicate block ids, or entities outside the board.
    pub fn from_level(level: &LevelDescriptor) -> Result<Self, LevelError> {
        if level.width <= 0 || level.height <= 0 {
            return Err(LevelError::InvalidDimensions {
                width: level.width,
                height: level.height,
            });
        }
        let in_bounds =
            |p: Pos| p.x >= 0 && p.x < level.width && p.y >= 0 && p.y < level.height;

        let mut seen_ids = HashSet::new();
        let mut blocks = Vec::with_capacity(level.blocks.len());
        for desc in &level.blocks {
            if !seen_ids.insert(desc.id.as_str()) {
                return Err(LevelError::DuplicateBlockId(desc.id.clone()));
            }
            if desc.required == 0 {
                return Err(LevelError::ZeroRequired(desc.id.clone()));
            }
            let shape = desc.resolve_shape()?;
            let block = Block::new(
                desc.id.clone(),
                desc.color,
                desc.required,
                shape,
                desc.anchor(),
                desc.rotatable,
            );
            if let Some(cell) = block.occupied_cells().find(|&c| !in_bounds(c)) {
                return Err(LevelError::OutOfBounds {
                    entity: format!("block '{}'", desc.id),
                    cell,
                });
            }
            blocks.push(block);
        }

        let mut dogs = Vec::with_capacity(level.dogs.len());
        for desc in &level.dogs {
            if !in_bounds(desc.pos()) {
                return Err(LevelError::OutOfBounds {
                    entity: format!("{} dog", desc.color),
                    cell: desc.pos(),
                });
            }
            dogs.push(Dog::new(desc.color, desc.pos()));
        }

        let mut ids = ObstacleIds::new();
        let mut obstacles = Vec::with_capacity(level.obstacles.len());
        for desc in &level.obstacles {
            let coords: Vec<Offset> = desc.offsets();
            if !is_connected(&coords) {
                return Err(LevelError::InvalidObstacle {
                    anchor: desc.anchor(),
                });
            }
            obstacles.push(Obstacle::new(ids.next_id(), desc.anchor(), coords));
        }
        let walls: Vec<Pos> = level.walls.iter().map(|w| w.pos()).collect();
        obstacles.extend(group_walls(&walls, &mut ids));
        for obstacle in &obstacles {
            if let Some(cell) = obstacle.occupied_cells().find(|&c| !in_bounds(c)) {
                return Err(LevelError::OutOfBounds {
                    entity: obstacle.id().to_string(),
                    cell,
                });
            }
        }

        let mut board = Self {
            width: level.width,
            height: level.height,
            blocks,
            obstacles,
            dogs: DogRoster::new(dogs),
            initial: BoardSnapshot::default(),
        };
        board.initial = board.snapshot();

        debug!(
            level = %level.title(),
            blocks = board.blocks.len(),
            dogs = board.dogs.len(),
            obstacles = board.obstacles.len(),
            "level loaded"
        );
        Ok(board)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    // ============== Entity access ==============

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, index: BlockIndex) -> Option<&Block> {
        self.blocks.get(index.0)
    }

    pub fn find_block(&self, id: &str) -> Option<BlockIndex> {
        self.blocks.iter().position(|b| b.id() == id).map(BlockIndex)
    }

    /// Blocks still on the board
    pub fn active_blocks(&self) -> impl Iterator<Item = (BlockIndex, &Block)> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.is_complete())
            .map(|(i, b)| (BlockIndex(i), b))
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Obstacles never leave the board, so this is all of them
    pub fn active_obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn obstacle(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id() == id)
    }

    pub fn dogs(&self) -> &DogRoster {
        &self.dogs
    }

    pub fn dog(&self, index: DogIndex) -> Option<&Dog> {
        self.dogs.get(index)
    }

    pub fn active_dogs(&self) -> impl Iterator<Item = (DogIndex, &Dog)> {
        self.dogs.active()
    }

    pub fn dogs_remaining(&self) -> usize {
        self.dogs.remaining()
    }

    pub fn dogs_remaining_of(&self, color: Color) -> usize {
        self.dogs.remaining_of(color)
    }

    /// Win condition: every dog rescued. Recomputed on each call.
    pub fn is_won(&self) -> bool {
        self.dogs.all_rescued()
    }

    // ============== Cell predicates ==============

    pub fn in_bounds(&self, cell: Pos) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    pub fn obstacle_at(&self, cell: Pos) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.occupies(cell))
    }

    /// Any obstacle covers the cell
    pub fn is_wall(&self, cell: Pos) -> bool {
        self.obstacle_at(cell).is_some()
    }

    /// The non-complete block covering the cell, optionally ignoring one block
    pub fn block_at_excluding(
        &self,
        cell: Pos,
        excluding: Option<BlockIndex>,
    ) -> Option<(BlockIndex, &Block)> {
        self.active_blocks()
            .find(|&(i, b)| Some(i) != excluding && b.occupies(cell))
    }

    pub fn block_at(&self, cell: Pos) -> Option<(BlockIndex, &Block)> {
        self.block_at_excluding(cell, None)
    }

    pub fn is_occupied_by_block(&self, cell: Pos, excluding: Option<BlockIndex>) -> bool {
        self.block_at_excluding(cell, excluding).is_some()
    }

    pub fn dog_at(&self, cell: Pos) -> Option<(DogIndex, &Dog)> {
        self.dogs.dog_at(cell)
    }

    // ============== Legality checks ==============

    fn live_block(&self, index: BlockIndex) -> Result<&Block, MoveError> {
        let block = self
            .blocks
            .get(index.0)
            .ok_or(MoveError::UnknownBlock(index.0))?;
        if block.is_complete() {
            return Err(MoveError::BlockComplete(block.id().to_string()));
        }
        Ok(block)
    }

    /// Per-cell rule shared by moves and rotations
    fn check_block_cells(
        &self,
        index: BlockIndex,
        block: &Block,
        anchor: Pos,
        coords: &[Offset],
    ) -> Result<(), MoveError> {
        for &offset in coords {
            let cell = anchor.offset(offset);
            if !self.in_bounds(cell) {
                return Err(MoveError::OutOfBounds(cell));
            }
            if self.is_wall(cell) {
                return Err(MoveError::Wall(cell));
            }
            if let Some((_, other)) = self.block_at_excluding(cell, Some(index)) {
                return Err(MoveError::BlockCollision {
                    cell,
                    other: other.id().to_string(),
                });
            }
            if let Some((_, dog)) = self.dog_at(cell) {
                if !dog.can_be_rescued_by(block.color()) || block.is_complete() {
                    return Err(MoveError::DogBlocked(cell));
                }
            }
        }
        Ok(())
    }

    pub fn check_block_move(&self, index: BlockIndex, anchor: Pos) -> Result<(), MoveError> {
        let block = self.live_block(index)?;
        self.check_block_cells(index, block, anchor, block.coords())
    }

    /// Rotation is in place: the next variant at the current anchor
    pub fn check_block_rotate(&self, index: BlockIndex) -> Result<(), MoveError> {
        let block = self.live_block(index)?;
        if !block.rotatable() {
            return Err(MoveError::NotRotatable(block.id().to_string()));
        }
        self.check_block_cells(index, block, block.anchor(), block.next_coords())
    }

    pub fn check_obstacle_move(&self, id: ObstacleId, anchor: Pos) -> Result<(), MoveError> {
        let obstacle = self.obstacle(id).ok_or(MoveError::UnknownObstacle(id))?;
        for cell in obstacle.cells_at(anchor) {
            if !self.in_bounds(cell) {
                return Err(MoveError::OutOfBounds(cell));
            }
            if let Some(other) = self
                .obstacles
                .iter()
                .find(|o| o.id() != id && o.occupies(cell))
            {
                return Err(MoveError::ObstacleCollision {
                    cell,
                    other: other.id(),
                });
            }
            if let Some((_, block)) = self.block_at(cell) {
                return Err(MoveError::BlockCollision {
                    cell,
                    other: block.id().to_string(),
                });
            }
            // Obstacles carry nothing, so any waiting dog blocks them.
            if self.dog_at(cell).is_some() {
                return Err(MoveError::DogBlocked(cell));
            }
        }
        Ok(())
    }

    pub fn can_block_move_to(&self, index: BlockIndex, anchor: Pos) -> bool {
        self.check_block_move(index, anchor).is_ok()
    }

    pub fn can_block_rotate(&self, index: BlockIndex) -> bool {
        self.check_block_rotate(index).is_ok()
    }

    pub fn can_obstacle_move_to(&self, id: ObstacleId, anchor: Pos) -> bool {
        self.check_obstacle_move(id, anchor).is_ok()
    }

    // ============== Mutations ==============

    /// Move a block, then rescue matching dogs under its new footprint
    pub fn move_block(&mut self, index: BlockIndex, anchor: Pos) -> Result<MoveOutcome, MoveError> {
        if let Err(err) = self.check_block_move(index, anchor) {
            trace!(block = index.0, to = %anchor, code = err.code(), "move rejected");
            return Err(err);
        }
        self.blocks[index.0].move_to(anchor);
        debug!(block = %self.blocks[index.0].id(), to = %anchor, "block moved");
        Ok(self.rescue_pass(index))
    }

    /// Rotate a block in place, then rescue matching dogs under it
    pub fn rotate_block(&mut self, index: BlockIndex) -> Result<MoveOutcome, MoveError> {
        if let Err(err) = self.check_block_rotate(index) {
            trace!(block = index.0, code = err.code(), "rotation rejected");
            return Err(err);
        }
        let block = &mut self.blocks[index.0];
        block.rotate();
        debug!(block = %block.id(), rotation = block.rotation(), "block rotated");
        Ok(self.rescue_pass(index))
    }

    /// Relocate an obstacle; obstacles never rescue
    pub fn move_obstacle(&mut self, id: ObstacleId, anchor: Pos) -> Result<(), MoveError> {
        if let Err(err) = self.check_obstacle_move(id, anchor) {
            trace!(obstacle = %id, to = %anchor, code = err.code(), "obstacle move rejected");
            return Err(err);
        }
        if let Some(obstacle) = self.obstacles.iter_mut().find(|o| o.id() == id) {
            obstacle.move_to(anchor);
            debug!(obstacle = %id, to = %anchor, "obstacle moved");
        }
        Ok(())
    }

    /// Visit the block's cells in shape order and rescue every matching dog
    ///
    /// Stops at the first rescue that completes the block; later cells in the
    /// same call are not checked.
    fn rescue_pass(&mut self, index: BlockIndex) -> MoveOutcome {
        let mut outcome = MoveOutcome::default();
        let block = &mut self.blocks[index.0];
        let color = block.color();
        let cells: Vec<Pos> = block.occupied_cells().collect();

        for cell in cells {
            let hit = self
                .dogs
                .dog_at(cell)
                .filter(|(_, dog)| dog.can_be_rescued_by(color))
                .map(|(i, _)| i);
            let Some(dog_index) = hit else {
                continue;
            };
            if let Some(dog) = self.dogs.get_mut(dog_index) {
                dog.rescue();
            }
            outcome.rescued_dogs.push(dog_index);
            debug!(block = %block.id(), dog = dog_index.0, at = %cell, "dog rescued");

            if block.rescue_one() {
                outcome.block_disappeared = true;
                debug!(block = %block.id(), "block complete");
                break;
            }
        }
        outcome
    }

    // ============== Snapshots ==============

    /// Write the current mutable state into `out`, reusing its buffers
    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.clear();
        out.blocks.extend(self.blocks.iter().map(Block::snapshot));
        out.dogs.extend(self.dogs.all().iter().map(Dog::snapshot));
        out.obstacles
            .extend(self.obstacles.iter().map(Obstacle::snapshot));
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut out = BoardSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }

    /// Restore a snapshot taken from a board of the same level
    ///
    /// The snapshot is checked against the live layout before anything is
    /// written, so a rejected snapshot leaves the board untouched.
    pub fn restore(&mut self, snapshot: &BoardSnapshot) -> Result<(), SnapshotError> {
        check_len("block", self.blocks.len(), snapshot.blocks.len())?;
        check_len("dog", self.dogs.len(), snapshot.dogs.len())?;
        check_len("obstacle", self.obstacles.len(), snapshot.obstacles.len())?;
        for (block, state) in self.blocks.iter().zip(&snapshot.blocks) {
            if state.rotation >= block.shape().variant_count() {
                return Err(SnapshotError::RotationOutOfRange {
                    block: block.id().to_string(),
                    rotation: state.rotation,
                });
            }
            if state.rescued > block.required() {
                return Err(SnapshotError::RescuedOverflow {
                    block: block.id().to_string(),
                    rescued: state.rescued,
                    required: block.required(),
                });
            }
        }

        for (block, state) in self.blocks.iter_mut().zip(&snapshot.blocks) {
            block.restore(state);
        }
        self.dogs.restore(&snapshot.dogs);
        for (obstacle, state) in self.obstacles.iter_mut().zip(&snapshot.obstacles) {
            obstacle.restore(state);
        }
        Ok(())
    }

    /// Return every entity to its load-time state
    pub fn reset(&mut self) {
        let initial = std::mem::take(&mut self.initial);
        // The initial snapshot was taken from this board, so it always fits.
        let restored = self.restore(&initial);
        debug_assert!(restored.is_ok(), "initial snapshot rejected: {restored:?}");
        if let Err(err) = restored {
            debug!(%err, "reset skipped");
        }
        self.initial = initial;
    }
}

fn check_len(entity: &'static str, expected: usize, found: usize) -> Result<(), SnapshotError> {
    if expected != found {
        return Err(SnapshotError::LengthMismatch {
            entity,
            expected,
            found,
        });
    }
    Ok(())
}
