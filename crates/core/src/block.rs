//! Block module - colored polyomino pieces that carry dogs off the board

use crate::shapes::Shape;
use crate::snapshot::BlockState;
use crate::types::{Color, Offset, Pos};

/// Inclusive cell bounds of a block's current footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

/// A polyomino block
///
/// Legality of moves and rotations is the board's job; the methods here
/// mutate unconditionally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    id: String,
    color: Color,
    required: u32,
    rescued: u32,
    shape: Shape,
    rotation: usize,
    anchor: Pos,
    rotatable: bool,
}

impl Block {
    /// Create a block at `anchor` in rotation 0 with nothing rescued yet
    ///
    /// A non-rotatable block keeps only its base variant.
    pub fn new(
        id: impl Into<String>,
        color: Color,
        required: u32,
        shape: Shape,
        anchor: Pos,
        rotatable: bool,
    ) -> Self {
        let shape = if rotatable { shape } else { shape.fixed() };
        Self {
            id: id.into(),
            color,
            required,
            rescued: 0,
            shape,
            rotation: 0,
            anchor,
            rotatable,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn required(&self) -> u32 {
        self.required
    }

    pub fn rescued(&self) -> u32 {
        self.rescued
    }

    /// Dogs still to rescue before the block leaves the board
    pub fn remaining(&self) -> u32 {
        self.required - self.rescued
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    pub fn anchor(&self) -> Pos {
        self.anchor
    }

    pub fn rotatable(&self) -> bool {
        self.rotatable
    }

    /// Offsets of the active rotation variant
    pub fn coords(&self) -> &[Offset] {
        self.shape.variant(self.rotation)
    }

    /// Offsets the block would have after one more rotation
    pub fn next_coords(&self) -> &[Offset] {
        self.shape.variant(self.shape.next_rotation(self.rotation))
    }

    /// Absolute cells, in shape-definition order
    pub fn occupied_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        let anchor = self.anchor;
        self.coords().iter().map(move |&o| anchor.offset(o))
    }

    /// Absolute cells if the block were anchored at `anchor`
    pub fn cells_at(&self, anchor: Pos) -> impl Iterator<Item = Pos> + '_ {
        self.coords().iter().map(move |&o| anchor.offset(o))
    }

    pub fn occupies(&self, cell: Pos) -> bool {
        self.occupied_cells().any(|c| c == cell)
    }

    /// Advance to the next rotation variant; false if the block is fixed
    pub fn rotate(&mut self) -> bool {
        if !self.rotatable {
            return false;
        }
        self.rotation = self.shape.next_rotation(self.rotation);
        true
    }

    /// Count one rescued dog; returns true if the block just became complete
    ///
    /// Callers must not rescue with a complete block. The count saturates at
    /// `required` so the invariant `rescued <= required` always holds.
    pub fn rescue_one(&mut self) -> bool {
        debug_assert!(!self.is_complete(), "block '{}' already complete", self.id);
        self.rescued = (self.rescued + 1).min(self.required);
        self.is_complete()
    }

    /// All dogs rescued; the block no longer occupies the board
    pub fn is_complete(&self) -> bool {
        self.rescued >= self.required
    }

    pub fn move_to(&mut self, anchor: Pos) {
        self.anchor = anchor;
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let mut bb = BoundingBox {
            min_x: i32::MAX,
            max_x: i32::MIN,
            min_y: i32::MAX,
            max_y: i32::MIN,
        };
        for cell in self.occupied_cells() {
            bb.min_x = bb.min_x.min(cell.x);
            bb.max_x = bb.max_x.max(cell.x);
            bb.min_y = bb.min_y.min(cell.y);
            bb.max_y = bb.max_y.max(cell.y);
        }
        bb
    }

    pub fn snapshot(&self) -> BlockState {
        BlockState {
            anchor: self.anchor,
            rotation: self.rotation,
            rescued: self.rescued,
        }
    }

    /// Write back a snapshot; range checks happen at the board level
    pub fn restore(&mut self, state: &BlockState) {
        self.anchor = state.anchor;
        self.rotation = state.rotation;
        self.rescued = state.rescued;
    }
}
