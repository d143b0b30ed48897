//! Validator module - conservative level solvability check
//!
//! For every block/dog pair of the same color, a breadth-first search over
//! `(anchor, rotation variant)` states asks whether the block could ever cover
//! the dog's cell. Only bounds and obstacles constrain the search: other
//! blocks are assumed movable out of the way and dogs are ignored.
//!
//! Passing is a necessary condition for a level to be solvable, not a
//! sufficient one. Obstacles are treated as fixed, blocks as freely
//! rearrangeable, and rescue order is not simulated.

use std::collections::{HashSet, VecDeque};

use tracing::info;

use crate::block::Block;
use crate::board::Board;
use crate::types::{Color, Offset, Pos};

/// Cardinal unit steps tried from every search state
const STEPS: [Offset; 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// An advisory finding about a level
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// No dog shares the block's color
    NoMatchingDogs { block_id: String, color: Color },
    /// Matching dogs exist but none is reachable by the block
    UnreachableDogs { block_id: String, color: Color },
    /// No block shares the dog's color
    NoMatchingBlock { color: Color, position: Pos },
    /// No block of the dog's color can reach it
    DogUnreachable { color: Color, position: Pos },
}

impl ValidationIssue {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationIssue::NoMatchingDogs { .. } => "no_matching_dogs",
            ValidationIssue::UnreachableDogs { .. } => "unreachable_dogs",
            ValidationIssue::NoMatchingBlock { .. } => "no_matching_block",
            ValidationIssue::DogUnreachable { .. } => "dog_unreachable",
        }
    }

    pub fn message(&self) -> String {
        match self {
            ValidationIssue::NoMatchingDogs { block_id, color } => {
                format!("Block {block_id} ({color}) has no matching dogs to rescue")
            }
            ValidationIssue::UnreachableDogs { block_id, color } => format!(
                "Block {block_id} ({color}) cannot reach any {color} dogs - obstacles may be blocking the path"
            ),
            ValidationIssue::NoMatchingBlock { color, position } => {
                format!("Dog at {position} has no matching {color} block to rescue it")
            }
            ValidationIssue::DogUnreachable { color, position } => format!(
                "Dog at {position} cannot be reached by any {color} block - not enough space around obstacles"
            ),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

/// Validator output; the level passes when there are no issues
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check every block and every dog of a loaded board
///
/// Read-only; never fails. All blocks are considered, including ones already
/// complete, so results do not depend on play progress.
pub fn validate_level(board: &Board) -> ValidationReport {
    let mut report = ValidationReport::default();
    let dogs = board.dogs().all();

    for block in board.blocks() {
        let mut matching = dogs.iter().filter(|d| d.color() == block.color()).peekable();
        if matching.peek().is_none() {
            report.issues.push(ValidationIssue::NoMatchingDogs {
                block_id: block.id().to_string(),
                color: block.color(),
            });
            continue;
        }
        if !matching.any(|dog| can_block_reach(board, block, dog.pos())) {
            report.issues.push(ValidationIssue::UnreachableDogs {
                block_id: block.id().to_string(),
                color: block.color(),
            });
        }
    }

    for dog in dogs {
        let mut matching = board
            .blocks()
            .iter()
            .filter(|b| b.color() == dog.color())
            .peekable();
        if matching.peek().is_none() {
            report.issues.push(ValidationIssue::NoMatchingBlock {
                color: dog.color(),
                position: dog.pos(),
            });
            continue;
        }
        if !matching.any(|block| can_block_reach(board, block, dog.pos())) {
            report.issues.push(ValidationIssue::DogUnreachable {
                color: dog.color(),
                position: dog.pos(),
            });
        }
    }

    info!(issues = report.issues.len(), "level validated");
    report
}

/// True if the variant fits at `anchor` considering only bounds and obstacles
fn fits(board: &Board, coords: &[Offset], anchor: Pos) -> bool {
    coords.iter().all(|&o| {
        let cell = anchor.offset(o);
        board.in_bounds(cell) && !board.is_wall(cell)
    })
}

/// Breadth-first reachability of `target` for one block
///
/// States are `(x, y, rotation)`. Neighbors are one cardinal step at the same
/// rotation, or any other rotation variant at the same anchor. The search
/// starts from every variant that fits at the block's current anchor and ends
/// as soon as some state covers the target. Bounded by board area times
/// variant count.
pub fn can_block_reach(board: &Board, block: &Block, target: Pos) -> bool {
    // Fixed blocks carry a single variant, so this covers both cases.
    let variants: Vec<&[Offset]> = block.shape().variants().iter().map(Vec::as_slice).collect();

    let mut visited: HashSet<(i32, i32, usize)> = HashSet::new();
    let mut frontier: VecDeque<(Pos, usize)> = VecDeque::new();

    let start = block.anchor();
    for (rotation, coords) in variants.iter().enumerate() {
        if fits(board, coords, start) && visited.insert((start.x, start.y, rotation)) {
            frontier.push_back((start, rotation));
        }
    }

    while let Some((anchor, rotation)) = frontier.pop_front() {
        let coords = variants[rotation];
        if coords.iter().any(|&o| anchor.offset(o) == target) {
            return true;
        }

        for step in STEPS {
            let next = anchor.offset(step);
            if visited.contains(&(next.x, next.y, rotation)) {
                continue;
            }
            if fits(board, coords, next) {
                visited.insert((next.x, next.y, rotation));
                frontier.push_back((next, rotation));
            }
        }

        for (other, other_coords) in variants.iter().enumerate() {
            if other == rotation || visited.contains(&(anchor.x, anchor.y, other)) {
                continue;
            }
            if fits(board, other_coords, anchor) {
                visited.insert((anchor.x, anchor.y, other));
                frontier.push_back((anchor, other));
            }
        }
    }

    false
}
