//! Obstacle module - movable walls with a fixed multi-cell footprint
//!
//! Legacy levels list walls as individual cells. Those are grouped once at
//! load into 4-connected components; each component becomes one obstacle
//! anchored at its topmost, then leftmost cell.

use std::collections::{HashSet, VecDeque};

use crate::snapshot::ObstacleState;
use crate::types::{ObstacleId, Offset, Pos};

/// A movable obstacle; translates but never rotates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Obstacle {
    id: ObstacleId,
    anchor: Pos,
    coords: Vec<Offset>,
}

impl Obstacle {
    pub fn new(id: ObstacleId, anchor: Pos, coords: Vec<Offset>) -> Self {
        Self { id, anchor, coords }
    }

    pub fn id(&self) -> ObstacleId {
        self.id
    }

    pub fn anchor(&self) -> Pos {
        self.anchor
    }

    pub fn coords(&self) -> &[Offset] {
        &self.coords
    }

    pub fn occupied_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        let anchor = self.anchor;
        self.coords.iter().map(move |&o| anchor.offset(o))
    }

    pub fn cells_at(&self, anchor: Pos) -> impl Iterator<Item = Pos> + '_ {
        self.coords.iter().map(move |&o| anchor.offset(o))
    }

    pub fn occupies(&self, cell: Pos) -> bool {
        self.occupied_cells().any(|c| c == cell)
    }

    pub fn move_to(&mut self, anchor: Pos) {
        self.anchor = anchor;
    }

    pub fn snapshot(&self) -> ObstacleState {
        ObstacleState {
            anchor: self.anchor,
        }
    }

    pub fn restore(&mut self, state: &ObstacleState) {
        self.anchor = state.anchor;
    }
}

/// Monotonic obstacle id source
#[derive(Debug, Clone, Default)]
pub struct ObstacleIds {
    next: u32,
}

impl ObstacleIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> ObstacleId {
        let id = ObstacleId(self.next);
        self.next += 1;
        id
    }
}

/// Group flat wall cells into connected obstacles
///
/// Components are emitted in (y, x) order of their anchors; offsets within a
/// component are sorted the same way. Duplicate wall cells are ignored.
pub fn group_walls(walls: &[Pos], ids: &mut ObstacleIds) -> Vec<Obstacle> {
    let wall_set: HashSet<Pos> = walls.iter().copied().collect();

    let mut ordered: Vec<Pos> = wall_set.iter().copied().collect();
    ordered.sort_by_key(|p| (p.y, p.x));

    let mut visited: HashSet<Pos> = HashSet::with_capacity(ordered.len());
    let mut obstacles = Vec::new();

    for &start in &ordered {
        if visited.contains(&start) {
            continue;
        }

        let mut component = Vec::new();
        let mut queue = VecDeque::from([start]);
        visited.insert(start);
        while let Some(cell) = queue.pop_front() {
            component.push(cell);
            for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                let next = cell.offset((dx, dy));
                if wall_set.contains(&next) && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        component.sort_by_key(|p| (p.y, p.x));
        // Sorted by (y, x), so the first cell is the anchor.
        let anchor = component[0];
        let coords = component
            .iter()
            .map(|c| (c.x - anchor.x, c.y - anchor.y))
            .collect();
        obstacles.push(Obstacle::new(ids.next_id(), anchor, coords));
    }

    obstacles
}
