//! Shapes module - polyomino catalog and rotation variants
//!
//! Standard shapes carry hand-authored rotation tables. Custom coordinate sets
//! get their variants computed by repeated 90° clockwise turns, each normalized
//! so the minimum x and minimum y are 0, with duplicates dropped.

use arrayvec::ArrayVec;

use crate::types::{Offset, ShapeKind, MAX_ROTATIONS};

/// Rotation variant table of a catalog shape
pub type RotationTable = &'static [&'static [Offset]];

/// Base coordinates of a catalog shape (rotation 0)
pub fn get_coords(kind: ShapeKind) -> &'static [Offset] {
    get_rotations(kind)[0]
}

/// Hand-authored rotation variants of a catalog shape, in clockwise order
pub fn get_rotations(kind: ShapeKind) -> RotationTable {
    match kind {
        ShapeKind::I2 => &I2_ROTATIONS,
        ShapeKind::I3 => &I3_ROTATIONS,
        ShapeKind::L3 => &L3_ROTATIONS,
        ShapeKind::I => &I_ROTATIONS,
        ShapeKind::L => &L_ROTATIONS,
        ShapeKind::J => &J_ROTATIONS,
        ShapeKind::T => &T_ROTATIONS,
        ShapeKind::O => &O_ROTATIONS,
        ShapeKind::I5 => &I5_ROTATIONS,
        ShapeKind::L5 => &L5_ROTATIONS,
        ShapeKind::T5 => &T5_ROTATIONS,
        ShapeKind::P => &P_ROTATIONS,
        ShapeKind::U => &U_ROTATIONS,
        ShapeKind::I6 => &I6_ROTATIONS,
        ShapeKind::L6 => &L6_ROTATIONS,
        ShapeKind::C => &C_ROTATIONS,
    }
}

// Dominoes and triominoes
const I2_ROTATIONS: [&[Offset]; 2] = [
    &[(0, 0), (1, 0)], // horizontal
    &[(0, 0), (0, 1)], // vertical
];

const I3_ROTATIONS: [&[Offset]; 2] = [
    &[(0, 0), (1, 0), (2, 0)],
    &[(0, 0), (0, 1), (0, 2)],
];

const L3_ROTATIONS: [&[Offset]; 4] = [
    &[(0, 0), (0, 1), (1, 1)],
    &[(0, 0), (1, 0), (0, 1)],
    &[(0, 0), (1, 0), (1, 1)],
    &[(1, 0), (0, 1), (1, 1)],
];

// Tetrominoes
const I_ROTATIONS: [&[Offset]; 2] = [
    &[(0, 0), (1, 0), (2, 0), (3, 0)],
    &[(0, 0), (0, 1), (0, 2), (0, 3)],
];

const L_ROTATIONS: [&[Offset]; 4] = [
    &[(0, 0), (0, 1), (0, 2), (1, 2)],
    &[(0, 0), (1, 0), (2, 0), (0, 1)],
    &[(0, 0), (1, 0), (1, 1), (1, 2)],
    &[(2, 0), (0, 1), (1, 1), (2, 1)],
];

const J_ROTATIONS: [&[Offset]; 4] = [
    &[(1, 0), (1, 1), (1, 2), (0, 2)],
    &[(0, 0), (0, 1), (1, 1), (2, 1)],
    &[(0, 0), (1, 0), (0, 1), (0, 2)],
    &[(0, 0), (1, 0), (2, 0), (2, 1)],
];

const T_ROTATIONS: [&[Offset]; 4] = [
    &[(0, 0), (1, 0), (2, 0), (1, 1)], // pointing down
    &[(0, 0), (0, 1), (0, 2), (1, 1)], // pointing right
    &[(1, 0), (0, 1), (1, 1), (2, 1)], // pointing up
    &[(1, 0), (1, 1), (1, 2), (0, 1)], // pointing left
];

/// O is symmetric; one variant
const O_ROTATIONS: [&[Offset]; 1] = [&[(0, 0), (1, 0), (0, 1), (1, 1)]];

// Pentominoes
const I5_ROTATIONS: [&[Offset]; 2] = [
    &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)],
    &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)],
];

const L5_ROTATIONS: [&[Offset]; 4] = [
    &[(0, 0), (0, 1), (0, 2), (0, 3), (1, 3)],
    &[(0, 0), (1, 0), (2, 0), (3, 0), (0, 1)],
    &[(0, 0), (1, 0), (1, 1), (1, 2), (1, 3)],
    &[(3, 0), (0, 1), (1, 1), (2, 1), (3, 1)],
];

const T5_ROTATIONS: [&[Offset]; 4] = [
    &[(0, 0), (1, 0), (2, 0), (1, 1), (1, 2)],
    &[(0, 0), (0, 1), (0, 2), (1, 1), (2, 1)],
    &[(1, 0), (1, 1), (0, 2), (1, 2), (2, 2)],
    &[(0, 1), (1, 1), (2, 0), (2, 1), (2, 2)],
];

const P_ROTATIONS: [&[Offset]; 4] = [
    &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)],
    &[(0, 0), (1, 0), (2, 0), (1, 1), (2, 1)],
    &[(1, 0), (0, 1), (1, 1), (0, 2), (1, 2)],
    &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 1)],
];

const U_ROTATIONS: [&[Offset]; 4] = [
    &[(0, 0), (2, 0), (0, 1), (1, 1), (2, 1)],
    &[(0, 0), (1, 0), (0, 1), (0, 2), (1, 2)],
    &[(0, 0), (1, 0), (2, 0), (0, 1), (2, 1)],
    &[(0, 0), (1, 0), (1, 1), (0, 2), (1, 2)],
];

// Hexominoes
const I6_ROTATIONS: [&[Offset]; 2] = [
    &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0)],
    &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (0, 5)],
];

const L6_ROTATIONS: [&[Offset]; 4] = [
    &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (1, 4)],
    &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (0, 1)],
    &[(0, 0), (1, 0), (1, 1), (1, 2), (1, 3), (1, 4)],
    &[(4, 0), (0, 1), (1, 1), (2, 1), (3, 1), (4, 1)],
];

const C_ROTATIONS: [&[Offset]; 4] = [
    &[(0, 0), (1, 0), (2, 0), (0, 1), (0, 2), (1, 2)],
    &[(0, 0), (1, 0), (0, 1), (0, 2), (1, 2), (2, 2)],
    &[(1, 0), (2, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    &[(0, 0), (1, 0), (2, 0), (2, 1), (1, 2), (2, 2)],
];

/// Shift offsets so the minimum x and minimum y are both 0
pub fn normalize(coords: &[Offset]) -> Vec<Offset> {
    let min_x = coords.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let min_y = coords.iter().map(|&(_, y)| y).min().unwrap_or(0);
    coords.iter().map(|&(x, y)| (x - min_x, y - min_y)).collect()
}

/// Rotate 90° clockwise, `(x, y) -> (y, -x)`, then normalize
pub fn rotate_cw(coords: &[Offset]) -> Vec<Offset> {
    let rotated: Vec<Offset> = coords.iter().map(|&(x, y)| (y, -x)).collect();
    normalize(&rotated)
}

/// True when both sets contain the same cells, ignoring order
fn same_cells(a: &[Offset], b: &[Offset]) -> bool {
    a.len() == b.len() && a.iter().all(|cell| b.contains(cell))
}

/// Compute the distinct rotation variants of an arbitrary coordinate set
///
/// Variant 0 is the normalized input. At most four variants are produced.
pub fn compute_rotations(coords: &[Offset]) -> ArrayVec<Vec<Offset>, MAX_ROTATIONS> {
    let mut variants: ArrayVec<Vec<Offset>, MAX_ROTATIONS> = ArrayVec::new();
    let mut current = normalize(coords);
    for _ in 0..MAX_ROTATIONS {
        if variants.iter().any(|v| same_cells(v, &current)) {
            break;
        }
        let next = rotate_cw(&current);
        variants.push(current);
        current = next;
    }
    variants
}

/// True if every cell is 4-adjacent-reachable from the first one
pub fn is_connected(coords: &[Offset]) -> bool {
    let Some(&start) = coords.first() else {
        return false;
    };
    let mut seen = vec![start];
    let mut frontier = vec![start];
    while let Some((x, y)) = frontier.pop() {
        for next in [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)] {
            if coords.contains(&next) && !seen.contains(&next) {
                seen.push(next);
                frontier.push(next);
            }
        }
    }
    seen.len() == coords.len()
}

/// A resolved block shape: its catalog identity (if any) and rotation variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    kind: Option<ShapeKind>,
    variants: ArrayVec<Vec<Offset>, MAX_ROTATIONS>,
}

impl Shape {
    /// Catalog shape with its hand-authored rotation table
    pub fn from_kind(kind: ShapeKind) -> Self {
        Self {
            kind: Some(kind),
            variants: get_rotations(kind).iter().map(|v| v.to_vec()).collect(),
        }
    }

    /// Custom shape; rotations computed on demand from the coordinates
    pub fn custom(coords: &[Offset]) -> Self {
        Self {
            kind: None,
            variants: compute_rotations(coords),
        }
    }

    /// Same cells, restricted to the base variant (for non-rotatable blocks)
    pub fn fixed(mut self) -> Self {
        self.variants.truncate(1);
        self
    }

    pub fn kind(&self) -> Option<ShapeKind> {
        self.kind
    }

    /// Rotation-0 coordinates
    pub fn base(&self) -> &[Offset] {
        &self.variants[0]
    }

    pub fn variants(&self) -> &[Vec<Offset>] {
        &self.variants
    }

    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Offsets of a variant; the index wraps cyclically
    pub fn variant(&self, rotation: usize) -> &[Offset] {
        &self.variants[rotation % self.variants.len()]
    }

    pub fn next_rotation(&self, rotation: usize) -> usize {
        (rotation + 1) % self.variants.len()
    }

    pub fn cell_count(&self) -> usize {
        self.variants[0].len()
    }
}
