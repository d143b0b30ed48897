//! Level descriptors - the input format a board is loaded from
//!
//! Descriptors are plain serde data (JSON on disk). Coordinates are written as
//! `[x, y]` pairs to match hand-authored level tables.

use serde::{Deserialize, Serialize};

use crate::error::LevelError;
use crate::shapes::{get_coords, is_connected, Shape};
use crate::types::{Color, Offset, Pos, ShapeKind};

fn default_rotatable() -> bool {
    true
}

/// Complete description of one level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub width: i32,
    pub height: i32,
    pub blocks: Vec<BlockDescriptor>,
    pub dogs: Vec<DogDescriptor>,
    /// Legacy flat wall cells, grouped into obstacles at load
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub walls: Vec<CellDescriptor>,
    /// Pre-grouped obstacles
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub obstacles: Vec<ObstacleDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDescriptor {
    pub id: String,
    pub color: Color,
    pub required: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coords: Option<Vec<[i32; 2]>>,
    pub x: i32,
    pub y: i32,
    #[serde(default = "default_rotatable")]
    pub rotatable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DogDescriptor {
    pub color: Color,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellDescriptor {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleDescriptor {
    pub x: i32,
    pub y: i32,
    pub coords: Vec<[i32; 2]>,
}

impl LevelDescriptor {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Display name, falling back to the board size
    pub fn title(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("{}x{} level", self.width, self.height))
    }
}

impl BlockDescriptor {
    pub fn anchor(&self) -> Pos {
        Pos::new(self.x, self.y)
    }

    /// Resolve the block's shape against the catalog
    ///
    /// A catalog identifier wins unless explicit coordinates disagree with the
    /// catalog base, in which case the coordinates form a custom shape.
    pub fn resolve_shape(&self) -> Result<Shape, LevelError> {
        let kind = match self.shape.as_deref() {
            Some(name) => match ShapeKind::from_str(name) {
                Some(kind) => Some(kind),
                None if self.coords.is_some() => None,
                None => {
                    return Err(LevelError::UnknownShape {
                        block: self.id.clone(),
                        shape: name.to_string(),
                    })
                }
            },
            None => None,
        };

        let Some(coords) = self.coords.as_deref() else {
            return match kind {
                Some(kind) => Ok(Shape::from_kind(kind)),
                None => Err(LevelError::MissingShape {
                    block: self.id.clone(),
                }),
            };
        };

        let coords = to_offsets(coords);
        if coords.is_empty() {
            return Err(LevelError::EmptyShape(self.id.clone()));
        }
        if !is_connected(&coords) {
            return Err(LevelError::DisconnectedShape(self.id.clone()));
        }
        // Offsets are anchor-relative with both minimums at 0.
        let min_x = coords.iter().map(|&(x, _)| x).min();
        let min_y = coords.iter().map(|&(_, y)| y).min();
        if min_x != Some(0) || min_y != Some(0) {
            return Err(LevelError::UnnormalizedShape(self.id.clone()));
        }

        match kind {
            Some(kind) if coords.as_slice() == get_coords(kind) => Ok(Shape::from_kind(kind)),
            _ => Ok(Shape::custom(&coords)),
        }
    }
}

impl DogDescriptor {
    pub fn pos(&self) -> Pos {
        Pos::new(self.x, self.y)
    }
}

impl CellDescriptor {
    pub fn pos(&self) -> Pos {
        Pos::new(self.x, self.y)
    }
}

impl ObstacleDescriptor {
    pub fn anchor(&self) -> Pos {
        Pos::new(self.x, self.y)
    }

    pub fn offsets(&self) -> Vec<Offset> {
        to_offsets(&self.coords)
    }
}

fn to_offsets(coords: &[[i32; 2]]) -> Vec<Offset> {
    coords.iter().map(|&[x, y]| (x, y)).collect()
}
