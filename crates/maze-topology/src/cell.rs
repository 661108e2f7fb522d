//! Renderer-facing view of a node's sides.

use crate::Vector2D;

/// One side of a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Side {
    North,
    East,
    South,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
    Left,
    Right,
    Top,
    Bottom,
    Inward,
    Clockwise,
    CounterClockwise,
    /// Outward slot `n` of a polar cell, counted clockwise.
    Outward(u32),
    /// A side of an irregular cell, given by its end points.
    Segment {
        from: Vector2D<f64>,
        to: Vector2D<f64>,
    },
}

/// A side together with its wall flag.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideWall {
    pub side: Side,
    pub wall: bool,
}

impl SideWall {
    pub const fn new(side: Side, wall: bool) -> Self {
        Self { side, wall }
    }
}

/// Identity of a cell as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "kebab-case"))]
pub enum CellKey {
    Rect { x: u32, y: u32 },
    Polar { layer: u32, cell: u32 },
    Hex { x: i32, y: i32 },
    Tri { x: i32, y: i32, up: bool },
    Square { index: usize, center: Vector2D<f64> },
}

/// A node's identity and its sides in the topology's canonical order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub key: CellKey,
    pub sides: Vec<SideWall>,
}

impl Cell {
    /// Number of sides that are walls.
    pub fn wall_count(&self) -> usize {
        self.sides.iter().filter(|s| s.wall).count()
    }
}
