//! Triangle-shaped grid of triangular cells.
//!
//! Cells with an even coordinate sum point up and are stored explicitly at
//! `(2d - i, -i)` for diagonal `d` and step `i <= d`. A down-pointing cell
//! exists between every pair of horizontally adjacent up cells and stores
//! nothing: all three of its walls belong to the up cells around it.

use std::collections::BTreeMap;

use tracing::debug;

use crate::cell::{Cell, CellKey, Side, SideWall};
use crate::graph::{Drawable, Entrances, Graph};
use crate::{Error, Result, Vector2D};

/// Position of a triangular cell.
pub type TriCoord = Vector2D<i32>;

/// Walls owned by an up-pointing cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriWalls {
    pub left: bool,
    pub right: bool,
    pub bottom: bool,
}

impl Default for TriWalls {
    fn default() -> Self {
        Self {
            left: true,
            right: true,
            bottom: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Left,
    Right,
    Bottom,
}

/// Whether the cell at `coord` points up.
pub fn is_up(coord: TriCoord) -> bool {
    (coord.x + coord.y).rem_euclid(2) == 0
}

/// A triangle of `size²` triangular cells.
#[derive(Debug, Clone, PartialEq)]
pub struct TriGrid {
    size: u32,
    cells: BTreeMap<TriCoord, TriWalls>,
}

impl TriGrid {
    pub const MIN_SIZE: u32 = 1;
    pub const MAX_SIZE: u32 = 1024;

    pub fn new(size: u32) -> Result<Self> {
        Error::check_size("triangular", size, Self::MIN_SIZE, Self::MAX_SIZE)?;

        let s = size as i32;
        let cells: BTreeMap<TriCoord, TriWalls> = (0..s)
            .flat_map(|d| (0..=d).map(move |i| TriCoord::new(2 * d - i, -i)))
            .map(|coord| (coord, TriWalls::default()))
            .collect();

        debug!(
            "Built triangular grid of size {} ({} up cells)",
            size,
            cells.len()
        );
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Walls stored by an up-pointing cell.
    pub fn walls(&self, coord: TriCoord) -> Option<&TriWalls> {
        self.cells.get(&coord)
    }

    fn stored(&self, coord: TriCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    fn owner(&self, a: TriCoord, b: TriCoord) -> Result<(TriCoord, Edge)> {
        if a == b || !self.contains(a) || !self.contains(b) {
            return Err(Error::not_adjacent(a, b));
        }
        let (up, other) = if is_up(a) { (a, b) } else { (b, a) };
        if !is_up(up) {
            return Err(Error::not_adjacent(a, b));
        }

        let step = other - up;
        match (step.x, step.y) {
            (-1, 0) => Ok((up, Edge::Left)),
            (1, 0) => Ok((up, Edge::Right)),
            (0, 1) => Ok((up, Edge::Bottom)),
            _ => Err(Error::not_adjacent(a, b)),
        }
    }

    fn edge_wall(&self, up: TriCoord, edge: Edge) -> bool {
        self.cells.get(&up).map_or(true, |walls| match edge {
            Edge::Left => walls.left,
            Edge::Right => walls.right,
            Edge::Bottom => walls.bottom,
        })
    }
}

impl Graph for TriGrid {
    type Node = TriCoord;

    fn wall(&self, a: TriCoord, b: TriCoord) -> Result<bool> {
        let (up, edge) = self.owner(a, b)?;
        Ok(self.edge_wall(up, edge))
    }

    fn set_wall(&mut self, a: TriCoord, b: TriCoord, wall: bool) -> Result<()> {
        let (up, edge) = self.owner(a, b)?;
        if let Some(walls) = self.cells.get_mut(&up) {
            match edge {
                Edge::Left => walls.left = wall,
                Edge::Right => walls.right = wall,
                Edge::Bottom => walls.bottom = wall,
            }
        }
        Ok(())
    }

    fn neighbors(&self, node: TriCoord) -> Vec<TriCoord> {
        if !self.contains(node) {
            return Vec::new();
        }

        let (x, y) = (node.x, node.y);
        if is_up(node) {
            let mut neighbors = Vec::with_capacity(3);
            if self.stored(TriCoord::new(x - 2, y)) {
                neighbors.push(TriCoord::new(x - 1, y));
            }
            if self.stored(TriCoord::new(x + 2, y)) {
                neighbors.push(TriCoord::new(x + 1, y));
            }
            if self.stored(TriCoord::new(x - 1, y + 1)) {
                neighbors.push(TriCoord::new(x, y + 1));
            }
            neighbors
        } else {
            [
                TriCoord::new(x - 1, y),
                TriCoord::new(x + 1, y),
                TriCoord::new(x, y - 1),
            ]
            .into_iter()
            .filter(|&coord| self.stored(coord))
            .collect()
        }
    }

    fn nodes(&self) -> Vec<TriCoord> {
        let mut nodes: Vec<TriCoord> = self.cells.keys().copied().collect();
        let down: Vec<TriCoord> = self
            .cells
            .keys()
            .filter(|up| self.stored(TriCoord::new(up.x + 2, up.y)))
            .map(|up| TriCoord::new(up.x + 1, up.y))
            .collect();
        nodes.extend(down);
        nodes.sort();
        nodes
    }

    fn contains(&self, node: TriCoord) -> bool {
        if is_up(node) {
            self.stored(node)
        } else {
            self.stored(TriCoord::new(node.x - 1, node.y))
                && self.stored(TriCoord::new(node.x + 1, node.y))
        }
    }

    fn node_count(&self) -> usize {
        let size = self.size as usize;
        size * size
    }
}

impl Entrances for TriGrid {
    /// Walks the left edge upwards, the right edge downwards, then the
    /// bottom row back towards `(0, 0)`.
    fn boundary(&self) -> Vec<TriCoord> {
        let last = self.size as i32 - 1;
        if last == 0 {
            return vec![TriCoord::default()];
        }

        let left = (0..last).map(|i| TriCoord::new(i, -i));
        let right = (0..last).map(|i| TriCoord::new(last + i, -(last - i)));
        let bottom = (0..last).map(|i| TriCoord::new((last - i) * 2, 0));
        left.chain(right).chain(bottom).collect()
    }

    fn open_entry(&mut self, entry: TriCoord) -> Result<()> {
        let last = self.size as i32 - 1;
        let walls = self
            .cells
            .get_mut(&entry)
            .ok_or_else(|| Error::not_on_boundary(entry))?;

        if entry.x == 0 && entry.y == 0 {
            walls.left = false;
        } else if entry.y == 0 {
            walls.bottom = false;
        } else if entry.x - entry.y == 2 * last {
            walls.right = false;
        } else if entry.x + entry.y == 0 {
            walls.left = false;
        } else {
            return Err(Error::not_on_boundary(entry));
        }
        Ok(())
    }
}

impl Drawable for TriGrid {
    fn cell(&self, node: TriCoord) -> Cell {
        let up = is_up(node);
        let key = CellKey::Tri {
            x: node.x,
            y: node.y,
            up,
        };
        if !self.contains(node) {
            return Cell {
                key,
                sides: Vec::new(),
            };
        }

        let sides = if up {
            vec![
                SideWall::new(Side::Left, self.edge_wall(node, Edge::Left)),
                SideWall::new(Side::Right, self.edge_wall(node, Edge::Right)),
                SideWall::new(Side::Bottom, self.edge_wall(node, Edge::Bottom)),
            ]
        } else {
            let (x, y) = (node.x, node.y);
            vec![
                SideWall::new(Side::Left, self.edge_wall(TriCoord::new(x - 1, y), Edge::Right)),
                SideWall::new(Side::Right, self.edge_wall(TriCoord::new(x + 1, y), Edge::Left)),
                // A missing upper cell leaves the top edge on the rim
                SideWall::new(Side::Top, self.edge_wall(TriCoord::new(x, y - 1), Edge::Bottom)),
            ]
        };
        Cell { key, sides }
    }
}
