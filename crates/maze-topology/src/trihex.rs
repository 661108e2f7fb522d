//! Triangle-shaped grid of hexagonal cells.
//!
//! Row `d` of the triangle holds `size - d` cells at `(d + k, -k)`. The
//! corners sit at `(0, 0)`, `(size - 1, 0)` and `(size - 1, 1 - size)`.

use tracing::debug;

use crate::cell::Cell;
use crate::graph::{Drawable, Entrances, Graph};
use crate::hex::{HexCoord, HexDirection, HexGrid};
use crate::{Error, Result};

/// A triangle of hex cells with `size` cells per edge.
#[derive(Debug, Clone, PartialEq)]
pub struct TriHexGrid {
    size: u32,
    grid: HexGrid,
}

impl TriHexGrid {
    pub const MIN_SIZE: u32 = 1;
    pub const MAX_SIZE: u32 = 1024;

    pub fn new(size: u32) -> Result<Self> {
        Error::check_size("tri-hex", size, Self::MIN_SIZE, Self::MAX_SIZE)?;

        let s = size as i32;
        let coords = (0..s).flat_map(|d| (0..s - d).map(move |k| HexCoord::new(d + k, -k)));
        let grid = HexGrid::from_cells(coords);
        debug!(
            "Built tri-hex grid of size {} ({} cells)",
            size,
            grid.node_count()
        );
        Ok(Self { size, grid })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    fn outward_direction(&self, coord: HexCoord) -> Option<HexDirection> {
        let last = self.size as i32 - 1;
        if coord == HexCoord::new(last, 0) {
            Some(HexDirection::East)
        } else if coord.y == 0 {
            Some(HexDirection::SouthWest)
        } else if coord.x + coord.y == 0 {
            Some(HexDirection::NorthWest)
        } else if coord.x == last {
            Some(HexDirection::East)
        } else {
            None
        }
    }
}

impl Graph for TriHexGrid {
    type Node = HexCoord;

    fn wall(&self, a: HexCoord, b: HexCoord) -> Result<bool> {
        self.grid.wall(a, b)
    }

    fn set_wall(&mut self, a: HexCoord, b: HexCoord, wall: bool) -> Result<()> {
        self.grid.set_wall(a, b, wall)
    }

    fn neighbors(&self, node: HexCoord) -> Vec<HexCoord> {
        self.grid.neighbors(node)
    }

    fn nodes(&self) -> Vec<HexCoord> {
        self.grid.nodes()
    }

    fn contains(&self, node: HexCoord) -> bool {
        self.grid.contains(node)
    }

    fn node_count(&self) -> usize {
        self.grid.node_count()
    }
}

impl Entrances for TriHexGrid {
    /// Walks the diagonal edge from `(0, 0)`, then the east edge, then the
    /// bottom row back towards the start.
    fn boundary(&self) -> Vec<HexCoord> {
        let last = self.size as i32 - 1;
        if last == 0 {
            return vec![HexCoord::default()];
        }

        let diagonal = (0..last).map(|i| HexCoord::new(i, -i));
        let east = (0..last).map(|i| HexCoord::new(last, -(last - i)));
        let bottom = (0..last).map(|i| HexCoord::new(last - i, 0));
        diagonal.chain(east).chain(bottom).collect()
    }

    fn open_entry(&mut self, entry: HexCoord) -> Result<()> {
        if !self.contains(entry) {
            return Err(Error::not_on_boundary(entry));
        }
        let direction = self
            .outward_direction(entry)
            .ok_or_else(|| Error::not_on_boundary(entry))?;
        self.grid.open_side(entry, direction)
    }
}

impl Drawable for TriHexGrid {
    fn cell(&self, node: HexCoord) -> Cell {
        self.grid.cell(node)
    }
}
