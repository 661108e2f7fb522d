//! Hexagon-shaped grid of hexagonal cells.

use tracing::debug;

use crate::cell::Cell;
use crate::graph::{Drawable, Entrances, Graph};
use crate::hex::{hex_ring, HexCoord, HexDirection, HexGrid};
use crate::{Error, Result};

/// A hexagon of hex cells, `size` rings deep counting the center.
#[derive(Debug, Clone, PartialEq)]
pub struct HexHexGrid {
    size: u32,
    grid: HexGrid,
}

impl HexHexGrid {
    pub const MIN_SIZE: u32 = 1;
    pub const MAX_SIZE: u32 = 512;

    /// Build a fully walled hexagon with `size` rings.
    pub fn new(size: u32) -> Result<Self> {
        Error::check_size("hex-hex", size, Self::MIN_SIZE, Self::MAX_SIZE)?;

        let grid = HexGrid::from_cells((0..size).flat_map(hex_ring));
        debug!(
            "Built hex-hex grid with {} rings ({} cells)",
            size,
            grid.node_count()
        );
        Ok(Self { size, grid })
    }

    /// Number of rings, center included.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Cells in a hexagon of `size` rings: `1 + 3s(s - 1)`.
    pub const fn cell_count(size: u32) -> usize {
        1 + 3 * size as usize * (size as usize).saturating_sub(1)
    }

    /// The rim direction an outer-ring cell opens towards.
    fn outward_direction(&self, coord: HexCoord) -> HexDirection {
        let last = self.size as i32 - 1;
        if coord.y > 0 || (coord.y == 0 && coord.x < 0) {
            if coord.x >= 0 {
                HexDirection::SouthEast
            } else if coord.y == last {
                HexDirection::SouthWest
            } else {
                HexDirection::West
            }
        } else if coord.x <= 0 {
            HexDirection::NorthWest
        } else if -coord.y == last {
            HexDirection::NorthEast
        } else {
            HexDirection::East
        }
    }
}

impl Graph for HexHexGrid {
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

impl Entrances for HexHexGrid {
    fn boundary(&self) -> Vec<HexCoord> {
        hex_ring(self.size - 1)
    }

    fn open_entry(&mut self, entry: HexCoord) -> Result<()> {
        let direction = self.outward_direction(entry);
        self.grid.open_side(entry, direction)
    }
}

impl Drawable for HexHexGrid {
    fn cell(&self, node: HexCoord) -> Cell {
        self.grid.cell(node)
    }
}
