//! Hexagonal cell storage shared by the hex-shaped grids.
//!
//! Cells use axial coordinates `(x, y)`: `x` grows east, `y` grows
//! south-east, and the implicit third axis is `-x - y`.
//!
//! Each cell owns the walls towards its north-west, north-east and east
//! neighbors. The remaining three flags only matter when the neighbor in that
//! direction is missing: they are the grid's outer rim.

use std::collections::BTreeMap;
use std::fmt;

use crate::cell::{Cell, CellKey, Side, SideWall};
use crate::graph::{Drawable, Graph};
use crate::{Error, Result, Vector2D};

/// Axial hex coordinate.
pub type HexCoord = Vector2D<i32>;

/// The six neighbor directions of a hex cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HexDirection {
    East,
    NorthEast,
    NorthWest,
    West,
    SouthWest,
    SouthEast,
}

impl HexDirection {
    /// Directions in the order used for neighbor enumeration and ring walks.
    pub const ALL: [Self; 6] = [
        Self::East,
        Self::NorthEast,
        Self::NorthWest,
        Self::West,
        Self::SouthWest,
        Self::SouthEast,
    ];

    /// Directions in the order a renderer walks a cell's sides.
    pub const DRAW_ORDER: [Self; 6] = [
        Self::NorthWest,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::SouthWest,
        Self::West,
    ];

    /// Axial offset of the neighbor in this direction.
    pub const fn offset(self) -> HexCoord {
        match self {
            Self::East => HexCoord::new(1, 0),
            Self::NorthEast => HexCoord::new(1, -1),
            Self::NorthWest => HexCoord::new(0, -1),
            Self::West => HexCoord::new(-1, 0),
            Self::SouthWest => HexCoord::new(-1, 1),
            Self::SouthEast => HexCoord::new(0, 1),
        }
    }

    /// Renderer side for this direction.
    pub const fn side(self) -> Side {
        match self {
            Self::East => Side::East,
            Self::NorthEast => Side::NorthEast,
            Self::NorthWest => Side::NorthWest,
            Self::West => Side::West,
            Self::SouthWest => Side::SouthWest,
            Self::SouthEast => Side::SouthEast,
        }
    }
}

impl fmt::Display for HexDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::East => "E",
            Self::NorthEast => "NE",
            Self::NorthWest => "NW",
            Self::West => "W",
            Self::SouthWest => "SW",
            Self::SouthEast => "SE",
        };
        f.write_str(name)
    }
}

/// Wall flags stored by one hex cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexWalls {
    pub north_west: bool,
    pub north_east: bool,
    pub east: bool,
    pub south_east: bool,
    pub south_west: bool,
    pub west: bool,
}

impl HexWalls {
    fn get(&self, direction: HexDirection) -> bool {
        match direction {
            HexDirection::East => self.east,
            HexDirection::NorthEast => self.north_east,
            HexDirection::NorthWest => self.north_west,
            HexDirection::West => self.west,
            HexDirection::SouthWest => self.south_west,
            HexDirection::SouthEast => self.south_east,
        }
    }

    fn get_mut(&mut self, direction: HexDirection) -> &mut bool {
        match direction {
            HexDirection::East => &mut self.east,
            HexDirection::NorthEast => &mut self.north_east,
            HexDirection::NorthWest => &mut self.north_west,
            HexDirection::West => &mut self.west,
            HexDirection::SouthWest => &mut self.south_west,
            HexDirection::SouthEast => &mut self.south_east,
        }
    }
}

/// Coordinates of hex ring `radius` around the origin.
///
/// The walk starts at the south-west corner and follows [`HexDirection::ALL`],
/// taking `radius` steps per direction. Ring 0 is the origin alone.
pub fn hex_ring(radius: u32) -> Vec<HexCoord> {
    if radius == 0 {
        return vec![HexCoord::default()];
    }

    let r = radius as i32;
    let mut current = HexCoord::new(-r, r);
    let mut ring = Vec::with_capacity(6 * radius as usize);
    for direction in HexDirection::ALL {
        for _ in 0..radius {
            ring.push(current);
            current += direction.offset();
        }
    }
    ring
}

/// A set of hex cells with shared-wall storage.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HexGrid {
    cells: BTreeMap<HexCoord, HexWalls>,
}

impl HexGrid {
    /// Fully walled grid over the given cells.
    pub fn from_cells(coords: impl IntoIterator<Item = HexCoord>) -> Self {
        let mut cells: BTreeMap<HexCoord, HexWalls> = coords
            .into_iter()
            .map(|coord| {
                let walls = HexWalls {
                    north_west: true,
                    north_east: true,
                    east: true,
                    south_east: false,
                    south_west: false,
                    west: false,
                };
                (coord, walls)
            })
            .collect();

        // Rim flags on the non-owned sides wherever the neighbor is missing
        let coords: Vec<HexCoord> = cells.keys().copied().collect();
        for coord in coords {
            for direction in [
                HexDirection::SouthEast,
                HexDirection::SouthWest,
                HexDirection::West,
            ] {
                if !cells.contains_key(&(coord + direction.offset())) {
                    if let Some(walls) = cells.get_mut(&coord) {
                        *walls.get_mut(direction) = true;
                    }
                }
            }
        }

        Self { cells }
    }

    /// Stored wall flags of a cell.
    pub fn walls(&self, coord: HexCoord) -> Option<&HexWalls> {
        self.cells.get(&coord)
    }

    /// Resolve a pair to the owning cell and its owned direction.
    fn owner(&self, a: HexCoord, b: HexCoord) -> Result<(HexCoord, HexDirection)> {
        if !self.contains(a) || !self.contains(b) {
            return Err(Error::not_adjacent(a, b));
        }
        let (first, second) = if a.x < b.x || (a.x == b.x && a.y > b.y) {
            (a, b)
        } else {
            (b, a)
        };

        let step = second - first;
        let direction = match (step.x, step.y) {
            (1, 0) => HexDirection::East,
            (1, -1) => HexDirection::NorthEast,
            (0, -1) => HexDirection::NorthWest,
            _ => return Err(Error::not_adjacent(a, b)),
        };
        Ok((first, direction))
    }

    /// Clear the rim wall of `coord` facing `direction`.
    ///
    /// Fails when a neighbor exists on that side.
    pub fn open_side(&mut self, coord: HexCoord, direction: HexDirection) -> Result<()> {
        if self.contains(coord + direction.offset()) {
            return Err(Error::not_on_boundary(coord));
        }
        let walls = self
            .cells
            .get_mut(&coord)
            .ok_or_else(|| Error::not_on_boundary(coord))?;
        *walls.get_mut(direction) = false;
        Ok(())
    }
}

impl Graph for HexGrid {
    type Node = HexCoord;

    fn wall(&self, a: HexCoord, b: HexCoord) -> Result<bool> {
        let (owner, direction) = self.owner(a, b)?;
        Ok(self.cells[&owner].get(direction))
    }

    fn set_wall(&mut self, a: HexCoord, b: HexCoord, wall: bool) -> Result<()> {
        let (owner, direction) = self.owner(a, b)?;
        if let Some(walls) = self.cells.get_mut(&owner) {
            *walls.get_mut(direction) = wall;
        }
        Ok(())
    }

    fn neighbors(&self, node: HexCoord) -> Vec<HexCoord> {
        if !self.contains(node) {
            return Vec::new();
        }
        HexDirection::ALL
            .iter()
            .map(|direction| node + direction.offset())
            .filter(|neighbor| self.contains(*neighbor))
            .collect()
    }

    fn nodes(&self) -> Vec<HexCoord> {
        self.cells.keys().copied().collect()
    }

    fn contains(&self, node: HexCoord) -> bool {
        self.cells.contains_key(&node)
    }

    fn node_count(&self) -> usize {
        self.cells.len()
    }
}

impl Drawable for HexGrid {
    fn cell(&self, node: HexCoord) -> Cell {
        let key = CellKey::Hex {
            x: node.x,
            y: node.y,
        };
        let Some(walls) = self.walls(node) else {
            return Cell {
                key,
                sides: Vec::new(),
            };
        };

        let sides = HexDirection::DRAW_ORDER
            .iter()
            .map(|&direction| {
                let neighbor = node + direction.offset();
                let wall = if self.contains(neighbor) {
                    self.wall(node, neighbor).unwrap_or(true)
                } else {
                    walls.get(direction)
                };
                SideWall::new(direction.side(), wall)
            })
            .collect();
        Cell { key, sides }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(x: i32, y: i32) -> HexCoord {
        HexCoord::new(x, y)
    }

    #[test]
    fn ring_sizes_and_distances() {
        assert_eq!(hex_ring(0), vec![h(0, 0)]);
        for radius in 1..5 {
            let ring = hex_ring(radius);
            assert_eq!(ring.len(), 6 * radius as usize);
            for coord in &ring {
                let distance = coord.x.abs().max(coord.y.abs()).max((coord.x + coord.y).abs());
                assert_eq!(distance, radius as i32);
            }
        }
    }

    #[test]
    fn ring_walk_is_contiguous() {
        let ring = hex_ring(2);
        assert_eq!(ring[0], h(-2, 2));
        for pair in ring.windows(2) {
            let step = pair[1] - pair[0];
            assert!(HexDirection::ALL.iter().any(|d| d.offset() == step));
        }
    }

    #[test]
    fn opposite_directions_resolve_to_one_wall() {
        let mut grid = HexGrid::from_cells(hex_ring(0).into_iter().chain(hex_ring(1)));
        for direction in HexDirection::ALL {
            let other = direction.offset();
            grid.set_wall(other, h(0, 0), false).unwrap();
            assert!(!grid.wall(h(0, 0), other).unwrap(), "{}", direction);
        }
        assert_eq!(grid.cell(h(0, 0)).wall_count(), 0);
    }

    #[test]
    fn rim_flags_follow_missing_neighbors() {
        let grid = HexGrid::from_cells([h(0, 0), h(1, 0)]);
        let left = grid.walls(h(0, 0)).unwrap();
        assert!(left.west && left.south_west && left.south_east);
        let right = grid.walls(h(1, 0)).unwrap();
        assert!(right.south_east && right.south_west);
        assert!(!right.west);
        assert_eq!(grid.cell(h(1, 0)).wall_count(), 6);
    }

    #[test]
    fn open_side_requires_a_missing_neighbor() {
        let mut grid = HexGrid::from_cells([h(0, 0), h(1, 0)]);
        assert!(matches!(
            grid.open_side(h(0, 0), HexDirection::East),
            Err(Error::NotOnBoundary { .. })
        ));
        grid.open_side(h(0, 0), HexDirection::West).unwrap();
        assert_eq!(grid.cell(h(0, 0)).wall_count(), 5);
    }

    #[test]
    fn distant_cells_are_not_adjacent() {
        let grid = HexGrid::from_cells([h(0, 0), h(1, 1)]);
        assert!(matches!(grid.wall(h(0, 0), h(1, 1)), Err(Error::NotAdjacent { .. })));
        assert!(grid.neighbors(h(0, 0)).is_empty());
    }
}
