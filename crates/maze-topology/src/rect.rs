//! Square grid of `size × size` cells.
//!
//! Every cell owns its east and south walls. North walls exist only on the
//! top row and west walls only on the left column: they are the outer rim,
//! since interior north/west edges are owned by the neighbor above or to the
//! left.

use tracing::debug;

use crate::cell::{Cell, CellKey, Side, SideWall};
use crate::graph::{Drawable, Entrances, Graph};
use crate::{Error, Result, Vector2D};

/// Position of a rectangular cell: `x` grows east, `y` grows south.
pub type RectCoord = Vector2D<u32>;

/// Wall flags stored by one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectWalls {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

/// The two edge directions a cell can own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Owned {
    East,
    South,
}

/// A `size × size` grid.
#[derive(Debug, Clone, PartialEq)]
pub struct RectGrid {
    size: u32,
    /// Row-major cell walls.
    cells: Vec<RectWalls>,
}

impl RectGrid {
    pub const MIN_SIZE: u32 = 1;
    pub const MAX_SIZE: u32 = 1024;

    /// Build a fully walled grid.
    pub fn new(size: u32) -> Result<Self> {
        Error::check_size("rectangular", size, Self::MIN_SIZE, Self::MAX_SIZE)?;

        let mut cells = Vec::with_capacity((size * size) as usize);
        for y in 0..size {
            for x in 0..size {
                cells.push(RectWalls {
                    north: y == 0,
                    east: true,
                    south: true,
                    west: x == 0,
                });
            }
        }

        debug!("Built rectangular grid of size {} ({} cells)", size, cells.len());
        Ok(Self { size, cells })
    }

    /// Edge length of the grid.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Stored wall flags of a cell.
    pub fn walls(&self, coord: RectCoord) -> Option<&RectWalls> {
        self.index(coord).map(|i| &self.cells[i])
    }

    fn index(&self, coord: RectCoord) -> Option<usize> {
        if coord.x < self.size && coord.y < self.size {
            Some((coord.y * self.size + coord.x) as usize)
        } else {
            None
        }
    }

    /// Resolve a pair to the cell that stores its wall.
    fn owner(&self, a: RectCoord, b: RectCoord) -> Result<(usize, Owned)> {
        let (first, second) = if (a.y, a.x) <= (b.y, b.x) { (a, b) } else { (b, a) };
        let (Some(index), true) = (self.index(first), self.contains(second)) else {
            return Err(Error::not_adjacent(a, b));
        };

        if first.y == second.y && first.x + 1 == second.x {
            Ok((index, Owned::East))
        } else if first.x == second.x && first.y + 1 == second.y {
            Ok((index, Owned::South))
        } else {
            Err(Error::not_adjacent(a, b))
        }
    }

    fn wall_mut(&mut self, a: RectCoord, b: RectCoord) -> Result<&mut bool> {
        let (index, owned) = self.owner(a, b)?;
        let walls = &mut self.cells[index];
        Ok(match owned {
            Owned::East => &mut walls.east,
            Owned::South => &mut walls.south,
        })
    }
}

impl Graph for RectGrid {
    type Node = RectCoord;

    fn wall(&self, a: RectCoord, b: RectCoord) -> Result<bool> {
        let (index, owned) = self.owner(a, b)?;
        let walls = &self.cells[index];
        Ok(match owned {
            Owned::East => walls.east,
            Owned::South => walls.south,
        })
    }

    fn set_wall(&mut self, a: RectCoord, b: RectCoord, wall: bool) -> Result<()> {
        *self.wall_mut(a, b)? = wall;
        Ok(())
    }

    fn neighbors(&self, node: RectCoord) -> Vec<RectCoord> {
        if !self.contains(node) {
            return Vec::new();
        }

        let mut neighbors = Vec::with_capacity(4);
        if node.y > 0 {
            neighbors.push(RectCoord::new(node.x, node.y - 1));
        }
        if node.x > 0 {
            neighbors.push(RectCoord::new(node.x - 1, node.y));
        }
        if node.x + 1 < self.size {
            neighbors.push(RectCoord::new(node.x + 1, node.y));
        }
        if node.y + 1 < self.size {
            neighbors.push(RectCoord::new(node.x, node.y + 1));
        }
        neighbors
    }

    fn nodes(&self) -> Vec<RectCoord> {
        (0..self.size)
            .flat_map(|y| (0..self.size).map(move |x| RectCoord::new(x, y)))
            .collect()
    }

    fn contains(&self, node: RectCoord) -> bool {
        self.index(node).is_some()
    }

    fn node_count(&self) -> usize {
        self.cells.len()
    }
}

impl Entrances for RectGrid {
    fn boundary(&self) -> Vec<RectCoord> {
        let last = self.size - 1;
        if last == 0 {
            return vec![RectCoord::new(0, 0)];
        }

        let top = (0..last).map(|x| RectCoord::new(x, 0));
        let right = (0..last).map(|y| RectCoord::new(last, y));
        let bottom = (1..=last).rev().map(|x| RectCoord::new(x, last));
        let left = (1..=last).rev().map(|y| RectCoord::new(0, y));
        top.chain(right).chain(bottom).chain(left).collect()
    }

    fn open_entry(&mut self, entry: RectCoord) -> Result<()> {
        let last = self.size - 1;
        let Some(index) = self.index(entry) else {
            return Err(Error::not_on_boundary(entry));
        };

        let walls = &mut self.cells[index];
        if entry.y == 0 {
            walls.north = false;
        } else if entry.x == last {
            walls.east = false;
        } else if entry.x == 0 {
            walls.west = false;
        } else if entry.y == last {
            walls.south = false;
        } else {
            return Err(Error::not_on_boundary(entry));
        }
        Ok(())
    }
}

impl Drawable for RectGrid {
    fn cell(&self, node: RectCoord) -> Cell {
        let Some(walls) = self.walls(node) else {
            return Cell {
                key: CellKey::Rect { x: node.x, y: node.y },
                sides: Vec::new(),
            };
        };

        // Interior north/west edges live in the neighbor's south/east flags
        let north = match node.y {
            0 => walls.north,
            y => self.cells[((y - 1) * self.size + node.x) as usize].south,
        };
        let west = match node.x {
            0 => walls.west,
            x => self.cells[(node.y * self.size + x - 1) as usize].east,
        };

        Cell {
            key: CellKey::Rect { x: node.x, y: node.y },
            sides: vec![
                SideWall::new(Side::North, north),
                SideWall::new(Side::East, walls.east),
                SideWall::new(Side::South, walls.south),
                SideWall::new(Side::West, west),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: u32, y: u32) -> RectCoord {
        RectCoord::new(x, y)
    }

    #[test]
    fn fully_walled_after_construction() {
        let grid = RectGrid::new(4).unwrap();
        for node in grid.nodes() {
            for neighbor in grid.neighbors(node) {
                assert!(grid.wall(node, neighbor).unwrap());
            }
            assert_eq!(grid.cell(node).wall_count(), 4);
        }
    }

    #[test]
    fn rim_flags_only_on_outer_edges() {
        let grid = RectGrid::new(3).unwrap();
        assert!(grid.walls(c(1, 0)).unwrap().north);
        assert!(!grid.walls(c(1, 1)).unwrap().north);
        assert!(grid.walls(c(0, 2)).unwrap().west);
        assert!(!grid.walls(c(2, 2)).unwrap().west);
    }

    #[test]
    fn wall_is_shared_between_endpoints() {
        let mut grid = RectGrid::new(3).unwrap();
        grid.set_wall(c(1, 1), c(1, 0), false).unwrap();
        assert!(!grid.wall(c(1, 0), c(1, 1)).unwrap());
        assert!(!grid.walls(c(1, 0)).unwrap().south);

        grid.set_wall(c(2, 1), c(1, 1), false).unwrap();
        assert!(!grid.wall(c(1, 1), c(2, 1)).unwrap());
        assert!(!grid.walls(c(1, 1)).unwrap().east);
    }

    #[test]
    fn non_adjacent_pairs_rejected() {
        let mut grid = RectGrid::new(3).unwrap();
        assert!(matches!(grid.wall(c(0, 0), c(0, 0)), Err(Error::NotAdjacent { .. })));
        assert!(matches!(grid.wall(c(0, 0), c(1, 1)), Err(Error::NotAdjacent { .. })));
        assert!(matches!(grid.wall(c(0, 0), c(2, 0)), Err(Error::NotAdjacent { .. })));
        assert!(matches!(
            grid.set_wall(c(2, 2), c(3, 2), false),
            Err(Error::NotAdjacent { .. })
        ));
    }

    #[test]
    fn neighbors_stay_on_grid() {
        let grid = RectGrid::new(3).unwrap();
        assert_eq!(grid.neighbors(c(0, 0)), vec![c(1, 0), c(0, 1)]);
        assert_eq!(grid.neighbors(c(1, 1)), vec![c(1, 0), c(0, 1), c(2, 1), c(1, 2)]);
        assert_eq!(grid.neighbors(c(2, 2)), vec![c(2, 1), c(1, 2)]);
    }

    #[test]
    fn perimeter_walk_visits_each_rim_cell_once() {
        let grid = RectGrid::new(4).unwrap();
        let boundary = grid.boundary();
        assert_eq!(boundary.len(), 12);
        assert_eq!(boundary[0], c(0, 0));
        assert_eq!(boundary[3], c(3, 0));
        assert_eq!(boundary[6], c(3, 3));
        assert_eq!(boundary[9], c(0, 3));
        assert_eq!(boundary[11], c(0, 1));

        let mut sorted = boundary.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), boundary.len());
    }

    #[test]
    fn single_cell_grid() {
        let mut grid = RectGrid::new(1).unwrap();
        assert_eq!(grid.boundary(), vec![c(0, 0)]);
        assert!(grid.neighbors(c(0, 0)).is_empty());

        grid.open_entry(c(0, 0)).unwrap();
        assert_eq!(grid.cell(c(0, 0)).wall_count(), 3);
    }

    #[test]
    fn opening_clears_the_outward_wall() {
        let mut grid = RectGrid::new(4).unwrap();
        let entries = grid.generate_entries(4).unwrap();
        assert_eq!(entries, vec![c(0, 0), c(3, 0), c(3, 3), c(0, 3)]);

        grid.open_entries(&entries).unwrap();
        assert!(!grid.walls(c(0, 0)).unwrap().north);
        assert!(!grid.walls(c(3, 0)).unwrap().north);
        assert!(!grid.walls(c(3, 3)).unwrap().east);
        assert!(!grid.walls(c(0, 3)).unwrap().west);
    }

    #[test]
    fn interior_cell_is_not_an_entry() {
        let mut grid = RectGrid::new(3).unwrap();
        assert!(matches!(grid.open_entry(c(1, 1)), Err(Error::NotOnBoundary { .. })));
    }

    #[test]
    fn size_zero_rejected() {
        assert!(matches!(RectGrid::new(0), Err(Error::SizeOutOfRange { .. })));
    }
}
