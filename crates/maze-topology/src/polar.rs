//! Concentric ring grid.
//!
//! Layer 0 is a single center cell. Each further layer multiplies the cell
//! count of the layer inside it by an integer ratio, picked so that cells
//! keep roughly the angular width of the innermost ring. Because the ratio is
//! an integer, every outer cell has exactly one inward parent.
//!
//! # Wall layout
//!
//! Each cell stores its clockwise wall (towards `cell + 1`, wrapping) and one
//! outward wall per child in the next layer. Cells of the last layer carry a
//! single outward rim wall instead.

use std::f64::consts::TAU;
use std::fmt;

use tracing::debug;

use crate::cell::{Cell, CellKey, Side, SideWall};
use crate::graph::{Drawable, Entrances, Graph};
use crate::{Error, Result};

/// Position of a polar cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolarPosition {
    /// Ring index, 0 at the center
    pub layer: u32,
    /// Index within the ring, counted clockwise
    pub cell: u32,
}

impl PolarPosition {
    pub const CENTER: Self = Self { layer: 0, cell: 0 };

    pub const fn new(layer: u32, cell: u32) -> Self {
        Self { layer, cell }
    }
}

impl fmt::Display for PolarPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.layer, self.cell)
    }
}

/// Walls stored by one polar cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolarCell {
    /// Wall towards the next cell clockwise.
    pub clockwise: bool,
    /// Walls towards the children in the next layer, or the single rim wall
    /// on the last layer.
    pub outward: Vec<bool>,
}

/// Cell count of every layer for a grid of `layer_count` layers.
///
/// The radius of layer `l` is `l / layer_count`; its circumference divided
/// by the inner layer's cell count estimates the cell width, which scaled by
/// `layer_count` and rounded gives the multiplier over the inner layer.
pub fn layer_cell_counts(layer_count: u32) -> Vec<u32> {
    let mut counts = Vec::with_capacity(layer_count as usize);
    if layer_count == 0 {
        return counts;
    }
    counts.push(1);

    for layer in 1..layer_count {
        let previous = counts[layer as usize - 1];
        let radius = f64::from(layer) / f64::from(layer_count);
        let circumference = TAU * radius;
        let estimated_width = circumference / f64::from(previous);
        let ratio = (estimated_width * f64::from(layer_count)).round().max(1.0) as u32;
        counts.push(previous * ratio);
    }
    counts
}

/// Which stored flag of the owning cell holds a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Clockwise,
    Outward(usize),
}

/// A grid of concentric rings.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarGrid {
    layers: Vec<Vec<PolarCell>>,
}

impl PolarGrid {
    pub const MIN_SIZE: u32 = 1;
    pub const MAX_SIZE: u32 = 256;

    /// Build a fully walled grid with `layer_count` rings.
    pub fn new(layer_count: u32) -> Result<Self> {
        Error::check_size("polar", layer_count, Self::MIN_SIZE, Self::MAX_SIZE)?;

        let counts = layer_cell_counts(layer_count);
        let last = counts.len() - 1;
        let layers: Vec<Vec<PolarCell>> = counts
            .iter()
            .enumerate()
            .map(|(layer, &count)| {
                let outward = if layer == last {
                    vec![true]
                } else {
                    vec![true; (counts[layer + 1] / count) as usize]
                };
                (0..count)
                    .map(|_| PolarCell {
                        // The center has no same-layer neighbor
                        clockwise: layer != 0,
                        outward: outward.clone(),
                    })
                    .collect()
            })
            .collect();

        debug!(
            "Built polar grid with {} layers, cell counts {:?}",
            layer_count, counts
        );
        Ok(Self { layers })
    }

    /// Number of layers.
    pub fn layer_count(&self) -> u32 {
        self.layers.len() as u32
    }

    /// Number of cells in `layer`.
    pub fn cells_in_layer(&self, layer: u32) -> u32 {
        self.layers.get(layer as usize).map_or(0, |l| l.len() as u32)
    }

    /// Stored walls of a cell.
    pub fn polar_cell(&self, position: PolarPosition) -> Option<&PolarCell> {
        self.layers
            .get(position.layer as usize)
            .and_then(|layer| layer.get(position.cell as usize))
    }

    fn is_last_layer(&self, layer: u32) -> bool {
        layer as usize + 1 == self.layers.len()
    }

    /// Children per cell between `layer` and `layer + 1`.
    fn outward_ratio(&self, layer: u32) -> u32 {
        self.cells_in_layer(layer + 1) / self.cells_in_layer(layer)
    }

    /// Resolve a pair to the cell that stores its wall.
    fn owner(&self, a: PolarPosition, b: PolarPosition) -> Result<(PolarPosition, Slot)> {
        let (inner, outer) = if a <= b { (a, b) } else { (b, a) };
        if inner == outer || !self.contains(inner) || !self.contains(outer) {
            return Err(Error::not_adjacent(a, b));
        }

        if inner.layer == outer.layer {
            let count = self.cells_in_layer(inner.layer);
            if inner.cell + 1 == outer.cell {
                Ok((inner, Slot::Clockwise))
            } else if inner.cell == 0 && outer.cell == count - 1 {
                Ok((outer, Slot::Clockwise))
            } else {
                Err(Error::not_adjacent(a, b))
            }
        } else if inner.layer + 1 == outer.layer {
            let ratio = self.outward_ratio(inner.layer);
            if outer.cell / ratio == inner.cell {
                Ok((inner, Slot::Outward((outer.cell % ratio) as usize)))
            } else {
                Err(Error::not_adjacent(a, b))
            }
        } else {
            Err(Error::not_adjacent(a, b))
        }
    }

    fn inward(&self, position: PolarPosition) -> PolarPosition {
        let ratio = self.outward_ratio(position.layer - 1);
        PolarPosition::new(position.layer - 1, position.cell / ratio)
    }

    fn counter_clockwise(&self, position: PolarPosition) -> PolarPosition {
        let count = self.cells_in_layer(position.layer);
        PolarPosition::new(position.layer, (position.cell + count - 1) % count)
    }

    fn clockwise(&self, position: PolarPosition) -> PolarPosition {
        let count = self.cells_in_layer(position.layer);
        PolarPosition::new(position.layer, (position.cell + 1) % count)
    }

    fn outward(&self, position: PolarPosition) -> Vec<PolarPosition> {
        if self.is_last_layer(position.layer) {
            return Vec::new();
        }
        let ratio = self.outward_ratio(position.layer);
        (0..ratio)
            .map(|slot| PolarPosition::new(position.layer + 1, position.cell * ratio + slot))
            .collect()
    }
}

impl Graph for PolarGrid {
    type Node = PolarPosition;

    fn wall(&self, a: PolarPosition, b: PolarPosition) -> Result<bool> {
        let (owner, slot) = self.owner(a, b)?;
        let cell = &self.layers[owner.layer as usize][owner.cell as usize];
        Ok(match slot {
            Slot::Clockwise => cell.clockwise,
            Slot::Outward(i) => cell.outward[i],
        })
    }

    fn set_wall(&mut self, a: PolarPosition, b: PolarPosition, wall: bool) -> Result<()> {
        let (owner, slot) = self.owner(a, b)?;
        let cell = &mut self.layers[owner.layer as usize][owner.cell as usize];
        match slot {
            Slot::Clockwise => cell.clockwise = wall,
            Slot::Outward(i) => cell.outward[i] = wall,
        }
        Ok(())
    }

    fn neighbors(&self, node: PolarPosition) -> Vec<PolarPosition> {
        if !self.contains(node) {
            return Vec::new();
        }

        let mut neighbors = Vec::new();
        if node.layer != 0 {
            neighbors.push(self.inward(node));
            neighbors.push(self.counter_clockwise(node));
            neighbors.push(self.clockwise(node));
        }
        neighbors.extend(self.outward(node));
        neighbors
    }

    fn nodes(&self) -> Vec<PolarPosition> {
        self.layers
            .iter()
            .enumerate()
            .flat_map(|(layer, cells)| {
                (0..cells.len()).map(move |cell| PolarPosition::new(layer as u32, cell as u32))
            })
            .collect()
    }

    fn contains(&self, node: PolarPosition) -> bool {
        self.polar_cell(node).is_some()
    }

    fn node_count(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }
}

impl Entrances for PolarGrid {
    fn boundary(&self) -> Vec<PolarPosition> {
        let last = self.layer_count() - 1;
        (0..self.cells_in_layer(last))
            .map(|cell| PolarPosition::new(last, cell))
            .collect()
    }

    fn open_entry(&mut self, entry: PolarPosition) -> Result<()> {
        if !self.is_last_layer(entry.layer) || !self.contains(entry) {
            return Err(Error::not_on_boundary(entry));
        }
        self.layers[entry.layer as usize][entry.cell as usize].outward = vec![false];
        Ok(())
    }
}

impl Drawable for PolarGrid {
    fn cell(&self, node: PolarPosition) -> Cell {
        let key = CellKey::Polar {
            layer: node.layer,
            cell: node.cell,
        };
        let Some(stored) = self.polar_cell(node) else {
            return Cell { key, sides: Vec::new() };
        };

        let mut sides = Vec::with_capacity(3 + stored.outward.len());
        if node.layer != 0 {
            let shared = |other| self.wall(node, other).unwrap_or(true);
            sides.push(SideWall::new(Side::Inward, shared(self.inward(node))));
            sides.push(SideWall::new(
                Side::CounterClockwise,
                shared(self.counter_clockwise(node)),
            ));
            sides.push(SideWall::new(Side::Clockwise, stored.clockwise));
        }
        sides.extend(
            stored
                .outward
                .iter()
                .enumerate()
                .map(|(slot, &wall)| SideWall::new(Side::Outward(slot as u32), wall)),
        );
        Cell { key, sides }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(layer: u32, cell: u32) -> PolarPosition {
        PolarPosition::new(layer, cell)
    }

    #[test]
    fn layer_counts_grow_by_integer_ratios() {
        assert_eq!(layer_cell_counts(1), vec![1]);
        assert_eq!(layer_cell_counts(2), vec![1, 6]);
        let counts = layer_cell_counts(9);
        assert_eq!(&counts[..4], &[1, 6, 12, 24]);
        for pair in counts.windows(2) {
            assert_eq!(pair[1] % pair[0], 0);
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn single_layer_is_one_cell_with_a_rim() {
        let mut grid = PolarGrid::new(1).unwrap();
        assert_eq!(grid.nodes(), vec![PolarPosition::CENTER]);
        assert!(grid.neighbors(PolarPosition::CENTER).is_empty());
        assert_eq!(grid.boundary(), vec![PolarPosition::CENTER]);

        let entries = grid.generate_entries(1).unwrap();
        grid.open_entries(&entries).unwrap();
        assert_eq!(grid.cell(PolarPosition::CENTER).wall_count(), 0);
    }

    #[test]
    fn center_connects_to_first_ring() {
        let grid = PolarGrid::new(3).unwrap();
        assert_eq!(grid.neighbors(p(0, 0)), (0..6).map(|c| p(1, c)).collect::<Vec<_>>());
        assert_eq!(&grid.neighbors(p(1, 0))[..3], &[p(0, 0), p(1, 5), p(1, 1)]);
    }

    #[test]
    fn adjacency_is_symmetric() {
        let grid = PolarGrid::new(5).unwrap();
        for node in grid.nodes() {
            for neighbor in grid.neighbors(node) {
                assert!(grid.neighbors(neighbor).contains(&node), "{} -> {}", node, neighbor);
                assert!(grid.wall(node, neighbor).unwrap());
            }
        }
    }

    #[test]
    fn wrap_around_wall_is_owned_by_last_cell() {
        let mut grid = PolarGrid::new(3).unwrap();
        grid.set_wall(p(1, 0), p(1, 5), false).unwrap();
        assert!(!grid.wall(p(1, 5), p(1, 0)).unwrap());
        assert!(!grid.polar_cell(p(1, 5)).unwrap().clockwise);
        assert!(grid.polar_cell(p(1, 0)).unwrap().clockwise);
    }

    #[test]
    fn outward_wall_is_shared_with_child() {
        let mut grid = PolarGrid::new(3).unwrap();
        let ratio = grid.cells_in_layer(2) / grid.cells_in_layer(1);
        let child = p(2, 2 * ratio + ratio - 1);
        grid.set_wall(child, p(1, 2), false).unwrap();
        assert!(!grid.wall(p(1, 2), child).unwrap());
        assert!(!grid.polar_cell(p(1, 2)).unwrap().outward[(ratio - 1) as usize]);
    }

    #[test]
    fn non_adjacent_pairs_rejected() {
        let grid = PolarGrid::new(3).unwrap();
        assert!(matches!(grid.wall(p(1, 0), p(1, 2)), Err(Error::NotAdjacent { .. })));
        assert!(matches!(grid.wall(p(0, 0), p(2, 0)), Err(Error::NotAdjacent { .. })));
        assert!(matches!(grid.wall(p(1, 0), p(1, 0)), Err(Error::NotAdjacent { .. })));
        assert!(matches!(grid.wall(p(1, 0), p(9, 0)), Err(Error::NotAdjacent { .. })));
    }

    #[test]
    fn entries_open_the_rim() {
        let mut grid = PolarGrid::new(4).unwrap();
        let last = grid.layer_count() - 1;
        assert!(grid.boundary().iter().all(|n| n.layer == last));

        let entries = grid.generate_entries(3).unwrap();
        grid.open_entries(&entries).unwrap();
        for entry in entries {
            let cell = grid.cell(entry);
            assert_eq!(cell.sides.last(), Some(&SideWall::new(Side::Outward(0), false)));
        }
        assert!(matches!(grid.open_entry(p(1, 0)), Err(Error::NotOnBoundary { .. })));
    }

    #[test]
    fn drawable_reports_inner_sides_first() {
        let grid = PolarGrid::new(3).unwrap();
        let cell = grid.cell(p(1, 1));
        assert_eq!(cell.sides[0].side, Side::Inward);
        assert_eq!(cell.sides[1].side, Side::CounterClockwise);
        assert_eq!(cell.sides[2].side, Side::Clockwise);
        assert!(cell.sides[3..].iter().all(|s| matches!(s.side, Side::Outward(_))));
        assert_eq!(cell.wall_count(), cell.sides.len());
    }
}
