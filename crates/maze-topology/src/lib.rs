//! Maze Grid Topologies
//!
//! Every grid in this crate is a planar graph whose adjacent nodes are
//! separated by a single wall flag. The flag is stored once per edge, so
//! `wall(a, b)` and `wall(b, a)` can never disagree.
//!
//! # Topologies
//!
//! - [`RectGrid`]: `size × size` squares
//! - [`PolarGrid`]: concentric rings around a center cell
//! - [`HexHexGrid`]: a hexagon of hexagons
//! - [`TriHexGrid`]: a triangle of hexagons
//! - [`TriGrid`]: a triangle of alternating up and down triangles
//! - [`IrregularGrid`]: randomized quads on a relaxed lattice
//!
//! # Capabilities
//!
//! [`Graph`] is what maze carving needs: wall query and mutation plus
//! neighbor enumeration. [`Entrances`] adds the perimeter walk used to place
//! and open entries. [`Drawable`] exposes each node's sides in a fixed order
//! for renderers.

mod cell;
mod error;
mod graph;
mod hex;
mod hexhex;
mod irregular;
mod polar;
mod rect;
mod tri;
mod trihex;
mod vector;

pub use cell::{Cell, CellKey, Side, SideWall};
pub use error::{Error, Result};
pub use graph::{interior_wall_count, spaced_entries, Drawable, Entrances, Graph};
pub use hex::{hex_ring, HexCoord, HexDirection, HexGrid, HexWalls};
pub use hexhex::HexHexGrid;
pub use irregular::{IrregularGrid, SquareId, RELAXATION_STEPS, RELAXATION_STEP_LENGTH};
pub use polar::{layer_cell_counts, PolarCell, PolarGrid, PolarPosition};
pub use rect::{RectCoord, RectGrid, RectWalls};
pub use tri::{is_up, TriCoord, TriGrid, TriWalls};
pub use trihex::TriHexGrid;
pub use vector::Vector2D;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_symmetric<G: Graph>(grid: &G) {
        for node in grid.nodes() {
            for neighbor in grid.neighbors(node) {
                assert!(grid.contains(neighbor));
                assert!(
                    grid.neighbors(neighbor).contains(&node),
                    "{} lists {} but not the reverse",
                    node,
                    neighbor
                );
                assert_eq!(grid.wall(node, neighbor), grid.wall(neighbor, node));
            }
        }
    }

    fn assert_boundary_unique<G: Entrances>(grid: &G) {
        let boundary = grid.boundary();
        let mut sorted = boundary.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), boundary.len());
    }

    proptest! {
        #[test]
        fn regular_grids_have_symmetric_adjacency(size in 1u32..7) {
            assert_symmetric(&RectGrid::new(size).unwrap());
            assert_symmetric(&PolarGrid::new(size).unwrap());
            assert_symmetric(&HexHexGrid::new(size).unwrap());
            assert_symmetric(&TriHexGrid::new(size).unwrap());
            assert_symmetric(&TriGrid::new(size).unwrap());
        }

        #[test]
        fn boundaries_list_each_node_once(size in 1u32..8) {
            assert_boundary_unique(&RectGrid::new(size).unwrap());
            assert_boundary_unique(&PolarGrid::new(size).unwrap());
            assert_boundary_unique(&HexHexGrid::new(size).unwrap());
            assert_boundary_unique(&TriHexGrid::new(size).unwrap());
            assert_boundary_unique(&TriGrid::new(size).unwrap());
        }

        #[test]
        fn full_boundary_opens_cleanly(size in 1u32..6) {
            let mut grid = TriGrid::new(size).unwrap();
            let boundary = grid.boundary();
            let entries = grid.generate_entries(boundary.len()).unwrap();
            prop_assert_eq!(&entries, &boundary);
            prop_assert!(grid.open_entries(&entries).is_ok());
        }
    }
}
