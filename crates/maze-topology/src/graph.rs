//! The capability set every grid provides to the carving algorithm.
//!
//! A grid is a planar graph whose edges carry a single shared wall flag.
//! `wall(a, b)` and `wall(b, a)` always read the same storage: each grid
//! canonicalizes the pair to one owner before touching its wall layout.

use std::fmt;
use std::hash::Hash;

use crate::cell::Cell;
use crate::{Error, Result};

/// Wall query and mutation between adjacent nodes, plus neighbor enumeration.
pub trait Graph {
    /// Node identity. Cheap to copy, hashable, and printable for errors.
    type Node: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display;

    /// Whether a wall separates `a` and `b`.
    ///
    /// Fails with [`Error::NotAdjacent`] when the nodes do not share an edge.
    fn wall(&self, a: Self::Node, b: Self::Node) -> Result<bool>;

    /// Set or clear the wall between `a` and `b`. Both endpoints observe the change.
    fn set_wall(&mut self, a: Self::Node, b: Self::Node, wall: bool) -> Result<()>;

    /// Adjacent nodes of `node` that exist in the grid, in the topology's order.
    fn neighbors(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Every node of the grid, in a deterministic order.
    fn nodes(&self) -> Vec<Self::Node>;

    /// Whether `node` belongs to the grid.
    fn contains(&self, node: Self::Node) -> bool;

    /// Number of nodes in the grid.
    fn node_count(&self) -> usize {
        self.nodes().len()
    }
}

/// Boundary traversal and entry opening.
pub trait Entrances: Graph {
    /// Boundary nodes in perimeter traversal order, each listed once.
    fn boundary(&self) -> Vec<Self::Node>;

    /// Clear the outward-facing wall of a single boundary node.
    fn open_entry(&mut self, entry: Self::Node) -> Result<()>;

    /// Pick `count` boundary nodes evenly spaced along [`Entrances::boundary`].
    ///
    /// The boundary length is integer-divided by `count`; the first node of
    /// each window is taken.
    fn generate_entries(&self, count: usize) -> Result<Vec<Self::Node>> {
        spaced_entries(&self.boundary(), count)
    }

    /// Clear the outward-facing wall of every entry.
    fn open_entries(&mut self, entries: &[Self::Node]) -> Result<()> {
        for &entry in entries {
            self.open_entry(entry)?;
        }
        Ok(())
    }
}

/// Exposes per-node wall state to renderers.
pub trait Drawable: Graph {
    /// The sides of `node` in canonical order, with their wall flags.
    fn cell(&self, node: Self::Node) -> Cell;

    /// All cells, in [`Graph::nodes`] order.
    fn cells(&self) -> Vec<Cell> {
        self.nodes().into_iter().map(|node| self.cell(node)).collect()
    }
}

/// Sample `count` evenly spaced nodes from a perimeter walk.
pub fn spaced_entries<N: Copy>(boundary: &[N], count: usize) -> Result<Vec<N>> {
    if count == 0 || count > boundary.len() {
        return Err(Error::InvalidEntryCount {
            requested: count,
            available: boundary.len(),
        });
    }

    let spacing = boundary.len() / count;
    Ok((0..count).map(|i| boundary[i * spacing]).collect())
}

/// Number of walled edges between distinct pairs of adjacent nodes.
pub fn interior_wall_count<G: Graph + ?Sized>(graph: &G) -> Result<usize> {
    let mut count = 0;
    for node in graph.nodes() {
        for neighbor in graph.neighbors(node) {
            if node < neighbor && graph.wall(node, neighbor)? {
                count += 1;
            }
        }
    }
    Ok(count)
}
