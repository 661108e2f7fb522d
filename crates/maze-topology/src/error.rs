//! Error types for maze-topology.

use thiserror::Error;

/// Result type for maze-topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by grid construction, wall access and entry placement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Wall access between two nodes that do not share an edge.
    ///
    /// Also raised when the two nodes are equal or one of them is not part of
    /// the grid. Always a bug in the caller.
    #[error("nodes {a} and {b} are not adjacent")]
    NotAdjacent { a: String, b: String },

    /// Requested grid size outside the topology's supported range.
    #[error("{topology} grid size {size} is out of range ({min}..={max})")]
    SizeOutOfRange {
        topology: &'static str,
        size: u32,
        min: u32,
        max: u32,
    },

    /// Zero entries, or more entries than boundary nodes.
    #[error("invalid entry count {requested}: the boundary has {available} nodes")]
    InvalidEntryCount { requested: usize, available: usize },

    /// A node handed to entry opening has no outward-facing wall.
    #[error("node {node} is not on the grid boundary")]
    NotOnBoundary { node: String },
}

impl Error {
    pub(crate) fn not_adjacent(a: impl std::fmt::Display, b: impl std::fmt::Display) -> Self {
        Error::NotAdjacent {
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    pub(crate) fn not_on_boundary(node: impl std::fmt::Display) -> Self {
        Error::NotOnBoundary {
            node: node.to_string(),
        }
    }

    /// Check `size` against an inclusive range.
    pub(crate) fn check_size(topology: &'static str, size: u32, min: u32, max: u32) -> Result<()> {
        if (min..=max).contains(&size) {
            Ok(())
        } else {
            Err(Error::SizeOutOfRange {
                topology,
                size,
                min,
                max,
            })
        }
    }
}
