//! Interleaved randomized depth-first carving.
//!
//! One stack per start node, one shared visited set. Stacks take turns in a
//! fixed round-robin order; on its turn a stack pops its top node and, if the
//! node has unvisited neighbors, clears the wall to a random one and pushes
//! it. A node that still has other unvisited neighbors is pushed back first so
//! the walk can branch from it later.
//!
//! Every node is claimed by exactly one stack the moment it is first reached,
//! so the open edges form a spanning forest with one tree per start.

use std::collections::HashSet;

use maze_topology::Graph;
use rand::Rng;
use tracing::debug;

use crate::Result;

/// Outcome of a carve.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CarveReport {
    /// Nodes claimed by each stack, in start order (after duplicates collapse)
    pub territories: Vec<usize>,
    /// Walls cleared between adjacent nodes
    pub walls_cleared: usize,
}

impl CarveReport {
    /// Total nodes reached from any start.
    pub fn visited(&self) -> usize {
        self.territories.iter().sum()
    }
}

/// Carve a perfect maze rooted at `starts` into `graph`.
///
/// Duplicate starts collapse into the first occurrence. With no starts the
/// graph is left untouched.
pub fn carve<G, R>(graph: &mut G, starts: &[G::Node], rng: &mut R) -> Result<CarveReport>
where
    G: Graph + ?Sized,
    R: Rng + ?Sized,
{
    let mut visited: HashSet<G::Node> = HashSet::with_capacity(graph.node_count());
    let mut stacks: Vec<Vec<G::Node>> = Vec::with_capacity(starts.len());
    for &start in starts {
        if visited.insert(start) {
            stacks.push(vec![start]);
        }
    }

    let mut report = CarveReport {
        territories: vec![1; stacks.len()],
        walls_cleared: 0,
    };

    while stacks.iter().any(|stack| !stack.is_empty()) {
        for (index, stack) in stacks.iter_mut().enumerate() {
            let Some(current) = stack.pop() else {
                continue;
            };

            let unvisited: Vec<G::Node> = graph
                .neighbors(current)
                .into_iter()
                .filter(|neighbor| !visited.contains(neighbor))
                .collect();

            if unvisited.len() > 1 {
                stack.push(current);
            }
            if !unvisited.is_empty() {
                let chosen = unvisited[rng.gen_range(0..unvisited.len())];
                graph.set_wall(current, chosen, false)?;
                visited.insert(chosen);
                stack.push(chosen);

                report.territories[index] += 1;
                report.walls_cleared += 1;
            }
        }
    }

    debug!(
        "Carved {} walls from {} starts, territories {:?}",
        report.walls_cleared,
        report.territories.len(),
        report.territories
    );
    Ok(report)
}
