//! Organic-looking grid of quadrilaterals.
//!
//! Construction runs in five phases:
//!
//! 1. Lay out a hexagonal patch of triangular lattice points.
//! 2. Connect every pair of lattice neighbors.
//! 3. Randomly delete interior edges so that pairs of triangles merge into
//!    quads. An edge can only go while both of its triangles are intact, and
//!    the outer rim is never touched.
//! 4. Split every remaining triangle into three quads and every merged quad
//!    into four, by joining edge midpoints to a center point.
//! 5. Relax vertex positions so that each quad drifts towards a square.
//!
//! Lattice points are kept in integer sixth-units until relaxation, so every
//! midpoint and triangle center lands on an exact key.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::f64::consts::FRAC_PI_2;
use std::fmt;

use rand::Rng;
use tracing::{debug, trace};

use crate::cell::{Cell, CellKey, Side, SideWall};
use crate::graph::{Drawable, Entrances, Graph};
use crate::hex::{hex_ring, HexDirection};
use crate::{Error, Result, Vector2D};

/// Lattice point in sixth-units.
type Point = Vector2D<i32>;

/// Lattice units per unit of distance.
const SCALE: i32 = 6;

/// Relaxation passes run after subdivision.
pub const RELAXATION_STEPS: usize = 50;

/// Distance a vertex moves per relaxation pass.
pub const RELAXATION_STEP_LENGTH: f64 = 0.025;

/// Identity of one quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SquareId(pub usize);

impl fmt::Display for SquareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type VertexId = usize;

#[derive(Debug, Clone, PartialEq)]
struct Square {
    corners: [VertexId; 4],
}

impl Square {
    /// Sides as corner pairs, in corner order.
    fn sides(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        (0..4).map(move |i| (self.corners[i], self.corners[(i + 1) % 4]))
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Edge {
    squares: Vec<SquareId>,
    wall: bool,
}

fn edge_key(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    (a.min(b), a.max(b))
}

/// Unit lattice step `i` in sixth-units.
fn direction(i: usize) -> Point {
    HexDirection::ALL[i].offset() * SCALE
}

/// Points of lattice ring `layer`, in the shared ring walk order.
fn lattice_ring(layer: u32) -> Vec<Point> {
    hex_ring(layer).into_iter().map(|p| p * SCALE).collect()
}

/// Triangular lattice being reshaped into quads.
#[derive(Debug, Default)]
struct Lattice {
    points: Vec<Point>,
    adjacency: BTreeMap<Point, BTreeSet<Point>>,
}

impl Lattice {
    fn build(size: u32) -> Self {
        let mut lattice = Self::default();
        for layer in 0..size {
            for point in lattice_ring(layer) {
                lattice.points.push(point);
                lattice.adjacency.insert(point, BTreeSet::new());
            }
        }

        let offsets = lattice_ring(1);
        for point in lattice.points.clone() {
            for &offset in &offsets {
                let other = point + offset;
                if lattice.adjacency.contains_key(&other) {
                    lattice.connect(point, other);
                }
            }
        }
        lattice
    }

    fn contains(&self, point: Point) -> bool {
        self.adjacency.contains_key(&point)
    }

    fn has_edge(&self, a: Point, b: Point) -> bool {
        self.adjacency.get(&a).is_some_and(|n| n.contains(&b))
    }

    fn connect(&mut self, a: Point, b: Point) {
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
    }

    fn disconnect(&mut self, a: Point, b: Point) {
        if let Some(n) = self.adjacency.get_mut(&a) {
            n.remove(&b);
        }
        if let Some(n) = self.adjacency.get_mut(&b) {
            n.remove(&a);
        }
    }

    fn neighbors(&self, point: Point) -> impl Iterator<Item = Point> + '_ {
        self.adjacency.get(&point).into_iter().flatten().copied()
    }

    /// Merge random triangle pairs until no interior edge is removable.
    fn merge_random_triangles<R: Rng + ?Sized>(&mut self, size: u32, rng: &mut R) -> usize {
        let pair = |a: Point, b: Point| if a <= b { (a, b) } else { (b, a) };

        let rim = lattice_ring(size - 1);
        let rim_edges: BTreeSet<(Point, Point)> = rim
            .iter()
            .zip(rim.iter().cycle().skip(1))
            .map(|(&a, &b)| pair(a, b))
            .collect();

        let mut available: BTreeSet<(Point, Point)> = self
            .adjacency
            .iter()
            .flat_map(|(&a, neighbors)| neighbors.iter().map(move |&b| pair(a, b)))
            .filter(|edge| !rim_edges.contains(edge))
            .collect();

        let mut removed = 0;
        while !available.is_empty() {
            let node = self.points[rng.gen_range(0..self.points.len())];
            let candidates: Vec<Point> = self
                .neighbors(node)
                .filter(|&n| available.contains(&pair(node, n)))
                .collect();
            if candidates.is_empty() {
                continue;
            }
            let neighbor = candidates[rng.gen_range(0..candidates.len())];

            self.disconnect(node, neighbor);
            available.remove(&pair(node, neighbor));
            removed += 1;

            let around: BTreeSet<Point> = self.neighbors(node).collect();
            let common: Vec<Point> = self.neighbors(neighbor).filter(|c| around.contains(c)).collect();
            for c in common {
                available.remove(&pair(node, c));
                available.remove(&pair(neighbor, c));
            }
        }
        removed
    }
}

/// Quad mesh under construction.
#[derive(Debug, Default)]
struct MeshBuilder {
    vertex_ids: HashMap<Point, VertexId>,
    vertices: Vec<Point>,
    squares: Vec<Square>,
    edges: BTreeMap<(VertexId, VertexId), Edge>,
}

impl MeshBuilder {
    fn vertex(&mut self, point: Point) -> VertexId {
        if let Some(&id) = self.vertex_ids.get(&point) {
            return id;
        }
        let id = self.vertices.len();
        self.vertices.push(point);
        self.vertex_ids.insert(point, id);
        id
    }

    fn add_square(&mut self, a: Point, b: Point, c: Point, d: Point) {
        let corners = [self.vertex(a), self.vertex(b), self.vertex(c), self.vertex(d)];
        let id = SquareId(self.squares.len());
        let square = Square { corners };
        for (from, to) in square.sides() {
            self.edges
                .entry(edge_key(from, to))
                .or_insert_with(|| Edge {
                    squares: Vec::new(),
                    wall: true,
                })
                .squares
                .push(id);
        }
        self.squares.push(square);
    }

    /// Quads and triangles anchored at `node` become grid cells.
    fn subdivide_around(&mut self, lattice: &Lattice, node: Point) {
        let d = direction;
        let south_east = node + d(0);
        let north_east = node + d(1);
        let north = node + d(2);
        let north_west = node + d(3);

        if lattice.contains(south_east)
            && lattice.contains(north_east)
            && !lattice.has_edge(south_east, north_east)
        {
            let c = node + (d(0) + d(1)) / 2;
            let (se, ne, nw, sw) = (c + d(0) / 2, c + d(1) / 2, c + d(3) / 2, c + d(4) / 2);
            self.add_square(node, sw, c, nw);
            self.add_square(south_east, se, c, sw);
            self.add_square(south_east + d(1), ne, c, se);
            self.add_square(north_east, nw, c, ne);
        }

        if lattice.contains(north_east)
            && lattice.contains(north)
            && !lattice.has_edge(north_east, north)
        {
            let c = node + (d(1) + d(2)) / 2;
            let (ne, n, sw, s) = (c + d(1) / 2, c + d(2) / 2, c + d(4) / 2, c + d(5) / 2);
            self.add_square(node, s, c, sw);
            self.add_square(s, north_east, ne, c);
            self.add_square(c, ne, north_east + d(2), n);
            self.add_square(sw, c, n, north);
        }

        if lattice.contains(north) && lattice.contains(north_west) && !lattice.has_edge(north, north_west)
        {
            let c = node + (d(2) + d(3)) / 2;
            let (n, nw, s, se) = (c + d(2) / 2, c + d(3) / 2, c + d(5) / 2, c + d(0) / 2);
            self.add_square(node, se, c, s);
            self.add_square(se, north, n, c);
            self.add_square(c, n, north + d(3), nw);
            self.add_square(s, c, nw, north_west);
        }

        if lattice.has_edge(node, south_east)
            && lattice.has_edge(south_east, north_east)
            && lattice.has_edge(north_east, node)
        {
            let c = node + (d(0) * 2 + d(2)) / 3;
            let (se, e, ne) = (node + d(0) / 2, node + d(0) + d(2) / 2, node + d(1) / 2);
            self.add_square(node, se, c, ne);
            self.add_square(se, south_east, e, c);
            self.add_square(ne, c, e, north_east);
        }

        if lattice.has_edge(node, north_east)
            && lattice.has_edge(north_east, north)
            && lattice.has_edge(north, node)
        {
            let c = node + (d(1) * 2 + d(3)) / 3;
            let (ne, nne, n) = (node + d(1) / 2, node + d(1) + d(3) / 2, node + d(2) / 2);
            self.add_square(node, ne, c, n);
            self.add_square(ne, north_east, nne, c);
            self.add_square(n, c, nne, north);
        }
    }

    /// Squares touching the rim, in rim walk order.
    fn rim_squares(&self, size: u32) -> Vec<SquareId> {
        let rim = lattice_ring(size - 1);
        let mut seen = BTreeSet::new();
        let mut boundary = Vec::new();

        for (&p, &q) in rim.iter().zip(rim.iter().cycle().skip(1)) {
            let m = (p + q) / 2;
            for (a, b) in [(p, m), (m, q)] {
                let (Some(&a), Some(&b)) = (self.vertex_ids.get(&a), self.vertex_ids.get(&b)) else {
                    continue;
                };
                if let Some(edge) = self.edges.get(&edge_key(a, b)) {
                    if let &[square] = edge.squares.as_slice() {
                        if seen.insert(square) {
                            boundary.push(square);
                        }
                    }
                }
            }
        }
        boundary
    }
}

/// Pull every quad towards a square shape.
///
/// Each corner aims at the average of the other three corners rotated about
/// the quad center by a quarter, half and three-quarter turn. Vertices then
/// move a fixed step along their accumulated pull.
fn relax(positions: &mut [Vector2D<f64>], squares: &[Square]) {
    let mut velocity = vec![Vector2D::<f64>::default(); positions.len()];

    for square in squares {
        let corners = square.corners.map(|v| positions[v]);
        let center = corners.iter().fold(Vector2D::default(), |sum, &p| sum + p) / 4.0;

        for (i, &vertex) in square.corners.iter().enumerate() {
            let pull = (0..3).fold(Vector2D::default(), |sum, k| {
                let other = corners[(i + k + 1) % 4] - center;
                // True rotation; the y term is `x·sin + y·cos`, not `x·sin + y·sin`
                sum + other.rotated((k + 1) as f64 * FRAC_PI_2)
            });
            let target = pull / 3.0 + center;
            velocity[vertex] += target - corners[i];
        }
    }

    for (position, v) in positions.iter_mut().zip(velocity) {
        let magnitude = v.length();
        if magnitude > 0.0 {
            *position += v / magnitude * RELAXATION_STEP_LENGTH;
        }
    }
}

/// Quad grid on a randomized, relaxed lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct IrregularGrid {
    size: u32,
    positions: Vec<Vector2D<f64>>,
    squares: Vec<Square>,
    edges: BTreeMap<(VertexId, VertexId), Edge>,
    boundary: Vec<SquareId>,
}

impl IrregularGrid {
    pub const MIN_SIZE: u32 = 2;
    pub const MAX_SIZE: u32 = 25;

    /// Build a fully walled grid over a lattice hexagon `size` points across
    /// from center to rim, drawing random choices from `rng`.
    pub fn new<R: Rng + ?Sized>(size: u32, rng: &mut R) -> Result<Self> {
        Error::check_size("irregular", size, Self::MIN_SIZE, Self::MAX_SIZE)?;

        let mut lattice = Lattice::build(size);
        let removed = lattice.merge_random_triangles(size, rng);
        trace!("Merged {} triangle pairs into quads", removed);

        let mut mesh = MeshBuilder::default();
        for &node in &lattice.points {
            mesh.subdivide_around(&lattice, node);
        }
        let boundary = mesh.rim_squares(size);

        let mut positions: Vec<Vector2D<f64>> = mesh
            .vertices
            .iter()
            .map(|p| Vector2D::new(f64::from(p.x), f64::from(p.y)) / f64::from(SCALE))
            .collect();
        for _ in 0..RELAXATION_STEPS {
            relax(&mut positions, &mesh.squares);
        }

        debug!(
            "Built irregular grid of size {} ({} squares, {} vertices, {} on the rim)",
            size,
            mesh.squares.len(),
            positions.len(),
            boundary.len()
        );
        Ok(Self {
            size,
            positions,
            squares: mesh.squares,
            edges: mesh.edges,
            boundary,
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Corner positions of a square after relaxation.
    pub fn corners(&self, square: SquareId) -> Option<[Vector2D<f64>; 4]> {
        self.squares
            .get(square.0)
            .map(|s| s.corners.map(|v| self.positions[v]))
    }

    /// Mean of a square's corners.
    pub fn center(&self, square: SquareId) -> Option<Vector2D<f64>> {
        self.corners(square)
            .map(|c| c.iter().fold(Vector2D::default(), |sum, &p| sum + p) / 4.0)
    }

    fn shared_edge(&self, a: SquareId, b: SquareId) -> Result<(VertexId, VertexId)> {
        let square = self
            .squares
            .get(a.0)
            .ok_or_else(|| Error::not_adjacent(a, b))?;
        if a == b || !self.contains(b) {
            return Err(Error::not_adjacent(a, b));
        }

        square
            .sides()
            .map(|(from, to)| edge_key(from, to))
            .find(|key| self.edges.get(key).is_some_and(|e| e.squares.contains(&b)))
            .ok_or_else(|| Error::not_adjacent(a, b))
    }
}

impl Graph for IrregularGrid {
    type Node = SquareId;

    fn wall(&self, a: SquareId, b: SquareId) -> Result<bool> {
        let key = self.shared_edge(a, b)?;
        Ok(self.edges.get(&key).map_or(true, |e| e.wall))
    }

    fn set_wall(&mut self, a: SquareId, b: SquareId, wall: bool) -> Result<()> {
        let key = self.shared_edge(a, b)?;
        if let Some(edge) = self.edges.get_mut(&key) {
            edge.wall = wall;
        }
        Ok(())
    }

    fn neighbors(&self, node: SquareId) -> Vec<SquareId> {
        let Some(square) = self.squares.get(node.0) else {
            return Vec::new();
        };
        square
            .sides()
            .filter_map(|(from, to)| self.edges.get(&edge_key(from, to)))
            .flat_map(|edge| edge.squares.iter().copied())
            .filter(|&other| other != node)
            .collect()
    }

    fn nodes(&self) -> Vec<SquareId> {
        (0..self.squares.len()).map(SquareId).collect()
    }

    fn contains(&self, node: SquareId) -> bool {
        node.0 < self.squares.len()
    }

    fn node_count(&self) -> usize {
        self.squares.len()
    }
}

impl Entrances for IrregularGrid {
    fn boundary(&self) -> Vec<SquareId> {
        self.boundary.clone()
    }

    /// Opens the first still-walled rim side of the square, in corner order.
    fn open_entry(&mut self, entry: SquareId) -> Result<()> {
        let square = self
            .squares
            .get(entry.0)
            .ok_or_else(|| Error::not_on_boundary(entry))?;

        let key = square
            .sides()
            .map(|(from, to)| edge_key(from, to))
            .find(|key| {
                self.edges
                    .get(key)
                    .is_some_and(|e| e.squares.len() == 1 && e.wall)
            })
            .ok_or_else(|| Error::not_on_boundary(entry))?;

        if let Some(edge) = self.edges.get_mut(&key) {
            edge.wall = false;
        }
        Ok(())
    }
}

impl Drawable for IrregularGrid {
    fn cell(&self, node: SquareId) -> Cell {
        let center = self.center(node).unwrap_or_default();
        let key = CellKey::Square {
            index: node.0,
            center,
        };
        let Some(square) = self.squares.get(node.0) else {
            return Cell {
                key,
                sides: Vec::new(),
            };
        };

        let sides = square
            .sides()
            .map(|(from, to)| {
                let wall = self.edges.get(&edge_key(from, to)).map_or(true, |e| e.wall);
                let side = Side::Segment {
                    from: self.positions[from],
                    to: self.positions[to],
                };
                SideWall::new(side, wall)
            })
            .collect();
        Cell { key, sides }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid(size: u32, seed: u64) -> IrregularGrid {
        let mut rng = StdRng::seed_from_u64(seed);
        IrregularGrid::new(size, &mut rng).unwrap()
    }

    #[test]
    fn size_limits_enforced() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            IrregularGrid::new(1, &mut rng),
            Err(Error::SizeOutOfRange { .. })
        ));
        assert!(matches!(
            IrregularGrid::new(26, &mut rng),
            Err(Error::SizeOutOfRange { .. })
        ));
    }

    #[test]
    fn lattice_has_hexagon_point_count() {
        let lattice = Lattice::build(3);
        assert_eq!(lattice.points.len(), 19);
        // Center of a full hexagon touches all six directions
        assert_eq!(lattice.neighbors(Point::default()).count(), 6);
    }

    #[test]
    fn rim_edges_survive_merging() {
        let mut lattice = Lattice::build(4);
        let mut rng = StdRng::seed_from_u64(7);
        let removed = lattice.merge_random_triangles(4, &mut rng);
        assert!(removed > 0);

        let rim = lattice_ring(3);
        for (&a, &b) in rim.iter().zip(rim.iter().cycle().skip(1)) {
            assert!(lattice.has_edge(a, b));
        }
    }

    #[test]
    fn smallest_grid_splits_six_triangles_or_merged_quads() {
        let grid = grid(2, 3);
        // Each merge swaps two triangles (6 quads) for one quad (4 quads)
        let n = grid.node_count();
        assert!((12..=18).contains(&n), "{} squares", n);
        assert_eq!(n % 2, 0);
    }

    #[test]
    fn every_square_is_fully_walled_with_four_sides() {
        let grid = grid(4, 11);
        for node in grid.nodes() {
            let cell = grid.cell(node);
            assert_eq!(cell.sides.len(), 4);
            assert_eq!(cell.wall_count(), 4);
        }
    }

    #[test]
    fn adjacency_is_symmetric() {
        let grid = grid(4, 5);
        for node in grid.nodes() {
            let neighbors = grid.neighbors(node);
            assert!(!neighbors.is_empty());
            for neighbor in neighbors {
                assert!(grid.neighbors(neighbor).contains(&node));
                assert!(grid.wall(node, neighbor).unwrap());
                assert_eq!(
                    grid.wall(node, neighbor).unwrap(),
                    grid.wall(neighbor, node).unwrap()
                );
            }
        }
    }

    #[test]
    fn walls_are_shared() {
        let mut grid = grid(3, 9);
        let a = SquareId(0);
        let b = grid.neighbors(a)[0];
        grid.set_wall(b, a, false).unwrap();
        assert!(!grid.wall(a, b).unwrap());
        assert_eq!(grid.cell(a).wall_count(), 3);
        assert_eq!(grid.cell(b).wall_count(), 3);

        assert!(matches!(grid.wall(a, a), Err(Error::NotAdjacent { .. })));
        assert!(matches!(
            grid.wall(a, SquareId(grid.node_count())),
            Err(Error::NotAdjacent { .. })
        ));
    }

    #[test]
    fn boundary_squares_open_outwards() {
        let template = grid(3, 21);
        let boundary = template.boundary();
        // Every rim half-edge belongs to one square: 6 sides * 2 lattice edges * 2 halves
        assert!(!boundary.is_empty() && boundary.len() <= 24);

        for entry in boundary {
            let mut grid = template.clone();
            let before = grid.cell(entry).wall_count();
            grid.open_entry(entry).unwrap();
            assert_eq!(grid.cell(entry).wall_count(), before - 1);
            assert_eq!(
                crate::graph::interior_wall_count(&grid).unwrap(),
                crate::graph::interior_wall_count(&template).unwrap()
            );
        }
    }

    #[test]
    fn interior_squares_are_not_entries() {
        let mut grid = grid(4, 2);
        let boundary: BTreeSet<SquareId> = grid.boundary().into_iter().collect();
        let interior = grid.nodes().into_iter().find(|n| !boundary.contains(n));
        if let Some(interior) = interior {
            assert!(matches!(grid.open_entry(interior), Err(Error::NotOnBoundary { .. })));
        }
    }

    #[test]
    fn same_seed_same_grid() {
        assert_eq!(grid(5, 42), grid(5, 42));
    }

    #[test]
    fn relaxation_squares_up_a_flat_quad() {
        // Corners run clockwise, like every quad the mesh builder emits
        let squares = vec![Square {
            corners: [0, 1, 2, 3],
        }];
        let mut positions = vec![
            Vector2D::new(0.0, 0.0),
            Vector2D::new(0.0, 0.5),
            Vector2D::new(2.0, 0.5),
            Vector2D::new(2.0, 0.0),
        ];
        let skew = |p: &[Vector2D<f64>]| ((p[0] - p[1]).length() - (p[1] - p[2]).length()).abs();
        let before = skew(&positions);
        for _ in 0..10 {
            relax(&mut positions, &squares);
        }
        assert!(skew(&positions) < before);
    }
}
