//! The generation pipeline: build, place entries, carve, open.

use maze_topology::{
    Cell, CellKey, Drawable, Entrances, Graph, HexHexGrid, IrregularGrid, PolarGrid, RectGrid,
    TriGrid, TriHexGrid,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::carve::{carve, CarveReport};
use crate::{MazeConfig, Result, Topology};

/// A carved grid together with its entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated<G: Graph> {
    pub grid: G,
    /// Entry nodes, in boundary walk order
    pub entries: Vec<G::Node>,
    pub report: CarveReport,
}

impl<G: Entrances + Drawable> Generated<G> {
    /// Place entries, carve from them, then open them.
    ///
    /// The entry count is validated before the grid is touched.
    pub fn carve_from_entries<R: Rng + ?Sized>(
        mut grid: G,
        entry_count: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let entries = grid.generate_entries(entry_count)?;
        debug!("Placed {} entries: {:?}", entries.len(), entries);

        let report = carve(&mut grid, &entries, rng)?;
        grid.open_entries(&entries)?;
        Ok(Self {
            grid,
            entries,
            report,
        })
    }

    fn entry_keys(&self) -> Vec<CellKey> {
        self.entries.iter().map(|&e| self.grid.cell(e).key).collect()
    }
}

/// A finished maze on one of the supported grids.
#[derive(Debug, Clone, PartialEq)]
pub enum Maze {
    Rectangular(Generated<RectGrid>),
    Polar(Generated<PolarGrid>),
    HexHex(Generated<HexHexGrid>),
    TriHex(Generated<TriHexGrid>),
    Triangular(Generated<TriGrid>),
    Irregular(Generated<IrregularGrid>),
}

/// Serializable snapshot of a maze for renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeLayout {
    pub topology: Topology,
    pub size: u32,
    pub seed: Option<u64>,
    /// Entry cells, in boundary walk order
    pub entries: Vec<CellKey>,
    /// Every cell with its sides in canonical order
    pub cells: Vec<Cell>,
}

impl Maze {
    /// Generate a maze from `config`.
    pub fn generate(config: &MazeConfig) -> Result<Self> {
        info!(
            "Generating {} maze (size {}, {} entries, seed {:?})",
            config.topology, config.size, config.entry_count, config.seed
        );

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let size = config.size;
        let entries = config.entry_count;

        let maze = match config.topology {
            Topology::Rectangular => Maze::Rectangular(Generated::carve_from_entries(
                RectGrid::new(size)?,
                entries,
                &mut rng,
            )?),
            Topology::Polar => Maze::Polar(Generated::carve_from_entries(
                PolarGrid::new(size)?,
                entries,
                &mut rng,
            )?),
            Topology::HexHex => Maze::HexHex(Generated::carve_from_entries(
                HexHexGrid::new(size)?,
                entries,
                &mut rng,
            )?),
            Topology::TriHex => Maze::TriHex(Generated::carve_from_entries(
                TriHexGrid::new(size)?,
                entries,
                &mut rng,
            )?),
            Topology::Triangular => Maze::Triangular(Generated::carve_from_entries(
                TriGrid::new(size)?,
                entries,
                &mut rng,
            )?),
            Topology::Irregular => {
                // Lattice pruning draws from the same stream as carving
                let grid = IrregularGrid::new(size, &mut rng)?;
                Maze::Irregular(Generated::carve_from_entries(grid, entries, &mut rng)?)
            }
        };

        let report = maze.report();
        info!(
            "Maze ready: {} cells, {} walls cleared",
            report.visited(),
            report.walls_cleared
        );
        Ok(maze)
    }

    pub fn topology(&self) -> Topology {
        match self {
            Maze::Rectangular(_) => Topology::Rectangular,
            Maze::Polar(_) => Topology::Polar,
            Maze::HexHex(_) => Topology::HexHex,
            Maze::TriHex(_) => Topology::TriHex,
            Maze::Triangular(_) => Topology::Triangular,
            Maze::Irregular(_) => Topology::Irregular,
        }
    }

    /// Statistics of the carve that produced this maze.
    pub fn report(&self) -> &CarveReport {
        match self {
            Maze::Rectangular(m) => &m.report,
            Maze::Polar(m) => &m.report,
            Maze::HexHex(m) => &m.report,
            Maze::TriHex(m) => &m.report,
            Maze::Triangular(m) => &m.report,
            Maze::Irregular(m) => &m.report,
        }
    }

    /// Entry cells, in boundary walk order.
    pub fn entries(&self) -> Vec<CellKey> {
        match self {
            Maze::Rectangular(m) => m.entry_keys(),
            Maze::Polar(m) => m.entry_keys(),
            Maze::HexHex(m) => m.entry_keys(),
            Maze::TriHex(m) => m.entry_keys(),
            Maze::Triangular(m) => m.entry_keys(),
            Maze::Irregular(m) => m.entry_keys(),
        }
    }

    /// Every cell with its sides.
    pub fn cells(&self) -> Vec<Cell> {
        match self {
            Maze::Rectangular(m) => m.grid.cells(),
            Maze::Polar(m) => m.grid.cells(),
            Maze::HexHex(m) => m.grid.cells(),
            Maze::TriHex(m) => m.grid.cells(),
            Maze::Triangular(m) => m.grid.cells(),
            Maze::Irregular(m) => m.grid.cells(),
        }
    }

    /// Snapshot for renderers, tagged with the settings that produced it.
    pub fn layout(&self, config: &MazeConfig) -> MazeLayout {
        MazeLayout {
            topology: self.topology(),
            size: config.size,
            seed: config.seed,
            entries: self.entries(),
            cells: self.cells(),
        }
    }
}

/// Generate a maze from `config`.
pub fn generate(config: &MazeConfig) -> Result<Maze> {
    Maze::generate(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(topology: Topology, size: u32, entry_count: usize, seed: u64) -> MazeConfig {
        MazeConfig {
            topology,
            size,
            entry_count,
            seed: Some(seed),
        }
    }

    #[test]
    fn every_topology_generates() {
        for topology in Topology::ALL {
            let maze = generate(&config(topology, 4, 2, 42)).unwrap();
            assert_eq!(maze.topology(), topology);
            assert_eq!(maze.entries().len(), 2);
            assert_eq!(maze.report().territories.len(), 2);
        }
    }

    #[test]
    fn zero_entries_rejected_before_carving() {
        let err = generate(&config(Topology::Rectangular, 5, 0, 1)).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Topology(maze_topology::Error::InvalidEntryCount { requested: 0, .. })
        ));
    }

    #[test]
    fn size_limits_surface_as_topology_errors() {
        let err = generate(&config(Topology::Irregular, 26, 1, 1)).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Topology(maze_topology::Error::SizeOutOfRange { .. })
        ));
    }

    #[test]
    fn layout_carries_config() {
        let cfg = config(Topology::HexHex, 3, 3, 9);
        let maze = generate(&cfg).unwrap();
        let layout = maze.layout(&cfg);
        assert_eq!(layout.topology, Topology::HexHex);
        assert_eq!(layout.size, 3);
        assert_eq!(layout.seed, Some(9));
        assert_eq!(layout.cells.len(), 19);
        assert_eq!(layout.entries.len(), 3);
    }

    #[test]
    fn layout_serializes_to_json() {
        let cfg = config(Topology::Rectangular, 2, 1, 3);
        let layout = generate(&cfg).unwrap().layout(&cfg);
        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(json["topology"], "rectangular");
        assert_eq!(json["cells"].as_array().unwrap().len(), 4);
        assert_eq!(json["entries"][0]["kind"], "rect");
    }
}
