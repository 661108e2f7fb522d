//! Maze Generator
//!
//! Turns a fully walled grid from `maze-topology` into a perfect maze: every
//! cell is reachable from exactly one entry along exactly one path.
//!
//! # Pipeline
//!
//! 1. Seed the random source (a fixed seed makes the whole maze reproducible)
//! 2. Build the grid for the selected [`Topology`]
//! 3. Pick evenly spaced entries along the grid boundary
//! 4. [`carve`] from all entries at once, taking turns round-robin
//! 5. Open the outward wall of every entry
//!
//! ```no_run
//! use maze_generator::{generate, MazeConfig, Topology};
//!
//! let config = MazeConfig {
//!     topology: Topology::HexHex,
//!     size: 6,
//!     entry_count: 2,
//!     seed: Some(42),
//! };
//! let maze = generate(&config)?;
//! let layout = maze.layout(&config);
//! # Ok::<(), maze_generator::Error>(())
//! ```

mod carve;
mod config;
mod error;
mod maze;
mod topology;

pub use carve::{carve, CarveReport};
pub use config::MazeConfig;
pub use error::{Error, Result};
pub use maze::{generate, Generated, Maze, MazeLayout};
pub use topology::Topology;
