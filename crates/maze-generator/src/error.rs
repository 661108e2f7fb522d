//! Error types for maze generation.

use thiserror::Error;

/// Result type for maze generation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or generating a maze.
#[derive(Debug, Error)]
pub enum Error {
    /// Grid construction, wall access or entry placement failed
    #[error(transparent)]
    Topology(#[from] maze_topology::Error),

    /// Topology name that matches no known grid
    #[error("Unknown topology: {0}")]
    UnknownTopology(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration file
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}
