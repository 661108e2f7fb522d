//! Maze generation settings.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{Error, Result, Topology};

/// Everything needed to reproduce a maze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Grid shape
    pub topology: Topology,
    /// Topology-specific size (ring count, edge length or side length)
    pub size: u32,
    /// Number of entries opened on the boundary
    pub entry_count: usize,
    /// Random seed; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            topology: Topology::Polar,
            size: 9,
            entry_count: 3,
            seed: None,
        }
    }
}

impl MazeConfig {
    /// Read a JSON configuration file. Missing fields keep their defaults.
    ///
    /// An unrecognized topology name fails with [`Error::UnknownTopology`],
    /// the same as on the command line.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&text)?;
        if let Some(name) = value.get("topology").and_then(Value::as_str) {
            name.parse::<Topology>()?;
        }
        let config: MazeConfig = serde_json::from_value(value)?;
        debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}
