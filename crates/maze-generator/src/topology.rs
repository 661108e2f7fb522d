//! Grid shape selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// The grid shapes a maze can be generated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum Topology {
    Rectangular,
    #[default]
    Polar,
    HexHex,
    TriHex,
    Triangular,
    Irregular,
}

impl Topology {
    pub const ALL: [Topology; 6] = [
        Topology::Rectangular,
        Topology::Polar,
        Topology::HexHex,
        Topology::TriHex,
        Topology::Triangular,
        Topology::Irregular,
    ];

    /// Canonical name, as accepted by [`FromStr`] and written by serde.
    pub const fn name(self) -> &'static str {
        match self {
            Topology::Rectangular => "rectangular",
            Topology::Polar => "polar",
            Topology::HexHex => "hex-hex",
            Topology::TriHex => "tri-hex",
            Topology::Triangular => "triangular",
            Topology::Irregular => "irregular",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Topology {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rect" | "rectangular" => Ok(Topology::Rectangular),
            "polar" => Ok(Topology::Polar),
            "hexhex" | "hex-hex" => Ok(Topology::HexHex),
            "trihex" | "tri-hex" => Ok(Topology::TriHex),
            "tri" | "triangular" => Ok(Topology::Triangular),
            "irregular" => Ok(Topology::Irregular),
            _ => Err(Error::UnknownTopology(s.to_string())),
        }
    }
}

/// Deserialization goes through [`FromStr`], so config files accept the same
/// names and aliases as the command line.
impl TryFrom<String> for Topology {
    type Error = Error;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}
