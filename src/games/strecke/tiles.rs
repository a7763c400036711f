//! Tile definitions and the complete catalog for the base game (35 tiles).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::ports::Port;
use crate::error::GeometryError;

use Port::{A, B, C, D, E, F, G, H};

pub type Connection = (Port, Port);

/// Track layout of a tile in its own `North` frame.
///
/// Each port is used by at most one connection. Validation runs on
/// construction and on deserialization, so a `Tile` in hand is always
/// well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TileSerde")]
pub struct Tile {
    #[serde(rename = "layout")]
    connections: Vec<Connection>,
}

#[derive(Deserialize)]
struct TileSerde {
    #[serde(alias = "connections")]
    layout: Vec<Connection>,
}

impl TryFrom<TileSerde> for Tile {
    type Error = GeometryError;

    fn try_from(raw: TileSerde) -> Result<Self, Self::Error> {
        Tile::new(raw.layout)
    }
}

impl Tile {
    pub fn new(connections: Vec<Connection>) -> Result<Tile, GeometryError> {
        let mut used = [false; 8];
        for &(p0, p1) in &connections {
            if p0 == p1 {
                return Err(GeometryError::SelfLoop(p0));
            }
            for p in [p0, p1] {
                if std::mem::replace(&mut used[p.index()], true) {
                    return Err(GeometryError::BranchingPort(p));
                }
            }
        }
        Ok(Tile { connections })
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Whether any connection touches `port` (tile-local frame).
    pub fn touches(&self, port: Port) -> bool {
        self.connections.iter().any(|&(p0, p1)| p0 == port || p1 == port)
    }
}

fn tile(layout: [Connection; 4]) -> Tile {
    Tile {
        connections: layout.to_vec(),
    }
}

/// Every distinct tile in a standard deck, in deck order.
pub static TILE_CATALOG: Lazy<Vec<Tile>> = Lazy::new(|| {
    vec![
        tile([(A, E), (B, F), (C, H), (D, G)]),
        tile([(A, E), (B, F), (C, G), (D, H)]),
        tile([(A, F), (B, E), (C, H), (D, G)]),
        tile([(A, E), (B, D), (C, G), (F, H)]),
        tile([(A, H), (B, C), (D, E), (F, G)]),
        tile([(A, E), (B, C), (D, H), (F, G)]),
        tile([(A, E), (B, C), (D, G), (F, H)]),
        tile([(A, D), (B, G), (C, F), (E, H)]),
        tile([(A, D), (B, F), (C, G), (E, H)]),
        tile([(A, D), (B, E), (C, H), (F, G)]),
        tile([(A, D), (B, E), (C, G), (F, H)]),
        tile([(A, D), (B, C), (E, H), (F, G)]),
        tile([(A, C), (B, H), (D, F), (E, G)]),
        tile([(A, C), (B, H), (D, E), (F, G)]),
        tile([(A, C), (B, G), (D, F), (E, H)]),
        tile([(A, C), (B, G), (D, E), (F, H)]),
        tile([(A, C), (B, F), (D, H), (E, G)]),
        tile([(A, C), (B, F), (D, G), (E, H)]),
        tile([(A, C), (B, E), (D, H), (F, G)]),
        tile([(A, C), (B, E), (D, G), (F, H)]),
        tile([(A, C), (B, D), (E, H), (F, G)]),
        tile([(A, C), (B, D), (E, G), (F, H)]),
        tile([(A, B), (C, H), (D, G), (E, F)]),
        tile([(A, B), (C, H), (D, F), (E, G)]),
        tile([(A, B), (C, H), (D, E), (F, G)]),
        tile([(A, B), (C, G), (D, H), (E, F)]),
        tile([(A, B), (C, G), (D, F), (E, H)]),
        tile([(A, B), (C, G), (D, E), (F, H)]),
        tile([(A, B), (C, F), (D, H), (E, G)]),
        tile([(A, B), (C, F), (D, G), (E, H)]),
        tile([(A, B), (C, E), (D, H), (F, G)]),
        tile([(A, B), (C, E), (D, G), (F, H)]),
        tile([(A, B), (C, D), (E, H), (F, G)]),
        tile([(A, B), (C, D), (E, G), (F, H)]),
        tile([(A, B), (C, D), (E, F), (G, H)]),
    ]
});
