//! Port topology: the eight track ports on a tile's boundary.
//!
//! Each edge carries two ports, a third of the way in from either corner.
//! Coordinates live on a 0–99 square (the tile's SVG viewBox), so the layout
//! is symmetric about the midpoint of every edge.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Side length of the normalized tile square.
pub const TILE_EXTENT: i32 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Port {
    A, // Top left
    B, // Top right
    C, // Right top
    D, // Right bottom
    E, // Bottom right
    F, // Bottom left
    G, // Left bottom
    H, // Left top
}

pub const ALL_PORTS: [Port; 8] = [
    Port::A,
    Port::B,
    Port::C,
    Port::D,
    Port::E,
    Port::F,
    Port::G,
    Port::H,
];

/// Port coordinates indexed by `Port as usize`.
const PORT_LOCATIONS: [(i32, i32); 8] = [
    (33, 0),
    (66, 0),
    (99, 33),
    (99, 66),
    (66, 99),
    (33, 99),
    (0, 66),
    (0, 33),
];

/// Fixed boundary coordinate of a port.
#[inline]
pub fn location(port: Port) -> (i32, i32) {
    PORT_LOCATIONS[port.index()]
}

/// The four tile edges, also used as grid step directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// (row, col) delta of one step across this edge.
    pub fn grid_offsets(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// The two ports on this edge, in clockwise order.
    pub fn ports(self) -> [Port; 2] {
        match self {
            Direction::North => [Port::A, Port::B],
            Direction::East => [Port::C, Port::D],
            Direction::South => [Port::E, Port::F],
            Direction::West => [Port::G, Port::H],
        }
    }
}

impl Port {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Port {
        ALL_PORTS[idx % 8]
    }

    pub fn side(self) -> Direction {
        match self {
            Port::A | Port::B => Direction::North,
            Port::C | Port::D => Direction::East,
            Port::E | Port::F => Direction::South,
            Port::G | Port::H => Direction::West,
        }
    }

    /// The port on the neighbouring cell that touches the same boundary point.
    pub fn flip(self) -> Port {
        match self {
            Port::A => Port::F,
            Port::B => Port::E,
            Port::C => Port::H,
            Port::D => Port::G,
            Port::E => Port::B,
            Port::F => Port::A,
            Port::G => Port::D,
            Port::H => Port::C,
        }
    }

    pub fn as_char(self) -> char {
        (b'A' + self as u8) as char
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl TryFrom<char> for Port {
    type Error = GeometryError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            c @ 'A'..='H' => Ok(Port::from_index((c as u8 - b'A') as usize)),
            _ => Err(GeometryError::UnknownPort(c.to_string())),
        }
    }
}

impl FromStr for Port {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Port::try_from(c),
            _ => Err(GeometryError::UnknownPort(s.to_string())),
        }
    }
}
