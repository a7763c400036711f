//! Rotation algebra over ports.
//!
//! Every facing is a power of one generator, a quarter turn clockwise
//! (`A→C→E→G`, `B→D→F→H`). `North` is the tile as authored. The server
//! lays an `East` tile a quarter turn anticlockwise (local `A` shows up on
//! board `G`), so `East` is three generator steps and `West` is one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ports::Port;
use crate::error::GeometryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    North,
    East,
    South,
    West,
}

pub const ALL_FACINGS: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

impl Facing {
    /// Position in the `North → East → South → West` cycle.
    #[inline]
    pub fn quarter_turns(self) -> usize {
        self as usize
    }

    /// Generator steps that carry a tile-local port onto the board.
    fn port_turns(self) -> usize {
        (4 - self.quarter_turns()) % 4
    }

    pub fn from_quarter_turns(turns: usize) -> Facing {
        ALL_FACINGS[turns % 4]
    }

    pub fn turn_clockwise(self) -> Facing {
        Facing::from_quarter_turns(self.quarter_turns() + 1)
    }

    pub fn inverse(self) -> Facing {
        Facing::from_quarter_turns(4 - self.quarter_turns())
    }

    /// Facing for a rotation in degrees (0, 90, 180, 270, or any multiple of 90).
    pub fn from_degrees(degrees: u32) -> Result<Facing, GeometryError> {
        if degrees % 90 != 0 {
            return Err(GeometryError::InvalidFacing(format!("{degrees} degrees")));
        }
        Ok(Facing::from_quarter_turns(((degrees / 90) % 4) as usize))
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for Facing {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Facing::North),
            "east" | "e" => Ok(Facing::East),
            "south" | "s" => Ok(Facing::South),
            "west" | "w" => Ok(Facing::West),
            other => match other.parse::<u32>() {
                Ok(degrees) => Facing::from_degrees(degrees),
                Err(_) => Err(GeometryError::InvalidFacing(s.to_string())),
            },
        }
    }
}

/// The generator: one quarter turn clockwise.
#[inline]
pub fn turn_clockwise(port: Port) -> Port {
    Port::from_index(port.index() + 2)
}

fn turn_n(port: Port, turns: usize) -> Port {
    (0..turns % 4).fold(port, |p, _| turn_clockwise(p))
}

/// Board-frame port that tile-local `port` lands on under `facing`.
pub fn rotate(port: Port, facing: Facing) -> Port {
    turn_n(port, facing.port_turns())
}

/// Tile-local port that shows up as board-frame `port` under `facing`.
pub fn unrotate(port: Port, facing: Facing) -> Port {
    turn_n(port, facing.inverse().port_turns())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::strecke::ports::{location, ALL_PORTS, TILE_EXTENT};
    use std::collections::HashSet;

    #[test]
    fn test_identity() {
        for p in ALL_PORTS {
            assert_eq!(rotate(p, Facing::North), p);
            assert_eq!(unrotate(p, Facing::North), p);
        }
    }

    #[test]
    fn test_unrotate_inverts_rotate() {
        for p in ALL_PORTS {
            for f in ALL_FACINGS {
                assert_eq!(unrotate(rotate(p, f), f), p, "port {p:?} facing {f:?}");
                assert_eq!(rotate(unrotate(p, f), f), p, "port {p:?} facing {f:?}");
            }
        }
    }

    #[test]
    fn test_rotation_is_bijection() {
        for f in ALL_FACINGS {
            let image: HashSet<Port> = ALL_PORTS.iter().map(|&p| rotate(p, f)).collect();
            assert_eq!(image.len(), 8, "facing {f:?} collides");
        }
    }

    #[test]
    fn test_no_fixed_points_off_identity() {
        for p in ALL_PORTS {
            let orbit: HashSet<Port> = ALL_FACINGS.iter().map(|&f| rotate(p, f)).collect();
            assert_eq!(orbit.len(), 4);
            for f in [Facing::East, Facing::South, Facing::West] {
                assert_ne!(rotate(p, f), p);
            }
        }
    }

    #[test]
    fn test_group_laws() {
        for p in ALL_PORTS {
            assert_eq!(rotate(rotate(p, Facing::East), Facing::East), rotate(p, Facing::South));
            assert_eq!(rotate(rotate(p, Facing::South), Facing::East), rotate(p, Facing::West));
            let four = (0..4).fold(p, |q, _| rotate(q, Facing::East));
            assert_eq!(four, p);
        }
    }

    #[test]
    fn test_rotation_matches_coordinates() {
        // (x, y) -> (y, 99 - x) is an anticlockwise quarter turn in SVG
        // coordinates; West undoes it.
        for p in ALL_PORTS {
            let (x, y) = location(p);
            assert_eq!(location(rotate(p, Facing::East)), (y, TILE_EXTENT - x));
            assert_eq!(location(rotate(p, Facing::West)), (TILE_EXTENT - y, x));
            assert_eq!(location(turn_clockwise(p)), (TILE_EXTENT - y, x));
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(rotate(Port::A, Facing::East), Port::G);
        assert_eq!(rotate(Port::A, Facing::South), Port::E);
        assert_eq!(rotate(Port::A, Facing::West), Port::C);
        assert_eq!(unrotate(Port::G, Facing::East), Port::A);
        assert_eq!(unrotate(Port::F, Facing::East), Port::H);
        assert_eq!(rotate(Port::B, Facing::East), Port::H);
    }

    #[test]
    fn test_facing_cycle() {
        let mut f = Facing::North;
        for expected in [Facing::East, Facing::South, Facing::West, Facing::North] {
            f = f.turn_clockwise();
            assert_eq!(f, expected);
        }
        assert_eq!(Facing::East.inverse(), Facing::West);
        assert_eq!(Facing::South.inverse(), Facing::South);
    }

    #[test]
    fn test_parse_facing() {
        assert_eq!("East".parse::<Facing>().unwrap(), Facing::East);
        assert_eq!("w".parse::<Facing>().unwrap(), Facing::West);
        assert_eq!(
            "Up".parse::<Facing>(),
            Err(GeometryError::InvalidFacing("Up".into()))
        );
    }

    #[test]
    fn test_from_degrees() {
        assert_eq!(Facing::from_degrees(0).unwrap(), Facing::North);
        assert_eq!(Facing::from_degrees(270).unwrap(), Facing::West);
        assert_eq!(Facing::from_degrees(450).unwrap(), Facing::East);
        assert!(matches!(Facing::from_degrees(45), Err(GeometryError::InvalidFacing(_))));
        assert_eq!("180".parse::<Facing>().unwrap(), Facing::South);
        assert!("45".parse::<Facing>().is_err());
    }
}
