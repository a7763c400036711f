//! Tile geometry: rotated connections and connection lookup by port.

use super::ports::Port;
use super::rotation::{rotate, unrotate, Facing};
use super::tiles::{Connection, Tile};
use crate::error::GeometryError;

/// A tile's connections rotated into the board frame, ready to draw.
pub fn drawable_segments(tile: &Tile, facing: Facing) -> Vec<Connection> {
    tile.connections()
        .iter()
        .map(|&(p0, p1)| (rotate(p0, facing), rotate(p1, facing)))
        .collect()
}

/// The connection (tile-local frame) running through board-frame `board_port`.
///
/// Tiles carry at most four connections, so a linear scan is all it takes.
pub fn find_connection(
    tile: &Tile,
    facing: Facing,
    board_port: Port,
) -> Result<Connection, GeometryError> {
    let local = unrotate(board_port, facing);
    tile.connections()
        .iter()
        .copied()
        .find(|&(p0, p1)| p0 == local || p1 == local)
        .ok_or(GeometryError::NoMatchingConnection {
            board_port,
            facing,
            local,
        })
}

/// Board-frame port at the far end of the track entered through `entry`.
pub fn traverse(tile: &Tile, facing: Facing, entry: Port) -> Result<Port, GeometryError> {
    let (p0, p1) = find_connection(tile, facing, entry)?;
    let local = unrotate(entry, facing);
    let exit = if p0 == local { p1 } else { p0 };
    Ok(rotate(exit, facing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::strecke::rotation::ALL_FACINGS;
    use crate::games::strecke::tiles::TILE_CATALOG;
    use Port::*;

    fn single(p0: Port, p1: Port) -> Tile {
        Tile::new(vec![(p0, p1)]).unwrap()
    }

    #[test]
    fn test_find_connection_north() {
        let t = single(A, E);
        assert_eq!(find_connection(&t, Facing::North, A).unwrap(), (A, E));
        assert_eq!(find_connection(&t, Facing::North, E).unwrap(), (A, E));
    }

    #[test]
    fn test_find_connection_east_unrotates() {
        let t = single(A, E);
        let segs = drawable_segments(&t, Facing::East);
        assert_eq!(segs, vec![(rotate(A, Facing::East), rotate(E, Facing::East))]);
        assert_eq!(
            find_connection(&t, Facing::East, rotate(A, Facing::East)).unwrap(),
            (A, E)
        );
    }

    #[test]
    fn test_find_connection_missing() {
        let t = single(A, E);
        let err = find_connection(&t, Facing::South, B).unwrap_err();
        assert_eq!(
            err,
            GeometryError::NoMatchingConnection {
                board_port: B,
                facing: Facing::South,
                local: F,
            }
        );
    }

    #[test]
    fn test_empty_tile_has_no_segments() {
        let t = Tile::new(vec![]).unwrap();
        assert!(drawable_segments(&t, Facing::West).is_empty());
        assert!(find_connection(&t, Facing::North, A).is_err());
    }

    #[test]
    fn test_drawable_segments_keep_pairing() {
        let t = &TILE_CATALOG[7];
        for f in ALL_FACINGS {
            let segs = drawable_segments(t, f);
            assert_eq!(segs.len(), t.connections().len());
            for (&(p0, p1), &(q0, q1)) in t.connections().iter().zip(&segs) {
                assert_eq!(unrotate(q0, f), p0);
                assert_eq!(unrotate(q1, f), p1);
            }
        }
    }

    #[test]
    fn test_traverse_both_directions() {
        let t = Tile::new(vec![(A, D), (B, G), (C, F), (E, H)]).unwrap();
        assert_eq!(traverse(&t, Facing::North, A).unwrap(), D);
        assert_eq!(traverse(&t, Facing::North, D).unwrap(), A);
        // East: local (A, D) sits on board ports (G, B).
        assert_eq!(traverse(&t, Facing::East, G).unwrap(), B);
        assert_eq!(traverse(&t, Facing::East, B).unwrap(), G);
    }

    #[test]
    fn test_traverse_is_involution_for_catalog() {
        for t in TILE_CATALOG.iter() {
            for f in ALL_FACINGS {
                for p in crate::games::strecke::ports::ALL_PORTS {
                    let exit = traverse(t, f, p).unwrap();
                    assert_ne!(exit, p);
                    assert_eq!(traverse(t, f, exit).unwrap(), p);
                }
            }
        }
    }
}
