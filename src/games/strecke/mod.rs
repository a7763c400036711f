//! Strecke: a railway tile-laying game played on a square grid.
//!
//! Tiles carry four tracks joining the eight ports around their edge.
//! Players ride the track from the border inward; a player whose track runs
//! off the grid is out.

pub mod geometry;
pub mod movement;
pub mod ports;
pub mod rotation;
pub mod tiles;
pub mod types;
