//! Geometry engine for the Strecke railway tile game.
//!
//! `games::strecke` holds the pure core (ports, rotation, tiles, movement);
//! `engine` turns board snapshots into draw commands for a client.

pub mod engine;
pub mod error;
pub mod games;
