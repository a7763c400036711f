//! Error type shared by the geometry core and the render bridge.

use thiserror::Error;

use crate::games::strecke::ports::Port;
use crate::games::strecke::rotation::Facing;

pub type Result<T> = std::result::Result<T, GeometryError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("invalid facing: '{0}'")]
    InvalidFacing(String),

    #[error("unknown port: '{0}'")]
    UnknownPort(String),

    /// The trail and the grid disagree about which track the player is on.
    #[error("no connection touches local port {local:?} (board port {board_port:?}, facing {facing:?})")]
    NoMatchingConnection {
        board_port: Port,
        facing: Facing,
        local: Port,
    },

    #[error("port {0:?} appears in more than one connection")]
    BranchingPort(Port),

    #[error("connection joins port {0:?} to itself")]
    SelfLoop(Port),

    #[error("grid row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("trail ends with an eliminated position at ({row}, {col})")]
    Eliminated { row: i32, col: i32 },

    #[error("path exceeded {0} steps without stopping")]
    PathTooLong(usize),
}
