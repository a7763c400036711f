//! Push-channel message shapes delivered by the game server.
//!
//! Updates always carry a whole board, never deltas.

use serde::{Deserialize, Serialize};

use crate::games::strecke::rotation::Facing;
use crate::games::strecke::tiles::Tile;
use crate::games::strecke::types::{BoardSnapshot, Position};

/// The turn that produced an update, as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnInfo {
    pub tile: Tile,
    pub pos: Position,
    pub facing: Facing,
}

/// A message on the game's push channel.
///
/// The game server tags messages in snake_case or in the variant's own
/// casing (`"Update"`, `"GameOver"`); both are accepted. The per-turn
/// message from the game API carries no tag at all and lands in `Turn`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PushMessage {
    #[serde(alias = "Start")]
    Start {
        #[serde(default)]
        game_id: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
    #[serde(alias = "Update")]
    Update {
        board: BoardSnapshot,
        #[serde(default)]
        hand: Option<Vec<Tile>>,
        #[serde(default)]
        turn: Option<TurnInfo>,
        #[serde(default)]
        is_over: bool,
        #[serde(default)]
        is_winner: bool,
    },
    #[serde(alias = "GameOver")]
    GameOver {
        board: BoardSnapshot,
        #[serde(default)]
        is_winner: bool,
        /// Username of the winner; empty when everyone lost.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        winner: Option<String>,
    },
    #[serde(alias = "Error")]
    Error { message: String },
    #[serde(untagged)]
    Turn {
        board: BoardSnapshot,
        #[serde(default)]
        hand: Option<Vec<Tile>>,
        turn: TurnInfo,
        #[serde(default)]
        is_over: bool,
        #[serde(default)]
        is_winner: bool,
    },
}

impl PushMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            PushMessage::Start { .. } => "start",
            PushMessage::Update { .. } => "update",
            PushMessage::GameOver { .. } => "game_over",
            PushMessage::Error { .. } => "error",
            PushMessage::Turn { .. } => "turn",
        }
    }

    pub fn board(&self) -> Option<&BoardSnapshot> {
        match self {
            PushMessage::Start { .. } | PushMessage::Error { .. } => None,
            PushMessage::Update { board, .. }
            | PushMessage::GameOver { board, .. }
            | PushMessage::Turn { board, .. } => Some(board),
        }
    }
}
