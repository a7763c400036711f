//! Client view state, rebuilt from each push message in arrival order.
//!
//! `ViewState` is an immutable value: applying a message returns a new state
//! and leaves the old one untouched. Ordering is the transport's job; the
//! only rule enforced here is that nothing overrides a finished game.

use serde::Serialize;

use super::models::{PushMessage, TurnInfo};
use super::render::{render_board, render_hand, BoardDrawing, HandDrawing};
use super::render_profiles::RenderStyle;
use crate::games::strecke::tiles::Tile;
use crate::games::strecke::types::{BoardSnapshot, Hand};

/// Who is looking at the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub username: String,
    pub board_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub seat: Seat,
    pub game_id: Option<i64>,
    pub board: Option<BoardSnapshot>,
    pub hand: Option<Hand>,
    /// The placement behind the latest board, when the server reported it.
    pub last_turn: Option<TurnInfo>,
    pub is_over: bool,
    pub is_winner: bool,
    /// Messages applied so far, ignored ones included.
    pub messages_seen: u64,
}

/// Everything the client draws for one view state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub game_id: Option<i64>,
    pub board: Option<BoardDrawing>,
    pub hand: Option<HandDrawing>,
    pub last_turn: Option<TurnInfo>,
    pub is_over: bool,
    pub is_winner: bool,
}

impl ViewState {
    pub fn new(username: impl Into<String>, board_index: usize) -> Self {
        Self {
            seat: Seat {
                username: username.into(),
                board_index,
            },
            game_id: None,
            board: None,
            hand: None,
            last_turn: None,
            is_over: false,
            is_winner: false,
            messages_seen: 0,
        }
    }

    /// State after `message`. Snapshots replace the board wholesale.
    pub fn apply(&self, message: PushMessage) -> ViewState {
        let mut next = self.clone();
        next.messages_seen += 1;

        if self.is_over {
            tracing::warn!(kind = message.kind(), "ignoring message after game over");
            return next;
        }

        match message {
            PushMessage::Start { game_id, url } => {
                tracing::debug!(?game_id, ?url, "game started");
                if game_id.is_some() {
                    next.game_id = game_id;
                }
            }
            PushMessage::Update {
                board,
                hand,
                turn,
                is_over,
                is_winner,
            } => {
                next.board = Some(board);
                next.hand = hand.map(|tiles| self.rebuild_hand(tiles));
                next.last_turn = turn;
                next.is_over = is_over;
                next.is_winner = is_winner;
            }
            PushMessage::Turn {
                board,
                hand,
                turn,
                is_over,
                is_winner,
            } => {
                tracing::debug!(row = turn.pos.row, col = turn.pos.col, facing = %turn.facing, "turn taken");
                next.board = Some(board);
                next.hand = hand.map(|tiles| self.rebuild_hand(tiles));
                next.last_turn = Some(turn);
                next.is_over = is_over;
                next.is_winner = is_winner;
            }
            PushMessage::GameOver {
                board,
                is_winner,
                winner,
            } => {
                let is_winner = is_winner || winner.as_deref() == Some(self.seat.username.as_str());
                tracing::info!(is_winner, ?winner, "game over");
                next.board = Some(board);
                next.hand = None;
                next.is_over = true;
                next.is_winner = is_winner;
            }
            PushMessage::Error { message } => {
                tracing::warn!(%message, "server rejected the last action");
            }
        }
        next
    }

    /// Fold a sequence of messages, in order, starting from `self`.
    pub fn apply_all<I>(&self, messages: I) -> ViewState
    where
        I: IntoIterator<Item = PushMessage>,
    {
        messages
            .into_iter()
            .fold(self.clone(), |state, msg| state.apply(msg))
    }

    /// Keep the player's chosen facings when the hand comes back unchanged.
    fn rebuild_hand(&self, tiles: Vec<Tile>) -> Hand {
        match &self.hand {
            Some(prev) if prev.tiles_in_hand == tiles => prev.clone(),
            Some(prev) => {
                let mut hand = prev.clone();
                hand.replace_tiles(tiles);
                hand
            }
            None => Hand::new(self.seat.board_index, self.seat.username.clone(), tiles),
        }
    }

    pub fn render(&self, style: &RenderStyle) -> Frame {
        Frame {
            game_id: self.game_id,
            board: self.board.as_ref().map(|b| render_board(b, style)),
            hand: self
                .hand
                .as_ref()
                .map(|h| render_hand(h, style, self.board.as_ref())),
            last_turn: self.last_turn.clone(),
            is_over: self.is_over,
            is_winner: self.is_winner,
        }
    }
}
