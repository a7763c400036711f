//! Board snapshot types. Field names follow the server's JSON.

use serde::{Deserialize, Serialize};

use super::ports::Port;
use super::rotation::Facing;
use super::tiles::Tile;
use crate::error::GeometryError;

/// Side length of the standard square board.
pub const BOARD_SIZE: usize = 6;

// --- Position ---

/// Where a player sits: a cell and the board-frame port they left it through.
///
/// Border pads lie one step outside the grid, so `row`/`col` may be `-1` or
/// equal to the grid size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
    pub port: Port,
    #[serde(default = "default_alive")]
    pub alive: bool,
}

fn default_alive() -> bool {
    true
}

impl Position {
    pub fn new(row: i32, col: i32, port: Port) -> Self {
        Self {
            row,
            col,
            port,
            alive: true,
        }
    }

    /// The cell on the other side of this position's port.
    pub fn next_cell(self) -> (i32, i32) {
        let (d_row, d_col) = self.port.side().grid_offsets();
        (self.row + d_row, self.col + d_col)
    }

    /// Step across the edge: the neighbouring cell, entered through the
    /// port that touches the same boundary point.
    pub fn step(self) -> Position {
        let (row, col) = self.next_cell();
        Position {
            row,
            col,
            port: self.port.flip(),
            alive: self.alive,
        }
    }
}

/// A player's full history, oldest first. The last entry is where they are now.
pub type Trail = Vec<Position>;

// --- Grid ---

/// A tile on the board together with the facing it was played at.
/// Serialized as a `[tile, facing]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Tile, Facing)", into = "(Tile, Facing)")]
pub struct PlacedTile {
    pub tile: Tile,
    pub facing: Facing,
}

impl From<(Tile, Facing)> for PlacedTile {
    fn from((tile, facing): (Tile, Facing)) -> Self {
        Self { tile, facing }
    }
}

impl From<PlacedTile> for (Tile, Facing) {
    fn from(placed: PlacedTile) -> Self {
        (placed.tile, placed.facing)
    }
}

pub type Cell = Option<PlacedTile>;

/// What lies at a grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState<'a> {
    OffBoard,
    Empty,
    Occupied(&'a PlacedTile),
}

/// Everything the core needs to draw one frame: the played grid and every
/// player's trail, indexed by board index.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub grid: Vec<Vec<Cell>>,
    #[serde(default)]
    pub players: Vec<Trail>,
}

impl BoardSnapshot {
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            grid: vec![vec![None; cols]; rows],
            players: Vec::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    pub fn cols(&self) -> usize {
        self.grid.first().map_or(0, Vec::len)
    }

    /// Check the grid is rectangular.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let expected = self.cols();
        for (row, cells) in self.grid.iter().enumerate() {
            if cells.len() != expected {
                return Err(GeometryError::RaggedGrid {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
        }
        Ok(())
    }

    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows() && (col as usize) < self.cols()
    }

    pub fn cell_state(&self, row: i32, col: i32) -> CellState<'_> {
        if row < 0 || col < 0 {
            return CellState::OffBoard;
        }
        match self.grid.get(row as usize).and_then(|r| r.get(col as usize)) {
            None => CellState::OffBoard,
            Some(None) => CellState::Empty,
            Some(Some(placed)) => CellState::Occupied(placed),
        }
    }

    pub fn tile_at(&self, row: i32, col: i32) -> Option<&PlacedTile> {
        match self.cell_state(row, col) {
            CellState::Occupied(placed) => Some(placed),
            _ => None,
        }
    }

    /// Occupied cells in row-major order.
    pub fn placed_tiles(&self) -> impl Iterator<Item = (i32, i32, &PlacedTile)> + '_ {
        self.grid.iter().enumerate().flat_map(|(r, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(c, cell)| cell.as_ref().map(|p| (r as i32, c as i32, p)))
        })
    }
}

// --- Hand ---

/// A player's unplayed tiles. The per-tile facing is picked in the UI before
/// playing and never leaves the client.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hand {
    pub board_index: usize,
    pub username: String,
    pub tiles_in_hand: Vec<Tile>,
    #[serde(skip)]
    facings: Vec<Facing>,
}

impl Hand {
    pub fn new(board_index: usize, username: impl Into<String>, tiles: Vec<Tile>) -> Self {
        Self {
            board_index,
            username: username.into(),
            tiles_in_hand: tiles,
            facings: Vec::new(),
        }
    }

    pub fn facing(&self, idx: usize) -> Facing {
        self.facings.get(idx).copied().unwrap_or_default()
    }

    pub fn set_facing(&mut self, idx: usize, facing: Facing) {
        if idx >= self.tiles_in_hand.len() {
            return;
        }
        if self.facings.len() <= idx {
            self.facings.resize(idx + 1, Facing::North);
        }
        self.facings[idx] = facing;
    }

    /// Turn one tile a quarter clockwise. Returns the new facing, or `None`
    /// if there is no tile at `idx`.
    pub fn rotate_tile(&mut self, idx: usize) -> Option<Facing> {
        if idx >= self.tiles_in_hand.len() {
            return None;
        }
        let facing = self.facing(idx).turn_clockwise();
        self.set_facing(idx, facing);
        Some(facing)
    }

    /// Replace the tiles (e.g. after an update), resetting all facings.
    pub fn replace_tiles(&mut self, tiles: Vec<Tile>) {
        self.tiles_in_hand = tiles;
        self.facings.clear();
    }
}
