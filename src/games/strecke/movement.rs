//! Movement: stepping between cells, replaying recorded trails and following
//! track through played tiles.

use super::geometry::{find_connection, traverse};
use super::ports::{Direction, Port};
use super::rotation::{rotate, Facing};
use super::tiles::{Connection, Tile};
use super::types::{BoardSnapshot, CellState, PlacedTile, Position};
use crate::error::GeometryError;

/// Cell a player moves into next. Pure projection of the port's edge; says
/// nothing about whether a tile can be played there.
pub fn next_position(position: &Position) -> (i32, i32) {
    position.next_cell()
}

/// Next cell for a trail's current position, or `Eliminated` if the player
/// is out. An empty trail has nowhere to go.
pub fn advance(trail: &[Position]) -> Result<Option<(i32, i32)>, GeometryError> {
    match trail.last() {
        None => Ok(None),
        Some(pos) if !pos.alive => Err(GeometryError::Eliminated {
            row: pos.row,
            col: pos.col,
        }),
        Some(pos) => Ok(Some(pos.next_cell())),
    }
}

// --- Trail replay ---

/// The piece of track a player actually rode through one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversedSegment {
    pub row: i32,
    pub col: i32,
    pub facing: Facing,
    /// Tile-local connection, as declared on the tile.
    pub connection: Connection,
}

impl TraversedSegment {
    /// The connection rotated into the board frame.
    pub fn board_ports(&self) -> Connection {
        let (p0, p1) = self.connection;
        (rotate(p0, self.facing), rotate(p1, self.facing))
    }
}

/// Result of replaying one player's trail against the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrailReplay {
    pub segments: Vec<TraversedSegment>,
    /// Positions on occupied cells whose port matched no connection.
    pub skipped: usize,
    /// Where the player's token sits (last trail entry).
    pub current: Option<Position>,
    /// Cell the player moves into next; `None` once eliminated.
    pub next: Option<(i32, i32)>,
    /// Whether the trail begins on one of the grid's border pads.
    pub from_border: bool,
}

impl TrailReplay {
    pub fn is_alive(&self) -> bool {
        self.current.is_some_and(|p| p.alive)
    }
}

/// Reconstruct the track a player rode, one segment per occupied cell in the
/// trail. Positions on empty or off-board cells draw nothing. A position
/// that disagrees with its tile is skipped, never fatal.
pub fn replay_trail(board: &BoardSnapshot, trail: &[Position]) -> TrailReplay {
    let mut replay = TrailReplay::default();

    if let Some(first) = trail.first() {
        replay.from_border = is_border_start(first, board.rows(), board.cols());
        if !replay.from_border {
            tracing::debug!(row = first.row, col = first.col, port = %first.port, "trail does not start on a border pad");
        }
    }

    for pos in trail {
        let Some(placed) = board.tile_at(pos.row, pos.col) else {
            continue;
        };
        match find_connection(&placed.tile, placed.facing, pos.port) {
            Ok(connection) => replay.segments.push(TraversedSegment {
                row: pos.row,
                col: pos.col,
                facing: placed.facing,
                connection,
            }),
            Err(e) => {
                tracing::warn!(
                    row = pos.row,
                    col = pos.col,
                    port = %pos.port,
                    error = %e,
                    "skipping trail segment"
                );
                replay.skipped += 1;
            }
        }
    }

    replay.current = trail.last().copied();
    replay.next = replay
        .current
        .filter(|p| p.alive)
        .map(|p| p.next_cell());
    replay
}

/// Replay every player on the board. Players are independent: one bad trail
/// never affects the others.
pub fn replay_board(board: &BoardSnapshot) -> Vec<TrailReplay> {
    board
        .players
        .iter()
        .enumerate()
        .map(|(player, trail)| {
            tracing::debug_span!("replay", player).in_scope(|| replay_trail(board, trail))
        })
        .collect()
}

// --- Path following ---

fn max_steps(board: &BoardSnapshot) -> usize {
    // Each cell can be crossed at most once per connection.
    board.rows() * board.cols() * 4 + 1
}

fn walk<'a, L>(start: Position, lookup: L, limit: usize) -> Result<Vec<Position>, GeometryError>
where
    L: Fn(i32, i32) -> CellState<'a>,
{
    if !start.alive {
        return Err(GeometryError::Eliminated {
            row: start.row,
            col: start.col,
        });
    }
    let mut path = Vec::new();
    let mut pos = start;
    for _ in 0..limit {
        let entry = pos.step();
        match lookup(entry.row, entry.col) {
            CellState::OffBoard => {
                path.push(Position {
                    alive: false,
                    ..entry
                });
                return Ok(path);
            }
            CellState::Empty => return Ok(path),
            CellState::Occupied(placed) => {
                let exit = traverse(&placed.tile, placed.facing, entry.port)?;
                pos = Position {
                    port: exit,
                    ..entry
                };
                path.push(pos);
            }
        }
    }
    Err(GeometryError::PathTooLong(limit))
}

/// Follow the track from `start` through played tiles until reaching an
/// empty cell. Running off the grid appends a dead position on the border.
/// The returned positions do not include `start`.
pub fn follow_path(board: &BoardSnapshot, start: Position) -> Result<Vec<Position>, GeometryError> {
    walk(start, |r, c| board.cell_state(r, c), max_steps(board))
}

/// Where a player would end up if `tile` were played at their next cell
/// with `facing`. The track may loop back into the same cell, in which case
/// the hypothetical tile is crossed again.
pub fn preview_placement(
    board: &BoardSnapshot,
    trail: &[Position],
    tile: &Tile,
    facing: Facing,
) -> Result<Vec<Position>, GeometryError> {
    let Some(target) = advance(trail)? else {
        return Ok(Vec::new());
    };
    let Some(&start) = trail.last() else {
        return Ok(Vec::new());
    };
    let placed = PlacedTile {
        tile: tile.clone(),
        facing,
    };
    let lookup = |r: i32, c: i32| {
        if (r, c) == target && board.in_bounds(r, c) {
            CellState::Occupied(&placed)
        } else {
            board.cell_state(r, c)
        }
    };
    walk(start, lookup, max_steps(board))
}

// --- Starting positions ---

/// Every border pad a player can start from, clockwise from the top-left.
/// Each pad faces into the grid.
pub fn border_starts(rows: usize, cols: usize) -> Vec<Position> {
    let (rows, cols) = (rows as i32, cols as i32);
    let mut starts = Vec::with_capacity(4 * (rows + cols) as usize);
    let pads = |dir: Direction, row: i32, col: i32| -> [Position; 2] {
        // A pad on the top edge faces south, and so on.
        let [p0, p1] = dir.opposite().ports();
        [Position::new(row, col, p0), Position::new(row, col, p1)]
    };
    for col in 0..cols {
        starts.extend(pads(Direction::North, -1, col));
    }
    for row in 0..rows {
        starts.extend(pads(Direction::East, row, cols));
    }
    for col in (0..cols).rev() {
        starts.extend(pads(Direction::South, rows, col));
    }
    for row in (0..rows).rev() {
        starts.extend(pads(Direction::West, row, -1));
    }
    starts
}

/// Whether `pos` is a border pad facing into a `rows` x `cols` grid.
pub fn is_border_start(pos: &Position, rows: usize, cols: usize) -> bool {
    let (rows, cols) = (rows as i32, cols as i32);
    match pos.port {
        Port::A | Port::B => pos.row == rows && (0..cols).contains(&pos.col),
        Port::C | Port::D => pos.col == -1 && (0..rows).contains(&pos.row),
        Port::E | Port::F => pos.row == -1 && (0..cols).contains(&pos.col),
        Port::G | Port::H => pos.col == cols && (0..rows).contains(&pos.row),
    }
}
