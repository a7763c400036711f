//! Render bridge: turns board snapshots and hands into draw commands.
//!
//! Every path is expressed in its own cell's 0–99 frame (the tile viewBox).
//! `BoardDrawing::to_svg` composes the cells into one document; a browser
//! client can instead place each `d` string into its own per-cell `<svg>`.
//! Rendering is a pure function of its inputs and never fails outright:
//! geometry errors drop the affected element and are logged.

use std::fmt::Write as _;

use serde::Serialize;

use super::render_profiles::{CurveStyle, RenderStyle};
use crate::games::strecke::geometry::drawable_segments;
use crate::games::strecke::movement::{border_starts, preview_placement, replay_board};
use crate::games::strecke::ports::{location, Direction, Port, TILE_EXTENT};
use crate::games::strecke::rotation::Facing;
use crate::games::strecke::tiles::{Connection, Tile};
use crate::games::strecke::types::{BoardSnapshot, Hand};

/// Pixel pitch between cells in the composed SVG.
pub const CELL_PITCH: i32 = TILE_EXTENT + 1;

// --- Draw commands ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TilePath {
    pub row: i32,
    pub col: i32,
    pub facing: Facing,
    pub d: String,
}

/// The part of the track a player has ridden, highlighted in their colour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrailPath {
    pub player: usize,
    pub color: String,
    pub row: i32,
    pub col: i32,
    pub d: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub player: usize,
    pub color: String,
    pub row: i32,
    pub col: i32,
    pub x: i32,
    pub y: i32,
    pub alive: bool,
}

/// Short track stubs on a border pad marking where players can enter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BorderStub {
    pub row: i32,
    pub col: i32,
    pub d: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardDrawing {
    pub rows: usize,
    pub cols: usize,
    pub tiles: Vec<TilePath>,
    pub trails: Vec<TrailPath>,
    pub tokens: Vec<Token>,
    pub borders: Vec<BorderStub>,
    /// Trail positions that could not be matched to their tile.
    pub skipped_segments: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandTileDrawing {
    pub index: usize,
    pub facing: Facing,
    pub d: String,
    /// Whether the player stays on the board if this tile is played as
    /// shown. `None` when no board was given or the preview failed.
    pub survives: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandDrawing {
    pub username: String,
    pub board_index: usize,
    pub color: String,
    pub tiles: Vec<HandTileDrawing>,
}

// --- Path data ---

/// Control point a third of the way into the tile, straight in from a port.
fn control_point(port: Port) -> (i32, i32) {
    let (x, y) = location(port);
    let inset = TILE_EXTENT / 3;
    match port.side() {
        Direction::West => (inset, y),
        Direction::East => (TILE_EXTENT - inset, y),
        Direction::North => (x, inset),
        Direction::South => (x, TILE_EXTENT - inset),
    }
}

/// SVG path data for one connection between two board-frame ports.
pub fn connection_path(p0: Port, p1: Port, curve: CurveStyle) -> String {
    let (x0, y0) = location(p0);
    let (x1, y1) = location(p1);
    match curve {
        CurveStyle::Cubic => {
            let (cx0, cy0) = control_point(p0);
            let (cx1, cy1) = control_point(p1);
            format!("M{x0} {y0} C{cx0} {cy0} {cx1} {cy1} {x1} {y1}")
        }
        CurveStyle::Quadratic => {
            let mid = f64::from(TILE_EXTENT) / 2.0;
            format!("M{x0} {y0} Q{mid} {mid} {x1} {y1}")
        }
    }
}

pub fn segments_path(segments: &[Connection], curve: CurveStyle) -> String {
    segments
        .iter()
        .map(|&(p0, p1)| connection_path(p0, p1, curve))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Path data for a whole tile drawn at `facing`.
pub fn tile_path(tile: &Tile, facing: Facing, curve: CurveStyle) -> String {
    segments_path(&drawable_segments(tile, facing), curve)
}

/// Stub running `length` units inward from a port.
fn stub_path(port: Port, length: i32) -> String {
    let (x, y) = location(port);
    match port.side() {
        Direction::West => format!("M{x} {y} h{length}"),
        Direction::East => format!("M{x} {y} h-{length}"),
        Direction::North => format!("M{x} {y} v{length}"),
        Direction::South => format!("M{x} {y} v-{length}"),
    }
}

// --- Board ---

/// Full draw list for one board snapshot.
pub fn render_board(board: &BoardSnapshot, style: &RenderStyle) -> BoardDrawing {
    if let Err(e) = board.validate() {
        tracing::warn!(error = %e, "rendering malformed grid");
    }

    let tiles = board
        .placed_tiles()
        .map(|(row, col, placed)| TilePath {
            row,
            col,
            facing: placed.facing,
            d: tile_path(&placed.tile, placed.facing, style.curve),
        })
        .collect();

    let mut trails = Vec::new();
    let mut tokens = Vec::new();
    let mut skipped_segments = 0;
    for (player, replay) in replay_board(board).into_iter().enumerate() {
        let color = style.player_color(player).to_string();
        skipped_segments += replay.skipped;
        for seg in &replay.segments {
            trails.push(TrailPath {
                player,
                color: color.clone(),
                row: seg.row,
                col: seg.col,
                d: segments_path(&[seg.board_ports()], style.curve),
            });
        }
        if let Some(pos) = replay.current {
            let (x, y) = location(pos.port);
            tokens.push(Token {
                player,
                color,
                row: pos.row,
                col: pos.col,
                x,
                y,
                alive: pos.alive,
            });
        }
    }

    let borders = border_starts(board.rows(), board.cols())
        .chunks(2)
        .map(|pad| BorderStub {
            row: pad[0].row,
            col: pad[0].col,
            d: pad
                .iter()
                .map(|p| stub_path(p.port, style.border_stub))
                .collect::<Vec<_>>()
                .join(" "),
        })
        .collect();

    BoardDrawing {
        rows: board.rows(),
        cols: board.cols(),
        tiles,
        trails,
        tokens,
        borders,
        skipped_segments,
    }
}

// --- Hand ---

/// Draw list for a hand, each tile at its transient facing. With a board,
/// also previews whether each placement keeps the player alive.
pub fn render_hand(hand: &Hand, style: &RenderStyle, board: Option<&BoardSnapshot>) -> HandDrawing {
    let trail = board.and_then(|b| b.players.get(hand.board_index).map(|t| (b, t)));
    let tiles = hand
        .tiles_in_hand
        .iter()
        .enumerate()
        .map(|(index, tile)| {
            let facing = hand.facing(index);
            let survives = trail.and_then(|(b, t)| match preview_placement(b, t, tile, facing) {
                Ok(path) => Some(path.last().map_or(true, |p| p.alive)),
                Err(e) => {
                    tracing::debug!(index, error = %e, "no placement preview");
                    None
                }
            });
            HandTileDrawing {
                index,
                facing,
                d: tile_path(tile, facing, style.curve),
                survives,
            }
        })
        .collect();

    HandDrawing {
        username: hand.username.clone(),
        board_index: hand.board_index,
        color: style.player_color(hand.board_index).to_string(),
        tiles,
    }
}

// --- SVG document ---

/// Top-left corner of a cell in the composed document. Border pads sit at
/// row/col -1, so everything shifts by one cell.
fn cell_origin(row: i32, col: i32) -> (i32, i32) {
    ((col + 1) * CELL_PITCH, (row + 1) * CELL_PITCH)
}

impl BoardDrawing {
    /// Standalone SVG document of the whole board, border pads included.
    pub fn to_svg(&self, style: &RenderStyle) -> String {
        let width = (self.cols as i32 + 2) * CELL_PITCH;
        let height = (self.rows as i32 + 2) * CELL_PITCH;
        let track = format!(
            r#"fill="none" stroke="{}" stroke-width="{}""#,
            style.track_color, style.track_width
        );

        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}">"#
        );
        let _ = writeln!(
            out,
            r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
            style.background
        );

        for stub in &self.borders {
            let (ox, oy) = cell_origin(stub.row, stub.col);
            let _ = writeln!(
                out,
                r#"<path class="pad" transform="translate({ox} {oy})" d="{}" {track}/>"#,
                stub.d
            );
        }

        for row in 0..self.rows as i32 {
            for col in 0..self.cols as i32 {
                let (ox, oy) = cell_origin(row, col);
                let _ = writeln!(
                    out,
                    r##"<rect class="cell" x="{ox}" y="{oy}" width="{TILE_EXTENT}" height="{TILE_EXTENT}" fill="#fff" stroke="#ccc"/>"##
                );
            }
        }

        for tile in &self.tiles {
            let (ox, oy) = cell_origin(tile.row, tile.col);
            let _ = writeln!(
                out,
                r#"<path class="tile {}" transform="translate({ox} {oy})" d="{}" {track}/>"#,
                tile.facing, tile.d
            );
        }

        for trail in &self.trails {
            let (ox, oy) = cell_origin(trail.row, trail.col);
            let _ = writeln!(
                out,
                r#"<path class="trail p{}" transform="translate({ox} {oy})" d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round"/>"#,
                trail.player, trail.d, trail.color, style.trail_width
            );
        }

        for token in &self.tokens {
            let (ox, oy) = cell_origin(token.row, token.col);
            let (cx, cy) = (ox + token.x, oy + token.y);
            let paint = if token.alive {
                format!(r#"fill="{}""#, token.color)
            } else {
                format!(r#"fill="none" stroke="{}" stroke-width="2""#, token.color)
            };
            let _ = writeln!(
                out,
                r#"<circle class="token p{}" cx="{cx}" cy="{cy}" r="{}" {paint}/>"#,
                token.player, style.token_radius
            );
        }

        out.push_str("</svg>\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::strecke::types::{PlacedTile, Position, BOARD_SIZE};
    use crate::games::strecke::tiles::TILE_CATALOG;
    use Port::*;

    fn scenario_board() -> BoardSnapshot {
        let mut board = BoardSnapshot::empty(BOARD_SIZE, BOARD_SIZE);
        board.grid[0][0] = Some(PlacedTile {
            tile: Tile::new(vec![(A, E)]).unwrap(),
            facing: Facing::North,
        });
        board.players = vec![vec![Position::new(0, 0, A)]];
        board
    }

    #[test]
    fn test_cubic_path_matches_tile_viewbox() {
        assert_eq!(
            connection_path(A, E, CurveStyle::Cubic),
            "M33 0 C33 33 66 66 66 99"
        );
        assert_eq!(
            connection_path(H, C, CurveStyle::Cubic),
            "M0 33 C33 33 66 33 99 33"
        );
    }

    #[test]
    fn test_quadratic_path_through_centre() {
        assert_eq!(
            connection_path(G, B, CurveStyle::Quadratic),
            "M0 66 Q49.5 49.5 66 0"
        );
    }

    #[test]
    fn test_tile_path_uses_facing() {
        let t = Tile::new(vec![(A, E)]).unwrap();
        // East lays A on G and E on C.
        assert_eq!(
            tile_path(&t, Facing::East, CurveStyle::Cubic),
            connection_path(G, C, CurveStyle::Cubic)
        );
        let full = tile_path(&TILE_CATALOG[0], Facing::North, CurveStyle::Cubic);
        assert_eq!(full.matches('M').count(), 4);
    }

    #[test]
    fn test_render_scenario() {
        let style = RenderStyle::default();
        let drawing = render_board(&scenario_board(), &style);
        assert_eq!(drawing.tiles.len(), 1);
        assert_eq!(drawing.trails.len(), 1);
        assert_eq!(drawing.trails[0].d, connection_path(A, E, style.curve));
        assert_eq!(drawing.trails[0].color, "red");
        assert_eq!(
            drawing.tokens,
            vec![Token {
                player: 0,
                color: "red".into(),
                row: 0,
                col: 0,
                x: 33,
                y: 0,
                alive: true,
            }]
        );
        assert_eq!(drawing.borders.len(), 24);
        assert_eq!(drawing.skipped_segments, 0);
    }

    #[test]
    fn test_render_is_idempotent() {
        let style = RenderStyle::default();
        let board = scenario_board();
        assert_eq!(render_board(&board, &style), render_board(&board, &style));
    }

    #[test]
    fn test_bad_trail_degrades_not_fails() {
        let mut board = scenario_board();
        board.players.push(vec![Position::new(0, 0, C)]);
        let drawing = render_board(&board, &RenderStyle::default());
        assert_eq!(drawing.skipped_segments, 1);
        assert_eq!(drawing.trails.len(), 1);
        // Both players still get a token.
        assert_eq!(drawing.tokens.len(), 2);
    }

    #[test]
    fn test_border_stubs_point_inward() {
        let drawing = render_board(&BoardSnapshot::empty(2, 2), &RenderStyle::default());
        let top = drawing.borders.iter().find(|b| b.row == -1 && b.col == 0).unwrap();
        assert_eq!(top.d, "M66 99 v-10 M33 99 v-10");
        let left = drawing.borders.iter().find(|b| b.col == -1 && b.row == 1).unwrap();
        assert_eq!(left.d, "M99 33 h-10 M99 66 h-10");
    }

    #[test]
    fn test_render_hand_with_preview() {
        let board = {
            let mut b = BoardSnapshot::empty(BOARD_SIZE, BOARD_SIZE);
            b.players = vec![vec![Position::new(6, 0, A)]];
            b
        };
        // Two straights carry the player up at any facing; (F,G) runs off
        // the left edge.
        let safe = Tile::new(vec![(A, F), (B, E)]).unwrap();
        let deadly = Tile::new(vec![(F, G)]).unwrap();
        let mut hand = Hand::new(0, "cj", vec![safe, deadly]);
        hand.rotate_tile(0);
        hand.rotate_tile(0);

        let drawing = render_hand(&hand, &RenderStyle::default(), Some(&board));
        assert_eq!(drawing.username, "cj");
        assert_eq!(drawing.color, "red");
        assert_eq!(drawing.tiles[0].facing, Facing::South);
        assert_eq!(drawing.tiles[0].survives, Some(true));
        assert_eq!(drawing.tiles[1].survives, Some(false));

        let no_board = render_hand(&hand, &RenderStyle::default(), None);
        assert!(no_board.tiles.iter().all(|t| t.survives.is_none()));
    }

    #[test]
    fn test_svg_document() {
        let style = RenderStyle::default();
        let svg = render_board(&scenario_board(), &style).to_svg(&style);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"viewBox="0 0 800 800""#));
        assert!(svg.contains(r#"class="tile North" transform="translate(100 100)""#));
        assert!(svg.contains(r#"<circle class="token p0" cx="133" cy="100""#));
        assert_eq!(svg.matches("class=\"pad\"").count(), 24);
    }
}
