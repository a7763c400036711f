//! Fixture generator for benchmarks.
//!
//! Plays deterministic random games and captures board snapshots at specific
//! placement counts. Run with:
//!
//!     cargo run --bin generate_fixtures

use std::fs;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use strecke_engine::games::strecke::movement::{advance, border_starts, follow_path};
use strecke_engine::games::strecke::rotation::ALL_FACINGS;
use strecke_engine::games::strecke::tiles::TILE_CATALOG;
use strecke_engine::games::strecke::types::{BoardSnapshot, PlacedTile, Position, BOARD_SIZE};

const SEEDS: [u64; 3] = [42, 123, 999];
const CHECKPOINTS: [usize; 3] = [4, 12, 24];
const PLAYERS: usize = 4;

/// Pull every living player along whatever track now lies ahead of them.
fn extend_trails(board: &mut BoardSnapshot) {
    let snapshot = board.clone();
    for (player, trail) in board.players.iter_mut().enumerate() {
        let Some(&last) = trail.last() else { continue };
        if !last.alive {
            continue;
        }
        match follow_path(&snapshot, last) {
            Ok(path) => trail.extend(path),
            Err(e) => tracing::warn!(player, error = %e, "could not extend trail"),
        }
    }
}

/// One placement for `player` at the cell ahead of them. Returns false when
/// the player cannot move.
fn play_turn(board: &mut BoardSnapshot, player: usize, rng: &mut StdRng) -> bool {
    let target = match advance(&board.players[player]) {
        Ok(Some(cell)) => cell,
        _ => return false,
    };
    let (row, col) = target;
    if !board.in_bounds(row, col) || board.tile_at(row, col).is_some() {
        return false;
    }
    let tile = TILE_CATALOG[rng.gen_range(0..TILE_CATALOG.len())].clone();
    let facing = ALL_FACINGS[rng.gen_range(0..ALL_FACINGS.len())];
    board.grid[row as usize][col as usize] = Some(PlacedTile { tile, facing });
    extend_trails(board);
    true
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
        .init();

    let fixtures_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("benches/fixtures");
    fs::create_dir_all(&fixtures_dir).expect("Failed to create fixtures directory");

    let mut total_generated = 0;

    for &seed in &SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = BoardSnapshot::empty(BOARD_SIZE, BOARD_SIZE);

        // One port per pad so no two players share a start.
        let pads: Vec<Vec<Position>> = border_starts(BOARD_SIZE, BOARD_SIZE)
            .chunks(2)
            .map(|pad| pad.to_vec())
            .collect();
        let chosen: Vec<&Vec<Position>> = pads.choose_multiple(&mut rng, PLAYERS).collect();
        board.players = chosen
            .into_iter()
            .filter_map(|pad| pad.choose(&mut rng).copied())
            .map(|start| vec![start])
            .collect();

        let mut remaining: Vec<usize> = CHECKPOINTS.to_vec();
        let mut placements = 0;
        let max_rounds = BOARD_SIZE * BOARD_SIZE;

        'game: for _ in 0..max_rounds {
            let mut moved = false;
            for player in 0..board.players.len() {
                if !play_turn(&mut board, player, &mut rng) {
                    continue;
                }
                moved = true;
                placements += 1;

                if let Some(pos) = remaining.iter().position(|&cp| cp == placements) {
                    let checkpoint = remaining.remove(pos);
                    let alive = board
                        .players
                        .iter()
                        .filter(|t| t.last().is_some_and(|p| p.alive))
                        .count();
                    let fixture = serde_json::json!({
                        "seed": seed,
                        "placements": checkpoint,
                        "alive": alive,
                        "board": board,
                    });

                    let filename = format!("board_{}_t{}.json", seed, checkpoint);
                    let path = fixtures_dir.join(&filename);
                    let json = serde_json::to_string_pretty(&fixture)
                        .expect("Failed to serialize fixture");
                    fs::write(&path, &json).expect("Failed to write fixture");

                    total_generated += 1;
                    tracing::info!(file = %filename, placements = checkpoint, alive, "generated fixture");
                }
                if remaining.is_empty() {
                    break 'game;
                }
            }
            if !moved {
                break;
            }
        }

        for cp in &remaining {
            tracing::warn!(seed, checkpoint = *cp, placements, "game ended before checkpoint");
        }
    }

    tracing::info!(count = total_generated, dir = %fixtures_dir.display(), "done");
}
