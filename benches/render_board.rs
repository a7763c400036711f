//! Criterion benchmarks for the replay and render hot path.
//!
//! Run with:
//!     cargo bench --bench render_board
//!
//! Extra fixtures are picked up from benches/fixtures when present:
//!     cargo run --bin generate_fixtures

use std::fs;
use std::path::PathBuf;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use strecke_engine::engine::render::render_board;
use strecke_engine::engine::render_profiles::RenderStyle;
use strecke_engine::games::strecke::movement::{border_starts, follow_path, replay_board};
use strecke_engine::games::strecke::rotation::ALL_FACINGS;
use strecke_engine::games::strecke::tiles::TILE_CATALOG;
use strecke_engine::games::strecke::types::{BoardSnapshot, PlacedTile, BOARD_SIZE};

struct Fixture {
    label: String,
    board: BoardSnapshot,
}

/// Every cell filled, eight players run off the edge.
fn full_board() -> BoardSnapshot {
    let mut board = BoardSnapshot::empty(BOARD_SIZE, BOARD_SIZE);
    for (i, cell) in board.grid.iter_mut().flatten().enumerate() {
        *cell = Some(PlacedTile {
            tile: TILE_CATALOG[i % TILE_CATALOG.len()].clone(),
            facing: ALL_FACINGS[i % ALL_FACINGS.len()],
        });
    }
    let starts = border_starts(BOARD_SIZE, BOARD_SIZE);
    let players = starts
        .iter()
        .step_by(6)
        .map(|&start| {
            let mut trail = vec![start];
            trail.extend(follow_path(&board, start).expect("full board path"));
            trail
        })
        .collect();
    board.players = players;
    board
}

fn load_fixtures() -> Vec<Fixture> {
    let mut fixtures = vec![Fixture {
        label: "full".into(),
        board: full_board(),
    }];

    let fixtures_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("benches/fixtures");
    let Ok(dir) = fs::read_dir(&fixtures_dir) else {
        return fixtures;
    };
    let mut entries: Vec<_> = dir
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let json_str = fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Failed to read fixture {:?}", path));
        let fixture_json: serde_json::Value =
            serde_json::from_str(&json_str).unwrap_or_else(|_| panic!("Invalid JSON in {:?}", path));
        let board: BoardSnapshot = serde_json::from_value(fixture_json["board"].clone())
            .unwrap_or_else(|_| panic!("Failed to decode board from {:?}", path));
        let seed = fixture_json["seed"].as_u64().unwrap_or(0);
        let placements = fixture_json["placements"].as_u64().unwrap_or(0);

        fixtures.push(Fixture {
            label: format!("s{}_t{}", seed, placements),
            board,
        });
    }

    fixtures
}

fn bench_replay_board(c: &mut Criterion) {
    let fixtures = load_fixtures();
    let mut group = c.benchmark_group("replay_board");

    for fixture in &fixtures {
        group.bench_with_input(
            BenchmarkId::new("replay", &fixture.label),
            &fixture.board,
            |b, board| b.iter(|| replay_board(board)),
        );
    }

    group.finish();
}

fn bench_render_board(c: &mut Criterion) {
    let fixtures = load_fixtures();
    let style = RenderStyle::default();
    let mut group = c.benchmark_group("render_board");

    for fixture in &fixtures {
        group.bench_with_input(
            BenchmarkId::new("draw_list", &fixture.label),
            &fixture.board,
            |b, board| b.iter(|| render_board(board, &style)),
        );
        group.bench_with_input(
            BenchmarkId::new("svg", &fixture.label),
            &fixture.board,
            |b, board| b.iter(|| render_board(board, &style).to_svg(&style)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_replay_board, bench_render_board);
criterion_main!(benches);
