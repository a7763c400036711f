use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use strecke_engine::engine::models::PushMessage;
use strecke_engine::engine::render::{render_board, render_hand};
use strecke_engine::engine::render_profiles::{load_default_profiles, load_profiles};
use strecke_engine::engine::view::{Frame, ViewState};
use strecke_engine::games::strecke::rotation::Facing;
use strecke_engine::games::strecke::types::{BoardSnapshot, Hand};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Svg,
    Json,
}

#[derive(Parser)]
#[command(name = "strecke-render", about = "Render Strecke board snapshots")]
struct Cli {
    /// Board snapshot JSON, or push messages with --messages ("-" for stdin)
    #[arg(default_value = "-")]
    input: String,

    /// Treat the input as JSON lines of push messages
    #[arg(long)]
    messages: bool,

    /// Username of the viewing seat (with --messages)
    #[arg(long, default_value = "player")]
    username: String,

    /// Board index of the viewing seat
    #[arg(long, default_value_t = 0)]
    board_index: usize,

    /// Hand JSON to draw alongside a snapshot
    #[arg(long)]
    hand: Option<PathBuf>,

    /// Comma-separated facings for the hand tiles, e.g. "north,east" or "0,90"
    #[arg(long, value_delimiter = ',')]
    facings: Vec<Facing>,

    #[arg(long, value_enum, default_value = "svg")]
    format: Format,

    /// Write here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to render_profiles.toml (default: auto-discover)
    #[arg(long, env = "STRECKE_RENDER_PROFILES")]
    profiles: Option<PathBuf>,

    /// Profile name to render with
    #[arg(long, env = "STRECKE_RENDER_PROFILE")]
    profile: Option<String>,
}

fn read_input(input: &str) -> io::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(input)
    }
}

fn read_messages(text: &str) -> Vec<PushMessage> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(n, line)| match serde_json::from_str(line) {
            Ok(msg) => Some(msg),
            Err(e) => {
                tracing::warn!(line = n + 1, error = %e, "skipping malformed message");
                None
            }
        })
        .collect()
}

fn load_hand(path: &Path, cli: &Cli) -> Result<Hand, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read hand {}: {}", path.display(), e))?;
    let mut hand: Hand = serde_json::from_str(&text)?;
    for (idx, &facing) in cli.facings.iter().enumerate() {
        hand.set_facing(idx, facing);
    }
    Ok(hand)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    let profiles = match cli.profiles {
        Some(ref path) => {
            load_profiles(path).map_err(|e| format!("Failed to load profiles: {}", e))?
        }
        None => load_default_profiles(),
    };
    let style = profiles.resolve(cli.profile.as_deref());

    let text = read_input(&cli.input)?;
    let frame = if cli.messages {
        let messages = read_messages(&text);
        tracing::info!(count = messages.len(), "folding push messages");
        let mut state =
            ViewState::new(cli.username.clone(), cli.board_index).apply_all(messages);
        if let Some(hand) = state.hand.as_mut() {
            for (idx, &facing) in cli.facings.iter().enumerate() {
                hand.set_facing(idx, facing);
            }
        }
        state.render(&style)
    } else {
        let board: BoardSnapshot = serde_json::from_str(&text)?;
        let hand = cli.hand.as_deref().map(|p| load_hand(p, &cli)).transpose()?;
        Frame {
            game_id: None,
            board: Some(render_board(&board, &style)),
            hand: hand.map(|h| render_hand(&h, &style, Some(&board))),
            last_turn: None,
            is_over: false,
            is_winner: false,
        }
    };

    if let Some(board) = &frame.board {
        if board.skipped_segments > 0 {
            tracing::warn!(skipped = board.skipped_segments, "some trail segments were not drawn");
        }
    }

    let rendered = match cli.format {
        Format::Json => serde_json::to_string_pretty(&frame)?,
        Format::Svg => match &frame.board {
            Some(board) => board.to_svg(&style),
            None => return Err("no board to render".into()),
        },
    };

    match cli.output {
        Some(ref path) => {
            fs::write(path, rendered)?;
            tracing::info!(path = %path.display(), "wrote render");
        }
        None => io::stdout().write_all(rendered.as_bytes())?,
    }

    Ok(())
}
