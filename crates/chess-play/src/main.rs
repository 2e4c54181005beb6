//! chess-play - play against the minimax search in a terminal.
//!
//! Moves are typed in UCI notation (`e2e4`). The engine answers for its side
//! after every accepted move. With `--self-play N` the search plays both
//! sides for N plies and exits.

mod config;
mod session;

use anyhow::Context;
use chess_core::Color;
use chess_engine::Game;
use clap::Parser;
use config::{PlayConfig, Side};
use session::{material, Flow, Session};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Play chess against a minimax search.
#[derive(Parser)]
#[command(name = "chess-play")]
#[command(about = "Play chess against a minimax search")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value_os_t = PlayConfig::default_path())]
    config: PathBuf,

    /// Search depth in plies (overrides the config file)
    #[arg(long)]
    depth: Option<u8>,

    /// Side played by the engine (overrides the config file)
    #[arg(long, value_enum)]
    engine: Option<Side>,

    /// Let the engine play both sides for this many plies
    #[arg(long)]
    self_play: Option<u32>,

    /// Start from this FEN instead of the standard position
    #[arg(long)]
    fen: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let args = Args::parse();

    let mut config = PlayConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(depth) = args.depth {
        config.search.depth = depth;
    }
    if let Some(engine) = args.engine {
        config.engine = engine;
    }
    tracing::info!(
        engine = ?config.engine,
        depth = config.search.depth,
        max_nodes = ?config.search.max_nodes,
        "starting"
    );

    let game = match &args.fen {
        Some(fen) => Game::from_fen(fen).context("parsing --fen")?,
        None => Game::new(),
    };
    let mut session = Session::new(game, config.engine.into(), config.search_limits());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.self_play {
        Some(plies) => self_play(&mut session, plies, &mut out)?,
        None => interactive(&mut session, &mut out)?,
    }

    writeln!(
        out,
        "final score {} (White {}, Black {})",
        session.game().score(),
        material(session.game(), Color::White),
        material(session.game(), Color::Black)
    )?;
    Ok(())
}

fn self_play(session: &mut Session, plies: u32, out: &mut impl Write) -> io::Result<()> {
    for _ in 0..plies {
        if session.play_engine_move(out)? == Flow::Quit {
            break;
        }
    }
    writeln!(out, "{}", session.game().board())
}

fn interactive(session: &mut Session, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", session.game().board())?;
    if session.engine_turn(out)? == Flow::Quit {
        return Ok(());
    }

    let stdin = io::stdin();
    loop {
        write!(out, "{}> ", session.game().side_to_move())?;
        out.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if session.handle(&line, out)? == Flow::Quit {
            break;
        }
    }
    Ok(())
}
