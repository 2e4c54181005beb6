//! Terminal session: one line in, one response out.

use chess_core::{Color, Square};
use chess_engine::{piece_value, Game, GameError, SearchLimits};
use std::io::{self, Write};

/// A command typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A move in UCI notation.
    Move(String),
    /// List destinations of the piece on a square.
    Moves(Square),
    Board,
    Score,
    History,
    Help,
    Quit,
    Empty,
}

impl Command {
    /// Parses one input line. Anything that is not a keyword is taken as a
    /// move; the game rejects it if it is not one.
    pub fn parse(line: &str) -> Result<Command, String> {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            return Ok(Command::Empty);
        };
        let command = match first {
            "quit" | "exit" => Command::Quit,
            "board" => Command::Board,
            "score" => Command::Score,
            "history" => Command::History,
            "help" => Command::Help,
            "moves" => {
                let name = words.next().ok_or("usage: moves <square>")?;
                let sq = Square::from_algebraic(name)
                    .ok_or_else(|| format!("not a square: {}", name))?;
                Command::Moves(sq)
            }
            text => Command::Move(text.to_string()),
        };
        if words.next().is_some() {
            return Err(format!("unexpected input after {:?}", first));
        }
        Ok(command)
    }
}

/// Whether the session continues after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A game between the user and the search.
pub struct Session {
    game: Game,
    engine: Color,
    limits: SearchLimits,
}

impl Session {
    pub fn new(game: Game, engine: Color, limits: SearchLimits) -> Self {
        Session {
            game,
            engine,
            limits,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Lets the engine move if it is its turn.
    pub fn engine_turn(&mut self, out: &mut impl Write) -> io::Result<Flow> {
        if self.game.side_to_move() != self.engine {
            return Ok(Flow::Continue);
        }
        self.play_engine_move(out)
    }

    /// Plays one engine move for the side to move.
    pub fn play_engine_move(&mut self, out: &mut impl Write) -> io::Result<Flow> {
        match self.game.engine_move_with(self.limits) {
            Ok(report) => {
                if let Some(m) = report.best_move {
                    writeln!(
                        out,
                        "{} plays {} (depth {}, {} nodes, score {})",
                        m.color, m, report.depth, report.nodes, self.game.score()
                    )?;
                }
                self.report_check(out)?;
                Ok(Flow::Continue)
            }
            Err(GameError::NoLegalMoves(color)) => {
                writeln!(out, "{} has no moves; game over", color)?;
                Ok(Flow::Quit)
            }
            Err(e) => {
                writeln!(out, "error: {}", e)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Handles one input line.
    pub fn handle(&mut self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "error: {}", message)?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Empty => {}
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => {
                writeln!(
                    out,
                    "commands: <move> (e.g. e2e4), moves <square>, board, score, history, quit"
                )?;
            }
            Command::Board => writeln!(out, "{}", self.game.board())?,
            Command::Score => writeln!(out, "score {}", self.game.score())?,
            Command::History => {
                let moves: Vec<String> = self
                    .game
                    .move_history()
                    .chunks(2)
                    .enumerate()
                    .map(|(i, pair)| {
                        let plies: Vec<String> = pair.iter().map(|m| m.to_uci()).collect();
                        format!("{}. {}", i + 1, plies.join(" "))
                    })
                    .collect();
                writeln!(out, "{}", moves.join(" "))?;
            }
            Command::Moves(sq) => {
                let dests: Vec<String> = self
                    .game
                    .moves_from(sq)
                    .iter()
                    .map(|d| d.to_string())
                    .collect();
                if dests.is_empty() {
                    writeln!(out, "no moves from {}", sq)?;
                } else {
                    writeln!(out, "{}: {}", sq, dests.join(" "))?;
                }
            }
            Command::Move(text) => {
                if self.game.side_to_move() == self.engine {
                    writeln!(out, "error: it is the engine's turn")?;
                    return Ok(Flow::Continue);
                }
                match self.game.make_move_uci(&text) {
                    Ok(m) => {
                        writeln!(out, "you play {}", m)?;
                        self.report_check(out)?;
                        return self.engine_turn(out);
                    }
                    Err(e) => writeln!(out, "error: {}", e)?,
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn report_check(&self, out: &mut impl Write) -> io::Result<()> {
        if self.game.is_check() {
            writeln!(out, "{} is in check", self.game.side_to_move())?;
        }
        Ok(())
    }
}

/// Material of `color` on the board, for the closing summary.
pub fn material(game: &Game, color: Color) -> i32 {
    game.board()
        .pieces()
        .filter(|&(_, _, c)| c == color)
        .map(|(_, piece, _)| piece_value(piece))
        .sum()
}
