//! Minimax search with alpha-beta pruning.
//!
//! White maximizes the material score and Black minimizes it. The search
//! plays the moves of [`generate_moves`], so it never castles or captures en
//! passant and may walk its own king into check; the interactive path in
//! [`Game`](crate::Game) applies the self-check guard instead.

use crate::evaluation::evaluate;
use crate::movegen::{apply_move, generate_moves};
use crate::Board;
use chess_core::{Color, Move};
use tracing::{debug, trace};

/// Score bound used as the open alpha-beta window.
pub const INFINITY: i32 = i32::MAX;

/// Bounds on a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Plies to search. Zero is treated as one.
    pub depth: u8,
    /// Stop after visiting this many nodes.
    pub max_nodes: Option<u64>,
    /// Alpha-beta cutoffs. Turning them off gives plain minimax.
    pub pruning: bool,
}

impl SearchLimits {
    /// A pruned search to `depth` with no node budget.
    pub const fn depth(depth: u8) -> Self {
        SearchLimits {
            depth,
            max_nodes: None,
            pruning: true,
        }
    }

    /// Adds a node budget.
    pub const fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Disables alpha-beta cutoffs.
    pub const fn without_pruning(mut self) -> Self {
        self.pruning = false;
        self
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(3)
    }
}

/// Outcome of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    /// Chosen move, `None` when the side has no moves.
    pub best_move: Option<Move>,
    /// Score of the chosen move, or the static score when there is none.
    pub score: i32,
    /// Deepest fully searched depth; 0 if the budget ran out during the
    /// first iteration.
    pub depth: u8,
    /// Nodes visited across all iterations.
    pub nodes: u64,
}

/// Search state.
#[derive(Debug, Clone)]
pub struct Searcher {
    limits: SearchLimits,
    nodes: u64,
    stopped: bool,
}

impl Searcher {
    pub fn new(limits: SearchLimits) -> Self {
        Searcher {
            limits,
            nodes: 0,
            stopped: false,
        }
    }

    /// Returns the limits this searcher runs under.
    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Nodes visited by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Picks a move for `color`.
    ///
    /// Without a node budget this is a single search at the requested depth.
    /// With one, depths 1 through the requested depth are searched in turn
    /// and the deepest completed iteration wins.
    pub fn search(&mut self, board: &Board, color: Color) -> SearchReport {
        self.nodes = 0;
        self.stopped = false;

        let target = self.limits.depth.max(1);
        let first = if self.limits.max_nodes.is_some() { 1 } else { target };
        let mut report = SearchReport {
            best_move: None,
            score: evaluate(board),
            depth: 0,
            nodes: 0,
        };

        for depth in first..=target {
            let result = self.search_root(board, color, depth);
            if self.stopped {
                if report.best_move.is_none() {
                    if let Some((m, score)) = result {
                        report.best_move = Some(m);
                        report.score = score;
                    }
                }
                trace!(depth, nodes = self.nodes, "node budget exhausted");
                break;
            }

            report.best_move = result.map(|(m, _)| m);
            if let Some((_, score)) = result {
                report.score = score;
            }
            report.depth = depth;
            trace!(
                depth,
                nodes = self.nodes,
                score = report.score,
                best = ?report.best_move,
                "iteration complete"
            );
        }

        report.nodes = self.nodes;
        debug!(
            ?color,
            depth = report.depth,
            nodes = report.nodes,
            score = report.score,
            best = ?report.best_move,
            "search finished"
        );
        report
    }

    /// Scores every root move with a fresh open window and keeps the best.
    /// Ties keep the earlier move.
    fn search_root(&mut self, board: &Board, color: Color, depth: u8) -> Option<(Move, i32)> {
        let mut best: Option<(Move, i32)> = None;
        for m in &generate_moves(board, color) {
            let child = apply_move(board, *m);
            let score = self.minimax(
                &child,
                depth - 1,
                color == Color::Black,
                -INFINITY,
                INFINITY,
                color.opposite(),
            );
            // An interrupted subtree has no trustworthy score; a leaf does.
            if self.stopped && depth > 1 {
                break;
            }

            let better = match best {
                None => true,
                Some((_, best_score)) => match color {
                    Color::White => score > best_score,
                    Color::Black => score < best_score,
                },
            };
            if better {
                best = Some((*m, score));
            }
            if self.stopped {
                break;
            }
        }
        best
    }

    /// Minimax value of `board` with `color` to move.
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
        color: Color,
    ) -> i32 {
        // A node past the budget is not visited; reaching the budget exactly
        // still completes the iteration.
        if self.stopped || self.limits.max_nodes.is_some_and(|max| self.nodes >= max) {
            self.stopped = true;
            return evaluate(board);
        }
        self.nodes += 1;

        if depth == 0 {
            return evaluate(board);
        }

        let moves = generate_moves(board, color);
        if moves.is_empty() {
            return evaluate(board);
        }

        let mut best = if maximizing { -INFINITY } else { INFINITY };
        for m in &moves {
            let child = apply_move(board, *m);
            let score = self.minimax(&child, depth - 1, !maximizing, alpha, beta, color.opposite());
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if self.stopped || (self.limits.pruning && beta <= alpha) {
                break;
            }
        }
        best
    }
}

/// Minimax value of `board` searched `depth` plies with `color` to move.
///
/// A position where `color` has no moves scores as its static evaluation.
pub fn minimax(
    board: &Board,
    depth: u8,
    maximizing: bool,
    alpha: i32,
    beta: i32,
    color: Color,
) -> i32 {
    Searcher::new(SearchLimits::depth(depth)).minimax(board, depth, maximizing, alpha, beta, color)
}

/// Returns the best move for `color` at `depth`, or `None` when it has no
/// moves.
pub fn find_best_move(board: &Board, depth: u8, color: Color) -> Option<Move> {
    Searcher::new(SearchLimits::depth(depth))
        .search(board, color)
        .best_move
}
