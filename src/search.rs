//! Depth-bounded minimax search.
//!
//! The search is exhaustive: every empty cell is tried at every node, with no
//! pruning and no transposition table. Scores are from the AI's point of view:
//!
//! - AI has three in a row at depth `d`: `10 - d`
//! - opponent has three in a row at depth `d`: `d - 10`
//! - depth cutoff exceeded: `0`
//!
//! At the root the first index reaching the best score wins; later ties are
//! ignored. Together with the fixed 0..9 scan order this makes the result a
//! pure function of the input position.
//!
//! Each call works on a private copy of the caller's position. Moves are
//! applied and undone in place on that copy through [`MoveGuard`], so the
//! buffer is restored even if a branch returns early.
//!
//! [`MoveGuard`]: crate::position::MoveGuard

use tracing::debug;

use crate::board::Mark;
use crate::constants::{
    BOARD_CELLS, DEFAULT_DEPTH_CUTOFF, MAX_DEPTH_CUTOFF, MAX_SENTINEL, MIN_SENTINEL, NEUTRAL_SCORE,
    NO_MOVE, WIN_SCORE,
};
use crate::error::{EngineError, Result};
use crate::position::Position;

/// Search parameters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Recursion stops with a neutral score once `depth > depth_cutoff`.
    pub depth_cutoff: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth_cutoff: DEFAULT_DEPTH_CUTOFF,
        }
    }
}

impl SearchConfig {
    /// Config with the given cutoff, rejecting values above
    /// [`MAX_DEPTH_CUTOFF`].
    pub fn with_depth(depth_cutoff: u32) -> Result<Self> {
        if depth_cutoff > MAX_DEPTH_CUTOFF {
            return Err(EngineError::InvalidDepth(format!(
                "{depth_cutoff} (maximum is {MAX_DEPTH_CUTOFF})"
            )));
        }
        Ok(Self { depth_cutoff })
    }
}

/// Hooks for watching a search without giving it a logger.
///
/// All methods default to doing nothing.
pub trait SearchObserver {
    /// A root move has been fully scored.
    fn root_candidate(&mut self, _candidate: &Candidate) {}

    /// The root loop has finished.
    fn finished(&mut self, _analysis: &Analysis) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Observer that emits `tracing` debug events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn root_candidate(&mut self, c: &Candidate) {
        debug!(index = c.index, score = c.score, evicted = ?c.evicted, "root candidate");
    }

    fn finished(&mut self, a: &Analysis) {
        debug!(best = a.move_index(), score = ?a.best_score, nodes = a.nodes, "search finished");
    }
}

/// One scored root move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub index: usize,
    pub score: i32,
    /// Cell the AI gives up by playing here, if its queue was full.
    pub evicted: Option<usize>,
}

/// Result of a root search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Analysis {
    /// Chosen move, `None` when no cell is empty.
    pub best: Option<usize>,
    pub best_score: Option<i32>,
    /// Every root move in scan order.
    pub candidates: Vec<Candidate>,
    /// Number of minimax nodes visited, root moves excluded.
    pub nodes: u64,
}

impl Analysis {
    /// Wire form of the chosen move: `0..=8`, or `-1` when there is none.
    pub fn move_index(&self) -> i32 {
        self.best.map_or(NO_MOVE, |i| i as i32)
    }
}

/// Best move for `ai` in `position`, or `None` if no cell is empty.
pub fn best_move(position: &Position, ai: Mark, config: &SearchConfig) -> Option<usize> {
    analyze(position, ai, config).best
}

/// Score every root move for `ai`.
pub fn analyze(position: &Position, ai: Mark, config: &SearchConfig) -> Analysis {
    analyze_with(position, ai, config, &mut NoopObserver)
}

/// Like [`analyze`], reporting progress to `observer`.
pub fn analyze_with<O: SearchObserver + ?Sized>(
    position: &Position,
    ai: Mark,
    config: &SearchConfig,
    observer: &mut O,
) -> Analysis {
    let mut work = *position;
    let mut searcher = Searcher::new(ai, config);
    let mut analysis = Analysis::default();
    let mut best_score = MAX_SENTINEL;

    for index in 0..BOARD_CELLS {
        if !work.board().is_empty_at(index) {
            continue;
        }
        let candidate = {
            let mut child = work.scoped_unchecked(index, ai);
            let evicted = child.evicted();
            let score = searcher.minimax(&mut child, 0, false);
            Candidate {
                index,
                score,
                evicted,
            }
        };
        observer.root_candidate(&candidate);
        analysis.candidates.push(candidate);

        if candidate.score > best_score {
            best_score = candidate.score;
            analysis.best = Some(index);
            analysis.best_score = Some(candidate.score);
        }
    }

    analysis.nodes = searcher.nodes;
    observer.finished(&analysis);
    analysis
}

/// Score `position` for `ai` at the given depth, with `maximizing` telling
/// whose turn it is (the AI's when true).
///
/// `position` is restored before returning.
pub fn minimax(
    position: &mut Position,
    ai: Mark,
    depth: u32,
    maximizing: bool,
    config: &SearchConfig,
) -> i32 {
    Searcher::new(ai, config).minimax(position, depth, maximizing)
}

struct Searcher {
    ai: Mark,
    cutoff: u32,
    nodes: u64,
}

impl Searcher {
    fn new(ai: Mark, config: &SearchConfig) -> Self {
        Self {
            ai,
            cutoff: config.depth_cutoff,
            nodes: 0,
        }
    }

    fn minimax(&mut self, pos: &mut Position, depth: u32, maximizing: bool) -> i32 {
        self.nodes += 1;

        match pos.winner() {
            Some(mark) if mark == self.ai => return WIN_SCORE - depth as i32,
            Some(_) => return depth as i32 - WIN_SCORE,
            None => {}
        }

        if depth > self.cutoff {
            return NEUTRAL_SCORE;
        }

        let (mover, mut best) = if maximizing {
            (self.ai, MAX_SENTINEL)
        } else {
            (self.ai.opponent(), MIN_SENTINEL)
        };

        for index in 0..BOARD_CELLS {
            // The board is fully restored between iterations, so this sees
            // the pre-move board: a cell freed by eviction is not a candidate.
            if !pos.board().is_empty_at(index) {
                continue;
            }
            let score = {
                let mut child = pos.scoped_unchecked(index, mover);
                self.minimax(&mut child, depth + 1, !maximizing)
            };
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }

        best
    }
}
