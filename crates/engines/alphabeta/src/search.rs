//! Iterative-deepening minimax search with alpha-beta pruning.
//!
//! Scores inside the tree are always from White's point of view: White
//! maximizes, Black minimizes. Every child is searched on its own copy of
//! the position.

use flags_core::{
    Move, Position, Role, SearchResult, TimeControl, is_promotion, legal_moves,
    legal_moves_into, static_winner, MAX_DEPTH,
};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::eval::{EvaluationWeights, evaluate};
use crate::tt::{Bound, TranspositionTable, TtEntry};

const INF: i32 = i32::MAX / 2;

/// Search behaviour knobs, fixed for the lifetime of a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Root moves scoring within this margin of the best are picked at random
    pub tie_epsilon: i32,
    /// Probe and fill the transposition table
    pub use_tt: bool,
    /// Maximum transposition table entries
    pub tt_capacity: usize,
    /// Nodes between wall-clock checks
    pub check_interval: u64,
    /// Seed for tie-breaking; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tie_epsilon: 5,
            use_tt: true,
            tt_capacity: TranspositionTable::DEFAULT_CAPACITY,
            check_interval: 64,
            seed: None,
        }
    }
}

/// Summary of one completed iterative-deepening round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthReport {
    pub depth: u8,
    pub best_move: Move,
    /// From the searching side's perspective
    pub score: i32,
    pub nodes: u64,
}

/// Result of searching all root moves at one depth.
struct RootOutcome {
    /// Moves whose score is exact, in generation order
    scored: Vec<(Move, i32)>,
    stopped: bool,
}

/// One search invocation: borrowed configuration plus private scratch state.
pub struct Search<'a> {
    pub weights: &'a EvaluationWeights,
    pub config: &'a SearchConfig,
    pub tt: &'a mut TranspositionTable,
    pub tc: &'a TimeControl,
    pub nodes: u64,
    /// Set when some leaf was cut off by depth rather than by the game ending.
    horizon_hit: bool,
}

impl<'a> Search<'a> {
    pub fn new(
        weights: &'a EvaluationWeights,
        config: &'a SearchConfig,
        tt: &'a mut TranspositionTable,
        tc: &'a TimeControl,
    ) -> Self {
        Self {
            weights,
            config,
            tt,
            tc,
            nodes: 0,
            horizon_hit: false,
        }
    }

    /// Picks a move for `role`:
    /// 1. no legal move (or a decided game) returns the verdict without searching;
    /// 2. an immediate promotion is played at once;
    /// 3. otherwise iterative deepening runs up to `max_depth` or until the
    ///    clock stops it, keeping the best move of the last completed depth.
    pub fn choose_move<R, F>(
        &mut self,
        pos: &Position,
        role: Role,
        max_depth: u8,
        rng: &mut R,
        mut on_depth: F,
    ) -> SearchResult
    where
        R: Rng + ?Sized,
        F: FnMut(&DepthReport),
    {
        let moves = legal_moves(pos, role);
        if static_winner(pos).is_some() || moves.is_empty() {
            return SearchResult::game_over(role, pos);
        }

        if let Some(&mv) = moves.iter().find(|&&mv| is_promotion(role, mv)) {
            debug!(%mv, "immediate promotion");
            return SearchResult {
                best_move: Some(mv),
                score: self.weights.win_score,
                ..Default::default()
            };
        }

        let max_depth = max_depth.clamp(1, MAX_DEPTH);
        let mut best: Option<(Move, i32)> = None;
        let mut completed = 0u8;
        let mut stopped = false;

        for depth in 1..=max_depth {
            if self.tc.is_stopped() {
                stopped = true;
                break;
            }
            self.horizon_hit = false;
            let root = self.search_root(pos, role, depth);

            if root.stopped {
                // Only an unfinished first iteration may contribute a move.
                if best.is_none() {
                    best = self.pick(&root.scored, role, rng);
                }
                stopped = true;
                break;
            }

            let Some((mv, score)) = self.pick(&root.scored, role, rng) else {
                break;
            };
            best = Some((mv, score));
            completed = depth;

            let report = DepthReport {
                depth,
                best_move: mv,
                score: perspective(score, role),
                nodes: self.nodes,
            };
            debug!(depth, %mv, score = report.score, nodes = self.nodes, "depth completed");
            on_depth(&report);

            if self.weights.is_decisive(score) || !self.horizon_hit {
                // Proven result or whole game tree searched: deeper adds nothing.
                break;
            }
        }

        let (mv, score) = match best {
            Some(found) => found,
            None => {
                warn!(%role, "no depth completed, playing first legal move");
                (moves[0], evaluate(pos, Role::White, self.weights))
            }
        };

        SearchResult {
            best_move: Some(mv),
            score: perspective(score, role),
            depth: completed,
            nodes: self.nodes,
            stopped,
            winner: None,
        }
    }

    /// Searches every root move in generation order. Each move after the
    /// first gets a window just wide enough to score near-ties exactly.
    fn search_root(&mut self, pos: &Position, role: Role, depth: u8) -> RootOutcome {
        let maximizing = role == Role::White;
        let eps = self.config.tie_epsilon.max(0);
        let mut moves = Vec::with_capacity(32);
        legal_moves_into(pos, role, &mut moves);

        let mut scored = Vec::with_capacity(moves.len());
        let mut best: Option<i32> = None;

        for mv in moves {
            if self.tc.should_check_time(self.nodes) && self.tc.check_time() {
                return RootOutcome {
                    scored,
                    stopped: true,
                };
            }

            let (alpha, beta) = match (best, maximizing) {
                (None, _) => (-INF, INF),
                (Some(b), true) => (b - eps - 1, INF),
                (Some(b), false) => (-INF, b + eps + 1),
            };

            let child = pos.with_move(role, mv);
            let (score, was_stopped) =
                self.alpha_beta(&child, role.other(), depth - 1, alpha, beta);
            if was_stopped {
                return RootOutcome {
                    scored,
                    stopped: true,
                };
            }

            if score > alpha && score < beta {
                scored.push((mv, score));
                best = Some(match best {
                    Some(b) if maximizing => b.max(score),
                    Some(b) => b.min(score),
                    None => score,
                });
            }
        }

        RootOutcome {
            scored,
            stopped: false,
        }
    }

    /// Best score among `scored`, with ties (within epsilon) broken at random.
    fn pick<R: Rng + ?Sized>(
        &self,
        scored: &[(Move, i32)],
        role: Role,
        rng: &mut R,
    ) -> Option<(Move, i32)> {
        let eps = self.config.tie_epsilon.max(0);
        let best = match role {
            Role::White => scored.iter().map(|&(_, s)| s).max()?,
            Role::Black => scored.iter().map(|&(_, s)| s).min()?,
        };
        let tied: Vec<(Move, i32)> = scored
            .iter()
            .copied()
            .filter(|&(_, s)| (s - best).abs() <= eps)
            .collect();
        tied.choose(rng).copied()
    }

    /// Recursive minimax with alpha-beta pruning.
    ///
    /// Returns (score, stopped) where stopped indicates the clock ran out;
    /// a stopped score is a placeholder and must be discarded.
    pub fn alpha_beta(
        &mut self,
        pos: &Position,
        to_move: Role,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
    ) -> (i32, bool) {
        self.nodes += 1;
        if self.tc.is_stopped() || (self.tc.should_check_time(self.nodes) && self.tc.check_time())
        {
            return (evaluate(pos, Role::White, self.weights), true);
        }

        if let Some(role) = static_winner(pos) {
            return (self.win_for(role), false);
        }

        let mut moves = Vec::with_capacity(32);
        legal_moves_into(pos, to_move, &mut moves);
        if moves.is_empty() {
            // Stalemate loses.
            return (self.win_for(to_move.other()), false);
        }

        if depth == 0 {
            self.horizon_hit = true;
            return (evaluate(pos, Role::White, self.weights), false);
        }

        let key = TranspositionTable::key(pos, to_move);
        if self.config.use_tt
            && let Some(entry) = self.tt.probe(key, depth)
        {
            // Entries may have been cut at the horizon; assume so.
            self.horizon_hit = true;
            match entry.bound {
                Bound::Exact => return (entry.score, false),
                Bound::Lower if entry.score >= beta => return (entry.score, false),
                Bound::Upper if entry.score <= alpha => return (entry.score, false),
                _ => {}
            }
        }

        let (alpha_orig, beta_orig) = (alpha, beta);
        let maximizing = to_move == Role::White;
        let mut best = if maximizing { -INF } else { INF };

        for mv in moves {
            let child = pos.with_move(to_move, mv);
            let (score, stopped) = self.alpha_beta(&child, to_move.other(), depth - 1, alpha, beta);
            if stopped {
                return (best, true);
            }

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if beta <= alpha {
                break;
            }
        }

        if self.config.use_tt {
            let bound = if best <= alpha_orig {
                Bound::Upper
            } else if best >= beta_orig {
                Bound::Lower
            } else {
                Bound::Exact
            };
            self.tt.store(
                key,
                TtEntry {
                    depth,
                    score: best,
                    bound,
                },
            );
        }

        (best, false)
    }

    fn win_for(&self, role: Role) -> i32 {
        match role {
            Role::White => self.weights.win_score,
            Role::Black => -self.weights.win_score,
        }
    }
}

/// Converts a White-perspective score to `role`'s perspective.
#[inline]
pub fn perspective(score: i32, role: Role) -> i32 {
    match role {
        Role::White => score,
        Role::Black => -score,
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
