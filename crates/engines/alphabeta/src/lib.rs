//! Alpha-Beta Engine
//!
//! Iterative-deepening minimax with alpha-beta pruning over the Two Flags
//! pawn game. This is the default player.
//!
//! - Static evaluation: material, advancement, near-promotion and passed pawns
//! - Transposition table with depth-validated, bound-tagged entries
//! - Randomized tie-breaking among near-equal root moves
//! - Optional pondering on the opponent's time

mod eval;
mod ponder;
mod search;
mod tt;

use flags_core::{Engine, Position, Role, SearchLimits, SearchResult, has_legal_move, static_winner};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info};

pub use eval::{EvaluationWeights, PawnWeights, evaluate, is_passed, passed_mask};
pub use ponder::Ponderer;
pub use search::{DepthReport, Search, SearchConfig, perspective};
pub use tt::{Bound, TranspositionTable, TtEntry};

/// Alpha-beta player.
///
/// Owns its transposition table across moves of a game; a ponder search
/// borrows the table and returns it when stopped.
pub struct AlphaBetaEngine {
    weights: EvaluationWeights,
    config: SearchConfig,
    tt: TranspositionTable,
    rng: StdRng,
    ponderer: Option<Ponderer>,
}

impl AlphaBetaEngine {
    pub fn new() -> Self {
        Self::with_config(EvaluationWeights::default(), SearchConfig::default())
    }

    pub fn with_config(weights: EvaluationWeights, config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            weights,
            tt: TranspositionTable::with_capacity(config.tt_capacity),
            config,
            rng,
            ponderer: None,
        }
    }

    pub fn weights(&self) -> &EvaluationWeights {
        &self.weights
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn is_pondering(&self) -> bool {
        self.ponderer.is_some()
    }

    /// Best reply found so far by the ponder search, if one is running.
    ///
    /// Informational only: the next `search` stops pondering and keeps the
    /// warmed transposition table, but does not reorder its root moves by
    /// this reply. The hint is gone once that search starts.
    pub fn ponder_hint(&mut self) -> Option<DepthReport> {
        self.ponderer.as_mut()?.latest()
    }

    /// Stops pondering and takes the table back. Returns the position the
    /// ponder search expected to be asked about next.
    fn finish_pondering(&mut self) -> Option<Position> {
        let mut ponderer = self.ponderer.take()?;
        let expected = ponderer.expected_position();
        let (latest, tt) = ponderer.stop();
        if let Some(report) = latest {
            debug!(depth = report.depth, mv = %report.best_move, "pondering stopped");
        }
        self.tt = tt;
        expected
    }
}

impl Default for AlphaBetaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for AlphaBetaEngine {
    fn search(&mut self, pos: &Position, role: Role, limits: SearchLimits) -> SearchResult {
        if let Some(expected) = self.finish_pondering() {
            debug!(hit = expected == *pos, "ponder prediction");
        }

        limits.start();
        let tc = limits
            .time_control
            .clone()
            .with_check_interval(self.config.check_interval);

        let result = Search::new(&self.weights, &self.config, &mut self.tt, &tc).choose_move(
            pos,
            role,
            limits.depth,
            &mut self.rng,
            |_| {},
        );

        info!(
            %role,
            decision = %result.decision(role),
            score = result.score,
            depth = result.depth,
            nodes = result.nodes,
            stopped = result.stopped,
            elapsed_ms = tc.elapsed().as_millis() as u64,
            "move chosen"
        );
        result
    }

    fn name(&self) -> &str {
        "AlphaBeta v1.0"
    }

    fn new_game(&mut self) {
        self.finish_pondering();
        self.tt.clear();
    }

    fn ponder(&mut self, pos: &Position, to_move: Role) {
        self.finish_pondering();
        if static_winner(pos).is_some() || !has_legal_move(pos, to_move) {
            return;
        }

        let tt = std::mem::replace(
            &mut self.tt,
            TranspositionTable::with_capacity(self.config.tt_capacity),
        );
        self.ponderer = Some(Ponderer::start(
            *pos,
            to_move,
            self.weights,
            self.config.clone(),
            tt,
            self.rng.next_u64(),
        ));
    }

    fn stop_pondering(&mut self) {
        self.finish_pondering();
    }
}
