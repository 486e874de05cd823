//! Random mover
//!
//! Picks uniformly among the legal moves. It is the baseline opponent in
//! tournaments and a cheap player for protocol tests.

use flags_core::{
    Engine, Move, Position, Role, SearchLimits, SearchResult, legal_moves_into, static_winner,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

#[cfg(test)]
mod lib_tests;

#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
    moves: Vec<Move>,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible move sequence for tests and tournaments.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            moves: Vec::with_capacity(32),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn search(&mut self, pos: &Position, role: Role, _limits: SearchLimits) -> SearchResult {
        if static_winner(pos).is_some() {
            return SearchResult::game_over(role, pos);
        }

        legal_moves_into(pos, role, &mut self.moves);
        let Some(&mv) = self.moves.choose(&mut self.rng) else {
            return SearchResult::game_over(role, pos);
        };
        debug!(%role, %mv, choices = self.moves.len(), "random move");

        SearchResult {
            best_move: Some(mv),
            score: 0,
            depth: 1,
            nodes: 1,
            stopped: false,
            winner: None,
        }
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }
}
