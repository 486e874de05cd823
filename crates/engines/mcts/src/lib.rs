//! Monte-Carlo Tree Search Engine
//!
//! An alternative to alpha-beta that needs no evaluation function: UCB1
//! selection over an arena tree, full expansion, bounded random playouts.
//! The move played is the root child visited most often.

mod search;
mod tree;

use flags_core::{Engine, Position, Role, SearchLimits, SearchResult, legal_moves, static_winner};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

pub use search::{MctsConfig, MctsOutcome, rollout, run};
pub use tree::{Node, NodeId, Tree, reward};

/// Scale applied to the mean reward when reporting it as a search score.
const SCORE_SCALE: f64 = 1000.0;

pub struct MctsEngine {
    config: MctsConfig,
    rng: StdRng,
}

impl MctsEngine {
    pub fn new() -> Self {
        Self::with_config(MctsConfig::default())
    }

    pub fn with_config(config: MctsConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }
}

impl Default for MctsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for MctsEngine {
    fn search(&mut self, pos: &Position, role: Role, limits: SearchLimits) -> SearchResult {
        let moves = legal_moves(pos, role);
        if static_winner(pos).is_some() || moves.is_empty() {
            return SearchResult::game_over(role, pos);
        }
        if let [only] = moves.as_slice() {
            return SearchResult {
                best_move: Some(*only),
                ..Default::default()
            };
        }

        limits.start();
        let outcome = run(pos, role, &self.config, &limits.time_control, &mut self.rng);

        info!(
            %role,
            mv = ?outcome.best_move,
            visits = outcome.visits,
            value = outcome.value,
            iterations = outcome.iterations,
            "move chosen"
        );

        SearchResult {
            best_move: outcome.best_move.or(Some(moves[0])),
            score: (outcome.value * SCORE_SCALE).round() as i32,
            depth: outcome.max_depth,
            nodes: outcome.iterations as u64,
            stopped: outcome.stopped,
            winner: None,
        }
    }

    fn name(&self) -> &str {
        "MCTS v1.0"
    }
}
