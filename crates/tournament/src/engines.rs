//! Engine construction from short command-line names.

use alphabeta_engine::{AlphaBetaEngine, EvaluationWeights, SearchConfig};
use flags_core::Engine;
use mcts_engine::{MctsConfig, MctsEngine};
use random_engine::RandomEngine;

use crate::error::TournamentError;

/// Names accepted by [`create_engine`].
pub const ENGINE_NAMES: [&str; 3] = ["alphabeta", "mcts", "random"];

/// Builds an engine from its name. A seed makes its play reproducible.
pub fn create_engine(spec: &str, seed: Option<u64>) -> Result<Box<dyn Engine>, TournamentError> {
    let engine: Box<dyn Engine> = match spec.to_ascii_lowercase().as_str() {
        "alphabeta" | "ab" | "minimax" => Box::new(AlphaBetaEngine::with_config(
            EvaluationWeights::default(),
            SearchConfig {
                seed,
                ..Default::default()
            },
        )),
        "mcts" => Box::new(MctsEngine::with_config(MctsConfig {
            seed,
            ..Default::default()
        })),
        "random" | "rand" => match seed {
            Some(seed) => Box::new(RandomEngine::seeded(seed)),
            None => Box::new(RandomEngine::new()),
        },
        _ => return Err(TournamentError::UnknownEngine(spec.to_string())),
    };
    Ok(engine)
}
