//! Agent configuration, read from an optional TOML file.

use alphabeta_engine::{AlphaBetaEngine, EvaluationWeights, SearchConfig};
use anyhow::{Context, Result};
use flags_core::Engine;
use mcts_engine::{MctsConfig, MctsEngine};
use random_engine::RandomEngine;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::policy::{DepthSchedule, TimePolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    #[default]
    AlphaBeta,
    Mcts,
    Random,
}

impl std::str::FromStr for EngineKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "alphabeta" | "ab" | "minimax" => Ok(EngineKind::AlphaBeta),
            "mcts" => Ok(EngineKind::Mcts),
            "random" => Ok(EngineKind::Random),
            other => anyhow::bail!("unknown engine '{other}' (expected alphabeta, mcts or random)"),
        }
    }
}

/// Everything the player needs besides the server's messages.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub engine: EngineKind,
    /// Think on the opponent's time (alpha-beta only)
    pub ponder: bool,
    pub weights: EvaluationWeights,
    pub search: SearchConfig,
    pub mcts: MctsConfig,
    pub depth: DepthSchedule,
    pub time: TimePolicy,
}

impl AgentConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid agent config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        Self::from_toml_str(&text)
    }

    /// Seeds every engine kind at once.
    pub fn set_seed(&mut self, seed: u64) {
        self.search.seed = Some(seed);
        self.mcts.seed = Some(seed);
    }

    pub fn build_engine(&self) -> Box<dyn Engine> {
        match self.engine {
            EngineKind::AlphaBeta => Box::new(AlphaBetaEngine::with_config(
                self.weights,
                self.search.clone(),
            )),
            EngineKind::Mcts => Box::new(MctsEngine::with_config(self.mcts.clone())),
            EngineKind::Random => match self.search.seed {
                Some(seed) => Box::new(RandomEngine::seeded(seed)),
                None => Box::new(RandomEngine::new()),
            },
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
