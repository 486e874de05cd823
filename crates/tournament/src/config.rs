//! Match and tournament configuration, loadable from TOML.

use flags_core::{FlagsError, Position, STANDARD_SETUP, SearchLimits};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::TournamentError;

/// Configuration for a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of games to play
    #[serde(rename = "games")]
    pub num_games: u32,
    /// Depth cap for engines
    pub depth: u8,
    /// Maximum time per move in milliseconds (None = depth only)
    pub move_time_ms: Option<u64>,
    /// Plies before the game is scored a draw
    pub max_plies: u32,
    /// Whether to alternate colors each game
    pub alternate_colors: bool,
    /// Starting position in setup-string form
    pub setup: String,
    /// Let the side that just moved ponder on the opponent's time
    pub ponder: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            depth: 4,
            move_time_ms: None,
            max_plies: 200,
            alternate_colors: true,
            setup: STANDARD_SETUP.to_string(),
            ponder: false,
        }
    }
}

impl MatchConfig {
    pub fn move_time(&self) -> Option<Duration> {
        self.move_time_ms.map(Duration::from_millis)
    }

    /// Fresh limits for one move (each move gets its own clock).
    pub fn search_limits(&self) -> SearchLimits {
        match self.move_time() {
            Some(time) => SearchLimits::depth_and_time(self.depth, time),
            None => SearchLimits::depth(self.depth),
        }
    }

    pub fn start_position(&self) -> Result<Position, FlagsError> {
        Position::from_setup(&self.setup)
    }
}

/// A round robin between named engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub name: String,
    /// Engine specs, see [`create_engine`](crate::create_engine)
    pub engines: Vec<String>,
    /// Base seed for engines; each game derives its own
    pub seed: Option<u64>,
    #[serde(rename = "match")]
    pub match_config: MatchConfig,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            name: "Two Flags tournament".to_string(),
            engines: vec!["alphabeta".to_string(), "random".to_string()],
            seed: None,
            match_config: MatchConfig::default(),
        }
    }
}

impl TournamentConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, TournamentError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, TournamentError> {
        let text = std::fs::read_to_string(path).map_err(|source| TournamentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Every unordered pair of engines, in listing order.
    pub fn pairings(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::new();
        for (i, a) in self.engines.iter().enumerate() {
            for b in &self.engines[i + 1..] {
                pairs.push((a.as_str(), b.as_str()));
            }
        }
        pairs
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
