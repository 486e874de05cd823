//! How much depth and time to give each of our moves.
//!
//! These are caller policies: the engines only see the resulting
//! [`SearchLimits`](flags_core::SearchLimits).

use flags_core::MAX_DEPTH;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Depth cap by move number: shallower for the first few own moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthSchedule {
    /// Own moves that use `opening_depth`
    pub opening_moves: u32,
    pub opening_depth: u8,
    /// Cap for every later move
    pub depth: u8,
}

impl Default for DepthSchedule {
    fn default() -> Self {
        Self {
            opening_moves: 4,
            opening_depth: 6,
            depth: MAX_DEPTH,
        }
    }
}

impl DepthSchedule {
    /// Same cap for every move.
    pub fn fixed(depth: u8) -> Self {
        Self {
            opening_moves: 0,
            opening_depth: depth,
            depth,
        }
    }

    /// Cap for our move number `own_moves` (0-based).
    pub fn depth_for(&self, own_moves: u32) -> u8 {
        let depth = if own_moves < self.opening_moves {
            self.opening_depth
        } else {
            self.depth
        };
        depth.clamp(1, MAX_DEPTH)
    }
}

/// Splits the match clock across the moves we still expect to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimePolicy {
    /// Expected number of own moves in a game
    pub moves_to_go: u32,
    /// Never plan for fewer remaining moves than this
    pub min_moves_left: u32,
    /// Held back from the clock for transport latency
    pub safety_ms: u64,
    pub min_ms: u64,
    pub max_ms: u64,
    /// Budget when the server announced no clock
    pub default_ms: u64,
}

impl Default for TimePolicy {
    fn default() -> Self {
        Self {
            moves_to_go: 30,
            min_moves_left: 8,
            safety_ms: 200,
            min_ms: 50,
            max_ms: 10_000,
            default_ms: 1_000,
        }
    }
}

impl TimePolicy {
    /// Budget for the next move given the match `clock`, the time we have
    /// already used, and how many moves we have made.
    pub fn budget(&self, clock: Option<Duration>, used: Duration, own_moves: u32) -> Duration {
        let Some(clock) = clock else {
            return Duration::from_millis(self.default_ms);
        };
        let remaining = clock
            .saturating_sub(used)
            .saturating_sub(Duration::from_millis(self.safety_ms));
        let moves_left = self
            .moves_to_go
            .saturating_sub(own_moves)
            .max(self.min_moves_left)
            .max(1);
        let share = remaining / moves_left;
        share.clamp(
            Duration::from_millis(self.min_ms),
            Duration::from_millis(self.max_ms.max(self.min_ms)),
        )
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod policy_tests;
