//! The select / expand / simulate / backpropagate loop.

use flags_core::{Move, Position, Role, TimeControl, legal_moves_into, static_winner, winner};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::tree::{NodeId, Tree};

/// Search knobs, fixed for the lifetime of a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// UCB1 exploration constant
    pub exploration: f64,
    /// Plies a random playout may run before it is scored undecided
    pub rollout_depth: u32,
    /// Stop after this many iterations even if time remains
    pub max_iterations: Option<u32>,
    /// Arena size past which leaves are simulated without being expanded.
    /// The root is always expanded.
    pub max_nodes: Option<usize>,
    /// Seed for rollouts; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl MctsConfig {
    /// Iteration cap applied when neither a clock nor `max_iterations` bounds the search.
    pub const UNBOUNDED_ITERATIONS: u32 = 20_000;

    /// Default arena cap, a few tens of megabytes of nodes.
    pub const DEFAULT_MAX_NODES: usize = 250_000;
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration: 1.41,
            rollout_depth: 64,
            max_iterations: None,
            max_nodes: Some(Self::DEFAULT_MAX_NODES),
            seed: None,
        }
    }
}

/// What one search produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MctsOutcome {
    pub best_move: Option<Move>,
    /// Visits of the chosen root child
    pub visits: u32,
    /// Mean reward of the chosen child for the searching side, in [-1, 1]
    pub value: f64,
    pub iterations: u32,
    pub nodes: usize,
    /// Deepest node reached by selection
    pub max_depth: u8,
    pub stopped: bool,
}

/// Runs MCTS from (`pos`, `role`) until the clock or the iteration cap ends it.
pub fn run<R: Rng + ?Sized>(
    pos: &Position,
    role: Role,
    config: &MctsConfig,
    tc: &TimeControl,
    rng: &mut R,
) -> MctsOutcome {
    let mut tree = Tree::new(*pos, role);
    let cap = match (config.max_iterations, tc.time_limit()) {
        (Some(cap), _) => cap,
        (None, Some(_)) => u32::MAX,
        (None, None) => MctsConfig::UNBOUNDED_ITERATIONS,
    };

    let mut iterations = 0u32;
    let mut max_depth = 0u8;
    let mut stopped = false;
    let mut scratch = Vec::with_capacity(32);

    while iterations < cap {
        if tc.check_time() {
            stopped = true;
            break;
        }

        let leaf = select(&tree, config.exploration);
        let node = expand_and_pick(&mut tree, leaf, config.max_nodes, rng);
        max_depth = max_depth.max(tree.depth_of(node));

        let outcome = match tree.get(node).outcome {
            Some(decided) => Some(decided),
            None => {
                let n = tree.get(node);
                rollout(&n.position, n.to_move, config.rollout_depth, rng, &mut scratch)
            }
        };
        tree.backpropagate(node, outcome);
        iterations += 1;
    }

    trace!(iterations, nodes = tree.len(), max_depth, "mcts finished");

    let best = tree.most_visited_child();
    MctsOutcome {
        best_move: best.and_then(|n| n.mv),
        visits: best.map_or(0, |n| n.visits),
        value: best.map_or(0.0, |n| n.mean_reward()),
        iterations,
        nodes: tree.len(),
        max_depth,
        stopped,
    }
}

/// Descends through expanded nodes by UCB1 until reaching a node that is
/// unexpanded or terminal.
fn select(tree: &Tree, exploration: f64) -> NodeId {
    let mut id = Tree::ROOT;
    loop {
        let node = tree.get(id);
        if !node.expanded || node.is_terminal() {
            return id;
        }
        match tree.select_child(id, exploration) {
            Some(child) => id = child,
            None => return id,
        }
    }
}

/// Expands `leaf` and returns a random fresh child to simulate from, or
/// `leaf` itself when it is terminal or the arena is full.
fn expand_and_pick<R: Rng + ?Sized>(
    tree: &mut Tree,
    leaf: NodeId,
    max_nodes: Option<usize>,
    rng: &mut R,
) -> NodeId {
    let children = match max_nodes {
        Some(limit) if leaf != Tree::ROOT => tree.expand_within(leaf, limit),
        _ => tree.expand(leaf),
    };
    children.choose(rng).copied().unwrap_or(leaf)
}

/// Plays uniformly random legal moves for at most `max_plies` plies and
/// returns the winner, or `None` if the playout was cut off first.
pub fn rollout<R: Rng + ?Sized>(
    pos: &Position,
    to_move: Role,
    max_plies: u32,
    rng: &mut R,
    scratch: &mut Vec<Move>,
) -> Option<Role> {
    let mut pos = *pos;
    let mut side = to_move;
    for _ in 0..max_plies {
        if let Some(decided) = static_winner(&pos) {
            return Some(decided);
        }
        legal_moves_into(&pos, side, scratch);
        let Some(&mv) = scratch.choose(rng) else {
            return Some(side.other());
        };
        pos.apply_move(side, mv);
        side = side.other();
    }
    winner(&pos, side)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
