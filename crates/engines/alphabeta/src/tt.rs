//! Transposition table keyed by Zobrist hash of (position, side to move).

use std::collections::HashMap;

use flags_core::{Position, Role};

/// How the stored score relates to the true minimax value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    /// True value is at least the score (search failed high)
    Lower,
    /// True value is at most the score (search failed low)
    Upper,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtEntry {
    /// Remaining depth the score was searched to
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
}

/// Overwrite cache private to one search thread.
///
/// Entries are only trusted when their depth covers the requested depth, so
/// a stale entry can cost speed but never correctness.
#[derive(Debug, Default, Clone)]
pub struct TranspositionTable {
    entries: HashMap<u64, TtEntry>,
    capacity: usize,
}

impl TranspositionTable {
    /// Default entry cap, a few tens of megabytes.
    pub const DEFAULT_CAPACITY: usize = 1 << 20;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn key(pos: &Position, to_move: Role) -> u64 {
        pos.hash(to_move)
    }

    /// Returns the entry for `key` if it was searched at least `depth` deep.
    pub fn probe(&self, key: u64, depth: u8) -> Option<TtEntry> {
        self.entries
            .get(&key)
            .copied()
            .filter(|entry| entry.depth >= depth)
    }

    pub fn store(&mut self, key: u64, entry: TtEntry) {
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            // Full: start over rather than track ages.
            self.entries.clear();
        }
        self.entries.insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
