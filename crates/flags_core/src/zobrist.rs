//! Zobrist keys: one per (side, square) plus one for Black to move.
//! A position's key is the XOR of the keys that apply to it.

use crate::types::Role;

pub struct ZobristKeys {
    /// Indexed by [role][square]
    pub pawns: [[u64; 64]; 2],
    /// XOR-ed in when Black is on move
    pub side_to_move: u64,
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristKeys {
    /// Fills the tables from a fixed xorshift64 stream.
    pub const fn new() -> Self {
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = 0x2F1A6C0DE5B3917Eu64;

        let mut pawns = [[0u64; 64]; 2];
        let mut side = 0;
        while side < 2 {
            let mut sq = 0;
            while sq < 64 {
                state = xorshift64(state);
                pawns[side][sq] = state;
                sq += 1;
            }
            side += 1;
        }

        state = xorshift64(state);
        let side_to_move = state;

        ZobristKeys {
            pawns,
            side_to_move,
        }
    }

    #[inline(always)]
    pub fn pawn_key(&self, role: Role, sq: u8) -> u64 {
        self.pawns[role.idx()][sq as usize]
    }
}

/// Keys built at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
