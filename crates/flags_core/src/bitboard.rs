//! Pawn sets as 64-bit masks.
//!
//! Bit `row * 8 + col` is set when a pawn stands there. Row 0 is rank 8, so
//! bit 0 = a8 and bit 63 = h1.

use crate::types::Role;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bitboard(pub u64);

const COL_A: u64 = 0x0101_0101_0101_0101;
const COL_H: u64 = COL_A << 7;

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    #[inline(always)]
    pub const fn from_square(sq: u8) -> Self {
        Bitboard(1u64 << sq)
    }

    /// Row `row`, where 0 is rank 8.
    #[inline(always)]
    pub const fn row(row: u8) -> Self {
        Bitboard(0xFFu64 << (row * 8))
    }

    /// Column `col`, where 0 is file a.
    #[inline(always)]
    pub const fn file(col: u8) -> Self {
        Bitboard(COL_A << col)
    }

    /// Squares where `role` has promoted.
    #[inline(always)]
    pub const fn promotion_row(role: Role) -> Self {
        Self::row(role.promotion_row())
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn contains(self, sq: u8) -> bool {
        self.0 & (1u64 << sq) != 0
    }

    #[inline(always)]
    pub fn set(&mut self, sq: u8) {
        self.0 |= 1u64 << sq;
    }

    #[inline(always)]
    pub fn clear(&mut self, sq: u8) {
        self.0 &= !(1u64 << sq);
    }

    #[inline(always)]
    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    /// Every pawn moved one row in `role`'s forward direction. Pawns on the
    /// last row fall off.
    #[inline(always)]
    pub const fn advance(self, role: Role) -> Bitboard {
        match role {
            Role::White => Bitboard(self.0 >> 8),
            Role::Black => Bitboard(self.0 << 8),
        }
    }

    /// One column toward file a; column a drops out.
    #[inline(always)]
    pub const fn toward_a(self) -> Bitboard {
        Bitboard((self.0 & !COL_A) >> 1)
    }

    /// One column toward file h; column h drops out.
    #[inline(always)]
    pub const fn toward_h(self) -> Bitboard {
        Bitboard((self.0 & !COL_H) << 1)
    }

    /// Rows strictly beyond `row` in the direction given by `forward`
    /// (-1 toward row 0, +1 toward row 7).
    pub fn rows_ahead(row: u8, forward: i8) -> Bitboard {
        let mut mask = Bitboard::EMPTY;
        let mut r = row as i8 + forward;
        while (0..8).contains(&r) {
            mask |= Bitboard::row(r as u8);
            r += forward;
        }
        mask
    }
}

impl BitAnd for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitOr for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self {
        Bitboard(!self.0)
    }
}

/// Squares in ascending order, which is the move generation order.
impl Iterator for Bitboard {
    type Item = u8;

    #[inline(always)]
    fn next(&mut self) -> Option<u8> {
        if self.0 == 0 {
            return None;
        }
        let sq = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(sq)
    }
}

#[cfg(test)]
#[path = "bitboard_tests.rs"]
mod bitboard_tests;
