//! Terminal-condition detection.
//!
//! Checked in priority order:
//! 1. Promotion: a White pawn on row 0 or a Black pawn on row 7 wins.
//! 2. Annihilation: a side without pawns loses.
//! 3. Stalemate: the side to move without a legal move loses.

use crate::{bitboard::Bitboard, board::Position, movegen::has_legal_move, types::Role};

/// Promotion and annihilation checks; these do not depend on who is to move.
pub fn static_winner(pos: &Position) -> Option<Role> {
    if !(pos.white & Bitboard::promotion_row(Role::White)).is_empty() {
        return Some(Role::White);
    }
    if !(pos.black & Bitboard::promotion_row(Role::Black)).is_empty() {
        return Some(Role::Black);
    }
    if pos.white.is_empty() {
        return Some(Role::Black);
    }
    if pos.black.is_empty() {
        return Some(Role::White);
    }
    None
}

/// The winner of `pos` with `to_move` about to act, if the game is over.
pub fn winner(pos: &Position, to_move: Role) -> Option<Role> {
    if let Some(role) = static_winner(pos) {
        return Some(role);
    }
    if !has_legal_move(pos, to_move) {
        return Some(to_move.other());
    }
    None
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod outcome_tests;
