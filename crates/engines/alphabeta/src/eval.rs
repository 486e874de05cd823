//! Static evaluation of pawn positions.
//!
//! The score is built from Black's point of view and negated for White:
//! - material difference
//! - advancement of every pawn toward its promotion row
//! - a flat bonus for a pawn one step from promotion
//! - a bonus for passed pawns
//!
//! Decided positions short-circuit to `±win_score`.

use flags_core::{Bitboard, Position, Role, col_of, row_of, static_winner};
use serde::{Deserialize, Serialize};

/// Per-side pawn terms. White's terms are subtracted from the Black-side score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PawnWeights {
    /// Per forward step already made
    pub advancement: i32,
    /// Pawn standing one step from its promotion row
    pub promotion_bonus: i32,
    /// No opposing pawn ahead on its own or an adjacent file
    pub passed_bonus: i32,
}

impl Default for PawnWeights {
    fn default() -> Self {
        Self {
            advancement: 10,
            promotion_bonus: 300,
            passed_bonus: 50,
        }
    }
}

/// Tunable evaluation coefficients, fixed for the lifetime of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationWeights {
    pub material: i32,
    /// Score of a decided game; dominates every heuristic term
    pub win_score: i32,
    pub white: PawnWeights,
    pub black: PawnWeights,
}

impl Default for EvaluationWeights {
    fn default() -> Self {
        Self {
            material: 100,
            win_score: 1_000_000,
            white: PawnWeights::default(),
            black: PawnWeights::default(),
        }
    }
}

impl EvaluationWeights {
    fn pawn(&self, role: Role) -> &PawnWeights {
        match role {
            Role::White => &self.white,
            Role::Black => &self.black,
        }
    }

    /// Scores at or beyond this magnitude mean the game is decided.
    pub fn is_decisive(&self, score: i32) -> bool {
        score.abs() >= self.win_score
    }
}

/// Squares that must be free of opposing pawns for the pawn of `role` on
/// `sq` to count as passed: every row strictly ahead, on its own file and
/// the two adjacent files.
pub fn passed_mask(role: Role, sq: u8) -> Bitboard {
    let col = col_of(sq);
    let mut files = Bitboard::file(col);
    if col > 0 {
        files |= Bitboard::file(col - 1);
    }
    if col < 7 {
        files |= Bitboard::file(col + 1);
    }
    files & Bitboard::rows_ahead(row_of(sq), role.forward())
}

#[inline]
pub fn is_passed(pos: &Position, role: Role, sq: u8) -> bool {
    (pos.pawns(role.other()) & passed_mask(role, sq)).is_empty()
}

/// Heuristic value of the pawns of `role`, always non-negative in
/// sensible weightings.
fn side_score(pos: &Position, role: Role, weights: &PawnWeights) -> i32 {
    let one_step = row_of_one_step(role);
    let mut score = 0;
    for sq in pos.pawns(role) {
        let row = row_of(sq);
        score += weights.advancement * role.progress(row) as i32;
        if row == one_step {
            score += weights.promotion_bonus;
        }
        if is_passed(pos, role, sq) {
            score += weights.passed_bonus;
        }
    }
    score
}

fn row_of_one_step(role: Role) -> u8 {
    (role.promotion_row() as i8 - role.forward()) as u8
}

/// Evaluates `pos` from `perspective`'s point of view.
///
/// Returns a score where:
/// - Positive = good for `perspective`
/// - `±weights.win_score` = game already won / lost
pub fn evaluate(pos: &Position, perspective: Role, weights: &EvaluationWeights) -> i32 {
    let black_view = match static_winner(pos) {
        Some(Role::Black) => weights.win_score,
        Some(Role::White) => -weights.win_score,
        None => {
            let material = weights.material
                * (pos.count(Role::Black) as i32 - pos.count(Role::White) as i32);
            material + side_score(pos, Role::Black, weights.pawn(Role::Black))
                - side_score(pos, Role::White, weights.pawn(Role::White))
        }
    };

    match perspective {
        Role::Black => black_view,
        Role::White => -black_view,
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
