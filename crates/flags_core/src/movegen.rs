use crate::{board::Position, error::IllegalReason, types::*};

/// Checks `mv` for `role` and reports why it is illegal.
///
/// - The source must hold one of the mover's pawns.
/// - A straight step needs an empty destination.
/// - A double step is only allowed from the home row and may not jump.
/// - A diagonal step by one file is only allowed as a capture.
pub fn validate_move(pos: &Position, role: Role, mv: Move) -> Result<(), IllegalReason> {
    if !pos.pawns(role).contains(mv.from) {
        return Err(IllegalReason::NoPawnAtSource);
    }

    let (fr, fc) = (row_of(mv.from) as i8, col_of(mv.from) as i8);
    let (tr, tc) = (row_of(mv.to) as i8, col_of(mv.to) as i8);
    // Row delta expressed in the mover's forward direction.
    let steps = (tr - fr) * role.forward();
    let col_diff = tc - fc;

    if steps <= 0 {
        return Err(IllegalReason::WrongDirection);
    }

    match (steps, col_diff) {
        (1, 0) => {
            if !pos.is_empty_sq(mv.to) {
                return Err(IllegalReason::DestinationOccupied);
            }
            Ok(())
        }
        (2, 0) => {
            if fr as u8 != role.home_row() {
                return Err(IllegalReason::DoubleStepOffHomeRow);
            }
            let mid = (mv.from as i8 + 8 * role.forward()) as u8;
            if !pos.is_empty_sq(mid) {
                return Err(IllegalReason::JumpOverPawn);
            }
            if !pos.is_empty_sq(mv.to) {
                return Err(IllegalReason::DestinationOccupied);
            }
            Ok(())
        }
        (1, -1) | (1, 1) => {
            if pos.pawns(role.other()).contains(mv.to) {
                Ok(())
            } else {
                Err(IllegalReason::DiagonalWithoutCapture)
            }
        }
        _ => Err(IllegalReason::UnsupportedPattern),
    }
}

#[inline]
pub fn is_legal(pos: &Position, role: Role, mv: Move) -> bool {
    validate_move(pos, role, mv).is_ok()
}

/// True when `mv` lands on `role`'s promotion row, which wins the game.
#[inline]
pub fn is_promotion(role: Role, mv: Move) -> bool {
    row_of(mv.to) == role.promotion_row()
}

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(pos: &Position, role: Role) -> Vec<Move> {
    let mut out = Vec::with_capacity(32);
    legal_moves_into(pos, role, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
///
/// Order is row-major over the mover's pawns (row 0 first, columns
/// ascending), then per pawn: single step, double step, capture toward
/// file a, capture toward file h. Search relies on this order for
/// reproducible tie-breaking.
pub fn legal_moves_into(pos: &Position, role: Role, out: &mut Vec<Move>) {
    out.clear();
    let fwd = role.forward();
    for from in pos.pawns(role) {
        let r = row_of(from) as i8;
        let c = col_of(from) as i8;

        let mut candidates = [None; 4];
        candidates[0] = sq(r + fwd, c);
        if r as u8 == role.home_row() {
            candidates[1] = sq(r + 2 * fwd, c);
        }
        candidates[2] = sq(r + fwd, c - 1);
        candidates[3] = sq(r + fwd, c + 1);

        for to in candidates.into_iter().flatten() {
            let mv = Move::new(from, to);
            if is_legal(pos, role, mv) {
                out.push(mv);
            }
        }
    }
}

/// Whether `role` has at least one legal move, without allocating.
pub fn has_legal_move(pos: &Position, role: Role) -> bool {
    let empty = !pos.occupied();
    let opp = pos.pawns(role.other());
    let step = pos.pawns(role).advance(role);
    // A double step is only possible when the single step is, so it adds nothing.
    !(step & empty).is_empty() || !((step.toward_a() | step.toward_h()) & opp).is_empty()
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
