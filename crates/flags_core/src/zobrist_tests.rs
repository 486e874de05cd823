use super::*;
use std::collections::HashSet;

#[test]
fn test_keys_are_distinct() {
    let mut seen = HashSet::new();
    for role in [Role::White, Role::Black] {
        for sq in 0..64 {
            assert!(seen.insert(ZOBRIST.pawn_key(role, sq)), "{role} {sq} repeats a key");
        }
    }
    assert!(seen.insert(ZOBRIST.side_to_move));
    assert!(!seen.contains(&0));
}

#[test]
fn test_keys_are_fixed_across_builds() {
    assert_eq!(ZobristKeys::new().pawns, ZOBRIST.pawns);
    assert_eq!(ZobristKeys::default().side_to_move, ZOBRIST.side_to_move);
}
