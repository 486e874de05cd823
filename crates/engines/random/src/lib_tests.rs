use super::*;
use flags_core::{Decision, is_legal, legal_moves};
use std::collections::HashSet;

#[test]
fn random_engine_returns_legal_move() {
    let mut engine = RandomEngine::seeded(1);
    let pos = Position::startpos();

    for role in Role::BOTH {
        let result = engine.search(&pos, role, SearchLimits::depth(1));
        assert!(is_legal(&pos, role, result.best_move.unwrap()));
    }
}

#[test]
fn random_engine_covers_all_moves() {
    let mut engine = RandomEngine::seeded(2);
    let pos = Position::from_setup("Setup Wb2 Wh4 Bc3 Bg6").unwrap();
    let seen: HashSet<_> = (0..200)
        .filter_map(|_| engine.search(&pos, Role::White, SearchLimits::depth(1)).best_move)
        .collect();
    let all: HashSet<_> = legal_moves(&pos, Role::White).into_iter().collect();
    assert_eq!(seen, all);
}

#[test]
fn random_engine_handles_promotion_loss() {
    let mut engine = RandomEngine::seeded(3);
    let pos = Position::from_setup("Setup Wa8 Bb7 Bc7").unwrap();
    let result = engine.search(&pos, Role::Black, SearchLimits::depth(1));

    assert!(result.best_move.is_none());
    assert_eq!(result.decision(Role::Black), Decision::Verdict(Role::White));
}

#[test]
fn random_engine_handles_stalemate() {
    let mut engine = RandomEngine::seeded(4);
    let pos = Position::from_setup("Setup Wd3 Bd4").unwrap();
    let result = engine.search(&pos, Role::Black, SearchLimits::depth(1));

    assert!(result.best_move.is_none());
    assert_eq!(result.winner, Some(Role::White));
}

#[test]
fn random_engine_seed_is_reproducible() {
    let pos = Position::startpos();
    let mut a = RandomEngine::seeded(9);
    let mut b = RandomEngine::seeded(9);
    for _ in 0..10 {
        assert_eq!(
            a.search(&pos, Role::White, SearchLimits::depth(1)).best_move,
            b.search(&pos, Role::White, SearchLimits::depth(1)).best_move
        );
    }
}
