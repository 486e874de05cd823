use alphabeta_engine::AlphaBetaEngine;
use flags_core::{Engine, Position, Role, SearchLimits, legal_moves};
use std::time::{Duration, Instant};

#[test]
fn test_tiny_budget_still_returns_a_legal_move() {
    let mut engine = AlphaBetaEngine::new();
    let positions = [
        Position::startpos(),
        Position::from_setup("Setup Wa2 Wb2 Wc2 Wf3 Bb7 Bc6 Bg7 Bh7").unwrap(),
    ];
    for pos in positions {
        for role in [Role::White, Role::Black] {
            let started = Instant::now();
            let limits = SearchLimits::depth_and_time(64, Duration::from_millis(10));
            let result = engine.search(&pos, role, limits);
            let mv = result.best_move.expect("a move when moves exist");
            assert!(legal_moves(&pos, role).contains(&mv));
            assert!(started.elapsed() < Duration::from_millis(500));
        }
    }
}
