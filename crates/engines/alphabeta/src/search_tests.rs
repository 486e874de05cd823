use super::*;
use flags_core::is_legal;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use std::time::Duration;

fn setup(s: &str) -> Position {
    Position::from_setup(s).unwrap()
}

fn mv(txt: &str) -> Move {
    Move::parse(txt).unwrap()
}

fn no_tt() -> SearchConfig {
    SearchConfig {
        use_tt: false,
        tie_epsilon: 0,
        ..Default::default()
    }
}

fn run_with(pos: &Position, role: Role, depth: u8, config: &SearchConfig, seed: u64) -> SearchResult {
    let weights = EvaluationWeights::default();
    let mut tt = TranspositionTable::new();
    let tc = TimeControl::new(None);
    tc.start();
    let mut rng = StdRng::seed_from_u64(seed);
    Search::new(&weights, config, &mut tt, &tc).choose_move(pos, role, depth, &mut rng, |_| {})
}

/// Plain minimax without pruning, White maximizing.
fn minimax(pos: &Position, to_move: Role, depth: u8, w: &EvaluationWeights) -> i32 {
    let win = |r: Role| if r == Role::White { w.win_score } else { -w.win_score };
    if let Some(r) = static_winner(pos) {
        return win(r);
    }
    let moves = legal_moves(pos, to_move);
    if moves.is_empty() {
        return win(to_move.other());
    }
    if depth == 0 {
        return evaluate(pos, Role::White, w);
    }
    let scores = moves
        .iter()
        .map(|&m| minimax(&pos.with_move(to_move, m), to_move.other(), depth - 1, w));
    if to_move == Role::White {
        scores.max().unwrap()
    } else {
        scores.min().unwrap()
    }
}

const SUBGAMES: [&str; 4] = [
    "Setup Wb2 Wd4 Bc6 Be7",
    "Setup Wa2 Wc2 Bb7 Bd7",
    "Setup Wc4 Wf2 Bd6 Bf7 Bg5",
    "Setup Wb5 Bc7 Ba6",
];

#[test]
fn test_alpha_beta_matches_minimax() {
    let weights = EvaluationWeights::default();
    let config = no_tt();
    let tc = TimeControl::new(None);
    tc.start();

    for s in SUBGAMES {
        let pos = setup(s);
        for role in Role::BOTH {
            for depth in 1..=5 {
                let mut tt = TranspositionTable::new();
                let mut search = Search::new(&weights, &config, &mut tt, &tc);
                let (score, stopped) = search.alpha_beta(&pos, role, depth, -INF, INF);
                assert!(!stopped);
                assert_eq!(score, minimax(&pos, role, depth, &weights), "{s} {role} d{depth}");
            }
        }
    }
}

#[test]
fn test_root_move_and_value_match_minimax() {
    let weights = EvaluationWeights::default();
    for s in SUBGAMES {
        let pos = setup(s);
        for role in Role::BOTH {
            let result = run_with(&pos, role, 4, &no_tt(), 3);
            let Some(best) = result.best_move else {
                continue;
            };
            if is_promotion(role, best) {
                continue;
            }
            // A search that ended early on a proven result reports that depth.
            let depth = result.depth;
            let root = perspective(minimax(&pos, role, depth, &weights), role);
            assert_eq!(result.score, root, "{s} {role}");
            let child = minimax(&pos.with_move(role, best), role.other(), depth - 1, &weights);
            assert_eq!(perspective(child, role), root, "{s} {role} {best}");
        }
    }
}

#[test]
fn test_transposition_table_keeps_proven_results() {
    let pos = setup("Setup Wb1 Wh4 Bc2 Bh7");
    let with_tt = run_with(&pos, Role::White, 6, &SearchConfig::default(), 1);
    let without = run_with(&pos, Role::White, 6, &no_tt(), 1);
    assert_eq!(with_tt.best_move, without.best_move);
    assert_eq!(with_tt.best_move, Some(mv("b1c2")));
}

#[test]
fn test_white_captures_to_stop_promotion() {
    // Black c2 promotes next move unless White takes it.
    let pos = setup("Setup Wb1 Wh4 Bc2 Bh7");
    let result = run_with(&pos, Role::White, 4, &SearchConfig::default(), 11);
    assert_eq!(result.best_move, Some(mv("b1c2")));
}

#[test]
fn test_black_captures_to_stop_promotion() {
    let pos = setup("Setup Bg8 Ba7 Wf7 Wa2");
    let result = run_with(&pos, Role::Black, 4, &SearchConfig::default(), 11);
    assert_eq!(result.best_move, Some(mv("g8f7")));
}

#[test]
fn test_immediate_promotion_skips_search() {
    let pos = setup("Setup Wc7 Wa2 Bh2 Bb7");
    let result = run_with(&pos, Role::White, 8, &SearchConfig::default(), 0);
    assert_eq!(result.best_move, Some(mv("c7c8")));
    assert_eq!(result.nodes, 0);
    assert_eq!(result.depth, 0);
}

#[test]
fn test_no_legal_move_returns_verdict() {
    let pos = setup("Setup Wa2 Ba3 Bh7");
    let result = run_with(&pos, Role::White, 4, &SearchConfig::default(), 0);
    assert!(result.best_move.is_none());
    assert_eq!(result.winner, Some(Role::Black));
    assert_eq!(result.nodes, 0);
}

#[test]
fn test_tiny_budget_still_returns_legal_move() {
    let pos = Position::startpos();
    let weights = EvaluationWeights::default();
    let config = SearchConfig::default();
    let mut tt = TranspositionTable::new();
    let tc = TimeControl::new(Some(Duration::from_millis(10)));
    tc.start();
    let mut rng = StdRng::seed_from_u64(5);
    let result = Search::new(&weights, &config, &mut tt, &tc).choose_move(
        &pos,
        Role::White,
        MAX_DEPTH,
        &mut rng,
        |_| {},
    );
    let best = result.best_move.expect("a legal move");
    assert!(is_legal(&pos, Role::White, best));
    assert!(result.stopped);
}

#[test]
fn test_stopped_before_start_falls_back_to_first_move() {
    let pos = Position::startpos();
    let weights = EvaluationWeights::default();
    let config = SearchConfig::default();
    let mut tt = TranspositionTable::new();
    let tc = TimeControl::new(None);
    tc.start();
    tc.stop();
    let mut rng = StdRng::seed_from_u64(5);
    let result =
        Search::new(&weights, &config, &mut tt, &tc).choose_move(&pos, Role::Black, 6, &mut rng, |_| {});
    assert_eq!(result.best_move, Some(legal_moves(&pos, Role::Black)[0]));
    assert_eq!(result.depth, 0);
    assert!(result.stopped);
}

#[test]
fn test_depth_reports_increase() {
    let pos = Position::startpos();
    let weights = EvaluationWeights::default();
    let config = SearchConfig::default();
    let mut tt = TranspositionTable::new();
    let tc = TimeControl::new(None);
    tc.start();
    let mut rng = StdRng::seed_from_u64(2);
    let mut depths = Vec::new();
    let result = Search::new(&weights, &config, &mut tt, &tc).choose_move(
        &pos,
        Role::White,
        3,
        &mut rng,
        |report| depths.push(report.depth),
    );
    assert_eq!(depths, vec![1, 2, 3]);
    assert_eq!(result.depth, 3);
    assert!(!result.stopped);
}

#[test]
fn test_ties_are_broken_randomly() {
    // Mirror-image wings: a2a4 and h2h4 always score the same.
    let pos = setup("Setup Wa2 Wh2 Ba7 Bh7");
    let mut chosen = HashSet::new();
    for seed in 0..64 {
        let result = run_with(&pos, Role::White, 1, &SearchConfig::default(), seed);
        chosen.insert(result.best_move.unwrap());
    }
    assert_eq!(chosen, HashSet::from([mv("a2a4"), mv("h2h4")]));
}

#[test]
fn test_same_seed_same_move() {
    let pos = Position::startpos();
    let a = run_with(&pos, Role::Black, 2, &SearchConfig::default(), 42);
    let b = run_with(&pos, Role::Black, 2, &SearchConfig::default(), 42);
    assert_eq!(a.best_move, b.best_move);
    assert_eq!(a.score, b.score);
}

#[test]
fn test_exhausted_tree_stops_early() {
    // One pawn each, far apart: the game ends within a handful of plies.
    let pos = setup("Setup Wa4 Bh5");
    let result = run_with(&pos, Role::White, MAX_DEPTH, &SearchConfig::default(), 0);
    assert!(result.depth < MAX_DEPTH);
    assert_eq!(result.best_move, Some(mv("a4a5")));
}
