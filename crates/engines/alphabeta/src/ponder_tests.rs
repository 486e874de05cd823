use super::*;
use flags_core::{is_legal, legal_moves};
use std::thread::sleep;
use std::time::{Duration, Instant};

fn start(pos: Position, to_move: Role) -> Ponderer {
    Ponderer::start(
        pos,
        to_move,
        EvaluationWeights::default(),
        SearchConfig::default(),
        TranspositionTable::new(),
        9,
    )
}

#[test]
fn test_publishes_reports_while_running() {
    let pos = Position::startpos();
    let mut ponderer = start(pos, Role::Black);

    let deadline = Instant::now() + Duration::from_secs(5);
    let mut report = None;
    while report.is_none() && Instant::now() < deadline {
        sleep(Duration::from_millis(10));
        report = ponderer.latest();
    }

    let report = report.expect("at least one depth completes");
    assert!(report.depth >= 1);
    assert!(is_legal(&pos, Role::Black, report.best_move));

    let expected = ponderer.expected_position().unwrap();
    assert_eq!(expected, pos.with_move(Role::Black, report.best_move));
}

#[test]
fn test_stop_is_prompt_and_returns_table() {
    let mut ponderer = start(Position::startpos(), Role::White);
    sleep(Duration::from_millis(100));
    assert!(!ponderer.is_finished());
    let seen = ponderer.latest();

    let begin = Instant::now();
    let (latest, tt) = ponderer.stop();
    assert!(begin.elapsed() < Duration::from_secs(1));
    assert!(!tt.is_empty());
    // The final drain can only add newer depths.
    if let (Some(seen), Some(latest)) = (seen, latest) {
        assert!(latest.depth >= seen.depth);
    }
}

#[test]
fn test_small_game_finishes_on_its_own() {
    // Both sides race on opposite wings; the whole tree is tiny.
    let pos = Position::from_setup("Setup Wa4 Bh5").unwrap();
    let ponderer = start(pos, Role::White);

    let deadline = Instant::now() + Duration::from_secs(5);
    while !ponderer.is_finished() && Instant::now() < deadline {
        sleep(Duration::from_millis(5));
    }
    assert!(ponderer.is_finished());

    let (latest, _) = ponderer.stop();
    let latest = latest.unwrap();
    assert_eq!(Some(latest.best_move), legal_moves(&pos, Role::White).first().copied());
    assert_eq!(latest.score, EvaluationWeights::default().win_score);
}

#[test]
fn test_drop_stops_thread() {
    let ponderer = start(Position::startpos(), Role::White);
    sleep(Duration::from_millis(20));
    let begin = Instant::now();
    drop(ponderer);
    assert!(begin.elapsed() < Duration::from_secs(1));
}
