use super::*;

fn setup(s: &str) -> Position {
    Position::from_setup(s).unwrap()
}

#[test]
fn test_startpos_is_balanced() {
    let w = EvaluationWeights::default();
    let pos = Position::startpos();
    assert_eq!(evaluate(&pos, Role::White, &w), 0);
    assert_eq!(evaluate(&pos, Role::Black, &w), 0);
}

#[test]
fn test_perspective_sign_flip() {
    let w = EvaluationWeights::default();
    for s in [
        "Setup Wa2 Wc4 Bd7 Be5 Bh3",
        "Setup Wb6 Bg7 Bh7",
        "Setup Wd4 Be6",
    ] {
        let pos = setup(s);
        assert_eq!(
            evaluate(&pos, Role::White, &w),
            -evaluate(&pos, Role::Black, &w),
            "{s}"
        );
    }
}

#[test]
fn test_terminal_scores_dominate() {
    let w = EvaluationWeights::default();
    // White promoted even though Black has more material.
    let pos = setup("Setup Wa8 Bb7 Bc7 Bd7 Be2");
    assert_eq!(evaluate(&pos, Role::White, &w), w.win_score);
    assert_eq!(evaluate(&pos, Role::Black, &w), -w.win_score);

    let wiped = setup("Setup Bb7");
    assert_eq!(evaluate(&wiped, Role::Black, &w), w.win_score);
    assert!(w.is_decisive(evaluate(&wiped, Role::White, &w)));
}

#[test]
fn test_component_terms() {
    let w = EvaluationWeights::default();
    // Black c2: 6 steps, one from promotion, passed = 60 + 300 + 50.
    // White h3: 2 steps, passed = 20 + 50.
    let pos = setup("Setup Bc2 Wh3");
    assert_eq!(evaluate(&pos, Role::Black, &w), 410 - 70);
}

#[test]
fn test_material_counts() {
    let w = EvaluationWeights::default();
    // Mirror-image pawns cancel; the extra Black pawn is worth material plus its own terms.
    let even = setup("Setup Wa2 Ba7");
    let extra = setup("Setup Wa2 Ba7 Bh7");
    let diff = evaluate(&extra, Role::Black, &w) - evaluate(&even, Role::Black, &w);
    // h7: one step, passed (no White pawn on g/h files).
    assert_eq!(diff, w.material + 10 + 50);
}

#[test]
fn test_passed_pawn_detection() {
    let pos = setup("Setup Wd4 Be6 Wa4 Bh6");
    let sq = |c: &str| flags_core::coord_to_sq(c).unwrap();
    assert!(!is_passed(&pos, Role::White, sq("d4")));
    assert!(!is_passed(&pos, Role::Black, sq("e6")));
    assert!(is_passed(&pos, Role::White, sq("a4")));
    assert!(is_passed(&pos, Role::Black, sq("h6")));
}

#[test]
fn test_pawn_behind_is_not_a_blocker() {
    // The Black pawn on c3 has already passed White's d4.
    let pos = setup("Setup Wd4 Bc3");
    let sq = |c: &str| flags_core::coord_to_sq(c).unwrap();
    assert!(is_passed(&pos, Role::Black, sq("c3")));
    assert!(is_passed(&pos, Role::White, sq("d4")));
}

#[test]
fn test_weights_are_independent_per_side() {
    let mut w = EvaluationWeights::default();
    let pos = setup("Setup Wd4 Bd6 Bh7");
    let before = evaluate(&pos, Role::Black, &w);
    w.white.advancement = 0;
    let after = evaluate(&pos, Role::Black, &w);
    // White d4 has 3 steps; dropping its weight only removes the White penalty.
    assert_eq!(after - before, 30);
}

#[test]
fn test_weights_from_toml() {
    let w: EvaluationWeights = toml::from_str(
        r#"
        material = 120

        [white]
        passed_bonus = 80
        "#,
    )
    .unwrap();
    assert_eq!(w.material, 120);
    assert_eq!(w.white.passed_bonus, 80);
    assert_eq!(w.white.advancement, PawnWeights::default().advancement);
    assert_eq!(w.black, PawnWeights::default());
    assert_eq!(w.win_score, EvaluationWeights::default().win_score);
}
