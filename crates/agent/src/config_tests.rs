use super::*;

#[test]
fn test_full_config() {
    let config = AgentConfig::from_toml_str(
        r#"
        engine = "mcts"
        ponder = true

        [weights]
        material = 150

        [weights.black]
        passed_bonus = 70

        [search]
        tie_epsilon = 0

        [mcts]
        exploration = 1.0
        rollout_depth = 32

        [depth]
        opening_moves = 2
        opening_depth = 3

        [time]
        moves_to_go = 40
        "#,
    )
    .unwrap();

    assert_eq!(config.engine, EngineKind::Mcts);
    assert!(config.ponder);
    assert_eq!(config.weights.material, 150);
    assert_eq!(config.weights.black.passed_bonus, 70);
    assert_eq!(config.weights.white, EvaluationWeights::default().white);
    assert_eq!(config.search.tie_epsilon, 0);
    assert!(config.search.use_tt);
    assert_eq!(config.mcts.rollout_depth, 32);
    assert_eq!(config.depth.depth_for(0), 3);
    assert_eq!(config.time.moves_to_go, 40);
    assert_eq!(config.time.max_ms, TimePolicy::default().max_ms);
}

#[test]
fn test_empty_config_is_default() {
    assert_eq!(AgentConfig::from_toml_str("").unwrap(), AgentConfig::default());
    assert_eq!(AgentConfig::default().engine, EngineKind::AlphaBeta);
}

#[test]
fn test_unknown_engine_kind() {
    assert!(AgentConfig::from_toml_str("engine = \"stockfish\"").is_err());
    assert!("stockfish".parse::<EngineKind>().is_err());
    assert_eq!("MCTS".parse::<EngineKind>().unwrap(), EngineKind::Mcts);
}

#[test]
fn test_build_engine_by_kind() {
    let mut config = AgentConfig::default();
    config.set_seed(1);
    assert_eq!(config.build_engine().name(), "AlphaBeta v1.0");
    config.engine = EngineKind::Mcts;
    assert_eq!(config.build_engine().name(), "MCTS v1.0");
    config.engine = EngineKind::Random;
    assert_eq!(config.build_engine().name(), "Random v1.0");
}

#[test]
fn test_missing_file() {
    assert!(AgentConfig::load(Path::new("/nonexistent/agent.toml")).is_err());
}
