use super::*;
use crate::config::EngineKind;
use crate::policy::DepthSchedule;
use flags_core::{ACK, Move, Position, Role};
use std::io::Cursor;

fn quick_config(engine: EngineKind) -> AgentConfig {
    let mut config = AgentConfig {
        engine,
        depth: DepthSchedule::fixed(3),
        ..Default::default()
    };
    config.set_seed(7);
    config
}

fn feed(player: &mut Player, lines: &[&str]) -> (Vec<String>, Flow) {
    let mut out = Vec::new();
    let mut flow = Flow::Continue;
    for line in lines {
        flow = player.handle_line(line, &mut out).unwrap();
    }
    let text = String::from_utf8(out).unwrap();
    (text.lines().map(str::to_string).collect(), flow)
}

fn handshake<'a>(setup: &'a str, role: &'a str) -> Vec<&'a str> {
    vec!["Connected to the server!", setup, "Time 30", "Begin", role]
}

#[test]
fn test_plays_a_short_game_as_white() {
    let mut player = Player::new(quick_config(EngineKind::AlphaBeta));

    let (sent, flow) = feed(&mut player, &handshake("Setup Wa5 Bh6", "Role White"));
    assert_eq!(sent, [ACK, ACK, ACK, "a5a6"]);
    assert_eq!(flow, Flow::Continue);

    let (sent, flow) = feed(&mut player, &["h6h5"]);
    assert_eq!(sent, ["a6a7"]);
    assert_eq!(flow, Flow::Continue);

    let (sent, flow) = feed(&mut player, &["h5h4"]);
    assert_eq!(sent, ["a7a8"]);
    assert_eq!(flow, Flow::Finished);
    assert_eq!(player.session().plies(), 5);
}

#[test]
fn test_black_without_moves_sends_verdict() {
    let mut player = Player::new(quick_config(EngineKind::AlphaBeta));
    let (sent, flow) = feed(&mut player, &handshake("Setup Wd3 Bd4 Wa2", "Role Black"));
    assert_eq!(sent, [ACK, ACK, ACK]);
    assert_eq!(flow, Flow::Continue);

    let (sent, flow) = feed(&mut player, &["a2a3"]);
    assert_eq!(sent, ["win: White"]);
    assert_eq!(flow, Flow::Finished);
}

#[test]
fn test_opponent_promotion_ends_game() {
    let mut player = Player::new(quick_config(EngineKind::Random));
    feed(&mut player, &handshake("Setup Wa7 Bh5", "Role Black"));
    let (sent, flow) = feed(&mut player, &["a7a8"]);
    assert!(sent.is_empty());
    assert_eq!(flow, Flow::Finished);
}

#[test]
fn test_illegal_opponent_move_is_an_error() {
    let mut player = Player::new(quick_config(EngineKind::Random));
    let lines = handshake(flags_core::STANDARD_SETUP, "Role Black");
    feed(&mut player, &lines);

    let mut out = Vec::new();
    let err = player.handle_line("a2a5", &mut out).unwrap_err();
    assert!(format!("{err:#}").contains("a2a5"));
    assert!(out.is_empty());
}

#[test]
fn test_exit_finishes_session() {
    let mut player = Player::new(quick_config(EngineKind::Mcts));
    feed(&mut player, &handshake(flags_core::STANDARD_SETUP, "Role Black"));
    let (sent, flow) = feed(&mut player, &["exit"]);
    assert!(sent.is_empty());
    assert_eq!(flow, Flow::Finished);
}

#[test]
fn test_run_reads_until_game_over() {
    let script = "Connected to the server!\nSetup Wa5 Bh6\nTime 30\nBegin\nRole White\nh6h5\n\nh5h4\nexit\n";
    let mut player = Player::new(quick_config(EngineKind::AlphaBeta));
    let mut out = Vec::new();
    player.run(Cursor::new(script), &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "OK\nOK\nOK\na5a6\na6a7\na7a8\n");
    assert_eq!(player.session().role(), Some(Role::White));
}

#[test]
fn test_pondering_player_keeps_playing() {
    let mut config = quick_config(EngineKind::AlphaBeta);
    config.ponder = true;
    let mut player = Player::new(config);

    let (sent, _) = feed(&mut player, &handshake(flags_core::STANDARD_SETUP, "Role White"));
    assert_eq!(sent.len(), 4);
    let first = Move::parse(&sent[3]).unwrap();
    assert!(flags_core::legal_moves(&Position::startpos(), Role::White).contains(&first));

    let (sent, flow) = feed(&mut player, &["a7a6"]);
    assert_eq!(sent.len(), 1);
    assert_eq!(flow, Flow::Continue);
    assert_eq!(player.session().plies(), 3);
}

#[test]
fn test_opponent_verdict_finishes_session() {
    let mut player = Player::new(quick_config(EngineKind::AlphaBeta));
    let (sent, flow) = feed(&mut player, &handshake("Setup Wa2 Wd3 Bd4", "Role White"));
    assert_eq!(sent.len(), 4);
    assert_eq!(flow, Flow::Continue);

    // Every White move leaves Black blocked, so Black's verdict is relayed.
    let (sent, flow) = feed(&mut player, &["win: White"]);
    assert!(sent.is_empty());
    assert_eq!(flow, Flow::Finished);
}
