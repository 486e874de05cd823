//! Line protocol spoken between a player and the game server.
//!
//! The server opens with a free-form greeting, then sends `Setup …`,
//! `Time <minutes>`, `Begin` and `Role <White|Black>`, answering each of
//! the first three with `OK`. After that every line is a 4-character move
//! (`e2e4`) or `exit` / `gameover`. A player that has no legal move
//! answers with its verdict, `win: <Role>`, which the server relays to the
//! other player as the last line of the game.

use std::time::Duration;

use tracing::{debug, info};

use crate::{
    board::Position,
    error::FlagsError,
    movegen::validate_move,
    outcome::winner,
    types::{Decision, Move, Role},
};

/// Acknowledgement sent after each handshake step.
pub const ACK: &str = "OK";

/// One line received from the server.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    Setup(Position),
    /// Match clock for each player.
    Time(Duration),
    Begin,
    Role(Role),
    Move(Move),
    /// The opponent's verdict, relayed when it had no legal move.
    Verdict(Role),
    Exit,
    /// Anything else, such as the greeting.
    Text(String),
}

pub fn parse_server_line(line: &str) -> Result<ServerMessage, FlagsError> {
    let line = line.trim();
    let mut parts = line.split_whitespace();
    let head = parts.next().unwrap_or("");

    match head.to_ascii_lowercase().as_str() {
        "setup" => Ok(ServerMessage::Setup(Position::from_setup(line)?)),
        "time" => {
            let minutes: f64 = parts
                .next()
                .and_then(|m| m.parse().ok())
                .filter(|m: &f64| m.is_finite() && *m >= 0.0)
                .ok_or_else(|| FlagsError::MalformedMessage(line.to_string()))?;
            Ok(ServerMessage::Time(Duration::from_secs_f64(minutes * 60.0)))
        }
        "begin" => Ok(ServerMessage::Begin),
        "role" => {
            let role = parts
                .next()
                .ok_or_else(|| FlagsError::MalformedMessage(line.to_string()))?;
            Ok(ServerMessage::Role(role.parse()?))
        }
        "exit" | "gameover" => Ok(ServerMessage::Exit),
        "win:" => {
            let role = parts
                .next()
                .ok_or_else(|| FlagsError::MalformedMessage(line.to_string()))?;
            Ok(ServerMessage::Verdict(role.parse()?))
        }
        _ if head.len() == 4 && head == line => match Move::parse(line) {
            Ok(mv) => Ok(ServerMessage::Move(mv)),
            Err(_) => Ok(ServerMessage::Text(line.to_string())),
        },
        _ => Ok(ServerMessage::Text(line.to_string())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Greeting,
    Setup,
    Time,
    Begin,
    Role,
    Playing,
    Finished,
}

/// What the player should do after a line has been handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Send this line back.
    Reply(&'static str),
    /// Nothing to send; read the next line.
    Wait,
    /// It is our move: run the engine and [`Session::commit`] its decision.
    Think,
    /// The game ended, with the winner when one is known.
    GameOver(Option<Role>),
}

/// Player-side protocol state: handshake progress and the authoritative
/// position, which only changes once a move is committed.
#[derive(Debug, Clone)]
pub struct Session {
    phase: Phase,
    position: Position,
    role: Option<Role>,
    clock: Option<Duration>,
    plies: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Greeting,
            position: Position::empty(),
            role: None,
            clock: None,
            plies: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Our side, once the server has assigned it.
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Match clock announced by the server.
    pub fn clock(&self) -> Option<Duration> {
        self.clock
    }

    /// Half-moves played so far.
    pub fn plies(&self) -> u32 {
        self.plies
    }

    /// Moves we have made so far.
    pub fn own_moves(&self) -> u32 {
        match self.role {
            Some(Role::White) => self.plies.div_ceil(2),
            Some(Role::Black) => self.plies / 2,
            None => 0,
        }
    }

    /// White moves on even plies.
    pub fn to_move(&self) -> Role {
        if self.plies.is_multiple_of(2) {
            Role::White
        } else {
            Role::Black
        }
    }

    fn our_turn(&self) -> bool {
        self.role == Some(self.to_move())
    }

    pub fn handle_line(&mut self, line: &str) -> Result<Step, FlagsError> {
        let msg = parse_server_line(line)?;
        debug!(phase = ?self.phase, ?msg, "server message");

        match msg {
            ServerMessage::Exit => {
                self.phase = Phase::Finished;
                return Ok(Step::GameOver(winner(&self.position, self.to_move())));
            }
            ServerMessage::Verdict(role) if self.phase == Phase::Playing => {
                info!(winner = %role, "verdict received");
                self.phase = Phase::Finished;
                return Ok(Step::GameOver(Some(role)));
            }
            _ => {}
        }

        match (self.phase, msg) {
            (Phase::Greeting, _) => {
                self.phase = Phase::Setup;
                Ok(Step::Reply(ACK))
            }
            (Phase::Setup, ServerMessage::Setup(pos)) => {
                self.position = pos;
                self.phase = Phase::Time;
                Ok(Step::Reply(ACK))
            }
            (Phase::Time, ServerMessage::Time(clock)) => {
                self.clock = Some(clock);
                self.phase = Phase::Begin;
                Ok(Step::Reply(ACK))
            }
            (Phase::Begin, ServerMessage::Begin) => {
                self.phase = Phase::Role;
                Ok(Step::Wait)
            }
            (Phase::Role, ServerMessage::Role(role)) => {
                info!(%role, "role assigned");
                self.role = Some(role);
                self.phase = Phase::Playing;
                Ok(self.next_step())
            }
            (Phase::Playing, ServerMessage::Move(mv)) if !self.our_turn() => {
                self.play(mv)?;
                Ok(self.next_step())
            }
            (phase, msg) => Err(FlagsError::UnexpectedMessage {
                expected: expected_for(phase),
                got: format!("{msg:?}"),
            }),
        }
    }

    /// Records our own decision. A move is validated and applied to the
    /// authoritative position; a verdict ends the session.
    pub fn commit(&mut self, decision: Decision) -> Result<(), FlagsError> {
        match decision {
            Decision::Play(mv) => self.play(mv),
            Decision::Verdict(_) => {
                self.phase = Phase::Finished;
                Ok(())
            }
        }
    }

    fn play(&mut self, mv: Move) -> Result<(), FlagsError> {
        let role = self.to_move();
        validate_move(&self.position, role, mv)
            .map_err(|reason| FlagsError::IllegalMove { mv, role, reason })?;
        self.position.apply_move(role, mv);
        self.plies += 1;
        Ok(())
    }

    /// What to do now: stop when the game is decided, think when it is our
    /// turn, wait otherwise.
    pub fn next_step(&mut self) -> Step {
        if let Some(role) = crate::outcome::static_winner(&self.position) {
            self.phase = Phase::Finished;
            return Step::GameOver(Some(role));
        }
        if self.our_turn() {
            Step::Think
        } else {
            Step::Wait
        }
    }
}

fn expected_for(phase: Phase) -> &'static str {
    match phase {
        Phase::Greeting => "greeting",
        Phase::Setup => "Setup message",
        Phase::Time => "Time message",
        Phase::Begin => "Begin",
        Phase::Role => "Role assignment",
        Phase::Playing => "opponent move",
        Phase::Finished => "nothing after game over",
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod protocol_tests;
