//! Drives one engine through a game over any line-based transport.

use anyhow::{Context, Result};
use flags_core::{Decision, Engine, SearchLimits, Session, Step};
use std::io::{BufRead, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::AgentConfig;

/// Whether the read loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Finished,
}

pub struct Player {
    session: Session,
    engine: Box<dyn Engine>,
    config: AgentConfig,
    /// Our own thinking time so far
    used: Duration,
}

impl Player {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            session: Session::new(),
            engine: config.build_engine(),
            config,
            used: Duration::ZERO,
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Reads server lines until the game ends or the input closes.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read from server")?;
            if line.trim().is_empty() {
                continue;
            }
            if self.handle_line(&line, out)? == Flow::Finished {
                break;
            }
        }
        self.engine.stop_pondering();
        info!(used_ms = self.used.as_millis() as u64, plies = self.session.plies(), "session ended");
        Ok(())
    }

    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        debug!(line, "server says");
        let step = self
            .session
            .handle_line(line)
            .with_context(|| format!("cannot handle server line {line:?}"))?;

        match step {
            Step::Reply(text) => {
                send(out, text)?;
                Ok(Flow::Continue)
            }
            Step::Wait => Ok(Flow::Continue),
            Step::Think => self.think(out),
            Step::GameOver(winner) => {
                self.engine.stop_pondering();
                info!(?winner, "game over");
                Ok(Flow::Finished)
            }
        }
    }

    fn think<W: Write>(&mut self, out: &mut W) -> Result<Flow> {
        let role = self.session.role().context("asked to move before a role was assigned")?;
        let pos = *self.session.position();
        let own_moves = self.session.own_moves();

        let depth = self.config.depth.depth_for(own_moves);
        let budget = self.config.time.budget(self.session.clock(), self.used, own_moves);
        debug!(%role, own_moves, depth, budget_ms = budget.as_millis() as u64, "thinking");

        let started = Instant::now();
        let result = self
            .engine
            .search(&pos, role, SearchLimits::depth_and_time(depth, budget));
        self.used += started.elapsed();

        let decision = result.decision(role);
        send(out, &decision.to_string())?;
        self.session
            .commit(decision)
            .context("engine produced a move the rules reject")?;

        if let Decision::Verdict(winner) = decision {
            info!(%winner, "no legal move, verdict sent");
            return Ok(Flow::Finished);
        }

        match self.session.next_step() {
            Step::GameOver(winner) => {
                info!(?winner, "our move decided the game");
                Ok(Flow::Finished)
            }
            _ => {
                if self.config.ponder {
                    self.engine.ponder(self.session.position(), role.other());
                }
                Ok(Flow::Continue)
            }
        }
    }
}

fn send<W: Write>(out: &mut W, text: &str) -> Result<()> {
    writeln!(out, "{text}").context("failed to write to server")?;
    out.flush().context("failed to flush output")?;
    debug!(text, "sent");
    Ok(())
}

#[cfg(test)]
#[path = "player_tests.rs"]
mod player_tests;
