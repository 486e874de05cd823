//! Thinking on the opponent's time.
//!
//! A [`Ponderer`] runs the regular iterative-deepening search on its own
//! thread, on its own copy of the position and with its own transposition
//! table. Every completed depth is published over a channel; the foreground
//! only ever reads the newest published report and never waits on the
//! search itself. Stopping joins the thread and hands the table back so the
//! next real search starts warm.

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use flags_core::{MAX_DEPTH, Position, Role, TimeControl};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use crate::eval::EvaluationWeights;
use crate::search::{DepthReport, Search, SearchConfig};
use crate::tt::TranspositionTable;

/// Handle to a running background search.
pub struct Ponderer {
    position: Position,
    to_move: Role,
    stop: TimeControl,
    reports: Receiver<DepthReport>,
    latest: Option<DepthReport>,
    handle: Option<JoinHandle<TranspositionTable>>,
}

impl Ponderer {
    /// Spawns a search of `pos` for `to_move` with no deadline. It runs
    /// until the tree is exhausted, the result is proven, or [`stop`] is
    /// called.
    ///
    /// [`stop`]: Ponderer::stop
    pub fn start(
        pos: Position,
        to_move: Role,
        weights: EvaluationWeights,
        config: SearchConfig,
        mut tt: TranspositionTable,
        seed: u64,
    ) -> Self {
        let stop = TimeControl::new(None).with_check_interval(config.check_interval);
        stop.start();
        let (tx, reports) = mpsc::channel();
        let tc = stop.clone();

        let handle = thread::spawn(move || {
            let mut rng = StdRng::seed_from_u64(seed);
            Search::new(&weights, &config, &mut tt, &tc).choose_move(
                &pos,
                to_move,
                MAX_DEPTH,
                &mut rng,
                |report| {
                    debug!(depth = report.depth, mv = %report.best_move, score = report.score, "ponder depth published");
                    // A closed channel only means nobody reads the reports any more.
                    let _ = tx.send(*report);
                },
            );
            tt
        });

        Self {
            position: pos,
            to_move,
            stop,
            reports,
            latest: None,
            handle: Some(handle),
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn to_move(&self) -> Role {
        self.to_move
    }

    /// Newest completed depth, without blocking.
    pub fn latest(&mut self) -> Option<DepthReport> {
        if let Some(report) = self.reports.try_iter().last() {
            self.latest = Some(report);
        }
        self.latest
    }

    /// Position reached if `to_move` plays the current best reply.
    pub fn expected_position(&mut self) -> Option<Position> {
        let report = self.latest()?;
        Some(self.position.with_move(self.to_move, report.best_move))
    }

    /// True once the background search has returned on its own.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|handle| handle.is_finished())
    }

    /// Signals the search, waits for the thread and returns the last report
    /// together with the transposition table it filled.
    pub fn stop(mut self) -> (Option<DepthReport>, TranspositionTable) {
        self.stop.stop();
        let tt = match self.handle.take().map(JoinHandle::join) {
            Some(Ok(tt)) => tt,
            Some(Err(_)) | None => {
                warn!("ponder thread did not return its table");
                TranspositionTable::new()
            }
        };
        (self.latest(), tt)
    }
}

impl Drop for Ponderer {
    fn drop(&mut self) {
        self.stop.stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
#[path = "ponder_tests.rs"]
mod ponder_tests;
