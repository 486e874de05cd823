//! Move deadlines and depth caps.
//!
//! One deadline covers every round of iterative deepening. The stop flag is
//! shared between clones so another thread can cancel a pondering search.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Hard cap on search depth in plies, whatever the caller asks for.
pub const MAX_DEPTH: u8 = 64;

/// How far and how long one move may be searched. Whichever runs out
/// first ends the search; the last completed depth supplies the move.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Depth cap in plies
    pub depth: u8,
    /// Budget for this move; `None` means unlimited
    pub move_time: Option<Duration>,
    /// Deadline and stop flag the search polls
    pub time_control: TimeControl,
}

impl SearchLimits {
    /// Depth cap only.
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            move_time: None,
            time_control: TimeControl::new(None),
        }
    }

    /// Depth cap plus a move budget.
    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self {
            depth,
            move_time: Some(move_time),
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    /// Move budget only; depth goes up to [`MAX_DEPTH`].
    pub fn time(move_time: Duration) -> Self {
        Self {
            depth: MAX_DEPTH,
            move_time: Some(move_time),
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    /// Time budget given in seconds, as the game protocol does.
    pub fn seconds(depth: u8, seconds: f64) -> Self {
        Self::depth_and_time(depth, Duration::from_secs_f64(seconds.max(0.0)))
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.time_control.is_stopped()
    }

    /// Starts the clock. Engines call this on entry to `search`.
    pub fn start(&self) {
        self.time_control.start();
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(4)
    }
}

/// Deadline plus stop flag. Clones share both the flag and the start
/// offset, so a clone handed to another thread can cancel the search.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    /// Fixed instant the start offset is measured from
    origin: Instant,
    /// Nanoseconds from `origin` to the start of the search, plus one (0 = not started)
    started_at: Arc<AtomicU64>,
    time_limit: Option<Duration>,
    /// Nodes between clock reads
    check_interval: u64,
}

impl TimeControl {
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            origin: Instant::now(),
            started_at: Arc::new(AtomicU64::new(0)),
            time_limit,
            check_interval: 64,
        }
    }

    /// Reads the clock every `interval` nodes (default 64).
    pub fn with_check_interval(mut self, interval: u64) -> Self {
        self.check_interval = interval.max(1);
        self
    }

    /// Start the clock and clear any previous stop request.
    pub fn start(&self) {
        let offset = self.origin.elapsed().as_nanos() as u64 + 1;
        self.started_at.store(offset, Ordering::SeqCst);
        self.stopped.store(false, Ordering::SeqCst);
    }

    /// Asks the search to unwind. Safe from any thread.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Reads the clock and raises the stop flag once the budget is spent.
    /// An unstarted clock never expires.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }

        if let Some(limit) = self.time_limit
            && self.is_started()
            && self.elapsed() >= limit
        {
            self.stop();
            return true;
        }

        false
    }

    #[inline]
    pub fn should_check_time(&self, nodes: u64) -> bool {
        nodes.is_multiple_of(self.check_interval)
    }

    fn is_started(&self) -> bool {
        self.started_at.load(Ordering::Relaxed) != 0
    }

    /// Time since `start`, zero before it.
    pub fn elapsed(&self) -> Duration {
        match self.started_at.load(Ordering::Relaxed) {
            0 => Duration::ZERO,
            offset => self
                .origin
                .elapsed()
                .saturating_sub(Duration::from_nanos(offset - 1)),
        }
    }

    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.time_limit?;
        Some(limit.saturating_sub(self.elapsed()))
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
