pub mod bitboard;
pub mod board;
pub mod error;
pub mod movegen;
pub mod outcome;
pub mod protocol;
pub mod time_control;
pub mod types;
pub mod zobrist;

pub use bitboard::*;
pub use board::*;
pub use error::*;
pub use movegen::*;
pub use outcome::*;
pub use protocol::*;
pub use time_control::*;
pub use types::*;
pub use zobrist::ZOBRIST;

// =============================================================================
// Engine trait
// =============================================================================

/// What an engine decided for one position.
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// `None` only when the side to move has nothing to play
    pub best_move: Option<Move>,
    /// Score for the searching side
    pub score: i32,
    /// Last fully completed search depth
    pub depth: u8,
    pub nodes: u64,
    /// The deadline or a stop request cut the search short
    pub stopped: bool,
    /// Winner of the position, when it is already decided
    pub winner: Option<Role>,
}

impl SearchResult {
    /// Result for a position where `role` has nothing left to play.
    pub fn game_over(role: Role, pos: &Position) -> Self {
        Self {
            winner: Some(winner(pos, role).unwrap_or(role.other())),
            ..Default::default()
        }
    }

    /// The move to send, or the verdict when there is none.
    pub fn decision(&self, role: Role) -> Decision {
        match self.best_move {
            Some(mv) => Decision::Play(mv),
            None => Decision::Verdict(self.winner.unwrap_or(role.other())),
        }
    }
}

/// Trait that all engines must implement.
///
/// The caller hands over a position, the side to move and search limits;
/// the engine never touches the caller's position.
pub trait Engine: Send {
    /// Search the position for `role` with the given search limits.
    fn search(&mut self, pos: &Position, role: Role, limits: SearchLimits) -> SearchResult;

    /// Returns the engine's name
    fn name(&self) -> &str;

    fn author(&self) -> &str {
        "Two Flags"
    }

    /// Reset internal state for a new game (clear hash tables, etc.)
    fn new_game(&mut self) {}

    /// Optional: keep thinking on `pos` while the opponent (`to_move`) decides.
    fn ponder(&mut self, _pos: &Position, _to_move: Role) {}

    /// Stop a running ponder search, if any.
    fn stop_pondering(&mut self) {}
}
