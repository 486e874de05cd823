//! Match runner for playing games between engines

use flags_core::{Bitboard, Engine, Position, Role, is_legal, winner};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::MatchConfig;
use crate::error::TournamentError;

/// Result of a single game from one engine's point of view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    /// White's result for a game won by `winner` (None = draw).
    pub fn for_white(winner: Option<Role>) -> Self {
        match winner {
            Some(Role::White) => GameResult::Win,
            Some(Role::Black) => GameResult::Loss,
            None => GameResult::Draw,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            GameResult::Win => GameResult::Loss,
            GameResult::Loss => GameResult::Win,
            GameResult::Draw => GameResult::Draw,
        }
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Termination {
    Promotion,
    Annihilation,
    /// Side to move had no legal move
    Stalemate,
    /// An engine returned a move the rules reject
    IllegalMove,
    /// An engine returned no move in a live position
    Resigned,
    PlyLimit,
}

impl Termination {
    /// Classifies a decided position.
    fn of(pos: &Position) -> Self {
        let promoted = Role::BOTH
            .iter()
            .any(|&role| !(pos.pawns(role) & Bitboard::promotion_row(role)).is_empty());
        if promoted {
            Termination::Promotion
        } else if pos.count(Role::White) == 0 || pos.count(Role::Black) == 0 {
            Termination::Annihilation
        } else {
            Termination::Stalemate
        }
    }
}

/// One finished game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    pub white: String,
    pub black: String,
    /// Moves in wire form, White first
    pub moves: Vec<String>,
    pub winner: Option<Role>,
    pub termination: Termination,
}

/// Result of a match (multiple games), from engine1's perspective
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub games: Vec<GameRecord>,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score from engine1's perspective (1 for win, 0.5 for draw, 0 for loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }

    pub fn record(&mut self, result: GameResult, game: GameRecord) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
        self.games.push(game);
    }
}

/// Runs matches between two engines
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Run a match between two engines
    ///
    /// Returns the result from engine1's perspective
    pub fn run_match(
        &self,
        engine1: &mut dyn Engine,
        engine2: &mut dyn Engine,
    ) -> Result<MatchResult, TournamentError> {
        let start = self.config.start_position()?;
        let mut result = MatchResult::new();

        for game_num in 0..self.config.num_games {
            let engine1_white = !self.config.alternate_colors || game_num.is_multiple_of(2);

            let game = if engine1_white {
                self.play_game(engine1, engine2, start)
            } else {
                self.play_game(engine2, engine1, start)
            };

            let white_result = GameResult::for_white(game.winner);
            let game_result = if engine1_white {
                white_result
            } else {
                white_result.flipped()
            };

            info!(
                game = game_num + 1,
                of = self.config.num_games,
                color = if engine1_white { "W" } else { "B" },
                result = ?game_result,
                termination = ?game.termination,
                plies = game.moves.len(),
                "game finished"
            );
            result.record(game_result, game);
        }

        Ok(result)
    }

    /// Play a single game from `start`, White moving first.
    pub fn play_game(
        &self,
        white: &mut dyn Engine,
        black: &mut dyn Engine,
        start: Position,
    ) -> GameRecord {
        white.new_game();
        black.new_game();

        let mut pos = start;
        let mut side = Role::White;
        let mut record = GameRecord {
            white: white.name().to_string(),
            black: black.name().to_string(),
            moves: Vec::new(),
            winner: None,
            termination: Termination::PlyLimit,
        };

        loop {
            if let Some(won) = winner(&pos, side) {
                record.winner = Some(won);
                record.termination = Termination::of(&pos);
                break;
            }
            if record.moves.len() >= self.config.max_plies as usize {
                break;
            }

            let engine: &mut dyn Engine = match side {
                Role::White => &mut *white,
                Role::Black => &mut *black,
            };
            // Fresh limits for each move (resets the clock)
            let result = engine.search(&pos, side, self.config.search_limits());

            match result.best_move {
                Some(mv) if is_legal(&pos, side, mv) => {
                    pos.apply_move(side, mv);
                    record.moves.push(mv.to_string());
                    if self.config.ponder {
                        engine.ponder(&pos, side.other());
                    }
                }
                Some(mv) => {
                    warn!(engine = engine.name(), %side, %mv, "illegal move forfeits the game");
                    record.winner = Some(side.other());
                    record.termination = Termination::IllegalMove;
                    break;
                }
                None => {
                    warn!(engine = engine.name(), %side, "no move in a live position");
                    record.winner = Some(side.other());
                    record.termination = Termination::Resigned;
                    break;
                }
            }
            side = side.other();
        }

        white.stop_pondering();
        black.stop_pondering();
        record
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
