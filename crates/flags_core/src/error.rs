//! Error types for the Two Flags core.

use thiserror::Error;

use crate::types::{Move, Role};

/// Why a pawn move is not allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalReason {
    #[error("no pawn at source location")]
    NoPawnAtSource,
    #[error("pawns must move toward the opponent's back rank")]
    WrongDirection,
    #[error("destination is occupied")]
    DestinationOccupied,
    #[error("two-square move allowed only from the initial row")]
    DoubleStepOffHomeRow,
    #[error("cannot jump over a pawn")]
    JumpOverPawn,
    #[error("diagonal move allowed only when capturing an opponent's pawn")]
    DiagonalWithoutCapture,
    #[error("unsupported movement pattern for a pawn")]
    UnsupportedPattern,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagsError {
    #[error("invalid coordinate `{0}`: expected a file a-h followed by a rank 1-8")]
    InvalidCoordinate(String),

    #[error("invalid move `{0}`: expected exactly 4 characters, e.g. e2e4")]
    InvalidMove(String),

    #[error("illegal move {mv} for {role}: {reason}")]
    IllegalMove {
        mv: Move,
        role: Role,
        reason: IllegalReason,
    },

    #[error("unknown role `{0}`")]
    UnknownRole(String),

    #[error("malformed message `{0}`")]
    MalformedMessage(String),

    #[error("expected {expected}, got `{got}`")]
    UnexpectedMessage { expected: &'static str, got: String },
}
