use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlagsError;

/// The moving side. White pawns travel toward row 0 (rank 8), Black pawns
/// toward row 7 (rank 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    White,
    Black,
}

impl Role {
    pub const BOTH: [Role; 2] = [Role::White, Role::Black];

    pub fn other(self) -> Role {
        match self {
            Role::White => Role::Black,
            Role::Black => Role::White,
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Role::White => 0,
            Role::Black => 1,
        }
    }

    /// Row delta of a single forward step.
    pub const fn forward(self) -> i8 {
        match self {
            Role::White => -1,
            Role::Black => 1,
        }
    }

    /// Row a pawn starts on; the only row a double step is allowed from.
    pub const fn home_row(self) -> u8 {
        match self {
            Role::White => 6,
            Role::Black => 1,
        }
    }

    /// Row on which a pawn of this side promotes and wins the game.
    pub const fn promotion_row(self) -> u8 {
        match self {
            Role::White => 0,
            Role::Black => 7,
        }
    }

    /// Number of forward steps a pawn on `row` has already made.
    pub fn progress(self, row: u8) -> u8 {
        match self {
            Role::White => 7 - row,
            Role::Black => row,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::White => f.write_str("White"),
            Role::Black => f.write_str("Black"),
        }
    }
}

impl FromStr for Role {
    type Err = FlagsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Role::White),
            "black" | "b" => Ok(Role::Black),
            _ => Err(FlagsError::UnknownRole(s.to_string())),
        }
    }
}

/// A pawn move, identified only by its source and destination squares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: u8, // 0..63
    pub to: u8,   // 0..63
}

impl Move {
    pub fn new(from: u8, to: u8) -> Self {
        Self { from, to }
    }

    /// Parse the 4-character algebraic form, e.g. `"e2e4"`.
    pub fn parse(txt: &str) -> Result<Self, FlagsError> {
        let txt = txt.trim();
        if txt.len() != 4 || !txt.is_ascii() {
            return Err(FlagsError::InvalidMove(txt.to_string()));
        }
        let from = coord_to_sq(&txt[0..2])?;
        let to = coord_to_sq(&txt[2..4])?;
        Ok(Self { from, to })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", sq_to_coord(self.from), sq_to_coord(self.to))
    }
}

impl FromStr for Move {
    type Err = FlagsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::parse(s)
    }
}

/// What an engine hands back to its caller: a move to play, or the verdict
/// that the game is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Play(Move),
    /// The game is decided in favour of the given side.
    Verdict(Role),
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Play(mv) => write!(f, "{mv}"),
            Decision::Verdict(role) => write!(f, "win: {role}"),
        }
    }
}

// Helpers. Squares are numbered row-major: row 0 is rank 8, column 0 is file a.
pub fn row_of(sq: u8) -> u8 {
    sq / 8
}
pub fn col_of(sq: u8) -> u8 {
    sq % 8
}
pub fn sq(row: i8, col: i8) -> Option<u8> {
    if (0..8).contains(&row) && (0..8).contains(&col) {
        Some((row as u8) * 8 + (col as u8))
    } else {
        None
    }
}

/// Converts an algebraic coordinate such as `"a2"` into `(row, col)`.
pub fn convert_coordinate(coord: &str) -> Result<(u8, u8), FlagsError> {
    let b = coord.as_bytes();
    if b.len() != 2 {
        return Err(FlagsError::InvalidCoordinate(coord.to_string()));
    }
    let f = b[0].to_ascii_lowercase();
    let r = b[1];
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
        return Err(FlagsError::InvalidCoordinate(coord.to_string()));
    }
    let col = f - b'a';
    let row = 8 - (r - b'0');
    Ok((row, col))
}

/// Inverse of [`convert_coordinate`].
///
/// # Panics
/// If `row` or `col` is outside `0..8`.
pub fn to_algebraic(row: u8, col: u8) -> String {
    assert!(row < 8 && col < 8, "square ({row}, {col}) is off the board");
    let f = (b'a' + col) as char;
    let r = (b'0' + (8 - row)) as char;
    format!("{f}{r}")
}

pub fn sq_to_coord(sq: u8) -> String {
    to_algebraic(row_of(sq), col_of(sq))
}

pub fn coord_to_sq(c: &str) -> Result<u8, FlagsError> {
    let (row, col) = convert_coordinate(c)?;
    Ok(row * 8 + col)
}
