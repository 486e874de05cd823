use std::fmt;

use crate::bitboard::Bitboard;
use crate::error::FlagsError;
use crate::types::*;
use crate::zobrist::ZOBRIST;

/// Setup line of the standard game: a full row of pawns for each side.
pub const STANDARD_SETUP: &str =
    "Setup Wa2 Wb2 Wc2 Wd2 We2 Wf2 Wg2 Wh2 Ba7 Bb7 Bc7 Bd7 Be7 Bf7 Bg7 Bh7";

/// Pawn occupancy for both sides. A square is never set in both boards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub white: Bitboard,
    pub black: Bitboard,
}

impl Position {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn startpos() -> Self {
        let mut p = Position::empty();
        for col in 0..8 {
            p.white.set(6 * 8 + col);
            p.black.set(8 + col);
        }
        p
    }

    /// Builds a position from a setup line such as `"Setup Wa2 Bb7"`.
    ///
    /// The leading `Setup` keyword is optional. Tokens shorter than three
    /// characters are skipped, and so are tokens whose colour letter is
    /// neither `W` nor `B`. A token naming an occupied square replaces the
    /// pawn already there.
    pub fn from_setup(setup: &str) -> Result<Self, FlagsError> {
        let mut tokens = setup.split_whitespace().peekable();
        if tokens
            .peek()
            .is_some_and(|t| t.eq_ignore_ascii_case("setup"))
        {
            tokens.next();
        }
        Self::from_tokens(tokens)
    }

    /// Builds a position from `<W|B><file><rank>` tokens.
    pub fn from_tokens<'a, I>(tokens: I) -> Result<Self, FlagsError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut p = Position::empty();
        for token in tokens {
            if token.len() < 3 || !token.is_ascii() {
                continue;
            }
            let role = match token.as_bytes()[0].to_ascii_uppercase() {
                b'W' => Role::White,
                b'B' => Role::Black,
                _ => continue,
            };
            let sq = coord_to_sq(&token[1..])?;
            p.clear(sq);
            p.pawns_mut(role).set(sq);
        }
        Ok(p)
    }

    /// Serializes the position as a setup line, White pawns first.
    pub fn to_setup(&self) -> String {
        let mut s = String::from("Setup");
        for role in Role::BOTH {
            let prefix = match role {
                Role::White => 'W',
                Role::Black => 'B',
            };
            for sq in self.pawns(role) {
                s.push(' ');
                s.push(prefix);
                s.push_str(&sq_to_coord(sq));
            }
        }
        s
    }

    #[inline]
    pub fn pawns(&self, role: Role) -> Bitboard {
        match role {
            Role::White => self.white,
            Role::Black => self.black,
        }
    }

    #[inline]
    fn pawns_mut(&mut self, role: Role) -> &mut Bitboard {
        match role {
            Role::White => &mut self.white,
            Role::Black => &mut self.black,
        }
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.white | self.black
    }

    #[inline]
    pub fn is_empty_sq(&self, sq: u8) -> bool {
        !self.occupied().contains(sq)
    }

    pub fn pawn_at(&self, sq: u8) -> Option<Role> {
        if self.white.contains(sq) {
            Some(Role::White)
        } else if self.black.contains(sq) {
            Some(Role::Black)
        } else {
            None
        }
    }

    pub fn count(&self, role: Role) -> u32 {
        self.pawns(role).popcount()
    }

    fn clear(&mut self, sq: u8) {
        self.white.clear(sq);
        self.black.clear(sq);
    }

    /// Plays `mv` for `role`: the pawn leaves its source square, any
    /// opposing pawn on the destination is captured, and the pawn lands on
    /// the destination. Legality is the caller's responsibility.
    pub fn apply_move(&mut self, role: Role, mv: Move) {
        self.pawns_mut(role).clear(mv.from);
        self.pawns_mut(role.other()).clear(mv.to);
        self.pawns_mut(role).set(mv.to);
    }

    /// Copy-on-branch variant of [`Position::apply_move`].
    #[inline]
    pub fn with_move(&self, role: Role, mv: Move) -> Position {
        let mut next = *self;
        next.apply_move(role, mv);
        next
    }

    /// Zobrist key of this position with `to_move` on move.
    pub fn hash(&self, to_move: Role) -> u64 {
        let mut h = 0u64;
        for role in Role::BOTH {
            for sq in self.pawns(role) {
                h ^= ZOBRIST.pawn_key(role, sq);
            }
        }
        if to_move == Role::Black {
            h ^= ZOBRIST.side_to_move;
        }
        h
    }
}

/// Console diagram with coordinate labels, `W`/`B` for pawns and `.` for
/// empty squares.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for row in 0..8u8 {
            write!(f, "{}", 8 - row)?;
            for col in 0..8u8 {
                let c = match self.pawn_at(row * 8 + col) {
                    Some(Role::White) => 'W',
                    Some(Role::Black) => 'B',
                    None => '.',
                };
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
