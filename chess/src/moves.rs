//! Moves and their textual representation

use crate::board::Board;
use crate::types::{Coord, CoordParseError};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error parsing a [`Move`] from string
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum MoveParseError {
    /// Non-ASCII data in string
    #[error("non-ASCII data in move")]
    NonAscii,
    /// Bad string length
    #[error("bad string length")]
    BadLength,
    /// Bad separator between the squares
    #[error("bad separator {0:?}")]
    BadSeparator(char),
    /// Bad source square
    #[error("bad source: {0}")]
    BadSrc(CoordParseError),
    /// Bad destination square
    #[error("bad destination: {0}")]
    BadDst(CoordParseError),
}

/// Move of a piece from one square to another
///
/// The move is just a pair of squares and doesn't know anything about the board. Use
/// [`Move::is_legal()`] to check it against a position, or [`Board::make_move()`] to apply it.
///
/// Moves are printed as two adjacent square labels, like `e2e4`. Parsing also accepts the labels
/// separated by a dash or a space, like `e2-e4` or `e2 e4`.
///
/// # Example
///
/// ```
/// # use fenboard::{Board, Move};
/// # use std::str::FromStr;
/// #
/// let mv = Move::from_str("g1-f3").unwrap();
/// assert_eq!(mv.to_string(), "g1f3");
///
/// let mut b = Board::initial();
/// assert!(mv.is_legal(&b));
/// b.make_move(mv).unwrap();
/// assert_eq!(b.as_fen(), "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b KQkq - 1 1");
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    src: Coord,
    dst: Coord,
}

impl Move {
    #[inline]
    pub const fn new(src: Coord, dst: Coord) -> Move {
        Move { src, dst }
    }

    #[inline]
    pub const fn src(&self) -> Coord {
        self.src
    }

    #[inline]
    pub const fn dst(&self) -> Coord {
        self.dst
    }

    /// Returns `true` if there is a piece on the source square which may go to the destination
    /// square in position `b`
    pub fn is_legal(&self, b: &Board) -> bool {
        b.legal_moves(self.src).contains(&self.dst)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Move, Self::Err> {
        if !s.is_ascii() {
            return Err(MoveParseError::NonAscii);
        }
        let (src, dst) = match s.len() {
            4 => (&s[0..2], &s[2..4]),
            5 => match s.as_bytes()[2] {
                b'-' | b' ' => (&s[0..2], &s[3..5]),
                b => return Err(MoveParseError::BadSeparator(b as char)),
            },
            _ => return Err(MoveParseError::BadLength),
        };
        Ok(Move {
            src: Coord::from_str(src).map_err(MoveParseError::BadSrc)?,
            dst: Coord::from_str(dst).map_err(MoveParseError::BadDst)?,
        })
    }
}
