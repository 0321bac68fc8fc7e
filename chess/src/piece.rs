//! Pieces standing on the board

use crate::board::Board;
use crate::movegen::{self, Candidates, MoveList};
use crate::types::{Cell, Color, Coord, PieceKind};

use std::fmt;

/// A piece owned by a [`Board`]
///
/// The piece remembers its own square and whether it has ever moved. It doesn't keep any
/// link to the board: move computation takes the board as an explicit read-only argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    has_moved: bool,
    coord: Coord,
}

impl Piece {
    /// Creates a piece which has not moved yet
    #[inline]
    pub const fn new(color: Color, kind: PieceKind, coord: Coord) -> Piece {
        Piece {
            kind,
            color,
            has_moved: false,
            coord,
        }
    }

    /// Creates a piece from the FEN code in `cell`, or returns `None` if the cell is empty
    #[inline]
    pub const fn from_cell(cell: Cell, coord: Coord) -> Option<Piece> {
        match (cell.color(), cell.kind()) {
            (Some(color), Some(kind)) => Some(Piece::new(color, kind, coord)),
            _ => None,
        }
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Returns `true` once the piece has been relocated by a move
    #[inline]
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    #[inline]
    pub const fn coord(&self) -> Coord {
        self.coord
    }

    #[inline]
    pub const fn material_weight(&self) -> u32 {
        self.kind.material_weight()
    }

    #[inline]
    pub const fn cell(&self) -> Cell {
        Cell::from_parts(self.color, self.kind)
    }

    /// Returns the raw move shape of the piece, grouped by direction
    ///
    /// See [`movegen::candidates()`] for details.
    #[inline]
    pub fn possible_moves(&self, board: &Board) -> Candidates {
        movegen::candidates(board, self)
    }

    /// Returns the squares this piece may move to on `board`
    ///
    /// See [`movegen::legal_moves_for()`] for details.
    #[inline]
    pub fn legal_moves(&self, board: &Board) -> MoveList {
        movegen::legal_moves_for(board, self)
    }

    pub(crate) fn relocate(&mut self, dst: Coord) {
        self.coord = dst;
        self.has_moved = true;
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.cell())
    }
}
