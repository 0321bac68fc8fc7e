//! Move generation
//!
//! Generation happens in two stages. First, [`candidates()`] computes the raw move shape of a
//! piece as a list of directional groups. Then the groups are filtered into a flat list of
//! destination squares.
//!
//! Only piece geometry and occupancy are considered here. Checks, pins, castling and enpassant
//! are not taken into account.

use crate::board::Board;
use crate::geometry::{self, Direction};
use crate::piece::Piece;
use crate::types::{Color, Coord, PieceKind};

use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;
use log::trace;

/// Ordered sequence of candidate squares radiating in one direction from a piece
pub type Group = ArrayVec<Coord, 8>;

/// Raw move shape of a piece, as a list of directional groups
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Candidates(ArrayVec<Group, 8>);

impl Deref for Candidates {
    type Target = ArrayVec<Group, 8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Candidates {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a Candidates {
    type Item = &'a Group;
    type IntoIter = slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Candidates {
    pub fn new() -> Candidates {
        Candidates(ArrayVec::new())
    }

    /// Returns all the candidate squares without any filtering
    pub fn flatten(&self) -> impl Iterator<Item = Coord> + '_ {
        self.0.iter().flat_map(|g| g.iter().copied())
    }
}

/// List of destination squares for a single piece
///
/// A queen in the middle of an empty board has 27 moves, which is the maximum possible.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Coord, 32>);

impl Deref for MoveList {
    type Target = ArrayVec<Coord, 32>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Coord;
    type IntoIter = slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

fn slider(src: Coord, dirs: &[Direction]) -> Candidates {
    let mut res = Candidates::new();
    for &dir in dirs {
        res.push(geometry::ray(src, dir).collect());
    }
    res
}

fn knight(src: Coord) -> Candidates {
    let mut res = Candidates::new();
    res.push(
        geometry::KNIGHT_OFFSETS
            .iter()
            .filter_map(|&(dr, df)| src.try_shift(df, dr))
            .collect(),
    );
    res
}

fn king(src: Coord) -> Candidates {
    let mut res = Candidates::new();
    for &(dr, df) in &geometry::KING_OFFSETS {
        if let Some(dst) = src.try_shift(df, dr) {
            res.push([dst].into_iter().collect());
        }
    }
    res
}

fn pawn(b: &Board, p: &Piece) -> Candidates {
    let src = p.coord();
    let fwd = geometry::pawn_forward_delta(p.color());
    let mut res = Candidates::new();

    // Forward steps are never captures, so both squares must be empty
    let mut steps = Group::new();
    if let Some(one) = src.try_shift(0, fwd).filter(|&c| !b.is_occupied(c)) {
        steps.push(one);
        if !p.has_moved() {
            if let Some(two) = src.try_shift(0, 2 * fwd).filter(|&c| !b.is_occupied(c)) {
                steps.push(two);
            }
        }
    }
    res.push(steps);

    // Diagonal steps are only captures
    for df in [-1, 1] {
        if let Some(dst) = src.try_shift(df, fwd) {
            if b.color_at(dst) == Some(p.color().inv()) {
                res.push([dst].into_iter().collect());
            }
        }
    }
    res
}

/// Computes the raw move shape of the piece `p` standing on `b`
///
/// - rook, bishop and queen return one ray per direction, regardless of occupancy;
/// - knight returns a single group with all its in-bounds jumps;
/// - king returns one single-square group per in-bounds neighbour;
/// - pawn returns its forward steps (already requiring empty squares) as one group, and one
///   group per diagonal square currently occupied by an enemy piece.
///
/// The board is only queried for occupancy and never changed.
pub fn candidates(b: &Board, p: &Piece) -> Candidates {
    let src = p.coord();
    let res = match p.kind() {
        PieceKind::Rook => slider(src, &Direction::ORTHOGONAL),
        PieceKind::Bishop => slider(src, &Direction::DIAGONAL),
        PieceKind::Queen => {
            let mut res = slider(src, &Direction::DIAGONAL);
            res.extend(slider(src, &Direction::ORTHOGONAL).0);
            res
        }
        PieceKind::Knight => knight(src),
        PieceKind::King => king(src),
        PieceKind::Pawn => pawn(b, p),
    };
    trace!("candidates for {} at {}: {:?}", p, src, res);
    res
}

/// Walks each group nearest to farthest and cuts it right after the first occupied square
///
/// The occupied square itself is kept, whatever the color of the piece on it.
pub fn truncate(b: &Board, cands: &Candidates) -> MoveList {
    let mut res = MoveList::new();
    for group in cands {
        for &dst in group {
            res.push(dst);
            if b.is_occupied(dst) {
                break;
            }
        }
    }
    res
}

/// Returns the squares the piece `p` may move to on `b`
///
/// Knights may jump to any candidate square not occupied by a piece of their own color. All
/// the other pieces pass their candidates through [`truncate()`].
pub fn legal_moves_for(b: &Board, p: &Piece) -> MoveList {
    let cands = candidates(b, p);
    let res = match p.kind() {
        PieceKind::Knight => {
            let mut res = MoveList::new();
            res.extend(cands.flatten().filter(|&c| b.color_at(c) != Some(p.color())));
            res
        }
        _ => truncate(b, &cands),
    };
    trace!("legal moves for {} at {}: {:?}", p, p.coord(), res);
    res
}

/// Returns the squares the piece standing on `src` may move to
///
/// If `src` is empty, the returned list is empty.
pub fn legal_moves(b: &Board, src: Coord) -> MoveList {
    match b.get(src) {
        Some(p) => legal_moves_for(b, p),
        None => MoveList::new(),
    }
}

/// Returns legal moves for every piece of color `c`, in square order
pub fn all_legal_moves(b: &Board, c: Color) -> Vec<(Coord, MoveList)> {
    b.pieces()
        .filter(|p| p.color() == c)
        .map(|p| (p.coord(), legal_moves_for(b, p)))
        .collect()
}
