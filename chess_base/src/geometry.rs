//! Geometry primitives
//!
//! Rays in this module are purely geometric: they know nothing about pieces standing on
//! the board and stop only at the board edge.

use crate::types::{Color, Coord};

/// One of the eight ray directions
///
/// Directions are named as seen from White's side: `North` goes towards rank 8 (i.e. it
/// decreases the rank index), `East` goes towards file `h`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::South,
        Direction::North,
        Direction::East,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::SouthEast,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// Returns `(delta_rank, delta_file)` for a single step
    pub const fn delta(&self) -> (isize, isize) {
        match *self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::NorthEast => (-1, 1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (1, -1),
        }
    }
}

const fn dist_to_edge(pos: usize, delta: isize) -> usize {
    match delta {
        1 => 7 - pos,
        -1 => pos,
        _ => usize::MAX,
    }
}

/// Ordered sequence of squares going from a source square towards the board edge
///
/// The source square itself is not included. Squares are yielded nearest first.
#[derive(Debug, Clone)]
pub struct Ray {
    cur: Coord,
    step: isize,
    left: usize,
}

impl Ray {
    pub const fn new(src: Coord, dir: Direction) -> Ray {
        let (rank, file) = src.rank_file();
        let (dr, df) = dir.delta();
        let by_rank = dist_to_edge(rank, dr);
        let by_file = dist_to_edge(file, df);
        Ray {
            cur: src,
            step: dr * 8 + df,
            left: if by_rank < by_file { by_rank } else { by_file },
        }
    }
}

impl Iterator for Ray {
    type Item = Coord;

    #[inline]
    fn next(&mut self) -> Option<Coord> {
        if self.left == 0 {
            return None;
        }
        self.left -= 1;
        self.cur = self.cur.add(self.step);
        Some(self.cur)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.left, Some(self.left))
    }
}

impl ExactSizeIterator for Ray {}

#[inline]
pub const fn ray(src: Coord, dir: Direction) -> Ray {
    Ray::new(src, dir)
}

/// Squares with increasing rank index (towards rank 1)
#[inline]
pub const fn south(src: Coord) -> Ray {
    Ray::new(src, Direction::South)
}

/// Squares with decreasing rank index (towards rank 8)
#[inline]
pub const fn north(src: Coord) -> Ray {
    Ray::new(src, Direction::North)
}

/// Squares with increasing file (towards file `h`)
#[inline]
pub const fn east(src: Coord) -> Ray {
    Ray::new(src, Direction::East)
}

/// Squares with decreasing file (towards file `a`)
#[inline]
pub const fn west(src: Coord) -> Ray {
    Ray::new(src, Direction::West)
}

#[inline]
pub const fn south_east(src: Coord) -> Ray {
    Ray::new(src, Direction::SouthEast)
}

#[inline]
pub const fn south_west(src: Coord) -> Ray {
    Ray::new(src, Direction::SouthWest)
}

#[inline]
pub const fn north_east(src: Coord) -> Ray {
    Ray::new(src, Direction::NorthEast)
}

#[inline]
pub const fn north_west(src: Coord) -> Ray {
    Ray::new(src, Direction::NorthWest)
}

/// Rank delta of a single pawn step forward
pub const fn pawn_forward_delta(c: Color) -> isize {
    match c {
        Color::White => -1,
        Color::Black => 1,
    }
}

/// Knight jumps as `(delta_rank, delta_file)`
pub const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (1, 2),
    (1, -2),
    (2, 1),
    (2, -1),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
];

/// King steps as `(delta_rank, delta_file)`, in row-major order
pub const KING_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Rank};

    fn labels(ray: Ray) -> Vec<String> {
        ray.map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_orthogonal() {
        let d4 = Coord::from_parts(File::D, Rank::R4);
        assert_eq!(labels(north(d4)), ["d5", "d6", "d7", "d8"]);
        assert_eq!(labels(south(d4)), ["d3", "d2", "d1"]);
        assert_eq!(labels(east(d4)), ["e4", "f4", "g4", "h4"]);
        assert_eq!(labels(west(d4)), ["c4", "b4", "a4"]);
    }

    #[test]
    fn test_diagonal() {
        let b3 = Coord::from_parts(File::B, Rank::R3);
        assert_eq!(labels(north_east(b3)), ["c4", "d5", "e6", "f7", "g8"]);
        assert_eq!(labels(north_west(b3)), ["a4"]);
        assert_eq!(labels(south_east(b3)), ["c2", "d1"]);
        assert_eq!(labels(south_west(b3)), ["a2"]);
    }

    #[test]
    fn test_edges() {
        let a8 = Coord::from_parts(File::A, Rank::R8);
        assert_eq!(north(a8).len(), 0);
        assert_eq!(west(a8).len(), 0);
        assert_eq!(north_east(a8).len(), 0);
        assert_eq!(south_west(a8).len(), 0);
        assert_eq!(labels(south_east(a8)).last().unwrap(), "h1");
        assert_eq!(south(a8).len(), 7);
        assert_eq!(east(a8).len(), 7);
    }

    #[test]
    fn test_lengths() {
        for coord in Coord::iter() {
            let (rank, file) = coord.rank_file();
            assert_eq!(south(coord).len(), 7 - rank);
            assert_eq!(north(coord).len(), rank);
            assert_eq!(east(coord).len(), 7 - file);
            assert_eq!(west(coord).len(), file);
            assert_eq!(south_east(coord).len(), (7 - rank).min(7 - file));
            assert_eq!(north_west(coord).len(), rank.min(file));
            assert_eq!(north_east(coord).len(), rank.min(7 - file));
            assert_eq!(south_west(coord).len(), (7 - rank).min(file));
            for dir in Direction::ORTHOGONAL.into_iter().chain(Direction::DIAGONAL) {
                let (dr, df) = dir.delta();
                let mut prev = coord;
                for next in ray(coord, dir) {
                    assert_eq!(prev.try_shift(df, dr), Some(next));
                    prev = next;
                }
                assert_eq!(prev.try_shift(df, dr), None);
            }
        }
    }
}
