//! # Chess positions from FEN
//!
//! This crate loads a chess position from FEN, lets you inspect its pieces, computes the squares
//! each piece may move to, and applies moves.
//!
//! Move generation follows piece geometry and board occupancy only. Checks, pins, castling,
//! enpassant and promotion are not considered.
//!
//! # Example
//!
//! ```
//! use fenboard::{Board, Coord};
//!
//! let mut b = Board::initial();
//! let e2 = Coord::from_algebraic("e2").unwrap();
//! let moves: Vec<_> = b.legal_moves(e2).iter().map(|c| c.to_string()).collect();
//! assert_eq!(moves, ["e3", "e4"]);
//!
//! b.apply_algebraic("e2", "e4").unwrap();
//! assert_eq!(b.as_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
//! ```

pub mod board;
pub mod movegen;
pub mod moves;
pub mod piece;

pub use fenboard_base::{geometry, types};

pub use board::{Board, RawBoard};
pub use movegen::MoveList;
pub use moves::Move;
pub use piece::Piece;
pub use types::{CastlingRights, CastlingSide, Cell, Color, Coord, File, PieceKind, Rank};
