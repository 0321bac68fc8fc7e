//! Positions: the FEN codec, the board with pieces, and board printing

use crate::movegen::{self, MoveList};
use crate::moves::Move;
use crate::piece::Piece;
use crate::types::{
    CastlingRights, CastlingRightsParseError, Cell, Color, ColorParseError, Coord,
    CoordParseError, File, PieceKind, Rank,
};

use std::fmt::{self, Display};
use std::str::FromStr;

use log::{debug, warn};
use thiserror::Error;

/// Error parsing the piece placement field of FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum PlacementParseError {
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} spans {width} squares instead of 8")]
    RankWidth { rank: Rank, width: usize },
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Space-separated field of a FEN string
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FenField {
    Placement,
    Side,
    Castling,
    EnPassant,
    HalfmoveClock,
    MoveNumber,
}

impl Display for FenField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FenField::Placement => "piece placement",
            FenField::Side => "side to move",
            FenField::Castling => "castling rights",
            FenField::EnPassant => "en passant square",
            FenField::HalfmoveClock => "halfmove clock",
            FenField::MoveNumber => "move number",
        })
    }
}

/// Error parsing a position from FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum FenParseError {
    #[error("non-ASCII data in FEN")]
    NonAscii,
    /// One of the four mandatory fields is absent
    #[error("missing {0}")]
    Missing(FenField),
    #[error("bad piece placement: {0}")]
    Placement(#[from] PlacementParseError),
    #[error("bad side to move: {0}")]
    Side(#[from] ColorParseError),
    #[error("bad castling rights: {0}")]
    Castling(#[from] CastlingRightsParseError),
    #[error("bad en passant square: {0}")]
    EnPassant(#[from] CoordParseError),
    /// Counter is not a plain decimal number fitting into `u16`
    #[error("bad {0}: {1:?}")]
    Counter(FenField, String),
    #[error("move number must be positive")]
    ZeroMoveNumber,
    #[error("extra data after move number")]
    ExtraData,
}

/// Error applying a move to the [`Board`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum MoveError {
    #[error("no piece at {0}")]
    NoPiece(Coord),
    /// Destination is not among the legal moves of the piece
    #[error("move {src}{dst} is not legal")]
    Illegal { src: Coord, dst: Coord },
}

/// Error applying a move given by square labels
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum AlgebraicMoveError {
    #[error("bad square: {0}")]
    Coord(#[from] CoordParseError),
    #[error(transparent)]
    Move(#[from] MoveError),
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Decoded FEN string
///
/// A grid of piece codes plus the position metadata, without any piece objects. It is what
/// [`Board`] is built from, and what [`Board::raw()`] returns as a snapshot.
///
/// # Example
///
/// ```
/// # use fenboard::{RawBoard, Board, Coord, Color, PieceKind, Cell};
/// #
/// let mut raw = RawBoard::empty();
/// raw.put(Coord::from_algebraic("b2").unwrap(), Cell::from_parts(Color::White, PieceKind::King));
/// raw.put(Coord::from_algebraic("d5").unwrap(), Cell::from_parts(Color::Black, PieceKind::King));
/// raw.halfmove_clock = 10;
/// raw.move_number = 42;
///
/// let board = Board::from(&raw);
/// assert_eq!(board.as_fen(), "8/8/8/3k4/8/8/1K6/8 w - - 10 42");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RawBoard {
    /// Piece codes indexed by [`Coord::index()`]
    pub cells: [Cell; 64],
    pub side: Color,
    pub castling: CastlingRights,
    /// Kept only to be written back into FEN
    pub ep_square: Option<Coord>,
    pub halfmove_clock: u16,
    /// Full move number, starting from 1
    pub move_number: u16,
}

impl RawBoard {
    /// Empty board with White to move on move 1
    pub const fn empty() -> RawBoard {
        RawBoard {
            cells: [Cell::EMPTY; 64],
            side: Color::White,
            castling: CastlingRights::EMPTY,
            ep_square: None,
            halfmove_clock: 0,
            move_number: 1,
        }
    }

    pub fn initial() -> RawBoard {
        let mut res = RawBoard {
            castling: CastlingRights::FULL,
            ..RawBoard::empty()
        };
        for (file, kind) in File::iter().zip(BACK_RANK) {
            for (color, back, front) in [
                (Color::White, Rank::R1, Rank::R2),
                (Color::Black, Rank::R8, Rank::R7),
            ] {
                res.put(Coord::from_parts(file, back), Cell::from_parts(color, kind));
                res.put(
                    Coord::from_parts(file, front),
                    Cell::from_parts(color, PieceKind::Pawn),
                );
            }
        }
        res
    }

    pub fn from_fen(fen: &str) -> Result<RawBoard, FenParseError> {
        fen.parse()
    }

    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        self.cells[c.index()]
    }

    #[inline]
    pub fn put(&mut self, c: Coord, cell: Cell) {
        self.cells[c.index()] = cell;
    }

    /// Returns a wrapper which displays the board as a grid in the given `style`
    ///
    /// # Example
    ///
    /// ```
    /// # use fenboard::{RawBoard, board::PrettyStyle};
    /// #
    /// let expected = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    /// W|abcdefgh
    /// "#;
    /// let shown = RawBoard::initial().pretty(PrettyStyle::Ascii).to_string();
    /// assert_eq!(shown.trim(), expected.trim());
    /// ```
    pub fn pretty(&self, style: PrettyStyle) -> Pretty {
        Pretty { raw: *self, style }
    }

    pub fn as_fen(&self) -> String {
        self.to_string()
    }
}

impl Default for RawBoard {
    fn default() -> RawBoard {
        RawBoard::empty()
    }
}

fn parse_placement(s: &str) -> Result<[Cell; 64], PlacementParseError> {
    type Error = PlacementParseError;

    let count = s.split('/').count();
    if count != 8 {
        return Err(Error::RankCount(count));
    }
    let mut cells = [Cell::EMPTY; 64];
    for (rank, row) in Rank::iter().zip(s.split('/')) {
        let mut width = 0;
        for ch in row.chars() {
            if let Some(gap @ 1..=8) = ch.to_digit(10) {
                width += gap as usize;
                continue;
            }
            let cell = Cell::from_char(ch).ok_or(Error::UnexpectedChar(ch))?;
            if width < 8 {
                cells[Coord::from_parts(File::from_index(width), rank).index()] = cell;
            }
            width += 1;
        }
        if width != 8 {
            return Err(Error::RankWidth { rank, width });
        }
    }
    Ok(cells)
}

fn parse_counter(s: &str, field: FenField) -> Result<u16, FenParseError> {
    let bad = || FenParseError::Counter(field, s.to_owned());
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    s.parse().map_err(|_| bad())
}

fn required<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    field: FenField,
) -> Result<&'a str, FenParseError> {
    fields.next().ok_or(FenParseError::Missing(field))
}

impl FromStr for RawBoard {
    type Err = FenParseError;

    /// Parses FEN. The halfmove clock and move number may be omitted together with everything
    /// after them, and default to 0 and 1.
    fn from_str(s: &str) -> Result<RawBoard, Self::Err> {
        if !s.is_ascii() {
            return Err(FenParseError::NonAscii);
        }
        let mut fields = s.split_ascii_whitespace();

        let cells = parse_placement(required(&mut fields, FenField::Placement)?)?;
        let side: Color = required(&mut fields, FenField::Side)?.parse()?;
        let castling: CastlingRights = required(&mut fields, FenField::Castling)?.parse()?;
        let ep_square = match required(&mut fields, FenField::EnPassant)? {
            "-" => None,
            square => Some(square.parse()?),
        };
        let halfmove_clock = match fields.next() {
            Some(s) => parse_counter(s, FenField::HalfmoveClock)?,
            None => 0,
        };
        let move_number = match fields.next() {
            Some(s) => parse_counter(s, FenField::MoveNumber)?,
            None => 1,
        };
        if move_number == 0 {
            return Err(FenParseError::ZeroMoveNumber);
        }
        if fields.next().is_some() {
            return Err(FenParseError::ExtraData);
        }

        Ok(RawBoard {
            cells,
            side,
            castling,
            ep_square,
            halfmove_clock,
            move_number,
        })
    }
}

fn write_placement(cells: &[Cell; 64], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (idx, row) in cells.chunks(8).enumerate() {
        if idx != 0 {
            f.write_str("/")?;
        }
        let mut gap = 0;
        for cell in row {
            if cell.is_empty() {
                gap += 1;
                continue;
            }
            if gap != 0 {
                write!(f, "{}", gap)?;
                gap = 0;
            }
            write!(f, "{}", cell)?;
        }
        if gap != 0 {
            write!(f, "{}", gap)?;
        }
    }
    Ok(())
}

impl Display for RawBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_placement(&self.cells, f)?;
        write!(f, " {} {} ", self.side, self.castling)?;
        match self.ep_square {
            Some(c) => write!(f, "{}", c)?,
            None => f.write_str("-")?,
        }
        write!(f, " {} {}", self.halfmove_clock, self.move_number)
    }
}

/// Board with pieces
///
/// The board owns its pieces, at most one per square, and each piece's own coordinate
/// matches the square it is stored in.
///
/// Move computations only borrow the board. The only way to change it is
/// [`Board::apply_move()`] and its wrappers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; 64],
    side: Color,
    castling: CastlingRights,
    ep_square: Option<Coord>,
    halfmove_clock: u16,
    move_number: u16,
}

impl Board {
    pub fn initial() -> Board {
        Board::from(&RawBoard::initial())
    }

    /// Parses a board from FEN, or returns the initial position if `fen` is `None`
    pub fn new(fen: Option<&str>) -> Result<Board, FenParseError> {
        match fen {
            Some(fen) => Board::from_fen(fen),
            None => Ok(Board::initial()),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Board, FenParseError> {
        fen.parse()
    }

    /// Returns a snapshot of the board as a grid of piece codes plus metadata
    pub fn raw(&self) -> RawBoard {
        let mut cells = [Cell::EMPTY; 64];
        for p in self.pieces() {
            cells[p.coord().index()] = p.cell();
        }
        RawBoard {
            cells,
            side: self.side,
            castling: self.castling,
            ep_square: self.ep_square,
            halfmove_clock: self.halfmove_clock,
            move_number: self.move_number,
        }
    }

    #[inline]
    pub fn get(&self, c: Coord) -> Option<&Piece> {
        self.cells[c.index()].as_ref()
    }

    /// Returns the piece on the square with label `square`, like `e2`
    pub fn piece_at(&self, square: &str) -> Result<Option<&Piece>, CoordParseError> {
        Ok(self.get(Coord::from_algebraic(square)?))
    }

    #[inline]
    pub fn is_occupied(&self, c: Coord) -> bool {
        self.cells[c.index()].is_some()
    }

    #[inline]
    pub fn color_at(&self, c: Coord) -> Option<Color> {
        self.get(c).map(Piece::color)
    }

    /// Iterates over all the pieces on the board, in coordinate order
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.cells.iter().flatten()
    }

    /// Returns the total material weight of the pieces with color `c`, kings excluded
    pub fn material(&self, c: Color) -> u32 {
        self.pieces()
            .filter(|p| p.color() == c && p.kind() != PieceKind::King)
            .map(Piece::material_weight)
            .sum()
    }

    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn ep_square(&self) -> Option<Coord> {
        self.ep_square
    }

    /// Returns the number of half-moves since the last capture or pawn move
    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn move_number(&self) -> u16 {
        self.move_number
    }

    /// Returns the global half-move counter, which is `2 * move_number` plus one if Black is
    /// to move
    #[inline]
    pub fn ply(&self) -> u32 {
        2 * u32::from(self.move_number) + u32::from(self.side == Color::Black)
    }

    /// Returns the squares the piece on `c` may move to, or an empty list if `c` is empty
    ///
    /// The result is recomputed on each call.
    #[inline]
    pub fn legal_moves(&self, c: Coord) -> MoveList {
        movegen::legal_moves(self, c)
    }

    /// Moves the piece from `src` to `dst`
    ///
    /// The move is applied only if there is a piece on `src` and `dst` is among its legal moves.
    /// Whatever stands on `dst` is captured and returned. On success, the half-move counter
    /// advances: the side to move flips, and the move number grows after each move by Black.
    ///
    /// Side to move is not checked, so any piece may be moved at any time.
    ///
    /// If the move is rejected, the board stays unchanged.
    pub fn apply_move(&mut self, src: Coord, dst: Coord) -> Result<Option<Piece>, MoveError> {
        let legal = match self.get(src) {
            Some(p) => p.legal_moves(self),
            None => {
                warn!("cannot move from {}: no piece there", src);
                return Err(MoveError::NoPiece(src));
            }
        };
        if !legal.contains(&dst) {
            warn!("cannot move from {} to {}: move is not legal", src, dst);
            return Err(MoveError::Illegal { src, dst });
        }

        let mut piece = self.cells[src.index()]
            .take()
            .ok_or(MoveError::NoPiece(src))?;
        let captured = self.cells[dst.index()].take();
        piece.relocate(dst);
        let resets_clock = captured.is_some() || piece.kind() == PieceKind::Pawn;
        debug!(
            "move {} from {} to {}, captured {:?}",
            piece,
            src,
            dst,
            captured.as_ref().map(Piece::cell)
        );
        self.cells[dst.index()] = Some(piece);
        self.advance_ply(resets_clock);

        #[cfg(feature = "selftest")]
        self.selftest();

        Ok(captured)
    }

    /// Applies a [`Move`], same as [`Board::apply_move()`]
    #[inline]
    pub fn make_move(&mut self, mv: Move) -> Result<Option<Piece>, MoveError> {
        self.apply_move(mv.src(), mv.dst())
    }

    /// Moves the piece between the squares with labels `src` and `dst`, like `e2` and `e4`
    pub fn apply_algebraic(
        &mut self,
        src: &str,
        dst: &str,
    ) -> Result<Option<Piece>, AlgebraicMoveError> {
        let src = Coord::from_algebraic(src)?;
        let dst = Coord::from_algebraic(dst)?;
        Ok(self.apply_move(src, dst)?)
    }

    fn advance_ply(&mut self, resets_clock: bool) {
        if resets_clock {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if self.side == Color::Black {
            self.move_number = self.move_number.saturating_add(1);
        }
        self.side = self.side.inv();
    }

    #[cfg(feature = "selftest")]
    fn selftest(&self) {
        for (idx, cell) in self.cells.iter().enumerate() {
            if let Some(p) = cell {
                assert_eq!(
                    p.coord().index(),
                    idx,
                    "piece {} is stored at {} but thinks it is at {}",
                    p,
                    Coord::from_index(idx),
                    p.coord()
                );
            }
        }
    }

    /// Returns a wrapper which displays a snapshot of the board as a grid in the given `style`
    ///
    /// See [`RawBoard::pretty()`] for the layout.
    pub fn pretty(&self, style: PrettyStyle) -> Pretty {
        self.raw().pretty(style)
    }

    /// Returns a human-readable summary of the side to move and move counters
    ///
    /// # Example
    ///
    /// ```
    /// # use fenboard::Board;
    /// #
    /// let b = Board::from_fen("8/8/8/8/8/8/8/K6k b - - 3 12").unwrap();
    /// assert_eq!(
    ///     b.summary().to_string(),
    ///     "Black to move\nMove number: 12\n3 plies since last capture or pawn advance",
    /// );
    /// ```
    #[inline]
    pub fn summary(&self) -> Summary<'_> {
        Summary(self)
    }

    pub fn as_fen(&self) -> String {
        self.to_string()
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::initial()
    }
}

impl From<&RawBoard> for Board {
    fn from(raw: &RawBoard) -> Board {
        Board {
            cells: std::array::from_fn(|idx| {
                Piece::from_cell(raw.cells[idx], Coord::from_index(idx))
            }),
            side: raw.side,
            castling: raw.castling,
            ep_square: raw.ep_square,
            halfmove_clock: raw.halfmove_clock,
            move_number: raw.move_number,
        }
    }
}

impl From<RawBoard> for Board {
    fn from(raw: RawBoard) -> Board {
        Board::from(&raw)
    }
}

impl FromStr for Board {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        Ok(Board::from(&s.parse::<RawBoard>()?))
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.raw().fmt(f)
    }
}

/// Character set for [`RawBoard::pretty()`] and [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// FEN letters and ASCII frame
    Ascii,
    /// Chess symbols and box-drawing frame
    Utf8,
}

struct Frame {
    vert: char,
    horz: char,
    corner: char,
    white: char,
    black: char,
    piece: fn(&Cell) -> char,
}

impl PrettyStyle {
    fn frame(self) -> Frame {
        match self {
            PrettyStyle::Ascii => Frame {
                vert: '|',
                horz: '-',
                corner: '+',
                white: 'W',
                black: 'B',
                piece: Cell::as_char,
            },
            PrettyStyle::Utf8 => Frame {
                vert: '│',
                horz: '─',
                corner: '┼',
                white: '○',
                black: '●',
                piece: Cell::as_utf8_char,
            },
        }
    }
}

/// Board printed as a grid, with rank labels on the left and file labels below
///
/// The bottom-left corner shows the side to move.
pub struct Pretty {
    raw: RawBoard,
    style: PrettyStyle,
}

impl Display for Pretty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = self.style.frame();
        for (rank, row) in Rank::iter().zip(self.raw.cells.chunks(8)) {
            write!(f, "{}{}", rank, frame.vert)?;
            for cell in row {
                write!(f, "{}", (frame.piece)(cell))?;
            }
            writeln!(f)?;
        }
        let rule: String = std::iter::repeat(frame.horz).take(8).collect();
        writeln!(f, "{}{}{}", frame.horz, frame.corner, rule)?;
        let side = match self.raw.side {
            Color::White => frame.white,
            Color::Black => frame.black,
        };
        let files: String = File::iter().map(File::as_char).collect();
        writeln!(f, "{}{}{}", side, frame.vert, files)
    }
}

/// Side to move and move counters, one per line
///
/// See [`Board::summary()`].
pub struct Summary<'a>(&'a Board);

impl<'a> Display for Summary<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.0;
        match b.side {
            Color::White => writeln!(f, "White to move")?,
            Color::Black => writeln!(f, "Black to move")?,
        }
        writeln!(f, "Move number: {}", b.move_number)?;
        write!(
            f,
            "{} plies since last capture or pawn advance",
            b.halfmove_clock
        )
    }
}
