//! Squares, colors, piece codes and castling rights

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error parsing a square label like `e2`
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoordParseError {
    #[error("square label must be exactly two chars")]
    BadLength,
    #[error("file must be in 'a'..='h', got {0:?}")]
    UnexpectedFileChar(char),
    #[error("rank must be in '1'..='8', got {0:?}")]
    UnexpectedRankChar(char),
}

/// Error parsing side to move
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("side to move must be \"w\" or \"b\", got {0:?}")]
pub struct ColorParseError(pub String);

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CastlingRightsParseError {
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
    #[error("duplicate char {0:?}")]
    DuplicateChar(char),
    #[error("castling rights are empty, use \"-\" instead")]
    EmptyString,
}

/// Board file, from `a` to `h`
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Panics if `idx` is not in `0..8`
    pub const fn from_index(idx: usize) -> File {
        File::ALL[idx]
    }

    pub fn iter() -> impl Iterator<Item = File> {
        File::ALL.into_iter()
    }

    pub fn from_char(c: char) -> Option<File> {
        let idx = (c as u32).checked_sub('a' as u32)?;
        File::ALL.get(idx as usize).copied()
    }

    pub fn as_char(self) -> char {
        char::from(b'a' + self as u8)
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Board rank
///
/// Ranks go in the order they are written in FEN, so [`Rank::R8`] has index 0 and
/// [`Rank::R1`] has index 7.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Rank {
    R8,
    R7,
    R6,
    R5,
    R4,
    R3,
    R2,
    R1,
}

impl Rank {
    const ALL: [Rank; 8] = [
        Rank::R8,
        Rank::R7,
        Rank::R6,
        Rank::R5,
        Rank::R4,
        Rank::R3,
        Rank::R2,
        Rank::R1,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Panics if `idx` is not in `0..8`
    pub const fn from_index(idx: usize) -> Rank {
        Rank::ALL[idx]
    }

    pub fn iter() -> impl Iterator<Item = Rank> {
        Rank::ALL.into_iter()
    }

    /// Maps digit `d` in `'1'..='8'` to the rank with index `8 - d`
    pub fn from_char(c: char) -> Option<Rank> {
        match c.to_digit(10)? {
            d @ 1..=8 => Some(Rank::ALL[8 - d as usize]),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        char::from(b'8' - self as u8)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Square on the board
///
/// Stored as `rank * 8 + file` in a single byte. A `Coord` always refers to an existing
/// square, so anything that may leave the board goes through [`Coord::try_shift()`].
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Coord(u8);

impl Coord {
    /// Panics if `idx` is not in `0..64`
    pub const fn from_index(idx: usize) -> Coord {
        assert!(idx < 64, "square index out of range");
        Coord(idx as u8)
    }

    pub const fn from_parts(file: File, rank: Rank) -> Coord {
        Coord(rank as u8 * 8 + file as u8)
    }

    /// Builds a square from raw indices, or returns `None` if it is off the board
    pub const fn from_rank_file(rank: usize, file: usize) -> Option<Coord> {
        if rank < 8 && file < 8 {
            Some(Coord((rank * 8 + file) as u8))
        } else {
            None
        }
    }

    pub const fn file(self) -> File {
        File::from_index(self.0 as usize % 8)
    }

    pub const fn rank(self) -> Rank {
        Rank::from_index(self.0 as usize / 8)
    }

    /// Returns raw `(rank, file)` indices
    pub const fn rank_file(self) -> (usize, usize) {
        (self.0 as usize / 8, self.0 as usize % 8)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Moves by `delta` in index space; the result must stay on the board
    pub const fn add(self, delta: isize) -> Coord {
        Coord::from_index((self.0 as isize + delta) as usize)
    }

    pub fn try_shift(self, delta_file: isize, delta_rank: isize) -> Option<Coord> {
        let (rank, file) = self.rank_file();
        Coord::from_rank_file(
            rank.checked_add_signed(delta_rank)?,
            file.checked_add_signed(delta_file)?,
        )
    }

    /// Returns a label like `e2`
    pub fn to_algebraic(self) -> String {
        self.to_string()
    }

    /// Parses a label like `e2`
    pub fn from_algebraic(s: &str) -> Result<Coord, CoordParseError> {
        s.parse()
    }

    pub fn iter() -> impl Iterator<Item = Coord> {
        (0..64).map(Coord::from_index)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({})", self)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl FromStr for Coord {
    type Err = CoordParseError;

    fn from_str(s: &str) -> Result<Coord, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(CoordParseError::BadLength);
        };
        let file = File::from_char(file).ok_or(CoordParseError::UnexpectedFileChar(file))?;
        let rank = Rank::from_char(rank).ok_or(CoordParseError::UnexpectedRankChar(rank))?;
        Ok(Coord::from_parts(file, rank))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const fn inv(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::White => "w",
            Color::Black => "b",
        })
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Color, Self::Err> {
        match s {
            "w" => Ok(Color::White),
            "b" => Ok(Color::Black),
            _ => Err(ColorParseError(s.to_owned())),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Weight of the king, which is never traded
    pub const UNBOUNDED_WEIGHT: u32 = u32::MAX;

    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Conventional material value. Movement never depends on it.
    pub const fn material_weight(self) -> u32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => Self::UNBOUNDED_WEIGHT,
        }
    }

    /// Returns `true` for pieces moving along rays
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Lowercase FEN letter
    pub fn as_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Parses a lowercase FEN letter
    pub fn from_char(c: char) -> Option<PieceKind> {
        PieceKind::ALL.into_iter().find(|k| k.as_char() == c)
    }
}

/// Contents of a square as written in FEN
///
/// Either empty, or a piece letter whose case gives the color (uppercase is White).
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell(Option<(Color, PieceKind)>);

impl Cell {
    pub const EMPTY: Cell = Cell(None);

    pub const fn from_parts(c: Color, k: PieceKind) -> Cell {
        Cell(Some((c, k)))
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub const fn is_occupied(&self) -> bool {
        self.0.is_some()
    }

    pub const fn color(&self) -> Option<Color> {
        match self.0 {
            Some((c, _)) => Some(c),
            None => None,
        }
    }

    pub const fn kind(&self) -> Option<PieceKind> {
        match self.0 {
            Some((_, k)) => Some(k),
            None => None,
        }
    }

    /// Iterates over the empty cell and then every piece code, White first
    pub fn iter() -> impl Iterator<Item = Cell> {
        let pieces = [Color::White, Color::Black].into_iter().flat_map(|c| {
            PieceKind::ALL
                .into_iter()
                .map(move |k| Cell::from_parts(c, k))
        });
        std::iter::once(Cell::EMPTY).chain(pieces)
    }

    /// FEN letter, or `.` for an empty square
    pub fn as_char(&self) -> char {
        match self.0 {
            None => '.',
            Some((Color::White, k)) => k.as_char().to_ascii_uppercase(),
            Some((Color::Black, k)) => k.as_char(),
        }
    }

    /// Chess symbol from Unicode, or `.` for an empty square
    pub fn as_utf8_char(&self) -> char {
        let Some((color, kind)) = self.0 else {
            return '.';
        };
        let glyphs = match color {
            Color::White => ['♙', '♘', '♗', '♖', '♕', '♔'],
            Color::Black => ['♟', '♞', '♝', '♜', '♛', '♚'],
        };
        glyphs[kind as usize]
    }

    /// Parses a FEN piece letter. Empty squares have no letter of their own, so the result
    /// is always occupied.
    pub fn from_char(c: char) -> Option<Cell> {
        let kind = PieceKind::from_char(c.to_ascii_lowercase())?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Cell::from_parts(color, kind))
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell({})", self.as_char())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    King,
    Queen,
}

/// Four independent castling flags, one per color and side
///
/// They are only tracked: moves never consult or update them.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CastlingRights([[bool; 2]; 2]);

const CASTLING_CHARS: [(char, Color, CastlingSide); 4] = [
    ('K', Color::White, CastlingSide::King),
    ('Q', Color::White, CastlingSide::Queen),
    ('k', Color::Black, CastlingSide::King),
    ('q', Color::Black, CastlingSide::Queen),
];

impl CastlingRights {
    pub const EMPTY: CastlingRights = CastlingRights([[false; 2]; 2]);
    pub const FULL: CastlingRights = CastlingRights([[true; 2]; 2]);

    pub const fn has(&self, c: Color, s: CastlingSide) -> bool {
        self.0[c as usize][s as usize]
    }

    pub fn set(&mut self, c: Color, s: CastlingSide) {
        self.0[c as usize][s as usize] = true;
    }
}

impl fmt::Debug for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastlingRights({})", self)
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == CastlingRights::EMPTY {
            return f.write_str("-");
        }
        for (ch, c, s) in CASTLING_CHARS {
            if self.has(c, s) {
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}

impl FromStr for CastlingRights {
    type Err = CastlingRightsParseError;

    fn from_str(s: &str) -> Result<CastlingRights, Self::Err> {
        type Error = CastlingRightsParseError;

        match s {
            "-" => return Ok(CastlingRights::EMPTY),
            "" => return Err(Error::EmptyString),
            _ => {}
        }
        let mut res = CastlingRights::EMPTY;
        for ch in s.chars() {
            let (_, c, side) = CASTLING_CHARS
                .into_iter()
                .find(|&(x, _, _)| x == ch)
                .ok_or(Error::UnexpectedChar(ch))?;
            if res.has(c, side) {
                return Err(Error::DuplicateChar(ch));
            }
            res.set(c, side);
        }
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes() {
        let files: String = File::iter().map(File::as_char).collect();
        assert_eq!(files, "abcdefgh");
        let ranks: String = Rank::iter().map(Rank::as_char).collect();
        assert_eq!(ranks, "87654321");
        for idx in 0..8 {
            assert_eq!(File::from_index(idx).index(), idx);
            assert_eq!(Rank::from_index(idx).index(), idx);
        }
        assert_eq!(File::from_char('c'), Some(File::C));
        assert_eq!(File::from_char('i'), None);
        assert_eq!(File::from_char('A'), None);
        assert_eq!(Rank::from_char('8'), Some(Rank::R8));
        assert_eq!(Rank::from_char('1'), Some(Rank::R1));
        assert_eq!(Rank::from_char('0'), None);
        assert_eq!(Rank::from_char('9'), None);
    }

    #[test]
    fn test_coord_layout() {
        let e2 = Coord::from_parts(File::E, Rank::R2);
        assert_eq!(e2.rank_file(), (6, 4));
        assert_eq!(e2.index(), 52);
        assert_eq!(e2.file(), File::E);
        assert_eq!(e2.rank(), Rank::R2);
        assert_eq!(Coord::from_rank_file(6, 4), Some(e2));
        assert_eq!(Coord::from_rank_file(8, 0), None);
        assert_eq!(Coord::from_rank_file(0, 8), None);
        assert_eq!(e2.add(-8), Coord::from_parts(File::E, Rank::R3));

        for (idx, c) in Coord::iter().enumerate() {
            assert_eq!(c.index(), idx);
            assert_eq!(Coord::from_parts(c.file(), c.rank()), c);
        }
    }

    #[test]
    fn test_coord_shift() {
        let e2 = Coord::from_parts(File::E, Rank::R2);
        assert_eq!(e2.try_shift(0, -2), Some(Coord::from_parts(File::E, Rank::R4)));
        assert_eq!(e2.try_shift(3, 1), Some(Coord::from_parts(File::H, Rank::R1)));
        assert_eq!(e2.try_shift(-4, -6), Some(Coord::from_parts(File::A, Rank::R8)));
        assert_eq!(e2.try_shift(4, 0), None);
        assert_eq!(e2.try_shift(-5, 0), None);
        assert_eq!(e2.try_shift(0, 2), None);
        assert_eq!(e2.try_shift(0, -7), None);
    }

    #[test]
    fn test_coord_labels() {
        assert_eq!(Coord::from_parts(File::A, Rank::R1).to_algebraic(), "a1");
        assert_eq!(Coord::from_parts(File::H, Rank::R8).to_string(), "h8");
        assert_eq!(
            Coord::from_algebraic("e2"),
            Ok(Coord::from_rank_file(6, 4).unwrap())
        );
        assert_eq!(
            Coord::from_algebraic("h9"),
            Err(CoordParseError::UnexpectedRankChar('9'))
        );
        assert_eq!(
            Coord::from_algebraic("i4"),
            Err(CoordParseError::UnexpectedFileChar('i'))
        );
        assert_eq!(
            Coord::from_algebraic("é2"),
            Err(CoordParseError::UnexpectedFileChar('é'))
        );
        assert_eq!(Coord::from_algebraic("e"), Err(CoordParseError::BadLength));
        assert_eq!(Coord::from_algebraic("e22"), Err(CoordParseError::BadLength));
        assert_eq!(Coord::from_algebraic(""), Err(CoordParseError::BadLength));

        for c in Coord::iter() {
            assert_eq!(Coord::from_algebraic(&c.to_algebraic()), Ok(c));
        }
    }

    #[test]
    fn test_color() {
        assert_eq!(Color::White.inv(), Color::Black);
        assert_eq!(Color::Black.inv(), Color::White);
        assert_eq!(Color::from_str("b"), Ok(Color::Black));
        assert_eq!(Color::White.to_string(), "w");
        assert_eq!(
            Color::from_str("white"),
            Err(ColorParseError("white".to_owned()))
        );
    }

    #[test]
    fn test_cell() {
        let cells: Vec<Cell> = Cell::iter().collect();
        assert_eq!(cells.len(), 13);
        let letters: String = cells.iter().map(Cell::as_char).collect();
        assert_eq!(letters, ".PNBRQKpnbrqk");
        let glyphs: String = cells.iter().map(Cell::as_utf8_char).collect();
        assert_eq!(glyphs, ".♙♘♗♖♕♔♟♞♝♜♛♚");

        assert_eq!(Cell::EMPTY.color(), None);
        assert_eq!(Cell::EMPTY.kind(), None);
        for &cell in &cells[1..] {
            assert!(cell.is_occupied());
            assert_eq!(Cell::from_char(cell.as_char()), Some(cell));
        }
        let knight = Cell::from_char('n').unwrap();
        assert_eq!(knight.color(), Some(Color::Black));
        assert_eq!(knight.kind(), Some(PieceKind::Knight));
        assert_eq!(Cell::from_char('.'), None);
        assert_eq!(Cell::from_char('x'), None);
    }

    #[test]
    fn test_weights() {
        let weights: Vec<u32> = PieceKind::ALL
            .into_iter()
            .filter(|&k| k != PieceKind::King)
            .map(PieceKind::material_weight)
            .collect();
        assert_eq!(weights, [1, 3, 3, 5, 9]);
        assert_eq!(
            PieceKind::King.material_weight(),
            PieceKind::UNBOUNDED_WEIGHT
        );
        assert!(PieceKind::Queen.is_slider());
        assert!(!PieceKind::Knight.is_slider());
        assert!(!PieceKind::King.is_slider());
    }

    #[test]
    fn test_castling() {
        assert_eq!(CastlingRights::EMPTY.to_string(), "-");
        assert_eq!(CastlingRights::from_str("-"), Ok(CastlingRights::EMPTY));
        assert_eq!(CastlingRights::FULL.to_string(), "KQkq");
        assert_eq!(CastlingRights::from_str("qkQK"), Ok(CastlingRights::FULL));

        let rights = CastlingRights::from_str("Qk").unwrap();
        assert!(!rights.has(Color::White, CastlingSide::King));
        assert!(rights.has(Color::White, CastlingSide::Queen));
        assert!(rights.has(Color::Black, CastlingSide::King));
        assert!(!rights.has(Color::Black, CastlingSide::Queen));
        assert_eq!(rights.to_string(), "Qk");

        assert_eq!(
            CastlingRights::from_str("KK"),
            Err(CastlingRightsParseError::DuplicateChar('K'))
        );
        assert_eq!(
            CastlingRights::from_str("Kx"),
            Err(CastlingRightsParseError::UnexpectedChar('x'))
        );
        assert_eq!(
            CastlingRights::from_str(""),
            Err(CastlingRightsParseError::EmptyString)
        );
    }
}
