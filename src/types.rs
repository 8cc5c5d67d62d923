//! Core value types shared by every table: colours, piece types, directions and squares.
//!
//! Square indexing: a1 = 0, b1 = 1, ..., h1 = 7, a2 = 8, ..., h8 = 63.
//! Files and ranks are 0-based: `file = sq & 7`, `rank = sq >> 3`.

use std::cmp::max;

/// A square index (0-63). Values outside that range are a caller bug.
pub type Square = u8;

/// Number of squares on the board
pub const SQUARE_NB: usize = 64;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn other_color(&self) -> Color {
        if *self == Color::White {
            Color::Black
        } else {
            Color::White
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    pub fn from_char(c: char) -> Option<PieceType> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Is the piece a sliding piece (one which can move multiple square in a given direction)
    pub fn is_sliding(&self) -> bool {
        matches!(self, PieceType::Bishop | PieceType::Rook | PieceType::Queen)
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }
}

/// The eight compass directions a piece can step in.
/// North is towards rank 8, east is towards the h-file.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// (rank_delta, file_delta) of a single step
    #[inline(always)]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (1, 0),
            Direction::NorthEast => (1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (-1, 1),
            Direction::South => (-1, 0),
            Direction::SouthWest => (-1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (1, -1),
        }
    }

    /// Change in square index for a single step. Only meaningful when the step stays on the board.
    #[inline(always)]
    pub const fn offset(self) -> i8 {
        let (dr, df) = self.delta();
        dr * 8 + df
    }
}

#[inline(always)]
pub const fn make_square(file: u8, rank: u8) -> Square {
    (rank << 3) | file
}

#[inline(always)]
pub const fn sq_file(sq: Square) -> u8 {
    sq & 7
}

#[inline(always)]
pub const fn sq_rank(sq: Square) -> u8 {
    sq >> 3
}

#[inline(always)]
pub const fn is_ok(sq: i32) -> bool {
    sq >= 0 && sq < SQUARE_NB as i32
}

/// Square reached from `sq` after moving `rank_delta` ranks and `file_delta` files,
/// or `None` if that leaves the board.
#[inline]
pub const fn offset_square(sq: Square, rank_delta: i8, file_delta: i8) -> Option<Square> {
    let rank = sq_rank(sq) as i8 + rank_delta;
    let file = sq_file(sq) as i8 + file_delta;
    if rank < 0 || rank > 7 || file < 0 || file > 7 {
        None
    } else {
        Some(make_square(file as u8, rank as u8))
    }
}

#[inline(always)]
pub const fn file_distance(s1: Square, s2: Square) -> u8 {
    sq_file(s1).abs_diff(sq_file(s2))
}

#[inline(always)]
pub const fn rank_distance(s1: Square, s2: Square) -> u8 {
    sq_rank(s1).abs_diff(sq_rank(s2))
}

/// Chebyshev (king-step) distance
pub fn chebyshev_distance(s1: Square, s2: Square) -> u8 {
    max(file_distance(s1, s2), rank_distance(s1, s2))
}

/// Distance from the square's file to the nearest a/h edge
pub fn edge_distance(sq: Square) -> u8 {
    let file = sq_file(sq);
    file.min(7 - file)
}

/// Rank as seen from `color`'s side of the board
pub const fn relative_rank(color: Color, sq: Square) -> u8 {
    match color {
        Color::White => sq_rank(sq),
        Color::Black => 7 - sq_rank(sq),
    }
}

/// Parse algebraic notation such as "d4"
pub fn parse_square(s: &str) -> Option<Square> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let file = bytes[0].to_ascii_lowercase().wrapping_sub(b'a');
    let rank = bytes[1].wrapping_sub(b'1');
    if file < 8 && rank < 8 {
        Some(make_square(file, rank))
    } else {
        None
    }
}

pub fn square_name(sq: Square) -> String {
    format!(
        "{}{}",
        (b'a' + sq_file(sq)) as char,
        (b'1' + sq_rank(sq)) as char
    )
}

#[rustfmt::skip]
pub mod squares {
    use super::Square;

    pub const A1: Square = 0; pub const B1: Square = 1; pub const C1: Square = 2; pub const D1: Square = 3; pub const E1: Square = 4; pub const F1: Square = 5; pub const G1: Square = 6; pub const H1: Square = 7;
    pub const A2: Square = 8; pub const B2: Square = 9; pub const C2: Square = 10; pub const D2: Square = 11; pub const E2: Square = 12; pub const F2: Square = 13; pub const G2: Square = 14; pub const H2: Square = 15;
    pub const A3: Square = 16; pub const B3: Square = 17; pub const C3: Square = 18; pub const D3: Square = 19; pub const E3: Square = 20; pub const F3: Square = 21; pub const G3: Square = 22; pub const H3: Square = 23;
    pub const A4: Square = 24; pub const B4: Square = 25; pub const C4: Square = 26; pub const D4: Square = 27; pub const E4: Square = 28; pub const F4: Square = 29; pub const G4: Square = 30; pub const H4: Square = 31;
    pub const A5: Square = 32; pub const B5: Square = 33; pub const C5: Square = 34; pub const D5: Square = 35; pub const E5: Square = 36; pub const F5: Square = 37; pub const G5: Square = 38; pub const H5: Square = 39;
    pub const A6: Square = 40; pub const B6: Square = 41; pub const C6: Square = 42; pub const D6: Square = 43; pub const E6: Square = 44; pub const F6: Square = 45; pub const G6: Square = 46; pub const H6: Square = 47;
    pub const A7: Square = 48; pub const B7: Square = 49; pub const C7: Square = 50; pub const D7: Square = 51; pub const E7: Square = 52; pub const F7: Square = 53; pub const G7: Square = 54; pub const H7: Square = 55;
    pub const A8: Square = 56; pub const B8: Square = 57; pub const C8: Square = 58; pub const D8: Square = 59; pub const E8: Square = 60; pub const F8: Square = 61; pub const G8: Square = 62; pub const H8: Square = 63;
}

pub use squares::*;
