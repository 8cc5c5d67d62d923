//! Bitboard primitives: the 64-bit square sets every other table is made of.
//!
//! A bitboard is a 64-bit integer where each bit represents a square on the chess board.
//! Square indexing: a1 = 0, b1 = 1, ..., h1 = 7, a2 = 8, ..., h8 = 63
//! (see [`crate::types`]). All helpers here are pure and allocation free, except the
//! debugging diagram.

use crate::types::{
    chebyshev_distance, is_ok, relative_rank, sq_file, sq_rank, Color, Direction, Square,
};

pub type Bitboard = u64;

pub const EMPTY: Bitboard = 0;
pub const ALL_SQUARES: Bitboard = !0;
pub const DARK_SQUARES: Bitboard = 0xAA55_AA55_AA55_AA55;

pub const FILE_A_BB: Bitboard = 0x0101_0101_0101_0101;
pub const FILE_B_BB: Bitboard = FILE_A_BB << 1;
pub const FILE_C_BB: Bitboard = FILE_A_BB << 2;
pub const FILE_D_BB: Bitboard = FILE_A_BB << 3;
pub const FILE_E_BB: Bitboard = FILE_A_BB << 4;
pub const FILE_F_BB: Bitboard = FILE_A_BB << 5;
pub const FILE_G_BB: Bitboard = FILE_A_BB << 6;
pub const FILE_H_BB: Bitboard = FILE_A_BB << 7;

pub const RANK_1_BB: Bitboard = 0xFF;
pub const RANK_2_BB: Bitboard = RANK_1_BB << 8;
pub const RANK_3_BB: Bitboard = RANK_1_BB << (8 * 2);
pub const RANK_4_BB: Bitboard = RANK_1_BB << (8 * 3);
pub const RANK_5_BB: Bitboard = RANK_1_BB << (8 * 4);
pub const RANK_6_BB: Bitboard = RANK_1_BB << (8 * 5);
pub const RANK_7_BB: Bitboard = RANK_1_BB << (8 * 6);
pub const RANK_8_BB: Bitboard = RANK_1_BB << (8 * 7);

/// Convert a square index to a bitboard with that single bit set
#[inline(always)]
pub const fn square_bb(sq: Square) -> Bitboard {
    1u64 << sq
}

/// All squares of the given file (0 = a-file)
#[inline(always)]
pub const fn file_bb(file: u8) -> Bitboard {
    FILE_A_BB << file
}

/// All squares of the given rank (0 = first rank)
#[inline(always)]
pub const fn rank_bb(rank: u8) -> Bitboard {
    RANK_1_BB << (8 * rank)
}

#[inline(always)]
pub const fn file_bb_of(sq: Square) -> Bitboard {
    file_bb(sq_file(sq))
}

#[inline(always)]
pub const fn rank_bb_of(sq: Square) -> Bitboard {
    rank_bb(sq_rank(sq))
}

#[inline(always)]
pub const fn contains(bb: Bitboard, sq: Square) -> bool {
    bb & square_bb(sq) != 0
}

/// Move every square one step in `direction`. Squares that would leave the board are
/// dropped rather than wrapping onto the opposite file.
#[inline(always)]
pub const fn shift(bb: Bitboard, direction: Direction) -> Bitboard {
    match direction {
        Direction::North => bb << 8,
        Direction::South => bb >> 8,
        Direction::East => (bb & !FILE_H_BB) << 1,
        Direction::West => (bb & !FILE_A_BB) >> 1,
        Direction::NorthEast => (bb & !FILE_H_BB) << 9,
        Direction::NorthWest => (bb & !FILE_A_BB) << 7,
        Direction::SouthEast => (bb & !FILE_H_BB) >> 7,
        Direction::SouthWest => (bb & !FILE_A_BB) >> 9,
    }
}

/// Squares attacked by pawns of `color` standing on `bb`
#[inline(always)]
pub const fn pawn_attacks_bb(color: Color, bb: Bitboard) -> Bitboard {
    match color {
        Color::White => shift(bb, Direction::NorthWest) | shift(bb, Direction::NorthEast),
        Color::Black => shift(bb, Direction::SouthWest) | shift(bb, Direction::SouthEast),
    }
}

/// Target square of a raw index step, or an empty board if the step leaves the board or
/// wraps around to the other side (any legal king or knight step moves at most 2 files).
#[inline]
pub fn safe_destination(sq: Square, step: i8) -> Bitboard {
    let to = sq as i32 + step as i32;
    if is_ok(to) && chebyshev_distance(sq, to as Square) <= 2 {
        square_bb(to as Square)
    } else {
        EMPTY
    }
}

/// Files directly left and right of the square's file
pub fn adjacent_files_bb(sq: Square) -> Bitboard {
    let file = file_bb_of(sq);
    shift(file, Direction::East) | shift(file, Direction::West)
}

/// Ranks strictly in front of the square, from `color`'s point of view
pub fn forward_ranks_bb(color: Color, sq: Square) -> Bitboard {
    match color {
        Color::White => !RANK_1_BB << (8 * relative_rank(Color::White, sq) as u32),
        Color::Black => !RANK_8_BB >> (8 * relative_rank(Color::Black, sq) as u32),
    }
}

/// Squares in front of the square on its own file
pub fn forward_file_bb(color: Color, sq: Square) -> Bitboard {
    forward_ranks_bb(color, sq) & file_bb_of(sq)
}

/// Squares a pawn on `sq` could ever attack while advancing
pub fn pawn_attack_span(color: Color, sq: Square) -> Bitboard {
    forward_ranks_bb(color, sq) & adjacent_files_bb(sq)
}

/// Squares that must be free of enemy pawns for a pawn on `sq` to be passed
pub fn passed_pawn_span(color: Color, sq: Square) -> Bitboard {
    pawn_attack_span(color, sq) | forward_file_bb(color, sq)
}

#[inline(always)]
pub const fn popcount(bb: Bitboard) -> u32 {
    bb.count_ones()
}

#[inline(always)]
pub const fn more_than_one(bb: Bitboard) -> bool {
    bb & bb.wrapping_sub(1) != 0
}

/// Least significant square. The board must not be empty.
#[inline(always)]
pub fn lsb(bb: Bitboard) -> Square {
    debug_assert!(bb != 0);
    bb.trailing_zeros() as Square
}

/// Most significant square. The board must not be empty.
#[inline(always)]
pub fn msb(bb: Bitboard) -> Square {
    debug_assert!(bb != 0);
    63 - bb.leading_zeros() as Square
}

/// Remove and return the least significant square
#[inline(always)]
pub fn pop_lsb(bb: &mut Bitboard) -> Square {
    let sq = lsb(*bb);
    *bb &= *bb - 1;
    sq
}

/// The square furthest advanced from `color`'s point of view
pub fn frontmost_sq(color: Color, bb: Bitboard) -> Square {
    match color {
        Color::White => msb(bb),
        Color::Black => lsb(bb),
    }
}

/// Iterate over set bits in a bitboard, returning square indices
pub struct BitboardIter(pub Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            None
        } else {
            Some(pop_lsb(&mut self.0))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitboardIter {}

/// ASCII diagram of a bitboard, rank 8 at the top. Meant for debugging output.
pub fn to_diagram(bb: Bitboard) -> String {
    const SEPARATOR: &str = "+---+---+---+---+---+---+---+---+\n";

    let mut s = String::from(SEPARATOR);
    for rank in (0..8u8).rev() {
        for file in 0..8u8 {
            s += if contains(bb, (rank << 3) | file) {
                "| X "
            } else {
                "|   "
            };
        }
        s += &format!("| {}\n", rank + 1);
        s += SEPARATOR;
    }
    s += "  a   b   c   d   e   f   g   h\n";
    s
}
