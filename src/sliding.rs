//! Reference ray casting for sliding pieces.
//!
//! Everything in here is slow on purpose: it walks the board one step at a time and is only
//! used to build the lookup tables and to check them afterwards. Nothing in this module
//! reads the lookup tables.

use std::fmt;

use crate::bitboard::{
    file_bb_of, rank_bb_of, square_bb, Bitboard, EMPTY, FILE_A_BB, FILE_H_BB, RANK_1_BB,
    RANK_8_BB,
};
use crate::types::{offset_square, Direction, PieceType, Square};

/// The two piece types that need occupancy dependent tables.
/// A queen is the union of both.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Slider {
    Rook,
    Bishop,
}

impl Slider {
    pub const ALL: [Slider; 2] = [Slider::Rook, Slider::Bishop];

    pub const fn directions(self) -> [Direction; 4] {
        match self {
            Slider::Rook => [
                Direction::North,
                Direction::South,
                Direction::East,
                Direction::West,
            ],
            Slider::Bishop => [
                Direction::NorthEast,
                Direction::SouthEast,
                Direction::SouthWest,
                Direction::NorthWest,
            ],
        }
    }

    pub fn from_piece(pt: PieceType) -> Option<Slider> {
        match pt {
            PieceType::Rook => Some(Slider::Rook),
            PieceType::Bishop => Some(Slider::Bishop),
            _ => None,
        }
    }

    pub const fn piece_type(self) -> PieceType {
        match self {
            Slider::Rook => PieceType::Rook,
            Slider::Bishop => PieceType::Bishop,
        }
    }
}

impl fmt::Display for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.piece_type().to_human())
    }
}

/// Compute the attacks of a slider on `sq` by walking each of its four rays until the
/// board edge or the first occupied square, which is included. Occupancy of `sq` itself
/// is ignored.
pub fn sliding_attack(slider: Slider, sq: Square, occupied: Bitboard) -> Bitboard {
    let mut attacks = EMPTY;

    for direction in slider.directions() {
        let (dr, df) = direction.delta();
        let mut from = sq;
        while let Some(to) = offset_square(from, dr, df) {
            let target = square_bb(to);
            attacks |= target;
            if occupied & target != 0 {
                break;
            }
            from = to;
        }
    }
    attacks
}

/// Edge squares that can never block a ray starting on `sq`: the outer ranks and files,
/// except the ones the square itself stands on.
pub fn edges(sq: Square) -> Bitboard {
    ((RANK_1_BB | RANK_8_BB) & !rank_bb_of(sq)) | ((FILE_A_BB | FILE_H_BB) & !file_bb_of(sq))
}

/// The squares whose occupancy can change a slider's attacks from `sq`
pub fn relevant_mask(slider: Slider, sq: Square) -> Bitboard {
    sliding_attack(slider, sq, EMPTY) & !edges(sq)
}

/// Every subset of a mask, enumerated with the carry-rippler trick.
/// Starts with the empty set and yields exactly `2^popcount(mask)` values.
#[derive(Debug, Clone)]
pub struct Subsets {
    mask: Bitboard,
    next: Bitboard,
    done: bool,
}

impl Subsets {
    pub fn new(mask: Bitboard) -> Self {
        Subsets {
            mask,
            next: EMPTY,
            done: false,
        }
    }
}

impl Iterator for Subsets {
    type Item = Bitboard;

    #[inline]
    fn next(&mut self) -> Option<Bitboard> {
        if self.done {
            return None;
        }
        let current = self.next;
        self.next = self.next.wrapping_sub(self.mask) & self.mask;
        if self.next == EMPTY {
            self.done = true;
        }
        Some(current)
    }
}
