//! Failures while building, checking or searching slider tables.
//!
//! None of these can happen with correct embedded constants; they exist so that a bad
//! constant is reported with enough detail to find it instead of serving wrong attacks.

use thiserror::Error;

use crate::bitboard::Bitboard;
use crate::sliding::Slider;
use crate::types::{square_name, Square};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MagicError {
    /// Two occupancies with different attack sets hashed to the same table slot
    #[error(
        "{slider} table collision on {}: occupancy {occupied:#018x} maps to slot {index} \
         holding {stored:#018x}, expected {expected:#018x}",
        square_name(*square)
    )]
    Collision {
        slider: Slider,
        square: Square,
        occupied: Bitboard,
        index: usize,
        stored: Bitboard,
        expected: Bitboard,
    },

    /// A computed slot lies past the end of the shared table
    #[error(
        "{slider} index {index} on {} is outside the table of {table_size} entries",
        square_name(*square)
    )]
    IndexOutOfRange {
        slider: Slider,
        square: Square,
        index: usize,
        table_size: usize,
    },

    /// A built table disagrees with the ray caster
    #[error(
        "{slider} lookup on {} with occupancy {occupied:#018x} returned {found:#018x}, \
         expected {expected:#018x}",
        square_name(*square)
    )]
    Mismatch {
        slider: Slider,
        square: Square,
        occupied: Bitboard,
        found: Bitboard,
        expected: Bitboard,
    },

    /// The random search gave up on a square
    #[error("no {slider} magic found for {} after {attempts} attempts", square_name(*square))]
    SearchFailed {
        slider: Slider,
        square: Square,
        attempts: u64,
    },
}
