//! Perfect hash tables for rook and bishop attacks.
//!
//! Both sliders share one flat attack table. Each square owns a [`Magic`] that turns the
//! relevant part of an occupancy into a slot of that table. Two indexing strategies exist,
//! selected at compile time because they change the table layout:
//!
//! * default: fixed shift magic multiplication with overlapping per-square segments
//!   (constants in [`crate::magic_numbers`]),
//! * feature `pext`: parallel bit extraction of the masked occupancy into contiguous
//!   segments. Uses the BMI2 instruction when the target has it.
//!
//! See <https://www.chessprogramming.org/Magic_Bitboards>.

use std::time::Instant;

use itertools::iproduct;
use rayon::prelude::*;
use tracing::debug;

use crate::bitboard::{Bitboard, EMPTY};
use crate::error::MagicError;
use crate::sliding::{relevant_mask, sliding_attack, Slider, Subsets};
use crate::types::{Square, SQUARE_NB};

#[cfg(feature = "pext")]
use crate::bitboard::popcount;
#[cfg(not(feature = "pext"))]
use crate::magic_numbers::{
    BISHOP_MAGICS, BISHOP_SHIFT, MAGIC_TABLE_SIZE, ROOK_MAGICS, ROOK_SHIFT,
};

/// Rook segment length in the extract layout (sum of `2^bits` over all squares)
#[cfg(feature = "pext")]
pub const ROOK_TABLE_SIZE: usize = 0x19000;
#[cfg(feature = "pext")]
pub const BISHOP_TABLE_SIZE: usize = 0x1480;

/// Number of entries in the shared slider table
#[cfg(feature = "pext")]
pub const SLIDER_TABLE_SIZE: usize = ROOK_TABLE_SIZE + BISHOP_TABLE_SIZE;
#[cfg(not(feature = "pext"))]
pub const SLIDER_TABLE_SIZE: usize = MAGIC_TABLE_SIZE;

/// Gather the bits of `src` selected by `mask` into the low bits of the result.
#[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
#[inline(always)]
pub fn pext(src: u64, mask: u64) -> u64 {
    // SAFETY: only compiled when the target guarantees BMI2.
    unsafe { std::arch::x86_64::_pext_u64(src, mask) }
}

/// Gather the bits of `src` selected by `mask` into the low bits of the result.
#[cfg(not(all(target_arch = "x86_64", target_feature = "bmi2")))]
#[inline]
pub fn pext(src: u64, mask: u64) -> u64 {
    let mut result = 0;
    let mut bit = 1u64;
    let mut mask = mask;
    while mask != 0 {
        if src & mask & mask.wrapping_neg() != 0 {
            result |= bit;
        }
        mask &= mask - 1;
        bit <<= 1;
    }
    result
}

/// Everything needed to look up the attacks of one slider on one square
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Magic {
    /// Relevant occupancy: the squares that can block the slider
    pub mask: Bitboard,
    #[cfg(not(feature = "pext"))]
    pub magic: u64,
    #[cfg(not(feature = "pext"))]
    pub shift: u32,
    /// Start of this square's segment in the shared table
    pub offset: usize,
}

impl Magic {
    /// Slot of `occupied` relative to [`Magic::offset`]
    #[cfg(not(feature = "pext"))]
    #[inline(always)]
    pub fn index(&self, occupied: Bitboard) -> usize {
        ((occupied & self.mask).wrapping_mul(self.magic) >> self.shift) as usize
    }

    /// Slot of `occupied` relative to [`Magic::offset`]
    #[cfg(feature = "pext")]
    #[inline(always)]
    pub fn index(&self, occupied: Bitboard) -> usize {
        pext(occupied, self.mask) as usize
    }
}

/// Rook and bishop lookup tables. Built once, read-only afterwards.
pub struct SliderTables {
    rook: [Magic; SQUARE_NB],
    bishop: [Magic; SQUARE_NB],
    table: Box<[Bitboard]>,
    /// Slots written per slider (rook, bishop)
    used: [usize; 2],
}

impl SliderTables {
    /// Fill both sliders' tables, checking every stored entry against the ray caster.
    pub fn new() -> Result<Self, MagicError> {
        let start = Instant::now();
        let mut table = vec![EMPTY; SLIDER_TABLE_SIZE].into_boxed_slice();
        let mut rook = [Magic::default(); SQUARE_NB];
        let mut bishop = [Magic::default(); SQUARE_NB];

        let rook_used = init_magics(Slider::Rook, &mut rook, &mut table)?;
        let bishop_used = init_magics(Slider::Bishop, &mut bishop, &mut table)?;

        debug!(
            rook_used,
            bishop_used,
            table_size = SLIDER_TABLE_SIZE,
            kib = SLIDER_TABLE_SIZE * std::mem::size_of::<Bitboard>() / 1024,
            elapsed = ?start.elapsed(),
            "slider tables built"
        );

        Ok(SliderTables {
            rook,
            bishop,
            table,
            used: [rook_used, bishop_used],
        })
    }

    #[inline(always)]
    pub fn magics(&self, slider: Slider) -> &[Magic; SQUARE_NB] {
        match slider {
            Slider::Rook => &self.rook,
            Slider::Bishop => &self.bishop,
        }
    }

    #[inline(always)]
    pub fn attacks(&self, slider: Slider, sq: Square, occupied: Bitboard) -> Bitboard {
        let magic = &self.magics(slider)[sq as usize];
        self.table[magic.offset + magic.index(occupied)]
    }

    #[inline(always)]
    pub fn rook_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.attacks(Slider::Rook, sq, occupied)
    }

    #[inline(always)]
    pub fn bishop_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.attacks(Slider::Bishop, sq, occupied)
    }

    #[inline(always)]
    pub fn queen_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.rook_attacks(sq, occupied) | self.bishop_attacks(sq, occupied)
    }

    /// Total number of slots, used or not
    pub fn table_len(&self) -> usize {
        self.table.len()
    }

    /// Slots actually holding an attack set for `slider`
    pub fn used_entries(&self, slider: Slider) -> usize {
        match slider {
            Slider::Rook => self.used[0],
            Slider::Bishop => self.used[1],
        }
    }

    /// The raw shared table
    pub fn raw_table(&self) -> &[Bitboard] {
        &self.table
    }

    /// Compare every lookup against the ray caster, for every square and every subset of
    /// its relevant occupancy, with and without noise outside the mask.
    /// Returns the number of occupancies checked.
    pub fn verify(&self) -> Result<usize, MagicError> {
        let work: Vec<(Slider, Square)> = iproduct!(Slider::ALL, 0..SQUARE_NB as Square).collect();
        let counts = work
            .into_par_iter()
            .map(|(slider, sq)| self.verify_square(slider, sq))
            .collect::<Result<Vec<usize>, MagicError>>()?;
        Ok(counts.into_iter().sum())
    }

    fn verify_square(&self, slider: Slider, sq: Square) -> Result<usize, MagicError> {
        let mask = self.magics(slider)[sq as usize].mask;
        let mut checked = 0;
        for occupied in Subsets::new(mask) {
            let expected = sliding_attack(slider, sq, occupied);
            for probe in [occupied, occupied | !mask] {
                let found = self.attacks(slider, sq, probe);
                if found != expected {
                    return Err(MagicError::Mismatch {
                        slider,
                        square: sq,
                        occupied: probe,
                        found,
                        expected,
                    });
                }
            }
            checked += 1;
        }
        Ok(checked)
    }
}

/// Build the segments of one slider. Returns how many slots were newly written.
fn init_magics(
    slider: Slider,
    magics: &mut [Magic; SQUARE_NB],
    table: &mut [Bitboard],
) -> Result<usize, MagicError> {
    let mut used = 0;

    #[cfg(feature = "pext")]
    let mut next_offset = match slider {
        Slider::Rook => 0,
        Slider::Bishop => ROOK_TABLE_SIZE,
    };

    for sq in 0..SQUARE_NB as Square {
        let mask = relevant_mask(slider, sq);
        let magic = &mut magics[sq as usize];
        magic.mask = mask;

        #[cfg(not(feature = "pext"))]
        {
            let (constants, shift) = match slider {
                Slider::Rook => (&ROOK_MAGICS, ROOK_SHIFT),
                Slider::Bishop => (&BISHOP_MAGICS, BISHOP_SHIFT),
            };
            let (multiplier, offset) = constants[sq as usize];
            magic.magic = multiplier;
            magic.shift = shift;
            magic.offset = offset;
        }

        #[cfg(feature = "pext")]
        {
            magic.offset = next_offset;
            next_offset += 1 << popcount(mask);
        }

        used += fill_segment(slider, sq, magic, table)?;
    }

    debug!(%slider, used, "segments filled");
    Ok(used)
}

/// Store the attacks of every relevant occupancy of `sq` in its segment.
/// A slot may be shared only by occupancies with identical attacks.
fn fill_segment(
    slider: Slider,
    sq: Square,
    magic: &Magic,
    table: &mut [Bitboard],
) -> Result<usize, MagicError> {
    let table_size = table.len();
    let mut used = 0;

    for occupied in Subsets::new(magic.mask) {
        let reference = sliding_attack(slider, sq, occupied);
        let index = magic.offset + magic.index(occupied);
        let entry = table.get_mut(index).ok_or(MagicError::IndexOutOfRange {
            slider,
            square: sq,
            index,
            table_size,
        })?;

        // a slider always attacks at least one square, so an empty slot is unused
        if *entry == EMPTY {
            used += 1;
        } else if *entry != reference {
            return Err(MagicError::Collision {
                slider,
                square: sq,
                occupied,
                index,
                stored: *entry,
                expected: reference,
            });
        }
        *entry = reference;
    }
    Ok(used)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::square_bb;
    use crate::types::*;
    use itertools::iproduct;
    use once_cell::sync::Lazy;

    static SLIDERS: Lazy<SliderTables> =
        Lazy::new(|| SliderTables::new().expect("slider tables must build"));

    #[test]
    fn test_table_size() {
        assert_eq!(SLIDERS.table_len(), SLIDER_TABLE_SIZE);
        #[cfg(not(feature = "pext"))]
        assert_eq!(SLIDER_TABLE_SIZE, 88_772);
        #[cfg(feature = "pext")]
        assert_eq!(SLIDER_TABLE_SIZE, 107_648);
    }

    #[test]
    fn test_used_entries_fit_table() {
        let rook = SLIDERS.used_entries(Slider::Rook);
        let bishop = SLIDERS.used_entries(Slider::Bishop);
        assert!(rook > 0 && bishop > 0);
        assert!(rook + bishop <= SLIDERS.table_len());
        // every unused slot is still empty
        let filled = SLIDERS.raw_table().iter().filter(|&&bb| bb != EMPTY).count();
        assert_eq!(filled, rook + bishop);
    }

    #[test]
    fn test_masks_match_relevant_occupancy() {
        for slider in Slider::ALL {
            for sq in 0..SQUARE_NB as Square {
                assert_eq!(SLIDERS.magics(slider)[sq as usize].mask, relevant_mask(slider, sq));
            }
        }
    }

    #[test]
    fn test_magic_rook_attacks_with_blockers() {
        // Rook on e4, with pieces on e2 and g4
        let occupied = square_bb(E2) | square_bb(G4);
        let attacks = SLIDERS.rook_attacks(E4, occupied);
        assert!(attacks & square_bb(E2) != 0);
        assert!(attacks & square_bb(G4) != 0);
        assert!(attacks & square_bb(E1) == 0);
        assert!(attacks & square_bb(H4) == 0);
        assert_eq!(attacks, sliding_attack(Slider::Rook, E4, occupied));
    }

    #[test]
    fn test_magic_bishop_attacks_with_blockers() {
        let occupied = square_bb(C2) | square_bb(G6);
        let attacks = SLIDERS.bishop_attacks(E4, occupied);
        assert!(attacks & square_bb(C2) != 0);
        assert!(attacks & square_bb(G6) != 0);
        assert!(attacks & square_bb(B1) == 0);
        assert!(attacks & square_bb(H7) == 0);
    }

    #[test]
    fn test_magic_queen_attacks() {
        assert_eq!(SLIDERS.queen_attacks(E4, EMPTY).count_ones(), 27);
        assert_eq!(SLIDERS.queen_attacks(A1, EMPTY).count_ones(), 21);
    }

    #[test]
    fn test_verify_is_exhaustive() {
        // 102,400 rook and 5,248 bishop occupancies
        assert_eq!(SLIDERS.verify(), Ok(107_648));
    }

    #[test]
    fn test_software_pext() {
        assert_eq!(pext(0b1011_0110, 0b1111_0000), 0b1011);
        assert_eq!(pext(0b1011_0110, 0b0101_0101), 0b0110);
        assert_eq!(pext(!0, 0x8000_0000_0000_0001), 0b11);
        assert_eq!(pext(0x1234, 0), 0);
    }

    fn pext_bit_by_bit(src: u64, mask: u64) -> u64 {
        let mut result = 0;
        let mut out = 0;
        for bit in 0..64 {
            if mask >> bit & 1 == 1 {
                result |= (src >> bit & 1) << out;
                out += 1;
            }
        }
        result
    }

    #[test]
    fn test_pext_over_relevant_masks() {
        for (slider, sq) in iproduct!(Slider::ALL, 0..SQUARE_NB as Square) {
            let mask = relevant_mask(slider, sq);
            for occupied in Subsets::new(mask) {
                assert_eq!(pext(occupied, mask), pext_bit_by_bit(occupied, mask));
                // squares outside the mask never reach the index
                assert_eq!(pext(occupied | !mask, mask), pext_bit_by_bit(occupied, mask));
            }
        }
    }

    #[cfg(not(feature = "pext"))]
    #[test]
    fn test_bad_multiplier_is_a_collision() {
        // a zero multiplier sends every occupancy of a1 to the segment's first slot
        let mut magic = SLIDERS.magics(Slider::Rook)[A1 as usize];
        magic.magic = 0;
        let mut table = vec![EMPTY; SLIDER_TABLE_SIZE];
        match fill_segment(Slider::Rook, A1, &magic, &mut table) {
            Err(MagicError::Collision { square, index, .. }) => {
                assert_eq!(square, A1);
                assert_eq!(index, magic.offset);
            }
            other => panic!("expected a collision, got {other:?}"),
        }
    }

    #[test]
    fn test_segment_past_table_end() {
        let mut magic = SLIDERS.magics(Slider::Bishop)[D4 as usize];
        magic.offset = SLIDER_TABLE_SIZE;
        let mut table = vec![EMPTY; SLIDER_TABLE_SIZE];
        assert_eq!(
            fill_segment(Slider::Bishop, D4, &magic, &mut table),
            Err(MagicError::IndexOutOfRange {
                slider: Slider::Bishop,
                square: D4,
                index: SLIDER_TABLE_SIZE,
                table_size: SLIDER_TABLE_SIZE,
            })
        );
    }

    #[test]
    fn test_rebuild_is_identical() {
        let mut table = vec![EMPTY; SLIDER_TABLE_SIZE];
        let mut magics = [Magic::default(); SQUARE_NB];
        init_magics(Slider::Rook, &mut magics, &mut table).expect("rook segments");
        assert_eq!(&magics, SLIDERS.magics(Slider::Rook));
    }
}
