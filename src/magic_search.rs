//! Offline search for magic multipliers.
//!
//! The embedded constants in [`crate::magic_numbers`] were tuned by hand for overlap. This
//! module regenerates plain magics from scratch: one `2^bits` segment per square, where
//! `bits` is the size of the relevant mask.

use rand::prelude::*;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::bitboard::{popcount, Bitboard, EMPTY};
use crate::error::MagicError;
use crate::sliding::{relevant_mask, sliding_attack, Slider, Subsets};
use crate::types::{Square, SQUARE_NB};

/// A multiplier that hashes every relevant occupancy of `square` into `2^bits` slots
/// without a harmful collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoundMagic {
    pub square: Square,
    pub magic: u64,
    pub bits: u32,
    /// Attempts it took to find
    pub attempts: u64,
}

/// Occupancies of one square with their reference attacks, plus scratch space for testing
/// candidates.
struct Candidates {
    occupancies: Vec<Bitboard>,
    references: Vec<Bitboard>,
    slots: Vec<Bitboard>,
    /// Attempt that last wrote each slot; older stamps count as empty
    epoch: Vec<u64>,
    mask: Bitboard,
    bits: u32,
}

impl Candidates {
    fn new(slider: Slider, sq: Square, bits: u32) -> Self {
        let mask = relevant_mask(slider, sq);
        let occupancies: Vec<Bitboard> = Subsets::new(mask).collect();
        let references = occupancies
            .iter()
            .map(|&occupied| sliding_attack(slider, sq, occupied))
            .collect();
        Candidates {
            occupancies,
            references,
            slots: vec![EMPTY; 1 << bits],
            epoch: vec![0; 1 << bits],
            mask,
            bits,
        }
    }

    fn fits(&mut self, magic: u64, attempt: u64) -> bool {
        let shift = 64 - self.bits;
        for (&occupied, &reference) in self.occupancies.iter().zip(&self.references) {
            let index = (occupied.wrapping_mul(magic) >> shift) as usize;
            if self.epoch[index] != attempt {
                self.epoch[index] = attempt;
                self.slots[index] = reference;
            } else if self.slots[index] != reference {
                return false;
            }
        }
        true
    }
}

/// Does `magic` hash every relevant occupancy of `sq` into `2^bits` slots, sharing slots
/// only between occupancies with the same attacks?
pub fn check_magic(slider: Slider, sq: Square, magic: u64, bits: u32) -> bool {
    Candidates::new(slider, sq, bits).fits(magic, 1)
}

/// Random search for a magic using as many index bits as the relevant mask has squares.
pub fn find_magic<R: Rng>(
    slider: Slider,
    sq: Square,
    rng: &mut R,
    max_attempts: u64,
) -> Option<FoundMagic> {
    let bits = popcount(relevant_mask(slider, sq));
    let mut candidates = Candidates::new(slider, sq, bits);

    for attempt in 1..=max_attempts {
        // sparse candidate, and the top byte of mask * magic must be well populated
        let magic = rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>();
        if popcount(candidates.mask.wrapping_mul(magic) >> 56) < 6 {
            continue;
        }
        if candidates.fits(magic, attempt) {
            return Some(FoundMagic {
                square: sq,
                magic,
                bits,
                attempts: attempt,
            });
        }
    }
    None
}

/// Magics for all 64 squares, searched in parallel. The same seed always yields the same
/// multipliers because every square draws from its own generator.
pub fn find_magics(
    slider: Slider,
    seed: u64,
    max_attempts: u64,
) -> Result<Vec<FoundMagic>, MagicError> {
    let found = (0..SQUARE_NB as Square)
        .into_par_iter()
        .map(|sq| -> Result<FoundMagic, MagicError> {
            let mut rng = StdRng::seed_from_u64(square_seed(seed, sq));
            let found = find_magic(slider, sq, &mut rng, max_attempts).ok_or(
                MagicError::SearchFailed {
                    slider,
                    square: sq,
                    attempts: max_attempts,
                },
            )?;
            debug!(%slider, square = sq, attempts = found.attempts, "magic found");
            Ok(found)
        })
        .collect::<Result<Vec<FoundMagic>, MagicError>>()?;

    info!(
        %slider,
        entries = table_size(&found),
        attempts = found.iter().map(|m| m.attempts).sum::<u64>(),
        "magic search finished"
    );
    Ok(found)
}

/// Slots needed to store the found magics back to back
pub fn table_size(found: &[FoundMagic]) -> usize {
    found.iter().map(|m| 1usize << m.bits).sum()
}

fn square_seed(seed: u64, sq: Square) -> u64 {
    seed ^ (sq as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magic_numbers::{BISHOP_MAGICS, ROOK_MAGICS};
    use crate::types::*;

    #[test]
    fn test_embedded_magics_are_valid_per_square() {
        for sq in 0..SQUARE_NB as Square {
            assert!(check_magic(Slider::Rook, sq, ROOK_MAGICS[sq as usize].0, 12));
            assert!(check_magic(Slider::Bishop, sq, BISHOP_MAGICS[sq as usize].0, 9));
        }
    }

    #[test]
    fn test_zero_magic_is_rejected() {
        assert!(!check_magic(Slider::Rook, A1, 0, 12));
        assert!(!check_magic(Slider::Bishop, D4, 0, 9));
    }

    #[test]
    fn test_find_single_magics() {
        let mut rng = StdRng::seed_from_u64(7);
        for (slider, sq) in [(Slider::Rook, D4), (Slider::Bishop, A1), (Slider::Bishop, E5)] {
            let found = find_magic(slider, sq, &mut rng, 10_000_000).expect("magic exists");
            assert_eq!(found.square, sq);
            assert_eq!(found.bits, popcount(relevant_mask(slider, sq)));
            assert!(check_magic(slider, sq, found.magic, found.bits));
        }
    }

    #[test]
    fn test_bishop_search_is_deterministic() {
        let first = find_magics(Slider::Bishop, 42, 10_000_000).expect("bishop magics");
        let second = find_magics(Slider::Bishop, 42, 10_000_000).expect("bishop magics");
        assert_eq!(first, second);
        assert_eq!(table_size(&first), 5248);
        for found in &first {
            assert!(check_magic(Slider::Bishop, found.square, found.magic, found.bits));
        }
    }

    #[test]
    fn test_search_gives_up() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(find_magic(Slider::Rook, A1, &mut rng, 0), None);
        assert!(matches!(
            find_magics(Slider::Rook, 1, 0),
            Err(MagicError::SearchFailed {
                slider: Slider::Rook,
                attempts: 0,
                ..
            })
        ));
    }
}
