//! Process-wide attack and geometry tables.
//!
//! Call [`init`] once at startup, before any search thread is spawned. After that every
//! table is read-only and the query functions below are plain lookups that can be used
//! from any number of threads without synchronisation.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Instant;

use itertools::iproduct;
use once_cell::sync::OnceCell;
use tracing::debug;

use crate::bitboard::{pawn_attacks_bb, safe_destination, square_bb, Bitboard, EMPTY};
use crate::error::MagicError;
use crate::magic::SliderTables;
use crate::sliding::Slider;
use crate::types::{chebyshev_distance, Color, PieceType, Square, SQUARE_NB};

const KING_STEPS: [i8; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];
const KNIGHT_STEPS: [i8; 8] = [-17, -15, -10, -6, 6, 10, 15, 17];

type SquarePairs<T> = [[T; SQUARE_NB]; SQUARE_NB];

/// All precomputed tables
pub struct Tables {
    sliders: SliderTables,
    square_distance: SquarePairs<u8>,
    line: Box<SquarePairs<Bitboard>>,
    between: Box<SquarePairs<Bitboard>>,
    /// Attacks on an empty board, indexed by `PieceType::index()`
    pseudo: [[Bitboard; SQUARE_NB]; 6],
    pawn: [[Bitboard; SQUARE_NB]; 2],
}

impl Tables {
    /// Build the slider tables, then everything derived from them.
    pub fn new() -> Result<Self, MagicError> {
        let start = Instant::now();
        let sliders = SliderTables::new()?;

        let mut square_distance = [[0u8; SQUARE_NB]; SQUARE_NB];
        for (s1, s2) in iproduct!(0..SQUARE_NB as Square, 0..SQUARE_NB as Square) {
            square_distance[s1 as usize][s2 as usize] = chebyshev_distance(s1, s2);
        }

        let mut pseudo = [[EMPTY; SQUARE_NB]; 6];
        let mut pawn = [[EMPTY; SQUARE_NB]; 2];
        let mut line = Box::new([[EMPTY; SQUARE_NB]; SQUARE_NB]);
        let mut between = Box::new([[EMPTY; SQUARE_NB]; SQUARE_NB]);

        for s1 in 0..SQUARE_NB as Square {
            let s = s1 as usize;
            for color in Color::ALL {
                pawn[color.index()][s] = pawn_attacks_bb(color, square_bb(s1));
            }

            for step in KING_STEPS {
                pseudo[PieceType::King.index()][s] |= safe_destination(s1, step);
            }
            for step in KNIGHT_STEPS {
                pseudo[PieceType::Knight.index()][s] |= safe_destination(s1, step);
            }

            let bishop = sliders.bishop_attacks(s1, EMPTY);
            let rook = sliders.rook_attacks(s1, EMPTY);
            pseudo[PieceType::Bishop.index()][s] = bishop;
            pseudo[PieceType::Rook.index()][s] = rook;
            pseudo[PieceType::Queen.index()][s] = bishop | rook;

            for slider in Slider::ALL {
                let reach = pseudo[slider.piece_type().index()][s];
                for s2 in 0..SQUARE_NB as Square {
                    if reach & square_bb(s2) == 0 {
                        continue;
                    }
                    line[s][s2 as usize] = (sliders.attacks(slider, s1, EMPTY)
                        & sliders.attacks(slider, s2, EMPTY))
                        | square_bb(s1)
                        | square_bb(s2);
                    between[s][s2 as usize] = sliders.attacks(slider, s1, square_bb(s2))
                        & sliders.attacks(slider, s2, square_bb(s1));
                }
            }

            line[s][s] = square_bb(s1);
            for s2 in 0..SQUARE_NB as Square {
                between[s][s2 as usize] |= square_bb(s2);
            }
        }

        debug!(elapsed = ?start.elapsed(), "attack tables initialised");

        Ok(Tables {
            sliders,
            square_distance,
            line,
            between,
            pseudo,
            pawn,
        })
    }

    pub fn sliders(&self) -> &SliderTables {
        &self.sliders
    }

    /// Attacks of a piece on `sq` given the board occupancy. Pawns need a colour,
    /// use [`Tables::piece_attacks`] for them: a colourless pawn attacks nothing here
    /// and trips a debug assertion.
    #[inline(always)]
    pub fn attacks(&self, pt: PieceType, sq: Square, occupied: Bitboard) -> Bitboard {
        match pt {
            PieceType::Bishop => self.sliders.bishop_attacks(sq, occupied),
            PieceType::Rook => self.sliders.rook_attacks(sq, occupied),
            PieceType::Queen => self.sliders.queen_attacks(sq, occupied),
            PieceType::Knight | PieceType::King => self.pseudo[pt.index()][sq as usize],
            PieceType::Pawn => {
                debug_assert!(false, "pawn attacks depend on colour, use piece_attacks");
                EMPTY
            }
        }
    }

    #[inline(always)]
    pub fn piece_attacks(
        &self,
        color: Color,
        pt: PieceType,
        sq: Square,
        occupied: Bitboard,
    ) -> Bitboard {
        match pt {
            PieceType::Pawn => self.pawn_attacks(color, sq),
            _ => self.attacks(pt, sq, occupied),
        }
    }

    /// Attacks on an empty board. Pawns have none (their captures depend on colour).
    #[inline(always)]
    pub fn pseudo_attacks(&self, pt: PieceType, sq: Square) -> Bitboard {
        self.pseudo[pt.index()][sq as usize]
    }

    #[inline(always)]
    pub fn pawn_attacks(&self, color: Color, sq: Square) -> Bitboard {
        self.pawn[color.index()][sq as usize]
    }

    /// The full rank, file or diagonal through both squares, or empty if they share none
    #[inline(always)]
    pub fn line(&self, s1: Square, s2: Square) -> Bitboard {
        self.line[s1 as usize][s2 as usize]
    }

    /// Squares strictly between two aligned squares, plus `s2`. Just `s2` otherwise.
    #[inline(always)]
    pub fn between(&self, s1: Square, s2: Square) -> Bitboard {
        self.between[s1 as usize][s2 as usize]
    }

    #[inline(always)]
    pub fn distance(&self, s1: Square, s2: Square) -> u8 {
        self.square_distance[s1 as usize][s2 as usize]
    }

    /// Do the three squares lie on one rank, file or diagonal?
    #[inline(always)]
    pub fn aligned(&self, s1: Square, s2: Square, s3: Square) -> bool {
        self.line(s1, s2) & square_bb(s3) != 0
    }

    /// Digest of every table. Equal digests before and after a workload mean the workload
    /// did not write to the tables.
    pub fn checksum(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.sliders.raw_table().hash(&mut hasher);
        for slider in Slider::ALL {
            self.sliders.magics(slider).hash(&mut hasher);
        }
        self.square_distance.hash(&mut hasher);
        self.line.hash(&mut hasher);
        self.between.hash(&mut hasher);
        self.pseudo.hash(&mut hasher);
        self.pawn.hash(&mut hasher);
        hasher.finish()
    }
}

static TABLES: OnceCell<Tables> = OnceCell::new();

/// Build every table. Call once before spawning threads that query them.
///
/// The free query functions below go through [`tables`], which pays an acquire load on
/// every call. Hot loops should keep the returned reference and query it directly:
/// methods on `&'static Tables` touch nothing but the tables.
///
/// # Panics
///
/// If an embedded magic constant is wrong: two occupancies with different attacks would
/// share a slot.
pub fn init() -> &'static Tables {
    tables()
}

/// The global tables, built on first use if [`init`] has not run yet
#[inline(always)]
pub fn tables() -> &'static Tables {
    TABLES.get_or_init(|| {
        Tables::new().unwrap_or_else(|err| panic!("cannot build attack tables: {err}"))
    })
}

/// Attacks of a non-pawn piece on `sq` given the board occupancy
#[inline(always)]
pub fn attacks(pt: PieceType, sq: Square, occupied: Bitboard) -> Bitboard {
    tables().attacks(pt, sq, occupied)
}

#[inline(always)]
pub fn piece_attacks(color: Color, pt: PieceType, sq: Square, occupied: Bitboard) -> Bitboard {
    tables().piece_attacks(color, pt, sq, occupied)
}

#[inline(always)]
pub fn pseudo_attacks(pt: PieceType, sq: Square) -> Bitboard {
    tables().pseudo_attacks(pt, sq)
}

#[inline(always)]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    tables().pawn_attacks(color, sq)
}

#[inline(always)]
pub fn line(s1: Square, s2: Square) -> Bitboard {
    tables().line(s1, s2)
}

#[inline(always)]
pub fn between(s1: Square, s2: Square) -> Bitboard {
    tables().between(s1, s2)
}

#[inline(always)]
pub fn distance(s1: Square, s2: Square) -> u8 {
    tables().distance(s1, s2)
}

#[inline(always)]
pub fn aligned(s1: Square, s2: Square, s3: Square) -> bool {
    tables().aligned(s1, s2, s3)
}
