//! Properties of the global tables as seen by the rest of the engine
//!
//! Run with: cargo test --test attack_tables

use std::thread;

use pretty_assertions::assert_eq;
use rust_bitboards::bitboard::{
    square_bb, Bitboard, BitboardIter, EMPTY, FILE_D_BB, RANK_4_BB,
};
use rust_bitboards::sliding::{relevant_mask, sliding_attack, Slider, Subsets};
use rust_bitboards::types::*;
use rust_bitboards::{attacks, between, distance, init, line, tables};

fn squares(list: &[Square]) -> Bitboard {
    list.iter().fold(EMPTY, |bb, &sq| bb | square_bb(sq))
}

#[test]
fn lookup_matches_ray_caster_for_every_subset() {
    init();
    for (slider, pt) in [(Slider::Rook, PieceType::Rook), (Slider::Bishop, PieceType::Bishop)] {
        for sq in 0..SQUARE_NB as Square {
            let mut count = 0usize;
            for occupied in Subsets::new(relevant_mask(slider, sq)) {
                assert_eq!(
                    attacks(pt, sq, occupied),
                    sliding_attack(slider, sq, occupied),
                    "{} on {} with {:#x}",
                    slider,
                    square_name(sq),
                    occupied
                );
                count += 1;
            }
            assert_eq!(count, 1 << relevant_mask(slider, sq).count_ones());
        }
    }
}

#[test]
fn occupancy_outside_the_mask_is_ignored() {
    // deterministic scatter of noise patterns
    let mut noise = 0x9E37_79B9_7F4A_7C15u64;
    for slider in Slider::ALL {
        let pt = slider.piece_type();
        for sq in 0..SQUARE_NB as Square {
            let mask = relevant_mask(slider, sq);
            for occupied in Subsets::new(mask).step_by(7) {
                noise = noise.rotate_left(13).wrapping_mul(0xBF58_476D_1CE4_E5B9);
                let outside = noise & !mask;
                assert_eq!(attacks(pt, sq, occupied), attacks(pt, sq, occupied | outside));
            }
        }
    }
}

#[test]
fn queen_is_rook_plus_bishop() {
    let occupied = squares(&[B2, D6, F4, G7, C3, E1]);
    for sq in 0..SQUARE_NB as Square {
        assert_eq!(
            attacks(PieceType::Queen, sq, occupied),
            attacks(PieceType::Rook, sq, occupied) | attacks(PieceType::Bishop, sq, occupied)
        );
    }
}

#[test]
fn attack_sets_stay_within_geometric_reach() {
    let occupied = squares(&[D5, E4]);
    for sq in 0..SQUARE_NB as Square {
        assert!(attacks(PieceType::Rook, sq, occupied).count_ones() <= 14);
        assert!(attacks(PieceType::Bishop, sq, occupied).count_ones() <= 13);
        assert!(attacks(PieceType::Queen, sq, occupied).count_ones() <= 27);
        assert!(attacks(PieceType::Knight, sq, occupied).count_ones() <= 8);
        assert!(attacks(PieceType::King, sq, occupied).count_ones() <= 8);
    }
}

#[test]
fn rook_on_d4_scenario() {
    let empty = attacks(PieceType::Rook, D4, EMPTY);
    assert_eq!(empty, (FILE_D_BB | RANK_4_BB) & !square_bb(D4));
    assert_eq!(empty.count_ones(), 14);

    let blocked = attacks(PieceType::Rook, D4, square_bb(D6));
    assert_eq!(blocked & squares(&[D5, D6, D7, D8]), squares(&[D5, D6]));
}

#[test]
fn bishop_on_d4_scenario() {
    assert_eq!(
        attacks(PieceType::Bishop, D4, EMPTY),
        squares(&[A1, B2, C3, E5, F6, G7, H8, A7, B6, C5, E3, F2, G1])
    );
}

#[test]
fn between_scenarios() {
    assert_eq!(between(A1, A8), squares(&[A2, A3, A4, A5, A6, A7, A8]));
    assert_eq!(between(A1, H8), squares(&[B2, C3, D4, E5, F6, G7, H8]));
    assert_eq!(between(H1, A8), squares(&[G2, F3, E4, D5, C6, B7, A8]));
}

#[test]
fn non_aligned_pairs() {
    for (s1, s2) in [(A1, B3), (D4, E6), (H8, A2), (C1, D8)] {
        assert_eq!(line(s1, s2), EMPTY);
        assert_eq!(between(s1, s2), square_bb(s2));
    }
}

#[test]
fn degenerate_pairs() {
    for sq in 0..SQUARE_NB as Square {
        assert_eq!(distance(sq, sq), 0);
        assert_eq!(line(sq, sq), square_bb(sq));
        assert_eq!(between(sq, sq), square_bb(sq));
    }
}

#[test]
fn line_contains_between() {
    for s1 in 0..SQUARE_NB as Square {
        for s2 in BitboardIter(tables().pseudo_attacks(PieceType::Queen, s1)) {
            assert_eq!(between(s1, s2) & !line(s1, s2), EMPTY);
            assert!(line(s1, s2).count_ones() >= 2);
        }
    }
}

#[test]
fn tables_are_not_written_after_init() {
    let before = init().checksum();

    thread::scope(|scope| {
        for worker in 0..4u8 {
            scope.spawn(move || {
                let mut acc = 0u64;
                for sq in 0..SQUARE_NB as Square {
                    let occupied = square_bb((sq + worker * 11) % 64) | square_bb(worker);
                    for pt in PieceType::ALL {
                        if pt != PieceType::Pawn {
                            acc ^= attacks(pt, sq, occupied);
                        }
                    }
                    acc ^= line(sq, 63 - sq) ^ between(sq, worker);
                }
                acc
            });
        }
    });

    assert_eq!(tables().checksum(), before);
    assert!(std::ptr::eq(init(), tables()));
}
