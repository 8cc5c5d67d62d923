use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_bitboards::bitboard::Bitboard;
use rust_bitboards::sliding::{sliding_attack, Slider};
use rust_bitboards::tables::{self, Tables};
use rust_bitboards::types::*;

// Occupancy of the "kiwipete" position: r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R
const KIWIPETE_OCCUPIED: Bitboard = 0x917d_7318_12a4_ff91;

pub fn bench_rook_lookup(c: &mut Criterion) {
    tables::init();
    c.bench_function("rook attacks lookup, all squares", |b| {
        b.iter(|| {
            let mut acc = 0u64;
            for sq in 0..SQUARE_NB as Square {
                acc ^= tables::attacks(PieceType::Rook, sq, black_box(KIWIPETE_OCCUPIED));
            }
            acc
        })
    });
}

pub fn bench_rook_ray_cast(c: &mut Criterion) {
    c.bench_function("rook attacks ray cast, all squares", |b| {
        b.iter(|| {
            let mut acc = 0u64;
            for sq in 0..SQUARE_NB as Square {
                acc ^= sliding_attack(Slider::Rook, sq, black_box(KIWIPETE_OCCUPIED));
            }
            acc
        })
    });
}

pub fn bench_queen_lookup(c: &mut Criterion) {
    tables::init();
    c.bench_function("queen attacks lookup, all squares", |b| {
        b.iter(|| {
            let mut acc = 0u64;
            for sq in 0..SQUARE_NB as Square {
                acc ^= tables::attacks(PieceType::Queen, sq, black_box(KIWIPETE_OCCUPIED));
            }
            acc
        })
    });
}

pub fn bench_between_lookup(c: &mut Criterion) {
    tables::init();
    c.bench_function("between lookup, king to all squares", |b| {
        b.iter(|| {
            let mut acc = 0u64;
            for sq in 0..SQUARE_NB as Square {
                acc |= tables::between(black_box(E1), sq);
            }
            acc
        })
    });
}

pub fn bench_table_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat-sampling");
    group.sample_size(10);
    group.bench_function("build all tables", |b| {
        b.iter(|| Tables::new().map(|t| t.checksum()))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_rook_lookup,
    bench_rook_ray_cast,
    bench_queen_lookup,
    bench_between_lookup,
    bench_table_build,
);
criterion_main!(benches);
