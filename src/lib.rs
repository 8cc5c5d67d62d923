pub mod types;
pub mod bitboard;
pub mod sliding;
pub mod error;
pub mod magic_numbers;
pub mod magic;
pub mod magic_search;
pub mod tables;

pub use bitboard::{to_diagram, Bitboard};
pub use error::MagicError;
pub use tables::{
    aligned, attacks, between, distance, init, line, pawn_attacks, piece_attacks,
    pseudo_attacks, tables, Tables,
};
pub use types::{Color, PieceType, Square};
