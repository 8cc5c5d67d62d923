//! Attack Viewer - Print the attack set of a piece as a board diagram
//!
//! Usage: cargo run --bin show_attacks -- --piece rook --square d4 --occupied d6,b4
//!        cargo run --release --bin show_attacks -- --verify

use std::time::Instant;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rust_bitboards::bitboard::{square_bb, to_diagram, Bitboard, EMPTY};
use rust_bitboards::sliding::Slider;
use rust_bitboards::types::{parse_square, square_name, Color, PieceType, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PieceArg {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl From<PieceArg> for PieceType {
    fn from(piece: PieceArg) -> Self {
        match piece {
            PieceArg::Pawn => PieceType::Pawn,
            PieceArg::Knight => PieceType::Knight,
            PieceArg::Bishop => PieceType::Bishop,
            PieceArg::Rook => PieceType::Rook,
            PieceArg::Queen => PieceType::Queen,
            PieceArg::King => PieceType::King,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorArg {
    White,
    Black,
}

#[derive(Parser, Debug)]
#[command(name = "show_attacks")]
#[command(about = "Show attack, line and between sets from the precomputed tables")]
struct Args {
    #[arg(short, long, value_enum, default_value_t = PieceArg::Queen)]
    piece: PieceArg,

    /// Square the piece stands on
    #[arg(short, long, default_value = "d4")]
    square: String,

    /// Occupied squares, comma separated (e.g. d6,b4)
    #[arg(short, long, value_delimiter = ',')]
    occupied: Vec<String>,

    /// Side of the pawn, ignored for other pieces
    #[arg(short, long, value_enum, default_value_t = ColorArg::White)]
    color: ColorArg,

    /// Also show distance, line and between towards this square
    #[arg(short, long)]
    to: Option<String>,

    /// Check every table entry against the ray caster and exit
    #[arg(long)]
    verify: bool,
}

fn square_arg(s: &str) -> Result<Square> {
    parse_square(s.trim()).ok_or_else(|| eyre!("invalid square `{}`", s))
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let start = Instant::now();
    let tables = rust_bitboards::init();
    info!(elapsed = ?start.elapsed(), "tables ready");

    if args.verify {
        let sliders = tables.sliders();
        let start = Instant::now();
        let checked = sliders.verify()?;
        println!("Verified {} occupancies in {:?}", checked, start.elapsed());
        println!(
            "Table: {} entries ({} KiB), rook uses {}, bishop uses {}",
            sliders.table_len(),
            sliders.table_len() * std::mem::size_of::<Bitboard>() / 1024,
            sliders.used_entries(Slider::Rook),
            sliders.used_entries(Slider::Bishop),
        );
        return Ok(());
    }

    let piece = PieceType::from(args.piece);
    let color = match args.color {
        ColorArg::White => Color::White,
        ColorArg::Black => Color::Black,
    };
    let sq = square_arg(&args.square)?;
    let occupied = args
        .occupied
        .iter()
        .map(|s| square_arg(s).map(square_bb))
        .try_fold(EMPTY, |acc, bb| bb.map(|bb| acc | bb))?;

    let attacks = tables.piece_attacks(color, piece, sq, occupied);
    println!("Occupied:\n{}", to_diagram(occupied));
    println!(
        "{} {} on {} attacks {} squares:\n{}",
        color.to_human(),
        piece.to_human(),
        square_name(sq),
        attacks.count_ones(),
        to_diagram(attacks)
    );

    if let Some(to) = &args.to {
        let to = square_arg(to)?;
        println!(
            "Distance {} -> {}: {}",
            square_name(sq),
            square_name(to),
            tables.distance(sq, to)
        );
        println!("Line:\n{}", to_diagram(tables.line(sq, to)));
        println!("Between:\n{}", to_diagram(tables.between(sq, to)));
    }
    Ok(())
}
