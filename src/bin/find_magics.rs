//! Magic Number Search - Regenerate slider magics and print them as Rust constants
//!
//! Usage: cargo run --release --bin find_magics -- --piece both --seed 0x5eed
//!
//! Progress is logged to stderr, set RUST_LOG=debug to see every square.

use std::time::Instant;

use clap::{Parser, ValueEnum};
use color_eyre::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rust_bitboards::magic_search::{find_magics, table_size, FoundMagic};
use rust_bitboards::sliding::Slider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PieceArg {
    Rook,
    Bishop,
    Both,
}

#[derive(Parser, Debug)]
#[command(name = "find_magics")]
#[command(about = "Search plain magic multipliers for rook and bishop attack tables")]
struct Args {
    /// Which slider to search magics for
    #[arg(short, long, value_enum, default_value_t = PieceArg::Both)]
    piece: PieceArg,

    /// Seed for the random candidates, decimal or 0x-prefixed hex
    #[arg(short, long, default_value = "0x5eed", value_parser = parse_seed)]
    seed: u64,

    /// Give up on a square after this many candidates
    #[arg(short, long, default_value_t = 100_000_000)]
    attempts: u64,
}

fn parse_seed(s: &str) -> Result<u64, std::num::ParseIntError> {
    match s.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let sliders: &[Slider] = match args.piece {
        PieceArg::Rook => &[Slider::Rook],
        PieceArg::Bishop => &[Slider::Bishop],
        PieceArg::Both => &Slider::ALL,
    };

    println!(
        "// Generated by find_magics at {} (seed {:#x})",
        chrono::Utc::now().to_rfc3339(),
        args.seed
    );

    for &slider in sliders {
        let start = Instant::now();
        let found = find_magics(slider, args.seed, args.attempts)?;
        info!(%slider, elapsed = ?start.elapsed(), "search done");
        println!();
        print!("{}", render_constants(slider, &found));
    }
    Ok(())
}

/// `(magic, bits)` pairs indexed by square
fn render_constants(slider: Slider, found: &[FoundMagic]) -> String {
    let name = match slider {
        Slider::Rook => "ROOK",
        Slider::Bishop => "BISHOP",
    };
    let mut out = format!(
        "// {} entries\n#[rustfmt::skip]\npub const {}_PLAIN_MAGICS: [(u64, u32); 64] = [\n",
        table_size(found),
        name
    );
    for pair in found.chunks(2) {
        out += "   ";
        for m in pair {
            out += &format!(" ({:#018x}, {:>2}),", m.magic, m.bits);
        }
        out += "\n";
    }
    out += "];\n";
    out
}
