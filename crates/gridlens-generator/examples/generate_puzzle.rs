//! Example demonstrating Sudoku puzzle generation.
//!
//! Generates one puzzle and prints its problem grid, solution grid, and
//! seed. Passing the printed seed back reproduces the same puzzle.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_puzzle -- --difficulty hard
//! cargo run --example generate_puzzle -- --seed <64-hex-chars>
//! cargo run --example generate_puzzle -- --phrase "daily 2026-08-30"
//! ```

use clap::Parser;
use gridlens_generator::{Difficulty, PuzzleGenerator, PuzzleSeed};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Difficulty level: easy, medium, or hard.
    #[arg(long, default_value = "easy")]
    difficulty: Difficulty,

    /// Reproduce a puzzle from a 64-character hexadecimal seed.
    #[arg(long, value_name = "HEX", conflicts_with = "phrase")]
    seed: Option<PuzzleSeed>,

    /// Derive the seed from a human-readable phrase.
    #[arg(long, value_name = "PHRASE")]
    phrase: Option<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let seed = match (&args.seed, &args.phrase) {
        (Some(seed), _) => *seed,
        (None, Some(phrase)) => PuzzleSeed::from_phrase(phrase),
        (None, None) => PuzzleSeed::random(),
    };

    let puzzle = PuzzleGenerator::new().generate_with_seed(args.difficulty, seed);

    println!("Difficulty:");
    println!("  {}", puzzle.difficulty);
    println!();
    println!("Seed:");
    println!("  {}", puzzle.seed);
    println!();
    println!("Problem ({} givens):", puzzle.given_cells.len());
    println!("  {}", puzzle.problem);
    println!();
    println!("Solution:");
    println!("  {}", puzzle.solution);
}
