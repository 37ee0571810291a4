//! Sudoku puzzle generation for Gridlens.
//!
//! A puzzle is produced by completing an empty board with the randomized
//! backtracking filler, keeping that completion as the solution, and then
//! hiding a difficulty-dependent number of cells chosen uniformly without
//! replacement. The cells still visible are the puzzle's givens.
//!
//! Generation is reproducible: every puzzle carries the 32-byte
//! [`PuzzleSeed`] it was built from, and [`PuzzleGenerator::generate_with_seed`]
//! rebuilds it exactly.
//!
//! # Examples
//!
//! ```
//! use gridlens_generator::{Difficulty, PuzzleGenerator};
//!
//! let generator = PuzzleGenerator::new();
//! let puzzle = generator.generate(Difficulty::Easy);
//!
//! assert_eq!(puzzle.problem.filled_count(), 81 - 30);
//! assert!(puzzle.solution.is_complete());
//! ```

pub mod difficulty;
pub mod generator;
pub mod seed;

pub use self::{
    difficulty::{Difficulty, ParseDifficultyError},
    generator::{GeneratedPuzzle, PuzzleGenerator},
    seed::{ParseSeedError, PuzzleSeed},
};
