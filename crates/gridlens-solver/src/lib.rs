//! Randomized backtracking board completion for Gridlens.
//!
//! This crate provides [`BoardFiller`], the single constraint-backtracking
//! primitive behind three different uses:
//!
//! 1. generating a random complete board (fill an empty board),
//! 2. completing a partially filled board into a definitive solution, and
//! 3. verifying solvability of a snapshot without touching the original
//!    (see [`BoardFiller::solved_copy`]).
//!
//! The digit order tried at each cell is freshly randomized, and the
//! random source is injectable and seedable so generation and tests can be
//! made deterministic.
//!
//! # Examples
//!
//! ```
//! use gridlens_core::Board;
//! use gridlens_solver::BoardFiller;
//!
//! let mut filler = BoardFiller::from_seed([7; 32]);
//! let mut board = Board::new();
//! assert!(filler.fill(&mut board));
//! assert!(board.is_complete());
//! ```

pub mod filler;

pub use self::filler::BoardFiller;
