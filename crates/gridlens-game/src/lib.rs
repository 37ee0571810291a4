//! The Gridlens game session.
//!
//! This crate owns the active Sudoku board and everything derived from
//! it: the generated and locked cell sets, the current conflict
//! highlights, the stored solution, and the hint budget. A [`Session`] is
//! a plain owned value mutated by one caller at a time; every operation
//! runs to completion and leaves the session untouched when it fails.
//!
//! The presentation layer is an external collaborator: it reads the
//! session's board and cell sets after each mutation and forwards user
//! intents into the typed operations here.
//!
//! # Examples
//!
//! ```
//! use gridlens_game::Session;
//! use gridlens_generator::{Difficulty, PuzzleGenerator};
//!
//! let mut session = Session::new();
//! session.start_game(PuzzleGenerator::new().generate(Difficulty::Easy));
//!
//! assert_eq!(session.board().filled_count(), 51);
//! assert_eq!(session.hint_limit(), 3);
//! ```

pub mod outcome;
pub mod session;

pub use self::{
    outcome::{CheckError, EditError, HintError, LockError, ScanApply, SolveError},
    session::{Hint, ScanRun, Session},
};
