//! Core data structures for the Gridlens Sudoku toolkit.
//!
//! This crate provides the fundamental board model shared by puzzle
//! generation, solving, the game session, and the image-recognition
//! pipeline:
//!
//! - [`digit`]: type-safe representation of Sudoku digits 1-9
//! - [`position`]: row/column board coordinates
//! - [`board`]: the 9×9 grid of optional digits, including the
//!   per-placement legality check used while constructing boards
//! - [`cell_set`]: a compact set of board positions
//! - [`conflict`]: the whole-board duplicate scan used for user feedback
//!
//! # Examples
//!
//! ```
//! use gridlens_core::{Board, Digit, Position, find_conflicts};
//!
//! let mut board = Board::new();
//! let pos = Position::new(0, 0);
//! assert!(board.placement_fits(pos, Digit::D5));
//! board.set(pos, Some(Digit::D5));
//!
//! // A lone digit conflicts with nothing.
//! assert!(find_conflicts(&board).is_empty());
//! ```

pub mod board;
pub mod cell_set;
pub mod conflict;
pub mod digit;
pub mod position;

pub use self::{
    board::{Board, ParseBoardError},
    cell_set::CellSet,
    conflict::find_conflicts,
    digit::Digit,
    position::Position,
};
