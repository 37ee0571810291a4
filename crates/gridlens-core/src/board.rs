//! The 9×9 Sudoku board.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::{CellSet, Digit, Position};

/// A 9×9 grid of optional digits, stored in row-major order.
///
/// The board is a plain value: cloning it snapshots the grid, which is how
/// the solver verifies solvability without mutating the session's board.
///
/// # Grid strings
///
/// Boards parse from and display as 81-character strings where `1`-`9` are
/// filled cells and `.` is empty, row by row:
///
/// ```
/// use gridlens_core::Board;
///
/// let board: Board = format!("53..7....{}", ".".repeat(72)).parse()?;
/// assert_eq!(board.filled_count(), 3);
/// assert_eq!(board.to_string().len(), 81);
/// # Ok::<(), gridlens_core::ParseBoardError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Digit>; 81],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self { cells: [None; 81] }
    }

    /// Returns the cell value at the given position.
    #[must_use]
    pub const fn get(&self, pos: Position) -> Option<Digit> {
        self.cells[pos.index()]
    }

    /// Sets the cell value at the given position.
    pub const fn set(&mut self, pos: Position, value: Option<Digit>) {
        self.cells[pos.index()] = value;
    }

    /// Returns the number of filled cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Returns whether every cell is filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Returns the set of filled positions.
    #[must_use]
    pub fn filled_positions(&self) -> CellSet {
        Position::ALL
            .into_iter()
            .filter(|&pos| self.get(pos).is_some())
            .collect()
    }

    /// Returns whether placing `digit` at `pos` would satisfy the Sudoku
    /// constraints: the digit must not already occur in the row, column,
    /// or 3×3 box containing the position.
    ///
    /// This is the legality check used while *constructing* a board, so it
    /// is intended for empty cells; it does not skip the target cell
    /// itself. Detecting duplicates in an arbitrary user-filled board is
    /// the job of [`crate::find_conflicts`].
    ///
    /// # Examples
    ///
    /// ```
    /// use gridlens_core::{Board, Digit, Position};
    ///
    /// let mut board = Board::new();
    /// board.set(Position::new(0, 0), Some(Digit::D5));
    ///
    /// // Same row, same column, same box.
    /// assert!(!board.placement_fits(Position::new(0, 8), Digit::D5));
    /// assert!(!board.placement_fits(Position::new(8, 0), Digit::D5));
    /// assert!(!board.placement_fits(Position::new(2, 2), Digit::D5));
    /// // Unrelated cell.
    /// assert!(board.placement_fits(Position::new(4, 4), Digit::D5));
    /// ```
    #[must_use]
    pub fn placement_fits(&self, pos: Position, digit: Digit) -> bool {
        for i in 0..9 {
            if self.get(Position::new(pos.row(), i)) == Some(digit)
                || self.get(Position::new(i, pos.col())) == Some(digit)
            {
                return false;
            }
        }
        let origin = pos.box_origin();
        for row in origin.row()..origin.row() + 3 {
            for col in origin.col()..origin.col() + 3 {
                if self.get(Position::new(row, col)) == Some(digit) {
                    return false;
                }
            }
        }
        true
    }
}

/// Error returned when parsing a grid string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    /// The string does not contain exactly 81 cell characters.
    #[display("grid string must contain exactly 81 cells")]
    WrongLength,
    /// The string contains a character other than `1`-`9` or `.`.
    #[display("invalid cell character {_0:?}")]
    InvalidCharacter(#[error(not(source))] char),
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::new();
        let mut count = 0;
        for (i, c) in s.chars().filter(|c| !c.is_whitespace()).enumerate() {
            if i >= 81 {
                return Err(ParseBoardError::WrongLength);
            }
            let value = match c {
                '.' => None,
                '1'..='9' => Digit::try_from_value(c as u8 - b'0'),
                _ => return Err(ParseBoardError::InvalidCharacter(c)),
            };
            board.cells[i] = value;
            count = i + 1;
        }
        if count != 81 {
            return Err(ParseBoardError::WrongLength);
        }
        Ok(board)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            match cell {
                Some(digit) => write!(f, "{digit}")?,
                None => write!(f, ".")?,
            }
        }
        Ok(())
    }
}
