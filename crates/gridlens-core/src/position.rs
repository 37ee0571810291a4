//! Board position (row, column) coordinates.

use std::fmt::{self, Display};

/// A position on the 9×9 board, in row-major order.
///
/// Rows and columns are both in the range 0-8; row 0 is the top of the
/// board and column 0 its left edge. Positions index into 81-element
/// containers via [`Position::index`].
///
/// # Examples
///
/// ```
/// use gridlens_core::Position;
///
/// let pos = Position::new(4, 7);
/// assert_eq!(pos.index(), 4 * 9 + 7);
/// assert_eq!(pos.box_index(), 5);
///
/// assert_eq!(Position::ALL.len(), 81);
/// assert_eq!(Position::ALL[0], Position::new(0, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Array containing all 81 positions in row-major order.
    pub const ALL: [Self; 81] = {
        let mut all = [Self { row: 0, col: 0 }; 81];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 81 {
            all[i] = Self {
                row: (i / 9) as u8,
                col: (i % 9) as u8,
            };
            i += 1;
        }
        all
    };

    /// Creates a position from row and column coordinates.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside the range 0-8.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        assert!(row < 9 && col < 9, "position out of range");
        Self { row, col }
    }

    /// Creates a position from a row-major index in the range 0-80.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 81 or greater.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        assert!(index < 81, "position index out of range");
        #[expect(clippy::cast_possible_truncation)]
        Self {
            row: (index / 9) as u8,
            col: (index % 9) as u8,
        }
    }

    /// Returns the row coordinate (0-8).
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column coordinate (0-8).
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the row-major index of this position (0-80).
    #[must_use]
    pub const fn index(self) -> usize {
        self.row as usize * 9 + self.col as usize
    }

    /// Returns the index of the 3×3 box containing this position (0-8,
    /// left to right, top to bottom).
    #[must_use]
    pub const fn box_index(self) -> u8 {
        (self.row / 3) * 3 + self.col / 3
    }

    /// Returns the top-left position of the box containing this position.
    #[must_use]
    pub const fn box_origin(self) -> Self {
        Self {
            row: (self.row / 3) * 3,
            col: (self.col / 3) * 3,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_row_major() {
        for (i, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(pos.index(), i);
            assert_eq!(Position::from_index(i), *pos);
        }
    }

    #[test]
    fn test_box_layout() {
        assert_eq!(Position::new(0, 0).box_index(), 0);
        assert_eq!(Position::new(0, 8).box_index(), 2);
        assert_eq!(Position::new(8, 0).box_index(), 6);
        assert_eq!(Position::new(8, 8).box_index(), 8);
        assert_eq!(Position::new(4, 4).box_index(), 4);
        assert_eq!(Position::new(5, 7).box_origin(), Position::new(3, 6));
    }

    #[test]
    #[should_panic(expected = "position out of range")]
    fn test_new_out_of_range_panics() {
        let _ = Position::new(9, 0);
    }
}
