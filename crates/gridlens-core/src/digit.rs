//! Sudoku digit representation.

use std::fmt::{self, Display};

/// A Sudoku digit in the range 1-9.
///
/// Out-of-range values are unrepresentable, so a [`crate::Board`] cell is
/// simply `Option<Digit>` and no code downstream needs to re-validate cell
/// contents.
///
/// # Examples
///
/// ```
/// use gridlens_core::Digit;
///
/// let digit = Digit::D5;
/// assert_eq!(digit.value(), 5);
///
/// // Lossy conversion used for keystrokes and OCR text.
/// assert_eq!(Digit::try_from_value(7), Some(Digit::D7));
/// assert_eq!(Digit::try_from_value(0), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Digit {
    /// The digit 1.
    D1 = 1,
    /// The digit 2.
    D2 = 2,
    /// The digit 3.
    D3 = 3,
    /// The digit 4.
    D4 = 4,
    /// The digit 5.
    D5 = 5,
    /// The digit 6.
    D6 = 6,
    /// The digit 7.
    D7 = 7,
    /// The digit 8.
    D8 = 8,
    /// The digit 9.
    D9 = 9,
}

impl Digit {
    /// Array containing all digits from 1 to 9, in order.
    pub const ALL: [Self; 9] = [
        Self::D1,
        Self::D2,
        Self::D3,
        Self::D4,
        Self::D5,
        Self::D6,
        Self::D7,
        Self::D8,
        Self::D9,
    ];

    /// Creates a digit from a value known to be in the range 1-9.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not in the range 1-9. Use
    /// [`Digit::try_from_value`] for untrusted input.
    #[must_use]
    pub fn from_value(value: u8) -> Self {
        Self::try_from_value(value).unwrap_or_else(|| panic!("invalid digit value: {value}"))
    }

    /// Creates a digit from an arbitrary value, returning `None` outside 1-9.
    ///
    /// This is the soft coercion applied to keystrokes and recognized OCR
    /// text: anything that is not a Sudoku digit becomes an empty cell.
    #[must_use]
    pub const fn try_from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::D1),
            2 => Some(Self::D2),
            3 => Some(Self::D3),
            4 => Some(Self::D4),
            5 => Some(Self::D5),
            6 => Some(Self::D6),
            7 => Some(Self::D7),
            8 => Some(Self::D8),
            9 => Some(Self::D9),
            _ => None,
        }
    }

    /// Returns the numeric value of this digit (1-9).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }
}

impl Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.value(), f)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> u8 {
        digit.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        assert_eq!(Digit::ALL.len(), 9);
        for digit in Digit::ALL {
            assert_eq!(Digit::from_value(digit.value()), digit);
            assert_eq!(Digit::try_from_value(digit.value()), Some(digit));
        }
    }

    #[test]
    fn test_try_from_value_out_of_range() {
        assert_eq!(Digit::try_from_value(0), None);
        assert_eq!(Digit::try_from_value(10), None);
        assert_eq!(Digit::try_from_value(255), None);
    }

    #[test]
    #[should_panic(expected = "invalid digit value: 0")]
    fn test_from_value_zero_panics() {
        let _ = Digit::from_value(0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Digit::D1), "1");
        assert_eq!(format!("{}", Digit::D9), "9");
    }
}
