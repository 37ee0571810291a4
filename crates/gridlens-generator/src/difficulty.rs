//! Puzzle difficulty levels.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// How hard a generated puzzle should be, expressed as the number of cells
/// hidden from the completed solution.
///
/// The mapping is a fixed removal-count heuristic: easy hides 30 cells,
/// medium 40, hard 50.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    /// 30 hidden cells (51 givens).
    #[default]
    Easy,
    /// 40 hidden cells (41 givens).
    Medium,
    /// 50 hidden cells (31 givens).
    Hard,
}

impl Difficulty {
    /// Array containing all difficulty levels, easiest first.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Returns the number of cells removed from the complete board.
    #[must_use]
    pub const fn removal_count(self) -> usize {
        match self {
            Self::Easy => 30,
            Self::Medium => 40,
            Self::Hard => 50,
        }
    }

    /// Returns the number of given cells a puzzle of this difficulty keeps.
    #[must_use]
    pub const fn given_count(self) -> usize {
        81 - self.removal_count()
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing an unknown difficulty name.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown difficulty {_0:?}, expected easy, medium, or hard")]
pub struct ParseDifficultyError(#[error(not(source))] String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(ParseDifficultyError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removal_counts() {
        assert_eq!(Difficulty::Easy.removal_count(), 30);
        assert_eq!(Difficulty::Medium.removal_count(), 40);
        assert_eq!(Difficulty::Hard.removal_count(), 50);
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.given_count() + difficulty.removal_count(), 81);
        }
    }

    #[test]
    fn test_parse_round_trip() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.to_string().parse::<Difficulty>(), Ok(difficulty));
        }
        assert!("brutal".parse::<Difficulty>().is_err());
    }
}
