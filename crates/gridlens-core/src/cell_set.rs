//! A compact set of board positions.

use std::{
    fmt,
    iter::FusedIterator,
    ops::{BitAnd, BitOr},
};

use crate::Position;

/// A set of board positions backed by a 128-bit mask.
///
/// The session tracks its generated, locked, and conflict cells with this
/// type; membership is the only semantics (no associated values). Bit `i`
/// corresponds to `Position::from_index(i)`.
///
/// # Examples
///
/// ```
/// use gridlens_core::{CellSet, Position};
///
/// let mut set = CellSet::new();
/// set.insert(Position::new(0, 0));
/// set.insert(Position::new(8, 8));
///
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(Position::new(8, 8)));
///
/// set.remove(Position::new(0, 0));
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct CellSet {
    bits: u128,
}

impl CellSet {
    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };

    /// The set containing all 81 positions.
    pub const FULL: Self = Self {
        bits: (1 << 81) - 1,
    };

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Inserts a position into the set.
    pub const fn insert(&mut self, pos: Position) {
        self.bits |= 1 << pos.index();
    }

    /// Removes a position from the set.
    pub const fn remove(&mut self, pos: Position) {
        self.bits &= !(1 << pos.index());
    }

    /// Returns whether the set contains the given position.
    #[must_use]
    pub const fn contains(self, pos: Position) -> bool {
        self.bits & (1 << pos.index()) != 0
    }

    /// Returns the number of positions in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Removes all positions from the set.
    pub const fn clear(&mut self) {
        self.bits = 0;
    }

    /// Returns the intersection of two sets.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self {
            bits: self.bits & other.bits,
        }
    }

    /// Returns the union of two sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Returns an iterator over the contained positions in row-major order.
    #[must_use]
    pub const fn iter(self) -> Iter {
        Iter { bits: self.bits }
    }
}

impl BitAnd for CellSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl BitOr for CellSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl FromIterator<Position> for CellSet {
    fn from_iter<T: IntoIterator<Item = Position>>(iter: T) -> Self {
        let mut set = Self::new();
        for pos in iter {
            set.insert(pos);
        }
        set
    }
}

impl IntoIterator for CellSet {
    type Item = Position;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over the positions of a [`CellSet`], in row-major order.
#[derive(Debug, Clone)]
pub struct Iter {
    bits: u128,
}

impl Iterator for Iter {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.bits == 0 {
            return None;
        }
        let index = self.bits.trailing_zeros() as usize;
        self.bits &= self.bits - 1;
        Some(Position::from_index(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl FusedIterator for Iter {}
impl ExactSizeIterator for Iter {}
