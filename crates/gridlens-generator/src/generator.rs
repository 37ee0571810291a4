//! Puzzle construction.

use gridlens_core::{Board, CellSet, Position};
use gridlens_solver::BoardFiller;
use rand::SeedableRng as _;
use rand_pcg::Pcg64;

use crate::{Difficulty, PuzzleSeed};

/// A generated puzzle together with its solution and provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    /// The board presented to the player, with hidden cells empty.
    pub problem: Board,
    /// The complete board the problem was carved from.
    pub solution: Board,
    /// The positions still filled in `problem`; these cells are read-only
    /// for the player.
    pub given_cells: CellSet,
    /// The difficulty the puzzle was generated for.
    pub difficulty: Difficulty,
    /// The seed that reproduces this puzzle exactly.
    pub seed: PuzzleSeed,
}

/// Generates puzzles by completing an empty board and hiding cells.
///
/// # Examples
///
/// ```
/// use gridlens_generator::{Difficulty, PuzzleGenerator, PuzzleSeed};
///
/// let generator = PuzzleGenerator::new();
/// let seed = PuzzleSeed::from_phrase("docs");
/// let puzzle = generator.generate_with_seed(Difficulty::Hard, seed);
///
/// assert_eq!(puzzle.problem.filled_count(), 31);
/// assert_eq!(generator.generate_with_seed(Difficulty::Hard, seed), puzzle);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PuzzleGenerator;

impl PuzzleGenerator {
    /// Creates a puzzle generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Generates a puzzle from a fresh random seed.
    #[must_use]
    pub fn generate(&self, difficulty: Difficulty) -> GeneratedPuzzle {
        self.generate_with_seed(difficulty, PuzzleSeed::random())
    }

    /// Generates the puzzle determined by `seed`.
    ///
    /// The seed drives two independent streams: one for the randomized
    /// board completion and one for choosing which cells to hide. Hidden
    /// cells are drawn uniformly without replacement, so exactly
    /// `difficulty.removal_count()` distinct positions are cleared and
    /// `81 - removal_count` givens remain.
    ///
    /// # Panics
    ///
    /// Panics if the filler fails to complete an empty board, which no
    /// seed can cause.
    #[must_use]
    pub fn generate_with_seed(&self, difficulty: Difficulty, seed: PuzzleSeed) -> GeneratedPuzzle {
        let mut filler = BoardFiller::from_seed(seed.derive("fill").bytes());
        let mut board = Board::new();
        let filled = filler.fill(&mut board);
        assert!(filled, "an empty board is always completable");

        let solution = board.clone();
        let mut given_cells = CellSet::FULL;

        let mut removal_rng = Pcg64::from_seed(seed.derive("removal").bytes());
        for index in rand::seq::index::sample(&mut removal_rng, 81, difficulty.removal_count()) {
            let pos = Position::from_index(index);
            board.set(pos, None);
            given_cells.remove(pos);
        }

        GeneratedPuzzle {
            problem: board,
            solution,
            given_cells,
            difficulty,
            seed,
        }
    }
}
