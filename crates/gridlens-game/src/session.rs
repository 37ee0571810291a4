//! The session state machine.

use gridlens_core::{Board, CellSet, Digit, Position, find_conflicts};
use gridlens_generator::{Difficulty, GeneratedPuzzle};
use gridlens_solver::BoardFiller;
use rand::{Rng, RngExt as _};

use crate::{CheckError, EditError, HintError, LockError, ScanApply, SolveError};

/// Number of hints granted per puzzle.
const HINT_LIMIT: u8 = 3;

/// A hint that was written into the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    /// The cell the hint filled or corrected.
    pub pos: Position,
    /// The solution digit written there.
    pub digit: Digit,
}

/// Token identifying one image-scan run.
///
/// Scan runs are monotone per session: [`Session::begin_scan`] supersedes
/// any run still in flight, and [`Session::apply_scan`] only accepts a
/// board whose token is still the current one. This keeps a slow scan
/// from overwriting state produced after a newer upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanRun(u64);

/// The active Sudoku session.
///
/// Owns the board and all derived state. Exactly one mutator acts on a
/// session at a time (user actions are serialized), so operations are
/// plain `&mut self` methods with no internal locking.
///
/// Invariants:
///
/// - the generated and locked sets are disjoint,
/// - a stored solution is a complete valid Sudoku consistent with every
///   generated and locked cell,
/// - the hint limit resets to 3 on every new game, reset, and accepted
///   scan.
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    solution: Option<Board>,
    given_cells: CellSet,
    locked_cells: CellSet,
    conflict_cells: CellSet,
    hint_limit: u8,
    difficulty: Difficulty,
    scan_counter: u64,
    active_scan: Option<ScanRun>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session with an empty board and no stored solution.
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            solution: None,
            given_cells: CellSet::new(),
            locked_cells: CellSet::new(),
            conflict_cells: CellSet::new(),
            hint_limit: HINT_LIMIT,
            difficulty: Difficulty::default(),
            scan_counter: 0,
            active_scan: None,
        }
    }

    /// Returns the active board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the stored solution, if one exists.
    #[must_use]
    pub fn solution(&self) -> Option<&Board> {
        self.solution.as_ref()
    }

    /// Returns the cells pre-filled by puzzle generation.
    #[must_use]
    pub fn given_cells(&self) -> CellSet {
        self.given_cells
    }

    /// Returns the user-filled cells frozen by a successful lock.
    #[must_use]
    pub fn locked_cells(&self) -> CellSet {
        self.locked_cells
    }

    /// Returns the cells currently involved in a duplicate.
    #[must_use]
    pub fn conflict_cells(&self) -> CellSet {
        self.conflict_cells
    }

    /// Returns the number of hints still available.
    #[must_use]
    pub fn hint_limit(&self) -> u8 {
        self.hint_limit
    }

    /// Returns the difficulty selected for generation.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Selects the difficulty used by the next generated puzzle.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Replaces the session with a freshly generated puzzle.
    ///
    /// The puzzle's givens become read-only, its pre-removal completion
    /// becomes the stored solution, and all derived state is reset.
    pub fn start_game(&mut self, puzzle: GeneratedPuzzle) {
        log::info!(
            "starting {} game, seed {}",
            puzzle.difficulty,
            puzzle.seed
        );
        self.board = puzzle.problem;
        self.solution = Some(puzzle.solution);
        self.given_cells = puzzle.given_cells;
        self.locked_cells = CellSet::new();
        self.conflict_cells = CellSet::new();
        self.hint_limit = HINT_LIMIT;
        self.difficulty = puzzle.difficulty;
    }

    /// Clears the session back to an empty board.
    ///
    /// The difficulty selection survives a reset; everything else is
    /// discarded, including the stored solution.
    pub fn reset(&mut self) {
        log::info!("resetting session");
        self.board = Board::new();
        self.solution = None;
        self.given_cells = CellSet::new();
        self.locked_cells = CellSet::new();
        self.conflict_cells = CellSet::new();
        self.hint_limit = HINT_LIMIT;
    }

    fn is_editable(&self, pos: Position) -> bool {
        !self.given_cells.contains(pos) && !self.locked_cells.contains(pos)
    }

    /// Writes a value (or empties a cell) at the given position.
    ///
    /// Generated and locked cells are read-only. After a successful write
    /// the conflict set is recomputed from the whole board.
    ///
    /// Input coercion is the caller's job: a non-digit keystroke becomes
    /// `None` (via [`Digit::try_from_value`]) before reaching this entry
    /// point, never an error.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::GivenCell`] or [`EditError::LockedCell`] when
    /// the position is read-only.
    pub fn set_cell(&mut self, pos: Position, value: Option<Digit>) -> Result<(), EditError> {
        if self.given_cells.contains(pos) {
            return Err(EditError::GivenCell);
        }
        if self.locked_cells.contains(pos) {
            return Err(EditError::LockedCell);
        }
        self.board.set(pos, value);
        self.conflict_cells = find_conflicts(&self.board);
        Ok(())
    }

    /// Freezes every user-filled cell and stores a solution for the
    /// entered board.
    ///
    /// Three gates are checked in order, each failing the whole
    /// operation without changing any state:
    ///
    /// 1. every filled cell must be user-filled (no generated cells),
    /// 2. the board must be free of duplicates (a fresh full scan, not
    ///    the cached conflict set),
    /// 3. a clone of the board must be completable by the filler.
    ///
    /// On success the filled cells join the locked set and the completed
    /// clone becomes the stored solution. This and
    /// [`start_game`](Session::start_game) are the only operations that
    /// produce a solution.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`LockError`] gate.
    pub fn lock<R: Rng>(&mut self, filler: &mut BoardFiller<R>) -> Result<(), LockError> {
        let filled = self.board.filled_positions();
        if !filled.intersection(self.given_cells).is_empty() {
            return Err(LockError::NotUserFilled);
        }
        if !find_conflicts(&self.board).is_empty() {
            return Err(LockError::ConflictsPresent);
        }
        let Some(solved) = filler.solved_copy(&self.board) else {
            return Err(LockError::Unsolvable);
        };

        log::info!("locking {} user-filled cells", filled.len());
        self.locked_cells = filled;
        self.solution = Some(solved);
        Ok(())
    }

    /// Fills every editable cell with its solution value.
    ///
    /// When the board has neither generated nor locked cells the call is
    /// a silent no-op rather than an error: there is nothing meaningful
    /// to solve against yet.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::NoSolutionAvailable`] when no solution is
    /// stored.
    pub fn solve(&mut self) -> Result<(), SolveError> {
        let solution = self
            .solution
            .clone()
            .ok_or(SolveError::NoSolutionAvailable)?;
        if self.given_cells.is_empty() && self.locked_cells.is_empty() {
            return Ok(());
        }
        log::debug!("filling editable cells from the stored solution");
        for pos in Position::ALL {
            if self.is_editable(pos) && self.board.get(pos) != solution.get(pos) {
                self.board.set(pos, solution.get(pos));
            }
        }
        Ok(())
    }

    /// Reveals the solution value of one editable cell chosen uniformly
    /// at random among the cells that are empty or wrong.
    ///
    /// Like [`solve`](Session::solve), the call is a silent no-op
    /// (`Ok(None)`) when the board has neither generated nor locked
    /// cells. A successful hint recomputes conflicts and decrements the
    /// hint budget.
    ///
    /// # Errors
    ///
    /// Returns [`HintError::NoSolutionAvailable`] without a stored
    /// solution, [`HintError::NoHintsRemaining`] when the budget is
    /// spent, and [`HintError::NoValidHintTarget`] when every editable
    /// cell is already correct.
    ///
    /// # Panics
    ///
    /// Panics if the stored solution violates its completeness invariant.
    pub fn hint<R: Rng>(&mut self, rng: &mut R) -> Result<Option<Hint>, HintError> {
        let solution = self
            .solution
            .clone()
            .ok_or(HintError::NoSolutionAvailable)?;
        if self.given_cells.is_empty() && self.locked_cells.is_empty() {
            return Ok(None);
        }
        if self.hint_limit == 0 {
            return Err(HintError::NoHintsRemaining);
        }

        let candidates: Vec<Position> = Position::ALL
            .into_iter()
            .filter(|&pos| {
                self.is_editable(pos)
                    && (self.board.get(pos).is_none() || self.board.get(pos) != solution.get(pos))
            })
            .collect();
        if candidates.is_empty() {
            return Err(HintError::NoValidHintTarget);
        }

        let pos = candidates[rng.random_range(0..candidates.len())];
        let digit = solution.get(pos).expect("stored solution is complete");
        self.board.set(pos, Some(digit));
        self.conflict_cells = find_conflicts(&self.board);
        self.hint_limit -= 1;
        log::debug!("hint placed {digit} at {pos}, {} hints left", self.hint_limit);
        Ok(Some(Hint { pos, digit }))
    }

    /// Checks whether the board is already a complete, valid Sudoku.
    ///
    /// Validity is a duplicate scan; completeness is checked by running
    /// the filler on a clone and requiring it unchanged (the filler only
    /// fills empty cells, so an already-complete board comes back as-is).
    /// Note this does not compare against the stored puzzle solution;
    /// any valid completion passes.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::IncorrectSolution`] when the board is
    /// incomplete or invalid.
    pub fn check_solution<R: Rng>(&self, filler: &mut BoardFiller<R>) -> Result<(), CheckError> {
        let mut clone = self.board.clone();
        if find_conflicts(&self.board).is_empty()
            && filler.fill(&mut clone)
            && clone == self.board
        {
            Ok(())
        } else {
            Err(CheckError::IncorrectSolution)
        }
    }

    /// Begins a new scan run, superseding any run still in flight.
    pub fn begin_scan(&mut self) -> ScanRun {
        self.scan_counter += 1;
        let run = ScanRun(self.scan_counter);
        self.active_scan = Some(run);
        log::debug!("scan run {} started", self.scan_counter);
        run
    }

    /// Returns whether a scan run is currently in flight.
    #[must_use]
    pub fn scan_in_progress(&self) -> bool {
        self.active_scan.is_some()
    }

    /// Accepts a recognized board from a finished scan run.
    ///
    /// The board is applied only when `run` is still the session's
    /// current scan; a superseded run reports [`ScanApply::Stale`] and
    /// leaves the session untouched. Acceptance replaces the board
    /// wholesale: the generated, locked, and conflict sets are cleared,
    /// the hint budget resets, conflicts are recomputed, and no solution
    /// is stored (solving the scanned board requires a subsequent lock).
    pub fn apply_scan(&mut self, run: ScanRun, board: Board) -> ScanApply {
        if self.active_scan != Some(run) {
            log::debug!("scan run {} is stale, ignoring its board", run.0);
            return ScanApply::Stale;
        }
        log::info!("scan run {} accepted, {} cells recognized", run.0, board.filled_count());
        self.board = board;
        self.solution = None;
        self.given_cells = CellSet::new();
        self.locked_cells = CellSet::new();
        self.conflict_cells = find_conflicts(&self.board);
        self.hint_limit = HINT_LIMIT;
        self.active_scan = None;
        ScanApply::Applied
    }

    /// Marks a scan run as finished without a usable board.
    ///
    /// Used on pipeline failure: the in-progress flag is cleared when the
    /// failed run is still current, and the session state stays intact.
    pub fn finish_scan(&mut self, run: ScanRun) {
        if self.active_scan == Some(run) {
            self.active_scan = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use gridlens_generator::{PuzzleGenerator, PuzzleSeed};
    use rand_pcg::Pcg64;
    use rand::SeedableRng as _;

    use super::*;

    const SOLVED: &str =
        "185362947793148526246795183564239871931874265827516394318427659672951438459683712";

    fn filler() -> BoardFiller {
        BoardFiller::from_seed([42; 32])
    }

    fn generated_session(difficulty: Difficulty) -> Session {
        let mut session = Session::new();
        let puzzle = PuzzleGenerator::new()
            .generate_with_seed(difficulty, PuzzleSeed::from_phrase("session tests"));
        session.start_game(puzzle);
        session
    }

    fn first_editable_empty(session: &Session) -> Position {
        Position::ALL
            .into_iter()
            .find(|&pos| {
                session.board().get(pos).is_none()
                    && !session.given_cells().contains(pos)
                    && !session.locked_cells().contains(pos)
            })
            .expect("puzzle has an empty editable cell")
    }

    #[test]
    fn test_start_game_resets_derived_state() {
        let session = generated_session(Difficulty::Easy);
        assert_eq!(session.board().filled_count(), 51);
        assert_eq!(session.difficulty(), Difficulty::Easy);
        assert_eq!(session.given_cells().len(), 51);
        assert!(session.locked_cells().is_empty());
        assert!(session.conflict_cells().is_empty());
        assert_eq!(session.hint_limit(), 3);
        assert!(session.solution().is_some());
    }

    #[test]
    fn test_reset_keeps_difficulty() {
        let mut session = generated_session(Difficulty::Hard);
        session.reset();
        assert_eq!(session.board().filled_count(), 0);
        assert!(session.solution().is_none());
        assert!(session.given_cells().is_empty());
        assert_eq!(session.hint_limit(), 3);
        assert_eq!(session.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn test_set_cell_rejects_given_and_locked() {
        let mut session = generated_session(Difficulty::Easy);
        let given = session
            .given_cells()
            .iter()
            .next()
            .expect("puzzle has givens");
        assert_eq!(
            session.set_cell(given, Some(Digit::D1)),
            Err(EditError::GivenCell)
        );

        let mut user_session = Session::new();
        user_session.set_cell(Position::new(0, 0), Some(Digit::D5)).unwrap();
        user_session.lock(&mut filler()).unwrap();
        assert_eq!(
            user_session.set_cell(Position::new(0, 0), None),
            Err(EditError::LockedCell)
        );
    }

    #[test]
    fn test_set_cell_updates_conflicts_both_ways() {
        let mut session = Session::new();
        session.set_cell(Position::new(0, 0), Some(Digit::D5)).unwrap();
        session.set_cell(Position::new(0, 8), Some(Digit::D5)).unwrap();
        assert_eq!(session.conflict_cells().len(), 2);

        session.set_cell(Position::new(0, 8), None).unwrap();
        assert!(session.conflict_cells().is_empty());
    }

    #[test]
    fn test_lock_gates_in_order() {
        // Gate 1: generated cells present.
        let mut session = generated_session(Difficulty::Easy);
        assert_eq!(session.lock(&mut filler()), Err(LockError::NotUserFilled));

        // Gate 2: duplicate digits.
        let mut session = Session::new();
        session.set_cell(Position::new(0, 0), Some(Digit::D5)).unwrap();
        session.set_cell(Position::new(0, 5), Some(Digit::D5)).unwrap();
        assert_eq!(
            session.lock(&mut filler()),
            Err(LockError::ConflictsPresent)
        );

        // Gate 3: conflict-free but uncompletable.
        let mut session = Session::new();
        for (col, digit) in Digit::ALL[..8].iter().enumerate() {
            session
                .set_cell(Position::new(0, u8::try_from(col).unwrap()), Some(*digit))
                .unwrap();
        }
        // Cell (0, 8) needs a 9, but column 8 already holds one.
        session.set_cell(Position::new(4, 8), Some(Digit::D9)).unwrap();
        assert_eq!(session.lock(&mut filler()), Err(LockError::Unsolvable));
        // Failure left everything unlocked and solution-less.
        assert!(session.locked_cells().is_empty());
        assert!(session.solution().is_none());
    }

    #[test]
    fn test_lock_clean_board_succeeds() {
        let mut session = Session::new();
        session.set_cell(Position::new(0, 0), Some(Digit::D5)).unwrap();
        session.set_cell(Position::new(3, 4), Some(Digit::D3)).unwrap();
        session.lock(&mut filler()).unwrap();

        assert_eq!(session.locked_cells().len(), 2);
        assert!(session.locked_cells().contains(Position::new(0, 0)));
        let solution = session.solution().expect("lock stores a solution");
        assert!(solution.is_complete());
        assert_eq!(solution.get(Position::new(0, 0)), Some(Digit::D5));
        assert_eq!(solution.get(Position::new(3, 4)), Some(Digit::D3));
        assert!(session.given_cells().intersection(session.locked_cells()).is_empty());
    }

    #[test]
    fn test_lock_fully_solved_board_stores_it_verbatim() {
        let solved: Board = SOLVED.parse().unwrap();
        let mut session = Session::new();
        for pos in Position::ALL {
            session.set_cell(pos, solved.get(pos)).unwrap();
        }
        session.lock(&mut filler()).unwrap();
        assert_eq!(session.solution(), Some(&solved));
        assert_eq!(session.locked_cells().len(), 81);
    }

    #[test]
    fn test_solve_requires_solution_then_fills_editables() {
        let mut session = Session::new();
        assert_eq!(session.solve(), Err(SolveError::NoSolutionAvailable));

        let mut session = generated_session(Difficulty::Medium);
        let pos = first_editable_empty(&session);
        // A wrong entry gets overwritten by solve.
        let solution = session.solution().unwrap().clone();
        let wrong = Digit::ALL
            .into_iter()
            .find(|&d| Some(d) != solution.get(pos))
            .unwrap();
        session.set_cell(pos, Some(wrong)).unwrap();

        session.solve().unwrap();
        assert_eq!(session.board(), &solution);
    }

    #[test]
    fn test_solve_without_given_or_locked_is_a_no_op() {
        // Locking an empty board stores a solution but locks no cells.
        let mut session = Session::new();
        session.lock(&mut filler()).unwrap();
        assert!(session.solution().is_some());
        assert!(session.locked_cells().is_empty());

        session.solve().unwrap();
        assert_eq!(session.board().filled_count(), 0);
    }

    #[test]
    fn test_hint_budget_and_targets() {
        let mut rng = Pcg64::from_seed([7; 32]);
        let mut session = generated_session(Difficulty::Easy);
        let solution = session.solution().unwrap().clone();

        for remaining in (0..3_u8).rev() {
            let hint = session.hint(&mut rng).unwrap().expect("hint applied");
            assert!(!session.given_cells().contains(hint.pos));
            assert!(!session.locked_cells().contains(hint.pos));
            assert_eq!(Some(hint.digit), solution.get(hint.pos));
            assert_eq!(session.board().get(hint.pos), Some(hint.digit));
            assert_eq!(session.hint_limit(), remaining);
        }
        assert_eq!(session.hint(&mut rng), Err(HintError::NoHintsRemaining));
    }

    #[test]
    fn test_hint_with_all_cells_correct_reports_no_target() {
        let mut rng = Pcg64::from_seed([8; 32]);
        let mut session = generated_session(Difficulty::Easy);
        session.solve().unwrap();
        assert_eq!(session.hint(&mut rng), Err(HintError::NoValidHintTarget));
    }

    #[test]
    fn test_hint_without_solution_fails() {
        let mut rng = Pcg64::from_seed([9; 32]);
        let mut session = Session::new();
        assert_eq!(session.hint(&mut rng), Err(HintError::NoSolutionAvailable));
    }

    #[test]
    fn test_check_solution_semantics() {
        let mut session = Session::new();
        // Empty board: completable but changed by the fill.
        assert_eq!(
            session.check_solution(&mut filler()),
            Err(CheckError::IncorrectSolution)
        );

        let solved: Board = SOLVED.parse().unwrap();
        for pos in Position::ALL {
            session.set_cell(pos, solved.get(pos)).unwrap();
        }
        assert_eq!(session.check_solution(&mut filler()), Ok(()));

        // An invalid complete board fails.
        let mut session = Session::new();
        for pos in Position::ALL {
            session.set_cell(pos, Some(Digit::D1)).unwrap();
        }
        assert_eq!(
            session.check_solution(&mut filler()),
            Err(CheckError::IncorrectSolution)
        );

        // So does a solved board with a single duplicate introduced.
        let mut session = Session::new();
        for pos in Position::ALL {
            session.set_cell(pos, solved.get(pos)).unwrap();
        }
        let corner = Position::new(0, 0);
        let duplicate = solved.get(Position::new(0, 1));
        session.set_cell(corner, duplicate).unwrap();
        assert_eq!(
            session.check_solution(&mut filler()),
            Err(CheckError::IncorrectSolution)
        );
    }

    #[test]
    fn test_apply_scan_replaces_board_wholesale() {
        let mut session = generated_session(Difficulty::Easy);
        let scanned: Board = format!("12..3....{}", ".".repeat(72)).parse().unwrap();

        let run = session.begin_scan();
        assert!(session.scan_in_progress());
        assert!(session.apply_scan(run, scanned.clone()).is_applied());
        assert!(!session.scan_in_progress());

        assert_eq!(session.board(), &scanned);
        assert!(session.solution().is_none());
        assert!(session.given_cells().is_empty());
        assert!(session.locked_cells().is_empty());
        assert_eq!(session.hint_limit(), 3);
    }

    #[test]
    fn test_stale_scan_run_is_ignored() {
        let mut session = Session::new();
        let old_run = session.begin_scan();
        let _new_run = session.begin_scan();

        let scanned: Board = format!("9{}", ".".repeat(80)).parse().unwrap();
        assert!(session.apply_scan(old_run, scanned).is_stale());
        assert_eq!(session.board().filled_count(), 0);
        // The newer run is still in flight.
        assert!(session.scan_in_progress());
    }

    #[test]
    fn test_finish_scan_clears_only_current_run() {
        let mut session = Session::new();
        let old_run = session.begin_scan();
        let new_run = session.begin_scan();

        session.finish_scan(old_run);
        assert!(session.scan_in_progress());
        session.finish_scan(new_run);
        assert!(!session.scan_in_progress());
    }

    #[test]
    fn test_scan_pipeline_feeds_the_session() {
        use std::sync::Arc;

        use gridlens_vision::{ScanPipeline, testing::FixedRecognizer};
        use image::{Rgba, RgbaImage};

        // White canvas with a black grid border, every cell read as 9.
        let mut photo = RgbaImage::from_pixel(240, 240, Rgba([255, 255, 255, 255]));
        let black = Rgba([0, 0, 0, 255]);
        for offset in 0..=180 {
            photo.put_pixel(20 + offset, 20, black);
            photo.put_pixel(20 + offset, 200, black);
            photo.put_pixel(20, 20 + offset, black);
            photo.put_pixel(200, 20 + offset, black);
        }
        let pipeline = ScanPipeline::new(Arc::new(FixedRecognizer::reading("9", 80.0)));
        let scanned = pipeline.scan_image(&photo).unwrap();

        let mut session = generated_session(Difficulty::Easy);
        let run = session.begin_scan();
        assert!(session.apply_scan(run, scanned).is_applied());
        assert_eq!(session.board().filled_count(), 81);
        // 81 nines conflict everywhere.
        assert_eq!(session.conflict_cells().len(), 81);
        assert!(session.solution().is_none());
    }

    #[test]
    fn test_scanned_board_with_conflicts_is_highlighted() {
        let mut session = Session::new();
        let run = session.begin_scan();
        let scanned: Board = format!("55{}", ".".repeat(79)).parse().unwrap();
        assert!(session.apply_scan(run, scanned).is_applied());
        assert_eq!(session.conflict_cells().len(), 2);
    }
}
