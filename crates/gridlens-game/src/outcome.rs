//! Typed outcomes for session operations.
//!
//! Every fallible session operation reports a specific reason; none of
//! them mutate the session on failure, so the caller can always present
//! the outcome and keep the current board untouched.

/// Reasons an edit is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EditError {
    /// The target cell was pre-filled by puzzle generation.
    #[display("generated cells cannot be edited")]
    GivenCell,
    /// The target cell was frozen by a successful lock.
    #[display("locked cells cannot be edited")]
    LockedCell,
}

/// Reasons the lock workflow fails.
///
/// The gates are evaluated in declaration order and each failure is
/// all-or-nothing: no cell is locked and no solution is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum LockError {
    /// A filled cell belongs to the generated set; locking is only for
    /// boards entered entirely by the user.
    #[display("the board contains generated cells; only user-filled boards can be locked")]
    NotUserFilled,
    /// A duplicate digit exists in some row, column, or box.
    #[display("the board has conflicts; resolve them before locking")]
    ConflictsPresent,
    /// The entered board admits no completion.
    #[display("the board is unsolvable; correct it before locking")]
    Unsolvable,
}

/// Reasons automatic solving is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SolveError {
    /// No solution is stored; generate a puzzle or lock a board first.
    #[display("no solution available; generate or lock a puzzle first")]
    NoSolutionAvailable,
}

/// Reasons a hint cannot be provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum HintError {
    /// No solution is stored; generate a puzzle or lock a board first.
    #[display("no solution available; generate or lock a puzzle first")]
    NoSolutionAvailable,
    /// The hint budget for this puzzle is spent.
    #[display("no hints remaining")]
    NoHintsRemaining,
    /// Every editable cell already holds its solution value.
    #[display("no valid hint target; all editable cells are correct")]
    NoValidHintTarget,
}

/// Reason a solution check fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CheckError {
    /// The board is not a complete, valid Sudoku.
    #[display("the board is not a correct solution")]
    IncorrectSolution,
}

/// Whether a finished scan's board was accepted into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum ScanApply {
    /// The scan was still current; the board replaced the session board.
    Applied,
    /// A newer scan superseded this one; the session was left untouched.
    Stale,
}
