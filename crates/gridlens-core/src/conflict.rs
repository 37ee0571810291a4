//! Whole-board duplicate detection.

use crate::{Board, CellSet, Position};

/// Scans the whole board and returns every filled cell whose digit also
/// occurs elsewhere in its row, column, or 3×3 box.
///
/// Flagging is symmetric: when two cells collide, both are returned. The
/// scan is always exhaustive (all 81 cells, never short-circuited) so the
/// result can drive cell highlighting directly. It is independent of
/// [`Board::placement_fits`], which answers a different question (legality
/// of a prospective placement during construction).
///
/// # Examples
///
/// ```
/// use gridlens_core::{Board, Digit, Position, find_conflicts};
///
/// let mut board = Board::new();
/// board.set(Position::new(0, 0), Some(Digit::D7));
/// board.set(Position::new(0, 5), Some(Digit::D7));
///
/// let conflicts = find_conflicts(&board);
/// assert_eq!(conflicts.len(), 2);
/// assert!(conflicts.contains(Position::new(0, 0)));
/// assert!(conflicts.contains(Position::new(0, 5)));
/// ```
#[must_use]
pub fn find_conflicts(board: &Board) -> CellSet {
    let mut conflicts = CellSet::new();
    for pos in Position::ALL {
        let Some(digit) = board.get(pos) else {
            continue;
        };
        if has_duplicate_peer(board, pos, digit) {
            conflicts.insert(pos);
        }
    }
    conflicts
}

fn has_duplicate_peer(board: &Board, pos: Position, digit: crate::Digit) -> bool {
    for i in 0..9 {
        let row_peer = Position::new(pos.row(), i);
        if row_peer != pos && board.get(row_peer) == Some(digit) {
            return true;
        }
        let col_peer = Position::new(i, pos.col());
        if col_peer != pos && board.get(col_peer) == Some(digit) {
            return true;
        }
    }
    let origin = pos.box_origin();
    for row in origin.row()..origin.row() + 3 {
        for col in origin.col()..origin.col() + 3 {
            let peer = Position::new(row, col);
            if peer != pos && board.get(peer) == Some(digit) {
                return true;
            }
        }
    }
    false
}
