//! Board assembly from per-cell recognition results.

use gridlens_core::{Board, Digit, Position};

use crate::ScanError;

/// Builds a board from 81 row-major cell results.
///
/// # Errors
///
/// Returns [`ScanError::UnrecognizableGrid`] unless exactly 81 results
/// are supplied.
pub fn assemble_board(cells: &[Option<Digit>]) -> Result<Board, ScanError> {
    if cells.len() != 81 {
        return Err(ScanError::UnrecognizableGrid);
    }
    let mut board = Board::new();
    for (pos, &value) in Position::ALL.iter().zip(cells) {
        board.set(*pos, value);
    }
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_places_cells_row_major() {
        let mut cells = vec![None; 81];
        cells[0] = Some(Digit::D4);
        cells[10] = Some(Digit::D9);
        cells[80] = Some(Digit::D1);

        let board = assemble_board(&cells).unwrap();
        assert_eq!(board.get(Position::new(0, 0)), Some(Digit::D4));
        assert_eq!(board.get(Position::new(1, 1)), Some(Digit::D9));
        assert_eq!(board.get(Position::new(8, 8)), Some(Digit::D1));
        assert_eq!(board.filled_count(), 3);
    }

    #[test]
    fn test_assemble_rejects_wrong_shapes() {
        assert!(matches!(
            assemble_board(&[]),
            Err(ScanError::UnrecognizableGrid)
        ));
        assert!(matches!(
            assemble_board(&vec![None; 80]),
            Err(ScanError::UnrecognizableGrid)
        ));
    }
}
