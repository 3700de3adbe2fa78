//! Win detection logic for tic-tac-toe.

use crate::{Board, Position, Token};
use tracing::instrument;

/// The eight winning lines as `(row, col)` triples.
pub const LINES: [[(usize, usize); 3]; 8] = [
    // Rows
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    // Columns
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    // Diagonals
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// Returns the token occupying all three cells of `line`, if any.
pub fn line_owner(board: &Board, line: &[(usize, usize); 3]) -> Option<Token> {
    let mut cells = line
        .iter()
        .map(|&(row, col)| Position::new(row, col).and_then(|pos| board.get(pos)));
    let first = cells.next().flatten()?;
    cells.all(|cell| cell == Some(first)).then_some(first)
}

/// Checks whether `token` owns at least one line.
///
/// Every line is inspected; the count of owned lines is computed in full.
#[instrument(skip(board))]
pub fn wins(board: &Board, token: Token) -> bool {
    let owned = LINES
        .iter()
        .filter(|line| line_owner(board, line) == Some(token))
        .count();
    owned > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Token::{O, X};

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert!(!wins(&board, X));
        assert!(!wins(&board, O));
    }

    #[test]
    fn test_winner_top_row() {
        let board = Board::from_rows([
            [Some(X), Some(X), Some(X)],
            [None, Some(O), None],
            [Some(O), None, None],
        ]);
        assert!(wins(&board, X));
        assert!(!wins(&board, O));
    }

    #[test]
    fn test_anti_diagonal() {
        let board = Board::from_rows([
            [Some(X), None, Some(O)],
            [Some(X), Some(O), None],
            [Some(O), None, Some(X)],
        ]);
        assert!(wins(&board, O));
    }

    #[test]
    fn test_mixed_line_has_no_owner() {
        let board = Board::from_rows([
            [Some(X), Some(O), Some(X)],
            [None, None, None],
            [None, None, None],
        ]);
        assert_eq!(line_owner(&board, &LINES[0]), None);
        assert_eq!(line_owner(&board, &LINES[1]), None);
    }
}
