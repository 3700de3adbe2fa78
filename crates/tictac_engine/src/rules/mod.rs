//! Game rules for tic-tac-toe.
//!
//! Pure functions that evaluate a board. Rules are kept apart from the
//! transition engine so they can be checked on any board in isolation.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, line_owner, wins};

use crate::{Board, GameResult, Token};
use tracing::{debug, instrument};

/// Computes the result of `board` from scratch.
///
/// X's lines are evaluated before O's. All eight lines are inspected for
/// each token.
#[instrument(skip(board))]
pub fn determine_game_result(board: &Board) -> GameResult {
    let result = if wins(board, Token::X) {
        GameResult::XWins
    } else if wins(board, Token::O) {
        GameResult::OWins
    } else if is_full(board) {
        GameResult::Draw
    } else {
        GameResult::Pending
    };
    debug!(result = %result, "Determined game result");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Token::{O, X};

    #[test]
    fn test_empty_board_pending() {
        assert_eq!(determine_game_result(&Board::new()), GameResult::Pending);
    }

    #[test]
    fn test_x_diagonal() {
        let board = Board::from_rows([
            [Some(X), None, None],
            [None, Some(X), None],
            [Some(O), Some(O), Some(X)],
        ]);
        assert_eq!(determine_game_result(&board), GameResult::XWins);
    }

    #[test]
    fn test_o_column() {
        let board = Board::from_rows([
            [Some(X), Some(O), None],
            [Some(X), Some(O), None],
            [None, Some(O), Some(X)],
        ]);
        assert_eq!(determine_game_result(&board), GameResult::OWins);
    }

    #[test]
    fn test_full_board_draw() {
        let board = Board::from_rows([
            [Some(X), Some(O), Some(X)],
            [Some(O), Some(X), Some(X)],
            [Some(O), Some(X), Some(O)],
        ]);
        assert_eq!(determine_game_result(&board), GameResult::Draw);
    }

    #[test]
    fn test_win_on_full_board_is_not_draw() {
        let board = Board::from_rows([
            [Some(O), Some(X), Some(O)],
            [Some(X), Some(O), Some(X)],
            [Some(X), Some(X), Some(O)],
        ]);
        assert_eq!(determine_game_result(&board), GameResult::OWins);
    }

    #[test]
    fn test_x_evaluated_before_o() {
        // Unreachable through legal play, but pins evaluation order.
        let board = Board::from_rows([
            [Some(O), Some(O), Some(O)],
            [None, None, None],
            [Some(X), Some(X), Some(X)],
        ]);
        assert_eq!(determine_game_result(&board), GameResult::XWins);
    }

    #[test]
    fn test_exhaustive_against_line_definition() {
        // Every board over {empty, X, O}^9.
        for mut code in 0..3usize.pow(9) {
            let mut rows = [[None; 3]; 3];
            for cell in rows.iter_mut().flatten() {
                *cell = match code % 3 {
                    0 => None,
                    1 => Some(X),
                    _ => Some(O),
                };
                code /= 3;
            }
            let board = Board::from_rows(rows);
            let full_line = |token| {
                LINES
                    .iter()
                    .any(|line| line.iter().all(|&(r, c)| rows[r][c] == Some(token)))
            };
            let expected = if full_line(X) {
                GameResult::XWins
            } else if full_line(O) {
                GameResult::OWins
            } else if rows.iter().flatten().all(Option::is_some) {
                GameResult::Draw
            } else {
                GameResult::Pending
            };
            assert_eq!(determine_game_result(&board), expected, "{}", board.display());
        }
    }
}
