//! Tests for game state transitions.

use tictac_engine::{
    Board, GamePlayers, GameResult, GameState, Move, Player, Position, Token, Transition, Update,
    apply, determine_game_result,
};

fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col).expect("on board")
}

fn seated_game() -> GameState {
    let game = GameState::from_player(Player::new("abc", "Joe"), "game");
    apply(Player::new("def", "Alice").into(), &game).into_state()
}

fn game_with_board(board: Board, next_move: Token) -> GameState {
    GameState::from_parts(
        "game",
        GamePlayers::new(Some(Player::new("abc", "Joe")), Some(Player::new("def", "Alice"))),
        board,
        next_move,
        None,
        GameResult::Pending,
    )
}

#[test]
fn test_first_move_on_empty_board() {
    let game = seated_game();
    let next = apply(Move::new(Token::X, pos(0, 0)).into(), &game).into_state();

    let expected = Board::from_rows([[Some(Token::X), None, None], [None; 3], [None; 3]]);
    assert_eq!(next.board(), &expected);
    assert_eq!(next.next_move(), Token::O);
    assert_eq!(next.game_result(), GameResult::Pending);
}

#[test]
fn test_diagonal_win_for_x() {
    let board = Board::from_rows([
        [Some(Token::X), None, None],
        [None, Some(Token::X), None],
        [Some(Token::O), Some(Token::O), None],
    ]);
    let game = game_with_board(board, Token::X);
    let next = apply(Move::new(Token::X, pos(2, 2)).into(), &game).into_state();
    assert_eq!(next.game_result(), GameResult::XWins);
}

#[test]
fn test_last_cell_draw() {
    let board = Board::from_rows([
        [Some(Token::X), Some(Token::O), Some(Token::X)],
        [Some(Token::X), Some(Token::O), Some(Token::O)],
        [Some(Token::O), Some(Token::X), None],
    ]);
    let game = game_with_board(board, Token::X);
    let next = apply(Move::new(Token::X, pos(2, 2)).into(), &game).into_state();
    assert_eq!(next.game_result(), GameResult::Draw);
    assert!(next.board().is_full());
}

#[test]
fn test_move_changes_exactly_one_cell() {
    let board = Board::from_rows([
        [Some(Token::X), None, Some(Token::O)],
        [None, None, None],
        [None, Some(Token::X), None],
    ]);
    let game = game_with_board(board.clone(), Token::O);
    let target = pos(1, 2);
    let next = apply(Move::new(Token::O, target).into(), &game).into_state();

    for row in 0..3 {
        for col in 0..3 {
            let p = pos(row, col);
            if p == target {
                assert_eq!(next.board().get(p), Some(Token::O));
            } else {
                assert_eq!(next.board().get(p), board.get(p));
            }
        }
    }
    assert_eq!(game.board(), &board, "input board must be untouched");
}

#[test]
fn test_turns_alternate_through_full_game() {
    // X: (0,0) (1,1) (2,2) wins on the fifth move.
    let script = [(0, 0), (0, 1), (1, 1), (0, 2), (2, 2)];
    let mut game = seated_game();
    for (ply, &(row, col)) in script.iter().enumerate() {
        let expected = if ply % 2 == 0 { Token::X } else { Token::O };
        assert_eq!(game.next_move(), expected);
        let mv = Move::new(game.next_move(), pos(row, col));
        let Transition::Updated(next) = apply(mv.into(), &game) else {
            panic!("move {ply} should apply");
        };
        assert_eq!(next.next_move(), expected.opponent());
        assert_eq!(next.newest_move(), Some(mv));
        game = next;
    }
    assert_eq!(game.game_result(), GameResult::XWins);

    // Frozen from here on.
    let after = apply(Move::new(Token::O, pos(2, 0)).into(), &game);
    assert_eq!(after, Transition::Unmodified(game));
}

#[test]
fn test_slots_fixed_once_full() {
    let game = seated_game();
    let updates = [
        Update::Player(Player::new("ghi", "Bob")),
        Update::Players(GamePlayers::new(
            Some(Player::new("ghi", "Bob")),
            Some(Player::new("jkl", "Eve")),
        )),
    ];
    for update in updates {
        let next = apply(update, &game).into_state();
        assert_eq!(next.players(), game.players());
    }
}

#[test]
fn test_result_matches_board_after_every_move() {
    let mut game = seated_game();
    for (row, col) in [(1, 1), (0, 0), (2, 2), (0, 2), (0, 1), (2, 1), (1, 0), (1, 2), (2, 0)] {
        if game.game_result().is_over() {
            break;
        }
        let mv = Move::new(game.next_move(), pos(row, col));
        game = apply(mv.into(), &game).into_state();
        assert_eq!(game.game_result(), determine_game_result(game.board()));
    }
}
