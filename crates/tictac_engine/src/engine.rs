//! Transition engine: computes the next game state from a validated update.
//!
//! Every function here is pure. A transition never mutates the state it is
//! given; it either hands back the same state as [`Transition::Unmodified`]
//! or a freshly built one as [`Transition::Updated`].

use crate::rules::determine_game_result;
use crate::{Board, GamePlayers, GameState, Move, Player};
use tracing::{debug, info, instrument};

/// A proposed change to a game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub enum Update {
    /// Seat a single player in the first open slot.
    Player(Player),
    /// Seat both players at once.
    Players(GamePlayers),
    /// Place a token.
    Move(Move),
}

/// Result of applying an [`Update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The update had no effect.
    Unmodified(GameState),
    /// The update produced a new state.
    Updated(GameState),
}

impl Transition {
    /// Returns the resulting state regardless of variant.
    pub fn into_state(self) -> GameState {
        match self {
            Transition::Unmodified(state) | Transition::Updated(state) => state,
        }
    }

    /// Borrows the resulting state.
    pub fn state(&self) -> &GameState {
        match self {
            Transition::Unmodified(state) | Transition::Updated(state) => state,
        }
    }

    /// True when the update changed the game.
    pub fn is_updated(&self) -> bool {
        matches!(self, Transition::Updated(_))
    }
}

/// Applies `update` to `state`.
///
/// A finished game is frozen: every update returns it unmodified.
#[instrument(skip(state), fields(game_id = %state.id()))]
pub fn apply(update: Update, state: &GameState) -> Transition {
    if state.is_over() {
        debug!(result = %state.game_result(), "Game is over, ignoring update");
        return Transition::Unmodified(state.clone());
    }

    match update {
        Update::Player(player) => match assign_player(player, state.players()) {
            Some(players) => Transition::Updated(state.with_players(players)),
            None => {
                debug!("Both slots filled, player not seated");
                Transition::Unmodified(state.clone())
            }
        },
        Update::Players(players) => {
            if state.players().is_empty() {
                Transition::Updated(state.with_players(players))
            } else {
                debug!("Slots already assigned, ignoring player pair");
                Transition::Unmodified(state.clone())
            }
        }
        Update::Move(mv) => apply_move(mv, state),
    }
}

/// Seats `player` in the X slot if open, otherwise the O slot.
///
/// Returns `None` when both slots are taken.
pub fn assign_player(player: Player, players: &GamePlayers) -> Option<GamePlayers> {
    match (players.player_x(), players.player_o()) {
        (None, existing) => Some(GamePlayers::new(Some(player), existing.cloned())),
        (Some(existing), None) => Some(GamePlayers::new(Some(existing.clone()), Some(player))),
        (Some(_), Some(_)) => None,
    }
}

/// Returns a new board with the move's token written at its position.
pub fn apply_move_to_board(mv: &Move, board: &Board) -> Board {
    board.with_token(mv.position(), mv.token())
}

fn apply_move(mv: Move, state: &GameState) -> Transition {
    // Writing over an occupied cell would either change nothing or break
    // board monotonicity.
    if !state.board().is_empty(mv.position()) {
        debug!(mv = %mv, "Target cell already occupied, move has no effect");
        return Transition::Unmodified(state.clone());
    }

    let board = apply_move_to_board(&mv, state.board());
    let result = determine_game_result(&board);
    info!(mv = %mv, result = %result, "Move applied");
    Transition::Updated(state.with_move(mv, board, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameResult, Position, Token};

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    fn new_game() -> GameState {
        GameState::from_player(Player::new("abc", "Joe"), "game")
    }

    #[test]
    fn test_player_fills_o_slot() {
        let game = new_game();
        let next = apply(Update::Player(Player::new("def", "Alice")), &game);
        assert!(next.is_updated());
        assert_eq!(
            next.state().players().player_o().map(Player::id),
            Some("def")
        );
        assert_eq!(next.state().players().player_x().map(Player::id), Some("abc"));
    }

    #[test]
    fn test_player_prefers_x_slot() {
        let game = GameState::from_parts(
            "g",
            GamePlayers::default(),
            Board::new(),
            Token::X,
            None,
            GameResult::Pending,
        );
        let next = apply(Player::new("def", "Alice").into(), &game).into_state();
        assert_eq!(next.players().player_x().map(Player::id), Some("def"));
        assert!(next.players().player_o().is_none());
    }

    #[test]
    fn test_player_ignored_when_full() {
        let game = apply(Player::new("def", "Alice").into(), &new_game()).into_state();
        let next = apply(Player::new("ghi", "Bob").into(), &game);
        assert_eq!(next, Transition::Unmodified(game));
    }

    #[test]
    fn test_players_only_replace_empty_pair() {
        let pair = GamePlayers::new(
            Some(Player::new("a", "A")),
            Some(Player::new("b", "B")),
        );
        let game = new_game();
        assert!(!apply(pair.clone().into(), &game).is_updated());

        let empty = GameState::from_parts(
            "g",
            GamePlayers::default(),
            Board::new(),
            Token::X,
            None,
            GameResult::Pending,
        );
        let next = apply(pair.clone().into(), &empty);
        assert!(next.is_updated());
        assert_eq!(next.state().players(), &pair);
    }

    #[test]
    fn test_move_flips_turn_and_records() {
        let game = new_game();
        let mv = Move::new(Token::X, pos(0, 0));
        let next = apply(mv.into(), &game).into_state();
        assert_eq!(next.board().get(pos(0, 0)), Some(Token::X));
        assert_eq!(next.next_move(), Token::O);
        assert_eq!(next.newest_move(), Some(mv));
        assert_eq!(next.game_result(), GameResult::Pending);
        // Input board untouched.
        assert!(game.board().is_empty(pos(0, 0)));
        assert_eq!(game.next_move(), Token::X);
    }

    #[test]
    fn test_move_on_occupied_cell_is_noop() {
        let game = apply(Move::new(Token::X, pos(1, 1)).into(), &new_game()).into_state();
        let next = apply(Move::new(Token::O, pos(1, 1)).into(), &game);
        assert_eq!(next, Transition::Unmodified(game));
    }

    #[test]
    fn test_finished_game_is_frozen() {
        let board = Board::from_rows([
            [Some(Token::O), Some(Token::O), Some(Token::O)],
            [Some(Token::X), Some(Token::X), None],
            [Some(Token::X), None, None],
        ]);
        let game = GameState::from_parts(
            "done",
            GamePlayers::new(Some(Player::new("a", "A")), None),
            board,
            Token::X,
            None,
            GameResult::OWins,
        );
        for update in [
            Update::Player(Player::new("b", "B")),
            Update::Players(GamePlayers::default()),
            Update::Move(Move::new(Token::X, pos(2, 2))),
        ] {
            assert_eq!(apply(update, &game), Transition::Unmodified(game.clone()));
        }
    }
}
