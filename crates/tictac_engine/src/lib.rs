//! Tic-tac-toe game state and transition rules.
//!
//! # Architecture
//!
//! - **Types**: immutable value types for players, boards, moves and games
//! - **Rules**: win and draw detection over a board
//! - **Engine**: pure transitions from one [`GameState`] to the next
//!
//! # Example
//!
//! ```
//! use tictac_engine::{GameResult, GameState, Move, Player, Position, Token, Transition, apply};
//!
//! let game = GameState::from_player(Player::new("abc", "Joe"), "game-1");
//! let mv = Move::new(Token::X, Position::new(0, 0).unwrap());
//!
//! let Transition::Updated(next) = apply(mv.into(), &game) else {
//!     panic!("move on an empty cell always applies");
//! };
//! assert_eq!(next.next_move(), Token::O);
//! assert_eq!(next.game_result(), GameResult::Pending);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
pub mod rules;
mod types;

pub use engine::{Transition, Update, apply, apply_move_to_board, assign_player};
pub use rules::determine_game_result;
pub use types::{
    BOARD_SIZE, Board, GamePlayers, GameResult, GameState, InvalidTokenCode, Move, Player,
    Position, PositionOutOfRange, Token,
};
