//! Core domain types for tic-tac-toe game tracking.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: usize = 3;

/// A mark placed on the board.
///
/// On the wire a token is its numeric code: `O = 0`, `X = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Token {
    /// Player O (moves second).
    O,
    /// Player X (always moves first).
    X,
}

impl Token {
    /// Returns the opposing token.
    pub fn opponent(self) -> Self {
        match self {
            Token::X => Token::O,
            Token::O => Token::X,
        }
    }

    /// Numeric wire code of this token.
    pub fn code(self) -> u8 {
        match self {
            Token::O => 0,
            Token::X => 1,
        }
    }

    /// Parses a token from its numeric wire code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Token::O),
            1 => Some(Token::X),
            _ => None,
        }
    }
}

/// A numeric token code outside `{0, 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Invalid token code: {}", _0)]
pub struct InvalidTokenCode(#[error(not(source))] pub u8);

impl From<Token> for u8 {
    fn from(token: Token) -> Self {
        token.code()
    }
}

impl TryFrom<u8> for Token {
    type Error = InvalidTokenCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Token::from_code(code).ok_or(InvalidTokenCode(code))
    }
}

/// A cell coordinate guaranteed to lie on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "[usize; 2]", try_from = "[usize; 2]")]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    /// Creates a position, returning `None` if either coordinate is off the board.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    /// Row index (0-2).
    pub fn row(&self) -> usize {
        self.row
    }

    /// Column index (0-2).
    pub fn col(&self) -> usize {
        self.col
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}

/// A coordinate pair that does not fit on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Position [{}, {}] is off the board", _0, _1)]
pub struct PositionOutOfRange(#[error(not(source))] pub usize, pub usize);

impl From<Position> for [usize; 2] {
    fn from(position: Position) -> Self {
        [position.row, position.col]
    }
}

impl TryFrom<[usize; 2]> for Position {
    type Error = PositionOutOfRange;

    fn try_from([row, col]: [usize; 2]) -> Result<Self, Self::Error> {
        Position::new(row, col).ok_or(PositionOutOfRange(row, col))
    }
}

/// A registered player. Identity is the id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    id: String,
    name: String,
}

impl Player {
    /// Creates a player with the given id and display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Opaque player identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The two player slots of a game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePlayers {
    player_x: Option<Player>,
    player_o: Option<Player>,
}

impl GamePlayers {
    /// Creates a slot pair.
    pub fn new(player_x: Option<Player>, player_o: Option<Player>) -> Self {
        Self { player_x, player_o }
    }

    /// Player holding the X slot.
    pub fn player_x(&self) -> Option<&Player> {
        self.player_x.as_ref()
    }

    /// Player holding the O slot.
    pub fn player_o(&self) -> Option<&Player> {
        self.player_o.as_ref()
    }

    /// True when neither slot is filled.
    pub fn is_empty(&self) -> bool {
        self.player_x.is_none() && self.player_o.is_none()
    }

    /// True when both slots are filled.
    pub fn is_full(&self) -> bool {
        self.player_x.is_some() && self.player_o.is_some()
    }

    /// True when either slot holds the player with `player_id`.
    pub fn contains(&self, player_id: &str) -> bool {
        [&self.player_x, &self.player_o]
            .into_iter()
            .flatten()
            .any(|p| p.id() == player_id)
    }
}

/// 3x3 board of optional tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Option<Token>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from explicit rows.
    pub fn from_rows(cells: [[Option<Token>; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Token at the given position, if any.
    pub fn get(&self, position: Position) -> Option<Token> {
        self.cells[position.row][position.col]
    }

    /// Checks if the cell at `position` is empty.
    pub fn is_empty(&self, position: Position) -> bool {
        self.get(position).is_none()
    }

    /// Checks if every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// Rows of the board, top to bottom.
    pub fn rows(&self) -> &[[Option<Token>; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Returns a copy of this board with `token` written at `position`.
    ///
    /// `self` is left untouched.
    #[instrument(skip(self))]
    pub fn with_token(&self, position: Position, token: Token) -> Self {
        let mut cells = self.cells;
        cells[position.row][position.col] = Some(token);
        Self { cells }
    }

    /// Formats the board as a human-readable grid.
    pub fn display(&self) -> String {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Some(token) => token.to_string(),
                        None => "_".to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A placement of a token on the board.
///
/// Only constructed once validation has confirmed the target cell is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    token: Token,
    position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(token: Token, position: Position) -> Self {
        Self { token, position }
    }

    /// Token being placed.
    pub fn token(&self) -> Token {
        self.token
    }

    /// Target cell.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.token, self.position)
    }
}

/// Outcome of a game. Once not `Pending`, it never changes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
pub enum GameResult {
    /// Game is still being played.
    #[serde(rename = "pending")]
    #[strum(serialize = "pending")]
    Pending,
    /// X completed a line.
    #[serde(rename = "x_wins")]
    #[strum(serialize = "x_wins")]
    XWins,
    /// O completed a line.
    #[serde(rename = "o_wins")]
    #[strum(serialize = "o_wins")]
    OWins,
    /// Board filled with no line completed.
    #[serde(rename = "draw")]
    #[strum(serialize = "draw")]
    Draw,
}

impl GameResult {
    /// True for every terminal result.
    pub fn is_over(self) -> bool {
        self != GameResult::Pending
    }
}

/// Complete state of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    id: String,
    players: GamePlayers,
    board: Board,
    next_move: Token,
    newest_move: Option<Move>,
    game_result: GameResult,
}

impl GameState {
    /// Creates a fresh game with `player` seated as X.
    #[instrument(skip_all, fields(player_id = %player.id()))]
    pub fn from_player(player: Player, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            players: GamePlayers::new(Some(player), None),
            board: Board::new(),
            next_move: Token::X,
            newest_move: None,
            game_result: GameResult::Pending,
        }
    }

    /// Reassembles a game from stored parts.
    pub fn from_parts(
        id: impl Into<String>,
        players: GamePlayers,
        board: Board,
        next_move: Token,
        newest_move: Option<Move>,
        game_result: GameResult,
    ) -> Self {
        Self {
            id: id.into(),
            players,
            board,
            next_move,
            newest_move,
            game_result,
        }
    }

    /// Game identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Player slots.
    pub fn players(&self) -> &GamePlayers {
        &self.players
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Token allowed to move next.
    pub fn next_move(&self) -> Token {
        self.next_move
    }

    /// Most recently accepted move.
    pub fn newest_move(&self) -> Option<Move> {
        self.newest_move
    }

    /// Current result.
    pub fn game_result(&self) -> GameResult {
        self.game_result
    }

    /// True once the result is terminal.
    pub fn is_over(&self) -> bool {
        self.game_result.is_over()
    }

    /// True when both slots are filled.
    pub fn has_all_players(&self) -> bool {
        self.players.is_full()
    }

    /// True when `player_id` holds either slot.
    pub fn involves(&self, player_id: &str) -> bool {
        self.players.contains(player_id)
    }

    pub(crate) fn with_players(&self, players: GamePlayers) -> Self {
        Self {
            players,
            ..self.clone()
        }
    }

    pub(crate) fn with_move(&self, mv: Move, board: Board, game_result: GameResult) -> Self {
        Self {
            board,
            next_move: mv.token().opponent(),
            newest_move: Some(mv),
            game_result,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_codes() {
        assert_eq!(Token::O.code(), 0);
        assert_eq!(Token::X.code(), 1);
        assert_eq!(Token::from_code(1), Some(Token::X));
        assert_eq!(Token::from_code(2), None);
    }

    #[test]
    fn test_position_bounds() {
        assert!(Position::new(2, 2).is_some());
        assert!(Position::new(3, 0).is_none());
        assert!(Position::new(0, 3).is_none());
    }

    #[test]
    fn test_with_token_leaves_input() {
        let board = Board::new();
        let pos = Position::new(1, 1).unwrap();
        let updated = board.with_token(pos, Token::X);
        assert!(board.is_empty(pos));
        assert_eq!(updated.get(pos), Some(Token::X));
    }

    #[test]
    fn test_from_player_initial_state() {
        let game = GameState::from_player(Player::new("abc", "Joe"), "g1");
        assert_eq!(game.next_move(), Token::X);
        assert_eq!(game.game_result(), GameResult::Pending);
        assert_eq!(game.players().player_x().map(Player::id), Some("abc"));
        assert!(game.players().player_o().is_none());
        assert!(game.newest_move().is_none());
        assert!(!game.board().is_full());
    }

    #[test]
    fn test_game_state_json_encoding() {
        let mut game = GameState::from_player(Player::new("abc", "Joe"), "g1");
        game = game.with_move(
            Move::new(Token::X, Position::new(0, 2).unwrap()),
            game.board().with_token(Position::new(0, 2).unwrap(), Token::X),
            GameResult::Pending,
        );
        let json = serde_json::to_value(&game).unwrap();
        assert_eq!(json["board"][0][2], 1);
        assert_eq!(json["next_move"], 0);
        assert_eq!(json["newest_move"]["position"], serde_json::json!([0, 2]));
        assert_eq!(json["game_result"], "pending");

        let decoded: GameState = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, game);
    }

    #[test]
    fn test_game_result_tags() {
        assert_eq!(GameResult::XWins.to_string(), "x_wins");
        assert_eq!("o_wins".parse::<GameResult>().unwrap(), GameResult::OWins);
        assert!(!GameResult::Pending.is_over());
        assert!(GameResult::Draw.is_over());
    }
}
