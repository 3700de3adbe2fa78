//! Request rejection taxonomies.
//!
//! Game and player errors are closed enumerations. Each variant knows its
//! human-readable detail, its machine tag, its status class, and the JSON
//! pointer of the request part at fault.

use crate::store::StoreError;
use derive_more::{Display, Error};

/// Status classification of a rejected request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorStatus {
    /// The request was malformed or not allowed in the current game state.
    #[display("400")]
    BadRequest,
    /// The addressed resource does not exist.
    #[display("404")]
    NotFound,
    /// The caller could not be identified.
    #[display("401")]
    Unauthorized,
}

impl ErrorStatus {
    /// HTTP status code for this class.
    pub fn code(self) -> u16 {
        match self {
            ErrorStatus::BadRequest => 400,
            ErrorStatus::NotFound => 404,
            ErrorStatus::Unauthorized => 401,
        }
    }
}

/// Common surface of [`GameError`] and [`PlayerError`] used by the formatters.
pub trait ApiError: std::error::Error + Copy + Send + Sync + 'static {
    /// Machine-readable tag (the variant name).
    fn code(&self) -> &'static str;

    /// Status classification.
    fn status(&self) -> ErrorStatus;

    /// JSON pointer into the request body, if the fault is located there.
    fn pointer(&self) -> Option<&'static str>;
}

/// Reasons a game request is rejected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Error, strum::IntoStaticStr, strum::EnumIter,
)]
pub enum GameError {
    /// No caller identity supplied.
    #[display("User-Id header must be passed")]
    MissingUserIdHeader,
    /// Payload lacks a usable resource envelope.
    #[display("Request body not valid.")]
    InvalidRequestBody,
    /// Envelope type is not `games`.
    #[display("Wrong or Missing Resource Type. Type should be 'games'.")]
    WrongResourceType,
    /// No game with the addressed id.
    #[display("Game not found")]
    GameNotFound,
    /// Envelope id differs from the route id.
    #[display("Path Id does not match Body Id or Body Id is missing")]
    GameIdConflict,
    /// The game already has a terminal result.
    #[display("Game is over")]
    GameIsOver,
    /// A move was submitted before both players were seated.
    #[display("Player O is Missing")]
    MissingPlayer,
    /// Player X is fixed at creation.
    #[display("Game Players Cannot be Updated. Start a new game.")]
    GamePlayersCannotBeUpdated,
    /// Both slots are already filled.
    #[display("Game Is Full. No players can be changed or added. Start a new game.")]
    GameIsFull,
    /// Referenced player is not registered.
    #[display("Player Does not Exist. Please register at /api/players.")]
    PlayerDoesNotExist,
    /// Target cell already holds a token.
    #[display("Board Position is already occupied. Select an empty position.")]
    PositionOccupied,
    /// Move payload is not a well-formed `{token, position}` pair.
    #[display(
        "Invalid Move Request: Your \"newest_move\" value should look something like {{\"token\": 1, \"position\": [2, 1]}}"
    )]
    InvalidMoveRequest,
    /// Coordinates outside the board.
    #[display("Position Out of GameBoard Bounds.")]
    PositionOutOfBounds,
    /// Submitted token is not the one due to move.
    #[display("Wrong Token passed in Move.")]
    NotYourTurn,
}

impl ApiError for GameError {
    fn code(&self) -> &'static str {
        self.into()
    }

    fn status(&self) -> ErrorStatus {
        match self {
            GameError::MissingUserIdHeader => ErrorStatus::Unauthorized,
            GameError::GameNotFound => ErrorStatus::NotFound,
            _ => ErrorStatus::BadRequest,
        }
    }

    fn pointer(&self) -> Option<&'static str> {
        let pointer = match self {
            GameError::MissingUserIdHeader => return None,
            GameError::InvalidRequestBody => "/data",
            GameError::WrongResourceType => "/data/type",
            GameError::GameNotFound | GameError::GameIdConflict => "/data/id",
            GameError::GameIsOver => "/data/attributes/game_result",
            GameError::MissingPlayer | GameError::GameIsFull | GameError::PlayerDoesNotExist => {
                "/data/relationships/player_o"
            }
            GameError::GamePlayersCannotBeUpdated => "/data/relationships/player_x",
            GameError::PositionOccupied | GameError::PositionOutOfBounds => {
                "/data/attributes/newest_move/position"
            }
            GameError::InvalidMoveRequest => "/data/attributes/newest_move",
            GameError::NotYourTurn => "/data/attributes/newest_move/token",
        };
        Some(pointer)
    }
}

/// Reasons a player request is rejected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Error, strum::IntoStaticStr, strum::EnumIter,
)]
pub enum PlayerError {
    /// No player with the addressed id.
    #[display("PlayerNotFound")]
    PlayerNotFound,
    /// Missing or non-string `name` attribute.
    #[display("Player name is required")]
    MissingPlayerName,
    /// Payload lacks a usable resource envelope.
    #[display("Request body not valid.")]
    InvalidRequestBody,
    /// Envelope type is not `players`.
    #[display("Wrong or Missing Resource Type. Type should be 'players'.")]
    WrongResourceType,
}

impl ApiError for PlayerError {
    fn code(&self) -> &'static str {
        self.into()
    }

    fn status(&self) -> ErrorStatus {
        match self {
            PlayerError::PlayerNotFound => ErrorStatus::NotFound,
            _ => ErrorStatus::BadRequest,
        }
    }

    fn pointer(&self) -> Option<&'static str> {
        Some(match self {
            PlayerError::PlayerNotFound => "/data/id",
            PlayerError::MissingPlayerName => "/data/attributes/name",
            PlayerError::InvalidRequestBody => "/data",
            PlayerError::WrongResourceType => "/data/type",
        })
    }
}

/// Failure of an orchestrated operation.
///
/// Rejections are caller mistakes and terminal for the request; storage
/// failures come from the backend.
#[derive(Debug)]
pub enum ServiceError<E> {
    /// The request failed validation.
    Rejected(E),
    /// The storage backend failed.
    Store(StoreError),
}

/// Outcome of a game operation.
pub type GameOutcome<T> = Result<T, ServiceError<GameError>>;

/// Outcome of a player operation.
pub type PlayerOutcome<T> = Result<T, ServiceError<PlayerError>>;

impl<E> From<StoreError> for ServiceError<E> {
    fn from(err: StoreError) -> Self {
        ServiceError::Store(err)
    }
}

impl From<GameError> for ServiceError<GameError> {
    fn from(err: GameError) -> Self {
        ServiceError::Rejected(err)
    }
}

impl From<PlayerError> for ServiceError<PlayerError> {
    fn from(err: PlayerError) -> Self {
        ServiceError::Rejected(err)
    }
}

impl<E: std::fmt::Display> std::fmt::Display for ServiceError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Rejected(err) => write!(f, "Request rejected: {}", err),
            ServiceError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for ServiceError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Rejected(err) => Some(err),
            ServiceError::Store(err) => Some(err),
        }
    }
}

impl<E> ServiceError<E> {
    /// Returns the rejection, if this is one.
    pub fn rejection(&self) -> Option<&E> {
        match self {
            ServiceError::Rejected(err) => Some(err),
            ServiceError::Store(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_game_error_codes_are_variant_names() {
        assert_eq!(GameError::NotYourTurn.code(), "NotYourTurn");
        assert_eq!(GameError::GameIsFull.code(), "GameIsFull");
    }

    #[test]
    fn test_game_error_status_classes() {
        assert_eq!(GameError::MissingUserIdHeader.status(), ErrorStatus::Unauthorized);
        assert_eq!(GameError::GameNotFound.status(), ErrorStatus::NotFound);
        for err in GameError::iter().filter(|e| {
            !matches!(e, GameError::MissingUserIdHeader | GameError::GameNotFound)
        }) {
            assert_eq!(err.status(), ErrorStatus::BadRequest, "{:?}", err);
        }
    }

    #[test]
    fn test_only_missing_header_has_no_pointer() {
        for err in GameError::iter() {
            assert_eq!(
                err.pointer().is_none(),
                err == GameError::MissingUserIdHeader,
                "{:?}",
                err
            );
        }
        assert!(PlayerError::iter().all(|e| e.pointer().is_some()));
    }

    #[test]
    fn test_player_error_status() {
        assert_eq!(PlayerError::PlayerNotFound.status().code(), 404);
        assert_eq!(PlayerError::MissingPlayerName.status().code(), 400);
    }
}
