//! Game request parsing.

use super::{
    ATTRIBUTES_KEY, DATA_KEY, GAMES_TYPE, ID_KEY, RELATIONSHIPS_KEY, TYPE_KEY, envelope, new_id,
};
use crate::error::{GameError, GameOutcome};
use crate::store::GameStore;
use serde_json::Value;
use tictac_engine::{GameState, Move, Player, Position, Token, Update};
use tracing::{debug, instrument, warn};

const NEWEST_MOVE_KEY: &str = "newest_move";
const PLAYER_O_KEY: &str = "player_o";
const PLAYER_X_KEY: &str = "player_x";

/// Builds a fresh game for the caller identified by `user_id`.
///
/// # Errors
///
/// - [`GameError::MissingUserIdHeader`] when no identity is supplied
/// - [`GameError::PlayerDoesNotExist`] when the identity is not registered
#[instrument(skip(store))]
pub fn parse_game_create_request(
    user_id: Option<&str>,
    store: &dyn GameStore,
) -> GameOutcome<GameState> {
    let user_id = user_id.ok_or(GameError::MissingUserIdHeader)?;
    let player = store
        .get_player(user_id)?
        .ok_or(GameError::PlayerDoesNotExist)?;
    Ok(GameState::from_player(player, new_id()))
}

/// Checks the envelope of an update request and loads the addressed game.
///
/// Checks run in order: envelope shape, resource type, id agreement with
/// `path_game_id`, existence, and finally that the game is still pending.
#[instrument(skip(payload, store))]
pub fn validate_existing_game(
    payload: &Value,
    path_game_id: &str,
    store: &dyn GameStore,
) -> GameOutcome<GameState> {
    let data = envelope(payload).ok_or(GameError::InvalidRequestBody)?;

    if data.get(TYPE_KEY).and_then(Value::as_str) != Some(GAMES_TYPE) {
        return Err(GameError::WrongResourceType.into());
    }

    if data.get(ID_KEY).and_then(Value::as_str) != Some(path_game_id) {
        return Err(GameError::GameIdConflict.into());
    }

    let game = store
        .get_game(path_game_id)?
        .ok_or(GameError::GameNotFound)?;

    if game.is_over() {
        debug!(result = %game.game_result(), "Rejecting update to finished game");
        return Err(GameError::GameIsOver.into());
    }

    Ok(game)
}

/// Parses the update carried by a validated envelope.
///
/// Exactly one shape is accepted: `attributes.newest_move` without
/// relationships, or `relationships.player_o` / `relationships.player_x`
/// without attributes.
#[instrument(skip(payload, game, store), fields(game_id = %game.id()))]
pub fn parse_update_request(
    payload: &Value,
    game: &GameState,
    store: &dyn GameStore,
) -> GameOutcome<Update> {
    let data = payload.get(DATA_KEY);
    let present = |key: &str| data.and_then(|d| d.get(key)).filter(|v| !v.is_null());

    match (present(RELATIONSHIPS_KEY), present(ATTRIBUTES_KEY)) {
        (None, Some(Value::Object(attributes))) if attributes.contains_key(NEWEST_MOVE_KEY) => {
            if !game.has_all_players() {
                return Err(GameError::MissingPlayer.into());
            }
            let mv = parse_move_request(&attributes[NEWEST_MOVE_KEY], game)?;
            Ok(Update::Move(mv))
        }
        (Some(Value::Object(relationships)), None) if relationships.contains_key(PLAYER_O_KEY) => {
            let player = parse_player_update_request(&relationships[PLAYER_O_KEY], game, store)?;
            Ok(Update::Player(player))
        }
        (Some(Value::Object(relationships)), None) if relationships.contains_key(PLAYER_X_KEY) => {
            Err(GameError::GamePlayersCannotBeUpdated.into())
        }
        _ => Err(GameError::InvalidRequestBody.into()),
    }
}

/// Parses a `{token, position: [row, col]}` move against the current game.
///
/// A recognized token that is not due to move is rejected before the
/// position is looked at.
#[instrument(skip(game), fields(game_id = %game.id(), next_move = %game.next_move()))]
pub fn parse_move_request(value: &Value, game: &GameState) -> Result<Move, GameError> {
    let fields = value.as_object().ok_or(GameError::InvalidMoveRequest)?;
    let (Some(token), Some(position)) = (fields.get("token"), fields.get("position")) else {
        return Err(GameError::InvalidMoveRequest);
    };

    let token = token
        .as_u64()
        .and_then(|code| u8::try_from(code).ok())
        .and_then(Token::from_code)
        .ok_or(GameError::InvalidMoveRequest)?;

    if token != game.next_move() {
        warn!(token = %token, "Move submitted out of turn");
        return Err(GameError::NotYourTurn);
    }

    let (row, col) = match position.as_array().map(Vec::as_slice) {
        Some([row, col]) => (coordinate(row)?, coordinate(col)?),
        _ => return Err(GameError::InvalidMoveRequest),
    };

    let position = row
        .zip(col)
        .and_then(|(row, col)| Position::new(row, col))
        .ok_or(GameError::PositionOutOfBounds)?;

    if !game.board().is_empty(position) {
        return Err(GameError::PositionOccupied);
    }

    Ok(Move::new(token, position))
}

/// Reads one coordinate: `Err` if it is not a JSON integer, `Ok(None)` if
/// it is an integer off the board.
fn coordinate(value: &Value) -> Result<Option<usize>, GameError> {
    if let Some(n) = value.as_u64() {
        Ok(usize::try_from(n).ok())
    } else if value.is_i64() {
        Ok(None)
    } else {
        Err(GameError::InvalidMoveRequest)
    }
}

/// Resolves the player referenced by a `player_o` relationship.
///
/// The relationship looks like `{"data": {"type": "players", "id": "..."}}`.
#[instrument(skip(value, game, store), fields(game_id = %game.id()))]
pub fn parse_player_update_request(
    value: &Value,
    game: &GameState,
    store: &dyn GameStore,
) -> GameOutcome<Player> {
    if game.has_all_players() {
        return Err(GameError::GameIsFull.into());
    }

    let Some(player_id) = value
        .get(DATA_KEY)
        .and_then(|data| data.get(ID_KEY))
        .and_then(Value::as_str)
    else {
        return Err(GameError::PlayerDoesNotExist.into());
    };

    let player = store
        .get_player(player_id)?
        .ok_or(GameError::PlayerDoesNotExist)?;
    debug!(player_id, "Resolved player O");
    Ok(player)
}
