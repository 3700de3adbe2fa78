//! Player request parsing.

use super::{ATTRIBUTES_KEY, PLAYERS_TYPE, TYPE_KEY, envelope, new_id};
use crate::error::PlayerError;
use serde_json::Value;
use tictac_engine::Player;
use tracing::{debug, instrument};

/// Parses a player registration payload into a new [`Player`] with a fresh id.
///
/// # Errors
///
/// - [`PlayerError::InvalidRequestBody`] when the envelope is missing or empty
/// - [`PlayerError::WrongResourceType`] when the type is not `players`
/// - [`PlayerError::MissingPlayerName`] when `attributes.name` is not a non-empty string
#[instrument(skip(payload))]
pub fn parse_player_create_request(payload: &Value) -> Result<Player, PlayerError> {
    let data = envelope(payload).ok_or(PlayerError::InvalidRequestBody)?;

    if data.get(TYPE_KEY).and_then(Value::as_str) != Some(PLAYERS_TYPE) {
        return Err(PlayerError::WrongResourceType);
    }

    let name = data
        .get(ATTRIBUTES_KEY)
        .and_then(|attributes| attributes.get("name"))
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .ok_or(PlayerError::MissingPlayerName)?;

    let player = Player::new(new_id(), name);
    debug!(player_id = %player.id(), name = %player.name(), "Parsed new player");
    Ok(player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_request() {
        let player = parse_player_create_request(&json!({
            "data": {"type": "players", "attributes": {"name": "Joe"}}
        }))
        .unwrap();
        assert_eq!(player.name(), "Joe");
        assert!(!player.id().is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let payload = json!({"data": {"type": "players", "attributes": {"name": "Joe"}}});
        let a = parse_player_create_request(&payload).unwrap();
        let b = parse_player_create_request(&payload).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_invalid_bodies() {
        for payload in [
            json!({}),
            json!({"data": {}}),
            json!({"data": []}),
            json!({"data": "players"}),
            json!("players"),
        ] {
            assert_eq!(
                parse_player_create_request(&payload),
                Err(PlayerError::InvalidRequestBody),
                "{payload}"
            );
        }
    }

    #[test]
    fn test_wrong_type() {
        for payload in [
            json!({"data": {"type": "games", "attributes": {"name": "Joe"}}}),
            json!({"data": {"attributes": {"name": "Joe"}}}),
        ] {
            assert_eq!(
                parse_player_create_request(&payload),
                Err(PlayerError::WrongResourceType)
            );
        }
    }

    #[test]
    fn test_missing_name() {
        for payload in [
            json!({"data": {"type": "players"}}),
            json!({"data": {"type": "players", "attributes": {}}}),
            json!({"data": {"type": "players", "attributes": {"name": 7}}}),
            json!({"data": {"type": "players", "attributes": {"name": ""}}}),
            json!({"data": {"type": "players", "attributes": {"nom": "Joe"}}}),
        ] {
            assert_eq!(
                parse_player_create_request(&payload),
                Err(PlayerError::MissingPlayerName),
                "{payload}"
            );
        }
    }
}
