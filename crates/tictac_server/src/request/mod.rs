//! Request validation and parsing.
//!
//! Converts untyped JSON payloads plus current stored state into typed
//! domain values, or into exactly one rejection. Checks run in a fixed
//! order and the first failing check decides the outcome.

mod game;
mod player;

pub use game::{
    parse_game_create_request, parse_move_request, parse_player_update_request,
    parse_update_request, validate_existing_game,
};
pub use player::parse_player_create_request;

/// Top-level envelope key.
pub const DATA_KEY: &str = "data";
/// Envelope resource type key.
pub const TYPE_KEY: &str = "type";
/// Envelope resource id key.
pub const ID_KEY: &str = "id";
/// Envelope attributes key.
pub const ATTRIBUTES_KEY: &str = "attributes";
/// Envelope relationships key.
pub const RELATIONSHIPS_KEY: &str = "relationships";
/// Resource type of games.
pub const GAMES_TYPE: &str = "games";
/// Resource type of players.
pub const PLAYERS_TYPE: &str = "players";

/// Generates a fresh resource id.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Returns the envelope object if it is present and non-empty.
fn envelope(payload: &serde_json::Value) -> Option<&serde_json::Map<String, serde_json::Value>> {
    payload
        .get(DATA_KEY)
        .and_then(serde_json::Value::as_object)
        .filter(|data| !data.is_empty())
}
