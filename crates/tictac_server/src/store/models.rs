//! Database row models.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use tictac_engine::{GameState, Player};
use tracing::instrument;

use super::{StoreError, StoreErrorKind, schema};

/// Player database row.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::players)]
pub struct PlayerRow {
    id: String,
    name: String,
    created_at: NaiveDateTime,
}

impl From<PlayerRow> for Player {
    fn from(row: PlayerRow) -> Self {
        Player::new(row.id, row.name)
    }
}

/// Insertable player row.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::players)]
pub struct NewPlayerRow {
    id: String,
    name: String,
}

impl From<&Player> for NewPlayerRow {
    fn from(player: &Player) -> Self {
        NewPlayerRow::new(player.id().to_string(), player.name().to_string())
    }
}

/// Game database row. The full state is kept as JSON in `state`; the
/// player and result columns are denormalized for querying.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, Getters)]
#[diesel(table_name = schema::games)]
pub struct GameRow {
    id: String,
    player_x_id: Option<String>,
    player_o_id: Option<String>,
    game_result: String,
    state: String,
    updated_at: NaiveDateTime,
}

impl GameRow {
    /// Encodes a game for storage.
    #[instrument(skip(game), fields(game_id = %game.id()))]
    pub fn encode(game: &GameState) -> Result<Self, StoreError> {
        Ok(Self {
            id: game.id().to_string(),
            player_x_id: game.players().player_x().map(|p| p.id().to_string()),
            player_o_id: game.players().player_o().map(|p| p.id().to_string()),
            game_result: game.game_result().to_string(),
            state: serde_json::to_string(game)?,
            updated_at: chrono::Utc::now().naive_utc(),
        })
    }

    /// Decodes the stored game.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn decode(&self) -> Result<GameState, StoreError> {
        let game: GameState = serde_json::from_str(&self.state)?;
        if game.id() != self.id {
            return Err(StoreError::new(
                StoreErrorKind::Corrupt,
                format!("Stored game '{}' carries id '{}'", self.id, game.id()),
            ));
        }
        Ok(game)
    }
}
