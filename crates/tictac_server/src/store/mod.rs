//! Storage port and its backends.
//!
//! The core only talks to [`GameStore`]. Backends are handed to the
//! orchestrators explicitly; there is no process-wide store.

mod error;
mod memory;
mod models;
mod schema; // Diesel generated schema - internal use only
mod sqlite;

pub use error::{StoreError, StoreErrorKind};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use tictac_engine::{GameState, Player};
use tracing::{debug, instrument};

/// Read/write interface over players and games.
///
/// There are no delete operations: players are append-only, games are
/// overwritten in place by id.
pub trait GameStore: Send + Sync + std::fmt::Debug {
    /// Looks up a player by id.
    fn get_player(&self, player_id: &str) -> Result<Option<Player>, StoreError>;

    /// Lists every registered player.
    fn get_players(&self) -> Result<Vec<Player>, StoreError>;

    /// Looks up a game by id.
    fn get_game(&self, game_id: &str) -> Result<Option<GameState>, StoreError>;

    /// Lists every game.
    fn get_games(&self) -> Result<Vec<GameState>, StoreError>;

    /// Lists games where `player_id` holds either slot.
    ///
    /// The default is a full scan over [`GameStore::get_games`].
    #[instrument(skip(self))]
    fn get_player_games(&self, player_id: &str) -> Result<Vec<GameState>, StoreError> {
        let games: Vec<_> = self
            .get_games()?
            .into_iter()
            .filter(|game| game.involves(player_id))
            .collect();
        debug!(count = games.len(), "Scanned games for player");
        Ok(games)
    }

    /// Registers a player.
    fn add_player(&self, player: Player) -> Result<(), StoreError>;

    /// Inserts or overwrites a game by id.
    fn update_game(&self, game: GameState) -> Result<(), StoreError>;
}
