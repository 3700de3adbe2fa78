//! Orchestrators composing validation, transitions, and storage.
//!
//! Every operation is: read stored state, validate the request, apply the
//! transition, persist, return. Validation failures short-circuit before
//! anything is written.

use crate::error::{GameError, GameOutcome, PlayerError, PlayerOutcome};
use crate::request::{
    parse_game_create_request, parse_player_create_request, parse_update_request,
    validate_existing_game,
};
use crate::store::{GameStore, StoreError};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tictac_engine::{GameState, Player, Transition, apply};
use tracing::{debug, info, instrument};

/// Entry point for game and player operations over an injected store.
///
/// Clones share the store and the write lock. Game writes hold the lock
/// across read, validate, apply and persist, so concurrent updates to the
/// same game are serialized within one process.
#[derive(Debug, Clone)]
pub struct GameService {
    store: Arc<dyn GameStore>,
    write_lock: Arc<Mutex<()>>,
}

impl GameService {
    /// Creates a service over `store`.
    #[instrument(skip(store))]
    pub fn new(store: Arc<dyn GameStore>) -> Self {
        info!("Creating game service");
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The backing store.
    pub fn store(&self) -> &dyn GameStore {
        self.store.as_ref()
    }

    /// Starts a new game with the caller as player X.
    #[instrument(skip(self))]
    pub fn create_game(&self, user_id: Option<&str>) -> GameOutcome<GameState> {
        let _guard = self.write_lock.lock().map_err(StoreError::from)?;
        let game = parse_game_create_request(user_id, self.store())?;
        self.store.update_game(game.clone())?;
        info!(game_id = %game.id(), "Game created");
        Ok(game)
    }

    /// Applies a move or a player join to the game at `game_id`.
    ///
    /// Returns the game as stored afterwards. An update the engine leaves
    /// unmodified is not written back.
    #[instrument(skip(self, payload))]
    pub fn update_game(&self, game_id: &str, payload: &Value) -> GameOutcome<GameState> {
        let _guard = self.write_lock.lock().map_err(StoreError::from)?;
        let game = validate_existing_game(payload, game_id, self.store())?;
        let update = parse_update_request(payload, &game, self.store())?;

        match apply(update, &game) {
            Transition::Updated(next) => {
                self.store.update_game(next.clone())?;
                info!(
                    next_move = %next.next_move(),
                    result = %next.game_result(),
                    "Game updated"
                );
                Ok(next)
            }
            Transition::Unmodified(same) => {
                debug!("Update left game unchanged");
                Ok(same)
            }
        }
    }

    /// Fetches one game.
    #[instrument(skip(self))]
    pub fn get_game(&self, game_id: &str) -> GameOutcome<GameState> {
        Ok(self
            .store
            .get_game(game_id)?
            .ok_or(GameError::GameNotFound)?)
    }

    /// Lists all games, or only those involving `player_id`.
    #[instrument(skip(self))]
    pub fn list_games(&self, player_id: Option<&str>) -> GameOutcome<Vec<GameState>> {
        let games = match player_id {
            Some(id) => self.store.get_player_games(id)?,
            None => self.store.get_games()?,
        };
        debug!(count = games.len(), "Listed games");
        Ok(games)
    }

    /// Lists the games `player_id` takes part in.
    ///
    /// An unknown player simply has no games.
    pub fn list_player_games(&self, player_id: &str) -> GameOutcome<Vec<GameState>> {
        self.list_games(Some(player_id))
    }

    /// Registers a new player from a registration payload.
    #[instrument(skip(self, payload))]
    pub fn create_player(&self, payload: &Value) -> PlayerOutcome<Player> {
        let player = parse_player_create_request(payload)?;
        self.store.add_player(player.clone())?;
        info!(player_id = %player.id(), name = %player.name(), "Player registered");
        Ok(player)
    }

    /// Fetches one player.
    #[instrument(skip(self))]
    pub fn get_player(&self, player_id: &str) -> PlayerOutcome<Player> {
        Ok(self
            .store
            .get_player(player_id)?
            .ok_or(PlayerError::PlayerNotFound)?)
    }

    /// Lists every registered player.
    #[instrument(skip(self))]
    pub fn list_players(&self) -> PlayerOutcome<Vec<Player>> {
        Ok(self.store.get_players()?)
    }
}
