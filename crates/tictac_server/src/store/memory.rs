//! In-memory storage backend.

use super::{GameStore, StoreError};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tictac_engine::{Board, GamePlayers, GameResult, GameState, Move, Player, Position, Token};
use tracing::{debug, info, instrument};

#[derive(Debug, Default)]
struct Tables {
    players: BTreeMap<String, Player>,
    games: BTreeMap<String, GameState>,
}

/// Process-local store. Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory store");
        Self::default()
    }

    /// Creates a store holding a small fixture of players and games.
    ///
    /// Players `abc` (Joe) and `def` (Alice). Games:
    /// - `abcd`: both seated, empty board, X to move
    /// - `ghijkl`: both seated, X at `[0, 0]`, O to move
    /// - `zyx`: only Joe seated, empty board
    /// - `finished_game`: won by O
    #[instrument]
    pub fn seeded() -> Self {
        let joe = Player::new("abc", "Joe");
        let alice = Player::new("def", "Alice");
        let both = GamePlayers::new(Some(joe.clone()), Some(alice.clone()));
        let corner = Position::new(0, 0).map(|pos| Move::new(Token::X, pos));

        use Token::{O, X};
        let games = [
            GameState::from_parts("abcd", both.clone(), Board::new(), X, None, GameResult::Pending),
            GameState::from_parts(
                "ghijkl",
                both.clone(),
                Board::from_rows([[Some(X), None, None], [None; 3], [None; 3]]),
                O,
                corner,
                GameResult::Pending,
            ),
            GameState::from_player(joe.clone(), "zyx"),
            GameState::from_parts(
                "finished_game",
                both,
                Board::from_rows([
                    [Some(O), Some(X), Some(O)],
                    [Some(X), Some(O), Some(X)],
                    [Some(X), Some(X), Some(O)],
                ]),
                X,
                Position::new(2, 2).map(|pos| Move::new(O, pos)),
                GameResult::OWins,
            ),
        ];

        let tables = Tables {
            players: [joe, alice]
                .into_iter()
                .map(|p| (p.id().to_string(), p))
                .collect(),
            games: games
                .into_iter()
                .map(|g| (g.id().to_string(), g))
                .collect(),
        };
        info!(
            players = tables.players.len(),
            games = tables.games.len(),
            "Created seeded in-memory store"
        );
        Self {
            tables: Arc::new(Mutex::new(tables)),
        }
    }
}

impl GameStore for MemoryStore {
    #[instrument(skip(self))]
    fn get_player(&self, player_id: &str) -> Result<Option<Player>, StoreError> {
        let tables = self.tables.lock()?;
        let player = tables.players.get(player_id).cloned();
        if player.is_none() {
            debug!(player_id, "Player not found");
        }
        Ok(player)
    }

    #[instrument(skip(self))]
    fn get_players(&self) -> Result<Vec<Player>, StoreError> {
        let tables = self.tables.lock()?;
        Ok(tables.players.values().cloned().collect())
    }

    #[instrument(skip(self))]
    fn get_game(&self, game_id: &str) -> Result<Option<GameState>, StoreError> {
        let tables = self.tables.lock()?;
        let game = tables.games.get(game_id).cloned();
        if game.is_none() {
            debug!(game_id, "Game not found");
        }
        Ok(game)
    }

    #[instrument(skip(self))]
    fn get_games(&self) -> Result<Vec<GameState>, StoreError> {
        let tables = self.tables.lock()?;
        Ok(tables.games.values().cloned().collect())
    }

    #[instrument(skip(self, player), fields(player_id = %player.id()))]
    fn add_player(&self, player: Player) -> Result<(), StoreError> {
        let mut tables = self.tables.lock()?;
        tables.players.insert(player.id().to_string(), player);
        debug!("Player stored");
        Ok(())
    }

    #[instrument(skip(self, game), fields(game_id = %game.id()))]
    fn update_game(&self, game: GameState) -> Result<(), StoreError> {
        let mut tables = self.tables.lock()?;
        tables.games.insert(game.id().to_string(), game);
        debug!("Game stored");
        Ok(())
    }
}
