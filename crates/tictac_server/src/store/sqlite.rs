//! SQLite storage backend.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tictac_engine::{GameState, Player};
use tracing::{debug, info, instrument};

use super::models::{GameRow, NewPlayerRow, PlayerRow};
use super::{GameStore, StoreError, StoreErrorKind, schema};

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Store backed by a SQLite database file.
///
/// A connection is opened per operation, so the handle itself is cheap to
/// clone and share across request tasks. The database runs in WAL mode and
/// every connection waits a few seconds for a competing writer.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Opens the database at `db_path`, creating it and applying the schema
    /// if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, StoreError> {
        info!(path = %db_path, "Opening SQLite store");
        let store = Self { db_path };
        let mut conn = store.connection()?;
        conn.batch_execute("PRAGMA journal_mode = WAL;")?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(StoreErrorKind::Migration, e.to_string()))?;
        info!(count = applied.len(), "Applied pending migrations");
        Ok(store)
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path).map_err(|e| {
            StoreError::new(
                StoreErrorKind::Connection,
                format!("Failed to connect to '{}': {}", self.db_path, e),
            )
        })?;
        conn.batch_execute(&format!("PRAGMA busy_timeout = {};", BUSY_TIMEOUT_MS))?;
        Ok(conn)
    }
}

impl GameStore for SqliteStore {
    #[instrument(skip(self))]
    fn get_player(&self, player_id: &str) -> Result<Option<Player>, StoreError> {
        let mut conn = self.connection()?;
        let row = schema::players::table
            .filter(schema::players::id.eq(player_id))
            .select(PlayerRow::as_select())
            .first(&mut conn)
            .optional()?;
        if row.is_none() {
            debug!("Player not found");
        }
        Ok(row.map(Player::from))
    }

    #[instrument(skip(self))]
    fn get_players(&self) -> Result<Vec<Player>, StoreError> {
        let mut conn = self.connection()?;
        let rows = schema::players::table
            .order(schema::players::created_at.asc())
            .then_order_by(schema::players::id.asc())
            .select(PlayerRow::as_select())
            .load(&mut conn)?;
        info!(count = rows.len(), "Players loaded");
        Ok(rows.into_iter().map(Player::from).collect())
    }

    #[instrument(skip(self))]
    fn get_game(&self, game_id: &str) -> Result<Option<GameState>, StoreError> {
        let mut conn = self.connection()?;
        let row = schema::games::table
            .filter(schema::games::id.eq(game_id))
            .select(GameRow::as_select())
            .first(&mut conn)
            .optional()?;
        row.as_ref().map(GameRow::decode).transpose()
    }

    #[instrument(skip(self))]
    fn get_games(&self) -> Result<Vec<GameState>, StoreError> {
        let mut conn = self.connection()?;
        let rows = schema::games::table
            .order(schema::games::id.asc())
            .select(GameRow::as_select())
            .load(&mut conn)?;
        info!(count = rows.len(), "Games loaded");
        rows.iter().map(GameRow::decode).collect()
    }

    /// Uses the denormalized player columns instead of a full scan.
    #[instrument(skip(self))]
    fn get_player_games(&self, player_id: &str) -> Result<Vec<GameState>, StoreError> {
        let mut conn = self.connection()?;
        let rows = schema::games::table
            .filter(
                schema::games::player_x_id
                    .eq(player_id)
                    .or(schema::games::player_o_id.eq(player_id)),
            )
            .order(schema::games::id.asc())
            .select(GameRow::as_select())
            .load(&mut conn)?;
        debug!(count = rows.len(), "Player games loaded");
        rows.iter().map(GameRow::decode).collect()
    }

    #[instrument(skip(self, player), fields(player_id = %player.id()))]
    fn add_player(&self, player: Player) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        diesel::insert_into(schema::players::table)
            .values(NewPlayerRow::from(&player))
            .execute(&mut conn)?;
        info!(name = %player.name(), "Player stored");
        Ok(())
    }

    #[instrument(skip(self, game), fields(game_id = %game.id()))]
    fn update_game(&self, game: GameState) -> Result<(), StoreError> {
        let row = GameRow::encode(&game)?;
        let mut conn = self.connection()?;
        diesel::replace_into(schema::games::table)
            .values(&row)
            .execute(&mut conn)?;
        debug!(result = %row.game_result(), "Game stored");
        Ok(())
    }
}
