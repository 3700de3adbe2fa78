//! Command-line interface and server configuration.

use crate::store::{GameStore, MemoryStore, SqliteStore, StoreError};
use clap::{Parser, Subcommand, ValueEnum};
use std::sync::Arc;
use tracing::{info, instrument};

/// Tictac - tic-tac-toe game tracking server
#[derive(Parser, Debug)]
#[command(name = "tictac")]
#[command(about = "Tic-tac-toe game tracking server with a JSON:API interface", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve(ServeArgs),
}

/// Storage backend selection.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    /// Process-local tables, lost on exit
    #[default]
    Memory,
    /// SQLite database file
    Sqlite,
}

/// Settings for `tictac serve`. Every flag can also come from the environment.
#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(long, env = "TICTAC_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind to
    #[arg(short, long, env = "TICTAC_PORT", default_value = "8000")]
    pub port: u16,

    /// Public base URL used in response links
    #[arg(long, env = "TICTAC_BASE_URL", default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Storage backend
    #[arg(long, env = "TICTAC_STORE", value_enum, default_value_t = StoreKind::Memory)]
    pub store: StoreKind,

    /// Path to the database file (sqlite backend only)
    #[arg(long, env = "TICTAC_DB_PATH", default_value = "tictac.db")]
    pub db_path: String,

    /// Preload the memory backend with demo players and games
    #[arg(long, env = "TICTAC_SEED")]
    pub seed: bool,
}

impl ServeArgs {
    /// Socket address to listen on.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Opens the configured storage backend.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the SQLite database cannot be opened.
    #[instrument(skip(self), fields(store = ?self.store))]
    pub fn open_store(&self) -> Result<Arc<dyn GameStore>, StoreError> {
        let store: Arc<dyn GameStore> = match self.store {
            StoreKind::Memory if self.seed => Arc::new(MemoryStore::seeded()),
            StoreKind::Memory => Arc::new(MemoryStore::new()),
            StoreKind::Sqlite => Arc::new(SqliteStore::open(self.db_path.clone())?),
        };
        info!("Storage backend ready");
        Ok(store)
    }
}
