//! Tictac server library - tic-tac-toe game tracking over a JSON:API interface
//!
//! Players register, start games, join open games, and submit moves. Rule
//! enforcement lives in [`tictac_engine`]; this crate validates requests,
//! orchestrates transitions, persists them, and formats responses.
//!
//! # Architecture
//!
//! - **Request**: payload validation with a fixed check order
//! - **Service**: read, validate, apply, persist
//! - **Store**: storage port with memory and SQLite backends
//! - **Response**: JSON:API documents and error objects
//! - **Http**: axum router over the service
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tictac_server::{GameService, MemoryStore};
//!
//! let service = GameService::new(Arc::new(MemoryStore::seeded()));
//! let game = service.create_game(Some("abc")).unwrap();
//! assert_eq!(game.players().player_x().map(|p| p.id()), Some("abc"));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod error;
mod http;
mod request;
mod response;
mod service;
mod store;

// Crate-level exports - Configuration
pub use cli::{Cli, Command, ServeArgs, StoreKind};

// Crate-level exports - Errors
pub use error::{
    ApiError, ErrorStatus, GameError, GameOutcome, PlayerError, PlayerOutcome, ServiceError,
};

// Crate-level exports - HTTP surface
pub use http::{AppState, USER_ID_HEADER, router};

// Crate-level exports - Request parsing
pub use request::{
    new_id, parse_game_create_request, parse_move_request, parse_player_create_request,
    parse_player_update_request, parse_update_request, validate_existing_game,
};

// Crate-level exports - Responses
pub use response::{Document, ErrorDocument, GameResource, PlayerResource, ResponseFormatter};

// Crate-level exports - Orchestration
pub use service::GameService;

// Crate-level exports - Storage
pub use store::{GameStore, MemoryStore, SqliteStore, StoreError, StoreErrorKind};
