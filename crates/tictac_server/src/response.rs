//! JSON:API style response documents.
//!
//! Documents borrow from the domain values they describe and are turned
//! into JSON by `serde`. Boards serialize as rows of `null`, `0` (O) or
//! `1` (X).

use crate::error::ApiError;
use crate::request::{GAMES_TYPE, PLAYERS_TYPE};
use derive_getters::Getters;
use serde::Serialize;
use tictac_engine::{Board, GameResult, GameState, Move, Player, Token};

/// Top-level document wrapping a single resource or a collection.
#[derive(Debug, Clone, Serialize)]
pub struct Document<T> {
    data: T,
    links: Option<Links>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<Meta>,
}

/// Hyperlinks attached to a document or relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Links {
    #[serde(rename = "self")]
    self_link: String,
}

/// Pagination summary for collections. Everything fits on one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meta {
    page: usize,
    previous: Option<usize>,
    next: Option<usize>,
    count: usize,
}

impl Meta {
    fn single_page(count: usize) -> Self {
        Self {
            page: 1,
            previous: None,
            next: None,
            count,
        }
    }
}

/// A game resource.
#[derive(Debug, Clone, Serialize)]
pub struct GameResource<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    attributes: GameAttributes<'a>,
    relationships: GameRelationships<'a>,
}

#[derive(Debug, Clone, Serialize)]
struct GameAttributes<'a> {
    board: &'a Board,
    next_move: Token,
    newest_move: Option<Move>,
    game_result: GameResult,
}

#[derive(Debug, Clone, Serialize)]
struct GameRelationships<'a> {
    player_x: Option<Relationship<'a>>,
    player_o: Option<Relationship<'a>>,
}

#[derive(Debug, Clone, Serialize)]
struct Relationship<'a> {
    data: ResourceIdentifier<'a>,
    links: Links,
}

#[derive(Debug, Clone, Serialize)]
struct ResourceIdentifier<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    id: &'a str,
}

/// A player resource.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerResource<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    attributes: PlayerAttributes<'a>,
}

#[derive(Debug, Clone, Serialize)]
struct PlayerAttributes<'a> {
    name: &'a str,
}

/// Document carrying one rejection.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDocument {
    errors: Vec<ErrorObject>,
}

#[derive(Debug, Clone, Serialize)]
struct ErrorObject {
    detail: String,
    code: &'static str,
    source: ErrorSource,
    status: String,
}

#[derive(Debug, Clone, Serialize)]
struct ErrorSource {
    pointer: Option<&'static str>,
}

impl ErrorDocument {
    /// Describes `err` with its detail, tag, pointer and status.
    pub fn new<E: ApiError>(err: &E) -> Self {
        Self {
            errors: vec![ErrorObject {
                detail: err.to_string(),
                code: err.code(),
                source: ErrorSource {
                    pointer: err.pointer(),
                },
                status: err.status().to_string(),
            }],
        }
    }
}

/// Builds documents whose links are rooted at `base_url`.
#[derive(Debug, Clone, Getters)]
pub struct ResponseFormatter {
    base_url: String,
}

impl ResponseFormatter {
    /// Creates a formatter. A trailing slash on `base_url` is dropped.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    fn link(&self, path: impl std::fmt::Display) -> Links {
        Links {
            self_link: format!("{}{}", self.base_url, path),
        }
    }

    fn relationship<'a>(&self, player: Option<&'a Player>) -> Option<Relationship<'a>> {
        player.map(|player| Relationship {
            data: ResourceIdentifier {
                kind: PLAYERS_TYPE,
                id: player.id(),
            },
            links: self.link(format_args!("/api/players/{}", player.id())),
        })
    }

    /// The resource object for one game.
    pub fn game_resource<'a>(&self, game: &'a GameState) -> GameResource<'a> {
        GameResource {
            id: game.id(),
            kind: GAMES_TYPE,
            attributes: GameAttributes {
                board: game.board(),
                next_move: game.next_move(),
                newest_move: game.newest_move(),
                game_result: game.game_result(),
            },
            relationships: GameRelationships {
                player_x: self.relationship(game.players().player_x()),
                player_o: self.relationship(game.players().player_o()),
            },
        }
    }

    /// Document for a single game.
    pub fn game<'a>(&self, game: &'a GameState) -> Document<GameResource<'a>> {
        Document {
            data: self.game_resource(game),
            links: Some(self.link(format_args!("/api/games/{}", game.id()))),
            meta: None,
        }
    }

    /// Document for a list of games. An empty list carries no links.
    pub fn games<'a>(&self, games: &'a [GameState]) -> Document<Vec<GameResource<'a>>> {
        if games.is_empty() {
            return Document {
                data: Vec::new(),
                links: None,
                meta: None,
            };
        }
        Document {
            data: games.iter().map(|game| self.game_resource(game)).collect(),
            links: Some(self.link("/api/games")),
            meta: Some(Meta::single_page(games.len())),
        }
    }

    /// The resource object for one player.
    pub fn player_resource<'a>(&self, player: &'a Player) -> PlayerResource<'a> {
        PlayerResource {
            id: player.id(),
            kind: PLAYERS_TYPE,
            attributes: PlayerAttributes {
                name: player.name(),
            },
        }
    }

    /// Document for a single player.
    pub fn player<'a>(&self, player: &'a Player) -> Document<PlayerResource<'a>> {
        Document {
            data: self.player_resource(player),
            links: Some(self.link(format_args!("/api/players/{}", player.id()))),
            meta: None,
        }
    }

    /// Document for a list of players.
    pub fn players<'a>(&self, players: &'a [Player]) -> Document<Vec<PlayerResource<'a>>> {
        Document {
            data: players
                .iter()
                .map(|player| self.player_resource(player))
                .collect(),
            links: Some(self.link("/api/players")),
            meta: Some(Meta::single_page(players.len())),
        }
    }
}
