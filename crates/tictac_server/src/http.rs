//! HTTP surface over [`GameService`].

use crate::error::{ApiError, ServiceError};
use crate::response::{ErrorDocument, ResponseFormatter};
use crate::service::GameService;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Request, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::{debug, error, info, warn};

/// Header identifying the caller when creating a game.
pub const USER_ID_HEADER: &str = "user-id";

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    service: GameService,
    formatter: Arc<ResponseFormatter>,
}

impl AppState {
    /// Bundles the service with the formatter used for its responses.
    pub fn new(service: GameService, formatter: ResponseFormatter) -> Self {
        Self {
            service,
            formatter: Arc::new(formatter),
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/players", get(list_players).post(create_player))
        .route("/api/players/{player_id}", get(get_player))
        .route("/api/players/{player_id}/games", get(list_player_games))
        .route("/api/games", get(list_games).post(create_game))
        .route("/api/games/{game_id}", get(get_game).patch(update_game))
        .layer(ServiceBuilder::new().map_request(log_request))
        .with_state(state)
}

fn log_request(req: Request) -> Request {
    info!(
        method = %req.method(),
        uri = %req.uri(),
        "Incoming HTTP request"
    );
    req
}

impl<E: ApiError> IntoResponse for ServiceError<E> {
    fn into_response(self) -> Response {
        match self {
            ServiceError::Rejected(err) => {
                let status =
                    StatusCode::from_u16(err.status().code()).unwrap_or(StatusCode::BAD_REQUEST);
                warn!(code = err.code(), status = %status, "Request rejected");
                (status, Json(ErrorDocument::new(&err))).into_response()
            }
            ServiceError::Store(err) => {
                error!(error = %err, "Storage failure");
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"errors": [{"detail": "Internal server error", "status": "500"}]})),
    )
        .into_response()
}

/// Runs a store-touching operation off the async workers.
async fn blocking<T, F>(f: F) -> Result<T, Response>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|err| {
        error!(error = %err, "Blocking task failed");
        internal_error()
    })
}

/// Decodes a request body. Anything that is not JSON becomes `null`, which
/// the parsers reject as an invalid body.
fn json_payload(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|err| {
        debug!(error = %err, "Request body is not JSON");
        Value::Null
    })
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn list_players(State(state): State<AppState>) -> Result<Response, Response> {
    let service = state.service.clone();
    let players = blocking(move || service.list_players())
        .await?
        .map_err(IntoResponse::into_response)?;
    Ok(Json(state.formatter.players(&players)).into_response())
}

async fn create_player(State(state): State<AppState>, body: Bytes) -> Result<Response, Response> {
    let service = state.service.clone();
    let payload = json_payload(&body);
    let player = blocking(move || service.create_player(&payload))
        .await?
        .map_err(IntoResponse::into_response)?;
    Ok(Json(state.formatter.player(&player)).into_response())
}

async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Response, Response> {
    let service = state.service.clone();
    let player = blocking(move || service.get_player(&player_id))
        .await?
        .map_err(IntoResponse::into_response)?;
    Ok(Json(state.formatter.player(&player)).into_response())
}

async fn list_player_games(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Response, Response> {
    let service = state.service.clone();
    let games = blocking(move || service.list_player_games(&player_id))
        .await?
        .map_err(IntoResponse::into_response)?;
    Ok(Json(state.formatter.games(&games)).into_response())
}

async fn list_games(State(state): State<AppState>) -> Result<Response, Response> {
    let service = state.service.clone();
    let games = blocking(move || service.list_games(None))
        .await?
        .map_err(IntoResponse::into_response)?;
    Ok(Json(state.formatter.games(&games)).into_response())
}

async fn create_game(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, Response> {
    // Non-ASCII bytes still count as a supplied id.
    let user_id = headers
        .get(USER_ID_HEADER)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
    let service = state.service.clone();
    let game = blocking(move || service.create_game(user_id.as_deref()))
        .await?
        .map_err(IntoResponse::into_response)?;
    Ok((StatusCode::CREATED, Json(state.formatter.game(&game))).into_response())
}

async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Response, Response> {
    let service = state.service.clone();
    let game = blocking(move || service.get_game(&game_id))
        .await?
        .map_err(IntoResponse::into_response)?;
    Ok(Json(state.formatter.game(&game)).into_response())
}

async fn update_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    body: Bytes,
) -> Result<Response, Response> {
    let service = state.service.clone();
    let payload = json_payload(&body);
    let game = blocking(move || service.update_game(&game_id, &payload))
        .await?
        .map_err(IntoResponse::into_response)?;
    Ok(Json(state.formatter.game(&game)).into_response())
}
