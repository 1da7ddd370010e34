//! HTTP handlers for the battle API.
//!
//! Every app-level failure is answered with the `{"error": ...}` envelope
//! and a matching status code; successes carry `success: true` plus the
//! full game-state snapshot.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use battle_core::protocol::{
    ErrorResponse, GameStateResponse, StartGameRequest, StartGameResponse, validate_game_id,
};

use crate::AppState;
use crate::game::GameSession;

/// App-level request failure, rendered as the error envelope.
pub enum ApiError {
    BadRequest(String),
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                "Game not found or not authorized".to_string(),
            ),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// `POST /start_game` — create a match with the chosen creature.
pub async fn start_game(
    State(state): State<AppState>,
    Json(req): Json<StartGameRequest>,
) -> Json<StartGameResponse> {
    let (game_id, game_state) = state.games.create_game(req.creature_type).await;
    tracing::info!(
        game = %game_id,
        player = %req.creature_type,
        ai = %game_state.ai_creature.element,
        "game started"
    );
    Json(StartGameResponse {
        success: true,
        game_id,
        game_state,
    })
}

/// `GET /get_game_state/{game_id}` — fetch the latest snapshot.
pub async fn get_game_state(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameStateResponse>, ApiError> {
    let session = lookup(&state, &game_id).await?;
    let game_state = session.lock().await.snapshot();
    Ok(Json(GameStateResponse {
        success: true,
        game_state,
    }))
}

/// `POST /perform_action/{game_id}` — resolve one attack round.
pub async fn perform_action(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameStateResponse>, ApiError> {
    let session = lookup(&state, &game_id).await?;
    let mut session = session.lock().await;

    session
        .perform_action()
        .map_err(|e| ApiError::BadRequest(e.message().to_string()))?;
    let game_state = session.snapshot();

    if game_state.game_over {
        tracing::info!(game = %game_id, winner = ?game_state.winner, "game finished");
    }
    Ok(Json(GameStateResponse {
        success: true,
        game_state,
    }))
}

/// Validate the identifier and resolve it to a live session.
async fn lookup(
    state: &AppState,
    game_id: &str,
) -> Result<std::sync::Arc<tokio::sync::Mutex<GameSession>>, ApiError> {
    validate_game_id(game_id).map_err(ApiError::BadRequest)?;
    state.games.get_game(game_id).await.ok_or(ApiError::NotFound)
}
