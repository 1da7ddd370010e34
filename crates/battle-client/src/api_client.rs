//! Thin async HTTP client for the battle server.
//!
//! One method per endpoint. Each call is fire-and-await-response: the
//! caller gets either the decoded success envelope or a [`ClientError`],
//! and no request overlaps another by construction (the controller guards
//! against concurrent submissions).

use serde::de::DeserializeOwned;
use thiserror::Error;

use battle_core::element::Element;
use battle_core::protocol::{
    ErrorResponse, GameState, GameStateResponse, StartGameRequest, StartGameResponse,
};

/// Errors surfaced by the HTTP client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a usable response (connection refused,
    /// timeout, etc.).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with its `{"error": ...}` envelope.
    #[error("{message}")]
    Api { message: String },

    /// The body was not the envelope we expected.
    #[error("malformed server reply: {0}")]
    Decode(#[from] serde_json::Error),
}

/// HTTP JSON client bound to one server base URL.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `POST /start_game` — begin a match with the chosen creature.
    pub async fn start_game(&self, creature: Element) -> Result<StartGameResponse, ClientError> {
        let resp = self
            .http
            .post(format!("{}/start_game", self.base_url))
            .json(&StartGameRequest {
                creature_type: creature,
            })
            .send()
            .await?;
        decode(resp).await
    }

    /// `GET /get_game_state/{id}` — fetch the latest snapshot.
    pub async fn game_state(&self, game_id: &str) -> Result<GameState, ClientError> {
        let resp = self
            .http
            .get(format!("{}/get_game_state/{}", self.base_url, game_id))
            .send()
            .await?;
        let body: GameStateResponse = decode(resp).await?;
        Ok(body.game_state)
    }

    /// `POST /perform_action/{id}` — attack, then receive the resolved snapshot.
    pub async fn perform_action(&self, game_id: &str) -> Result<GameState, ClientError> {
        let resp = self
            .http
            .post(format!("{}/perform_action/{}", self.base_url, game_id))
            .send()
            .await?;
        let body: GameStateResponse = decode(resp).await?;
        Ok(body.game_state)
    }
}

/// Decode a response as `T` on 2xx, or as the error envelope otherwise.
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    let body = resp.text().await?;
    if status.is_success() {
        Ok(serde_json::from_str(&body)?)
    } else {
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or_else(|_| format!("server returned HTTP {status}"));
        Err(ClientError::Api { message })
    }
}
