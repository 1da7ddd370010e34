//! Wire types for the HTTP JSON game-state protocol.
//!
//! Field names here are the contract the frontend polls against — a
//! `GameState` is always a full snapshot, never a delta.

use serde::{Deserialize, Serialize};

use crate::battle::Creature;
use crate::element::{Element, Winner};

/// Serializable creature representation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatureInfo {
    /// Species element. `type` on the wire, which is reserved in Rust.
    #[serde(rename = "type")]
    pub element: Element,
    /// Raw hit points. May be negative after a finishing blow; display
    /// clamping happens at render time, not here.
    pub hp: i32,
}

/// Convert an authoritative [`Creature`] into its wire representation.
pub fn creature_to_info(creature: &Creature) -> CreatureInfo {
    CreatureInfo {
        element: creature.element,
        hp: creature.hp,
    }
}

/// Full snapshot of one match, as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    pub player_creature: CreatureInfo,
    pub ai_creature: CreatureInfo,
    /// Append-only narrative of the battle so far, oldest first.
    pub log: Vec<String>,
    pub game_over: bool,
    /// Meaningful only when `game_over` is true.
    pub winner: Option<Winner>,
    /// Meaningful only while the game is live.
    pub your_turn: bool,
}

/// Body of `POST /start_game`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StartGameRequest {
    pub creature_type: Element,
}

/// Successful reply to `POST /start_game`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartGameResponse {
    pub success: bool,
    pub game_id: String,
    pub game_state: GameState,
}

/// Successful reply to `GET /get_game_state/{id}` and
/// `POST /perform_action/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStateResponse {
    pub success: bool,
    pub game_state: GameState,
}

/// Error envelope, paired with a non-2xx HTTP status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ---------------------------------------------------------------------------
// Game ID validation
// ---------------------------------------------------------------------------

/// Length of a server-issued game identifier.
pub const GAME_ID_LEN: usize = 32;

/// Validate a game identifier.
///
/// Game IDs are opaque 32-character lowercase hex tokens.
pub fn validate_game_id(id: &str) -> Result<(), String> {
    if id.len() != GAME_ID_LEN {
        return Err(format!("Game ID must be {GAME_ID_LEN} characters"));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    {
        return Err("Game ID must be lowercase hex".to_string());
    }
    Ok(())
}
