//! Framework-agnostic client controller.
//!
//! Owns an [`ApiClient`] and a [`ClientGameState`], and is the single
//! mutation gateway for both. Frontends only need to:
//!
//! 1. Call [`GameController::start_game`] from the setup screen.
//! 2. Call [`GameController::poll_state`] on a timer while a game is live.
//! 3. Call [`GameController::attack`] / [`GameController::restart`] on user
//!    intent, and re-render from [`GameController::state`] afterwards.
//!
//! Request failures never propagate out: they land in the state's visible
//! error slot and the controls come back, so the UI can't get stuck on a
//! failed fetch.

use crate::api_client::ApiClient;
use crate::game_state::{ClientGameState, StateChanged};
use battle_core::element::Element;

/// Outcome of one poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// A snapshot (or an error) was applied; the flags describe what changed.
    Updated(StateChanged),
    /// No game is active — polling is a no-op.
    Idle,
}

/// Owns the HTTP client, the active game identifier, and the view state.
pub struct GameController {
    api: ApiClient,
    game_id: Option<String>,
    pub state: ClientGameState,
}

impl GameController {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            game_id: None,
            state: ClientGameState::default(),
        }
    }

    /// The active game identifier, if any.
    pub fn game_id(&self) -> Option<&str> {
        self.game_id.as_deref()
    }

    /// Start a new match with the chosen creature and switch to the battle
    /// screen.
    pub async fn start_game(&mut self, creature: Element) -> StateChanged {
        if self.state.request_pending {
            return StateChanged::default();
        }
        self.state.request_pending = true;
        let result = self.api.start_game(creature).await;
        self.state.request_pending = false;

        match result {
            Ok(started) => {
                self.game_id = Some(started.game_id);
                self.state.apply_snapshot(started.game_state)
            }
            Err(e) => self.state.record_error(e.to_string()),
        }
    }

    /// Send one attack and apply the resolved snapshot.
    ///
    /// No-op unless a game is active, it is the player's turn, and no other
    /// request is in flight — duplicate submissions are impossible by
    /// construction.
    pub async fn attack(&mut self) -> StateChanged {
        let Some(game_id) = self.game_id.clone() else {
            return StateChanged::default();
        };
        if !self.state.attack_enabled() {
            return StateChanged::default();
        }

        self.state.request_pending = true;
        let result = self.api.perform_action(&game_id).await;
        self.state.request_pending = false;

        match result {
            Ok(snapshot) => self.state.apply_snapshot(snapshot),
            Err(e) => self.state.record_error(e.to_string()),
        }
    }

    /// Fetch the latest snapshot for the active game.
    pub async fn poll_state(&mut self) -> PollOutcome {
        let Some(game_id) = self.game_id.clone() else {
            return PollOutcome::Idle;
        };
        if self.state.request_pending {
            // An action is already in flight and will carry the fresh state.
            return PollOutcome::Updated(StateChanged::default());
        }

        match self.api.game_state(&game_id).await {
            Ok(snapshot) => PollOutcome::Updated(self.state.apply_snapshot(snapshot)),
            Err(e) => PollOutcome::Updated(self.state.record_error(e.to_string())),
        }
    }

    /// Abandon the active game and return to the setup screen.
    ///
    /// Clears the game identifier, so a subsequent poll is a no-op.
    pub fn restart(&mut self) -> StateChanged {
        self.game_id = None;
        self.state.reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::Phase;

    // Points at a closed port; the guarded paths below return before any
    // request is made.
    fn controller() -> GameController {
        GameController::new(ApiClient::new("http://127.0.0.1:1"))
    }

    #[tokio::test]
    async fn poll_without_a_game_is_a_no_op() {
        let mut ctrl = controller();
        assert_eq!(ctrl.poll_state().await, PollOutcome::Idle);
        assert!(ctrl.state.last_error.is_none());
    }

    #[tokio::test]
    async fn attack_without_a_game_is_a_no_op() {
        let mut ctrl = controller();
        let changed = ctrl.attack().await;
        assert!(!changed.any());
    }

    #[tokio::test]
    async fn restart_clears_the_game_id() {
        let mut ctrl = controller();
        ctrl.game_id = Some("0123456789abcdef0123456789abcdef".to_string());

        ctrl.restart();

        assert_eq!(ctrl.game_id(), None);
        assert_eq!(ctrl.state.phase, Phase::Setup);
        assert_eq!(ctrl.poll_state().await, PollOutcome::Idle);
    }

    #[tokio::test]
    async fn failed_start_surfaces_a_visible_error_and_unsticks_controls() {
        let mut ctrl = controller();
        let changed = ctrl.start_game(Element::Fire).await;

        assert!(changed.error);
        assert!(ctrl.state.last_error.is_some());
        assert!(!ctrl.state.request_pending);
        assert_eq!(ctrl.state.phase, Phase::Setup);
    }
}
