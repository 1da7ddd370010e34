//! Client-side projection of the server's game state.
//!
//! The client holds no authoritative state: every [`apply_snapshot`] is a
//! full replace of the previous snapshot, never an incremental patch. All
//! render decisions (HP clamping, which controls are visible, what the
//! status lines say) are derived here so frontends stay purely visual.
//!
//! [`apply_snapshot`]: ClientGameState::apply_snapshot

use battle_core::protocol::GameState;

/// Which screen the frontend should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Creature selection, before any game exists.
    #[default]
    Setup,
    /// An active or finished match.
    Battle,
}

/// Describes what changed after applying a snapshot or a local transition.
///
/// Frontends can inspect these flags to decide what to re-render. All flags
/// default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateChanged {
    /// A creature's HP or identity changed.
    pub combatants: bool,
    /// The battle log grew.
    pub log: bool,
    /// Whose turn it is flipped.
    pub turn: bool,
    /// The game ended (or a new one began).
    pub over: bool,
    /// We moved between the setup and battle screens.
    pub phase: bool,
    /// The visible error slot changed.
    pub error: bool,
}

impl StateChanged {
    /// Returns `true` if any flag is set.
    pub fn any(self) -> bool {
        self.combatants || self.log || self.turn || self.over || self.phase || self.error
    }
}

/// The frontend-facing game state.
#[derive(Debug, Clone, Default)]
pub struct ClientGameState {
    pub phase: Phase,
    /// Latest server snapshot, if a game has been started.
    pub snapshot: Option<GameState>,
    /// True while a request is in flight; the attack control is disabled to
    /// prevent duplicate submissions.
    pub request_pending: bool,
    /// Last request failure, shown until the next successful request.
    pub last_error: Option<String>,
}

impl ClientGameState {
    // ------------------------------------------------------------------
    // Mutation (driven by the controller)
    // ------------------------------------------------------------------

    /// Replace the held snapshot wholesale and report what changed.
    pub fn apply_snapshot(&mut self, next: GameState) -> StateChanged {
        let mut changed = StateChanged {
            error: self.last_error.take().is_some(),
            ..StateChanged::default()
        };

        match &self.snapshot {
            Some(prev) => {
                changed.combatants = prev.player_creature != next.player_creature
                    || prev.ai_creature != next.ai_creature;
                changed.log = prev.log.len() != next.log.len();
                changed.turn = prev.your_turn != next.your_turn;
                changed.over = prev.game_over != next.game_over;
            }
            None => {
                changed.combatants = true;
                changed.log = !next.log.is_empty();
                changed.turn = true;
            }
        }

        if self.phase != Phase::Battle {
            self.phase = Phase::Battle;
            changed.phase = true;
        }
        self.snapshot = Some(next);
        changed
    }

    /// Drop the snapshot and return to the setup screen.
    pub fn reset(&mut self) -> StateChanged {
        let changed = StateChanged {
            phase: self.phase != Phase::Setup,
            combatants: self.snapshot.is_some(),
            error: self.last_error.take().is_some(),
            ..StateChanged::default()
        };
        self.phase = Phase::Setup;
        self.snapshot = None;
        self.request_pending = false;
        changed
    }

    /// Record a request failure for display.
    pub fn record_error(&mut self, message: String) -> StateChanged {
        self.last_error = Some(message);
        StateChanged {
            error: true,
            ..StateChanged::default()
        }
    }

    // ------------------------------------------------------------------
    // Render helpers
    // ------------------------------------------------------------------

    /// Player HP for display, clamped so it never shows negative.
    pub fn player_hp(&self) -> i32 {
        self.snapshot
            .as_ref()
            .map(|gs| gs.player_creature.hp.max(0))
            .unwrap_or(0)
    }

    /// AI HP for display, clamped so it never shows negative.
    pub fn ai_hp(&self) -> i32 {
        self.snapshot
            .as_ref()
            .map(|gs| gs.ai_creature.hp.max(0))
            .unwrap_or(0)
    }

    /// Battle log entries, oldest first.
    pub fn log(&self) -> &[String] {
        self.snapshot.as_ref().map(|gs| gs.log.as_slice()).unwrap_or(&[])
    }

    /// End-of-game banner, present only once the match is decided.
    pub fn status_line(&self) -> Option<String> {
        let gs = self.snapshot.as_ref()?;
        if !gs.game_over {
            return None;
        }
        let winner = gs.winner.map(|w| w.label()).unwrap_or("Unknown");
        Some(format!("Game Over! Winner: {winner}"))
    }

    /// Turn indicator, present only while the match is live.
    pub fn turn_line(&self) -> Option<&'static str> {
        let gs = self.snapshot.as_ref()?;
        if gs.game_over {
            return None;
        }
        if gs.your_turn {
            Some("It's your turn!")
        } else {
            Some("Waiting for AI's turn...")
        }
    }

    /// Whether the attack control should be shown at all.
    pub fn attack_visible(&self) -> bool {
        matches!(&self.snapshot, Some(gs) if !gs.game_over)
    }

    /// Whether the attack control should accept input right now.
    pub fn attack_enabled(&self) -> bool {
        self.attack_visible()
            && !self.request_pending
            && self.snapshot.as_ref().is_some_and(|gs| gs.your_turn)
    }

    /// Whether the restart control should be shown.
    pub fn restart_visible(&self) -> bool {
        matches!(&self.snapshot, Some(gs) if gs.game_over)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::element::{Element, Winner};
    use battle_core::protocol::CreatureInfo;

    fn snapshot(player_hp: i32, ai_hp: i32, your_turn: bool, game_over: bool) -> GameState {
        GameState {
            player_creature: CreatureInfo {
                element: Element::Fire,
                hp: player_hp,
            },
            ai_creature: CreatureInfo {
                element: Element::Water,
                hp: ai_hp,
            },
            log: Vec::new(),
            game_over,
            winner: if game_over { Some(Winner::Ai) } else { None },
            your_turn,
        }
    }

    #[test]
    fn negative_hp_displays_as_zero() {
        let mut state = ClientGameState::default();
        state.apply_snapshot(snapshot(-5, 40, false, true));
        assert_eq!(state.player_hp(), 0);
        assert_eq!(state.ai_hp(), 40);
    }

    #[test]
    fn game_over_shows_restart_and_hides_attack_and_turn() {
        let mut state = ClientGameState::default();
        state.apply_snapshot(snapshot(-5, 40, false, true));

        assert_eq!(
            state.status_line().as_deref(),
            Some("Game Over! Winner: Ai")
        );
        assert_eq!(state.turn_line(), None);
        assert!(!state.attack_visible());
        assert!(!state.attack_enabled());
        assert!(state.restart_visible());
    }

    #[test]
    fn our_turn_enables_attack() {
        let mut state = ClientGameState::default();
        state.apply_snapshot(snapshot(100, 100, true, false));

        assert!(state.attack_enabled());
        assert_eq!(state.turn_line(), Some("It's your turn!"));
        assert_eq!(state.status_line(), None);
    }

    #[test]
    fn waiting_for_ai_disables_attack() {
        let mut state = ClientGameState::default();
        state.apply_snapshot(snapshot(100, 100, false, false));

        assert!(state.attack_visible());
        assert!(!state.attack_enabled());
        assert_eq!(state.turn_line(), Some("Waiting for AI's turn..."));
    }

    #[test]
    fn pending_request_disables_attack() {
        let mut state = ClientGameState::default();
        state.apply_snapshot(snapshot(100, 100, true, false));
        state.request_pending = true;
        assert!(!state.attack_enabled());
    }

    #[test]
    fn log_is_rendered_in_full_and_in_order() {
        let mut state = ClientGameState::default();
        let mut gs = snapshot(80, 80, true, false);
        gs.log = vec!["first".into(), "second".into(), "third".into()];
        state.apply_snapshot(gs);

        assert_eq!(state.log(), ["first", "second", "third"]);
    }

    #[test]
    fn apply_is_a_full_replace() {
        let mut state = ClientGameState::default();
        let mut first = snapshot(80, 80, true, false);
        first.log = vec!["first".into(), "second".into()];
        state.apply_snapshot(first);

        // A later snapshot fully supersedes the previous one.
        let second = snapshot(60, 70, true, false);
        state.apply_snapshot(second.clone());
        assert_eq!(state.snapshot, Some(second));
        assert!(state.log().is_empty());
    }

    #[test]
    fn change_flags_track_log_growth_and_game_end() {
        let mut state = ClientGameState::default();
        state.apply_snapshot(snapshot(100, 100, true, false));

        let mut next = snapshot(70, 90, true, false);
        next.log = vec!["a".into(), "b".into()];
        let changed = state.apply_snapshot(next);
        assert!(changed.log);
        assert!(changed.combatants);
        assert!(!changed.over);

        let changed = state.apply_snapshot(snapshot(-5, 90, false, true));
        assert!(changed.over);
        assert!(changed.turn);
    }

    #[test]
    fn reset_returns_to_setup() {
        let mut state = ClientGameState::default();
        state.apply_snapshot(snapshot(100, 100, true, false));
        let changed = state.reset();

        assert!(changed.phase);
        assert_eq!(state.phase, Phase::Setup);
        assert!(state.snapshot.is_none());
        assert!(!state.attack_visible());
        assert!(!state.restart_visible());
    }
}
