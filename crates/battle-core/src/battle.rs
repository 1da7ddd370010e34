//! Authoritative battle state and turn resolution.
//!
//! This module is transport-agnostic — it knows nothing about HTTP, game
//! identifiers, or who is allowed to act when. The server crate wires it up
//! to the endpoints and the turn bookkeeping.

use crate::element::{BASE_HP, Element, Winner, damage};
use crate::protocol::{GameState, creature_to_info};

/// A combatant: an elemental species plus its remaining hit points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Creature {
    pub element: Element,
    /// Signed so a finishing blow can drive it below zero; anything that
    /// shows HP to a human clamps at render time.
    pub hp: i32,
}

impl Creature {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            hp: BASE_HP,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }
}

/// One match between the player's creature and the AI's.
///
/// The log is append-only: every turn adds lines and nothing ever rewrites
/// or removes them, so clients can render it as a growing narrative.
#[derive(Debug, Clone)]
pub struct Battle {
    pub player: Creature,
    pub ai: Creature,
    pub log: Vec<String>,
    pub game_over: bool,
    pub winner: Option<Winner>,
}

impl Battle {
    /// Start a match with both elements chosen explicitly.
    pub fn new(player: Element, ai: Element) -> Self {
        Self {
            player: Creature::new(player),
            ai: Creature::new(ai),
            log: Vec::new(),
            game_over: false,
            winner: None,
        }
    }

    /// Start a match against a randomly drawn AI creature.
    ///
    /// The AI never mirrors the player's element.
    pub fn start(player: Element) -> Self {
        Self::new(player, Element::random_except(player))
    }

    /// The player's creature attacks the AI's.
    pub fn player_turn(&mut self) {
        let dealt = damage(self.player.element, self.ai.element);
        self.ai.hp -= dealt;
        self.log.push(format!(
            "Your {} attacks! AI's {} takes {} damage.",
            self.player.element, self.ai.element, dealt
        ));

        if self.ai.is_defeated() {
            self.game_over = true;
            self.winner = Some(Winner::Player);
            self.log
                .push(format!("AI's {} has been defeated! You win!", self.ai.element));
        }
    }

    /// The AI's creature attacks the player's.
    pub fn ai_turn(&mut self) {
        let dealt = damage(self.ai.element, self.player.element);
        self.player.hp -= dealt;
        self.log.push(format!(
            "AI's {} attacks! Your {} takes {} damage.",
            self.ai.element, self.player.element, dealt
        ));

        if self.player.is_defeated() {
            self.game_over = true;
            self.winner = Some(Winner::Ai);
            self.log.push(format!(
                "Your {} has been defeated! You lose!",
                self.player.element
            ));
        }
    }

    /// Resolve one attack action: the player strikes, and if the match is
    /// still live the AI answers immediately.
    pub fn resolve_round(&mut self) {
        self.player_turn();
        if !self.game_over {
            self.ai_turn();
        }
    }

    /// Build the wire snapshot for this match.
    pub fn snapshot(&self, your_turn: bool) -> GameState {
        GameState {
            player_creature: creature_to_info(&self.player),
            ai_creature: creature_to_info(&self.ai),
            log: self.log.clone(),
            game_over: self.game_over,
            winner: self.winner,
            your_turn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_battle_is_live_at_full_health() {
        let battle = Battle::new(Element::Fire, Element::Water);
        assert_eq!(battle.player.hp, BASE_HP);
        assert_eq!(battle.ai.hp, BASE_HP);
        assert!(battle.log.is_empty());
        assert!(!battle.game_over);
        assert_eq!(battle.winner, None);
    }

    #[test]
    fn player_turn_applies_damage_and_logs_it() {
        // Fire attacking water is the weak matchup: 10 damage.
        let mut battle = Battle::new(Element::Fire, Element::Water);
        battle.player_turn();

        assert_eq!(battle.ai.hp, 90);
        assert_eq!(
            battle.log,
            vec!["Your Fire attacks! AI's Water takes 10 damage.".to_string()]
        );
        assert!(!battle.game_over);
    }

    #[test]
    fn round_with_both_sides_alive_logs_two_entries() {
        let mut battle = Battle::new(Element::Air, Element::Fire);
        battle.resolve_round();

        assert_eq!(battle.log.len(), 2);
        assert_eq!(
            battle.log[1],
            "AI's Fire attacks! Your Air takes 20 damage."
        );
        assert_eq!(battle.player.hp, 80);
        assert_eq!(battle.ai.hp, 80);
        assert!(!battle.game_over);
    }

    #[test]
    fn defeating_the_ai_ends_the_round_before_its_counterattack() {
        let mut battle = Battle::new(Element::Fire, Element::Earth);
        battle.ai.hp = 5;
        battle.resolve_round();

        assert!(battle.game_over);
        assert_eq!(battle.winner, Some(Winner::Player));
        assert_eq!(
            battle.log.last().unwrap(),
            "AI's Earth has been defeated! You win!"
        );
        // The AI never got to act.
        assert_eq!(battle.player.hp, BASE_HP);
    }

    #[test]
    fn ai_counterattack_can_end_the_game() {
        let mut battle = Battle::new(Element::Fire, Element::Water);
        battle.player.hp = 20;
        battle.resolve_round();

        // Water hits fire for 30: 20 - 30 = -10, stored unclamped.
        assert!(battle.game_over);
        assert_eq!(battle.winner, Some(Winner::Ai));
        assert_eq!(battle.player.hp, -10);
        assert_eq!(
            battle.log.last().unwrap(),
            "Your Fire has been defeated! You lose!"
        );
    }

    #[test]
    fn log_only_ever_grows() {
        let mut battle = Battle::new(Element::Air, Element::Earth);
        let mut previous = 0;
        while !battle.game_over {
            battle.resolve_round();
            assert!(battle.log.len() > previous);
            previous = battle.log.len();
        }
    }

    #[test]
    fn snapshot_mirrors_battle_state() {
        let mut battle = Battle::new(Element::Water, Element::Air);
        battle.resolve_round();
        let snapshot = battle.snapshot(true);

        assert_eq!(snapshot.player_creature.element, Element::Water);
        assert_eq!(snapshot.player_creature.hp, battle.player.hp);
        assert_eq!(snapshot.ai_creature.hp, battle.ai.hp);
        assert_eq!(snapshot.log, battle.log);
        assert!(snapshot.your_turn);
        assert!(!snapshot.game_over);
    }
}
