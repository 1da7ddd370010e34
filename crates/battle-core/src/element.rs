//! Creature elements and the damage model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Base hit points for every creature.
pub const BASE_HP: i32 = 100;

/// Base attack value for every creature.
pub const BASE_ATTACK: i32 = 20;

/// A creature's elemental type.
///
/// Elements form a rock-paper-scissors triangle (fire > earth > water >
/// fire); air sits outside it with no strength or weakness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Water,
    Earth,
    Air,
}

impl Element {
    /// All selectable elements, in display order.
    pub const ALL: [Element; 4] = [Element::Fire, Element::Water, Element::Earth, Element::Air];

    /// The element this one deals bonus damage to.
    pub fn strength(self) -> Option<Element> {
        match self {
            Element::Fire => Some(Element::Earth),
            Element::Water => Some(Element::Fire),
            Element::Earth => Some(Element::Water),
            Element::Air => None,
        }
    }

    /// The element this one deals reduced damage to.
    pub fn weakness(self) -> Option<Element> {
        match self {
            Element::Fire => Some(Element::Water),
            Element::Water => Some(Element::Earth),
            Element::Earth => Some(Element::Fire),
            Element::Air => None,
        }
    }

    /// Human-readable label for UI display and battle log lines.
    pub fn label(self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Water => "Water",
            Element::Earth => "Earth",
            Element::Air => "Air",
        }
    }

    /// Draw a random element different from `exclude`.
    ///
    /// Used to pick the AI's creature so the matchup is never a mirror.
    pub fn random_except(exclude: Element) -> Element {
        use rand::seq::SliceRandom;
        let mut candidates: Vec<Element> = Element::ALL
            .iter()
            .copied()
            .filter(|e| *e != exclude)
            .collect();
        let mut rng = rand::rng();
        candidates.shuffle(&mut rng);
        candidates[0]
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which side won a finished battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Player,
    Ai,
}

impl Winner {
    pub fn label(self) -> &'static str {
        match self {
            Winner::Player => "Player",
            Winner::Ai => "Ai",
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Damage one attack deals, after elemental modifiers.
///
/// +50% against the attacker's strength, -50% against its weakness,
/// truncated to an integer.
pub fn damage(attacker: Element, defender: Element) -> i32 {
    let base = BASE_ATTACK as f64;
    let scaled = if attacker.strength() == Some(defender) {
        base * 1.5
    } else if attacker.weakness() == Some(defender) {
        base * 0.5
    } else {
        base
    };
    scaled as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_against_strength_is_boosted() {
        assert_eq!(damage(Element::Fire, Element::Earth), 30);
        assert_eq!(damage(Element::Water, Element::Fire), 30);
        assert_eq!(damage(Element::Earth, Element::Water), 30);
    }

    #[test]
    fn damage_against_weakness_is_halved() {
        assert_eq!(damage(Element::Fire, Element::Water), 10);
        assert_eq!(damage(Element::Water, Element::Earth), 10);
        assert_eq!(damage(Element::Earth, Element::Fire), 10);
    }

    #[test]
    fn neutral_matchups_deal_base_damage() {
        assert_eq!(damage(Element::Fire, Element::Air), 20);
        assert_eq!(damage(Element::Air, Element::Fire), 20);
        assert_eq!(damage(Element::Air, Element::Water), 20);
    }

    #[test]
    fn random_opponent_never_mirrors_the_player() {
        for player in Element::ALL {
            for _ in 0..50 {
                assert_ne!(Element::random_except(player), player);
            }
        }
    }
}
