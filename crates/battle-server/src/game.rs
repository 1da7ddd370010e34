//! Game manager for the battle server.
//!
//! Each match is an independent [`GameSession`] behind its own mutex, so
//! concurrent games never contend. The manager's outer `RwLock` allows
//! concurrent lookups while creates and removals take exclusive access.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use battle_core::battle::Battle;
use battle_core::element::Element;
use battle_core::protocol::GameState;
use tokio::sync::{Mutex, RwLock};

/// How long an idle match is kept before eviction.
pub const GAME_TTL: Duration = Duration::from_secs(30 * 60); // 30 minutes

/// How often the expiry sweep runs.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Why an attack request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    GameOver,
    NotYourTurn,
}

impl ActionError {
    /// Message carried in the error envelope.
    pub fn message(self) -> &'static str {
        match self {
            ActionError::GameOver => "Game is already over",
            ActionError::NotYourTurn => "It's not your turn",
        }
    }
}

/// One live match: the battle itself plus turn bookkeeping.
pub struct GameSession {
    battle: Battle,
    /// Whether the player may act. The AI answers inside the same request,
    /// so outside a request this is true exactly while the game is live.
    your_turn: bool,
    /// Last client activity, for TTL eviction.
    last_action: Instant,
}

impl GameSession {
    fn new(battle: Battle) -> Self {
        Self {
            battle,
            your_turn: true,
            last_action: Instant::now(),
        }
    }

    /// Resolve one attack action.
    pub fn perform_action(&mut self) -> Result<(), ActionError> {
        if self.battle.game_over {
            return Err(ActionError::GameOver);
        }
        if !self.your_turn {
            return Err(ActionError::NotYourTurn);
        }

        self.battle.resolve_round();
        // Turn comes straight back to the player unless the match ended.
        self.your_turn = !self.battle.game_over;
        self.last_action = Instant::now();
        Ok(())
    }

    /// Build the wire snapshot and refresh the activity timestamp.
    pub fn snapshot(&mut self) -> GameState {
        self.last_action = Instant::now();
        self.battle.snapshot(self.your_turn)
    }

    fn idle_for(&self) -> Duration {
        self.last_action.elapsed()
    }
}

/// Manages all active matches.
pub struct GameManager {
    games: RwLock<HashMap<String, Arc<Mutex<GameSession>>>>,
}

impl GameManager {
    pub fn new() -> Self {
        Self {
            games: RwLock::new(HashMap::new()),
        }
    }

    /// Start a new match and return its identifier plus the initial snapshot.
    pub async fn create_game(&self, creature: Element) -> (String, GameState) {
        let mut session = GameSession::new(Battle::start(creature));
        let snapshot = session.snapshot();
        let game_id = generate_game_id();

        let mut games = self.games.write().await;
        games.insert(game_id.clone(), Arc::new(Mutex::new(session)));
        (game_id, snapshot)
    }

    /// Look up a match by identifier.
    pub async fn get_game(&self, game_id: &str) -> Option<Arc<Mutex<GameSession>>> {
        let games = self.games.read().await;
        games.get(game_id).cloned()
    }

    /// Remove matches idle for at least `ttl`. Returns how many were evicted.
    pub async fn evict_stale(&self, ttl: Duration) -> usize {
        let mut stale = Vec::new();
        {
            let games = self.games.read().await;
            for (id, session) in games.iter() {
                if session.lock().await.idle_for() >= ttl {
                    stale.push(id.clone());
                }
            }
        }
        if stale.is_empty() {
            return 0;
        }

        let mut games = self.games.write().await;
        let mut removed = 0;
        for id in &stale {
            // Re-check under the write lock — the client may have acted in
            // the meantime.
            let still_stale = match games.get(id) {
                Some(session) => session.lock().await.idle_for() >= ttl,
                None => false,
            };
            if still_stale {
                games.remove(id);
                removed += 1;
            }
        }
        removed
    }

    /// Number of live matches.
    pub async fn game_count(&self) -> usize {
        self.games.read().await.len()
    }
}

/// Generate an opaque game identifier (32-char hex string).
fn generate_game_id() -> String {
    use rand::RngExt;
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::protocol::validate_game_id;

    #[test]
    fn generated_ids_are_valid_game_ids() {
        for _ in 0..20 {
            assert!(validate_game_id(&generate_game_id()).is_ok());
        }
    }

    #[tokio::test]
    async fn created_game_starts_on_the_players_turn() {
        let manager = GameManager::new();
        let (game_id, snapshot) = manager.create_game(Element::Fire).await;

        assert!(validate_game_id(&game_id).is_ok());
        assert!(snapshot.your_turn);
        assert!(!snapshot.game_over);
        assert!(snapshot.log.is_empty());
        assert!(manager.get_game(&game_id).await.is_some());
    }

    #[tokio::test]
    async fn action_resolves_a_round_and_keeps_the_turn() {
        let manager = GameManager::new();
        let (game_id, _) = manager.create_game(Element::Air).await;
        let session = manager.get_game(&game_id).await.unwrap();
        let mut session = session.lock().await;

        session.perform_action().unwrap();
        let snapshot = session.snapshot();

        assert!(!snapshot.log.is_empty());
        // Live game: the AI already answered, so it is the player's turn again.
        assert_eq!(snapshot.your_turn, !snapshot.game_over);
    }

    #[test]
    fn finished_game_rejects_further_actions() {
        let mut session = GameSession::new(Battle::new(Element::Fire, Element::Earth));
        // Play until decided; fire beats earth well before fire falls.
        while !session.battle.game_over {
            session.perform_action().unwrap();
        }

        assert_eq!(session.perform_action(), Err(ActionError::GameOver));
        assert!(!session.snapshot().your_turn);
    }

    #[test]
    fn out_of_turn_actions_are_rejected() {
        let mut session = GameSession::new(Battle::new(Element::Fire, Element::Water));
        session.your_turn = false;
        assert_eq!(session.perform_action(), Err(ActionError::NotYourTurn));
    }

    #[tokio::test]
    async fn stale_games_are_evicted() {
        let manager = GameManager::new();
        let (game_id, _) = manager.create_game(Element::Water).await;

        assert_eq!(manager.evict_stale(Duration::from_secs(3600)).await, 0);
        assert_eq!(manager.game_count().await, 1);

        assert_eq!(manager.evict_stale(Duration::ZERO).await, 1);
        assert_eq!(manager.game_count().await, 0);
        assert!(manager.get_game(&game_id).await.is_none());
    }
}
