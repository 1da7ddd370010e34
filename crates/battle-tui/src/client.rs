//! Client orchestrator — connects the controller and the TUI frontend.
//!
//! This module owns the event loop and drives:
//! - [`battle_client::controller::GameController`] — shared dispatch logic
//! - [`crate::tui::Tui`] — ratatui TUI frontend

use std::time::Duration;

use battle_client::api_client::ApiClient;
use battle_client::controller::GameController;

use crate::tui::{Tui, UserIntent};

/// How often the active game is re-fetched from the server.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// How often keyboard input is polled.
const INPUT_TICK: Duration = Duration::from_millis(50);

/// Start the battle client against the given server base URL.
pub async fn start_client(server_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctrl = GameController::new(ApiClient::new(server_url));

    let mut tui = Tui::setup()?;
    let result = run_event_loop(&mut tui, &mut ctrl).await;
    tui.teardown()?;
    result
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

async fn run_event_loop(
    tui: &mut Tui,
    ctrl: &mut GameController,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut poll_timer = tokio::time::interval(POLL_INTERVAL);
    poll_timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tui.render(&ctrl.state)?;

        tokio::select! {
            _ = poll_timer.tick() => {
                // Refresh from the latest server snapshot; no-op without a game.
                ctrl.poll_state().await;
            }

            _ = tokio::time::sleep(INPUT_TICK) => {
                match tui.poll_and_handle_input(&ctrl.state)? {
                    UserIntent::Quit => break,
                    UserIntent::StartGame(creature) => {
                        ctrl.start_game(creature).await;
                    }
                    UserIntent::Attack => {
                        ctrl.attack().await;
                    }
                    UserIntent::Restart => {
                        ctrl.restart();
                    }
                    UserIntent::None => {}
                }
            }
        }
    }

    Ok(())
}
