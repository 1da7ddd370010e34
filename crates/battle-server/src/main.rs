//! Axum battle server.
//!
//! # Routes
//!
//! | Method | Path                         | Description                      |
//! |--------|------------------------------|----------------------------------|
//! | `POST` | `/start_game`                | Create a match, returns its ID   |
//! | `GET`  | `/get_game_state/{game_id}`  | Fetch the latest snapshot (JSON) |
//! | `POST` | `/perform_action/{game_id}`  | Resolve one attack round         |
//! | `GET`  | `/`                          | Serve static web frontend        |
//!
//! Set `STATIC_DIR` to point at a web frontend build (default: `./dist`).

mod game;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tracing_subscriber::EnvFilter;

use game::{GAME_TTL, GameManager, SWEEP_INTERVAL};

/// Shared application state available to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub games: Arc<GameManager>,
}

#[tokio::main]
async fn main() {
    // Initialise tracing (respects RUST_LOG env var).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let state = AppState {
        games: Arc::new(GameManager::new()),
    };

    // Evict matches nobody has touched in a while.
    let sweeper = state.games.clone();
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            tick.tick().await;
            let evicted = sweeper.evict_stale(GAME_TTL).await;
            if evicted > 0 {
                let live = sweeper.game_count().await;
                tracing::info!(evicted, live, "expired idle games");
            }
        }
    });

    // Static file directory for an optional web frontend build.
    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "./dist".to_string());
    let serve_spa = ServeDir::new(&static_dir)
        .not_found_service(ServeFile::new(format!("{static_dir}/index.html")));

    let app = Router::new()
        .route("/start_game", post(handlers::start_game))
        .route("/get_game_state/{game_id}", get(handlers::get_game_state))
        .route("/perform_action/{game_id}", post(handlers::perform_action))
        .layer(CorsLayer::permissive())
        .with_state(state)
        .fallback_service(serve_spa);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Battle server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
