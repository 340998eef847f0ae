use std::env;

use anyhow::{Context, Result};
use log::info;

use tilematch::agent::MatchGame;
use tilematch::http_api::{AppState, resolve_api_addr, router, spawn_drivers};
use tilematch::session_api::ApiSession;
use tilematch::settings::SettingsStore;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let store = SettingsStore::from_env();
    let settings = store.load();
    info!("settings loaded from {}", store.path().display());

    let game = MatchGame::from_settings(settings, rand::random());
    info!("session seed {}", game.seed());

    let state = AppState::new(ApiSession::new(game));
    spawn_drivers(&state, settings.cascade_delay());
    let app = router(state);

    let addr = resolve_api_addr(|k| env::var(k).ok());
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind session api on {addr}"))?;
    info!("session api listening on http://{addr}");

    axum::serve(listener, app)
        .await
        .context("serve session api")
}
