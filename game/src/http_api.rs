use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use log::{debug, warn};
use tower_http::cors::{Any, CorsLayer};

use tilematch_engine::protocol::{ActionRequest, FramesRequest, Manifest, Snapshot, TimelineInfo};

use crate::session_api::ApiSession;

pub const DEFAULT_API_ADDR: &str = "127.0.0.1:4000";
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<ApiSession>>,
}

impl AppState {
    pub fn new(session: ApiSession) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// A poisoned lock still holds a consistent session: every mutation is a
    /// whole snapshot swap inside the timeline.
    pub fn lock(&self) -> MutexGuard<'_, ApiSession> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health))
        .route("/api/manifest", get(manifest))
        .route("/api/session/state", get(session_state))
        .route("/api/session/timeline", get(session_timeline))
        .route("/api/session/step", post(session_step))
        .route("/api/session/reset", post(session_reset))
        .route("/api/session/rewind", post(session_rewind))
        .route("/api/session/forward", post(session_forward))
        .route("/api/session/history", get(session_history))
        .with_state(state)
        .layer(cors)
}

pub fn resolve_api_addr<F>(mut get_env: F) -> SocketAddr
where
    F: FnMut(&str) -> Option<String>,
{
    if let Some(addr) = get_env("TILEMATCH_API_ADDR").and_then(|v| v.parse().ok()) {
        return addr;
    }

    if let Some(port) = get_env("TILEMATCH_API_PORT").and_then(|v| v.parse::<u16>().ok()) {
        return SocketAddr::from(([127, 0, 0, 1], port));
    }

    SocketAddr::from(([127, 0, 0, 1], 4000))
}

/// Drives the countdown once per second and pending cascades once per
/// `cascade_delay`. Both loops only record frames when there is work.
pub fn spawn_drivers(state: &AppState, cascade_delay: Duration) {
    let ticker = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        interval.tick().await;
        loop {
            interval.tick().await;
            let ticked = ticker.lock().pump_tick();
            if let Some(snapshot) = ticked {
                debug!("tick -> frame {}", snapshot.frame);
            }
        }
    });

    let pump = state.clone();
    let delay = if cascade_delay.is_zero() {
        warn!("cascade delay of zero requested; using 1ms");
        Duration::from_millis(1)
    } else {
        cascade_delay
    };
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(delay);
        loop {
            interval.tick().await;
            let advanced = pump.lock().pump_cascade();
            if let Some(snapshot) = advanced {
                debug!("cascade pass -> frame {}", snapshot.frame);
            }
        }
    });
}

async fn health() -> &'static str {
    "ok"
}

async fn manifest(State(state): State<AppState>) -> Json<Manifest> {
    Json(state.lock().manifest())
}

async fn session_state(State(state): State<AppState>) -> Json<Snapshot> {
    let snapshot = state.lock().state();
    Json(snapshot)
}

async fn session_timeline(State(state): State<AppState>) -> Json<TimelineInfo> {
    let timeline = state.lock().timeline();
    Json(timeline)
}

async fn session_step(
    State(state): State<AppState>,
    Json(payload): Json<ActionRequest>,
) -> Result<Json<Snapshot>, (StatusCode, String)> {
    let snapshot = state.lock().step(&payload);
    snapshot
        .map(Json)
        .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))
}

async fn session_reset(State(state): State<AppState>) -> Json<Snapshot> {
    let snapshot = state.lock().reset();
    Json(snapshot)
}

async fn session_rewind(
    State(state): State<AppState>,
    Json(payload): Json<FramesRequest>,
) -> Json<Snapshot> {
    let snapshot = state.lock().rewind(payload.frames);
    Json(snapshot)
}

async fn session_forward(
    State(state): State<AppState>,
    Json(payload): Json<FramesRequest>,
) -> Json<Snapshot> {
    let snapshot = state.lock().forward(payload.frames);
    Json(snapshot)
}

async fn session_history(State(state): State<AppState>) -> Json<Vec<Snapshot>> {
    let history = state.lock().history();
    Json(history)
}
