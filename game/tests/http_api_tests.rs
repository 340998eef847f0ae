use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use tilematch::agent::MatchGame;
use tilematch::http_api::{AppState, router};
use tilematch::session_api::ApiSession;
use tilematch::settings::GameSettings;

fn app() -> axum::Router {
    let game = MatchGame::new(GameSettings::default(), 21);
    router(AppState::new(ApiSession::new(game)))
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let response = app().oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn manifest_lists_session_actions() {
    let response = app().oneshot(get("/api/manifest")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["boardSize"], 6);
    let ids: Vec<&str> = json["actions"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|a| a["id"].as_str())
        .collect();
    assert!(ids.contains(&"spin"));
    assert!(ids.contains(&"select"));
}

#[tokio::test]
async fn step_returns_snapshot_json() {
    let response = app()
        .oneshot(post_json(
            "/api/session/step",
            r#"{"actionId":"spin"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["frame"], 1);
    assert_eq!(json["state"]["phase"], "active");
    assert_eq!(json["state"]["timeLeft"], 60);
    assert_eq!(json["grid"]["cells"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn unknown_action_is_bad_request() {
    let response = app()
        .oneshot(post_json(
            "/api/session/step",
            r#"{"actionId":"teleport"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn steps_accumulate_in_the_timeline() {
    let app = app();
    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(post_json("/api/session/step", r#"{"actionId":"noop"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.clone().oneshot(get("/api/session/timeline")).await.unwrap();
    let json = body_json(response).await;
    assert_eq!(json["frame"], 3);
    assert_eq!(json["historyLen"], 4);

    let response = app
        .oneshot(post_json("/api/session/reset", ""))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["frame"], 4);
    assert_eq!(json["state"]["phase"], "preGame");
}

#[tokio::test]
async fn each_reset_deals_a_different_round() {
    let app = app();
    let mut boards = Vec::new();
    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(post_json("/api/session/step", r#"{"actionId":"spin"}"#))
            .await
            .unwrap();
        let json = body_json(response).await;
        boards.push(json["state"]["board"].clone());

        let response = app
            .clone()
            .oneshot(post_json("/api/session/reset", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert!(boards.iter().all(|b| !b.is_null()));
    assert_ne!(boards[0], boards[1]);
    assert_ne!(boards[1], boards[2]);
}

#[tokio::test]
async fn rewind_forward_and_history_routes_walk_the_timeline() {
    let app = app();
    for action in ["spin", "tick"] {
        let body = format!(r#"{{"actionId":"{action}"}}"#);
        app.clone()
            .oneshot(post_json("/api/session/step", &body))
            .await
            .unwrap();
    }

    let response = app
        .clone()
        .oneshot(post_json("/api/session/rewind", r#"{"frames":2}"#))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["frame"], 0);
    assert_eq!(json["state"]["phase"], "preGame");

    let response = app
        .clone()
        .oneshot(post_json("/api/session/forward", "{}"))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["frame"], 1);
    assert_eq!(json["state"]["phase"], "active");

    let response = app.oneshot(get("/api/session/history")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let frames: Vec<u64> = json
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|s| s["frame"].as_u64())
        .collect();
    assert_eq!(frames, vec![0, 1, 2]);
}
