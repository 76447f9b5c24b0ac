//! End-to-end tests for the full peryashotd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real repos,
//! real Argon2 hasher, cheap cost unless stated, real axum router) and exercises the
//! HTTP layer via `tower::ServiceExt::oneshot` — no TCP port is bound.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use peryashot_adapter_http_axum::router;
use peryashot_adapter_http_axum::state::AppState;
use peryashot_adapter_password_argon2::Argon2Hasher;
use peryashot_adapter_storage_sqlite_sqlx::{
    Config, SqliteScoreRepository, SqliteUserRepository,
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tower::ServiceExt;

/// Build a fully-wired router backed by an in-memory `SQLite` database.
async fn app() -> axum::Router {
    app_with_hasher(Argon2Hasher::with_cost(1024, 1, 1).expect("cheap argon2 cost should be valid")).await
}

async fn app_with_hasher(hasher: Argon2Hasher) -> axum::Router {
    let db = Config {
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
    }
    .build()
    .await
    .expect("in-memory database should initialise");

    let pool = db.pool().clone();

    let state = AppState::new(
        SqliteUserRepository::new(pool.clone()),
        SqliteScoreRepository::new(pool),
        hasher,
    );

    router::build(state)
}

async fn call(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn register(app: &axum::Router, username: &str, password: &str) {
    let (status, body) = call(
        app,
        "POST",
        "/register",
        Some(json!({"username": username, "password": password, "email": format!("{username}@x.com")})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User registered successfully!");
}

async fn login(app: &axum::Router, username: &str, password: &str) -> i64 {
    let (status, body) = call(
        app,
        "POST",
        "/login",
        Some(json!({"username": username, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["userId"].as_i64().unwrap()
}

async fn submit(app: &axum::Router, user_id: i64, score: i64) -> Value {
    let (status, body) = call(
        app,
        "POST",
        "/scores",
        Some(json!({"userId": user_id, "score": score})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    body
}

async fn highest_score(app: &axum::Router, user_id: i64) -> i64 {
    let (status, body) = call(app, "GET", &format!("/users/{user_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    body["user"]["highest_score"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_login_with_id_of_registered_user() {
    let app = app().await;
    register(&app, "ana", "pw1").await;

    let user_id = login(&app, "ana", "pw1").await;

    let (status, body) = call(&app, "GET", &format!("/users/{user_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["user_id"], user_id);
    assert_eq!(body["user"]["username"], "ana");
    assert_eq!(body["user"]["email"], "ana@x.com");
    assert_eq!(body["user"]["highest_score"], 0);
    assert!(body["user"]["profile_pic_url"].is_null());
}

#[tokio::test]
async fn should_reject_wrong_password_with_unauthorized() {
    let app = app().await;
    register(&app, "ana", "pw1").await;

    let (status, body) = call(
        &app,
        "POST",
        "/login",
        Some(json!({"username": "ana", "password": "pw2"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid password.");
}

#[tokio::test]
async fn should_return_not_found_for_unknown_username() {
    let app = app().await;
    let (status, body) = call(
        &app,
        "POST",
        "/login",
        Some(json!({"username": "nobody", "password": "pw1"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn should_fail_duplicate_registration_with_internal_error() {
    let app = app().await;
    register(&app, "ana", "pw1").await;

    let (status, body) = call(
        &app,
        "POST",
        "/register",
        Some(json!({"username": "ana", "password": "pw2", "email": "other@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "internal_error");
}

#[tokio::test]
async fn should_register_with_empty_email() {
    let app = app().await;
    let (status, body) = call(
        &app,
        "POST",
        "/register",
        Some(json!({"username": "ana", "password": "pw1", "email": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User registered successfully!");

    let user_id = login(&app, "ana", "pw1").await;
    let (_, body) = call(&app, "GET", &format!("/users/{user_id}"), None).await;
    assert_eq!(body["user"]["email"], "");
}

#[tokio::test]
async fn should_serve_other_tasks_while_registering_with_production_cost() {
    let app = app_with_hasher(Argon2Hasher::new()).await;

    let done = Arc::new(AtomicBool::new(false));
    let ticker = tokio::spawn({
        let done = Arc::clone(&done);
        async move {
            let mut worst = Duration::ZERO;
            while !done.load(Ordering::Relaxed) {
                let start = Instant::now();
                tokio::time::sleep(Duration::from_millis(1)).await;
                worst = worst.max(start.elapsed());
            }
            worst
        }
    });

    for name in ["ana", "ben", "cy"] {
        register(&app, name, "pw1").await;
    }
    login(&app, "ana", "pw1").await;
    done.store(true, Ordering::Relaxed);

    let worst = ticker.await.unwrap();
    assert!(worst < Duration::from_millis(50), "ticker stalled for {worst:?}");
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_track_highest_score_across_submissions() {
    let app = app().await;
    register(&app, "ana", "pw1").await;
    let user_id = login(&app, "ana", "pw1").await;

    let first = submit(&app, user_id, 50).await;
    assert_eq!(highest_score(&app, user_id).await, 50);

    let second = submit(&app, user_id, 30).await;
    assert_eq!(highest_score(&app, user_id).await, 50);

    submit(&app, user_id, 80).await;
    assert_eq!(highest_score(&app, user_id).await, 80);

    assert!(second["scoreId"].as_i64().unwrap() > first["scoreId"].as_i64().unwrap());
}

#[tokio::test]
async fn should_reject_empty_score_body_without_inserting() {
    let app = app().await;
    register(&app, "ana", "pw1").await;
    let user_id = login(&app, "ana", "pw1").await;

    let (status, body) = call(&app, "POST", "/scores", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (_, body) = call(&app, "GET", &format!("/scores/{user_id}"), None).await;
    assert_eq!(body["scores"], json!([]));
    let (_, body) = call(&app, "GET", "/scores/leaderboard", None).await;
    assert_eq!(body["leaderboard"], json!([]));
}

#[tokio::test]
async fn should_fail_score_for_unknown_user() {
    let app = app().await;
    let (status, _body) = call(
        &app,
        "POST",
        "/scores",
        Some(json!({"userId": 999, "score": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn should_list_ten_most_recent_scores_newest_first() {
    let app = app().await;
    register(&app, "ana", "pw1").await;
    let user_id = login(&app, "ana", "pw1").await;
    for score in 1..=12 {
        submit(&app, user_id, score).await;
    }

    let (status, body) = call(&app, "GET", &format!("/scores/{user_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let scores: Vec<i64> = body["scores"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["score"].as_i64().unwrap())
        .collect();
    assert_eq!(scores, vec![12, 11, 10, 9, 8, 7, 6, 5, 4, 3]);
}

#[tokio::test]
async fn should_build_top_ten_leaderboard_with_usernames() {
    let app = app().await;
    register(&app, "ana", "pw1").await;
    register(&app, "ben", "pw2").await;
    let ana = login(&app, "ana", "pw1").await;
    let ben = login(&app, "ben", "pw2").await;
    for score in [15, 45, 5, 95, 65, 35] {
        submit(&app, ana, score).await;
    }
    for score in [100, 20, 80, 60, 40, 0] {
        submit(&app, ben, score).await;
    }

    let (status, body) = call(&app, "GET", "/scores/leaderboard", None).await;
    assert_eq!(status, StatusCode::OK);
    let board = body["leaderboard"].as_array().unwrap();
    assert_eq!(board.len(), 10);
    assert_eq!(board[0], json!({"username": "ben", "score": 100}));
    assert_eq!(board[1], json!({"username": "ana", "score": 95}));
    let scores: Vec<i64> = board.iter().map(|e| e["score"].as_i64().unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(*scores.last().unwrap(), 15);
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_list_users_with_public_fields_only() {
    let app = app().await;
    register(&app, "ana", "pw1").await;
    register(&app, "ben", "pw2").await;

    let (status, body) = call(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["username"], "ana");
    assert!(users[0].get("password").is_none());
}

#[tokio::test]
async fn should_overwrite_profile_on_update() {
    let app = app().await;
    register(&app, "ana", "pw1").await;
    let user_id = login(&app, "ana", "pw1").await;

    let (status, body) = call(
        &app,
        "PUT",
        &format!("/users/{user_id}"),
        Some(json!({"username": "ana_p", "profile_pic_url": "https://cdn.example/ana.png"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User updated successfully!");

    let (_, body) = call(&app, "GET", &format!("/users/{user_id}"), None).await;
    assert_eq!(body["user"]["username"], "ana_p");
    assert!(body["user"]["email"].is_null());
    assert_eq!(body["user"]["profile_pic_url"], "https://cdn.example/ana.png");

    // The password survives a profile overwrite.
    assert_eq!(login(&app, "ana_p", "pw1").await, user_id);
}

#[tokio::test]
async fn should_return_not_found_after_delete() {
    let app = app().await;
    register(&app, "ana", "pw1").await;
    let user_id = login(&app, "ana", "pw1").await;
    submit(&app, user_id, 10).await;

    let (status, body) = call(&app, "DELETE", &format!("/users/{user_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully!");

    let (status, body) = call(&app, "GET", &format!("/users/{user_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found.");
}
