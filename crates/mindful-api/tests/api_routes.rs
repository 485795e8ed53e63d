use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{DateTime, Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use mindful_api::auth::{AppState, AppStateInner};
use mindful_store::{ManualClock, Store};

const SECRET: &str = "test-secret";

fn app_with_store(store: Store) -> (Router, AppState) {
    let state: AppState = Arc::new(AppStateInner {
        store,
        jwt_secret: SECRET.into(),
        token_ttl: Duration::days(1),
    });
    (mindful_api::router(state.clone()), state)
}

fn app() -> Router {
    app_with_store(Store::new()).0
}

async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn register(app: &Router, username: &str) -> String {
    let (status, body) = call(
        app,
        "POST",
        "/api/register",
        None,
        Some(json!({ "username": username, "password": "correct horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn register_login_and_current_user() {
    let app = app();

    let (status, body) = call(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({
            "username": "morgan",
            "password": "correct horse",
            "name": "Morgan",
            "email": "morgan@example.com"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["id"], 1);
    assert!(body["user"].get("password").is_none());

    let (status, _) = call(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({ "username": "morgan", "password": "another pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({ "username": "morgan", "password": "wrong password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = call(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({ "username": "morgan", "password": "correct horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = call(&app, "GET", "/api/user", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "morgan");
    assert_eq!(body["name"], "Morgan");
}

#[tokio::test]
async fn register_rejects_short_password() {
    let app = app();
    let (status, body) = call(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({ "username": "sam", "password": "short" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "password");
}

#[tokio::test]
async fn username_length_counts_characters() {
    let app = app();

    let (status, body) = call(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({ "username": "日本", "password": "correct horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "username");

    // 11 characters, 44 bytes
    let emoji = "🌿".repeat(11);
    let (status, body) = call(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({ "username": emoji, "password": "correct horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["user"]["username"], emoji.as_str());

    let (status, _) = call(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({ "username": "日本語", "password": "correct horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn duplicate_registration_keeps_original_account() {
    let app = app();
    register(&app, "taylor").await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({ "username": "taylor", "password": "different pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Username already exists");

    let (status, _) = call(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({ "username": "taylor", "password": "different pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = call(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({ "username": "taylor", "password": "correct horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], 1);
}

#[tokio::test]
async fn protected_routes_require_token() {
    let app = app();
    for uri in ["/api/moods", "/api/journals", "/api/chats", "/api/user"] {
        let (status, body) = call(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["message"], "Unauthorized");
    }

    let (status, _) = call(&app, "GET", "/api/moods", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_for_missing_user_is_refused() {
    let first = app();
    let token = register(&first, "ghost").await;

    // Same secret, fresh store: the user no longer exists.
    let second = app();
    let (status, _) = call(&second, "GET", "/api/moods", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn moods_are_created_listed_and_owned() {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let (app, _) = app_with_store(Store::with_clock(clock.clone()));
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;

    let (status, first) = call(
        &app,
        "POST",
        "/api/moods",
        Some(&alice),
        Some(json!({ "mood": "Okay", "stress": "High", "sleep": "Fair", "sleepDuration": "6h" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["userId"], 1);
    assert_eq!(first["stress"], "High");

    clock.advance(Duration::minutes(1));
    let (_, second) = call(&app, "POST", "/api/moods", Some(&alice), Some(json!({ "mood": "Great" }))).await;
    assert!(second["id"].as_i64().unwrap() > first["id"].as_i64().unwrap());

    let (status, list) = call(&app, "GET", "/api/moods", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&Value> = list.as_array().unwrap().iter().map(|m| &m["id"]).collect();
    assert_eq!(ids, vec![&second["id"], &first["id"]]);

    let (_, bob_list) = call(&app, "GET", "/api/moods", Some(&bob), None).await;
    assert_eq!(bob_list, json!([]));

    let uri = format!("/api/moods/{}", first["id"]);
    let (status, fetched) = call(&app, "GET", &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, first);

    let (status, body) = call(&app, "GET", &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Not authorized to access this mood entry");

    let (status, _) = call(&app, "GET", "/api/moods/999", Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, "GET", "/api/moods/abc", Some(&alice), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn mood_schema_violations_are_bad_requests() {
    let app = app();
    let token = register(&app, "casey").await;

    let (status, body) = call(&app, "POST", "/api/moods", Some(&token), Some(json!({ "mood": "Fine" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "mood");

    let (status, body) = call(
        &app,
        "POST",
        "/api/moods",
        Some(&token),
        Some(json!({ "mood": "Good", "stress": "Extreme" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "stress");

    let (status, _) = call(&app, "POST", "/api/moods", Some(&token), Some(json!({ "notes": "no mood" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn mood_trends_cover_requested_window() {
    let start = DateTime::<Utc>::UNIX_EPOCH + Duration::days(1000);
    let clock = Arc::new(ManualClock::new(start));
    let (app, _) = app_with_store(Store::with_clock(clock.clone()));
    let token = register(&app, "jordan").await;

    call(&app, "POST", "/api/moods", Some(&token), Some(json!({ "mood": "Terrible", "stress": "High" }))).await;
    clock.advance(Duration::days(20));
    call(&app, "POST", "/api/moods", Some(&token), Some(json!({ "mood": "Bad" }))).await;
    clock.advance(Duration::days(5));
    call(&app, "POST", "/api/moods", Some(&token), Some(json!({ "mood": "Great", "stress": "Low" }))).await;

    let (status, week) = call(&app, "GET", "/api/moods/trends", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(week.as_array().unwrap().len(), 2);
    assert_eq!(week[0]["mood"], 2);
    assert_eq!(week[0]["stress"], 2);
    assert_eq!(week[1]["mood"], 5);

    let (_, month) = call(&app, "GET", "/api/moods/trends?range=month", Some(&token), None).await;
    assert_eq!(month.as_array().unwrap().len(), 3);
    assert_eq!(month[0]["mood"], 1);
    assert_eq!(month[0]["stress"], 3);

    let (status, _) = call(&app, "GET", "/api/moods/trends?range=decade", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn journals_follow_owner_rules() {
    let app = app();
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;

    let (status, entry) = call(
        &app,
        "POST",
        "/api/journals",
        Some(&alice),
        Some(json!({ "title": "Morning", "content": "Walked by the river.", "mood": "calm" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["mood"], "calm");

    call(&app, "POST", "/api/journals", Some(&alice), Some(json!({ "title": "Evening", "content": "Read." }))).await;

    let (_, list) = call(&app, "GET", "/api/journals", Some(&alice), None).await;
    assert_eq!(list[0]["title"], "Evening");
    assert_eq!(list[1]["title"], "Morning");

    let uri = format!("/api/journals/{}", entry["id"]);
    let (status, _) = call(&app, "GET", &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(&app, "GET", "/api/journals/42", Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, "POST", "/api/journals", Some(&alice), Some(json!({ "title": "No content" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chat_replies_only_to_user_messages() {
    let app = app();
    let token = register(&app, "robin").await;

    let (status, pair) = call(
        &app,
        "POST",
        "/api/chats",
        Some(&token),
        Some(json!({ "message": "Hi there, I feel sad today", "isUserMessage": true })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let pair = pair.as_array().unwrap().clone();
    assert_eq!(pair.len(), 2);
    assert_eq!(pair[0]["isUserMessage"], true);
    assert_eq!(pair[1]["isUserMessage"], false);
    assert_eq!(pair[1]["message"], mindful_companion::select_response("hello"));

    let (status, single) = call(
        &app,
        "POST",
        "/api/chats",
        Some(&token),
        Some(json!({ "message": "Reminder: check in tonight", "isUserMessage": false })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(single.as_array().unwrap().len(), 1);

    let (_, history) = call(&app, "GET", "/api/chats", Some(&token), None).await;
    let texts: Vec<&str> = history
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["message"].as_str().unwrap())
        .collect();
    assert_eq!(texts.len(), 3);
    assert_eq!(texts[0], "Hi there, I feel sad today");
    assert_eq!(texts[2], "Reminder: check in tonight");

    let (status, _) = call(&app, "POST", "/api/chats", Some(&token), Some(json!({ "message": "no flag" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
