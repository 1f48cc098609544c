#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Json, Router,
    extract::{Form, State},
    http::{HeaderMap, StatusCode, Uri, header},
    routing::{get, post},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{Value, json};
use spotshelf::config::Config;
use tokio::net::TcpListener;

pub const CLIENT_ID: &str = "id";
pub const CLIENT_SECRET: &str = "secret";
pub const REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";

/// Requests seen by the mock, shared with the test body.
#[derive(Clone, Default)]
pub struct Hits {
    pub exchanges: Arc<AtomicUsize>,
    pub refreshes: Arc<AtomicUsize>,
    pub library: Arc<AtomicUsize>,
    pub forms: Arc<Mutex<Vec<HashMap<String, String>>>>,
    pub authorizations: Arc<Mutex<Vec<String>>>,
}

impl Hits {
    pub fn exchanges(&self) -> usize {
        self.exchanges.load(Ordering::SeqCst)
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }

    pub fn library(&self) -> usize {
        self.library.load(Ordering::SeqCst)
    }

    pub fn last_form(&self) -> HashMap<String, String> {
        self.forms.lock().unwrap().last().cloned().unwrap_or_default()
    }

    pub fn last_authorization(&self) -> String {
        self.authorizations
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_default()
    }
}

/// In-process stand-in for the accounts service and the Web API.
///
/// Authorization codes steer the token endpoint:
/// - `good`: `{"access_token":"A1","refresh_token":"R1","expires_in":3600}`
/// - `no-expiry`: same without `expires_in`
/// - `no-access`: only a refresh token
/// - `huge-expiry`: an `expires_in` of `i64::MAX` seconds
/// - anything else: 400 `invalid_grant`
///
/// Refreshes answer `A2`, `A3`, ... together with a rotated refresh token,
/// except for the refresh tokens `R-bad` (400 `invalid_grant`) and
/// `R-no-access` (no `access_token` in the body).
/// The library endpoints echo the bearer token; the token `revoked` gets a 401.
pub struct MockSpotify {
    pub base: String,
    pub hits: Hits,
}

impl MockSpotify {
    pub async fn start() -> Self {
        let hits = Hits::default();
        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/me/albums", get(library))
            .route("/v1/me/tracks", get(library))
            .route("/v1/me/playlists", get(library))
            .with_state(hits.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{}", addr),
            hits,
        }
    }

    pub fn config(&self) -> Config {
        Config {
            token_url: format!("{}/api/token", self.base),
            api_url: format!("{}/v1", self.base),
            ..Config::new(CLIENT_ID, CLIENT_SECRET, REDIRECT_URI)
        }
    }
}

async fn token(
    State(hits): State<Hits>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    hits.authorizations.lock().unwrap().push(authorization);
    hits.forms.lock().unwrap().push(form.clone());

    match form.get("grant_type").map(String::as_str) {
        Some("authorization_code") => {
            hits.exchanges.fetch_add(1, Ordering::SeqCst);
            match form.get("code").map(String::as_str) {
                Some("good") => (
                    StatusCode::OK,
                    Json(json!({"access_token": "A1", "refresh_token": "R1", "expires_in": 3600})),
                ),
                Some("no-expiry") => (
                    StatusCode::OK,
                    Json(json!({"access_token": "A1", "refresh_token": "R1"})),
                ),
                Some("no-access") => (StatusCode::OK, Json(json!({"refresh_token": "R1"}))),
                Some("huge-expiry") => (
                    StatusCode::OK,
                    Json(json!({
                        "access_token": "A1",
                        "refresh_token": "R1",
                        "expires_in": i64::MAX
                    })),
                ),
                _ => invalid_grant("Invalid authorization code"),
            }
        }
        Some("refresh_token") => {
            let n = hits.refreshes.fetch_add(1, Ordering::SeqCst) + 1;
            match form.get("refresh_token").map(String::as_str) {
                Some("R-bad") => invalid_grant("Refresh token revoked"),
                Some("R-no-access") => (StatusCode::OK, Json(json!({"expires_in": 3600}))),
                _ => (
                    StatusCode::OK,
                    Json(json!({
                        "access_token": format!("A{}", n + 1),
                        "refresh_token": "R-rotated",
                        "expires_in": 3600
                    })),
                ),
            }
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "unsupported_grant_type"})),
        ),
    }
}

fn invalid_grant(description: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "invalid_grant", "error_description": description})),
    )
}

async fn library(
    State(hits): State<Hits>,
    headers: HeaderMap,
    uri: Uri,
) -> (StatusCode, Json<Value>) {
    hits.library.fetch_add(1, Ordering::SeqCst);
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if authorization == "Bearer revoked" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"status": 401, "message": "Invalid access token"}})),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "href": uri.path(),
            "authorization": authorization,
            "items": [{"name": "first"}],
            "total": 1
        })),
    )
}

/// Manually driven clock.
#[derive(Clone)]
pub struct TestClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl TestClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }

    pub fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }

    pub fn source(&self) -> impl Fn() -> DateTime<Utc> + Send + Sync + 'static {
        let now = Arc::clone(&self.now);
        move || *now.lock().unwrap()
    }
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}
