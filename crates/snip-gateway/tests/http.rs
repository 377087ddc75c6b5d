use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use jiff::{SignedDuration, Timestamp};
use serde_json::{json, Value};
use snip_core::{ManualClock, Settings};
use snip_gateway::{App, AppState};
use snip_generator::SeqGenerator;
use snip_redirector::ResolveService;
use snip_shortener::ShortenService;
use snip_storage::{InMemoryStore, MappingStore};
use tower::ServiceExt;

const BASE_URL: &str = "https://sn.ip";

struct TestApp {
    router: Router,
    clock: ManualClock,
    store: Arc<InMemoryStore>,
}

fn start() -> Timestamp {
    Timestamp::from_second(1_700_000_000).unwrap()
}

fn app_with(settings: Settings) -> TestApp {
    let store = Arc::new(InMemoryStore::new());
    let clock = ManualClock::new(start());
    let shortener = ShortenService::new(
        Arc::clone(&store),
        SeqGenerator::with_prefix("sn"),
        clock.clone(),
        settings,
    )
    .unwrap();
    let resolver = ResolveService::new(Arc::clone(&store), clock.clone());
    let state = AppState::new(Arc::new(shortener), Arc::new(resolver), BASE_URL);

    TestApp {
        router: App::router(state),
        clock,
        store,
    }
}

fn app() -> TestApp {
    app_with(Settings::default())
}

async fn send(app: &TestApp, request: Request<Body>) -> Response {
    app.router.clone().oneshot(request).await.unwrap()
}

async fn shorten(app: &TestApp, body: Value) -> Response {
    let request = Request::post("/api/shorten")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get(app: &TestApp, uri: &str) -> Response {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health() {
    let app = app();
    let response = get(&app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn shorten_with_custom_code() {
    let app = app();

    let response = shorten(
        &app,
        json!({ "longUrl": "https://example.com/page", "shortcode": "abc123", "validity": 1 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        json_body(response).await,
        json!({
            "shortcode": "abc123",
            "shortUrl": "https://sn.ip/abc123",
            "expiresAt": "2023-11-14T22:14:20Z"
        })
    );
}

#[tokio::test]
async fn shorten_with_generated_code() {
    let app = app();

    let response = shorten(&app, json!({ "longUrl": "https://example.com" })).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["shortcode"], "sn000000");
    assert_eq!(body["shortUrl"], "https://sn.ip/sn000000");
    assert_eq!(body["expiresAt"], "2023-11-14T22:43:20Z");
}

#[tokio::test]
async fn blank_shortcode_gets_a_generated_code() {
    let app = app();

    let response = shorten(&app, json!({ "longUrl": "https://example.com", "shortcode": "" })).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await["shortcode"], "sn000000");
}

#[tokio::test]
async fn url_with_control_characters_is_rejected() {
    let app = app();

    let response = shorten(
        &app,
        json!({ "longUrl": "https://example.com/a\u{1}b", "shortcode": "ctl" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "invalid_url");
    assert_eq!(get(&app, "/ctl").await.status(), StatusCode::NOT_FOUND);
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn shorten_errors_map_to_status() {
    let app = app();
    shorten(&app, json!({ "longUrl": "https://example.com", "shortcode": "taken" })).await;

    let cases = [
        (json!({ "longUrl": "not-a-url" }), StatusCode::BAD_REQUEST, "invalid_url"),
        (json!({}), StatusCode::BAD_REQUEST, "invalid_url"),
        (
            json!({ "longUrl": "https://example.com", "validity": 0 }),
            StatusCode::BAD_REQUEST,
            "invalid_validity",
        ),
        (
            json!({ "longUrl": "https://example.com", "validity": "soon" }),
            StatusCode::BAD_REQUEST,
            "invalid_validity",
        ),
        (
            json!({ "longUrl": "https://example.com", "shortcode": "no spaces" }),
            StatusCode::BAD_REQUEST,
            "invalid_shortcode",
        ),
        (
            json!({ "longUrl": "https://other.example", "shortcode": "taken" }),
            StatusCode::CONFLICT,
            "code_taken",
        ),
    ];

    for (body, status, kind) in cases {
        let response = shorten(&app, body.clone()).await;
        assert_eq!(response.status(), status, "body {body}");
        assert_eq!(json_body(response).await["error"], kind, "body {body}");
    }

    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn exhausted_generation_is_unavailable() {
    let app = app_with(Settings::builder().max_generation_retries(1).build());
    shorten(&app, json!({ "longUrl": "https://example.com", "shortcode": "sn000000" })).await;

    let response = shorten(&app, json!({ "longUrl": "https://example.com" })).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json_body(response).await["error"], "generation_exhausted");
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = app();
    let request = Request::post("/api/shorten")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = send(&app, request).await;

    assert!(response.status().is_client_error());
    assert_eq!(json_body(response).await["error"], "invalid_request");
}

#[tokio::test]
async fn resolve_follows_expiry() {
    let app = app();
    shorten(
        &app,
        json!({ "longUrl": "https://example.com/page", "shortcode": "abc123", "validity": 1 }),
    )
    .await;

    app.clock.advance(SignedDuration::from_secs(30));
    let response = get(&app, "/api/resolve/abc123").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "longUrl": "https://example.com/page", "expiresAt": "2023-11-14T22:14:20Z" })
    );

    app.clock.advance(SignedDuration::from_secs(31));
    let response = get(&app, "/api/resolve/abc123").await;
    assert_eq!(response.status(), StatusCode::GONE);
    assert_eq!(json_body(response).await["error"], "expired");

    let response = get(&app, "/api/resolve/abc123").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"], "not_found");
}

#[tokio::test]
async fn redirect_to_long_url() {
    let app = app();
    shorten(&app, json!({ "longUrl": "https://example.com/page", "shortcode": "abc" })).await;

    let response = get(&app, "/abc").await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "https://example.com/page"
    );
}

#[tokio::test]
async fn redirect_unknown_code_is_not_found() {
    let app = app();

    let response = get(&app, "/missing").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"], "not_found");
}
