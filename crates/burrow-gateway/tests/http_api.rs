use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use burrow_gateway::model::{ClearLinksResponse, LinkResponse};
use burrow_gateway::{App, AppState};
use burrow_core::ShortCode;
use burrow_generator::{Generator, RandomGenerator};
use burrow_shortener::ShortenerService;
use burrow_storage::{InMemoryLinkStore, SqliteLinkStore};
use serde_json::{json, Value};
use tower::ServiceExt;

const BASE_URL: &str = "http://bur.row";

fn app() -> Router {
    let service = ShortenerService::new(InMemoryLinkStore::new(), RandomGenerator::default());
    App::router(AppState::with_base_url(Arc::new(service), BASE_URL))
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

fn shorten_request(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/shorten")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn json_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Yields each route name once before falling back to `fallback`.
struct RouteNameGenerator {
    calls: AtomicUsize,
    fallback: &'static str,
}

impl Generator for RouteNameGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let code = burrow_core::RESERVED_CODES
            .get(call)
            .copied()
            .unwrap_or(self.fallback);
        ShortCode::new_unchecked(code)
    }
}

fn code_of(link: &LinkResponse) -> &str {
    link.short_url
        .strip_prefix(&format!("{BASE_URL}/"))
        .expect("short url starts with the base url")
}

#[tokio::test]
async fn shorten_redirect_and_clear() {
    let app = app();

    let response = send(&app, shorten_request(json!({ "urls": ["https://example.com"] }))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let links: Vec<LinkResponse> = json_body(response).await;
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].original_url, "https://example.com");
    let code = code_of(&links[0]).to_string();
    assert_eq!(code.len(), 6);

    let response = send(&app, get(&format!("/{code}"))).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "https://example.com"
    );

    let response = send(&app, delete("/links")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cleared: ClearLinksResponse = json_body(response).await;
    assert_eq!(cleared.links_removidos, 1);
    assert!(!cleared.message.is_empty());

    let response = send(&app, get(&format!("/{code}"))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn shortening_twice_returns_the_same_url() {
    let app = app();

    let first: Vec<LinkResponse> = json_body(
        send(&app, shorten_request(json!({ "urls": ["https://example.com"] }))).await,
    )
    .await;
    let second: Vec<LinkResponse> = json_body(
        send(&app, shorten_request(json!({ "urls": ["https://example.com"] }))).await,
    )
    .await;

    assert_eq!(first[0].short_url, second[0].short_url);
}

#[tokio::test]
async fn batch_skips_empty_and_invalid_entries() {
    let app = app();

    let response = send(
        &app,
        shorten_request(json!({ "urls": ["https://a.example", "", "nope", "https://b.example"] })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let links: Vec<LinkResponse> = json_body(response).await;
    let originals: Vec<_> = links.iter().map(|l| l.original_url.as_str()).collect();
    assert_eq!(originals, ["https://a.example", "https://b.example"]);
}

#[tokio::test]
async fn empty_url_array_is_bad_request() {
    let app = app();

    let response = send(&app, shorten_request(json!({ "urls": [] }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_bodies_are_bad_requests() {
    let app = app();

    let missing_field = send(&app, shorten_request(json!({ "links": ["https://a.example"] }))).await;
    assert_eq!(missing_field.status(), StatusCode::BAD_REQUEST);

    let malformed = Request::builder()
        .method(Method::POST)
        .uri("/shorten")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    assert_eq!(send(&app, malformed).await.status(), StatusCode::BAD_REQUEST);

    let no_content_type = Request::builder()
        .method(Method::POST)
        .uri("/shorten")
        .body(Body::from(r#"{"urls":["https://a.example"]}"#))
        .unwrap();
    assert_eq!(
        send(&app, no_content_type).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let app = app();

    let response = send(&app, get("/zzzzzz")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response).await;
    assert_eq!(body["error"], "short code not found");

    let response = send(&app, get("/favicon.ico")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_every_link() {
    let app = app();

    let response = send(&app, get("/links")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let links: Vec<LinkResponse> = json_body(response).await;
    assert!(links.is_empty());

    send(
        &app,
        shorten_request(json!({ "urls": ["https://a.example", "https://b.example"] })),
    )
    .await;

    let links: Vec<LinkResponse> = json_body(send(&app, get("/links")).await).await;
    assert_eq!(links.len(), 2);
    assert!(links.iter().all(|l| l.short_url.starts_with(BASE_URL)));
}

#[tokio::test]
async fn short_url_uses_host_header_without_base_url() {
    let service = ShortenerService::new(InMemoryLinkStore::new(), RandomGenerator::default());
    let app = App::router(AppState::new(Arc::new(service)));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/shorten")
        .header(header::HOST, "sho.rt:9000")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "urls": ["https://example.com"] }).to_string()))
        .unwrap();

    let links: Vec<LinkResponse> = json_body(send(&app, request).await).await;
    assert!(links[0].short_url.starts_with("http://sho.rt:9000/"));
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app();

    let response = send(&app, get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn works_against_sqlite() {
    let store = SqliteLinkStore::in_memory().await.unwrap();
    let service = ShortenerService::new(store, RandomGenerator::default());
    let app = App::router(AppState::with_base_url(Arc::new(service), BASE_URL));

    let links: Vec<LinkResponse> = json_body(
        send(&app, shorten_request(json!({ "urls": ["https://sqlite.example"] }))).await,
    )
    .await;
    let code = code_of(&links[0]).to_string();

    let response = send(&app, get(&format!("/{code}"))).await;
    assert_eq!(response.status(), StatusCode::FOUND);

    let cleared: ClearLinksResponse = json_body(send(&app, delete("/links")).await).await;
    assert_eq!(cleared.links_removidos, 1);
}

#[tokio::test]
async fn route_names_are_never_handed_out_as_codes() {
    let generator = RouteNameGenerator {
        calls: AtomicUsize::new(0),
        fallback: "xyz789",
    };
    let service = ShortenerService::new(InMemoryLinkStore::new(), generator);
    let app = App::router(AppState::with_base_url(Arc::new(service), BASE_URL));

    let links: Vec<LinkResponse> = json_body(
        send(&app, shorten_request(json!({ "urls": ["https://example.com"] }))).await,
    )
    .await;
    assert_eq!(code_of(&links[0]), "xyz789");

    let response = send(&app, get("/xyz789")).await;
    assert_eq!(response.status(), StatusCode::FOUND);

    let response = send(&app, get("/links")).await;
    let listed: Vec<LinkResponse> = json_body(response).await;
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn urls_with_control_characters_are_skipped() {
    let app = app();

    let response = send(
        &app,
        shorten_request(json!({ "urls": ["https://a.example/\nx", "https://a.example/\r\nSet-Cookie: a=b"] })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let links: Vec<LinkResponse> = json_body(response).await;
    assert!(links.is_empty());

    let listed: Vec<LinkResponse> = json_body(send(&app, get("/links")).await).await;
    assert!(listed.is_empty());
}

#[tokio::test]
async fn blank_base_url_falls_back_to_host_header() {
    let service = ShortenerService::new(InMemoryLinkStore::new(), RandomGenerator::default());
    let app = App::router(AppState::with_base_url(Arc::new(service), "  "));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/shorten")
        .header(header::HOST, "sho.rt")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "urls": ["https://example.com"] }).to_string()))
        .unwrap();

    let links: Vec<LinkResponse> = json_body(send(&app, request).await).await;
    assert!(links[0].short_url.starts_with("http://sho.rt/"));
}
