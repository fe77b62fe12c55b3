//! In-process mock of the AnimalSpotter service for integration tests.
//!
//! The server binds a random local port and serves under `/api`, matching
//! the layout of the hosted service. Every request is counted and every
//! Authorization header recorded so tests can check what reached the wire.

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use animalspotter_core::{ApiClient, Session};
use axum::{
    extract::{Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Default)]
pub struct Recorder {
    hits: AtomicUsize,
    auth_headers: Mutex<Vec<String>>,
    origin: Mutex<String>,
}

impl Recorder {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn auth_headers(&self) -> Vec<String> {
        self.auth_headers.lock().unwrap().clone()
    }

    fn origin(&self) -> String {
        self.origin.lock().unwrap().clone()
    }
}

pub struct MockServer {
    pub origin: String,
    pub recorder: Arc<Recorder>,
}

impl MockServer {
    pub fn base_url(&self) -> String {
        format!("{}/api", self.origin)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.origin, path)
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url(), Session::new()).expect("Failed to build client")
    }
}

/// Start the standard mock service
pub async fn spawn_default() -> MockServer {
    spawn_with(default_routes()).await
}

/// Start a server with custom routes. Routes receive the shared `Recorder`
/// as state; counting and header capture apply to every route.
pub async fn spawn_with(routes: Router<Arc<Recorder>>) -> MockServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let origin = format!("http://{}", listener.local_addr().unwrap());

    let recorder = Arc::new(Recorder::default());
    *recorder.origin.lock().unwrap() = origin.clone();

    let app = routes
        .layer(middleware::from_fn_with_state(recorder.clone(), record))
        .with_state(recorder.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockServer { origin, recorder }
}

/// Address that refuses connections
pub async fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

async fn record(State(recorder): State<Arc<Recorder>>, request: Request, next: Next) -> Response {
    recorder.hits.fetch_add(1, Ordering::SeqCst);
    if let Some(value) = request.headers().get(header::AUTHORIZATION) {
        let value = value.to_str().unwrap_or_default().to_string();
        recorder.auth_headers.lock().unwrap().push(value);
    }
    next.run(request).await
}

pub fn default_routes() -> Router<Arc<Recorder>> {
    Router::new()
        .route("/api/users/signup", post(sign_up))
        .route("/api/users/login", post(sign_in))
        .route("/api/animals/all", get(animal_names))
        .route("/api/animals/{name}", get(animal))
        .route("/images/fox.png", get(fox_png))
        .route("/images/broken.png", get(|| async { "definitely not an image" }))
        .route("/images/missing.png", get(missing_png))
}

/// Token issued by the default sign-in route
pub fn token_for(username: &str) -> String {
    format!("token-for-{}", username)
}

pub fn fox_json(image_url: &str) -> Value {
    json!({
        "name": "Fox",
        "description": "A small red fox",
        "imageURL": image_url,
        "latitude": 1.0,
        "longitude": 2.0,
        "timeSeen": "2020-01-01T00:00:00Z"
    })
}

/// A 2x2 red PNG
pub fn png_bytes() -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("Bearer token-for-"))
        .unwrap_or(false)
}

async fn sign_up(Json(body): Json<Value>) -> Response {
    match body["username"].as_str() {
        // Well-formed body on a non-200 status
        Some("taken") => (StatusCode::CONFLICT, Json(json!({ "username": "taken" }))).into_response(),
        Some(_) if body["password"].is_string() => StatusCode::OK.into_response(),
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn sign_in(Json(body): Json<Value>) -> Response {
    match (body["username"].as_str(), body["password"].as_str()) {
        (Some(username), Some("secret")) => Json(json!({ "token": token_for(username) })).into_response(),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad credentials" }))).into_response(),
    }
}

async fn animal_names(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        // A valid names list, but the status must still fail the call
        return (StatusCode::UNAUTHORIZED, Json(json!(["Fox"]))).into_response();
    }
    Json(json!(["Fox", "Owl", "Red Fox"])).into_response()
}

async fn animal(
    State(recorder): State<Arc<Recorder>>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let origin = recorder.origin();
    match name.as_str() {
        "Fox" => Json(fox_json(&format!("{}/images/fox.png", origin))).into_response(),
        "Red Fox" => Json(json!({
            "name": "Red Fox",
            "description": "Redder",
            "imageURL": format!("{}/images/fox.png", origin),
            "latitude": 3.5,
            "longitude": -4.25,
            "timeSeen": "2021-05-06T07:08:09Z"
        }))
        .into_response(),
        "Brokenimage" => Json(fox_json(&format!("{}/images/broken.png", origin))).into_response(),
        "Noimage" => Json(fox_json(&format!("{}/images/missing.png", origin))).into_response(),
        "Badurl" => Json(fox_json("not a url")).into_response(),
        "Garbled" => Json(json!({ "name": 42 })).into_response(),
        "Empty" => StatusCode::OK.into_response(),
        _ => (StatusCode::NOT_FOUND, Json(fox_json("http://x/fox.png"))).into_response(),
    }
}

async fn fox_png() -> Response {
    ([(header::CONTENT_TYPE, "image/png")], png_bytes()).into_response()
}

/// Decodable picture served with a 404
async fn missing_png() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "image/png")],
        png_bytes(),
    )
        .into_response()
}
