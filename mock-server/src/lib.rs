use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub name: String,
    pub genre: String,
    pub rating: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Media {
    fn new(name: &str, genre: &str, rating: f64, kind: &str) -> Self {
        Self {
            name: name.to_string(),
            genre: genre.to_string(),
            rating,
            kind: kind.to_string(),
        }
    }
}

/// What `/echo` reports back about the request it received.
#[derive(Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

pub type Db = Arc<RwLock<Vec<Media>>>;

/// Entries the server starts with, in serving order.
pub fn seed() -> Vec<Media> {
    vec![
        Media::new("Dark", "Mystery", 8.7, "Serie"),
        Media::new("Fargo", "Crime", 8.9, "Serie"),
        Media::new("Arrival", "Drama", 7.9, "Movie"),
        Media::new("Atlanta", "Comedy", 8.6, "Serie"),
        Media::new("Heat", "Crime", 8.3, "Movie"),
    ]
}

pub fn app() -> Router {
    app_with(seed())
}

pub fn app_with(entries: Vec<Media>) -> Router {
    let db: Db = Arc::new(RwLock::new(entries));
    Router::new()
        .route("/media", get(list_media).post(create_media))
        .route("/media/type/{kind}", get(list_media_by_type))
        .route("/echo", any(echo))
        .route("/status/{code}", any(status))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_media(State(db): State<Db>) -> Json<Vec<Media>> {
    Json(db.read().await.clone())
}

async fn list_media_by_type(State(db): State<Db>, Path(kind): Path<String>) -> Json<Vec<Media>> {
    let entries = db.read().await;
    Json(entries.iter().filter(|m| m.kind == kind).cloned().collect())
}

async fn create_media(State(db): State<Db>, Json(input): Json<Media>) -> (StatusCode, Json<Media>) {
    db.write().await.push(input.clone());
    (StatusCode::CREATED, Json(input))
}

async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Echo> {
    let headers = headers
        .iter()
        .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
        .collect();
    Json(Echo {
        method: method.to_string(),
        headers,
        body,
    })
}

async fn status(Path(code): Path<u16>) -> (StatusCode, Json<Value>) {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    (status, Json(json!({})))
}
