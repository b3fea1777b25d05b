//! Fixture server for exercising the API client over real HTTP.
//!
//! Serves an in-memory widget store plus a few diagnostic routes: echoing a
//! JSON body, answering with an arbitrary status, returning a non-JSON body,
//! reflecting request headers, and responding slowly.

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Widget {
    pub id: Uuid,
    pub name: String,
    pub size: u32,
}

#[derive(Deserialize)]
pub struct CreateWidget {
    pub name: String,
    #[serde(default)]
    pub size: u32,
}

#[derive(Deserialize)]
pub struct UpdateWidget {
    pub name: Option<String>,
    pub size: Option<u32>,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Widget>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/widgets", get(list_widgets).post(create_widget))
        .route("/widgets/{id}", get(get_widget).put(update_widget).delete(delete_widget))
        .route("/echo", post(echo))
        .route("/status/{code}", get(status))
        .route("/text", get(text))
        .route("/headers", get(headers))
        .route("/slow/{ms}", get(slow))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_widgets(State(db): State<Db>) -> Json<Vec<Widget>> {
    let widgets = db.read().await;
    Json(widgets.values().cloned().collect())
}

async fn create_widget(
    State(db): State<Db>,
    Json(input): Json<CreateWidget>,
) -> (StatusCode, Json<Widget>) {
    let widget = Widget {
        id: Uuid::new_v4(),
        name: input.name,
        size: input.size,
    };
    db.write().await.insert(widget.id, widget.clone());
    (StatusCode::CREATED, Json(widget))
}

async fn get_widget(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Widget>, (StatusCode, Json<Value>)> {
    let widgets = db.read().await;
    widgets.get(&id).cloned().map(Json).ok_or_else(not_found)
}

async fn update_widget(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateWidget>,
) -> Result<Json<Widget>, (StatusCode, Json<Value>)> {
    let mut widgets = db.write().await;
    let widget = widgets.get_mut(&id).ok_or_else(not_found)?;
    if let Some(name) = input.name {
        widget.name = name;
    }
    if let Some(size) = input.size {
        widget.size = size;
    }
    Ok(Json(widget.clone()))
}

async fn delete_widget(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Widget>, (StatusCode, Json<Value>)> {
    let mut widgets = db.write().await;
    widgets.remove(&id).map(Json).ok_or_else(not_found)
}

fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({"error": "not found"})))
}

async fn echo(Json(body): Json<Value>) -> Json<Value> {
    Json(body)
}

async fn status(Path(code): Path<u16>) -> (StatusCode, Json<Value>) {
    let code = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    (code, Json(json!({"error": "boom"})))
}

async fn text() -> &'static str {
    "not json"
}

/// Request headers as a JSON object; for repeated names the last value wins.
async fn headers(headers: HeaderMap) -> Json<Map<String, Value>> {
    let mut map = Map::new();
    for (name, value) in &headers {
        if let Ok(v) = value.to_str() {
            map.insert(name.as_str().to_string(), Value::String(v.to_string()));
        }
    }
    Json(map)
}

async fn slow(Path(ms): Path<u64>) -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    Json(json!({}))
}
