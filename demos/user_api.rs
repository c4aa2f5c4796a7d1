//! The HTTP glue: two routes over one shared store.
//!
//! - `GET /get` returns `{}` or `{"user": {...}}`
//! - `POST /set` expects `{"firstname": "...", "lastname": "..."}`, trims both
//!   fields, rejects blank ones, and stores them under the `"user"` key
//!
//! `PORT` and `DOCSTORE_PATH` are read from the environment.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use json_docstore::DocumentStore;
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Deserialize)]
struct SetUser {
    #[serde(default)]
    firstname: String,
    #[serde(default)]
    lastname: String,
}

async fn get_user(State(db): State<Arc<DocumentStore>>) -> Json<Value> {
    let mut body = json!({});
    if let Some(user) = db.get("user") {
        body["user"] = user;
    }
    Json(body)
}

async fn set_user(
    State(db): State<Arc<DocumentStore>>,
    Json(req): Json<SetUser>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let firstname = req.firstname.trim();
    let lastname = req.lastname.trim();
    if firstname.is_empty() || lastname.is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "specify both 'firstname' and 'lastname'".into(),
        ));
    }

    db.insert("user", json!({"firstname": firstname, "lastname": lastname}))
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(json!({})))
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let path =
        std::env::var("DOCSTORE_PATH").unwrap_or_else(|_| "database.json".into());

    let db = Arc::new(DocumentStore::open(&path).expect("open document store"));

    let app = Router::new()
        .route("/get", get(get_user))
        .route("/set", post(set_user))
        .with_state(db);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("The server is running at http://{addr}/");
    let listener = tokio::net::TcpListener::bind(addr).await.expect("bind");
    axum::serve(listener, app).await.expect("serve");
}
