//! Integration tests for Vitrina.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrina-integration-tests
//! ```
//!
//! The tests run against [`FakeBackend`], an in-process axum server that
//! speaks the backend wire contract (nested categories/itemStock, epoch
//! millisecond timestamps, the `{"elements": [...]}` page envelope) so the
//! real `ApiClient` is exercised end to end over HTTP.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::Router;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

use vitrina_core::Category;

type SharedState = Arc<Mutex<BackendState>>;

#[derive(Default)]
struct BackendState {
    /// userId -> (token, mId)
    credentials: HashMap<String, (String, String)>,
    /// userId -> wire items, server ordering
    items: HashMap<String, Vec<Value>>,
    /// (userId, category) -> last allocated sequence number
    sku_counters: HashMap<(String, String), u64>,
}

/// In-process inventory backend for integration tests.
pub struct FakeBackend {
    base_url: Url,
    state: SharedState,
    server: JoinHandle<()>,
}

impl FakeBackend {
    /// Bind an ephemeral port and start serving the five endpoints.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound; tests cannot proceed then.
    pub async fn start() -> Self {
        let state: SharedState = Arc::default();

        let app = Router::new()
            .route("/api/credentials/{user_id}", get(get_credentials))
            .route("/api/save-credentials", post(save_credentials))
            .route("/api/items/{user_id}", get(list_items))
            .route("/api/create-product", post(create_product))
            .route("/api/next-sku/{user_id}/{category}", get(next_sku))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("fake backend addr");
        let base_url = Url::parse(&format!("http://{addr}/")).expect("fake backend url");

        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake backend serve");
        });

        Self {
            base_url,
            state,
            server,
        }
    }

    /// Base URL to point the client's config at.
    #[must_use]
    pub fn base_url(&self) -> Url {
        self.base_url.clone()
    }

    /// Store credentials for a user, bypassing the HTTP surface.
    pub fn seed_credentials(&self, user_id: &str, token: &str, merchant_id: &str) {
        self.lock()
            .credentials
            .insert(user_id.to_string(), (token.to_string(), merchant_id.to_string()));
    }

    /// Register a user with no stored credential fields.
    pub fn seed_empty_credentials(&self, user_id: &str) {
        self.lock()
            .credentials
            .insert(user_id.to_string(), (String::new(), String::new()));
    }

    /// Seed `count` items for a user in stable server order.
    pub fn seed_items(&self, user_id: &str, count: usize) {
        let items = (0..count).map(sample_item).collect();
        self.lock().items.insert(user_id.to_string(), items);
    }

    /// Number of items currently stored for a user.
    #[must_use]
    pub fn item_count(&self, user_id: &str) -> usize {
        self.lock().items.get(user_id).map_or(0, Vec::len)
    }

    fn lock(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// A deterministic wire item in the backend's nested shape.
fn sample_item(n: usize) -> Value {
    let categories = ["Chains", "Rings", "Bracelets"];
    let subcategories = ["Rope", "Diamond", "Curb"];
    let category = categories[n % categories.len()];
    let subcategory = subcategories[n % subcategories.len()];
    json!({
        "id": format!("ITEM{n}"),
        "name": format!("Item {n}"),
        "sku": format!("XX-{n:05}"),
        "price": 1000 + i64::try_from(n).unwrap_or(0),
        "cost": 500,
        "subcategory": subcategory,
        "categories": { "elements": [ { "name": category } ] },
        "itemStock": { "stockCount": 3 },
        "modifiedTime": 1_767_139_200_000_i64 + i64::try_from(n).unwrap_or(0) * 86_400_000
    })
}

async fn get_credentials(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let state = state.lock().unwrap_or_else(PoisonError::into_inner);
    state.credentials.get(&user_id).map_or(Err(StatusCode::NOT_FOUND), |(token, m_id)| {
        Ok(Json(json!({ "token": token, "mId": m_id })))
    })
}

#[derive(Deserialize)]
struct SaveCredentialsBody {
    #[serde(rename = "userId")]
    user_id: String,
    #[serde(default)]
    token: String,
    #[serde(default, rename = "mId")]
    m_id: String,
}

async fn save_credentials(
    State(state): State<SharedState>,
    Json(body): Json<SaveCredentialsBody>,
) -> Result<Json<Value>, (StatusCode, String)> {
    if body.token.is_empty() || body.m_id.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "token and mId are required".to_string(),
        ));
    }
    let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
    state.credentials.insert(body.user_id, (body.token, body.m_id));
    Ok(Json(json!({ "status": "ok" })))
}

#[derive(Deserialize)]
struct PageParams {
    #[serde(default = "default_limit")]
    limit: usize,
    #[serde(default)]
    offset: usize,
}

const fn default_limit() -> usize {
    100
}

async fn list_items(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
    Query(params): Query<PageParams>,
) -> Json<Value> {
    let state = state.lock().unwrap_or_else(PoisonError::into_inner);
    let items = state.items.get(&user_id).map_or(&[][..], Vec::as_slice);
    let page: Vec<Value> = items
        .iter()
        .skip(params.offset)
        .take(params.limit)
        .cloned()
        .collect();
    Json(json!({ "elements": page }))
}

async fn create_product(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, (StatusCode, String)> {
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut has_image = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };
        if name == "image" {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
            has_image = !bytes.is_empty();
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
            fields.insert(name, text);
        }
    }

    for required in ["name", "category", "subcategory", "price", "sku", "userId"] {
        if fields.get(required).is_none_or(String::is_empty) {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("missing required field: {required}"),
            ));
        }
    }

    let category = &fields["category"];
    if category.parse::<Category>().is_err() {
        return Err((StatusCode::BAD_REQUEST, format!("unknown category: {category}")));
    }

    let parse_i64 = |key: &str| fields.get(key).and_then(|v| v.parse::<i64>().ok());
    let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
    let user_items = state.items.entry(fields["userId"].clone()).or_default();

    let item = json!({
        "id": format!("NEW{}", user_items.len()),
        "name": fields["name"],
        "sku": fields["sku"],
        "price": parse_i64("price").unwrap_or(0),
        "cost": parse_i64("cost").unwrap_or(0),
        "subcategory": fields["subcategory"],
        "categories": { "elements": [ { "name": category } ] },
        "itemStock": { "stockCount": parse_i64("stockCount").unwrap_or(1) },
        "modifiedTime": Utc::now().timestamp_millis(),
        "hasImage": has_image
    });

    // Server-defined ordering puts the newest item first.
    user_items.insert(0, item.clone());
    Ok(Json(item))
}

async fn next_sku(
    State(state): State<SharedState>,
    Path((user_id, category)): Path<(String, String)>,
) -> Result<Json<Value>, (StatusCode, String)> {
    if category.parse::<Category>().is_err() {
        return Err((StatusCode::BAD_REQUEST, format!("unknown category: {category}")));
    }
    let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
    let counter = state.sku_counters.entry((user_id, category)).or_insert(0);
    *counter += 1;
    Ok(Json(json!({ "count": *counter })))
}
