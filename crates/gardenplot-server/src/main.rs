//! GardenPlot Layout Server
//!
//! A small in-memory layout API the canvas editor saves to and loads from.
//!
//! ## Endpoints
//!
//! - `GET /{garden}/canvas/data` returns the saved layout (empty when none)
//! - `POST /{garden}/canvas/save` stores the posted layout
//! - `POST /{garden}/items/{placement}/position` records a moved item

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use dashmap::DashMap;
use gardenplot_core::SceneDocument;
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::CorsLayer;
use tracing::info;

/// An item position reported after a drag.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemPosition {
    x: f64,
    y: f64,
}

/// Standard success envelope.
#[derive(Debug, Serialize)]
struct SaveResponse {
    success: bool,
}

/// Shared application state
struct AppState {
    /// Saved layouts by garden id
    layouts: DashMap<String, SceneDocument>,
    /// Latest reported position per (garden, placement)
    positions: DashMap<(String, String), ItemPosition>,
}

impl AppState {
    fn new() -> Self {
        Self {
            layouts: DashMap::new(),
            positions: DashMap::new(),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gardenplot_server=info,tower_http=info".into()),
        )
        .init();

    let state = Arc::new(AppState::new());
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 3030));
    info!("GardenPlot layout server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app).await.expect("server error");
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/{garden}/canvas/data", get(fetch_layout))
        .route("/{garden}/canvas/save", post(save_layout))
        .route("/{garden}/items/{placement}/position", post(update_position))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Index page
async fn index() -> &'static str {
    "GardenPlot Layout Server"
}

/// Health check
async fn health() -> &'static str {
    "ok"
}

/// Return the saved layout, or an empty one so the editor starts blank.
async fn fetch_layout(
    Path(garden): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Json<SceneDocument> {
    let layout = state
        .layouts
        .get(&garden)
        .map(|entry| entry.clone())
        .unwrap_or_default();
    Json(layout)
}

/// Store the posted layout for the garden.
async fn save_layout(
    Path(garden): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(document): Json<SceneDocument>,
) -> Json<SaveResponse> {
    info!(
        "saved layout for {} ({} objects)",
        garden,
        document.objects.len()
    );
    state.layouts.insert(garden, document);
    Json(SaveResponse { success: true })
}

/// Record a placed item's new position.
async fn update_position(
    Path((garden, placement)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(position): Json<ItemPosition>,
) -> (StatusCode, Json<SaveResponse>) {
    info!(
        "item {} in {} moved to ({}, {})",
        placement, garden, position.x, position.y
    );
    state.positions.insert((garden, placement), position);
    (StatusCode::OK, Json(SaveResponse { success: true }))
}
