//! HTTP surface: HTML pages for the month editor and client registry, a
//! small JSON API the editor script talks to, and the spreadsheet download.

mod calendar;
mod clients;
mod error;
mod export;
mod plans;

use std::sync::Arc;

use axum::{
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use planner_core::Database;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::config::ExportConfig;
pub use error::ApiError;

static PLANNER_JS: &str = include_str!("../../static/planner.js");

/// Shared by every handler. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub export: Arc<ExportConfig>,
}

impl AppState {
    pub fn new(db: Database, export: ExportConfig) -> Self {
        Self {
            db,
            export: Arc::new(export),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(calendar::index))
        .route("/{year}/{month}", get(calendar::month_view))
        .route(
            "/api/copy_previous_month/{year}/{month}",
            get(plans::copy_previous_month),
        )
        .route("/api/save_plan", post(plans::save_plan))
        .route("/api/clients", get(clients::list_json))
        .route("/export_excel/{year}/{month}", get(export::export_excel))
        .route("/clients", get(clients::list_page))
        .route("/clients/add", post(clients::add))
        .route("/clients/edit/{id}", post(clients::edit))
        .route("/clients/delete/{id}", post(clients::delete))
        .route("/health", get(health))
        .route("/static/planner.js", get(planner_js))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn planner_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        PLANNER_JS,
    )
}

/// Run blocking store work off the async runtime.
pub(crate) async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Worker task failed: {e}")))?
        .map_err(ApiError::from)
}
