//! HTTP API: shared state, service-level handlers and the route table

use crate::bus::SharedBus;
use crate::catalog::{self, CatalogStore};
use axum::{
    extract::{DefaultBodyLimit, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Json, Router,
};
use futures::stream::Stream;
use serde::Serialize;
use std::convert::Infallible;
use std::time::{Duration, Instant};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogStore,
    pub bus: SharedBus,
    pub started: Instant,
}

impl AppState {
    pub fn new(catalog: CatalogStore, bus: SharedBus) -> Self {
        Self {
            catalog,
            bus,
            started: Instant::now(),
        }
    }
}

/// General status response
#[derive(Serialize)]
pub struct StatusResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub git_sha: &'static str,
    pub uptime_secs: u64,
    pub catalog_records: usize,
    pub bus_subscribers: usize,
}

/// GET /status - Service health and catalog size
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        service: "bot-studio",
        version: env!("BOT_STUDIO_VERSION"),
        git_sha: env!("BOT_STUDIO_GIT_SHA"),
        uptime_secs: state.started.elapsed().as_secs(),
        catalog_records: state.catalog.len().await,
        bus_subscribers: state.bus.subscriber_count(),
    })
}

/// GET /events - Server-Sent Events stream of bus events
pub async fn events_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.bus.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(event) => match serde_json::to_string(&event) {
            Ok(json) => Some(Ok(Event::default().data(json))),
            Err(e) => {
                tracing::warn!("Failed to serialize bus event: {}", e);
                None
            }
        },
        // Skip lagged messages
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

/// Build the HTTP API routes (the Dioxus app is mounted alongside these)
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/status", get(status_handler))
        // Event stream (SSE)
        .route("/events", get(events_handler))
        // Shared settings
        .route("/api/settings", get(catalog::settings_handler))
        .route("/api/settings", post(catalog::settings_update_handler))
        // Catalog
        .route("/api/catalog", get(catalog::catalog_list_handler))
        .route(
            "/api/catalog",
            post(catalog::catalog_append_handler)
                .layer(DefaultBodyLimit::max(catalog::MAX_RECORD_BYTES)),
        )
        .route("/api/catalog/{id}", get(catalog::catalog_record_handler))
        // Runtime submissions
        .route("/api/submissions", post(catalog::submission_handler))
        .route("/api/submissions/latest", get(catalog::latest_submission_handler))
        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
