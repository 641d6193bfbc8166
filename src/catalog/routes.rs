//! Catalog, settings and submission API routes
//!
//! These endpoints back the builder UI:
//! - GET /api/settings - Shared RAG settings
//! - POST /api/settings - Replace shared settings
//! - GET /api/catalog - List published bots
//! - POST /api/catalog - Append a catalog record
//! - GET /api/catalog/{id} - One published bot
//! - POST /api/submissions - Accept a runtime submission
//! - GET /api/submissions/latest - Most recent runtime submission

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::api::AppState;
use crate::bot::logo::decode_data_uri;
use crate::bot::{CatalogRecord, SharedSettings, SubmissionRequest};
use crate::bus::BusEvent;

type ApiError = (StatusCode, Json<serde_json::Value>);

/// Request body ceiling for catalog appends. Records embed the logo as a
/// base64 data URI, which is a third larger than the uploaded image, so
/// axum's 2 MB default would turn away ordinary photos.
pub const MAX_RECORD_BYTES: usize = 64 * 1024 * 1024;

fn error(status: StatusCode, message: impl std::fmt::Display) -> ApiError {
    (status, Json(serde_json::json!({ "error": message.to_string() })))
}

/// GET /api/settings - Current shared settings
pub async fn settings_handler(State(state): State<AppState>) -> Json<SharedSettings> {
    Json(state.catalog.settings().await)
}

/// POST /api/settings - Replace shared settings
pub async fn settings_update_handler(
    State(state): State<AppState>,
    Json(settings): Json<SharedSettings>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .catalog
        .update_settings(settings)
        .await
        .map_err(|e| error(StatusCode::INTERNAL_SERVER_ERROR, e))?;

    state.bus.publish(BusEvent::SettingsUpdated { at: Utc::now() });

    Ok(Json(serde_json::json!({ "ok": true })))
}

/// GET /api/catalog - All published bots in insertion order
pub async fn catalog_list_handler(State(state): State<AppState>) -> Json<Vec<CatalogRecord>> {
    Json(state.catalog.list().await)
}

/// GET /api/catalog/{id} - One published bot
pub async fn catalog_record_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<CatalogRecord>, ApiError> {
    state
        .catalog
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "bot not found"))
}

/// POST /api/catalog - Append a record; the response carries the stored id
pub async fn catalog_append_handler(
    State(state): State<AppState>,
    Json(record): Json<CatalogRecord>,
) -> Result<(StatusCode, Json<CatalogRecord>), ApiError> {
    let proposed = record.id;
    let stored = state
        .catalog
        .append(record)
        .await
        .map_err(|e| error(StatusCode::INTERNAL_SERVER_ERROR, e))?;

    if stored.id != proposed {
        tracing::warn!(
            "Client proposed catalog id {}, stored as {}",
            proposed,
            stored.id
        );
    }

    if let Some(logo) = stored.logo.as_deref() {
        match decode_data_uri(logo) {
            Ok(decoded) => tracing::debug!(
                "Catalog record {} logo: {}, {} bytes",
                stored.id,
                decoded.mime,
                decoded.bytes.len()
            ),
            Err(e) => tracing::warn!("Catalog record {} has an unreadable logo: {}", stored.id, e),
        }
    }

    state.bus.publish(BusEvent::CatalogRecordAdded {
        id: stored.id,
        title: stored.title.clone(),
        at: Utc::now(),
    });

    Ok((StatusCode::CREATED, Json(stored)))
}

/// POST /api/submissions - Accept a runtime submission
pub async fn submission_handler(
    State(state): State<AppState>,
    Json(request): Json<SubmissionRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    let services = request.services.len();
    tracing::info!(
        "Accepted submission: {} data source(s), retriever={}, llm={}",
        services,
        request.retriever.is_some(),
        request
            .llm
            .as_ref()
            .map(|l| l.display_name())
            .unwrap_or_else(|| "none".to_string())
    );

    state.catalog.record_submission(request).await;
    state.bus.publish(BusEvent::ConfigurationSubmitted {
        services,
        at: Utc::now(),
    });

    (StatusCode::ACCEPTED, Json(serde_json::json!({ "ok": true })))
}

/// GET /api/submissions/latest - Most recent runtime submission
pub async fn latest_submission_handler(
    State(state): State<AppState>,
) -> Result<Json<SubmissionRequest>, ApiError> {
    state
        .catalog
        .latest_submission()
        .await
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "no submissions yet"))
}
