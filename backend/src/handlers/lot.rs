//! Seed lot HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::models::{DeleteQuery, LotQuery};
use crate::services::lot::{LotInput, LotService};
use crate::AppState;

/// List lots by status, category, search term and harvest date
pub async fn list_lots(
    State(state): State<AppState>,
    Query(query): Query<LotQuery>,
) -> impl IntoResponse {
    let service = LotService::new(state.store.clone());

    match service.list(&query).await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "lots": items }))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_lot(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let service = LotService::new(state.store.clone());

    match service.get(&id).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a lot under a generated id
pub async fn create_lot(
    State(state): State<AppState>,
    Json(input): Json<LotInput>,
) -> impl IntoResponse {
    let service = LotService::new(state.store.clone());

    match service.create(input).await {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_lot(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<LotInput>,
) -> impl IntoResponse {
    let service = LotService::new(state.store.clone());

    match service.update(&id, input).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a lot and its stock items; requires `?confirm=true`
pub async fn delete_lot(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> impl IntoResponse {
    let service = LotService::new(state.store.clone());

    match service.delete(&id, query.confirm).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Quality checks of a lot, oldest first
pub async fn get_lot_quality_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let service = LotService::new(state.store.clone());

    match service.quality_history(&id).await {
        Ok(checks) => (StatusCode::OK, Json(serde_json::json!({ "lot_id": id, "quality_checks": checks }))).into_response(),
        Err(e) => e.into_response(),
    }
}
