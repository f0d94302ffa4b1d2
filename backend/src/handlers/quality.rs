//! Quality control HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::models::{DeleteQuery, QualityCheckQuery};
use crate::services::quality::{QualityCheckInput, QualityService};
use crate::AppState;

/// List quality checks by lot, type and date
pub async fn list_quality_checks(
    State(state): State<AppState>,
    Query(query): Query<QualityCheckQuery>,
) -> impl IntoResponse {
    let service = QualityService::new(state.store.clone());

    match service.list(&query).await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "quality_checks": items }))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_quality_check(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let service = QualityService::new(state.store.clone());

    match service.get(&id).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Record a check; a failing result sends the lot back to processing
pub async fn create_quality_check(
    State(state): State<AppState>,
    Json(input): Json<QualityCheckInput>,
) -> impl IntoResponse {
    let service = QualityService::new(state.store.clone());

    match service.create(input).await {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_quality_check(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<QualityCheckInput>,
) -> impl IntoResponse {
    let service = QualityService::new(state.store.clone());

    match service.update(&id, input).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a quality check; requires `?confirm=true`
pub async fn delete_quality_check(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> impl IntoResponse {
    let service = QualityService::new(state.store.clone());

    match service.delete(&id, query.confirm).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
