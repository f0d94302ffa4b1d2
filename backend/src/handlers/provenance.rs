//! Provenance HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::models::{CodePreviewQuery, DeleteQuery, ListQuery};
use crate::services::provenance::{ProvenanceInput, ProvenanceService};
use crate::AppState;

/// List provenances
pub async fn list_provenances(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let service = ProvenanceService::new(state.store.clone());

    match service.list(&query).await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "provenances": items }))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_provenance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let service = ProvenanceService::new(state.store.clone());

    match service.get(&id).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a provenance; its code is derived server-side
pub async fn create_provenance(
    State(state): State<AppState>,
    Json(input): Json<ProvenanceInput>,
) -> impl IntoResponse {
    let service = ProvenanceService::new(state.store.clone());

    match service.create(input).await {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_provenance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ProvenanceInput>,
) -> impl IntoResponse {
    let service = ProvenanceService::new(state.store.clone());

    match service.update(&id, input).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a provenance; requires `?confirm=true`
pub async fn delete_provenance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> impl IntoResponse {
    let service = ProvenanceService::new(state.store.clone());

    match service.delete(&id, query.confirm).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Code a provenance would get for the given region, species and name
pub async fn preview_provenance_code(
    State(state): State<AppState>,
    Query(query): Query<CodePreviewQuery>,
) -> impl IntoResponse {
    let service = ProvenanceService::new(state.store.clone());

    match service
        .preview_code(&query.region_id, &query.species_id, &query.name)
        .await
    {
        Ok(preview) => (StatusCode::OK, Json(preview)).into_response(),
        Err(e) => e.into_response(),
    }
}
