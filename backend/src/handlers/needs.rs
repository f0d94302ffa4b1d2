//! Seed needs HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::models::{DeleteQuery, ListQuery};
use crate::services::needs::{SeedNeedInput, SeedNeedService};
use crate::AppState;

/// List seed needs
pub async fn list_seed_needs(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let service = SeedNeedService::new(state.store.clone());

    match service.list(&query).await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "seed_needs": items }))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_seed_need(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let service = SeedNeedService::new(state.store.clone());

    match service.get(&id).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a seed need; the seed quantity is computed from the species
pub async fn create_seed_need(
    State(state): State<AppState>,
    Json(input): Json<SeedNeedInput>,
) -> impl IntoResponse {
    let service = SeedNeedService::new(state.store.clone());

    match service.create(input).await {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_seed_need(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<SeedNeedInput>,
) -> impl IntoResponse {
    let service = SeedNeedService::new(state.store.clone());

    match service.update(&id, input).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a seed need; requires `?confirm=true`
pub async fn delete_seed_need(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> impl IntoResponse {
    let service = SeedNeedService::new(state.store.clone());

    match service.delete(&id, query.confirm).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// DRANEF to provinces reference table
pub async fn list_dranefs(State(state): State<AppState>) -> impl IntoResponse {
    let service = SeedNeedService::new(state.store.clone());
    (StatusCode::OK, Json(serde_json::json!({ "dranefs": service.dranefs() })))
}
