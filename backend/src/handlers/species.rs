//! Species HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::models::{DeleteQuery, ListQuery};
use crate::services::species::{SpeciesInput, SpeciesService};
use crate::AppState;

/// List species
pub async fn list_species(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let service = SpeciesService::new(state.store.clone());

    match service.list(&query).await {
        Ok(species) => (StatusCode::OK, Json(serde_json::json!({ "species": species }))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_species(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let service = SpeciesService::new(state.store.clone());

    match service.get(&id).await {
        Ok(species) => (StatusCode::OK, Json(species)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create_species(
    State(state): State<AppState>,
    Json(input): Json<SpeciesInput>,
) -> impl IntoResponse {
    let service = SpeciesService::new(state.store.clone());

    match service.create(input).await {
        Ok(species) => (StatusCode::CREATED, Json(species)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_species(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<SpeciesInput>,
) -> impl IntoResponse {
    let service = SpeciesService::new(state.store.clone());

    match service.update(&id, input).await {
        Ok(species) => (StatusCode::OK, Json(species)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_species(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> impl IntoResponse {
    let service = SpeciesService::new(state.store.clone());

    match service.delete(&id, query.confirm).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Distinct genera, for the cascading species picker
pub async fn list_genera(State(state): State<AppState>) -> impl IntoResponse {
    let service = SpeciesService::new(state.store.clone());

    match service.genera().await {
        Ok(genera) => (StatusCode::OK, Json(serde_json::json!({ "genera": genera }))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn list_species_by_genus(
    State(state): State<AppState>,
    Path(genus): Path<String>,
) -> impl IntoResponse {
    let service = SpeciesService::new(state.store.clone());

    match service.by_genus(&genus).await {
        Ok(species) => (StatusCode::OK, Json(serde_json::json!({ "species": species }))).into_response(),
        Err(e) => e.into_response(),
    }
}
