//! Seed treatment HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::models::{DeleteQuery, ListQuery};
use crate::services::treatment::{TreatmentInput, TreatmentService};
use crate::AppState;

/// List treatments
pub async fn list_treatments(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let service = TreatmentService::new(state.store.clone());

    match service.list(&query).await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "treatments": items }))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_treatment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let service = TreatmentService::new(state.store.clone());

    match service.get(&id).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create_treatment(
    State(state): State<AppState>,
    Json(input): Json<TreatmentInput>,
) -> impl IntoResponse {
    let service = TreatmentService::new(state.store.clone());

    match service.create(input).await {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_treatment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<TreatmentInput>,
) -> impl IntoResponse {
    let service = TreatmentService::new(state.store.clone());

    match service.update(&id, input).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a treatment; requires `?confirm=true`
pub async fn delete_treatment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> impl IntoResponse {
    let service = TreatmentService::new(state.store.clone());

    match service.delete(&id, query.confirm).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Treatments in progress, soonest to finish first
pub async fn list_ongoing_treatments(State(state): State<AppState>) -> impl IntoResponse {
    let service = TreatmentService::new(state.store.clone());

    match service.ongoing().await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "treatments": items }))).into_response(),
        Err(e) => e.into_response(),
    }
}
