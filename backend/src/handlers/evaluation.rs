//! Evaluation program and fructification evaluation HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::models::{DeleteQuery, ListQuery};
use crate::services::evaluation::{
    EvaluationProgramInput, EvaluationProgramService, FructificationInput, FructificationService,
};
use crate::AppState;

/// List evaluation programs
pub async fn list_evaluation_programs(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let service = EvaluationProgramService::new(state.store.clone());

    match service.list(&query).await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "evaluation_programs": items }))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_evaluation_program(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let service = EvaluationProgramService::new(state.store.clone());

    match service.get(&id).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create_evaluation_program(
    State(state): State<AppState>,
    Json(input): Json<EvaluationProgramInput>,
) -> impl IntoResponse {
    let service = EvaluationProgramService::new(state.store.clone());

    match service.create(input).await {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_evaluation_program(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<EvaluationProgramInput>,
) -> impl IntoResponse {
    let service = EvaluationProgramService::new(state.store.clone());

    match service.update(&id, input).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete an evaluation program; requires `?confirm=true`
pub async fn delete_evaluation_program(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> impl IntoResponse {
    let service = EvaluationProgramService::new(state.store.clone());

    match service.delete(&id, query.confirm).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// List fructification evaluations
pub async fn list_fructification_evaluations(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let service = FructificationService::new(state.store.clone());

    match service.list(&query).await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "fructification_evaluations": items }))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_fructification_evaluation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let service = FructificationService::new(state.store.clone());

    match service.get(&id).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create_fructification_evaluation(
    State(state): State<AppState>,
    Json(input): Json<FructificationInput>,
) -> impl IntoResponse {
    let service = FructificationService::new(state.store.clone());

    match service.create(input).await {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_fructification_evaluation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<FructificationInput>,
) -> impl IntoResponse {
    let service = FructificationService::new(state.store.clone());

    match service.update(&id, input).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a fructification evaluation; requires `?confirm=true`
pub async fn delete_fructification_evaluation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> impl IntoResponse {
    let service = FructificationService::new(state.store.clone());

    match service.delete(&id, query.confirm).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
