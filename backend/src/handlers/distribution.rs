//! Distribution HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::models::{DeleteQuery, DistributionSummaryQuery, ListQuery};
use crate::services::distribution::{DistributionInput, DistributionService};
use crate::AppState;

/// List distributions
pub async fn list_distributions(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let service = DistributionService::new(state.store.clone());

    match service.list(&query).await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "distributions": items }))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_distribution(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let service = DistributionService::new(state.store.clone());

    match service.get(&id).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create_distribution(
    State(state): State<AppState>,
    Json(input): Json<DistributionInput>,
) -> impl IntoResponse {
    let service = DistributionService::new(state.store.clone());

    match service.create(input).await {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_distribution(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<DistributionInput>,
) -> impl IntoResponse {
    let service = DistributionService::new(state.store.clone());

    match service.update(&id, input).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a distribution; requires `?confirm=true`
pub async fn delete_distribution(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> impl IntoResponse {
    let service = DistributionService::new(state.store.clone());

    match service.delete(&id, query.confirm).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Distributed quantities by species or destination
pub async fn get_distribution_summary(
    State(state): State<AppState>,
    Query(query): Query<DistributionSummaryQuery>,
) -> impl IntoResponse {
    let service = DistributionService::new(state.store.clone());
    let top_n = state.config.dashboard.distribution_top_n;

    match service.summary(query.by, &query.list_query(), top_n).await {
        Ok(rows) => (StatusCode::OK, Json(serde_json::json!({ "by": query.by, "rows": rows }))).into_response(),
        Err(e) => e.into_response(),
    }
}
