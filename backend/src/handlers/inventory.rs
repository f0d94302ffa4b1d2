//! Stock inventory HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::models::{DeleteQuery, ListQuery};
use crate::services::inventory::{StockItemInput, StockService};
use crate::AppState;

/// List stock items
pub async fn list_stock_items(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let service = StockService::new(state.store.clone());

    match service.list(&query).await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "stock_items": items }))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_stock_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let service = StockService::new(state.store.clone());

    match service.get(&id).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create_stock_item(
    State(state): State<AppState>,
    Json(input): Json<StockItemInput>,
) -> impl IntoResponse {
    let service = StockService::new(state.store.clone());

    match service.create(input).await {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_stock_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<StockItemInput>,
) -> impl IntoResponse {
    let service = StockService::new(state.store.clone());

    match service.update(&id, input).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a stock item; requires `?confirm=true`
pub async fn delete_stock_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> impl IntoResponse {
    let service = StockService::new(state.store.clone());

    match service.delete(&id, query.confirm).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
