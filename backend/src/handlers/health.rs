//! Health check and dataset handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::models::Dataset;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub lots: usize,
    pub stock_items: usize,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let data = state.store.read().await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        lots: data.lots.len(),
        stock_items: data.stock_items.len(),
    })
}

/// The whole dataset in one document
pub async fn get_dataset(State(state): State<AppState>) -> Json<Dataset> {
    Json(state.store.snapshot().await)
}
