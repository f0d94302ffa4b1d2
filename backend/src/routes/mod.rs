//! Route definitions for the Seed Production Management Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/dataset", get(handlers::get_dataset))
        // Reference data
        .nest("/species", species_routes())
        .nest("/regions", region_routes())
        .nest("/provenances", provenance_routes())
        .nest("/providers", provider_routes())
        .nest("/stations", station_routes())
        // Seed chain
        .nest("/lots", lot_routes())
        .nest("/treatments", treatment_routes())
        .nest("/quality-checks", quality_routes())
        .nest("/stock", stock_routes())
        .nest("/distributions", distribution_routes())
        // Planning
        .nest("/seed-needs", seed_need_routes())
        .nest("/evaluation-programs", evaluation_program_routes())
        .nest("/fructification-evaluations", fructification_routes())
        // Dashboard
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/analysis", get(handlers::get_analysis))
        .route("/insights", post(handlers::generate_insights))
}

fn species_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_species).post(handlers::create_species))
        .route("/genera", get(handlers::list_genera))
        .route("/genera/:genus", get(handlers::list_species_by_genus))
        .route(
            "/:id",
            get(handlers::get_species)
                .put(handlers::update_species)
                .delete(handlers::delete_species),
        )
}

fn region_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_regions).post(handlers::create_region))
        .route(
            "/:id",
            get(handlers::get_region)
                .put(handlers::update_region)
                .delete(handlers::delete_region),
        )
}

fn provenance_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_provenances).post(handlers::create_provenance))
        .route("/code-preview", get(handlers::preview_provenance_code))
        .route(
            "/:id",
            get(handlers::get_provenance)
                .put(handlers::update_provenance)
                .delete(handlers::delete_provenance),
        )
}

fn provider_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_providers).post(handlers::create_provider))
        .route(
            "/:id",
            get(handlers::get_provider)
                .put(handlers::update_provider)
                .delete(handlers::delete_provider),
        )
}

fn station_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_stations).post(handlers::create_station))
        .route(
            "/:id",
            get(handlers::get_station)
                .put(handlers::update_station)
                .delete(handlers::delete_station),
        )
}

/// Lot routes; distributing or deleting a lot clears its stock
fn lot_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_lots).post(handlers::create_lot))
        .route(
            "/:id",
            get(handlers::get_lot)
                .put(handlers::update_lot)
                .delete(handlers::delete_lot),
        )
        .route("/:id/quality-history", get(handlers::get_lot_quality_history))
}

fn treatment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_treatments).post(handlers::create_treatment))
        .route("/ongoing", get(handlers::list_ongoing_treatments))
        .route(
            "/:id",
            get(handlers::get_treatment)
                .put(handlers::update_treatment)
                .delete(handlers::delete_treatment),
        )
}

fn quality_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_quality_checks).post(handlers::create_quality_check))
        .route(
            "/:id",
            get(handlers::get_quality_check)
                .put(handlers::update_quality_check)
                .delete(handlers::delete_quality_check),
        )
}

fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_stock_items).post(handlers::create_stock_item))
        .route(
            "/:id",
            get(handlers::get_stock_item)
                .put(handlers::update_stock_item)
                .delete(handlers::delete_stock_item),
        )
}

fn distribution_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_distributions).post(handlers::create_distribution))
        .route("/summary", get(handlers::get_distribution_summary))
        .route(
            "/:id",
            get(handlers::get_distribution)
                .put(handlers::update_distribution)
                .delete(handlers::delete_distribution),
        )
}

fn seed_need_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_seed_needs).post(handlers::create_seed_need))
        .route("/dranefs", get(handlers::list_dranefs))
        .route(
            "/:id",
            get(handlers::get_seed_need)
                .put(handlers::update_seed_need)
                .delete(handlers::delete_seed_need),
        )
}

fn evaluation_program_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_evaluation_programs).post(handlers::create_evaluation_program),
        )
        .route(
            "/:id",
            get(handlers::get_evaluation_program)
                .put(handlers::update_evaluation_program)
                .delete(handlers::delete_evaluation_program),
        )
}

fn fructification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_fructification_evaluations)
                .post(handlers::create_fructification_evaluation),
        )
        .route(
            "/:id",
            get(handlers::get_fructification_evaluation)
                .put(handlers::update_fructification_evaluation)
                .delete(handlers::delete_fructification_evaluation),
        )
}
