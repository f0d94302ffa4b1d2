//! HTTP API tests
//!
//! Drive the full router against the embedded demo dataset:
//! - Lot id generation and the distribute/delete cascades
//! - Quality failures sending lots back to processing
//! - Seed need quantities computed server-side
//! - Confirmation of deletions
//! - Dashboard, analysis export and insights

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;

use seedbank_backend::{create_app, store, AppState, Config, Store};

// ============================================================================
// Helpers
// ============================================================================

fn app() -> Router {
    let mut config = Config::default();
    config.insights.delay_ms = 0;
    let store = Store::new(store::demo_dataset().unwrap());
    create_app(AppState::new(store, config))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

fn new_lot(species_id: &str, provenance_id: &str) -> Value {
    json!({
        "harvest_year": 2024,
        "harvest_date": "2024-06-01",
        "quantity_kg": "35.5",
        "category": "harvest",
        "species_id": species_id,
        "provenance_id": provenance_id,
        "seed_stand": "Aknoul",
        "srs_id": "srs-01",
        "status": "in_stock"
    })
}

// ============================================================================
// Health and dataset
// ============================================================================

#[tokio::test]
async fn test_health_reports_dataset_size() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/v1/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["lots"], 5);
    assert_eq!(body["stock_items"], 3);
}

#[tokio::test]
async fn test_dataset_returns_every_collection() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/v1/dataset", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["regions"].as_array().unwrap().len(), 19);
    assert_eq!(body["seed_needs"].as_array().unwrap().len(), 4);
}

// ============================================================================
// Lots
// ============================================================================

#[tokio::test]
async fn test_create_lot_generates_sequential_ids() {
    let app = app();

    let (status, first) = send(&app, "POST", "/api/v1/lots", Some(new_lot("esp-034", "prov-03"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["id"], "24-PH-I3-001");

    let (status, second) = send(&app, "POST", "/api/v1/lots", Some(new_lot("esp-034", "prov-03"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["id"], "24-PH-I3-002");

    let (_, list) = send(&app, "GET", "/api/v1/lots?q=24-PH-I3", None).await;
    assert_eq!(list["lots"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_lot_without_species_is_rejected() {
    let app = app();
    let mut lot = new_lot("esp-034", "prov-03");
    lot["species_id"] = Value::Null;

    let (status, body) = send(&app, "POST", "/api/v1/lots", Some(lot)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "species_id");

    let (_, health) = send(&app, "GET", "/api/v1/health", None).await;
    assert_eq!(health["lots"], 5);
}

#[tokio::test]
async fn test_create_lot_with_unknown_provenance_is_rejected() {
    let app = app();
    let (status, body) = send(&app, "POST", "/api/v1/lots", Some(new_lot("esp-034", "prov-99"))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "provenance_id");
}

#[tokio::test]
async fn test_distributing_lot_removes_only_its_stock() {
    let app = app();
    let (_, lot) = send(&app, "GET", "/api/v1/lots/23-PH-I3-001", None).await;

    let mut update = lot.clone();
    update["status"] = json!("distributed");
    let (status, updated) = send(&app, "PUT", "/api/v1/lots/23-PH-I3-001", Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], "23-PH-I3-001");
    assert_eq!(updated["status"], "distributed");

    let (_, stock) = send(&app, "GET", "/api/v1/stock", None).await;
    let lots: Vec<&str> = stock["stock_items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["lot_id"].as_str().unwrap())
        .collect();
    assert_eq!(lots.len(), 2);
    assert!(!lots.contains(&"23-PH-I3-001"));
}

#[tokio::test]
async fn test_delete_lot_requires_confirmation_then_cascades() {
    let app = app();

    let (status, body) = send(&app, "DELETE", "/api/v1/lots/24-PC-IV1-001", None).await;
    assert_eq!(status, StatusCode::PRECONDITION_REQUIRED);
    assert_eq!(body["error"]["code"], "CONFIRMATION_REQUIRED");

    let (status, _) = send(&app, "GET", "/api/v1/lots/24-PC-IV1-001", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "DELETE", "/api/v1/lots/24-PC-IV1-001?confirm=true", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/api/v1/lots/24-PC-IV1-001", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, stock) = send(&app, "GET", "/api/v1/stock?q=24-PC-IV1-001", None).await;
    assert!(stock["stock_items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_lot_filters() {
    let app = app();

    let (_, in_stock) = send(&app, "GET", "/api/v1/lots?status=in_stock", None).await;
    assert_eq!(in_stock["lots"].as_array().unwrap().len(), 3);

    let (_, purchases) = send(&app, "GET", "/api/v1/lots?category=purchase", None).await;
    assert_eq!(purchases["lots"].as_array().unwrap().len(), 2);

    let (_, by_date) = send(
        &app,
        "GET",
        "/api/v1/lots?start_date=2024-01-01&end_date=2024-02-10",
        None,
    )
    .await;
    let ids: Vec<&str> = by_date["lots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["24-AS-IV1-001"]);

    let (_, by_station) = send(&app, "GET", "/api/v1/lots?q=azrou", None).await;
    assert_eq!(by_station["lots"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_quality_history_is_chronological() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/v1/lots/23-PH-I3-001/quality-history", None).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["quality_checks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|qc| qc["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["QC-001", "QC-006"]);
}

// ============================================================================
// Quality control
// ============================================================================

#[tokio::test]
async fn test_failing_check_sends_lot_back_to_processing() {
    let app = app();
    let check = json!({
        "lot_id": "23-FA-IV2-001",
        "check_type": "periodic",
        "date": "2024-06-01",
        "germination_rate": "41",
        "purity": "90",
        "moisture_content": "12.5",
        "thousand_seed_weight": "15.0",
        "result": "fail"
    });

    let (status, created) = send(&app, "POST", "/api/v1/quality-checks", Some(check)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["id"].as_str().unwrap().starts_with("QC-"));

    let (_, lot) = send(&app, "GET", "/api/v1/lots/23-FA-IV2-001", None).await;
    assert_eq!(lot["status"], "processing");
}

#[tokio::test]
async fn test_quality_check_rejects_out_of_range_percentage() {
    let app = app();
    let check = json!({
        "lot_id": "23-FA-IV2-001",
        "germination_rate": "120",
        "purity": "90",
        "moisture_content": "8",
        "thousand_seed_weight": "15.0",
        "result": "pass"
    });

    let (status, body) = send(&app, "POST", "/api/v1/quality-checks", Some(check)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "germination_rate");
}

// ============================================================================
// Seed needs
// ============================================================================

#[tokio::test]
async fn test_seed_need_quantity_ignores_client_value() {
    let app = app();
    let need = json!({
        "dranef": "FES MEKNES",
        "province": "Ifrane",
        "project": "Projet Chêne-liège",
        "perimeter_name": "Périmètre Michlifen",
        "species_id": "esp-054",
        "number_of_plants": 10000,
        "calculated_seed_quantity_kg": "9999",
        "request_date": "2024-06-10"
    });

    let (status, created) = send(&app, "POST", "/api/v1/seed-needs", Some(need)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(decimal(&created["calculated_seed_quantity_kg"]), Decimal::from(85));
    assert_eq!(created["status"], "new");
}

#[tokio::test]
async fn test_seed_need_province_must_belong_to_dranef() {
    let app = app();
    let need = json!({
        "dranef": "FES MEKNES",
        "province": "Essaouira",
        "species_id": "esp-054",
        "number_of_plants": 10000
    });

    let (status, body) = send(&app, "POST", "/api/v1/seed-needs", Some(need)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "province");
}

#[tokio::test]
async fn test_dranef_table() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/v1/seed-needs/dranefs", None).await;

    assert_eq!(status, StatusCode::OK);
    let dranefs = body["dranefs"].as_array().unwrap();
    assert_eq!(dranefs.len(), 10);
    assert!(dranefs.iter().any(|d| d["name"] == "SOUS MASSA"));
}

// ============================================================================
// Reference data
// ============================================================================

#[tokio::test]
async fn test_provenance_code_preview_and_create_ignore_client_code() {
    let app = app();

    let (status, preview) = send(
        &app,
        "GET",
        "/api/v1/provenances/code-preview?region_id=reg-IV1&species_id=esp-047&name=Ras%20el%20Ma",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["code"], "IV1-CA-RaselMa");

    let provenance = json!({
        "code": "HAND-WRITTEN",
        "name": "Ras el Ma",
        "localisation": "Ifrane",
        "region_id": "reg-IV1",
        "species_id": "esp-047"
    });
    let (status, created) = send(&app, "POST", "/api/v1/provenances", Some(provenance)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["code"], "IV1-CA-RaselMa");
}

#[tokio::test]
async fn test_region_code_change_updates_provenance_codes() {
    let app = app();
    let region = json!({ "code": "IVB", "name": "Moyen Atlas Occidental" });

    let (status, _) = send(&app, "PUT", "/api/v1/regions/reg-IV1", Some(region)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, provenance) = send(&app, "GET", "/api/v1/provenances/prov-04", None).await;
    assert_eq!(provenance["code"], "IVB-CA-SidiMguild");
}

#[tokio::test]
async fn test_genera_cascade() {
    let app = app();

    let (_, genera) = send(&app, "GET", "/api/v1/species/genera", None).await;
    let genera: Vec<&str> = genera["genera"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g.as_str().unwrap())
        .collect();
    assert!(genera.contains(&"Pinus"));
    assert!(genera.windows(2).all(|w| w[0] < w[1]));

    let (_, cedars) = send(&app, "GET", "/api/v1/species/genera/Cedrus", None).await;
    assert!(cedars["species"]
        .as_array()
        .unwrap()
        .iter()
        .all(|s| s["genus"] == "Cedrus"));
}

#[tokio::test]
async fn test_provider_phone_validation() {
    let app = app();
    let provider = json!({ "name": "Pépinière du Nord", "address": "Tétouan", "phone": "12345" });

    let (status, body) = send(&app, "POST", "/api/v1/providers", Some(provider)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "phone");
}

// ============================================================================
// Treatments and distributions
// ============================================================================

#[tokio::test]
async fn test_ongoing_treatments() {
    let app = app();
    let (_, body) = send(&app, "GET", "/api/v1/treatments/ongoing", None).await;

    let treatments = body["treatments"].as_array().unwrap();
    assert_eq!(treatments.len(), 1);
    assert_eq!(treatments[0]["id"], "TRT-002");
}

#[tokio::test]
async fn test_distribution_summary_by_species() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/v1/distributions/summary?by=species", None).await;

    assert_eq!(status, StatusCode::OK);
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["label"], "Frêne à feuilles étroites");
    assert_eq!(rows[1]["label"], "Pin d'Alep");
    assert_eq!(decimal(&rows[1]["quantity_kg"]), Decimal::from(30));
}

// ============================================================================
// Dashboard, analysis, insights
// ============================================================================

#[tokio::test]
async fn test_dashboard_summary() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/v1/dashboard", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["total_stock_kg"]), Decimal::from(470));
    assert_eq!(body["total_lots"], 5);
    assert_eq!(body["failing_checks"], 1);
    assert_eq!(body["species_count"], 159);

    let deficits = body["needs"]["deficits"].as_array().unwrap();
    assert_eq!(deficits[0]["species_name"], "Arganier");
    let surpluses = body["needs"]["surpluses"].as_array().unwrap();
    assert_eq!(surpluses.len(), 1);
    assert_eq!(surpluses[0]["species_name"], "Pin d'Alep");
}

#[tokio::test]
async fn test_analysis_csv_export() {
    let app = app();
    let request = Request::builder()
        .uri("/api/v1/analysis?group_by=division&format=csv")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("analyse_besoins_stock_division.csv"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(csv.starts_with("DRANEF;Besoins (kg);Stock (kg);Bilan (kg);Taux de Couverture (%)"));
}

#[tokio::test]
async fn test_analysis_detailed_json() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/v1/analysis?group_by=detailed", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["group_by"], "detailed");
    let labels: Vec<&str> = body["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["label"].as_str().unwrap())
        .collect();
    let mut sorted = labels.clone();
    sorted.sort();
    assert_eq!(labels, sorted);
}

#[tokio::test]
async fn test_insights_are_titled_sections() {
    let app = app();
    let (status, body) = send(&app, "POST", "/api/v1/insights", None).await;

    assert_eq!(status, StatusCode::OK);
    let sections = body["sections"].as_array().unwrap();
    assert!(!sections.is_empty());
    assert_eq!(sections[0]["kind"], "titled");
    assert_eq!(sections[0]["title"], "Alerte stock bas");
}
