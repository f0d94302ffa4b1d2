//! WebAssembly module for the Seed Production Management Platform
//!
//! Provides client-side computation for:
//! - Lot id and provenance code previews
//! - Seed quantity estimates
//! - Needs coverage labels
//! - Form validation

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use shared::balance::Coverage;
use shared::codes;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

fn to_decimal(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

/// Two-letter species abbreviation used in codes
#[wasm_bindgen]
pub fn species_abbreviation(scientific_name: &str) -> String {
    codes::species_abbreviation(scientific_name)
}

/// Provenance code as the server will derive it
#[wasm_bindgen]
pub fn provenance_code(region_code: &str, scientific_name: &str, name: &str) -> String {
    codes::provenance_code(region_code, scientific_name, name)
}

/// Lot id the next lot would get, given the ids already in use (JSON array)
#[wasm_bindgen]
pub fn preview_lot_id(
    harvest_year: i32,
    scientific_name: &str,
    region_code: &str,
    existing_ids_json: &str,
) -> Result<String, JsValue> {
    let existing: Vec<String> = serde_json::from_str(existing_ids_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid lot ids JSON: {}", e)))?;

    let prefix = codes::lot_id_prefix(harvest_year, scientific_name, region_code);
    let sequence = codes::next_lot_sequence(&prefix, existing.iter().map(String::as_str))
        .ok_or_else(|| JsValue::from_str(&format!("No lot number left for {}", prefix)))?;
    Ok(format!("{}-{:03}", prefix, sequence))
}

/// Current year from the browser clock, the default harvest year of a new lot
#[wasm_bindgen]
pub fn current_harvest_year() -> i32 {
    js_sys::Date::new_0().get_full_year() as i32
}

/// Seed mass in kg for a number of plants; a negative coefficient means "unknown"
#[wasm_bindgen]
pub fn calculate_seed_quantity(number_of_plants: f64, coefficient_kg_per_1000: f64) -> f64 {
    if number_of_plants < 0.0 {
        web_sys::console::warn_1(&"Negative plant count, using 0".into());
        return 0.0;
    }
    let coefficient = (coefficient_kg_per_1000 >= 0.0).then(|| to_decimal(coefficient_kg_per_1000));
    shared::models::calculate_seed_quantity(number_of_plants as u64, coefficient)
        .to_f64()
        .unwrap_or(0.0)
}

/// Coverage label for a needs-vs-stock row ("40%" or "N/A")
#[wasm_bindgen]
pub fn coverage_label(needed_kg: f64, stocked_kg: f64) -> String {
    Coverage::of(to_decimal(needed_kg), to_decimal(stocked_kg)).to_string()
}

/// Provinces of a DRANEF as a JSON array, empty when the DRANEF is unknown
#[wasm_bindgen]
pub fn provinces_for_dranef(dranef: &str) -> String {
    let provinces = provinces_of(dranef).unwrap_or_default();
    serde_json::to_string(provinces).unwrap_or_else(|_| "[]".to_string())
}

/// Validate a Moroccan phone number
#[wasm_bindgen]
pub fn is_valid_phone(phone: &str) -> bool {
    validate_moroccan_phone(phone).is_ok()
}

/// Validate a forest region code
#[wasm_bindgen]
pub fn is_valid_region_code(code: &str) -> bool {
    validate_region_code(code).is_ok()
}

/// Whether moisture content is within the storage range
#[wasm_bindgen]
pub fn is_storable(moisture_percent: f64) -> bool {
    is_storable_moisture(to_decimal(moisture_percent))
}
