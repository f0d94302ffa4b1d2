//! Seed needs models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A reforestation project's request for seed of one species
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedNeed {
    pub id: String,
    pub dranef: String,
    pub province: String,
    pub project: String,
    pub perimeter_name: String,
    pub species_id: String,
    pub number_of_plants: u64,
    /// Derived from `number_of_plants` and the species coefficient on every save
    pub calculated_seed_quantity_kg: Decimal,
    pub request_date: NaiveDate,
    pub status: SeedNeedStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeedNeedStatus {
    #[default]
    New,
    Validated,
    Processed,
}

impl std::fmt::Display for SeedNeedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedNeedStatus::New => write!(f, "New"),
            SeedNeedStatus::Validated => write!(f, "Validated"),
            SeedNeedStatus::Processed => write!(f, "Processed"),
        }
    }
}

/// Seed mass required to raise `number_of_plants`, zero without a coefficient.
///
/// Saturates at the largest representable mass instead of overflowing.
pub fn calculate_seed_quantity(number_of_plants: u64, coefficient: Option<Decimal>) -> Decimal {
    match coefficient {
        Some(kg_per_1000) => {
            (Decimal::from(number_of_plants) / Decimal::from(1000)).saturating_mul(kg_per_1000)
        }
        None => Decimal::ZERO,
    }
}
