//! Reference data: species, regions, provenances, providers and stations

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A forest species managed by the seed program
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Species {
    pub id: String,
    pub scientific_name: String,
    pub common_name: String,
    pub genus: String,
    pub group: String,
    /// Seed mass needed to raise 1000 plants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seeding_coefficient_kg_per_1000_plants: Option<Decimal>,
}

impl Species {
    /// Genus as written in the scientific name (first token)
    pub fn genus_from_scientific_name(scientific_name: &str) -> String {
        scientific_name
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string()
    }
}

/// Ecological region of provenance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Region {
    pub id: String,
    /// Short code used in provenance codes and lot ids (e.g., "I3", "IV1")
    pub code: String,
    pub name: String,
}

/// Seed provenance: a named seed source for one species in one region
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Provenance {
    pub id: String,
    /// Derived code, see [`crate::codes::provenance_code`]
    pub code: String,
    pub name: String,
    pub localisation: String,
    pub region_id: String,
    pub species_id: String,
}

/// External provider (prestataire) for purchased seed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// Seed reference station (SRS) where lots are processed and stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Srs {
    pub id: String,
    pub name: String,
    /// Regional forestry directorate (administrative division)
    pub dranef: String,
    pub province: String,
}
