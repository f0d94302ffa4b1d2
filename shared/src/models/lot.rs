//! Seed lot models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A seed lot tracked from harvest or purchase to distribution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lot {
    /// Generated lot id (e.g., "24-PH-I3-001")
    pub id: String,
    pub quantity_kg: Decimal,
    pub harvest_year: i32,
    pub harvest_date: NaiveDate,
    pub category: LotCategory,
    pub species_id: String,
    pub provenance_id: String,
    pub seed_stand: String,
    pub srs_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    pub status: LotStatus,
}

/// How the lot entered the program
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LotCategory {
    #[default]
    Harvest,
    Purchase,
}

impl std::fmt::Display for LotCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LotCategory::Harvest => write!(f, "Harvest"),
            LotCategory::Purchase => write!(f, "Purchase"),
        }
    }
}

/// Lifecycle status of a lot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LotStatus {
    #[default]
    Processing,
    InStock,
    Distributed,
}

impl LotStatus {
    /// Whether moving from `previous` to `self` takes the lot out of stock
    pub fn leaves_stock(self, previous: LotStatus) -> bool {
        self == LotStatus::Distributed && previous != LotStatus::Distributed
    }
}

impl std::fmt::Display for LotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LotStatus::Processing => write!(f, "Processing"),
            LotStatus::InStock => write!(f, "In Stock"),
            LotStatus::Distributed => write!(f, "Distributed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaves_stock_only_on_transition() {
        assert!(LotStatus::Distributed.leaves_stock(LotStatus::InStock));
        assert!(LotStatus::Distributed.leaves_stock(LotStatus::Processing));
        assert!(!LotStatus::Distributed.leaves_stock(LotStatus::Distributed));
        assert!(!LotStatus::InStock.leaves_stock(LotStatus::Processing));
    }

    #[test]
    fn test_status_serde_names() {
        let json = serde_json::to_string(&LotStatus::InStock).unwrap();
        assert_eq!(json, "\"in_stock\"");
        let status: LotStatus = serde_json::from_str("\"distributed\"").unwrap();
        assert_eq!(status, LotStatus::Distributed);
    }
}
