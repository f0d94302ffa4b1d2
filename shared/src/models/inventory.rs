//! Inventory and distribution models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Seed held in stock at a station, drawn from one lot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockItem {
    pub id: String,
    pub lot_id: String,
    pub species_id: String,
    pub quantity_kg: Decimal,
    pub entry_date: NaiveDate,
    /// Station holding the seed; location (dranef, province) is inherited from it
    pub srs_id: String,
}

/// Seed shipped out of stock to a nursery or project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Distribution {
    pub id: String,
    pub stock_item_id: String,
    pub quantity_kg: Decimal,
    pub destination: String,
    pub distribution_date: NaiveDate,
}

/// Grouping key for distribution summaries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DistributionSummaryBy {
    #[default]
    Species,
    Destination,
}
