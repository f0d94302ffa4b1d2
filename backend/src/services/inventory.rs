//! Stock inventory service
//!
//! A stock item's location comes from its station; it has no dranef or
//! province of its own.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::types::matches_search;
use shared::validation::validate_positive_quantity;
use validator::Validate;

use super::{check, require_ref, today};
use crate::error::AppResult;
use crate::models::{Dataset, ListQuery, StockItem};
use crate::store::{self, new_id, Store};

/// Stock service
#[derive(Clone)]
pub struct StockService {
    store: Store,
}

#[derive(Debug, Deserialize, Validate)]
pub struct StockItemInput {
    #[validate(length(min = 1, message = "Lot is required"))]
    pub lot_id: String,
    #[validate(length(min = 1, message = "Species is required"))]
    pub species_id: String,
    pub quantity_kg: Decimal,
    pub entry_date: Option<NaiveDate>,
    #[validate(length(min = 1, message = "Station is required"))]
    pub srs_id: String,
}

impl StockItemInput {
    fn into_item(self, data: &Dataset, id: String) -> AppResult<StockItem> {
        self.validate()?;
        check(validate_positive_quantity(self.quantity_kg), "quantity_kg")?;
        require_ref(data.lot(&self.lot_id), "lot_id", &self.lot_id)?;
        require_ref(data.species(&self.species_id), "species_id", &self.species_id)?;
        require_ref(data.station(&self.srs_id), "srs_id", &self.srs_id)?;

        Ok(StockItem {
            id,
            lot_id: self.lot_id,
            species_id: self.species_id,
            quantity_kg: self.quantity_kg,
            entry_date: self.entry_date.unwrap_or_else(today),
            srs_id: self.srs_id,
        })
    }
}

impl StockService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<StockItem>> {
        let data = self.store.read().await;
        let range = query.date_range();
        Ok(data
            .stock_items
            .iter()
            .filter(|item| range.contains(item.entry_date))
            .filter(|item| {
                matches_search(
                    query.search(),
                    &[
                        item.lot_id.as_str(),
                        data.species_name(&item.species_id),
                        data.station_name(&item.srs_id),
                    ],
                )
            })
            .cloned()
            .collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<StockItem> {
        let data = self.store.read().await;
        store::find(&data.stock_items, id).cloned()
    }

    pub async fn create(&self, input: StockItemInput) -> AppResult<StockItem> {
        let mut data = self.store.write().await;
        let item = input.into_item(&data, new_id("STK"))?;
        let created = store::insert(&mut data.stock_items, item)?;
        tracing::info!(
            "Stocked {} kg of lot {} at {}",
            created.quantity_kg,
            created.lot_id,
            created.srs_id
        );
        Ok(created)
    }

    pub async fn update(&self, id: &str, input: StockItemInput) -> AppResult<StockItem> {
        let mut data = self.store.write().await;
        let item = input.into_item(&data, id.to_string())?;
        let updated = store::replace(&mut data.stock_items, item)?;
        tracing::info!("Updated stock item {}", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str, confirm: bool) -> AppResult<()> {
        store::require_confirmation::<StockItem>(confirm, id)?;
        let mut data = self.store.write().await;
        store::remove(&mut data.stock_items, id)?;
        tracing::info!("Deleted stock item {}", id);
        Ok(())
    }
}
