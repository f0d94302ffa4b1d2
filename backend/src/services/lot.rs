//! Seed lot service
//!
//! Lot ids are generated as `{yy}-{species}-{region}-{NNN}` on creation and
//! never change afterwards. Distributing a lot or deleting it removes its
//! stock items.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::codes::{generate_lot_id, LotIdRequest};
use shared::types::matches_search;
use shared::validation::{validate_harvest_year, validate_positive_quantity};

use super::{check, require_ref, today};
use crate::error::{AppError, AppResult};
use crate::models::{Dataset, Lot, LotCategory, LotQuery, LotStatus, QualityCheck};
use crate::store::{self, Store};

/// Lot service
#[derive(Clone)]
pub struct LotService {
    store: Store,
}

/// Input for creating or replacing a lot
#[derive(Debug, Deserialize)]
pub struct LotInput {
    /// Taken from `harvest_date` when absent
    pub harvest_year: Option<i32>,
    pub harvest_date: Option<NaiveDate>,
    pub quantity_kg: Decimal,
    #[serde(default)]
    pub category: LotCategory,
    pub species_id: Option<String>,
    pub provenance_id: Option<String>,
    #[serde(default)]
    pub seed_stand: String,
    pub srs_id: String,
    pub provider_id: Option<String>,
    #[serde(default)]
    pub status: LotStatus,
}

impl LotInput {
    fn id_request(&self) -> LotIdRequest<'_> {
        LotIdRequest {
            harvest_year: self.harvest_year,
            harvest_date: self.harvest_date,
            species_id: self.species_id.as_deref(),
            provenance_id: self.provenance_id.as_deref(),
        }
    }

    /// Check the fields not covered by id generation
    fn validate(&self, data: &Dataset) -> AppResult<()> {
        check(validate_positive_quantity(self.quantity_kg), "quantity_kg")?;
        if let Some(year) = self.id_request().year() {
            check(validate_harvest_year(year), "harvest_year")?;
        }
        require_ref(data.station(&self.srs_id), "srs_id", &self.srs_id)?;
        if let Some(provider_id) = self.provider_id.as_deref().filter(|p| !p.is_empty()) {
            require_ref(data.provider(provider_id), "provider_id", provider_id)?;
        }
        Ok(())
    }

    fn into_lot(self, id: String, harvest_year: i32, species_id: String, provenance_id: String) -> Lot {
        Lot {
            id,
            quantity_kg: self.quantity_kg,
            harvest_year,
            harvest_date: self.harvest_date.unwrap_or_else(today),
            category: self.category,
            species_id,
            provenance_id,
            seed_stand: self.seed_stand.trim().to_string(),
            srs_id: self.srs_id,
            provider_id: self.provider_id.filter(|p| !p.is_empty()),
            status: self.status,
        }
    }
}

fn missing(field: &str) -> AppError {
    AppError::validation(
        field,
        &format!("{} is required", field),
        "Veuillez renseigner l'année de récolte, l'espèce et la provenance.",
    )
}

impl LotService {
    /// Create a new LotService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// List lots matching the filters
    pub async fn list(&self, query: &LotQuery) -> AppResult<Vec<Lot>> {
        let data = self.store.read().await;
        let range = query.date_range();
        let lots = data
            .lots
            .iter()
            .filter(|lot| query.status.map_or(true, |s| lot.status == s))
            .filter(|lot| query.category.map_or(true, |c| lot.category == c))
            .filter(|lot| range.contains(lot.harvest_date))
            .filter(|lot| {
                let provider = lot
                    .provider_id
                    .as_deref()
                    .and_then(|id| data.provider(id))
                    .map(|p| p.name.as_str())
                    .unwrap_or_default();
                matches_search(
                    query.search(),
                    &[
                        lot.id.as_str(),
                        data.species_name(&lot.species_id),
                        data.station_name(&lot.srs_id),
                        provider,
                        lot.seed_stand.as_str(),
                    ],
                )
            })
            .cloned()
            .collect();
        Ok(lots)
    }

    pub async fn get(&self, id: &str) -> AppResult<Lot> {
        let data = self.store.read().await;
        store::find(&data.lots, id).cloned()
    }

    /// Create a lot under a freshly generated id
    pub async fn create(&self, input: LotInput) -> AppResult<Lot> {
        let mut data = self.store.write().await;

        let id = generate_lot_id(&data, &input.id_request())?;
        input.validate(&data)?;

        let harvest_year = input.id_request().year().ok_or_else(|| missing("harvest_year"))?;
        let species_id = input.species_id.clone().unwrap_or_default();
        let provenance_id = input.provenance_id.clone().unwrap_or_default();
        let lot = input.into_lot(id, harvest_year, species_id, provenance_id);

        let created = store::insert(&mut data.lots, lot)?;
        tracing::info!("Created lot {} ({} kg)", created.id, created.quantity_kg);
        Ok(created)
    }

    /// Replace a lot, keeping its id.
    ///
    /// Moving the lot to Distributed removes its stock items.
    pub async fn update(&self, id: &str, input: LotInput) -> AppResult<Lot> {
        let mut data = self.store.write().await;
        let previous = store::find(&data.lots, id)?.clone();

        let species_id = input
            .species_id
            .clone()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| missing("species_id"))?;
        let provenance_id = input
            .provenance_id
            .clone()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| missing("provenance_id"))?;
        require_ref(data.species(&species_id), "species_id", &species_id)?;
        require_ref(data.provenance(&provenance_id), "provenance_id", &provenance_id)?;
        input.validate(&data)?;

        let harvest_year = input
            .id_request()
            .year()
            .unwrap_or(previous.harvest_year);
        let harvest_date = input.harvest_date.unwrap_or(previous.harvest_date);
        let mut lot = input.into_lot(id.to_string(), harvest_year, species_id, provenance_id);
        lot.harvest_date = harvest_date;

        let updated = store::replace(&mut data.lots, lot)?;
        if updated.status.leaves_stock(previous.status) {
            let removed = data.remove_stock_for_lot(id);
            tracing::info!("Lot {} distributed, removed {} stock items", id, removed);
        }
        tracing::info!("Updated lot {}", updated.id);
        Ok(updated)
    }

    /// Delete a lot together with its stock items
    pub async fn delete(&self, id: &str, confirm: bool) -> AppResult<()> {
        store::require_confirmation::<Lot>(confirm, id)?;
        let mut data = self.store.write().await;
        store::remove(&mut data.lots, id)?;
        let removed = data.remove_stock_for_lot(id);
        tracing::info!("Deleted lot {} and {} stock items", id, removed);
        Ok(())
    }

    /// Quality checks of a lot, oldest first
    pub async fn quality_history(&self, id: &str) -> AppResult<Vec<QualityCheck>> {
        let data = self.store.read().await;
        store::find(&data.lots, id)?;
        let mut checks: Vec<QualityCheck> = data
            .quality_checks
            .iter()
            .filter(|qc| qc.lot_id == id)
            .cloned()
            .collect();
        checks.sort_by_key(|qc| qc.date);
        Ok(checks)
    }
}
