//! Seed needs service
//!
//! The seed quantity of a need is computed from the species coefficient on
//! every save. Any value sent by the client is ignored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::types::matches_search;
use shared::validation::{
    validate_dranef, validate_dranef_province, validate_number_of_plants, DRANEF_PROVINCES,
};
use validator::Validate;

use super::{check, require_ref, today};
use crate::error::AppResult;
use crate::models::{Dataset, ListQuery, SeedNeed, SeedNeedStatus};
use crate::store::{self, new_id, Store};

/// Seed need service
#[derive(Clone)]
pub struct SeedNeedService {
    store: Store,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SeedNeedInput {
    #[validate(length(min = 1, message = "DRANEF is required"))]
    pub dranef: String,
    #[validate(length(min = 1, message = "Province is required"))]
    pub province: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub perimeter_name: String,
    #[validate(length(min = 1, message = "Species is required"))]
    pub species_id: String,
    pub number_of_plants: u64,
    pub request_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: SeedNeedStatus,
}

/// A DRANEF with its provinces
#[derive(Debug, Clone, Serialize)]
pub struct Dranef {
    pub name: &'static str,
    pub provinces: &'static [&'static str],
}

impl SeedNeedInput {
    fn into_need(self, data: &Dataset, id: String) -> AppResult<SeedNeed> {
        self.validate()?;
        check(validate_dranef(&self.dranef), "dranef")?;
        check(validate_dranef_province(&self.dranef, &self.province), "province")?;
        check(validate_number_of_plants(self.number_of_plants), "number_of_plants")?;
        require_ref(data.species(&self.species_id), "species_id", &self.species_id)?;

        let calculated_seed_quantity_kg =
            data.seed_quantity_for(&self.species_id, self.number_of_plants);

        Ok(SeedNeed {
            id,
            dranef: self.dranef.trim().to_string(),
            province: self.province.trim().to_string(),
            project: self.project.trim().to_string(),
            perimeter_name: self.perimeter_name.trim().to_string(),
            species_id: self.species_id,
            number_of_plants: self.number_of_plants,
            calculated_seed_quantity_kg,
            request_date: self.request_date.unwrap_or_else(today),
            status: self.status,
        })
    }
}

impl SeedNeedService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<SeedNeed>> {
        let data = self.store.read().await;
        let range = query.date_range();
        Ok(data
            .seed_needs
            .iter()
            .filter(|n| range.contains(n.request_date))
            .filter(|n| {
                let status = n.status.to_string();
                matches_search(
                    query.search(),
                    &[
                        n.id.as_str(),
                        data.species_name(&n.species_id),
                        n.dranef.as_str(),
                        n.province.as_str(),
                        n.project.as_str(),
                        status.as_str(),
                    ],
                )
            })
            .cloned()
            .collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<SeedNeed> {
        let data = self.store.read().await;
        store::find(&data.seed_needs, id).cloned()
    }

    pub async fn create(&self, input: SeedNeedInput) -> AppResult<SeedNeed> {
        let mut data = self.store.write().await;
        let need = input.into_need(&data, new_id("BS"))?;
        let created = store::insert(&mut data.seed_needs, need)?;
        tracing::info!(
            "Created seed need {}: {} plants -> {} kg",
            created.id,
            created.number_of_plants,
            created.calculated_seed_quantity_kg
        );
        Ok(created)
    }

    pub async fn update(&self, id: &str, input: SeedNeedInput) -> AppResult<SeedNeed> {
        let mut data = self.store.write().await;
        let need = input.into_need(&data, id.to_string())?;
        let updated = store::replace(&mut data.seed_needs, need)?;
        tracing::info!(
            "Updated seed need {}: {} kg",
            updated.id,
            updated.calculated_seed_quantity_kg
        );
        Ok(updated)
    }

    pub async fn delete(&self, id: &str, confirm: bool) -> AppResult<()> {
        store::require_confirmation::<SeedNeed>(confirm, id)?;
        let mut data = self.store.write().await;
        store::remove(&mut data.seed_needs, id)?;
        tracing::info!("Deleted seed need {}", id);
        Ok(())
    }

    /// DRANEF reference table for the need form
    pub fn dranefs(&self) -> Vec<Dranef> {
        DRANEF_PROVINCES
            .iter()
            .map(|(name, provinces)| Dranef { name, provinces })
            .collect()
    }
}
