//! Region reference data service

use serde::Deserialize;
use shared::types::matches_search;
use shared::validation::validate_region_code;
use validator::Validate;

use super::check;
use crate::error::{AppError, AppResult};
use crate::models::{ListQuery, Region};
use crate::store::{self, new_id, Store};

/// Region service
#[derive(Clone)]
pub struct RegionService {
    store: Store,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegionInput {
    pub code: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

impl RegionInput {
    fn into_region(self, id: String) -> AppResult<Region> {
        self.validate()?;
        let code = self.code.trim().to_string();
        check(validate_region_code(&code), "code")?;
        Ok(Region {
            id,
            code,
            name: self.name.trim().to_string(),
        })
    }
}

impl RegionService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<Region>> {
        let data = self.store.read().await;
        Ok(data
            .regions
            .iter()
            .filter(|r| matches_search(query.search(), &[&r.name, &r.code]))
            .cloned()
            .collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<Region> {
        let data = self.store.read().await;
        store::find(&data.regions, id).cloned()
    }

    pub async fn create(&self, input: RegionInput) -> AppResult<Region> {
        let region = input.into_region(new_id("reg"))?;
        let mut data = self.store.write().await;
        if data.regions.iter().any(|r| r.code == region.code) {
            return Err(AppError::DuplicateEntry("code".to_string()));
        }
        let created = store::insert(&mut data.regions, region)?;
        tracing::info!("Created region {} ({})", created.id, created.code);
        Ok(created)
    }

    /// Replace a region; a code change flows into its provenances' codes
    pub async fn update(&self, id: &str, input: RegionInput) -> AppResult<Region> {
        let region = input.into_region(id.to_string())?;
        let mut data = self.store.write().await;
        if data.regions.iter().any(|r| r.code == region.code && r.id != id) {
            return Err(AppError::DuplicateEntry("code".to_string()));
        }
        let updated = store::replace(&mut data.regions, region)?;
        let codes = data.refresh_provenance_codes();
        tracing::info!(provenance_codes = codes, "Updated region {}", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str, confirm: bool) -> AppResult<()> {
        store::require_confirmation::<Region>(confirm, id)?;
        let mut data = self.store.write().await;
        store::remove(&mut data.regions, id)?;
        tracing::info!("Deleted region {}", id);
        Ok(())
    }
}
