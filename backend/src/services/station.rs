//! Seed reference station (SRS) service

use serde::Deserialize;
use shared::types::matches_search;
use validator::Validate;

use crate::error::AppResult;
use crate::models::{ListQuery, Srs};
use crate::store::{self, new_id, Store};

#[derive(Clone)]
pub struct StationService {
    store: Store,
}

#[derive(Debug, Deserialize, Validate)]
pub struct StationInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "DRANEF is required"))]
    pub dranef: String,
    #[validate(length(min = 1, message = "Province is required"))]
    pub province: String,
}

impl StationInput {
    fn into_station(self, id: String) -> AppResult<Srs> {
        self.validate()?;
        Ok(Srs {
            id,
            name: self.name.trim().to_string(),
            dranef: self.dranef.trim().to_string(),
            province: self.province.trim().to_string(),
        })
    }
}

impl StationService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<Srs>> {
        let data = self.store.read().await;
        Ok(data
            .srs
            .iter()
            .filter(|s| matches_search(query.search(), &[&s.name, &s.dranef, &s.province]))
            .cloned()
            .collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<Srs> {
        let data = self.store.read().await;
        store::find(&data.srs, id).cloned()
    }

    pub async fn create(&self, input: StationInput) -> AppResult<Srs> {
        let station = input.into_station(new_id("srs"))?;
        let mut data = self.store.write().await;
        let created = store::insert(&mut data.srs, station)?;
        tracing::info!("Created station {} ({})", created.id, created.name);
        Ok(created)
    }

    pub async fn update(&self, id: &str, input: StationInput) -> AppResult<Srs> {
        let station = input.into_station(id.to_string())?;
        let mut data = self.store.write().await;
        let updated = store::replace(&mut data.srs, station)?;
        tracing::info!("Updated station {}", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str, confirm: bool) -> AppResult<()> {
        store::require_confirmation::<Srs>(confirm, id)?;
        let mut data = self.store.write().await;
        store::remove(&mut data.srs, id)?;
        tracing::info!("Deleted station {}", id);
        Ok(())
    }
}
