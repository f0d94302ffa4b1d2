//! Provider (prestataire) service

use serde::Deserialize;
use shared::types::matches_search;
use shared::validation::validate_moroccan_phone;
use validator::Validate;

use super::check;
use crate::error::AppResult;
use crate::models::{ListQuery, Provider};
use crate::store::{self, new_id, Store};

#[derive(Clone)]
pub struct ProviderService {
    store: Store,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProviderInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub phone: String,
}

impl ProviderInput {
    fn into_provider(self, id: String) -> AppResult<Provider> {
        self.validate()?;
        check(validate_moroccan_phone(&self.phone), "phone")?;
        Ok(Provider {
            id,
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            phone: self.phone.trim().to_string(),
        })
    }
}

impl ProviderService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<Provider>> {
        let data = self.store.read().await;
        Ok(data
            .providers
            .iter()
            .filter(|p| matches_search(query.search(), &[&p.name, &p.address, &p.phone]))
            .cloned()
            .collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<Provider> {
        let data = self.store.read().await;
        store::find(&data.providers, id).cloned()
    }

    pub async fn create(&self, input: ProviderInput) -> AppResult<Provider> {
        let provider = input.into_provider(new_id("prest"))?;
        let mut data = self.store.write().await;
        let created = store::insert(&mut data.providers, provider)?;
        tracing::info!("Created provider {}", created.id);
        Ok(created)
    }

    pub async fn update(&self, id: &str, input: ProviderInput) -> AppResult<Provider> {
        let provider = input.into_provider(id.to_string())?;
        let mut data = self.store.write().await;
        let updated = store::replace(&mut data.providers, provider)?;
        tracing::info!("Updated provider {}", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str, confirm: bool) -> AppResult<()> {
        store::require_confirmation::<Provider>(confirm, id)?;
        let mut data = self.store.write().await;
        store::remove(&mut data.providers, id)?;
        tracing::info!("Deleted provider {}", id);
        Ok(())
    }
}
