//! Provenance service
//!
//! A provenance code is always derived from its region, species and name;
//! clients never set it.

use serde::{Deserialize, Serialize};
use shared::codes::provenance_code;
use shared::types::matches_search;
use validator::Validate;

use super::require_ref;
use crate::error::AppResult;
use crate::models::{Dataset, ListQuery, Provenance};
use crate::store::{self, new_id, Store};

/// Provenance service
#[derive(Clone)]
pub struct ProvenanceService {
    store: Store,
}

/// Input for creating or replacing a provenance.
///
/// Any `code` sent by the client is ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct ProvenanceInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub localisation: String,
    #[validate(length(min = 1, message = "Region is required"))]
    pub region_id: String,
    #[validate(length(min = 1, message = "Species is required"))]
    pub species_id: String,
}

#[derive(Debug, Serialize)]
pub struct CodePreview {
    pub code: String,
}

/// Code for a (region, species, name) triple, resolving both references
fn derive_code(data: &Dataset, region_id: &str, species_id: &str, name: &str) -> AppResult<String> {
    let region = require_ref(data.region(region_id), "region_id", region_id)?;
    let species = require_ref(data.species(species_id), "species_id", species_id)?;
    Ok(provenance_code(&region.code, &species.scientific_name, name))
}

impl ProvenanceInput {
    fn into_provenance(self, data: &Dataset, id: String) -> AppResult<Provenance> {
        self.validate()?;
        let name = self.name.trim().to_string();
        let code = derive_code(data, &self.region_id, &self.species_id, &name)?;
        Ok(Provenance {
            id,
            code,
            name,
            localisation: self.localisation.trim().to_string(),
            region_id: self.region_id,
            species_id: self.species_id,
        })
    }
}

impl ProvenanceService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<Provenance>> {
        let data = self.store.read().await;
        Ok(data
            .provenances
            .iter()
            .filter(|p| {
                let region_name = data.region(&p.region_id).map(|r| r.name.as_str()).unwrap_or_default();
                matches_search(
                    query.search(),
                    &[
                        p.name.as_str(),
                        p.code.as_str(),
                        p.localisation.as_str(),
                        region_name,
                        data.species_name(&p.species_id),
                    ],
                )
            })
            .cloned()
            .collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<Provenance> {
        let data = self.store.read().await;
        store::find(&data.provenances, id).cloned()
    }

    pub async fn create(&self, input: ProvenanceInput) -> AppResult<Provenance> {
        let mut data = self.store.write().await;
        let provenance = input.into_provenance(&data, new_id("prov"))?;
        let created = store::insert(&mut data.provenances, provenance)?;
        tracing::info!("Created provenance {} with code {}", created.id, created.code);
        Ok(created)
    }

    pub async fn update(&self, id: &str, input: ProvenanceInput) -> AppResult<Provenance> {
        let mut data = self.store.write().await;
        let provenance = input.into_provenance(&data, id.to_string())?;
        let updated = store::replace(&mut data.provenances, provenance)?;
        tracing::info!("Updated provenance {} with code {}", updated.id, updated.code);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str, confirm: bool) -> AppResult<()> {
        store::require_confirmation::<Provenance>(confirm, id)?;
        let mut data = self.store.write().await;
        store::remove(&mut data.provenances, id)?;
        tracing::info!("Deleted provenance {}", id);
        Ok(())
    }

    /// Code a provenance would get, without saving anything
    pub async fn preview_code(
        &self,
        region_id: &str,
        species_id: &str,
        name: &str,
    ) -> AppResult<CodePreview> {
        let data = self.store.read().await;
        let code = derive_code(&data, region_id, species_id, name)?;
        tracing::debug!("Previewed provenance code {}", code);
        Ok(CodePreview { code })
    }
}
