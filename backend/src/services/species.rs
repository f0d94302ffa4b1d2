//! Species reference data service

use rust_decimal::Decimal;
use serde::Deserialize;
use shared::types::matches_search;
use shared::validation::validate_seeding_coefficient;
use validator::Validate;

use super::check;
use crate::error::AppResult;
use crate::models::{ListQuery, Species};
use crate::store::{self, new_id, Store};

/// Species service
#[derive(Clone)]
pub struct SpeciesService {
    store: Store,
}

/// Input for creating or replacing a species
#[derive(Debug, Deserialize, Validate)]
pub struct SpeciesInput {
    #[validate(length(min = 1, message = "Scientific name is required"))]
    pub scientific_name: String,
    #[validate(length(min = 1, message = "Common name is required"))]
    pub common_name: String,
    /// Defaults to the first word of the scientific name
    pub genus: Option<String>,
    pub group: Option<String>,
    pub seeding_coefficient_kg_per_1000_plants: Option<Decimal>,
}

const DEFAULT_GROUP: &str = "Groupe par défaut";

impl SpeciesInput {
    fn into_species(self, id: String) -> AppResult<Species> {
        self.validate()?;
        if let Some(coef) = self.seeding_coefficient_kg_per_1000_plants {
            check(
                validate_seeding_coefficient(coef),
                "seeding_coefficient_kg_per_1000_plants",
            )?;
        }

        let genus = self
            .genus
            .filter(|g| !g.trim().is_empty())
            .unwrap_or_else(|| Species::genus_from_scientific_name(&self.scientific_name));
        let group = self
            .group
            .filter(|g| !g.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GROUP.to_string());

        Ok(Species {
            id,
            scientific_name: self.scientific_name.trim().to_string(),
            common_name: self.common_name.trim().to_string(),
            genus,
            group,
            seeding_coefficient_kg_per_1000_plants: self.seeding_coefficient_kg_per_1000_plants,
        })
    }
}

impl SpeciesService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// List species matching the search term
    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<Species>> {
        let data = self.store.read().await;
        let items = data
            .species
            .iter()
            .filter(|s| {
                matches_search(
                    query.search(),
                    &[&s.common_name, &s.scientific_name, &s.genus, &s.group],
                )
            })
            .cloned()
            .collect();
        Ok(items)
    }

    pub async fn get(&self, id: &str) -> AppResult<Species> {
        let data = self.store.read().await;
        store::find(&data.species, id).cloned()
    }

    pub async fn create(&self, input: SpeciesInput) -> AppResult<Species> {
        let species = input.into_species(new_id("esp"))?;
        let mut data = self.store.write().await;
        let created = store::insert(&mut data.species, species)?;
        tracing::info!("Created species {} ({})", created.id, created.scientific_name);
        Ok(created)
    }

    /// Replace a species and refresh the provenance codes and seed quantities derived from it
    pub async fn update(&self, id: &str, input: SpeciesInput) -> AppResult<Species> {
        let species = input.into_species(id.to_string())?;
        let mut data = self.store.write().await;
        let updated = store::replace(&mut data.species, species)?;

        let codes = data.refresh_provenance_codes();
        let quantities = data.refresh_seed_quantities();
        tracing::info!(
            provenance_codes = codes,
            seed_quantities = quantities,
            "Updated species {}",
            updated.id
        );
        Ok(updated)
    }

    pub async fn delete(&self, id: &str, confirm: bool) -> AppResult<()> {
        store::require_confirmation::<Species>(confirm, id)?;
        let mut data = self.store.write().await;
        store::remove(&mut data.species, id)?;
        tracing::info!("Deleted species {}", id);
        Ok(())
    }

    /// Distinct genera, sorted
    pub async fn genera(&self) -> AppResult<Vec<String>> {
        let data = self.store.read().await;
        let mut genera: Vec<String> = data.species.iter().map(|s| s.genus.clone()).collect();
        genera.sort();
        genera.dedup();
        Ok(genera)
    }

    /// Species of one genus, sorted by scientific name
    pub async fn by_genus(&self, genus: &str) -> AppResult<Vec<Species>> {
        let data = self.store.read().await;
        let mut items: Vec<Species> = data
            .species
            .iter()
            .filter(|s| s.genus == genus)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.scientific_name.cmp(&b.scientific_name));
        Ok(items)
    }
}
