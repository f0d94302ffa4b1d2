//! Seed treatment service

use chrono::NaiveDate;
use serde::Deserialize;
use shared::types::matches_search;
use shared::validation::validate_date_order;
use validator::Validate;

use super::{check, require_ref, today};
use crate::error::AppResult;
use crate::models::{Dataset, ListQuery, SeedTreatment, TreatmentStatus, TreatmentType};
use crate::store::{self, new_id, Store};

/// Seed treatment service
#[derive(Clone)]
pub struct TreatmentService {
    store: Store,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TreatmentInput {
    #[validate(length(min = 1, message = "Lot is required"))]
    pub lot_id: String,
    #[serde(default)]
    pub treatment_type: TreatmentType,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[validate(length(min = 1, message = "Operator is required"))]
    pub operator: String,
    #[serde(default)]
    pub status: TreatmentStatus,
    pub observations: Option<String>,
}

impl TreatmentInput {
    fn into_treatment(self, data: &Dataset, id: String) -> AppResult<SeedTreatment> {
        self.validate()?;
        require_ref(data.lot(&self.lot_id), "lot_id", &self.lot_id)?;

        let start_date = self.start_date.unwrap_or_else(today);
        let end_date = self.end_date.unwrap_or(start_date);
        check(validate_date_order(start_date, end_date), "end_date")?;

        Ok(SeedTreatment {
            id,
            lot_id: self.lot_id,
            treatment_type: self.treatment_type,
            start_date,
            end_date,
            operator: self.operator.trim().to_string(),
            status: self.status,
            observations: self
                .observations
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty()),
        })
    }
}

impl TreatmentService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<SeedTreatment>> {
        let data = self.store.read().await;
        let range = query.date_range();
        Ok(data
            .seed_treatments
            .iter()
            .filter(|t| range.contains(t.start_date))
            .filter(|t| {
                matches_search(
                    query.search(),
                    &[
                        t.lot_id.clone(),
                        t.treatment_type.to_string(),
                        t.operator.clone(),
                        t.status.to_string(),
                    ],
                )
            })
            .cloned()
            .collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<SeedTreatment> {
        let data = self.store.read().await;
        store::find(&data.seed_treatments, id).cloned()
    }

    pub async fn create(&self, input: TreatmentInput) -> AppResult<SeedTreatment> {
        let mut data = self.store.write().await;
        let treatment = input.into_treatment(&data, new_id("TRT"))?;
        let created = store::insert(&mut data.seed_treatments, treatment)?;
        tracing::info!(
            "Created treatment {} ({}) on lot {}",
            created.id,
            created.treatment_type,
            created.lot_id
        );
        Ok(created)
    }

    pub async fn update(&self, id: &str, input: TreatmentInput) -> AppResult<SeedTreatment> {
        let mut data = self.store.write().await;
        let treatment = input.into_treatment(&data, id.to_string())?;
        let updated = store::replace(&mut data.seed_treatments, treatment)?;
        tracing::info!("Updated treatment {} ({})", updated.id, updated.status);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str, confirm: bool) -> AppResult<()> {
        store::require_confirmation::<SeedTreatment>(confirm, id)?;
        let mut data = self.store.write().await;
        store::remove(&mut data.seed_treatments, id)?;
        tracing::info!("Deleted treatment {}", id);
        Ok(())
    }

    /// Treatments in progress, soonest to finish first
    pub async fn ongoing(&self) -> AppResult<Vec<SeedTreatment>> {
        let data = self.store.read().await;
        let mut ongoing: Vec<SeedTreatment> = data
            .seed_treatments
            .iter()
            .filter(|t| t.status == TreatmentStatus::InProgress)
            .cloned()
            .collect();
        ongoing.sort_by_key(|t| t.end_date);
        tracing::debug!("{} treatments in progress", ongoing.len());
        Ok(ongoing)
    }
}
