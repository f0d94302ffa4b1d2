//! Quality control service
//!
//! A failing check sends its lot back to Processing.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::validation::{
    is_storable_moisture, validate_moisture_content, validate_percentage,
    validate_thousand_seed_weight,
};
use validator::Validate;

use super::{check, require_ref, today};
use crate::error::AppResult;
use crate::models::{
    CheckResult, CheckType, Dataset, LotStatus, QualityCheck, QualityCheckQuery,
};
use crate::store::{self, new_id, Store};

/// Quality control service
#[derive(Clone)]
pub struct QualityService {
    store: Store,
}

#[derive(Debug, Deserialize, Validate)]
pub struct QualityCheckInput {
    #[validate(length(min = 1, message = "Lot is required"))]
    pub lot_id: String,
    #[serde(default)]
    pub check_type: CheckType,
    pub date: Option<NaiveDate>,
    pub germination_rate: Decimal,
    pub purity: Decimal,
    pub moisture_content: Decimal,
    pub thousand_seed_weight: Decimal,
    #[serde(default)]
    pub result: CheckResult,
}

impl QualityCheckInput {
    fn into_check(self, data: &Dataset, id: String) -> AppResult<QualityCheck> {
        self.validate()?;
        require_ref(data.lot(&self.lot_id), "lot_id", &self.lot_id)?;
        check(validate_percentage(self.germination_rate), "germination_rate")?;
        check(validate_percentage(self.purity), "purity")?;
        check(validate_moisture_content(self.moisture_content), "moisture_content")?;
        check(
            validate_thousand_seed_weight(self.thousand_seed_weight),
            "thousand_seed_weight",
        )?;

        if !is_storable_moisture(self.moisture_content) {
            tracing::warn!(
                "Lot {} moisture {}% is outside the 4-10% storage range",
                self.lot_id,
                self.moisture_content
            );
        }

        Ok(QualityCheck {
            id,
            lot_id: self.lot_id,
            check_type: self.check_type,
            date: self.date.unwrap_or_else(today),
            germination_rate: self.germination_rate,
            purity: self.purity,
            moisture_content: self.moisture_content,
            thousand_seed_weight: self.thousand_seed_weight,
            result: self.result,
        })
    }
}

/// Put the checked lot back into Processing when the check failed
fn apply_result(data: &mut Dataset, qc: &QualityCheck) -> AppResult<()> {
    if qc.result != CheckResult::Fail {
        return Ok(());
    }
    let lot = store::find_mut(&mut data.lots, &qc.lot_id)?;
    if lot.status != LotStatus::Processing {
        tracing::info!(
            "Lot {} failed check {}, status {} -> {}",
            lot.id,
            qc.id,
            lot.status,
            LotStatus::Processing
        );
        lot.status = LotStatus::Processing;
    }
    Ok(())
}

impl QualityService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &QualityCheckQuery) -> AppResult<Vec<QualityCheck>> {
        let data = self.store.read().await;
        let range = query.date_range();
        let lot_id = query.lot_id.as_deref().filter(|l| !l.is_empty());
        Ok(data
            .quality_checks
            .iter()
            .filter(|qc| lot_id.map_or(true, |l| qc.lot_id == l))
            .filter(|qc| query.check_type.map_or(true, |t| qc.check_type == t))
            .filter(|qc| range.contains(qc.date))
            .cloned()
            .collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<QualityCheck> {
        let data = self.store.read().await;
        store::find(&data.quality_checks, id).cloned()
    }

    pub async fn create(&self, input: QualityCheckInput) -> AppResult<QualityCheck> {
        let mut data = self.store.write().await;
        let qc = input.into_check(&data, new_id("QC"))?;
        apply_result(&mut data, &qc)?;
        let created = store::insert(&mut data.quality_checks, qc)?;
        tracing::info!(
            "Recorded {} check {} on lot {}: {}",
            created.check_type,
            created.id,
            created.lot_id,
            created.result
        );
        Ok(created)
    }

    pub async fn update(&self, id: &str, input: QualityCheckInput) -> AppResult<QualityCheck> {
        let mut data = self.store.write().await;
        store::find(&data.quality_checks, id)?;
        let qc = input.into_check(&data, id.to_string())?;
        apply_result(&mut data, &qc)?;
        let updated = store::replace(&mut data.quality_checks, qc)?;
        tracing::info!("Updated check {}: {}", updated.id, updated.result);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str, confirm: bool) -> AppResult<()> {
        store::require_confirmation::<QualityCheck>(confirm, id)?;
        let mut data = self.store.write().await;
        store::remove(&mut data.quality_checks, id)?;
        tracing::info!("Deleted check {}", id);
        Ok(())
    }
}
