//! Fructification evaluation programs and their reports

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use shared::types::matches_search;
use uuid::Uuid;
use validator::Validate;

use super::{require_ref, today};
use crate::error::AppResult;
use crate::models::{
    Dataset, EvaluationProgram, FructificationEvaluation, ListQuery, ProgramStatus,
};
use crate::store::{self, new_id, Store};

/// Program id: `PE-{year}-{4 chars}`
pub fn new_program_id(year: i32) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("PE-{}-{}", year, hex[..4].to_uppercase())
}

// ============================================================================
// Evaluation programs
// ============================================================================

#[derive(Clone)]
pub struct EvaluationProgramService {
    store: Store,
}

#[derive(Debug, Deserialize, Validate)]
pub struct EvaluationProgramInput {
    #[validate(length(min = 1, message = "Species is required"))]
    pub species_id: String,
    #[validate(length(min = 1, message = "Station is required"))]
    pub srs_id: String,
    #[validate(length(min = 1, message = "Province is required"))]
    pub province: String,
    pub programmed_date: Option<NaiveDate>,
    pub real_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ProgramStatus,
}

impl EvaluationProgramInput {
    fn into_program(self, data: &Dataset, id: String) -> AppResult<EvaluationProgram> {
        self.validate()?;
        require_ref(data.species(&self.species_id), "species_id", &self.species_id)?;
        require_ref(data.station(&self.srs_id), "srs_id", &self.srs_id)?;

        Ok(EvaluationProgram {
            id,
            species_id: self.species_id,
            srs_id: self.srs_id,
            province: self.province.trim().to_string(),
            programmed_date: self.programmed_date.unwrap_or_else(today),
            real_date: self.real_date,
            status: self.status,
        })
    }
}

impl EvaluationProgramService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<EvaluationProgram>> {
        let data = self.store.read().await;
        let range = query.date_range();
        Ok(data
            .evaluation_programs
            .iter()
            .filter(|p| range.contains(p.programmed_date))
            .filter(|p| {
                let status = p.status.to_string();
                matches_search(
                    query.search(),
                    &[
                        p.id.as_str(),
                        data.species_name(&p.species_id),
                        data.station_name(&p.srs_id),
                        p.province.as_str(),
                        status.as_str(),
                    ],
                )
            })
            .cloned()
            .collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<EvaluationProgram> {
        let data = self.store.read().await;
        store::find(&data.evaluation_programs, id).cloned()
    }

    pub async fn create(&self, input: EvaluationProgramInput) -> AppResult<EvaluationProgram> {
        let mut data = self.store.write().await;
        let program = input.into_program(&data, new_program_id(today().year()))?;
        let created = store::insert(&mut data.evaluation_programs, program)?;
        tracing::info!(
            "Programmed evaluation {} for {} on {}",
            created.id,
            created.species_id,
            created.programmed_date
        );
        Ok(created)
    }

    pub async fn update(
        &self,
        id: &str,
        input: EvaluationProgramInput,
    ) -> AppResult<EvaluationProgram> {
        let mut data = self.store.write().await;
        let program = input.into_program(&data, id.to_string())?;
        let updated = store::replace(&mut data.evaluation_programs, program)?;
        tracing::info!("Updated evaluation program {} ({})", updated.id, updated.status);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str, confirm: bool) -> AppResult<()> {
        store::require_confirmation::<EvaluationProgram>(confirm, id)?;
        let mut data = self.store.write().await;
        store::remove(&mut data.evaluation_programs, id)?;
        tracing::info!("Deleted evaluation program {}", id);
        Ok(())
    }
}

// ============================================================================
// Fructification evaluations
// ============================================================================

#[derive(Clone)]
pub struct FructificationService {
    store: Store,
}

#[derive(Debug, Deserialize, Validate)]
pub struct FructificationInput {
    #[validate(length(min = 1, message = "Program is required"))]
    pub program_id: String,
    #[validate(length(min = 1, message = "Station is required"))]
    pub srs_id: String,
    #[validate(length(min = 1, message = "Report summary is required"))]
    pub report_summary: String,
    pub evaluation_date: Option<NaiveDate>,
}

impl FructificationInput {
    fn into_evaluation(self, data: &Dataset, id: String) -> AppResult<FructificationEvaluation> {
        self.validate()?;
        let program = data
            .evaluation_programs
            .iter()
            .find(|p| p.id == self.program_id);
        require_ref(program, "program_id", &self.program_id)?;
        require_ref(data.station(&self.srs_id), "srs_id", &self.srs_id)?;

        Ok(FructificationEvaluation {
            id,
            program_id: self.program_id,
            srs_id: self.srs_id,
            report_summary: self.report_summary.trim().to_string(),
            evaluation_date: self.evaluation_date.unwrap_or_else(today),
        })
    }
}

impl FructificationService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<FructificationEvaluation>> {
        let data = self.store.read().await;
        let range = query.date_range();
        Ok(data
            .fructification_evaluations
            .iter()
            .filter(|e| range.contains(e.evaluation_date))
            .filter(|e| {
                matches_search(
                    query.search(),
                    &[
                        e.program_id.as_str(),
                        data.station_name(&e.srs_id),
                        e.report_summary.as_str(),
                    ],
                )
            })
            .cloned()
            .collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<FructificationEvaluation> {
        let data = self.store.read().await;
        store::find(&data.fructification_evaluations, id).cloned()
    }

    pub async fn create(&self, input: FructificationInput) -> AppResult<FructificationEvaluation> {
        let mut data = self.store.write().await;
        let evaluation = input.into_evaluation(&data, new_id("FE"))?;
        let created = store::insert(&mut data.fructification_evaluations, evaluation)?;
        tracing::info!(
            "Recorded fructification evaluation {} for program {}",
            created.id,
            created.program_id
        );
        Ok(created)
    }

    pub async fn update(
        &self,
        id: &str,
        input: FructificationInput,
    ) -> AppResult<FructificationEvaluation> {
        let mut data = self.store.write().await;
        let evaluation = input.into_evaluation(&data, id.to_string())?;
        let updated = store::replace(&mut data.fructification_evaluations, evaluation)?;
        tracing::info!("Updated fructification evaluation {}", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str, confirm: bool) -> AppResult<()> {
        store::require_confirmation::<FructificationEvaluation>(confirm, id)?;
        let mut data = self.store.write().await;
        store::remove(&mut data.fructification_evaluations, id)?;
        tracing::info!("Deleted fructification evaluation {}", id);
        Ok(())
    }
}
