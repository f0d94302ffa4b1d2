//! Fructification evaluation models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::TreatmentStatus;

/// Planned field evaluation of a species' fruiting at a station
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvaluationProgram {
    pub id: String,
    pub species_id: String,
    pub srs_id: String,
    pub province: String,
    pub programmed_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_date: Option<NaiveDate>,
    pub status: ProgramStatus,
}

/// Programs move through the same steps as treatments
pub type ProgramStatus = TreatmentStatus;

/// Report produced by an evaluation program
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FructificationEvaluation {
    pub id: String,
    pub program_id: String,
    pub srs_id: String,
    pub report_summary: String,
    pub evaluation_date: NaiveDate,
}
