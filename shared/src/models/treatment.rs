//! Seed treatment models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A pre-sowing treatment applied to a lot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedTreatment {
    pub id: String,
    pub lot_id: String,
    pub treatment_type: TreatmentType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub operator: String,
    pub status: TreatmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentType {
    ColdStratification,
    MechanicalScarification,
    #[default]
    Soaking,
    FungicideTreatment,
}

impl std::fmt::Display for TreatmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreatmentType::ColdStratification => write!(f, "Cold Stratification"),
            TreatmentType::MechanicalScarification => write!(f, "Mechanical Scarification"),
            TreatmentType::Soaking => write!(f, "Soaking"),
            TreatmentType::FungicideTreatment => write!(f, "Fungicide Treatment"),
        }
    }
}

/// Progress of a treatment (also used for evaluation programs)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentStatus {
    #[default]
    Planned,
    InProgress,
    Done,
}

impl std::fmt::Display for TreatmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreatmentStatus::Planned => write!(f, "Planned"),
            TreatmentStatus::InProgress => write!(f, "In Progress"),
            TreatmentStatus::Done => write!(f, "Done"),
        }
    }
}
