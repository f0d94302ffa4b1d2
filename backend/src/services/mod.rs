//! Business logic services for the Seed Production Management Platform

pub mod distribution;
pub mod evaluation;
pub mod inventory;
pub mod lot;
pub mod needs;
pub mod provenance;
pub mod provider;
pub mod quality;
pub mod region;
pub mod reporting;
pub mod species;
pub mod station;
pub mod treatment;

pub use distribution::DistributionService;
pub use evaluation::{EvaluationProgramService, FructificationService};
pub use inventory::StockService;
pub use lot::LotService;
pub use needs::SeedNeedService;
pub use provenance::ProvenanceService;
pub use provider::ProviderService;
pub use quality::QualityService;
pub use region::RegionService;
pub use reporting::ReportingService;
pub use species::SpeciesService;
pub use station::StationService;
pub use treatment::TreatmentService;

use crate::error::{AppError, AppResult};

/// Resolve a foreign key or fail with a validation error on `field`
pub(crate) fn require_ref<T>(found: Option<T>, field: &str, id: &str) -> AppResult<T> {
    found.ok_or_else(|| AppError::unknown_reference(field, id))
}

/// Map a `shared::validation` rule onto `field`
pub(crate) fn check(result: Result<(), &'static str>, field: &str) -> AppResult<()> {
    result.map_err(|message| AppError::rule(field, message))
}

/// Today's date, used when a form leaves its date empty
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}
