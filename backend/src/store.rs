//! In-memory dataset store
//!
//! The whole dataset lives behind one `RwLock`. Services take the write lock
//! for the full read-modify-write of a mutation.

use std::sync::Arc;

use shared::models::*;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::config::DataConfig;
use crate::error::{AppError, AppResult};

const DEMO_DATASET: &str = include_str!("../fixtures/demo.json");

/// Shared handle to the dataset
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<Dataset>>,
}

impl Store {
    /// Wrap a dataset, bringing derived fields in line with their references
    pub fn new(mut data: Dataset) -> Self {
        let codes = data.refresh_provenance_codes();
        let quantities = data.refresh_seed_quantities();
        if codes + quantities > 0 {
            tracing::info!(
                provenance_codes = codes,
                seed_quantities = quantities,
                "Recomputed derived fields on load"
            );
        }
        Self {
            inner: Arc::new(RwLock::new(data)),
        }
    }

    /// Load the configured fixture, or the embedded demo dataset
    pub async fn load(config: &DataConfig) -> AppResult<Self> {
        let data = match &config.fixture_path {
            Some(path) => {
                tracing::info!("Loading dataset from {}", path);
                let raw = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| AppError::DataLoad(format!("{}: {}", path, e)))?;
                parse_dataset(&raw)?
            }
            None => {
                tracing::info!("Loading embedded demo dataset");
                demo_dataset()?
            }
        };

        tracing::info!(
            species = data.species.len(),
            lots = data.lots.len(),
            stock_items = data.stock_items.len(),
            seed_needs = data.seed_needs.len(),
            "Dataset loaded"
        );

        Ok(Self::new(data))
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Dataset> {
        self.inner.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Dataset> {
        self.inner.write().await
    }

    /// Copy of the whole dataset
    pub async fn snapshot(&self) -> Dataset {
        self.inner.read().await.clone()
    }
}

pub fn parse_dataset(raw: &str) -> AppResult<Dataset> {
    serde_json::from_str(raw).map_err(|e| AppError::DataLoad(e.to_string()))
}

/// The demo dataset bundled with the server
pub fn demo_dataset() -> AppResult<Dataset> {
    parse_dataset(DEMO_DATASET)
}

/// Fresh record id: `{prefix}-{8 hex chars}`
pub fn new_id(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, hex[..8].to_uppercase())
}

// ============================================================================
// Collection helpers
// ============================================================================

/// A record addressable by string id
pub trait Record {
    /// Human-readable entity name used in errors and logs
    const ENTITY: &'static str;

    fn id(&self) -> &str;
}

macro_rules! impl_record {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Record for $ty {
                const ENTITY: &'static str = $name;

                fn id(&self) -> &str {
                    &self.id
                }
            }
        )*
    };
}

impl_record! {
    Species => "Species",
    Region => "Region",
    Provenance => "Provenance",
    Provider => "Provider",
    Srs => "Station",
    Lot => "Lot",
    SeedTreatment => "Seed treatment",
    QualityCheck => "Quality check",
    StockItem => "Stock item",
    Distribution => "Distribution",
    SeedNeed => "Seed need",
    EvaluationProgram => "Evaluation program",
    FructificationEvaluation => "Fructification evaluation",
}

pub fn find<'a, T: Record>(items: &'a [T], id: &str) -> AppResult<&'a T> {
    items
        .iter()
        .find(|item| item.id() == id)
        .ok_or_else(|| AppError::NotFound(T::ENTITY.to_string()))
}

pub fn find_mut<'a, T: Record>(items: &'a mut [T], id: &str) -> AppResult<&'a mut T> {
    items
        .iter_mut()
        .find(|item| item.id() == id)
        .ok_or_else(|| AppError::NotFound(T::ENTITY.to_string()))
}

/// Add a new record at the front of the collection
pub fn insert<T: Record + Clone>(items: &mut Vec<T>, record: T) -> AppResult<T> {
    if items.iter().any(|item| item.id() == record.id()) {
        return Err(AppError::DuplicateEntry("id".to_string()));
    }
    items.insert(0, record.clone());
    Ok(record)
}

/// Replace the record with the same id in place
pub fn replace<T: Record + Clone>(items: &mut [T], record: T) -> AppResult<T> {
    let slot = find_mut(items, record.id())?;
    *slot = record.clone();
    Ok(record)
}

pub fn remove<T: Record>(items: &mut Vec<T>, id: &str) -> AppResult<T> {
    let idx = items
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| AppError::NotFound(T::ENTITY.to_string()))?;
    Ok(items.remove(idx))
}

/// Refuse a deletion that was not explicitly confirmed
pub fn require_confirmation<T: Record>(confirm: bool, id: &str) -> AppResult<()> {
    if confirm {
        Ok(())
    } else {
        tracing::warn!("Refused unconfirmed deletion of {} {}", T::ENTITY, id);
        Err(AppError::ConfirmationRequired(format!("{} {}", T::ENTITY, id)))
    }
}
