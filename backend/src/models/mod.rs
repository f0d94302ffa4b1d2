//! Request models for the Seed Production Management Platform
//!
//! Re-exports models from the shared crate and adds query-string types

use serde::Deserialize;
use shared::balance::GroupBy;
use shared::types::DateRange;

pub use shared::models::*;

/// Common list filters: free-text search and an inclusive date range
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ListQuery {
    pub fn search(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }

    pub fn date_range(&self) -> DateRange {
        parse_range(&self.start_date, &self.end_date)
    }
}

/// Lot list filters
#[derive(Debug, Default, Deserialize)]
pub struct LotQuery {
    pub q: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<LotStatus>,
    pub category: Option<LotCategory>,
}

impl LotQuery {
    pub fn search(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }

    pub fn date_range(&self) -> DateRange {
        parse_range(&self.start_date, &self.end_date)
    }
}

/// Quality check list filters
#[derive(Debug, Default, Deserialize)]
pub struct QualityCheckQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub lot_id: Option<String>,
    pub check_type: Option<CheckType>,
}

impl QualityCheckQuery {
    pub fn date_range(&self) -> DateRange {
        parse_range(&self.start_date, &self.end_date)
    }
}

/// Unparseable dates leave the bound open
fn parse_range(start: &Option<String>, end: &Option<String>) -> DateRange {
    DateRange::new(
        start.as_deref().and_then(|s| s.parse().ok()),
        end.as_deref().and_then(|s| s.parse().ok()),
    )
}

/// Deletion must be confirmed with `?confirm=true`
#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct DistributionSummaryQuery {
    #[serde(default)]
    pub by: DistributionSummaryBy,
    pub q: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DistributionSummaryQuery {
    pub fn list_query(&self) -> ListQuery {
        ListQuery {
            q: self.q.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalysisQuery {
    #[serde(default)]
    pub group_by: GroupBy,
    pub format: Option<String>, // "json" or "csv"
}

#[derive(Debug, Deserialize)]
pub struct CodePreviewQuery {
    pub region_id: String,
    pub species_id: String,
    pub name: String,
}
