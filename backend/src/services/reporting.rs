//! Reporting service for the dashboard and the needs-vs-stock analysis

use rust_decimal::Decimal;
use serde::Serialize;
use shared::balance::{self, format_fixed, BalanceRow, GroupBy, NeedsStatus};

use crate::error::{AppError, AppResult};
use crate::external::InsightsSummary;
use crate::models::{CheckResult, Dataset};
use crate::store::Store;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    store: Store,
}

/// Dashboard metrics
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_stock_kg: Decimal,
    pub total_lots: usize,
    pub failing_checks: usize,
    pub species_count: usize,
    pub needs: NeedsStatus,
}

/// Reconciliation table for one grouping mode
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub group_by: GroupBy,
    pub rows: Vec<BalanceRow>,
}

fn total_stock_kg(data: &Dataset) -> Decimal {
    balance::total(data.stock_items.iter().map(|item| item.quantity_kg))
}

fn failing_checks(data: &Dataset) -> usize {
    data.quality_checks
        .iter()
        .filter(|qc| qc.result == CheckResult::Fail)
        .count()
}

impl ReportingService {
    /// Create a new ReportingService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Get dashboard metrics
    pub async fn dashboard(&self, chart_top_n: usize) -> AppResult<DashboardSummary> {
        let data = self.store.read().await;
        let summary = DashboardSummary {
            total_stock_kg: total_stock_kg(&data),
            total_lots: data.lots.len(),
            failing_checks: failing_checks(&data),
            species_count: data.species.len(),
            needs: balance::needs_status(&data, chart_top_n),
        };
        tracing::debug!(
            coverage = %summary.needs.overall_coverage,
            deficits = summary.needs.deficits.len(),
            "Computed dashboard"
        );
        Ok(summary)
    }

    /// Needs-vs-stock table
    pub async fn analysis(&self, group_by: GroupBy) -> AppResult<AnalysisReport> {
        let data = self.store.read().await;
        let rows = balance::analyze(&data, group_by);
        tracing::debug!("Analysis by {}: {} rows", group_by, rows.len());
        Ok(AnalysisReport { group_by, rows })
    }

    /// Figures handed to the insights client
    pub async fn insights_summary(&self) -> AppResult<InsightsSummary> {
        let data = self.store.read().await;
        let balances = balance::species_balances(&data);
        let mut deficits = balance::deficits(&balances);
        deficits.truncate(3);
        Ok(InsightsSummary {
            total_stock_kg: total_stock_kg(&data),
            total_lots: data.lots.len(),
            failing_checks: failing_checks(&data),
            species_count: data.species.len(),
            deficits,
        })
    }

    /// Export the analysis table as `;`-separated CSV
    pub fn export_to_csv(report: &AnalysisReport) -> AppResult<String> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b';')
            .from_writer(vec![]);

        let csv_error = |e: csv::Error| AppError::Internal(format!("CSV serialization error: {}", e));

        let mut header = vec![match report.group_by {
            GroupBy::Detailed => "Province (DRANEF)",
            GroupBy::Species => "Espèce",
            GroupBy::Division => "DRANEF",
        }];
        if report.group_by == GroupBy::Detailed {
            header.push("Espèce");
        }
        header.extend([
            "Besoins (kg)",
            "Stock (kg)",
            "Bilan (kg)",
            "Taux de Couverture (%)",
        ]);
        wtr.write_record(&header).map_err(csv_error)?;

        for row in &report.rows {
            let mut record = vec![row.label.clone()];
            if report.group_by == GroupBy::Detailed {
                record.push(row.species.clone().unwrap_or_default());
            }
            record.extend([
                format_fixed(row.needed_kg, 2),
                format_fixed(row.stocked_kg, 2),
                format_fixed(row.balance_kg, 2),
                row.coverage.to_string(),
            ]);
            wtr.write_record(&record).map_err(csv_error)?;
        }

        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }

    /// Download name of the analysis CSV
    pub fn export_filename(group_by: GroupBy) -> String {
        format!("analyse_besoins_stock_{}.csv", group_by)
    }
}
