//! Dashboard insights client
//!
//! Stands in for a generative model call. It waits the configured delay and
//! writes a few `**Title** : body` paragraphs from the dashboard summary.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::balance::{format_fixed, SpeciesDeficit};
use shared::insights::format_section;

use crate::error::{AppError, AppResult};

/// Figures the insights are written from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsightsSummary {
    pub total_stock_kg: Decimal,
    pub total_lots: usize,
    pub failing_checks: usize,
    pub species_count: usize,
    /// Largest deficits, at most three
    pub deficits: Vec<SpeciesDeficit>,
}

/// Mock insights client
#[derive(Clone)]
pub struct MockInsightsClient {
    delay: Duration,
}

impl MockInsightsClient {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
        }
    }

    /// Generate insight text, paragraphs separated by a blank line
    pub async fn generate(&self, summary: &InsightsSummary) -> AppResult<String> {
        tracing::debug!("Generating insights after {:?}", self.delay);
        tokio::time::sleep(self.delay).await;

        let sections = compose(summary);
        if sections.is_empty() {
            return Err(AppError::InsightsUnavailable(
                "no insight could be derived from the summary".to_string(),
            ));
        }

        tracing::info!("Generated {} insights", sections.len());
        Ok(sections.join("\n\n"))
    }
}

fn compose(summary: &InsightsSummary) -> Vec<String> {
    let mut sections = Vec::new();

    for deficit in summary.deficits.iter().take(3) {
        sections.push(format_section(
            "Alerte stock bas",
            &format!(
                "La demande pour {} dépasse le stock disponible de {} kg. Il est urgent de planifier une récolte ou un achat.",
                deficit.species_name,
                format_fixed(deficit.deficit_kg, 2)
            ),
        ));
    }

    if summary.failing_checks > 0 {
        sections.push(format_section(
            "Contrôle Qualité Requis",
            &format!(
                "{} contrôle(s) qualité en échec. Les lots concernés sont repassés en traitement ; un nouveau test de germination est recommandé.",
                summary.failing_checks
            ),
        ));
    }

    if summary.deficits.is_empty() {
        sections.push(format_section(
            "Besoins couverts",
            &format!(
                "Aucune espèce n'est en déficit. Le stock actuel couvre les besoins exprimés pour les {} espèces suivies.",
                summary.species_count
            ),
        ));
    }

    sections.push(format_section(
        "Vue d'ensemble",
        &format!(
            "{} lots enregistrés, {} kg de semences en stock.",
            summary.total_lots,
            format_fixed(summary.total_stock_kg, 2)
        ),
    ));

    sections
}
