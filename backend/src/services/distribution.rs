//! Seed distribution service

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use shared::types::{matches_search, UNKNOWN_LABEL};
use shared::validation::validate_positive_quantity;
use validator::Validate;

use super::{check, require_ref, today};
use crate::error::AppResult;
use crate::models::{Dataset, Distribution, DistributionSummaryBy, ListQuery};
use crate::store::{self, new_id, Store};

/// Distribution service
#[derive(Clone)]
pub struct DistributionService {
    store: Store,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DistributionInput {
    #[validate(length(min = 1, message = "Stock item is required"))]
    pub stock_item_id: String,
    pub quantity_kg: Decimal,
    #[validate(length(min = 1, message = "Destination is required"))]
    pub destination: String,
    pub distribution_date: Option<NaiveDate>,
}

/// One bar of the distribution summary
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistributionTotal {
    pub label: String,
    pub quantity_kg: Decimal,
}

impl DistributionInput {
    fn into_distribution(self, data: &Dataset, id: String) -> AppResult<Distribution> {
        self.validate()?;
        check(validate_positive_quantity(self.quantity_kg), "quantity_kg")?;
        require_ref(
            data.stock_item(&self.stock_item_id),
            "stock_item_id",
            &self.stock_item_id,
        )?;

        Ok(Distribution {
            id,
            stock_item_id: self.stock_item_id,
            quantity_kg: self.quantity_kg,
            destination: self.destination.trim().to_string(),
            distribution_date: self.distribution_date.unwrap_or_else(today),
        })
    }
}

/// Lot id and species name behind a distribution, via its stock item
fn origin<'a>(data: &'a Dataset, dist: &Distribution) -> (&'a str, &'a str) {
    match data.stock_item(&dist.stock_item_id) {
        Some(item) => (item.lot_id.as_str(), data.species_name(&item.species_id)),
        None => ("", UNKNOWN_LABEL),
    }
}

fn filtered<'a>(data: &'a Dataset, query: &ListQuery) -> Vec<&'a Distribution> {
    let range = query.date_range();
    data.distributions
        .iter()
        .filter(|d| range.contains(d.distribution_date))
        .filter(|d| {
            let (lot_id, species) = origin(data, d);
            matches_search(
                query.search(),
                &[d.id.as_str(), lot_id, species, d.destination.as_str()],
            )
        })
        .collect()
}

/// Sum distributed quantities by species or destination, largest first
pub fn summarize(
    data: &Dataset,
    distributions: &[&Distribution],
    by: DistributionSummaryBy,
    top_n: usize,
) -> Vec<DistributionTotal> {
    let mut totals: HashMap<String, Decimal> = HashMap::new();
    for dist in distributions {
        let label = match by {
            DistributionSummaryBy::Species => origin(data, dist).1.to_string(),
            DistributionSummaryBy::Destination => dist.destination.clone(),
        };
        let sum = totals.entry(label).or_insert(Decimal::ZERO);
        *sum = sum.saturating_add(dist.quantity_kg);
    }

    let mut rows: Vec<DistributionTotal> = totals
        .into_iter()
        .map(|(label, quantity_kg)| DistributionTotal {
            label,
            quantity_kg: quantity_kg.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.quantity_kg
            .cmp(&a.quantity_kg)
            .then_with(|| a.label.cmp(&b.label))
    });
    rows.truncate(top_n);
    rows
}

impl DistributionService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<Distribution>> {
        let data = self.store.read().await;
        Ok(filtered(&data, query).into_iter().cloned().collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<Distribution> {
        let data = self.store.read().await;
        store::find(&data.distributions, id).cloned()
    }

    pub async fn create(&self, input: DistributionInput) -> AppResult<Distribution> {
        let mut data = self.store.write().await;
        let dist = input.into_distribution(&data, new_id("DIST"))?;
        let created = store::insert(&mut data.distributions, dist)?;
        tracing::info!(
            "Distributed {} kg from {} to {}",
            created.quantity_kg,
            created.stock_item_id,
            created.destination
        );
        Ok(created)
    }

    pub async fn update(&self, id: &str, input: DistributionInput) -> AppResult<Distribution> {
        let mut data = self.store.write().await;
        let dist = input.into_distribution(&data, id.to_string())?;
        let updated = store::replace(&mut data.distributions, dist)?;
        tracing::info!("Updated distribution {}", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str, confirm: bool) -> AppResult<()> {
        store::require_confirmation::<Distribution>(confirm, id)?;
        let mut data = self.store.write().await;
        store::remove(&mut data.distributions, id)?;
        tracing::info!("Deleted distribution {}", id);
        Ok(())
    }

    /// Totals over the filtered distributions
    pub async fn summary(
        &self,
        by: DistributionSummaryBy,
        query: &ListQuery,
        top_n: usize,
    ) -> AppResult<Vec<DistributionTotal>> {
        let data = self.store.read().await;
        let rows = summarize(&data, &filtered(&data, query), by, top_n);
        tracing::debug!("Distribution summary by {:?}: {} rows", by, rows.len());
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Species, StockItem};
    use std::str::FromStr;

    fn dataset() -> Dataset {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let dist = |id: &str, stock: &str, kg: &str, dest: &str| Distribution {
            id: id.to_string(),
            stock_item_id: stock.to_string(),
            quantity_kg: Decimal::from_str(kg).unwrap(),
            destination: dest.to_string(),
            distribution_date: date,
        };
        Dataset {
            species: vec![Species {
                id: "esp-047".to_string(),
                scientific_name: "Cedrus atlantica".to_string(),
                common_name: "Cèdre de l'Atlas".to_string(),
                genus: "Cedrus".to_string(),
                group: "Cedrus atlantica".to_string(),
                seeding_coefficient_kg_per_1000_plants: None,
            }],
            stock_items: vec![StockItem {
                id: "STK-1".to_string(),
                lot_id: "24-CA-IV1-001".to_string(),
                species_id: "esp-047".to_string(),
                quantity_kg: Decimal::from(100),
                entry_date: date,
                srs_id: "srs-01".to_string(),
            }],
            distributions: vec![
                dist("DIST-1", "STK-1", "10.005", "Pépinière Azrou"),
                dist("DIST-2", "STK-1", "5", "Pépinière Ifrane"),
                dist("DIST-3", "STK-GONE", "20", "Pépinière Azrou"),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_summary_by_species_uses_unknown_for_missing_stock() {
        let data = dataset();
        let all: Vec<&Distribution> = data.distributions.iter().collect();
        let rows = summarize(&data, &all, DistributionSummaryBy::Species, 7);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, UNKNOWN_LABEL);
        assert_eq!(rows[0].quantity_kg, Decimal::from(20));
        assert_eq!(rows[1].label, "Cèdre de l'Atlas");
        assert_eq!(rows[1].quantity_kg, Decimal::from_str("15.01").unwrap());
    }

    #[test]
    fn test_summary_by_destination_truncates() {
        let data = dataset();
        let all: Vec<&Distribution> = data.distributions.iter().collect();
        let rows = summarize(&data, &all, DistributionSummaryBy::Destination, 1);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "Pépinière Azrou");
        assert_eq!(rows[0].quantity_kg, Decimal::from_str("30.01").unwrap());
    }

    #[test]
    fn test_search_reaches_lot_through_stock_item() {
        let data = dataset();
        let query = ListQuery {
            q: Some("24-ca".to_string()),
            ..Default::default()
        };
        let found = filtered(&data, &query);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_summary_saturates_on_huge_quantities() {
        let mut data = dataset();
        for dist in data.distributions.iter_mut() {
            dist.quantity_kg = Decimal::MAX;
        }
        let all: Vec<&Distribution> = data.distributions.iter().collect();
        let rows = summarize(&data, &all, DistributionSummaryBy::Destination, 7);

        assert_eq!(rows[0].label, "Pépinière Azrou");
        assert_eq!(rows[0].quantity_kg, Decimal::MAX);
    }
}
