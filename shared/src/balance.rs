//! Needs-vs-stock reconciliation
//!
//! Seed needs are summed per (dranef, province, species) and compared with the
//! stock held at stations in the same division. Rows can be merged by species
//! or by dranef, and the per-species view drives the dashboard's coverage,
//! deficit and surplus figures.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::Dataset;
use crate::types::UNKNOWN_LABEL;

/// How reconciliation rows are merged
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    #[default]
    Species,
    #[serde(alias = "dranef")]
    Division,
    Detailed,
}

impl std::fmt::Display for GroupBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupBy::Species => write!(f, "species"),
            GroupBy::Division => write!(f, "division"),
            GroupBy::Detailed => write!(f, "detailed"),
        }
    }
}

/// Share of the need covered by stock
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Coverage {
    Percent(Decimal),
    /// Stock with no recorded need
    Unbounded,
}

impl Coverage {
    /// A ratio too large to represent counts as unbounded
    pub fn of(needed: Decimal, stocked: Decimal) -> Self {
        if needed > Decimal::ZERO {
            stocked
                .checked_div(needed)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .map_or(Coverage::Unbounded, Coverage::Percent)
        } else if stocked > Decimal::ZERO {
            Coverage::Unbounded
        } else {
            Coverage::Percent(Decimal::ONE_HUNDRED)
        }
    }

    pub fn percent(&self) -> Option<Decimal> {
        match self {
            Coverage::Percent(p) => Some(*p),
            Coverage::Unbounded => None,
        }
    }
}

impl std::fmt::Display for Coverage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Coverage::Percent(p) => write!(f, "{}%", format_fixed(*p, 0)),
            Coverage::Unbounded => write!(f, "N/A"),
        }
    }
}

/// Format with exactly `dp` decimals, rounding half away from zero
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}

/// One line of the reconciliation table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceRow {
    /// Species name, dranef, or `"{province} ({dranef})"` depending on the grouping
    pub label: String,
    /// Only set for the detailed grouping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    pub needed_kg: Decimal,
    pub stocked_kg: Decimal,
    pub balance_kg: Decimal,
    pub coverage: Coverage,
}

impl BalanceRow {
    fn new(label: String, species: Option<String>, needed: Decimal, stocked: Decimal) -> Self {
        Self {
            label,
            species,
            needed_kg: needed,
            stocked_kg: stocked,
            balance_kg: stocked.saturating_sub(needed),
            coverage: Coverage::of(needed, stocked),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    needed: Decimal,
    stocked: Decimal,
}

impl Totals {
    fn add_needed(&mut self, kg: Decimal) {
        self.needed = self.needed.saturating_add(kg);
    }

    fn add_stocked(&mut self, kg: Decimal) {
        self.stocked = self.stocked.saturating_add(kg);
    }

    fn is_empty(&self) -> bool {
        self.needed.is_zero() && self.stocked.is_zero()
    }
}

/// Sum of quantities, saturating at the largest representable mass
pub fn total<I>(quantities: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    quantities
        .into_iter()
        .fold(Decimal::ZERO, |acc, kg| acc.saturating_add(kg))
}

/// (dranef, province, species id)
type LocationKey = (String, String, String);

fn totals_by_location(data: &Dataset) -> BTreeMap<LocationKey, Totals> {
    let mut combined: BTreeMap<LocationKey, Totals> = BTreeMap::new();

    for need in &data.seed_needs {
        let key = (
            need.dranef.clone(),
            need.province.clone(),
            need.species_id.clone(),
        );
        combined.entry(key).or_default().add_needed(need.calculated_seed_quantity_kg);
    }

    for item in &data.stock_items {
        let (dranef, province) = match data.station(&item.srs_id) {
            Some(srs) => (srs.dranef.clone(), srs.province.clone()),
            None => (UNKNOWN_LABEL.to_string(), UNKNOWN_LABEL.to_string()),
        };
        let key = (dranef, province, item.species_id.clone());
        combined.entry(key).or_default().add_stocked(item.quantity_kg);
    }

    combined.retain(|_, totals| !totals.is_empty());
    combined
}

/// Build the reconciliation table for a grouping mode.
///
/// Species and division rows are sorted by need, largest first; detailed rows
/// by location label.
pub fn analyze(data: &Dataset, group_by: GroupBy) -> Vec<BalanceRow> {
    let combined = totals_by_location(data);

    match group_by {
        GroupBy::Detailed => {
            let mut rows: Vec<BalanceRow> = combined
                .into_iter()
                .map(|((dranef, province, species_id), t)| {
                    let dranef_short: String = dranef.chars().take(4).collect();
                    BalanceRow::new(
                        format!("{} ({})", province, dranef_short),
                        Some(data.species_name(&species_id).to_string()),
                        t.needed,
                        t.stocked,
                    )
                })
                .collect();
            rows.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.species.cmp(&b.species)));
            rows
        }
        GroupBy::Species | GroupBy::Division => {
            let mut merged: BTreeMap<String, Totals> = BTreeMap::new();
            for ((dranef, _, species_id), t) in combined {
                let label = match group_by {
                    GroupBy::Species => data.species_name(&species_id).to_string(),
                    _ => dranef,
                };
                let entry = merged.entry(label).or_default();
                entry.add_needed(t.needed);
                entry.add_stocked(t.stocked);
            }

            let mut rows: Vec<BalanceRow> = merged
                .into_iter()
                .map(|(label, t)| BalanceRow::new(label, None, t.needed, t.stocked))
                .collect();
            rows.sort_by(|a, b| b.needed_kg.cmp(&a.needed_kg));
            rows
        }
    }
}

/// Need and stock of one species across all divisions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeciesBalance {
    pub species_id: String,
    pub species_name: String,
    pub needed_kg: Decimal,
    pub stocked_kg: Decimal,
}

impl SpeciesBalance {
    pub fn balance(&self) -> Decimal {
        self.stocked_kg.saturating_sub(self.needed_kg)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeciesDeficit {
    pub species_name: String,
    pub deficit_kg: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeciesSurplus {
    pub species_name: String,
    pub surplus_kg: Decimal,
}

/// Per-species totals for every species with a need or some stock, ordered by id
pub fn species_balances(data: &Dataset) -> Vec<SpeciesBalance> {
    let mut by_species: BTreeMap<&str, Totals> = BTreeMap::new();
    for need in &data.seed_needs {
        by_species
            .entry(&need.species_id)
            .or_default()
            .add_needed(need.calculated_seed_quantity_kg);
    }
    for item in &data.stock_items {
        by_species
            .entry(&item.species_id)
            .or_default()
            .add_stocked(item.quantity_kg);
    }

    by_species
        .into_iter()
        .map(|(species_id, t)| SpeciesBalance {
            species_id: species_id.to_string(),
            species_name: data.species_name(species_id).to_string(),
            needed_kg: t.needed,
            stocked_kg: t.stocked,
        })
        .collect()
}

/// Percentage of the total need covered by stock, capped per species.
///
/// 100 when nothing is needed.
pub fn overall_coverage(balances: &[SpeciesBalance]) -> Decimal {
    let total_needed = total(balances.iter().map(|b| b.needed_kg));
    if total_needed.is_zero() {
        return Decimal::ONE_HUNDRED;
    }
    let covered = total(balances.iter().map(|b| b.stocked_kg.min(b.needed_kg)));
    covered
        .checked_div(total_needed)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ONE_HUNDRED)
}

/// Species short of stock, largest deficit first
pub fn deficits(balances: &[SpeciesBalance]) -> Vec<SpeciesDeficit> {
    let mut list: Vec<SpeciesDeficit> = balances
        .iter()
        .filter(|b| b.balance() < Decimal::ZERO)
        .map(|b| SpeciesDeficit {
            species_name: b.species_name.clone(),
            deficit_kg: -b.balance(),
        })
        .collect();
    list.sort_by(|a, b| b.deficit_kg.cmp(&a.deficit_kg));
    list
}

/// Species stocked beyond a recorded need, largest surplus first.
///
/// Stock for a species nobody asked for is not a surplus.
pub fn surpluses(balances: &[SpeciesBalance]) -> Vec<SpeciesSurplus> {
    let mut list: Vec<SpeciesSurplus> = balances
        .iter()
        .filter(|b| b.balance() > Decimal::ZERO && b.needed_kg > Decimal::ZERO)
        .map(|b| SpeciesSurplus {
            species_name: b.species_name.clone(),
            surplus_kg: b.balance(),
        })
        .collect();
    list.sort_by(|a, b| b.surplus_kg.cmp(&a.surplus_kg));
    list
}

/// Species with a need, largest first, truncated to `top_n`
pub fn chart_series(balances: &[SpeciesBalance], top_n: usize) -> Vec<SpeciesBalance> {
    let mut series: Vec<SpeciesBalance> = balances
        .iter()
        .filter(|b| b.needed_kg > Decimal::ZERO)
        .cloned()
        .collect();
    series.sort_by(|a, b| b.needed_kg.cmp(&a.needed_kg));
    series.truncate(top_n);
    series
}

/// Dashboard view of needs coverage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NeedsStatus {
    pub overall_coverage: Decimal,
    pub deficits: Vec<SpeciesDeficit>,
    pub surpluses: Vec<SpeciesSurplus>,
    pub chart: Vec<SpeciesBalance>,
}

pub fn needs_status(data: &Dataset, chart_top_n: usize) -> NeedsStatus {
    let balances = species_balances(data);
    NeedsStatus {
        overall_coverage: overall_coverage(&balances),
        deficits: deficits(&balances),
        surpluses: surpluses(&balances),
        chart: chart_series(&balances, chart_top_n),
    }
}
