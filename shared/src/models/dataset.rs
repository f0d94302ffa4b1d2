//! The complete in-memory dataset and its lookups

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    calculate_seed_quantity, Distribution, EvaluationProgram, FructificationEvaluation, Lot,
    Provenance, Provider, QualityCheck, Region, SeedNeed, SeedTreatment, Species, Srs, StockItem,
};
use crate::codes::provenance_code;
use crate::types::UNKNOWN_LABEL;

/// Every entity collection of the platform, loaded as one structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Dataset {
    pub species: Vec<Species>,
    pub regions: Vec<Region>,
    pub provenances: Vec<Provenance>,
    pub srs: Vec<Srs>,
    pub providers: Vec<Provider>,
    pub lots: Vec<Lot>,
    pub seed_treatments: Vec<SeedTreatment>,
    pub quality_checks: Vec<QualityCheck>,
    pub stock_items: Vec<StockItem>,
    pub distributions: Vec<Distribution>,
    pub seed_needs: Vec<SeedNeed>,
    pub evaluation_programs: Vec<EvaluationProgram>,
    pub fructification_evaluations: Vec<FructificationEvaluation>,
}

impl Dataset {
    pub fn species(&self, id: &str) -> Option<&Species> {
        self.species.iter().find(|s| s.id == id)
    }

    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn provenance(&self, id: &str) -> Option<&Provenance> {
        self.provenances.iter().find(|p| p.id == id)
    }

    pub fn station(&self, id: &str) -> Option<&Srs> {
        self.srs.iter().find(|s| s.id == id)
    }

    pub fn provider(&self, id: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }

    pub fn lot(&self, id: &str) -> Option<&Lot> {
        self.lots.iter().find(|l| l.id == id)
    }

    pub fn stock_item(&self, id: &str) -> Option<&StockItem> {
        self.stock_items.iter().find(|s| s.id == id)
    }

    /// Common name of a species, or the placeholder label when unknown
    pub fn species_name(&self, id: &str) -> &str {
        self.species(id)
            .map(|s| s.common_name.as_str())
            .unwrap_or(UNKNOWN_LABEL)
    }

    /// Name of a station, or the placeholder label when unknown
    pub fn station_name(&self, id: &str) -> &str {
        self.station(id)
            .map(|s| s.name.as_str())
            .unwrap_or(UNKNOWN_LABEL)
    }

    /// Drop every stock item drawn from `lot_id`, returning how many were removed
    pub fn remove_stock_for_lot(&mut self, lot_id: &str) -> usize {
        let before = self.stock_items.len();
        self.stock_items.retain(|item| item.lot_id != lot_id);
        before - self.stock_items.len()
    }

    /// Recompute provenance codes from their region, species and name.
    ///
    /// Provenances whose region or species cannot be resolved keep their code.
    /// Returns the number of codes that changed.
    pub fn refresh_provenance_codes(&mut self) -> usize {
        let mut changed = 0;
        let updates: Vec<(usize, String)> = self
            .provenances
            .iter()
            .enumerate()
            .filter_map(|(idx, p)| {
                let region = self.region(&p.region_id)?;
                let species = self.species(&p.species_id)?;
                let code = provenance_code(&region.code, &species.scientific_name, &p.name);
                (code != p.code).then_some((idx, code))
            })
            .collect();

        for (idx, code) in updates {
            self.provenances[idx].code = code;
            changed += 1;
        }
        changed
    }

    /// Seed mass for a number of plants of `species_id`, zero for unknown species
    pub fn seed_quantity_for(&self, species_id: &str, number_of_plants: u64) -> Decimal {
        let coefficient = self
            .species(species_id)
            .and_then(|s| s.seeding_coefficient_kg_per_1000_plants);
        calculate_seed_quantity(number_of_plants, coefficient)
    }

    /// Recompute every seed need's quantity from its species coefficient.
    ///
    /// Returns the number of needs whose quantity changed.
    pub fn refresh_seed_quantities(&mut self) -> usize {
        let quantities: Vec<Decimal> = self
            .seed_needs
            .iter()
            .map(|n| self.seed_quantity_for(&n.species_id, n.number_of_plants))
            .collect();

        let mut changed = 0;
        for (need, qty) in self.seed_needs.iter_mut().zip(quantities) {
            if need.calculated_seed_quantity_kg != qty {
                need.calculated_seed_quantity_kg = qty;
                changed += 1;
            }
        }
        changed
    }
}
