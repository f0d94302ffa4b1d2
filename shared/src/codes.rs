//! Identifier generation for lots and provenances
//!
//! Lot ids follow `{yy}-{species}-{region}-{NNN}` (e.g. `24-PH-I3-001`) and
//! provenance codes follow `{region}-{species}-{name}` (e.g. `I3-PH-Bouhachem`).

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::models::Dataset;

/// Reasons a code cannot be produced
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Species not found: {0}")]
    SpeciesNotFound(String),

    #[error("Provenance not found: {0}")]
    ProvenanceNotFound(String),

    #[error("Provenance region not found: {0}")]
    RegionNotFound(String),

    #[error("No lot sequence number left for prefix {0}")]
    SequenceExhausted(String),
}

impl CodeError {
    /// Input field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            CodeError::MissingFields(fields) => fields.first().copied().unwrap_or("id"),
            CodeError::SpeciesNotFound(_) => "species_id",
            CodeError::ProvenanceNotFound(_) => "provenance_id",
            CodeError::RegionNotFound(_) => "region_id",
            CodeError::SequenceExhausted(_) => "id",
        }
    }
}

/// Two-letter abbreviation of a scientific name.
///
/// `"Pinus halepensis"` gives `"PH"`, a single word gives its first two
/// letters and an empty name gives `"XX"`.
pub fn species_abbreviation(scientific_name: &str) -> String {
    let mut words = scientific_name.split_whitespace();
    match (words.next(), words.next()) {
        (Some(genus), Some(epithet)) => genus
            .chars()
            .take(1)
            .chain(epithet.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect(),
        (Some(single), None) => single.chars().take(2).flat_map(char::to_uppercase).collect(),
        _ => "XX".to_string(),
    }
}

/// Keep only ASCII letters and digits
pub fn sanitize_for_code(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Last two digits of a year, zero-padded
pub fn two_digit_year(year: i32) -> String {
    format!("{:02}", year.rem_euclid(100))
}

/// Provenance code from its region code, species and name
pub fn provenance_code(region_code: &str, scientific_name: &str, name: &str) -> String {
    format!(
        "{}-{}-{}",
        region_code,
        species_abbreviation(scientific_name),
        sanitize_for_code(name)
    )
}

pub fn lot_id_prefix(harvest_year: i32, scientific_name: &str, region_code: &str) -> String {
    format!(
        "{}-{}-{}",
        two_digit_year(harvest_year),
        species_abbreviation(scientific_name),
        region_code
    )
}

/// Next sequence number for `prefix`: one past the highest `{prefix}-{n}` in use.
///
/// A numeric suffix too large for `u32` occupies the top of the range. `None`
/// once no number is left.
pub fn next_lot_sequence<'a, I>(prefix: &str, existing_ids: I) -> Option<u32>
where
    I: IntoIterator<Item = &'a str>,
{
    existing_ids
        .into_iter()
        .filter_map(|id| id.strip_prefix(prefix)?.strip_prefix('-'))
        .filter(|suffix| !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()))
        .map(|suffix| suffix.parse::<u32>().unwrap_or(u32::MAX))
        .max()
        .map_or(Some(1), |highest| highest.checked_add(1))
}

/// Fields a new lot id is derived from
#[derive(Debug, Clone, Default)]
pub struct LotIdRequest<'a> {
    pub harvest_year: Option<i32>,
    pub harvest_date: Option<NaiveDate>,
    pub species_id: Option<&'a str>,
    pub provenance_id: Option<&'a str>,
}

impl LotIdRequest<'_> {
    /// Harvest year, falling back to the year of the harvest date
    pub fn year(&self) -> Option<i32> {
        self.harvest_year
            .or_else(|| self.harvest_date.map(|d| d.year()))
    }
}

/// Generate the next free lot id against the lots already in `data`
pub fn generate_lot_id(data: &Dataset, request: &LotIdRequest<'_>) -> Result<String, CodeError> {
    let year = request.year();
    let species_id = request.species_id.filter(|s| !s.trim().is_empty());
    let provenance_id = request.provenance_id.filter(|s| !s.trim().is_empty());

    let (year, species_id, provenance_id) = match (year, species_id, provenance_id) {
        (Some(y), Some(s), Some(p)) => (y, s, p),
        _ => {
            let mut missing = Vec::new();
            if year.is_none() {
                missing.push("harvest_year");
            }
            if species_id.is_none() {
                missing.push("species_id");
            }
            if provenance_id.is_none() {
                missing.push("provenance_id");
            }
            return Err(CodeError::MissingFields(missing));
        }
    };

    let species = data
        .species(species_id)
        .ok_or_else(|| CodeError::SpeciesNotFound(species_id.to_string()))?;
    let provenance = data
        .provenance(provenance_id)
        .ok_or_else(|| CodeError::ProvenanceNotFound(provenance_id.to_string()))?;
    let region = data
        .region(&provenance.region_id)
        .ok_or_else(|| CodeError::RegionNotFound(provenance.region_id.clone()))?;

    let prefix = lot_id_prefix(year, &species.scientific_name, &region.code);
    let sequence = next_lot_sequence(&prefix, data.lots.iter().map(|l| l.id.as_str()))
        .ok_or_else(|| CodeError::SequenceExhausted(prefix.clone()))?;

    Ok(format!("{}-{:03}", prefix, sequence))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Lot, LotCategory, LotStatus, Provenance, Region, Species};
    use rust_decimal::Decimal;

    fn dataset() -> Dataset {
        Dataset {
            species: vec![Species {
                id: "esp-034".to_string(),
                scientific_name: "Pinus halepensis".to_string(),
                common_name: "Pin d'Alep".to_string(),
                genus: "Pinus".to_string(),
                group: "Pinus halepensis".to_string(),
                seeding_coefficient_kg_per_1000_plants: Some(Decimal::new(5, 1)),
            }],
            regions: vec![Region {
                id: "reg-I3".to_string(),
                code: "I3".to_string(),
                name: "Rif Occidental".to_string(),
            }],
            provenances: vec![
                Provenance {
                    id: "prov-01".to_string(),
                    code: "I3-PH-Bouhachem".to_string(),
                    name: "Bouhachem".to_string(),
                    localisation: "Chefchaouen".to_string(),
                    region_id: "reg-I3".to_string(),
                    species_id: "esp-034".to_string(),
                },
                Provenance {
                    id: "prov-orphan".to_string(),
                    code: String::new(),
                    name: "Orphan".to_string(),
                    localisation: String::new(),
                    region_id: "reg-missing".to_string(),
                    species_id: "esp-034".to_string(),
                },
            ],
            ..Default::default()
        }
    }

    fn lot(id: &str) -> Lot {
        Lot {
            id: id.to_string(),
            quantity_kg: Decimal::from(100),
            harvest_year: 2024,
            harvest_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            category: LotCategory::Harvest,
            species_id: "esp-034".to_string(),
            provenance_id: "prov-01".to_string(),
            seed_stand: "Peuplement A".to_string(),
            srs_id: "srs-01".to_string(),
            provider_id: None,
            status: LotStatus::InStock,
        }
    }

    fn request(year: Option<i32>) -> LotIdRequest<'static> {
        LotIdRequest {
            harvest_year: year,
            harvest_date: None,
            species_id: Some("esp-034"),
            provenance_id: Some("prov-01"),
        }
    }

    #[test]
    fn test_species_abbreviation() {
        assert_eq!(species_abbreviation("Pinus halepensis"), "PH");
        assert_eq!(species_abbreviation("cedrus atlantica"), "CA");
        assert_eq!(species_abbreviation("Quercus"), "QU");
        assert_eq!(species_abbreviation("Q"), "Q");
        assert_eq!(species_abbreviation(""), "XX");
        assert_eq!(species_abbreviation("   "), "XX");
    }

    #[test]
    fn test_sanitize_for_code() {
        assert_eq!(sanitize_for_code("Sidi M'guild"), "SidiMguild");
        assert_eq!(sanitize_for_code("Forêt de Bouhachem 2"), "FortdeBouhachem2");
        assert_eq!(sanitize_for_code("---"), "");
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(two_digit_year(2024), "24");
        assert_eq!(two_digit_year(2005), "05");
        assert_eq!(two_digit_year(2100), "00");
    }

    #[test]
    fn test_provenance_code() {
        assert_eq!(
            provenance_code("I3", "Pinus halepensis", "Bouhachem"),
            "I3-PH-Bouhachem"
        );
    }

    #[test]
    fn test_first_lot_id_for_prefix() {
        let data = dataset();
        assert_eq!(generate_lot_id(&data, &request(Some(2024))).unwrap(), "24-PH-I3-001");
    }

    #[test]
    fn test_lot_id_sequence_follows_max_suffix() {
        let mut data = dataset();
        data.lots = vec![lot("24-PH-I3-001"), lot("24-PH-I3-007"), lot("23-PH-I3-010")];
        assert_eq!(generate_lot_id(&data, &request(Some(2024))).unwrap(), "24-PH-I3-008");
    }

    #[test]
    fn test_lot_id_prefix_is_exact() {
        let mut data = dataset();
        // A longer region code sharing the same leading characters is a different prefix
        data.lots = vec![lot("24-PH-I31-005")];
        assert_eq!(generate_lot_id(&data, &request(Some(2024))).unwrap(), "24-PH-I3-001");
    }

    #[test]
    fn test_lot_sequence_out_of_range_suffixes() {
        // Too long for u32, still counts as taken
        assert_eq!(
            next_lot_sequence("24-PH-I3", ["24-PH-I3-99999999999"]),
            None
        );
        assert_eq!(next_lot_sequence("24-PH-I3", ["24-PH-I3-4294967294"]), Some(u32::MAX));
        assert_eq!(next_lot_sequence("24-PH-I3", ["24-PH-I3-abc"]), Some(1));
    }

    #[test]
    fn test_lot_id_sequence_exhausted() {
        let mut data = dataset();
        data.lots = vec![lot("24-PH-I3-001"), lot("24-PH-I3-4294967295")];
        assert_eq!(
            generate_lot_id(&data, &request(Some(2024))),
            Err(CodeError::SequenceExhausted("24-PH-I3".to_string()))
        );
    }

    #[test]
    fn test_lot_id_year_from_harvest_date() {
        let data = dataset();
        let req = LotIdRequest {
            harvest_date: NaiveDate::from_ymd_opt(2023, 11, 2),
            ..request(None)
        };
        assert_eq!(generate_lot_id(&data, &req).unwrap(), "23-PH-I3-001");
    }

    #[test]
    fn test_lot_id_missing_fields() {
        let data = dataset();
        let req = LotIdRequest {
            species_id: None,
            ..request(None)
        };
        assert_eq!(
            generate_lot_id(&data, &req),
            Err(CodeError::MissingFields(vec!["harvest_year", "species_id"]))
        );
    }

    #[test]
    fn test_lot_id_unresolved_references() {
        let data = dataset();

        let req = LotIdRequest {
            species_id: Some("esp-999"),
            ..request(Some(2024))
        };
        assert_eq!(
            generate_lot_id(&data, &req),
            Err(CodeError::SpeciesNotFound("esp-999".to_string()))
        );

        let req = LotIdRequest {
            provenance_id: Some("prov-orphan"),
            ..request(Some(2024))
        };
        assert_eq!(
            generate_lot_id(&data, &req),
            Err(CodeError::RegionNotFound("reg-missing".to_string()))
        );
    }
}
